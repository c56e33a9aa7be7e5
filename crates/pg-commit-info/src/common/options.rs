//! Plugin options and configuration
//!
//! The host hands the plugin an ordered list of `name [= value]` options at
//! session start. The only recognized option is `skip-empty-xacts`.
//!
//! Note the quirk carried over from the host's option convention: a bare
//! `skip-empty-xacts` with no value turns the flag **off**, not on. Only an
//! explicit true literal (`skip-empty-xacts=true`, `=on`, `=1`, ...) enables it.

use crate::common::{CommitInfoError, Result};
use crate::decoding::HostCapabilities;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Name of the option that suppresses output for transactions without changes.
pub const SKIP_EMPTY_XACTS: &str = "skip-empty-xacts";

/// A single `name [= value]` plugin option as passed by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginOption {
    /// Option name, compared case-sensitively
    pub name: String,
    /// Option value; `None` when the option was given without one
    #[serde(default)]
    pub value: Option<String>,
}

impl PluginOption {
    /// Create an option with a value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// Create a valueless option.
    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

impl fmt::Display for PluginOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => write!(f, "{}={}", self.name, v),
            None => write!(f, "{}", self.name),
        }
    }
}

impl FromStr for PluginOption {
    type Err = String;

    /// Parses `name=value` or a bare `name`. Only the first `=` splits.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (name, value) = match s.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (s, None),
        };
        if name.is_empty() {
            return Err(format!("option \"{}\" has an empty name", s));
        }
        Ok(Self {
            name: name.to_string(),
            value: value.map(str::to_string),
        })
    }
}

/// Parse a boolean literal the way the host's `parse_bool` does.
///
/// Case-insensitive. Accepts any non-empty prefix of `true`, `false`, `yes`
/// and `no`; `on`, `of`, `off`; and the single digits `1` and `0`.
/// A lone `o` is ambiguous and rejected, as is surrounding whitespace.
pub fn parse_bool(value: &str) -> Option<bool> {
    let lower = value.to_ascii_lowercase();
    let v = lower.as_str();

    match v.as_bytes().first()? {
        b't' => "true".starts_with(v).then_some(true),
        b'f' => "false".starts_with(v).then_some(false),
        b'y' => "yes".starts_with(v).then_some(true),
        b'n' => "no".starts_with(v).then_some(false),
        b'o' => {
            if v == "on" {
                Some(true)
            } else if v.len() >= 2 && "off".starts_with(v) {
                Some(false)
            } else {
                None
            }
        }
        b'1' if v.len() == 1 => Some(true),
        b'0' if v.len() == 1 => Some(false),
        _ => None,
    }
}

/// Session configuration, fixed at session start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitInfoConfig {
    /// Emit nothing for transactions that saw no change or truncate (default: false)
    pub skip_empty_xacts: bool,
    /// What the host can notify us about
    pub capabilities: HostCapabilities,
}

impl CommitInfoConfig {
    /// Create a builder for CommitInfoConfig.
    pub fn builder() -> CommitInfoConfigBuilder {
        CommitInfoConfigBuilder::default()
    }

    /// Build a configuration from the host's option list.
    ///
    /// Options are applied in order; a later `skip-empty-xacts` overrides an
    /// earlier one. The first bad option fails the whole call.
    pub fn from_options(options: &[PluginOption], capabilities: HostCapabilities) -> Result<Self> {
        let mut config = Self {
            skip_empty_xacts: false,
            capabilities,
        };

        for option in options {
            match option.name.as_str() {
                SKIP_EMPTY_XACTS => {
                    config.skip_empty_xacts = match option.value.as_deref() {
                        // Bare flag means false
                        None => false,
                        Some(v) => parse_bool(v)
                            .ok_or_else(|| CommitInfoError::invalid_parameter(&option.name, v))?,
                    };
                }
                _ => {
                    return Err(CommitInfoError::unknown_parameter(
                        &option.name,
                        option.value.as_deref(),
                    ));
                }
            }
            debug!(option = %option, "Applied plugin option");
        }

        Ok(config)
    }
}

/// Builder for CommitInfoConfig.
#[derive(Default)]
pub struct CommitInfoConfigBuilder {
    config: CommitInfoConfig,
}

impl CommitInfoConfigBuilder {
    /// Enable/disable suppression of empty transactions.
    pub fn skip_empty_xacts(mut self, skip: bool) -> Self {
        self.config.skip_empty_xacts = skip;
        self
    }

    /// Set the host capabilities.
    pub fn capabilities(mut self, capabilities: HostCapabilities) -> Self {
        self.config.capabilities = capabilities;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> CommitInfoConfig {
        self.config
    }
}
