//! Host capabilities and callback registration
//!
//! Which callbacks the plugin registers depends on what the host can send.
//! The set is decided once, at session start.

use serde::{Deserialize, Serialize};
use std::fmt;

/// First server version (PostgreSQL 11) that delivers truncate notifications.
pub const TRUNCATE_MIN_SERVER_VERSION: u32 = 110000;

/// Features the decoding host supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostCapabilities {
    /// Host delivers truncate notifications
    pub truncate: bool,
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self { truncate: true }
    }
}

impl HostCapabilities {
    /// Capabilities of a host reporting `server_version_num` (e.g. 170002).
    pub fn for_server_version(server_version_num: u32) -> Self {
        Self {
            truncate: server_version_num >= TRUNCATE_MIN_SERVER_VERSION,
        }
    }

    /// Host without truncate notifications.
    pub fn without_truncate() -> Self {
        Self { truncate: false }
    }
}

/// A plugin callback the host may invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Callback {
    Startup,
    Begin,
    Change,
    Truncate,
    Commit,
    Shutdown,
}

impl fmt::Display for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Callback::Startup => "startup_cb",
            Callback::Begin => "begin_cb",
            Callback::Change => "change_cb",
            Callback::Truncate => "truncate_cb",
            Callback::Commit => "commit_cb",
            Callback::Shutdown => "shutdown_cb",
        };
        f.write_str(name)
    }
}

/// Output format the plugin produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputType {
    /// One UTF-8 text line per message
    Textual,
}

/// The callbacks advertised to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackSet {
    callbacks: Vec<Callback>,
}

impl CallbackSet {
    /// Callback set for the given capabilities.
    pub fn for_capabilities(capabilities: HostCapabilities) -> Self {
        let mut callbacks = vec![Callback::Startup, Callback::Begin, Callback::Change];
        if capabilities.truncate {
            callbacks.push(Callback::Truncate);
        }
        callbacks.extend([Callback::Commit, Callback::Shutdown]);
        Self { callbacks }
    }

    /// Whether `callback` is registered.
    pub fn contains(&self, callback: Callback) -> bool {
        self.callbacks.contains(&callback)
    }

    /// Registered callbacks in registration order.
    pub fn iter(&self) -> impl Iterator<Item = Callback> + '_ {
        self.callbacks.iter().copied()
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Whether no callback is registered.
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}
