//! Shared helpers for integration tests

#![allow(dead_code)]

use pg_commit_info::{DecodingSession, HostCapabilities, PluginOption};
use std::sync::Once;

static INIT: Once = Once::new();

/// Install a test subscriber once per test binary.
pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive("pg_commit_info=debug".parse().unwrap()),
            )
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Parse `name[=value]` strings into plugin options.
pub fn options(list: &[&str]) -> Vec<PluginOption> {
    list.iter().map(|s| s.parse().unwrap()).collect()
}

/// Session on a host with truncate support.
pub fn session(list: &[&str]) -> DecodingSession {
    DecodingSession::initialize(&options(list), HostCapabilities::default()).unwrap()
}
