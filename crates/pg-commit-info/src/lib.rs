//! # pg-commit-info - Per-transaction change summaries
//!
//! A logical decoding output plugin that counts the inserts, updates, deletes
//! and truncates of each decoded transaction and emits one text line at commit:
//!
//! ```text
//! xid 100: lsn:1/00000040 inserts:2 deletes:1 updates:0 truncates:0 relations truncated:0
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────┐  begin / change / truncate / commit  ┌─────────────────┐
//! │ Decoding host  │ ───────────────────────────────────▶ │ DecodingSession │
//! │ (ReplayDriver) │ ◀─────────── summary line ────────── │  (counters)     │
//! └───────┬────────┘                                      └─────────────────┘
//!         │
//!         ▼
//!   ┌────────────┐
//!   │ OutputSink │
//!   └────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use pg_commit_info::{ChangeOp, DecodingSession, HostCapabilities, Lsn, PluginOption};
//!
//! let options = [PluginOption::new("skip-empty-xacts", "true")];
//! let mut session = DecodingSession::initialize(&options, HostCapabilities::default())?;
//!
//! session.begin_transaction(100);
//! session.record_change(100, 16384, ChangeOp::Insert);
//! let line = session.commit_transaction(100, Lsn(0x1_0000_0040));
//! assert_eq!(
//!     line,
//!     Some("xid 100: lsn:1/00000040 inserts:1 deletes:0 updates:0 truncates:0 relations truncated:0")
//! );
//!
//! session.finalize();
//! # Ok::<(), pg_commit_info::CommitInfoError>(())
//! ```
//!
//! ## Options
//!
//! | Option             | Value   | Default | Effect                                   |
//! |--------------------|---------|---------|------------------------------------------|
//! | `skip-empty-xacts` | boolean | `false` | No line for transactions without changes |
//!
//! A bare `skip-empty-xacts` without a value means `false`.

pub mod common;
pub mod decoding;
pub mod replay;

pub use common::{
    ChangeOp, CommitInfoConfig, CommitInfoError, ErrorCategory, Lsn, PluginOption, RelationId,
    Result, TransactionId,
};
pub use decoding::{CallbackSet, DecodingSession, HostCapabilities, TransactionCounters};
pub use replay::{replay_script, DecodingEvent, IoSink, OutputSink, ReplayDriver};
