//! Decoding session
//!
//! The session is the plugin's whole state between startup and shutdown. The
//! host calls it in a fixed order:
//!
//! ```text
//! initialize ─▶ ( begin_transaction ─▶ record_change/record_truncate* ─▶ commit_transaction )* ─▶ finalize
//! ```
//!
//! Calls are serialized by the host; the session never checks the ordering
//! itself. Windows do not nest, and changes only arrive inside a window.

use crate::common::{
    ChangeOp, CommitInfoConfig, Lsn, PluginOption, RelationId, Result, TransactionId,
};
use crate::decoding::{CallbackSet, HostCapabilities, OutputType, TransactionCounters};
use tracing::{debug, info, trace};

/// Per-stream plugin state.
#[derive(Debug)]
pub struct DecodingSession {
    config: CommitInfoConfig,
    counters: TransactionCounters,
    /// Reused for every emitted line
    buffer: String,
}

impl DecodingSession {
    /// Start a session from the host's option list.
    ///
    /// Fails with `UnknownParameter` for any option other than
    /// `skip-empty-xacts`, and with `InvalidParameter` when its value is not a
    /// boolean literal. No session exists after a failure.
    pub fn initialize(options: &[PluginOption], capabilities: HostCapabilities) -> Result<Self> {
        let config = CommitInfoConfig::from_options(options, capabilities)?;
        Ok(Self::with_config(config))
    }

    /// Start a session from an already built configuration.
    pub fn with_config(config: CommitInfoConfig) -> Self {
        info!(
            skip_empty_xacts = config.skip_empty_xacts,
            truncate = config.capabilities.truncate,
            "Commit-info decoding session started"
        );
        Self {
            config,
            counters: TransactionCounters::default(),
            buffer: String::new(),
        }
    }

    /// Release the session. Must not be called inside a transaction window.
    pub fn finalize(self) {
        info!("Commit-info decoding session finished");
    }

    /// Session configuration.
    pub fn config(&self) -> &CommitInfoConfig {
        &self.config
    }

    /// Output format requested from the host.
    pub fn output_type(&self) -> OutputType {
        OutputType::Textual
    }

    /// Callbacks to register with the host.
    pub fn callbacks(&self) -> CallbackSet {
        CallbackSet::for_capabilities(self.config.capabilities)
    }

    /// Counters of the current (or last committed) transaction.
    pub fn counters(&self) -> &TransactionCounters {
        &self.counters
    }

    /// BEGIN: zero all counters for the new transaction.
    pub fn begin_transaction(&mut self, xid: TransactionId) {
        debug!(xid, "Transaction BEGIN");
        self.counters.reset();
    }

    /// Count one row-level change.
    ///
    /// # Panics
    ///
    /// If `op` is not insert, update or delete.
    pub fn record_change(&mut self, xid: TransactionId, relation: RelationId, op: ChangeOp) {
        trace!(xid, relation, op = %op, "Change");
        self.counters.record_change(op);
    }

    /// Count one truncate event covering `relations`.
    ///
    /// # Panics
    ///
    /// If the host was declared without truncate support; the callback is not
    /// registered in that case.
    pub fn record_truncate(&mut self, xid: TransactionId, relations: &[RelationId]) {
        assert!(
            self.config.capabilities.truncate,
            "truncate callback invoked on a host without truncate support (xid {xid})"
        );
        trace!(xid, relations = relations.len(), "Truncate");
        self.counters.record_truncate(relations.len() as u64);
    }

    /// COMMIT: produce the summary line, or nothing when the transaction is
    /// empty and `skip-empty-xacts` is on.
    ///
    /// Counters are left as they are; the next `begin_transaction` clears them.
    /// The returned line borrows the session's buffer and is valid until the
    /// next call.
    pub fn commit_transaction(&mut self, xid: TransactionId, commit_lsn: Lsn) -> Option<&str> {
        if self.config.skip_empty_xacts && !self.counters.has_observed_change {
            debug!(xid, lsn = %commit_lsn, "Skipping empty transaction");
            return None;
        }

        self.buffer.clear();
        let summary = self
            .counters
            .summary(xid, commit_lsn, self.config.capabilities.truncate);
        self.buffer.push_str(&summary.to_string());

        debug!(
            xid,
            lsn = %commit_lsn,
            inserts = self.counters.inserts,
            updates = self.counters.updates,
            deletes = self.counters.deletes,
            truncates = self.counters.truncates,
            "Transaction COMMIT"
        );
        Some(self.buffer.as_str())
    }
}
