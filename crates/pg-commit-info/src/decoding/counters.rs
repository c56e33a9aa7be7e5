//! Per-transaction change counters and the commit summary line

use crate::common::{ChangeOp, Lsn, TransactionId};
use std::fmt;

/// Counters for the transaction currently being decoded.
///
/// Valid only between a begin and the matching commit. `reset` runs at every
/// begin; commit reads the values without clearing them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionCounters {
    pub inserts: u64,
    pub updates: u64,
    pub deletes: u64,
    /// Truncate events seen in this transaction
    pub truncates: u64,
    /// Relation count of the most recent truncate; overwritten, never summed
    pub last_truncated_relations: u64,
    /// Set by the first change or truncate, cleared only by `reset`
    pub has_observed_change: bool,
}

impl TransactionCounters {
    /// Zero every counter and clear the change flag.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Count a row-level change.
    ///
    /// # Panics
    ///
    /// If `op` is not insert, update or delete. The host never routes any
    /// other kind to the change callback.
    pub fn record_change(&mut self, op: ChangeOp) {
        match op {
            ChangeOp::Insert => self.inserts += 1,
            ChangeOp::Update => self.updates += 1,
            ChangeOp::Delete => self.deletes += 1,
            ChangeOp::Truncate | ChangeOp::Message => {
                panic!("unexpected change kind {op} delivered to the change callback")
            }
        }
        self.has_observed_change = true;
    }

    /// Count a truncate touching `relation_count` relations.
    pub fn record_truncate(&mut self, relation_count: u64) {
        self.truncates += 1;
        self.last_truncated_relations = relation_count;
        self.has_observed_change = true;
    }

    /// Summary of these counters for a committed transaction.
    pub fn summary(&self, xid: TransactionId, commit_lsn: Lsn, with_truncate: bool) -> CommitSummary<'_> {
        CommitSummary {
            xid,
            commit_lsn,
            counters: self,
            with_truncate,
        }
    }
}

/// The line emitted at commit.
///
/// ```text
/// xid 100: lsn:1/00000040 inserts:2 deletes:1 updates:0 truncates:0 relations truncated:0
/// ```
///
/// The truncate fields are left out entirely when the host has no truncate
/// support.
#[derive(Debug, Clone, Copy)]
pub struct CommitSummary<'a> {
    xid: TransactionId,
    commit_lsn: Lsn,
    counters: &'a TransactionCounters,
    with_truncate: bool,
}

impl fmt::Display for CommitSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.counters;
        write!(
            f,
            "xid {}: lsn:{} inserts:{} deletes:{} updates:{}",
            self.xid, self.commit_lsn, c.inserts, c.deletes, c.updates
        )?;
        if self.with_truncate {
            write!(
                f,
                " truncates:{} relations truncated:{}",
                c.truncates, c.last_truncated_relations
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_record_change() {
        let mut c = TransactionCounters::default();
        assert!(!c.has_observed_change);

        c.record_change(ChangeOp::Insert);
        c.record_change(ChangeOp::Insert);
        c.record_change(ChangeOp::Update);
        c.record_change(ChangeOp::Delete);

        assert_eq!(c.inserts, 2);
        assert_eq!(c.updates, 1);
        assert_eq!(c.deletes, 1);
        assert!(c.has_observed_change);
    }

    #[test]
    fn test_truncate_overwrites_relation_count() {
        let mut c = TransactionCounters::default();
        c.record_truncate(3);
        c.record_truncate(5);

        assert_eq!(c.truncates, 2);
        assert_eq!(c.last_truncated_relations, 5);
        assert!(c.has_observed_change);
    }

    #[test]
    fn test_reset() {
        let mut c = TransactionCounters::default();
        c.record_change(ChangeOp::Delete);
        c.record_truncate(4);
        c.reset();
        assert_eq!(c, TransactionCounters::default());
    }

    #[test]
    #[should_panic(expected = "unexpected change kind TRUNCATE")]
    fn test_record_change_rejects_truncate() {
        TransactionCounters::default().record_change(ChangeOp::Truncate);
    }

    #[test]
    #[should_panic(expected = "unexpected change kind MESSAGE")]
    fn test_record_change_rejects_message() {
        TransactionCounters::default().record_change(ChangeOp::Message);
    }

    #[test]
    fn test_summary_with_truncate() {
        let mut c = TransactionCounters::default();
        c.record_change(ChangeOp::Insert);
        c.record_truncate(2);

        assert_eq!(
            c.summary(742, Lsn(0x0000_0000_016B_3748), true).to_string(),
            "xid 742: lsn:0/016B3748 inserts:1 deletes:0 updates:0 truncates:1 relations truncated:2"
        );
    }

    #[test]
    fn test_summary_without_truncate() {
        let c = TransactionCounters::default();
        assert_eq!(
            c.summary(7, Lsn(0xA_0000_00FF), false).to_string(),
            "xid 7: lsn:A/000000FF inserts:0 deletes:0 updates:0"
        );
    }
}
