//! # Replay Host
//!
//! A small stand-in for the decoding engine and the transport. It feeds a
//! [`DecodingSession`] from a sequence of [`DecodingEvent`]s, checks the
//! callback ordering the session relies on, and hands emitted lines to an
//! [`OutputSink`].
//!
//! ## Script Format
//!
//! One JSON object per line, tagged by `type`. Blank lines and lines starting
//! with `#` are skipped.
//!
//! ```text
//! {"type":"begin","xid":100}
//! {"type":"change","xid":100,"relation":16384,"op":"insert"}
//! {"type":"truncate","xid":100,"relations":[16384,16390]}
//! {"type":"commit","xid":100,"lsn":"1/40"}
//! ```
//!
//! `lsn` may also be given as a plain integer.

mod sink;

pub use sink::*;

use crate::common::{ChangeOp, CommitInfoError, Lsn, RelationId, Result, TransactionId};
use crate::decoding::DecodingSession;
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use tracing::{debug, warn};

/// One callback invocation from the decoding host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DecodingEvent {
    /// Transaction start
    Begin { xid: TransactionId },
    /// Row-level change
    Change {
        xid: TransactionId,
        relation: RelationId,
        op: ChangeOp,
    },
    /// Truncate of one or more relations
    Truncate {
        xid: TransactionId,
        relations: Vec<RelationId>,
    },
    /// Transaction commit at `lsn`
    Commit { xid: TransactionId, lsn: Lsn },
}

impl DecodingEvent {
    /// Transaction the event belongs to.
    pub fn xid(&self) -> TransactionId {
        match self {
            DecodingEvent::Begin { xid }
            | DecodingEvent::Change { xid, .. }
            | DecodingEvent::Truncate { xid, .. }
            | DecodingEvent::Commit { xid, .. } => *xid,
        }
    }
}

/// Drives a session with ordering checks.
///
/// The session trusts its caller; the driver is that caller. It rejects
/// events the real host would never send instead of letting them reach the
/// session.
#[derive(Debug)]
pub struct ReplayDriver {
    session: DecodingSession,
    open_xid: Option<TransactionId>,
}

impl ReplayDriver {
    /// Wrap a freshly initialized session; no window is open yet.
    pub fn new(session: DecodingSession) -> Self {
        Self {
            session,
            open_xid: None,
        }
    }

    /// The driven session.
    pub fn session(&self) -> &DecodingSession {
        &self.session
    }

    /// Xid of the open transaction window, if any.
    pub fn open_transaction(&self) -> Option<TransactionId> {
        self.open_xid
    }

    /// Apply one event, delivering any emitted line to `sink`.
    pub fn apply<S: OutputSink + ?Sized>(
        &mut self,
        event: &DecodingEvent,
        sink: &mut S,
    ) -> Result<()> {
        match event {
            DecodingEvent::Begin { xid } => {
                if let Some(open) = self.open_xid {
                    return Err(reject(format!(
                        "begin of xid {} while xid {} is still open",
                        xid, open
                    )));
                }
                self.session.begin_transaction(*xid);
                self.open_xid = Some(*xid);
            }
            DecodingEvent::Change { xid, relation, op } => {
                self.check_open(*xid, "change")?;
                if !op.is_row_change() {
                    return Err(reject(format!(
                        "change of kind {} for xid {} is not a row change",
                        op, xid
                    )));
                }
                self.session.record_change(*xid, *relation, *op);
            }
            DecodingEvent::Truncate { xid, relations } => {
                self.check_open(*xid, "truncate")?;
                if !self.session.config().capabilities.truncate {
                    return Err(reject(format!(
                        "truncate for xid {} but the host has no truncate support",
                        xid
                    )));
                }
                self.session.record_truncate(*xid, relations);
            }
            DecodingEvent::Commit { xid, lsn } => {
                self.check_open(*xid, "commit")?;
                self.open_xid = None;
                if let Some(line) = self.session.commit_transaction(*xid, *lsn) {
                    sink.write_line(line)?;
                }
            }
        }
        Ok(())
    }

    /// End the stream and finalize the session.
    ///
    /// Fails if a transaction window is still open; the session is dropped
    /// either way.
    pub fn finish(self) -> Result<()> {
        if let Some(xid) = self.open_xid {
            return Err(reject(format!(
                "stream ended inside the window of xid {}",
                xid
            )));
        }
        self.session.finalize();
        Ok(())
    }

    fn check_open(&self, xid: TransactionId, what: &str) -> Result<()> {
        match self.open_xid {
            Some(open) if open == xid => Ok(()),
            Some(open) => Err(reject(format!(
                "{} for xid {} inside the window of xid {}",
                what, xid, open
            ))),
            None => Err(reject(format!(
                "{} for xid {} outside a transaction window",
                what, xid
            ))),
        }
    }
}

fn reject(msg: String) -> CommitInfoError {
    warn!(reason = %msg, "Rejected decoding event");
    CommitInfoError::invalid_state(msg)
}

/// Replay a JSON-lines script through `driver`.
///
/// Returns the number of events applied. Malformed lines are reported with
/// their 1-based line number; ordering errors are returned as they are.
pub fn replay_script<R, S>(reader: R, driver: &mut ReplayDriver, sink: &mut S) -> Result<u64>
where
    R: BufRead,
    S: OutputSink + ?Sized,
{
    let mut applied = 0u64;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let event: DecodingEvent = serde_json::from_str(trimmed)
            .map_err(|e| CommitInfoError::script(idx + 1, e.to_string()))?;
        driver.apply(&event, sink)?;
        applied += 1;
    }

    sink.flush()?;
    debug!(events = applied, "Replay finished");
    Ok(applied)
}
