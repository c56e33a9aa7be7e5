//! Change event kinds reported by the decoding host

use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction identifier as assigned by the source database
pub type TransactionId = u32;

/// Identifier of a relation (table) touched by a change
pub type RelationId = u32;

/// Kind of a decoded change.
///
/// The change callback only accepts `Insert`, `Update` and `Delete`;
/// truncates arrive through their own callback and logical messages are
/// never routed to this plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeOp {
    /// Row inserted
    Insert,
    /// Row updated
    Update,
    /// Row deleted
    Delete,
    /// Table truncated
    Truncate,
    /// Logical decoding message
    Message,
}

impl ChangeOp {
    /// Whether this kind may be passed to the change callback.
    pub fn is_row_change(self) -> bool {
        matches!(self, ChangeOp::Insert | ChangeOp::Update | ChangeOp::Delete)
    }
}

impl fmt::Display for ChangeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeOp::Insert => write!(f, "INSERT"),
            ChangeOp::Update => write!(f, "UPDATE"),
            ChangeOp::Delete => write!(f, "DELETE"),
            ChangeOp::Truncate => write!(f, "TRUNCATE"),
            ChangeOp::Message => write!(f, "MESSAGE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_row_change() {
        assert!(ChangeOp::Insert.is_row_change());
        assert!(ChangeOp::Update.is_row_change());
        assert!(ChangeOp::Delete.is_row_change());
        assert!(!ChangeOp::Truncate.is_row_change());
        assert!(!ChangeOp::Message.is_row_change());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&ChangeOp::Insert).unwrap(), "\"insert\"");
        let op: ChangeOp = serde_json::from_str("\"delete\"").unwrap();
        assert_eq!(op, ChangeOp::Delete);
    }
}
