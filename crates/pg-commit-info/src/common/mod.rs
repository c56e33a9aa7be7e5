//! # Common Types
//!
//! Building blocks shared by the decoding session and the replay host:
//!
//! - [`CommitInfoError`] - Error taxonomy and [`Result`] alias
//! - [`Lsn`] - Commit position with `HI/LO` display
//! - [`ChangeOp`] - Kind of a decoded change
//! - [`PluginOption`] / [`CommitInfoConfig`] - Option list parsing

mod error;
mod event;
mod lsn;
mod options;

pub use error::*;
pub use event::*;
pub use lsn::*;
pub use options::*;
