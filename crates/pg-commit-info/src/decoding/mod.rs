//! Decoding session: the callback-driven counter state machine
//!
//! - [`DecodingSession`] - Owns configuration, counters and the output buffer
//! - [`TransactionCounters`] - Per-transaction tallies
//! - [`HostCapabilities`] / [`CallbackSet`] - Version-gated callback registration

mod capabilities;
mod counters;
mod session;

pub use capabilities::*;
pub use counters::*;
pub use session::*;
