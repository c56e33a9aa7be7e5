//! Commit positions (log sequence numbers)

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 64-bit write-ahead log position.
///
/// Displays as `HI/LO` where `HI` is the upper 32 bits in hexadecimal and
/// `LO` the lower 32 bits as zero-padded 8-digit hexadecimal, e.g. `1/00000040`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lsn(pub u64);

impl Lsn {
    /// Create an LSN from its raw value
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Upper 32 bits
    pub const fn high(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Lower 32 bits
    pub const fn low(self) -> u32 {
        self.0 as u32
    }

    /// Raw value
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for Lsn {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Lsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}/{:08X}", self.high(), self.low())
    }
}

/// Error returned when an LSN string is not of the form `X/X`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLsnError(String);

impl fmt::Display for ParseLsnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid LSN \"{}\"", self.0)
    }
}

impl std::error::Error for ParseLsnError {}

impl FromStr for Lsn {
    type Err = ParseLsnError;

    /// Parses the PostgreSQL text form; the low half need not be padded.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseLsnError(s.to_string());
        let (hi, lo) = s.split_once('/').ok_or_else(err)?;
        if !is_hex_half(hi) || !is_hex_half(lo) {
            return Err(err());
        }
        let hi = u32::from_str_radix(hi, 16).map_err(|_| err())?;
        let lo = u32::from_str_radix(lo, 16).map_err(|_| err())?;
        Ok(Self((u64::from(hi) << 32) | u64::from(lo)))
    }
}

/// 1 to 8 hex digits, nothing else (no sign, no whitespace).
fn is_hex_half(half: &str) -> bool {
    !half.is_empty() && half.len() <= 8 && half.bytes().all(|b| b.is_ascii_hexdigit())
}

impl Serialize for Lsn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Lsn {
    /// Accepts either the raw integer or the `X/X` text form.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Raw(u64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Raw(v) => Ok(Self(v)),
            Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}
