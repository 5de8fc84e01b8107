//! Record class codes.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An assigned record class.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(u16)]
pub enum RecordClass {
    /// Internet.
    In = 1,
    /// Chaos.
    Ch = 3,
    /// Hesiod.
    Hs = 4,
    /// NONE, used by dynamic update.
    None = 254,
    /// ANY (QCLASS *).
    Any = 255,
}

impl RecordClass {
    /// Returns the numeric code.
    #[inline]
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Looks up a code, returning `None` for unassigned values.
    #[inline]
    pub fn from_code(code: u16) -> Option<Self> {
        Self::try_from(code).ok()
    }

    /// Returns the registered mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Ch => "CH",
            Self::Hs => "HS",
            Self::None => "NONE",
            Self::Any => "ANY",
        }
    }

    /// Looks up a class mnemonic, including the `CLASSnnn` form.
    pub fn from_mnemonic(text: &str) -> Option<Self> {
        match text {
            "IN" => Some(Self::In),
            "CH" => Some(Self::Ch),
            "HS" => Some(Self::Hs),
            "NONE" => Some(Self::None),
            "ANY" => Some(Self::Any),
            _ => text
                .strip_prefix("CLASS")
                .and_then(|digits| digits.parse().ok())
                .and_then(Self::from_code),
        }
    }
}

impl fmt::Display for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A class code that may or may not be assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Class {
    /// An assigned class.
    Known(RecordClass),
    /// An unassigned code, kept verbatim.
    Unknown(u16),
}

impl Class {
    /// Wraps a raw code.
    #[inline]
    pub fn from_code(code: u16) -> Self {
        RecordClass::from_code(code)
            .map(Self::Known)
            .unwrap_or(Self::Unknown(code))
    }

    /// Returns the numeric code.
    #[inline]
    pub const fn code(self) -> u16 {
        match self {
            Self::Known(c) => c.code(),
            Self::Unknown(code) => code,
        }
    }

    /// Returns the assigned class, if any.
    #[inline]
    pub const fn known(self) -> Option<RecordClass> {
        match self {
            Self::Known(c) => Some(c),
            Self::Unknown(_) => None,
        }
    }
}

impl From<RecordClass> for Class {
    fn from(c: RecordClass) -> Self {
        Self::Known(c)
    }
}

impl From<u16> for Class {
    fn from(code: u16) -> Self {
        Self::from_code(code)
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(c) => c.fmt(f),
            Self::Unknown(code) => write!(f, "CLASS{code}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_mnemonics() {
        assert_eq!(RecordClass::In.code(), 1);
        assert_eq!(RecordClass::In.to_string(), "IN");
        assert_eq!(Class::from_code(3).to_string(), "CH");
        assert_eq!(Class::from_code(2).to_string(), "CLASS2");
    }
}
