//! Message opcodes.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The 4-bit operation code of a message header.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
    Default,
)]
#[repr(u8)]
pub enum OpCode {
    /// Standard query.
    #[default]
    Query = 0,
    /// Inverse query, obsoleted by RFC 3425.
    IQuery = 1,
    /// Server status request.
    Status = 2,
    /// Zone change notification, RFC 1996.
    Notify = 4,
    /// Dynamic update, RFC 2136.
    Update = 5,
    /// DNS stateful operations, RFC 8490.
    Dso = 6,
}

impl OpCode {
    /// Returns the numeric code.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Looks up a code, returning `None` for unassigned values.
    #[inline]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::try_from(code).ok()
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Query => "QUERY",
            Self::IQuery => "IQUERY",
            Self::Status => "STATUS",
            Self::Notify => "NOTIFY",
            Self::Update => "UPDATE",
            Self::Dso => "DSO",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes() {
        assert_eq!(OpCode::Query.code(), 0);
        assert_eq!(OpCode::from_code(5), Some(OpCode::Update));
        assert_eq!(OpCode::from_code(3), None);
    }
}
