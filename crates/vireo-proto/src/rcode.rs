//! Response codes, including the EDNS-extended range.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An assigned response code.
///
/// Values above 15 cannot fit the 4-bit header field and require the
/// extended bits carried in an OPT record.
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
#[repr(u16)]
pub enum ResponseCode {
    /// No error.
    #[default]
    NoError = 0,
    /// The query was malformed.
    FormErr = 1,
    /// The server failed internally.
    ServFail = 2,
    /// The name does not exist.
    NxDomain = 3,
    /// The opcode is not implemented.
    NotImp = 4,
    /// The server refused to answer.
    Refused = 5,
    /// A name exists when it should not (dynamic update).
    YxDomain = 6,
    /// An RRset exists when it should not (dynamic update).
    YxRrset = 7,
    /// An RRset that should exist does not.
    NxRrset = 8,
    /// The server is not authoritative / not authorized.
    NotAuth = 9,
    /// A name is outside the zone (dynamic update).
    NotZone = 10,
    /// Bad EDNS version.
    BadVers = 16,
    /// TSIG key not recognised.
    BadKey = 17,
    /// TSIG signature out of its time window.
    BadTime = 18,
    /// Bad TKEY mode.
    BadMode = 19,
    /// Duplicate TKEY name.
    BadName = 20,
    /// Unsupported TKEY algorithm.
    BadAlg = 21,
    /// Bad TSIG truncation.
    BadTrunc = 22,
    /// Bad or missing server cookie.
    BadCookie = 23,
}

impl ResponseCode {
    /// Returns the full numeric code.
    #[inline]
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Looks up a full code, returning `None` for unassigned values.
    #[inline]
    pub fn from_code(code: u16) -> Option<Self> {
        Self::try_from(code).ok()
    }

    /// The low four bits, as carried in the header flags word.
    #[inline]
    pub const fn header_bits(self) -> u8 {
        (self.code() & 0x0F) as u8
    }

    /// The upper eight bits, as carried in an OPT record's TTL field.
    #[inline]
    pub const fn extended_bits(self) -> u8 {
        (self.code() >> 4) as u8
    }

    /// Reassembles a code from the header nibble and the OPT extension.
    #[inline]
    pub fn from_parts(header: u8, extended: u8) -> Rcode {
        Rcode::from_code(u16::from(extended) << 4 | u16::from(header & 0x0F))
    }

    /// True for codes that do not fit the bare header.
    #[inline]
    pub const fn needs_extension(self) -> bool {
        self.code() > 0x0F
    }

    /// Returns the registered mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::NoError => "NOERROR",
            Self::FormErr => "FORMERR",
            Self::ServFail => "SERVFAIL",
            Self::NxDomain => "NXDOMAIN",
            Self::NotImp => "NOTIMP",
            Self::Refused => "REFUSED",
            Self::YxDomain => "YXDOMAIN",
            Self::YxRrset => "YXRRSET",
            Self::NxRrset => "NXRRSET",
            Self::NotAuth => "NOTAUTH",
            Self::NotZone => "NOTZONE",
            Self::BadVers => "BADVERS",
            Self::BadKey => "BADKEY",
            Self::BadTime => "BADTIME",
            Self::BadMode => "BADMODE",
            Self::BadName => "BADNAME",
            Self::BadAlg => "BADALG",
            Self::BadTrunc => "BADTRUNC",
            Self::BadCookie => "BADCOOKIE",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A response code that may or may not be assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rcode {
    /// An assigned code.
    Known(ResponseCode),
    /// An unassigned code, kept verbatim.
    Unknown(u16),
}

impl Rcode {
    /// Wraps a raw code.
    #[inline]
    pub fn from_code(code: u16) -> Self {
        ResponseCode::from_code(code)
            .map(Self::Known)
            .unwrap_or(Self::Unknown(code))
    }

    /// Returns the full numeric code.
    #[inline]
    pub const fn code(self) -> u16 {
        match self {
            Self::Known(r) => r.code(),
            Self::Unknown(code) => code,
        }
    }

    /// Returns the assigned code, if any.
    #[inline]
    pub const fn known(self) -> Option<ResponseCode> {
        match self {
            Self::Known(r) => Some(r),
            Self::Unknown(_) => None,
        }
    }

    /// The low four bits for the header flags word.
    #[inline]
    pub const fn header_bits(self) -> u8 {
        (self.code() & 0x0F) as u8
    }

    /// The upper eight bits for the OPT TTL field.
    #[inline]
    pub const fn extended_bits(self) -> u8 {
        (self.code() >> 4) as u8
    }
}

impl Default for Rcode {
    fn default() -> Self {
        Self::Known(ResponseCode::NoError)
    }
}

impl From<ResponseCode> for Rcode {
    fn from(r: ResponseCode) -> Self {
        Self::Known(r)
    }
}

impl fmt::Display for Rcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(r) => r.fmt(f),
            Self::Unknown(code) => write!(f, "RCODE{code}"),
        }
    }
}
