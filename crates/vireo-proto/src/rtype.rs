//! Record type codes.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A record type with an assigned code and mnemonic.
///
/// The list follows the IANA registry as carried by the record catalog;
/// codes without a variant travel as [`Type::Unknown`] and print in the
/// RFC 3597 `TYPEnnn` form.
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
#[allow(missing_docs)]
pub enum RecordType {
    A = 1,
    NS = 2,
    MD = 3,
    MF = 4,
    CNAME = 5,
    SOA = 6,
    MB = 7,
    MG = 8,
    MR = 9,
    NULL = 10,
    WKS = 11,
    PTR = 12,
    HINFO = 13,
    MINFO = 14,
    MX = 15,
    TXT = 16,
    RP = 17,
    AFSDB = 18,
    X25 = 19,
    ISDN = 20,
    RT = 21,
    NSAP = 22,
    NsapPtr = 23,
    SIG = 24,
    KEY = 25,
    PX = 26,
    GPOS = 27,
    AAAA = 28,
    LOC = 29,
    NXT = 30,
    EID = 31,
    NIMLOC = 32,
    SRV = 33,
    ATMA = 34,
    NAPTR = 35,
    KX = 36,
    CERT = 37,
    A6 = 38,
    DNAME = 39,
    OPT = 41,
    APL = 42,
    DS = 43,
    SSHFP = 44,
    IPSECKEY = 45,
    RRSIG = 46,
    NSEC = 47,
    DNSKEY = 48,
    DHCID = 49,
    NSEC3 = 50,
    NSEC3PARAM = 51,
    TLSA = 52,
    SMIMEA = 53,
    HIP = 55,
    CDS = 59,
    CDNSKEY = 60,
    OPENPGPKEY = 61,
    CSYNC = 62,
    ZONEMD = 63,
    SVCB = 64,
    HTTPS = 65,
    SPF = 99,
    NID = 104,
    L32 = 105,
    L64 = 106,
    LP = 107,
    EUI48 = 108,
    EUI64 = 109,
    TKEY = 249,
    TSIG = 250,
    IXFR = 251,
    AXFR = 252,
    MAILB = 253,
    MAILA = 254,
    ANY = 255,
    URI = 256,
    CAA = 257,
    TA = 32768,
    DLV = 32769,
}

impl RecordType {
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
            Self::A => "A",
            Self::NS => "NS",
            Self::MD => "MD",
            Self::MF => "MF",
            Self::CNAME => "CNAME",
            Self::SOA => "SOA",
            Self::MB => "MB",
            Self::MG => "MG",
            Self::MR => "MR",
            Self::NULL => "NULL",
            Self::WKS => "WKS",
            Self::PTR => "PTR",
            Self::HINFO => "HINFO",
            Self::MINFO => "MINFO",
            Self::MX => "MX",
            Self::TXT => "TXT",
            Self::RP => "RP",
            Self::AFSDB => "AFSDB",
            Self::X25 => "X25",
            Self::ISDN => "ISDN",
            Self::RT => "RT",
            Self::NSAP => "NSAP",
            Self::NsapPtr => "NSAP-PTR",
            Self::SIG => "SIG",
            Self::KEY => "KEY",
            Self::PX => "PX",
            Self::GPOS => "GPOS",
            Self::AAAA => "AAAA",
            Self::LOC => "LOC",
            Self::NXT => "NXT",
            Self::EID => "EID",
            Self::NIMLOC => "NIMLOC",
            Self::SRV => "SRV",
            Self::ATMA => "ATMA",
            Self::NAPTR => "NAPTR",
            Self::KX => "KX",
            Self::CERT => "CERT",
            Self::A6 => "A6",
            Self::DNAME => "DNAME",
            Self::OPT => "OPT",
            Self::APL => "APL",
            Self::DS => "DS",
            Self::SSHFP => "SSHFP",
            Self::IPSECKEY => "IPSECKEY",
            Self::RRSIG => "RRSIG",
            Self::NSEC => "NSEC",
            Self::DNSKEY => "DNSKEY",
            Self::DHCID => "DHCID",
            Self::NSEC3 => "NSEC3",
            Self::NSEC3PARAM => "NSEC3PARAM",
            Self::TLSA => "TLSA",
            Self::SMIMEA => "SMIMEA",
            Self::HIP => "HIP",
            Self::CDS => "CDS",
            Self::CDNSKEY => "CDNSKEY",
            Self::OPENPGPKEY => "OPENPGPKEY",
            Self::CSYNC => "CSYNC",
            Self::ZONEMD => "ZONEMD",
            Self::SVCB => "SVCB",
            Self::HTTPS => "HTTPS",
            Self::SPF => "SPF",
            Self::NID => "NID",
            Self::L32 => "L32",
            Self::L64 => "L64",
            Self::LP => "LP",
            Self::EUI48 => "EUI48",
            Self::EUI64 => "EUI64",
            Self::TKEY => "TKEY",
            Self::TSIG => "TSIG",
            Self::IXFR => "IXFR",
            Self::AXFR => "AXFR",
            Self::MAILB => "MAILB",
            Self::MAILA => "MAILA",
            Self::ANY => "ANY",
            Self::URI => "URI",
            Self::CAA => "CAA",
            Self::TA => "TA",
            Self::DLV => "DLV",
        }
    }

    /// Looks up a registered mnemonic, case-sensitively.
    pub fn from_mnemonic(text: &str) -> Option<Self> {
        Some(match text {
            "A" => Self::A,
            "NS" => Self::NS,
            "MD" => Self::MD,
            "MF" => Self::MF,
            "CNAME" => Self::CNAME,
            "SOA" => Self::SOA,
            "MB" => Self::MB,
            "MG" => Self::MG,
            "MR" => Self::MR,
            "NULL" => Self::NULL,
            "WKS" => Self::WKS,
            "PTR" => Self::PTR,
            "HINFO" => Self::HINFO,
            "MINFO" => Self::MINFO,
            "MX" => Self::MX,
            "TXT" => Self::TXT,
            "RP" => Self::RP,
            "AFSDB" => Self::AFSDB,
            "X25" => Self::X25,
            "ISDN" => Self::ISDN,
            "RT" => Self::RT,
            "NSAP" => Self::NSAP,
            "NSAP-PTR" => Self::NsapPtr,
            "SIG" => Self::SIG,
            "KEY" => Self::KEY,
            "PX" => Self::PX,
            "GPOS" => Self::GPOS,
            "AAAA" => Self::AAAA,
            "LOC" => Self::LOC,
            "NXT" => Self::NXT,
            "EID" => Self::EID,
            "NIMLOC" => Self::NIMLOC,
            "SRV" => Self::SRV,
            "ATMA" => Self::ATMA,
            "NAPTR" => Self::NAPTR,
            "KX" => Self::KX,
            "CERT" => Self::CERT,
            "A6" => Self::A6,
            "DNAME" => Self::DNAME,
            "OPT" => Self::OPT,
            "APL" => Self::APL,
            "DS" => Self::DS,
            "SSHFP" => Self::SSHFP,
            "IPSECKEY" => Self::IPSECKEY,
            "RRSIG" => Self::RRSIG,
            "NSEC" => Self::NSEC,
            "DNSKEY" => Self::DNSKEY,
            "DHCID" => Self::DHCID,
            "NSEC3" => Self::NSEC3,
            "NSEC3PARAM" => Self::NSEC3PARAM,
            "TLSA" => Self::TLSA,
            "SMIMEA" => Self::SMIMEA,
            "HIP" => Self::HIP,
            "CDS" => Self::CDS,
            "CDNSKEY" => Self::CDNSKEY,
            "OPENPGPKEY" => Self::OPENPGPKEY,
            "CSYNC" => Self::CSYNC,
            "ZONEMD" => Self::ZONEMD,
            "SVCB" => Self::SVCB,
            "HTTPS" => Self::HTTPS,
            "SPF" => Self::SPF,
            "NID" => Self::NID,
            "L32" => Self::L32,
            "L64" => Self::L64,
            "LP" => Self::LP,
            "EUI48" => Self::EUI48,
            "EUI64" => Self::EUI64,
            "TKEY" => Self::TKEY,
            "TSIG" => Self::TSIG,
            "IXFR" => Self::IXFR,
            "AXFR" => Self::AXFR,
            "MAILB" => Self::MAILB,
            "MAILA" => Self::MAILA,
            "ANY" => Self::ANY,
            "URI" => Self::URI,
            "CAA" => Self::CAA,
            "TA" => Self::TA,
            "DLV" => Self::DLV,
            _ => return None,
        })
    }

    /// True for types that only make sense in questions (QTYPEs).
    #[inline]
    pub const fn is_query_only(self) -> bool {
        matches!(
            self,
            Self::IXFR | Self::AXFR | Self::MAILB | Self::MAILA | Self::ANY
        )
    }

    /// True for pseudo-records the message layer owns.
    #[inline]
    pub const fn is_meta(self) -> bool {
        matches!(self, Self::OPT | Self::TSIG | Self::TKEY)
    }

    /// True for the two redirecting types.
    #[inline]
    pub const fn is_redirect(self) -> bool {
        matches!(self, Self::CNAME | Self::DNAME)
    }

    /// True when embedded names in the RDATA may be compressed on emit.
    ///
    /// RFC 3597 freezes compression to the types defined in RFC 1035
    /// itself; everything later writes its names verbatim.
    #[inline]
    pub const fn compresses_rdata_names(self) -> bool {
        matches!(
            self,
            Self::NS
                | Self::MD
                | Self::MF
                | Self::CNAME
                | Self::SOA
                | Self::MB
                | Self::MG
                | Self::MR
                | Self::PTR
                | Self::MINFO
                | Self::MX
                | Self::TXT
        )
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A type code that may or may not be assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Type {
    /// An assigned type.
    Known(RecordType),
    /// An unassigned code, kept verbatim.
    Unknown(u16),
}

impl Type {
    /// Wraps a raw code.
    #[inline]
    pub fn from_code(code: u16) -> Self {
        RecordType::from_code(code)
            .map(Self::Known)
            .unwrap_or(Self::Unknown(code))
    }

    /// Returns the numeric code.
    #[inline]
    pub const fn code(self) -> u16 {
        match self {
            Self::Known(t) => t.code(),
            Self::Unknown(code) => code,
        }
    }

    /// Returns the assigned type, if any.
    #[inline]
    pub const fn known(self) -> Option<RecordType> {
        match self {
            Self::Known(t) => Some(t),
            Self::Unknown(_) => None,
        }
    }
}

impl From<RecordType> for Type {
    fn from(t: RecordType) -> Self {
        Self::Known(t)
    }
}

impl From<u16> for Type {
    fn from(code: u16) -> Self {
        Self::from_code(code)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(t) => t.fmt(f),
            Self::Unknown(code) => write!(f, "TYPE{code}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes() {
        assert_eq!(RecordType::A.code(), 1);
        assert_eq!(RecordType::AAAA.code(), 28);
        assert_eq!(RecordType::HTTPS.code(), 65);
        assert_eq!(RecordType::DLV.code(), 32769);
        assert_eq!(RecordType::from_code(39), Some(RecordType::DNAME));
        assert_eq!(RecordType::from_code(54), None);
    }

    #[test]
    fn unknown_codes_render_rfc3597() {
        assert_eq!(Type::from_code(54).to_string(), "TYPE54");
        assert_eq!(Type::from_code(15).to_string(), "MX");
    }

    #[test]
    fn compression_cutoff() {
        assert!(RecordType::CNAME.compresses_rdata_names());
        assert!(RecordType::SOA.compresses_rdata_names());
        assert!(!RecordType::DNAME.compresses_rdata_names());
        assert!(!RecordType::SRV.compresses_rdata_names());
        assert!(!RecordType::RRSIG.compresses_rdata_names());
    }

    #[test]
    fn predicates() {
        assert!(RecordType::ANY.is_query_only());
        assert!(RecordType::OPT.is_meta());
        assert!(RecordType::CNAME.is_redirect());
        assert!(RecordType::DNAME.is_redirect());
        assert!(!RecordType::A.is_redirect());
    }
}
