//! SOA — start of authority, RFC 1035.

use crate::error::Result;
use crate::name::{Name, NameParser};
use crate::scan::Scanner;
use crate::wire::{MessageWriter, WireReader};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The zone apex record: primary server, contact, and timing parameters.
///
/// The MINIMUM field doubles as the negative-caching TTL bound per
/// RFC 2308, which is what the lookup cache reads it for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Soa {
    mname: Name,
    rname: Name,
    serial: u32,
    refresh: u32,
    retry: u32,
    expire: u32,
    minimum: u32,
}

impl Soa {
    /// Creates the record body.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        mname: Name,
        rname: Name,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    ) -> Self {
        Self {
            mname,
            rname,
            serial,
            refresh,
            retry,
            expire,
            minimum,
        }
    }

    /// The primary name server.
    #[inline]
    pub fn mname(&self) -> &Name {
        &self.mname
    }

    /// The responsible mailbox, first label being the local part.
    #[inline]
    pub fn rname(&self) -> &Name {
        &self.rname
    }

    /// The zone serial.
    #[inline]
    pub const fn serial(&self) -> u32 {
        self.serial
    }

    /// Secondary refresh interval, seconds.
    #[inline]
    pub const fn refresh(&self) -> u32 {
        self.refresh
    }

    /// Secondary retry interval, seconds.
    #[inline]
    pub const fn retry(&self) -> u32 {
        self.retry
    }

    /// Secondary expiry bound, seconds.
    #[inline]
    pub const fn expire(&self) -> u32 {
        self.expire
    }

    /// Minimum TTL, the RFC 2308 negative-cache bound.
    #[inline]
    pub const fn minimum(&self) -> u32 {
        self.minimum
    }

    pub(super) fn parse(message: &[u8], offset: usize) -> Result<Self> {
        let parser = NameParser::new(message);
        let (mname, first) = parser.parse_name(offset)?;
        let (rname, second) = parser.parse_name(offset + first)?;

        let mut r = WireReader::new_at(message, offset + first + second);
        Ok(Self {
            mname,
            rname,
            serial: r.read_u32()?,
            refresh: r.read_u32()?,
            retry: r.read_u32()?,
            expire: r.read_u32()?,
            minimum: r.read_u32()?,
        })
    }

    pub(super) fn parse_text(s: &mut Scanner<'_>) -> Result<Self> {
        Ok(Self {
            mname: s.name()?,
            rname: s.name()?,
            serial: s.u32("serial")?,
            refresh: s.ttl()?,
            retry: s.ttl()?,
            expire: s.ttl()?,
            minimum: s.ttl()?,
        })
    }

    pub(super) fn emit(&self, w: &mut MessageWriter, compress: bool) {
        w.write_name(&self.mname, compress);
        w.write_name(&self.rname, compress);
        w.write_u32(self.serial);
        w.write_u32(self.refresh);
        w.write_u32(self.retry);
        w.write_u32(self.expire);
        w.write_u32(self.minimum);
    }
}

impl fmt::Display for Soa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.mname, self.rname, self.serial, self.refresh, self.retry, self.expire,
            self.minimum
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn sample() -> Soa {
        Soa::new(
            Name::from_str("ns1.example.com.").unwrap(),
            Name::from_str("hostmaster.example.com.").unwrap(),
            2026050100,
            7200,
            900,
            1209600,
            3600,
        )
    }

    #[test]
    fn wire_round_trip() {
        let soa = sample();
        let mut w = MessageWriter::default();
        soa.emit(&mut w, true);
        let bytes = w.freeze();
        assert_eq!(Soa::parse(&bytes, 0).unwrap(), soa);
    }

    #[test]
    fn text_round_trip() {
        let soa = sample();
        let text = soa.to_string();
        assert_eq!(Soa::parse_text(&mut Scanner::new(&text, None)).unwrap(), soa);
    }

    #[test]
    fn truncated_rejected() {
        let mut w = MessageWriter::default();
        sample().emit(&mut w, false);
        let bytes = w.freeze();
        assert!(Soa::parse(&bytes[..bytes.len() - 4], 0).is_err());
    }
}
