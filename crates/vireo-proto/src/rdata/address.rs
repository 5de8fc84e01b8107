//! Address records: A and AAAA.

use crate::error::{Error, Result};
use crate::scan::Scanner;
use crate::wire::MessageWriter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// A — an IPv4 address, RFC 1035.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct A {
    address: Ipv4Addr,
}

impl A {
    /// Creates an A record body.
    #[inline]
    pub const fn new(address: Ipv4Addr) -> Self {
        Self { address }
    }

    /// The address.
    #[inline]
    pub const fn address(&self) -> Ipv4Addr {
        self.address
    }

    pub(super) fn parse(rdata: &[u8]) -> Result<Self> {
        let octets: [u8; 4] = rdata.try_into().map_err(|_| Error::RdataLength {
            rtype: "A",
            expected: 4,
            actual: rdata.len(),
        })?;
        Ok(Self::new(Ipv4Addr::from(octets)))
    }

    pub(super) fn parse_text(s: &mut Scanner<'_>) -> Result<Self> {
        let token = s.take()?;
        let address = token
            .text
            .parse()
            .map_err(|_| Error::presentation(format!("bad IPv4 address {:?}", token.text)))?;
        Ok(Self::new(address))
    }

    pub(super) fn emit(&self, w: &mut MessageWriter) {
        w.write_bytes(&self.address.octets());
    }
}

impl From<Ipv4Addr> for A {
    fn from(address: Ipv4Addr) -> Self {
        Self::new(address)
    }
}

impl fmt::Display for A {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.address.fmt(f)
    }
}

/// AAAA — an IPv6 address, RFC 3596.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Aaaa {
    address: Ipv6Addr,
}

impl Aaaa {
    /// Creates an AAAA record body.
    #[inline]
    pub const fn new(address: Ipv6Addr) -> Self {
        Self { address }
    }

    /// The address.
    #[inline]
    pub const fn address(&self) -> Ipv6Addr {
        self.address
    }

    pub(super) fn parse(rdata: &[u8]) -> Result<Self> {
        let octets: [u8; 16] = rdata.try_into().map_err(|_| Error::RdataLength {
            rtype: "AAAA",
            expected: 16,
            actual: rdata.len(),
        })?;
        Ok(Self::new(Ipv6Addr::from(octets)))
    }

    pub(super) fn parse_text(s: &mut Scanner<'_>) -> Result<Self> {
        let token = s.take()?;
        let address = token
            .text
            .parse()
            .map_err(|_| Error::presentation(format!("bad IPv6 address {:?}", token.text)))?;
        Ok(Self::new(address))
    }

    pub(super) fn emit(&self, w: &mut MessageWriter) {
        w.write_bytes(&self.address.octets());
    }
}

impl From<Ipv6Addr> for Aaaa {
    fn from(address: Ipv6Addr) -> Self {
        Self::new(address)
    }
}

impl fmt::Display for Aaaa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.address.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_wire_round_trip() {
        let a = A::new(Ipv4Addr::new(192, 0, 2, 7));
        let mut w = MessageWriter::default();
        a.emit(&mut w);
        assert_eq!(A::parse(w.as_bytes()).unwrap(), a);
    }

    #[test]
    fn a_rejects_wrong_length() {
        assert!(A::parse(&[1, 2, 3]).is_err());
        assert!(A::parse(&[1, 2, 3, 4, 5]).is_err());
    }

    #[test]
    fn a_text_round_trip() {
        let a = A::new(Ipv4Addr::new(10, 1, 2, 3));
        let text = a.to_string();
        assert_eq!(A::parse_text(&mut Scanner::new(&text, None)).unwrap(), a);
    }

    #[test]
    fn aaaa_wire_round_trip() {
        let aaaa = Aaaa::new(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1));
        let mut w = MessageWriter::default();
        aaaa.emit(&mut w);
        assert_eq!(Aaaa::parse(w.as_bytes()).unwrap(), aaaa);
        assert_eq!(aaaa.to_string(), "2001:db8::1");
    }
}
