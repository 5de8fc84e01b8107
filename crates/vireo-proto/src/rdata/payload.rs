//! Certificate and opaque-key payload types: CERT, OPENPGPKEY, DHCID.

use crate::error::Result;
use crate::scan::Scanner;
use crate::wire::{MessageWriter, WireReader};
use data_encoding::BASE64;
use serde::{Deserialize, Serialize};
use std::fmt;

/// CERT — a certificate or CRL, RFC 4398.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cert {
    cert_type: u16,
    key_tag: u16,
    algorithm: u8,
    certificate: Vec<u8>,
}

impl Cert {
    /// Well-known certificate type: PKIX.
    pub const PKIX: u16 = 1;
    /// Well-known certificate type: OpenPGP packet.
    pub const PGP: u16 = 3;
    /// Well-known certificate type: URI pointing at a certificate.
    pub const URI: u16 = 253;

    /// Creates a CERT body.
    pub fn new(cert_type: u16, key_tag: u16, algorithm: u8, certificate: Vec<u8>) -> Self {
        Self {
            cert_type,
            key_tag,
            algorithm,
            certificate,
        }
    }

    /// The certificate type code.
    #[inline]
    pub const fn cert_type(&self) -> u16 {
        self.cert_type
    }

    /// The key tag of the covering key.
    #[inline]
    pub const fn key_tag(&self) -> u16 {
        self.key_tag
    }

    /// The algorithm number.
    #[inline]
    pub const fn algorithm(&self) -> u8 {
        self.algorithm
    }

    /// The certificate payload.
    #[inline]
    pub fn certificate(&self) -> &[u8] {
        &self.certificate
    }

    pub(super) fn parse(rdata: &[u8]) -> Result<Self> {
        let mut r = WireReader::new(rdata);
        Ok(Self {
            cert_type: r.read_u16()?,
            key_tag: r.read_u16()?,
            algorithm: r.read_u8()?,
            certificate: r.read_rest().to_vec(),
        })
    }

    pub(super) fn parse_text(s: &mut Scanner<'_>) -> Result<Self> {
        Ok(Self {
            cert_type: s.u16("type")?,
            key_tag: s.u16("key tag")?,
            algorithm: s.u8("algorithm")?,
            certificate: s.base64_rest()?,
        })
    }

    pub(super) fn emit(&self, w: &mut MessageWriter) {
        w.write_u16(self.cert_type);
        w.write_u16(self.key_tag);
        w.write_u8(self.algorithm);
        w.write_bytes(&self.certificate);
    }
}

impl fmt::Display for Cert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.cert_type,
            self.key_tag,
            self.algorithm,
            BASE64.encode(&self.certificate)
        )
    }
}

macro_rules! opaque_base64_rdata {
    ($(#[$doc:meta])* $ty:ident, $rtype:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $ty {
            data: Vec<u8>,
        }

        impl $ty {
            /// Creates the record body.
            pub fn new(data: Vec<u8>) -> Self {
                Self { data }
            }

            /// The raw payload.
            #[inline]
            pub fn data(&self) -> &[u8] {
                &self.data
            }

            pub(super) fn parse(rdata: &[u8]) -> Result<Self> {
                if rdata.is_empty() {
                    return Err(crate::error::Error::RdataLength {
                        rtype: $rtype,
                        expected: 1,
                        actual: 0,
                    });
                }
                Ok(Self::new(rdata.to_vec()))
            }

            pub(super) fn parse_text(s: &mut Scanner<'_>) -> Result<Self> {
                Ok(Self::new(s.base64_rest()?))
            }

            pub(super) fn emit(&self, w: &mut MessageWriter) {
                w.write_bytes(&self.data);
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&BASE64.encode(&self.data))
            }
        }
    };
}

opaque_base64_rdata! {
    /// OPENPGPKEY — a transferable OpenPGP public key, RFC 7929.
    Openpgpkey, "OPENPGPKEY"
}

opaque_base64_rdata! {
    /// DHCID — a DHCP client identifier digest, RFC 4701.
    Dhcid, "DHCID"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cert_wire_round_trip() {
        let cert = Cert::new(Cert::PKIX, 12345, 8, vec![1, 2, 3, 4, 5]);
        let mut w = MessageWriter::default();
        cert.emit(&mut w);
        assert_eq!(Cert::parse(w.as_bytes()).unwrap(), cert);
    }

    #[test]
    fn cert_text_round_trip() {
        let cert = Cert::new(Cert::PGP, 0, 0, b"keydata".to_vec());
        let text = cert.to_string();
        assert_eq!(
            Cert::parse_text(&mut Scanner::new(&text, None)).unwrap(),
            cert
        );
    }

    #[test]
    fn dhcid_round_trip() {
        let dhcid = Dhcid::new(vec![0, 1, 2, 3]);
        let text = dhcid.to_string();
        assert_eq!(
            Dhcid::parse_text(&mut Scanner::new(&text, None)).unwrap(),
            dhcid
        );
        assert!(Dhcid::parse(&[]).is_err());
    }
}
