//! Mail-routing and other preference/name compound types.
//!
//! MX, KX, RT, and AFSDB share one wire shape: a 16-bit preference
//! followed by a name. MINFO and RP are a pair of names; PX carries a
//! preference and two names. Of these only MX and MINFO predate RFC 3597
//! and may compress.

use crate::error::Result;
use crate::name::{Name, NameParser};
use crate::scan::Scanner;
use crate::wire::MessageWriter;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! preference_name_rdata {
    ($(#[$doc:meta])* $ty:ident, $field:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $ty {
            preference: u16,
            $field: Name,
        }

        impl $ty {
            /// Creates the record body.
            #[inline]
            pub fn new(preference: u16, $field: Name) -> Self {
                Self { preference, $field }
            }

            /// The preference; lower sorts first.
            #[inline]
            pub const fn preference(&self) -> u16 {
                self.preference
            }

            /// The embedded name.
            #[inline]
            pub fn $field(&self) -> &Name {
                &self.$field
            }

            pub(super) fn parse(message: &[u8], offset: usize) -> Result<Self> {
                let mut r = crate::wire::WireReader::new_at(message, offset);
                let preference = r.read_u16()?;
                let $field = NameParser::new(message).parse(r.position())?;
                Ok(Self { preference, $field })
            }

            pub(super) fn parse_text(s: &mut Scanner<'_>) -> Result<Self> {
                let preference = s.u16("preference")?;
                Ok(Self::new(preference, s.name()?))
            }

            pub(super) fn emit(&self, w: &mut MessageWriter, compress: bool) {
                w.write_u16(self.preference);
                w.write_name(&self.$field, compress);
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} {}", self.preference, self.$field)
            }
        }
    };
}

macro_rules! name_pair_rdata {
    ($(#[$doc:meta])* $ty:ident, $first:ident, $second:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $ty {
            $first: Name,
            $second: Name,
        }

        impl $ty {
            /// Creates the record body.
            #[inline]
            pub fn new($first: Name, $second: Name) -> Self {
                Self { $first, $second }
            }

            /// The first embedded name.
            #[inline]
            pub fn $first(&self) -> &Name {
                &self.$first
            }

            /// The second embedded name.
            #[inline]
            pub fn $second(&self) -> &Name {
                &self.$second
            }

            pub(super) fn parse(message: &[u8], offset: usize) -> Result<Self> {
                let parser = NameParser::new(message);
                let ($first, consumed) = parser.parse_name(offset)?;
                let $second = parser.parse(offset + consumed)?;
                Ok(Self { $first, $second })
            }

            pub(super) fn parse_text(s: &mut Scanner<'_>) -> Result<Self> {
                Ok(Self::new(s.name()?, s.name()?))
            }

            pub(super) fn emit(&self, w: &mut MessageWriter, compress: bool) {
                w.write_name(&self.$first, compress);
                w.write_name(&self.$second, compress);
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} {}", self.$first, self.$second)
            }
        }
    };
}

preference_name_rdata! {
    /// MX — a mail exchange, RFC 1035.
    Mx, exchange
}

preference_name_rdata! {
    /// KX — a key exchange host, RFC 2230.
    Kx, exchanger
}

preference_name_rdata! {
    /// RT — a route-through host, RFC 1183.
    Rt, intermediate
}

preference_name_rdata! {
    /// AFSDB — an AFS database server; the preference field is the
    /// subtype, RFC 1183.
    Afsdb, host
}

name_pair_rdata! {
    /// MINFO — responsible and error mailboxes for a list, RFC 1035.
    Minfo, rmailbx, emailbx
}

name_pair_rdata! {
    /// RP — responsible person: mailbox plus a TXT pointer, RFC 1183.
    Rp, mailbox, txt_domain
}

/// PX — X.400 mapping information, RFC 2163.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Px {
    preference: u16,
    map822: Name,
    mapx400: Name,
}

impl Px {
    /// Creates the record body.
    #[inline]
    pub fn new(preference: u16, map822: Name, mapx400: Name) -> Self {
        Self {
            preference,
            map822,
            mapx400,
        }
    }

    /// The preference; lower sorts first.
    #[inline]
    pub const fn preference(&self) -> u16 {
        self.preference
    }

    /// The RFC 822 side of the mapping.
    #[inline]
    pub fn map822(&self) -> &Name {
        &self.map822
    }

    /// The X.400 side of the mapping.
    #[inline]
    pub fn mapx400(&self) -> &Name {
        &self.mapx400
    }

    pub(super) fn parse(message: &[u8], offset: usize) -> Result<Self> {
        let mut r = crate::wire::WireReader::new_at(message, offset);
        let preference = r.read_u16()?;
        let parser = NameParser::new(message);
        let (map822, consumed) = parser.parse_name(r.position())?;
        let mapx400 = parser.parse(r.position() + consumed)?;
        Ok(Self {
            preference,
            map822,
            mapx400,
        })
    }

    pub(super) fn parse_text(s: &mut Scanner<'_>) -> Result<Self> {
        let preference = s.u16("preference")?;
        Ok(Self::new(preference, s.name()?, s.name()?))
    }

    pub(super) fn emit(&self, w: &mut MessageWriter) {
        w.write_u16(self.preference);
        w.write_name(&self.map822, false);
        w.write_name(&self.mapx400, false);
    }
}

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.preference, self.map822, self.mapx400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn mx_wire_round_trip() {
        let mx = Mx::new(10, Name::from_str("mail.example.com.").unwrap());
        let mut w = MessageWriter::default();
        mx.emit(&mut w, true);
        let bytes = w.freeze();
        assert_eq!(Mx::parse(&bytes, 0).unwrap(), mx);
    }

    #[test]
    fn mx_text_round_trip() {
        let mx = Mx::new(20, Name::from_str("backup.example.com.").unwrap());
        let text = mx.to_string();
        assert_eq!(text, "20 backup.example.com.");
        assert_eq!(Mx::parse_text(&mut Scanner::new(&text, None)).unwrap(), mx);
    }

    #[test]
    fn rp_round_trip() {
        let rp = Rp::new(
            Name::from_str("admin.example.com.").unwrap(),
            Name::from_str("contact.example.com.").unwrap(),
        );
        let mut w = MessageWriter::default();
        rp.emit(&mut w, false);
        let bytes = w.freeze();
        assert_eq!(Rp::parse(&bytes, 0).unwrap(), rp);
        assert_eq!(
            Rp::parse_text(&mut Scanner::new(&rp.to_string(), None)).unwrap(),
            rp
        );
    }

    #[test]
    fn px_round_trip() {
        let px = Px::new(
            5,
            Name::from_str("mail.example.com.").unwrap(),
            Name::from_str("x400.example.com.").unwrap(),
        );
        let mut w = MessageWriter::default();
        px.emit(&mut w);
        let bytes = w.freeze();
        assert_eq!(Px::parse(&bytes, 0).unwrap(), px);
    }
}
