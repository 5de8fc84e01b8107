//! The fixed 12-octet message header.

use crate::error::{Error, Result};
use crate::opcode::OpCode;
use crate::rcode::Rcode;
use crate::wire::{MessageWriter, WireReader};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Header size on the wire.
pub const HEADER_LEN: usize = 12;

bitflags! {
    /// The single-bit header flags.
    ///
    /// The opcode and rcode share the same 16-bit word on the wire but are
    /// kept as separate [`Header`] fields.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Flags: u16 {
        /// Response (1) or query (0).
        const QR = 0x8000;
        /// Authoritative answer.
        const AA = 0x0400;
        /// Truncated.
        const TC = 0x0200;
        /// Recursion desired.
        const RD = 0x0100;
        /// Recursion available.
        const RA = 0x0080;
        /// Reserved, must be zero.
        const Z = 0x0040;
        /// Authentic data (DNSSEC).
        const AD = 0x0020;
        /// Checking disabled (DNSSEC).
        const CD = 0x0010;
    }
}

/// A parsed message header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Header {
    /// Transaction identifier.
    pub id: u16,
    /// Single-bit flags.
    pub flags: Flags,
    /// Operation code.
    pub opcode: OpCode,
    /// Response code; values above 15 round-trip through the OPT record.
    pub rcode: Rcode,
    /// Question count.
    pub qdcount: u16,
    /// Answer count.
    pub ancount: u16,
    /// Authority count.
    pub nscount: u16,
    /// Additional count, OPT included.
    pub arcount: u16,
}

impl Header {
    /// A recursion-desired query header with a random transaction ID.
    pub fn new_query() -> Self {
        Self {
            id: rand::random(),
            flags: Flags::RD,
            qdcount: 1,
            ..Self::default()
        }
    }

    /// Returns true for a response header.
    #[inline]
    pub fn is_response(&self) -> bool {
        self.flags.contains(Flags::QR)
    }

    /// Returns true when the AA bit is set.
    #[inline]
    pub fn is_authoritative(&self) -> bool {
        self.flags.contains(Flags::AA)
    }

    /// Returns true when the TC bit is set.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.flags.contains(Flags::TC)
    }

    /// Parses a header from the front of a message.
    pub fn parse(reader: &mut WireReader<'_>) -> Result<Self> {
        let id = reader.read_u16()?;
        let word = reader.read_u16()?;

        let opcode_bits = ((word >> 11) & 0x0F) as u8;
        let opcode = OpCode::from_code(opcode_bits).ok_or(Error::presentation(format!(
            "unassigned opcode {opcode_bits}"
        )))?;
        let rcode = Rcode::from_code(word & 0x0F);
        let flags = Flags::from_bits_truncate(word);

        Ok(Self {
            id,
            flags,
            opcode,
            rcode,
            qdcount: reader.read_u16()?,
            ancount: reader.read_u16()?,
            nscount: reader.read_u16()?,
            arcount: reader.read_u16()?,
        })
    }

    /// Emits the header. Counts are whatever the caller set.
    pub fn emit(&self, writer: &mut MessageWriter) {
        writer.write_u16(self.id);
        let word = self.flags.bits()
            | (u16::from(self.opcode.code()) << 11)
            | u16::from(self.rcode.header_bits());
        writer.write_u16(word);
        writer.write_u16(self.qdcount);
        writer.write_u16(self.ancount);
        writer.write_u16(self.nscount);
        writer.write_u16(self.arcount);
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "opcode: {}, status: {}, id: {}",
            self.opcode, self.rcode, self.id
        )?;
        write!(f, "\n;; flags:")?;
        for (name, flag) in [
            ("qr", Flags::QR),
            ("aa", Flags::AA),
            ("tc", Flags::TC),
            ("rd", Flags::RD),
            ("ra", Flags::RA),
            ("ad", Flags::AD),
            ("cd", Flags::CD),
        ] {
            if self.flags.contains(flag) {
                write!(f, " {name}")?;
            }
        }
        write!(
            f,
            "; QUERY: {}, ANSWER: {}, AUTHORITY: {}, ADDITIONAL: {}",
            self.qdcount, self.ancount, self.nscount, self.arcount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let mut header = Header::new_query();
        header.id = 0x1234;
        header.ancount = 2;

        let mut w = MessageWriter::default();
        header.emit(&mut w);
        assert_eq!(w.len(), HEADER_LEN);

        let bytes = w.freeze();
        let parsed = Header::parse(&mut WireReader::new(&bytes)).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn flag_bits_land_where_rfc_says() {
        let mut header = Header::default();
        header.flags = Flags::QR | Flags::AA | Flags::RD;
        header.opcode = OpCode::Update;

        let mut w = MessageWriter::default();
        header.emit(&mut w);
        let word = u16::from_be_bytes([w.as_bytes()[2], w.as_bytes()[3]]);
        assert_eq!(word & 0x8000, 0x8000); // QR
        assert_eq!(word & 0x0400, 0x0400); // AA
        assert_eq!(word & 0x0100, 0x0100); // RD
        assert_eq!((word >> 11) & 0x0F, 5); // opcode
    }

    #[test]
    fn short_input_rejected() {
        let bytes = [0u8; 11];
        assert!(Header::parse(&mut WireReader::new(&bytes)).is_err());
    }
}
