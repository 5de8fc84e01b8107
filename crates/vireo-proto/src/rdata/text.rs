//! Text and opaque-payload types from RFC 1035: TXT, HINFO, NULL.

use crate::error::{Error, Result};
use crate::scan::{escape_bytes, Scanner};
use crate::wire::{MessageWriter, WireReader};
use serde::{Deserialize, Serialize};
use std::fmt;

/// TXT — a sequence of character-strings, RFC 1035.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Txt {
    strings: Vec<Vec<u8>>,
}

impl Txt {
    /// Creates a TXT body from raw character-strings.
    ///
    /// Each string must fit a one-octet length prefix.
    pub fn new(strings: Vec<Vec<u8>>) -> Result<Self> {
        for s in &strings {
            if s.len() > 255 {
                return Err(Error::FieldRange {
                    field: "character-string",
                    value: s.len() as u64,
                    max: 255,
                });
            }
        }
        Ok(Self { strings })
    }

    /// Creates a single-string TXT body from text.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::new(vec![text.as_bytes().to_vec()])
    }

    /// The character-strings, in wire order.
    #[inline]
    pub fn strings(&self) -> &[Vec<u8>] {
        &self.strings
    }

    pub(super) fn parse(rdata: &[u8]) -> Result<Self> {
        let mut r = WireReader::new(rdata);
        let mut strings = Vec::new();
        while !r.is_empty() {
            strings.push(r.read_counted_string()?.to_vec());
        }
        Ok(Self { strings })
    }

    pub(super) fn parse_text(s: &mut Scanner<'_>) -> Result<Self> {
        let mut strings = Vec::new();
        loop {
            strings.push(s.string_bytes()?);
            if s.at_end()? {
                break;
            }
        }
        Ok(Self { strings })
    }

    pub(super) fn emit(&self, w: &mut MessageWriter) {
        for s in &self.strings {
            // Lengths were validated at construction.
            w.write_u8(s.len() as u8);
            w.write_bytes(s);
        }
    }
}

impl fmt::Display for Txt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        for (i, s) in self.strings.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push('"');
            escape_bytes(s, &mut out);
            out.push('"');
        }
        f.write_str(&out)
    }
}

/// HINFO — host CPU and OS strings, RFC 1035.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hinfo {
    cpu: Vec<u8>,
    os: Vec<u8>,
}

impl Hinfo {
    /// Creates an HINFO body.
    pub fn new(cpu: Vec<u8>, os: Vec<u8>) -> Result<Self> {
        for (field, value) in [("cpu", &cpu), ("os", &os)] {
            if value.len() > 255 {
                return Err(Error::FieldRange {
                    field,
                    value: value.len() as u64,
                    max: 255,
                });
            }
        }
        Ok(Self { cpu, os })
    }

    /// The CPU string.
    #[inline]
    pub fn cpu(&self) -> &[u8] {
        &self.cpu
    }

    /// The OS string.
    #[inline]
    pub fn os(&self) -> &[u8] {
        &self.os
    }

    pub(super) fn parse(rdata: &[u8]) -> Result<Self> {
        let mut r = WireReader::new(rdata);
        let cpu = r.read_counted_string()?.to_vec();
        let os = r.read_counted_string()?.to_vec();
        Ok(Self { cpu, os })
    }

    pub(super) fn parse_text(s: &mut Scanner<'_>) -> Result<Self> {
        let cpu = s.string_bytes()?;
        let os = s.string_bytes()?;
        Self::new(cpu, os)
    }

    pub(super) fn emit(&self, w: &mut MessageWriter) {
        w.write_u8(self.cpu.len() as u8);
        w.write_bytes(&self.cpu);
        w.write_u8(self.os.len() as u8);
        w.write_bytes(&self.os);
    }
}

impl fmt::Display for Hinfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        out.push('"');
        escape_bytes(&self.cpu, &mut out);
        out.push_str("\" \"");
        escape_bytes(&self.os, &mut out);
        out.push('"');
        f.write_str(&out)
    }
}

/// NULL — anything at all, RFC 1035. Not seen in zones; kept for
/// completeness of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Null {
    data: Vec<u8>,
}

impl Null {
    /// Creates a NULL body.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// The raw payload.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(super) fn parse(rdata: &[u8]) -> Result<Self> {
        Ok(Self::new(rdata.to_vec()))
    }

    pub(super) fn parse_text(s: &mut Scanner<'_>) -> Result<Self> {
        // Same generic form as unknown types.
        let marker = s.take()?;
        if marker.text != "\\#" {
            return Err(Error::presentation("NULL data must use the \\# form"));
        }
        let len = s.u16("length")? as usize;
        let data = if len == 0 { Vec::new() } else { s.hex_rest()? };
        if data.len() != len {
            return Err(Error::presentation("\\# length does not match data"));
        }
        Ok(Self::new(data))
    }

    pub(super) fn emit(&self, w: &mut MessageWriter) {
        w.write_bytes(&self.data);
    }
}

impl fmt::Display for Null {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\\# {}", self.data.len())?;
        if !self.data.is_empty() {
            write!(f, " {}", data_encoding::HEXLOWER.encode(&self.data))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn txt_wire_round_trip() {
        let txt = Txt::new(vec![b"v=spf1 -all".to_vec(), b"second".to_vec()]).unwrap();
        let mut w = MessageWriter::default();
        txt.emit(&mut w);
        assert_eq!(Txt::parse(w.as_bytes()).unwrap(), txt);
    }

    #[test]
    fn txt_text_round_trip() {
        let txt = Txt::new(vec![b"hello world".to_vec(), vec![0xFF, 0x00]]).unwrap();
        let text = txt.to_string();
        assert_eq!(
            Txt::parse_text(&mut Scanner::new(&text, None)).unwrap(),
            txt
        );
    }

    #[test]
    fn txt_rejects_long_string() {
        assert!(Txt::new(vec![vec![0u8; 256]]).is_err());
    }

    #[test]
    fn hinfo_round_trip() {
        let hinfo = Hinfo::new(b"AMD64".to_vec(), b"Linux".to_vec()).unwrap();
        let mut w = MessageWriter::default();
        hinfo.emit(&mut w);
        assert_eq!(Hinfo::parse(w.as_bytes()).unwrap(), hinfo);
        assert_eq!(hinfo.to_string(), "\"AMD64\" \"Linux\"");
        assert_eq!(
            Hinfo::parse_text(&mut Scanner::new(&hinfo.to_string(), None)).unwrap(),
            hinfo
        );
    }

    #[test]
    fn null_generic_form() {
        let null = Null::new(vec![0xDE, 0xAD]);
        assert_eq!(null.to_string(), "\\# 2 dead");
        assert_eq!(
            Null::parse_text(&mut Scanner::new(&null.to_string(), None)).unwrap(),
            null
        );
    }
}
