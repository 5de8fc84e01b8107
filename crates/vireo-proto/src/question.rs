//! The question section entry.

use crate::class::{Class, RecordClass};
use crate::error::Result;
use crate::name::{Name, NameParser};
use crate::rtype::{RecordType, Type};
use crate::wire::{MessageWriter, WireReader};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a query asks for: a name, a type, and a class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    /// The queried name.
    pub qname: Name,
    /// The queried type.
    pub qtype: Type,
    /// The queried class.
    pub qclass: Class,
}

impl Question {
    /// Creates a question for an assigned type and class.
    #[inline]
    pub fn new(qname: Name, qtype: RecordType, qclass: RecordClass) -> Self {
        Self {
            qname,
            qtype: Type::Known(qtype),
            qclass: Class::Known(qclass),
        }
    }

    /// Creates a question from raw type and class values.
    #[inline]
    pub fn with_codes(qname: Name, qtype: Type, qclass: Class) -> Self {
        Self {
            qname,
            qtype,
            qclass,
        }
    }

    /// Parses the question at `offset`, returning it and the octets used.
    pub fn parse(message: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (qname, name_len) = NameParser::new(message).parse_name(offset)?;
        let mut r = WireReader::new_at(message, offset + name_len);
        let qtype = Type::from_code(r.read_u16()?);
        let qclass = Class::from_code(r.read_u16()?);
        Ok((
            Self {
                qname,
                qtype,
                qclass,
            },
            name_len + 4,
        ))
    }

    /// Emits the question; the name joins the compression table.
    pub fn emit(&self, w: &mut MessageWriter) {
        w.write_name(&self.qname, true);
        w.write_u16(self.qtype.code());
        w.write_u16(self.qclass.code());
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.qname, self.qclass, self.qtype)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn round_trip() {
        let q = Question::new(
            Name::from_str("example.com.").unwrap(),
            RecordType::AAAA,
            RecordClass::In,
        );
        let mut w = MessageWriter::default();
        q.emit(&mut w);
        let wire = w.freeze();

        let (parsed, consumed) = Question::parse(&wire, 0).unwrap();
        assert_eq!(parsed, q);
        assert_eq!(consumed, wire.len());
    }

    #[test]
    fn name_comparison_is_folded() {
        let a = Question::new(
            Name::from_str("EXAMPLE.com.").unwrap(),
            RecordType::A,
            RecordClass::In,
        );
        let b = Question::new(
            Name::from_str("example.COM.").unwrap(),
            RecordType::A,
            RecordClass::In,
        );
        assert_eq!(a, b);
    }
}
