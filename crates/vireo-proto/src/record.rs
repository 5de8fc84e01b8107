//! Resource records and RRsets.

use crate::class::{Class, RecordClass};
use crate::error::{Error, Result};
use crate::name::{Name, NameParser};
use crate::rdata::RData;
use crate::registry::Registry;
use crate::rtype::{RecordType, Type};
use crate::scan::Scanner;
use crate::wire::{MessageWriter, WireReader};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One resource record: owner, type, class, TTL, and typed data.
///
/// Records are immutable once built; TTL adjustment returns a copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRecord {
    name: Name,
    rtype: Type,
    rclass: Class,
    ttl: u32,
    rdata: RData,
}

impl ResourceRecord {
    /// Creates a record. The type is taken from the data.
    pub fn new(name: Name, rclass: Class, ttl: u32, rdata: RData) -> Self {
        Self {
            name,
            rtype: rdata.rtype(),
            rclass,
            ttl,
            rdata,
        }
    }

    /// Creates a record with an explicit type code.
    ///
    /// Needed when the stored data does not pin the code down, e.g. SPF
    /// sharing the TXT codec or an overlay codec producing opaque data.
    pub fn with_rtype(name: Name, rtype: Type, rclass: Class, ttl: u32, rdata: RData) -> Self {
        Self {
            name,
            rtype,
            rclass,
            ttl,
            rdata,
        }
    }

    /// Shorthand for an IN A record.
    pub fn a(name: Name, ttl: u32, address: std::net::Ipv4Addr) -> Self {
        Self::new(
            name,
            Class::Known(RecordClass::In),
            ttl,
            RData::A(crate::rdata::A::new(address)),
        )
    }

    /// Shorthand for an IN AAAA record.
    pub fn aaaa(name: Name, ttl: u32, address: std::net::Ipv6Addr) -> Self {
        Self::new(
            name,
            Class::Known(RecordClass::In),
            ttl,
            RData::Aaaa(crate::rdata::Aaaa::new(address)),
        )
    }

    /// Shorthand for an IN CNAME record.
    pub fn cname(name: Name, ttl: u32, target: Name) -> Self {
        Self::new(
            name,
            Class::Known(RecordClass::In),
            ttl,
            RData::Cname(crate::rdata::Cname::new(target)),
        )
    }

    /// The owner name.
    #[inline]
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The type code.
    #[inline]
    pub fn rtype(&self) -> Type {
        self.rtype
    }

    /// The class code.
    #[inline]
    pub fn rclass(&self) -> Class {
        self.rclass
    }

    /// The TTL in seconds.
    #[inline]
    pub const fn ttl(&self) -> u32 {
        self.ttl
    }

    /// The record data.
    #[inline]
    pub fn rdata(&self) -> &RData {
        &self.rdata
    }

    /// A copy with a different TTL.
    #[must_use]
    pub fn with_ttl(&self, ttl: u32) -> Self {
        Self {
            ttl,
            ..self.clone()
        }
    }

    /// True for CNAME and DNAME records.
    #[inline]
    pub fn is_redirect(&self) -> bool {
        self.rdata.is_redirect()
    }

    /// Parses the record at `offset`, returning it and the octets used.
    ///
    /// RDATA codecs come from the global [`Registry`].
    pub fn parse(message: &[u8], offset: usize) -> Result<(Self, usize)> {
        let (name, name_len) = NameParser::new(message).parse_name(offset)?;
        let mut r = WireReader::new_at(message, offset + name_len);
        let rtype = Type::from_code(r.read_u16()?);
        let rclass = Class::from_code(r.read_u16()?);
        let ttl = r.read_u32()?;
        let rdlen = r.read_u16()?;

        let rdata = Registry::global().parse_rdata(rtype, message, r.position(), rdlen)?;

        Ok((
            Self {
                name,
                rtype,
                rclass,
                ttl,
                rdata,
            },
            name_len + 10 + rdlen as usize,
        ))
    }

    /// Parses one record from its presentation line:
    /// `owner ttl class type rdata...`, names relative to `origin`.
    pub fn from_text(line: &str, origin: Option<&Name>) -> Result<Self> {
        let mut s = Scanner::new(line, origin);
        let name = s.name()?;
        let ttl = s.ttl()?;
        let class_token = s.take()?;
        let rclass = match RecordClass::from_mnemonic(class_token.text) {
            Some(c) => Class::Known(c),
            None => return Err(Error::presentation(format!("bad class {:?}", class_token.text))),
        };
        let rtype = s.rtype()?;
        let rdata = RData::parse_text(rtype, &mut s)?;
        s.expect_end()?;
        Ok(Self {
            name,
            rtype,
            rclass,
            ttl,
            rdata,
        })
    }

    /// Emits the record, compressing the owner name and, for pre-RFC 3597
    /// types, the names inside the RDATA. RDLENGTH is patched afterwards.
    pub fn emit(&self, w: &mut MessageWriter) -> Result<()> {
        w.write_name(&self.name, true);
        w.write_u16(self.rtype.code());
        w.write_u16(self.rclass.code());
        w.write_u32(self.ttl);

        let rdlen_at = w.reserve_u16();
        let compress = self
            .rtype
            .known()
            .is_some_and(RecordType::compresses_rdata_names);
        self.rdata.emit(w, compress)?;
        let rdlen = Error::check_u16("RDLENGTH", (w.len() - rdlen_at - 2) as u32)?;
        w.patch_u16(rdlen_at, rdlen);
        Ok(())
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.name, self.ttl, self.rclass, self.rtype, self.rdata
        )
    }
}

/// Records sharing (owner, type, class), with their covering signatures.
///
/// The TTL of the set is the minimum member TTL. Order is not semantic;
/// [`RRset::records_rotated`] serves reads that spread load across
/// members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RRset {
    records: Vec<ResourceRecord>,
    sigs: Vec<ResourceRecord>,
}

impl RRset {
    /// Starts a set from its first record.
    pub fn new(first: ResourceRecord) -> Self {
        Self {
            records: vec![first],
            sigs: Vec::new(),
        }
    }

    /// Builds a set, failing when keys diverge.
    pub fn from_records(records: Vec<ResourceRecord>) -> Option<Self> {
        let (first, rest) = records.split_first()?;
        let mut set = Self::new(first.clone());
        for record in rest {
            if !set.add(record.clone()) {
                return None;
            }
        }
        Some(set)
    }

    /// The shared owner name.
    pub fn name(&self) -> &Name {
        self.records[0].name()
    }

    /// The shared type.
    pub fn rtype(&self) -> Type {
        self.records[0].rtype()
    }

    /// The shared class.
    pub fn rclass(&self) -> Class {
        self.records[0].rclass()
    }

    /// The minimum TTL across members.
    pub fn ttl(&self) -> u32 {
        self.records
            .iter()
            .map(ResourceRecord::ttl)
            .min()
            .unwrap_or(0)
    }

    /// The member records.
    pub fn records(&self) -> &[ResourceRecord] {
        &self.records
    }

    /// The covering RRSIG/SIG records.
    pub fn sigs(&self) -> &[ResourceRecord] {
        &self.sigs
    }

    /// The number of member records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false: a set owns at least one record.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Adds a record; false when its key does not match the set.
    pub fn add(&mut self, record: ResourceRecord) -> bool {
        if record.name() != self.name()
            || record.rtype() != self.rtype()
            || record.rclass() != self.rclass()
        {
            return false;
        }
        self.records.push(record);
        true
    }

    /// Attaches a signature covering this set.
    pub fn add_sig(&mut self, sig: ResourceRecord) {
        self.sigs.push(sig);
    }

    /// The members starting at `offset` and wrapping around.
    pub fn records_rotated(&self, offset: usize) -> Vec<ResourceRecord> {
        let len = self.records.len();
        let start = offset % len;
        let mut out = Vec::with_capacity(len);
        out.extend_from_slice(&self.records[start..]);
        out.extend_from_slice(&self.records[..start]);
        out
    }
}

/// Iterates one wire section's records.
#[derive(Debug)]
pub struct RecordParser<'a> {
    message: &'a [u8],
    offset: usize,
    remaining: u16,
}

impl<'a> RecordParser<'a> {
    /// Creates a parser for `count` records starting at `offset`.
    pub const fn new(message: &'a [u8], offset: usize, count: u16) -> Self {
        Self {
            message,
            offset,
            remaining: count,
        }
    }

    /// The offset just past the last parsed record.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Parses the next record, or `None` once the count is exhausted.
    pub fn next(&mut self) -> Result<Option<ResourceRecord>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        let (record, consumed) = ResourceRecord::parse(self.message, self.offset)?;
        self.offset += consumed;
        self.remaining -= 1;
        Ok(Some(record))
    }
}
