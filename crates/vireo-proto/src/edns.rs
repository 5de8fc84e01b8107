//! EDNS(0), RFC 6891.
//!
//! The OPT pseudo-record abuses the record fields: the class carries the
//! sender's UDP payload size and the TTL packs the extended RCODE bits,
//! the EDNS version, and the DO flag. The message layer lifts all of that
//! into an [`Edns`] value instead of exposing OPT as an ordinary record.

use crate::error::{Error, Result};
use crate::rtype::RecordType;
use crate::wire::{MessageWriter, WireReader};
use crate::DEFAULT_EDNS_PAYLOAD;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One EDNS option TLV.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdnsOption {
    /// The option code.
    pub code: u16,
    /// The option payload.
    pub data: Vec<u8>,
}

/// The EDNS state of a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edns {
    payload_size: u16,
    extended_rcode: u8,
    version: u8,
    dnssec_ok: bool,
    options: Vec<EdnsOption>,
}

impl Edns {
    /// EDNS version 0 with the default payload size.
    pub fn new() -> Self {
        Self {
            payload_size: DEFAULT_EDNS_PAYLOAD,
            extended_rcode: 0,
            version: 0,
            dnssec_ok: false,
            options: Vec::new(),
        }
    }

    /// Like [`Edns::new`] with the DO bit set.
    pub fn with_dnssec_ok() -> Self {
        Self {
            dnssec_ok: true,
            ..Self::new()
        }
    }

    /// The advertised UDP payload size.
    #[inline]
    pub const fn payload_size(&self) -> u16 {
        self.payload_size
    }

    /// Sets the advertised UDP payload size.
    #[inline]
    pub fn set_payload_size(&mut self, size: u16) {
        self.payload_size = size;
    }

    /// The upper eight bits of the response code.
    #[inline]
    pub const fn extended_rcode(&self) -> u8 {
        self.extended_rcode
    }

    /// Sets the upper eight bits of the response code.
    #[inline]
    pub fn set_extended_rcode(&mut self, bits: u8) {
        self.extended_rcode = bits;
    }

    /// The EDNS version; only 0 exists.
    #[inline]
    pub const fn version(&self) -> u8 {
        self.version
    }

    /// The DO (DNSSEC OK) flag.
    #[inline]
    pub const fn dnssec_ok(&self) -> bool {
        self.dnssec_ok
    }

    /// Sets the DO flag.
    #[inline]
    pub fn set_dnssec_ok(&mut self, dnssec_ok: bool) {
        self.dnssec_ok = dnssec_ok;
    }

    /// The options, in wire order.
    #[inline]
    pub fn options(&self) -> &[EdnsOption] {
        &self.options
    }

    /// Appends an option.
    pub fn add_option(&mut self, option: EdnsOption) {
        self.options.push(option);
    }

    /// Reconstructs EDNS state from an OPT record's class, TTL, and RDATA.
    pub fn from_opt(class: u16, ttl: u32, rdata: &[u8]) -> Result<Self> {
        let mut options = Vec::new();
        let mut r = WireReader::new(rdata);
        while !r.is_empty() {
            let code = r.read_u16()?;
            let len = r.read_u16()? as usize;
            let data = r.read_bytes(len)?.to_vec();
            options.push(EdnsOption { code, data });
        }

        Ok(Self {
            payload_size: class,
            extended_rcode: (ttl >> 24) as u8,
            version: (ttl >> 16) as u8,
            dnssec_ok: ttl & 0x8000 != 0,
            options,
        })
    }

    /// Emits the OPT pseudo-record into the additional section.
    pub fn emit(&self, w: &mut MessageWriter) -> Result<()> {
        w.write_u8(0); // root owner
        w.write_u16(RecordType::OPT.code());
        w.write_u16(self.payload_size);
        let ttl = u32::from(self.extended_rcode) << 24
            | u32::from(self.version) << 16
            | if self.dnssec_ok { 0x8000 } else { 0 };
        w.write_u32(ttl);

        let rdlen_at = w.reserve_u16();
        for option in &self.options {
            let len = Error::check_u16("option length", option.data.len() as u32)?;
            w.write_u16(option.code);
            w.write_u16(len);
            w.write_bytes(&option.data);
        }
        let rdlen = Error::check_u16("OPT RDLENGTH", (w.len() - rdlen_at - 2) as u32)?;
        w.patch_u16(rdlen_at, rdlen);
        Ok(())
    }
}

impl Default for Edns {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Edns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "version: {}, flags:{}; udp: {}",
            self.version,
            if self.dnssec_ok { " do" } else { "" },
            self.payload_size
        )
    }
}
