//! Opaque RDATA for types the catalog has no codec for.

use crate::error::{Error, Result};
use crate::scan::Scanner;
use crate::wire::MessageWriter;
use data_encoding::HEXLOWER;
use serde::{Deserialize, Serialize};
use std::fmt;

/// RDATA preserved verbatim, presented in the RFC 3597 generic form.
///
/// Besides genuinely unassigned codes, the meta types the lookup core
/// never interprets (TSIG, TKEY, SIG(0) payloads) travel this way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unknown {
    code: u16,
    data: Vec<u8>,
}

impl Unknown {
    /// Wraps raw RDATA under a type code.
    pub fn new(code: u16, data: impl Into<Vec<u8>>) -> Self {
        Self {
            code,
            data: data.into(),
        }
    }

    /// The type code the data belongs to.
    #[inline]
    pub const fn code(&self) -> u16 {
        self.code
    }

    /// The raw octets.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(super) fn parse(code: u16, rdata: &[u8]) -> Self {
        Self::new(code, rdata)
    }

    /// Parses the `\# <length> <hex>` generic form.
    pub(super) fn parse_text(code: u16, s: &mut Scanner<'_>) -> Result<Self> {
        let marker = s.take()?;
        if marker.text != "\\#" {
            return Err(Error::presentation(
                "unknown-type RDATA must use the \\# form",
            ));
        }
        let declared = s.u16("length")? as usize;
        let data = if declared == 0 { Vec::new() } else { s.hex_rest()? };
        if data.len() != declared {
            return Err(Error::presentation(format!(
                "\\# declared {declared} octets but data has {}",
                data.len()
            )));
        }
        Ok(Self::new(code, data))
    }

    pub(super) fn emit(&self, w: &mut MessageWriter) {
        w.write_bytes(&self.data);
    }
}

impl fmt::Display for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\\# {}", self.data.len())?;
        if !self.data.is_empty() {
            write!(f, " {}", HEXLOWER.encode(&self.data))?;
        }
        Ok(())
    }
}
