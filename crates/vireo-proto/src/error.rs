//! Protocol error types.

use thiserror::Error;

/// Result alias for protocol operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while parsing, validating, or emitting DNS data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input ended before the expected data.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof {
        /// Offset at which more data was required.
        offset: usize,
    },

    /// A label exceeded 63 octets.
    #[error("label of {len} octets exceeds the 63 octet limit")]
    LabelTooLong {
        /// Offending label length.
        len: usize,
    },

    /// A name exceeded 255 octets of wire form.
    #[error("name of {len} octets exceeds the 255 octet limit")]
    NameTooLong {
        /// Offending wire length.
        len: usize,
    },

    /// A name that had to stay relative or absolute was not.
    #[error("relative name where an absolute name is required")]
    RelativeName,

    /// A compression pointer pointed at or past its own position.
    #[error("compression pointer at offset {offset} targets {target}")]
    BadPointer {
        /// Offset of the pointer itself.
        offset: usize,
        /// Target the pointer named.
        target: usize,
    },

    /// More compression pointer hops than any valid message can need.
    #[error("compression pointer chain exceeds {max} hops")]
    PointerChain {
        /// The hop bound that was exceeded.
        max: usize,
    },

    /// A label type other than plain or pointer (the reserved 01/10 bits).
    #[error("unsupported label type {value:#04x} at offset {offset}")]
    BadLabelType {
        /// The raw length byte.
        value: u8,
        /// Where it appeared.
        offset: usize,
    },

    /// Presentation text that does not parse as a name or field.
    #[error("bad presentation data: {0}")]
    BadPresentation(String),

    /// A section held fewer or more entries than the header announced.
    #[error("{section} section count mismatch: header said {expected}")]
    SectionCount {
        /// Section name.
        section: &'static str,
        /// Count announced by the header.
        expected: u16,
    },

    /// RDATA did not fit its declared RDLENGTH.
    #[error("RDATA for {rtype} overruns its declared length of {declared}")]
    RdataOverrun {
        /// Record type mnemonic.
        rtype: String,
        /// Declared RDLENGTH.
        declared: u16,
    },

    /// RDATA with a fixed layout had the wrong size.
    #[error("RDATA for {rtype}: expected {expected} octets, got {actual}")]
    RdataLength {
        /// Record type mnemonic.
        rtype: &'static str,
        /// Required length.
        expected: usize,
        /// Observed length.
        actual: usize,
    },

    /// A field value was outside its declared width or range.
    #[error("{field} value {value} out of range (max {max})")]
    FieldRange {
        /// Field name.
        field: &'static str,
        /// Rejected value.
        value: u64,
        /// Inclusive maximum.
        max: u64,
    },

    /// A TTL above 2^31 - 1.
    #[error("TTL {0} exceeds 2^31 - 1")]
    BadTtl(u32),

    /// More than one OPT record in a message.
    #[error("message carries more than one OPT record")]
    DuplicateOpt,

    /// A registry mnemonic was already bound to a different code.
    #[error("mnemonic {mnemonic:?} is already bound to type {bound}")]
    MnemonicTaken {
        /// The contested mnemonic.
        mnemonic: String,
        /// The code it is bound to.
        bound: u16,
    },
}

impl Error {
    /// Shorthand for [`Error::UnexpectedEof`].
    #[inline]
    pub fn eof(offset: usize) -> Self {
        Self::UnexpectedEof { offset }
    }

    /// Shorthand for [`Error::BadPresentation`].
    #[inline]
    pub fn presentation(msg: impl Into<String>) -> Self {
        Self::BadPresentation(msg.into())
    }

    /// Checks a value against a 8-bit field width.
    pub fn check_u8(field: &'static str, value: u32) -> Result<u8> {
        u8::try_from(value).map_err(|_| Self::FieldRange {
            field,
            value: u64::from(value),
            max: u64::from(u8::MAX),
        })
    }

    /// Checks a value against a 16-bit field width.
    pub fn check_u16(field: &'static str, value: u32) -> Result<u16> {
        u16::try_from(value).map_err(|_| Self::FieldRange {
            field,
            value: u64::from(value),
            max: u64::from(u16::MAX),
        })
    }
}
