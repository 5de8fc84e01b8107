//! DNSSEC record types.
//!
//! SIG (RFC 2535) and RRSIG (RFC 4034) share one layout and one struct.
//! DS/CDS and DNSKEY/CDNSKEY pair up the same way, as do TLSA/SMIMEA.
//! Validation cryptography lives elsewhere; these are codecs only.

use crate::error::{Error, Result};
use crate::name::{Name, NameParser};
use crate::rtype::Type;
use crate::scan::Scanner;
use crate::wire::{MessageWriter, WireReader};
use data_encoding::{BASE32HEX_NOPAD, BASE64, HEXLOWER, HEXUPPER};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The shared SIG/RRSIG body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sig {
    covered: Type,
    algorithm: u8,
    labels: u8,
    original_ttl: u32,
    expiration: u32,
    inception: u32,
    key_tag: u16,
    signer: Name,
    signature: Vec<u8>,
}

impl Sig {
    /// Creates a signature body. `expiration` and `inception` are POSIX
    /// seconds truncated to 32 bits, as on the wire.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        covered: Type,
        algorithm: u8,
        labels: u8,
        original_ttl: u32,
        expiration: u32,
        inception: u32,
        key_tag: u16,
        signer: Name,
        signature: Vec<u8>,
    ) -> Self {
        Self {
            covered,
            algorithm,
            labels,
            original_ttl,
            expiration,
            inception,
            key_tag,
            signer,
            signature,
        }
    }

    /// The type this signature covers.
    #[inline]
    pub const fn covered(&self) -> Type {
        self.covered
    }

    /// The signing algorithm number.
    #[inline]
    pub const fn algorithm(&self) -> u8 {
        self.algorithm
    }

    /// The owner label count, wildcards excluded.
    #[inline]
    pub const fn labels(&self) -> u8 {
        self.labels
    }

    /// The TTL the covered RRset had when signed.
    #[inline]
    pub const fn original_ttl(&self) -> u32 {
        self.original_ttl
    }

    /// Signature expiry, POSIX seconds mod 2^32.
    #[inline]
    pub const fn expiration(&self) -> u32 {
        self.expiration
    }

    /// Signature inception, POSIX seconds mod 2^32.
    #[inline]
    pub const fn inception(&self) -> u32 {
        self.inception
    }

    /// The key tag of the signing key.
    #[inline]
    pub const fn key_tag(&self) -> u16 {
        self.key_tag
    }

    /// The signer name.
    #[inline]
    pub fn signer(&self) -> &Name {
        &self.signer
    }

    /// The signature octets.
    #[inline]
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    pub(super) fn parse(message: &[u8], offset: usize, rdlen: u16) -> Result<Self> {
        let end = offset + rdlen as usize;
        let mut r = WireReader::new_at(message, offset);
        r.restrict(rdlen as usize)?;

        let covered = Type::from_code(r.read_u16()?);
        let algorithm = r.read_u8()?;
        let labels = r.read_u8()?;
        let original_ttl = r.read_u32()?;
        let expiration = r.read_u32()?;
        let inception = r.read_u32()?;
        let key_tag = r.read_u16()?;
        let (signer, consumed) = NameParser::new(message).parse_name(r.position())?;
        let sig_start = r.position() + consumed;
        if sig_start > end {
            return Err(Error::eof(sig_start));
        }
        Ok(Self {
            covered,
            algorithm,
            labels,
            original_ttl,
            expiration,
            inception,
            key_tag,
            signer,
            signature: message[sig_start..end].to_vec(),
        })
    }

    pub(super) fn parse_text(s: &mut Scanner<'_>) -> Result<Self> {
        Ok(Self {
            covered: s.rtype()?,
            algorithm: s.u8("algorithm")?,
            labels: s.u8("labels")?,
            original_ttl: s.ttl()?,
            expiration: parse_time(s)?,
            inception: parse_time(s)?,
            key_tag: s.u16("key tag")?,
            signer: s.name()?,
            signature: s.base64_rest()?,
        })
    }

    pub(super) fn emit(&self, w: &mut MessageWriter) {
        w.write_u16(self.covered.code());
        w.write_u8(self.algorithm);
        w.write_u8(self.labels);
        w.write_u32(self.original_ttl);
        w.write_u32(self.expiration);
        w.write_u32(self.inception);
        w.write_u16(self.key_tag);
        w.write_name(&self.signer, false);
        w.write_bytes(&self.signature);
    }
}

impl fmt::Display for Sig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {} {} {}",
            self.covered,
            self.algorithm,
            self.labels,
            self.original_ttl,
            format_time(self.expiration),
            format_time(self.inception),
            self.key_tag,
            self.signer,
            BASE64.encode(&self.signature)
        )
    }
}

/// Renders a 32-bit POSIX timestamp as `YYYYMMDDHHmmSS` (RFC 4034 §3.2).
fn format_time(posix: u32) -> String {
    let days = posix / 86_400;
    let secs = posix % 86_400;
    let (year, month, day) = civil_from_days(days as i64);
    format!(
        "{year:04}{month:02}{day:02}{:02}{:02}{:02}",
        secs / 3600,
        secs % 3600 / 60,
        secs % 60
    )
}

/// Accepts `YYYYMMDDHHmmSS` or plain seconds.
fn parse_time(s: &mut Scanner<'_>) -> Result<u32> {
    let token = s.take()?;
    let text = token.text;
    if text.len() == 14 && text.bytes().all(|b| b.is_ascii_digit()) {
        let field = |range: std::ops::Range<usize>| -> u32 {
            text[range].parse().unwrap_or(0)
        };
        let year = field(0..4) as i64;
        let month = field(4..6);
        let day = field(6..8);
        let (hour, minute, second) = (field(8..10), field(10..12), field(12..14));
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) || hour > 23 || minute > 59
            || second > 59
        {
            return Err(Error::presentation(format!("bad timestamp {text:?}")));
        }
        let days = days_from_civil(year, month, day);
        let posix = days * 86_400 + i64::from(hour) * 3600 + i64::from(minute) * 60
            + i64::from(second);
        u32::try_from(posix).map_err(|_| Error::presentation(format!("timestamp {text:?} out of range")))
    } else {
        text.parse()
            .map_err(|_| Error::presentation(format!("bad timestamp {text:?}")))
    }
}

/// Days since the POSIX epoch for a civil date (proleptic Gregorian).
fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let yoe = year.rem_euclid(400);
    let mp = i64::from((month + 9) % 12);
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Civil date for days since the POSIX epoch.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let days = days + 719_468;
    let era = days.div_euclid(146_097);
    let doe = days.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let year = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = ((mp + 2) % 12 + 1) as u32;
    (if month <= 2 { year + 1 } else { year }, month, day)
}

/// The shared DNSKEY/CDNSKEY body, RFC 4034 / RFC 7344.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dnskey {
    flags: u16,
    protocol: u8,
    algorithm: u8,
    key: Vec<u8>,
}

impl Dnskey {
    /// Flag bit marking a zone key.
    pub const FLAG_ZONE: u16 = 0x0100;
    /// Flag bit marking a secure entry point (KSK).
    pub const FLAG_SEP: u16 = 0x0001;

    /// Creates a key body.
    pub fn new(flags: u16, protocol: u8, algorithm: u8, key: Vec<u8>) -> Self {
        Self {
            flags,
            protocol,
            algorithm,
            key,
        }
    }

    /// The flags word.
    #[inline]
    pub const fn flags(&self) -> u16 {
        self.flags
    }

    /// The protocol octet; always 3 for DNSSEC.
    #[inline]
    pub const fn protocol(&self) -> u8 {
        self.protocol
    }

    /// The algorithm number.
    #[inline]
    pub const fn algorithm(&self) -> u8 {
        self.algorithm
    }

    /// The public key octets.
    #[inline]
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// True when the zone-key flag is set.
    #[inline]
    pub const fn is_zone_key(&self) -> bool {
        self.flags & Self::FLAG_ZONE != 0
    }

    /// True when the secure-entry-point flag is set.
    #[inline]
    pub const fn is_sep(&self) -> bool {
        self.flags & Self::FLAG_SEP != 0
    }

    /// The RFC 4034 appendix B key tag over the RDATA.
    pub fn key_tag(&self) -> u16 {
        let mut w = MessageWriter::default();
        self.emit(&mut w);
        let rdata = w.as_bytes();

        let mut acc: u32 = 0;
        for (i, &byte) in rdata.iter().enumerate() {
            if i % 2 == 0 {
                acc += u32::from(byte) << 8;
            } else {
                acc += u32::from(byte);
            }
        }
        acc += acc >> 16;
        (acc & 0xFFFF) as u16
    }

    pub(super) fn parse(rdata: &[u8]) -> Result<Self> {
        let mut r = WireReader::new(rdata);
        Ok(Self {
            flags: r.read_u16()?,
            protocol: r.read_u8()?,
            algorithm: r.read_u8()?,
            key: r.read_rest().to_vec(),
        })
    }

    pub(super) fn parse_text(s: &mut Scanner<'_>) -> Result<Self> {
        Ok(Self {
            flags: s.u16("flags")?,
            protocol: s.u8("protocol")?,
            algorithm: s.u8("algorithm")?,
            key: s.base64_rest()?,
        })
    }

    pub(super) fn emit(&self, w: &mut MessageWriter) {
        w.write_u16(self.flags);
        w.write_u8(self.protocol);
        w.write_u8(self.algorithm);
        w.write_bytes(&self.key);
    }
}

impl fmt::Display for Dnskey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.flags,
            self.protocol,
            self.algorithm,
            BASE64.encode(&self.key)
        )
    }
}

/// The shared DS/CDS body, RFC 4034 / RFC 7344.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ds {
    key_tag: u16,
    algorithm: u8,
    digest_type: u8,
    digest: Vec<u8>,
}

impl Ds {
    /// Creates a delegation signer body.
    pub fn new(key_tag: u16, algorithm: u8, digest_type: u8, digest: Vec<u8>) -> Self {
        Self {
            key_tag,
            algorithm,
            digest_type,
            digest,
        }
    }

    /// The tag of the referenced key.
    #[inline]
    pub const fn key_tag(&self) -> u16 {
        self.key_tag
    }

    /// The algorithm of the referenced key.
    #[inline]
    pub const fn algorithm(&self) -> u8 {
        self.algorithm
    }

    /// The digest algorithm.
    #[inline]
    pub const fn digest_type(&self) -> u8 {
        self.digest_type
    }

    /// The digest octets.
    #[inline]
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    pub(super) fn parse(rdata: &[u8]) -> Result<Self> {
        let mut r = WireReader::new(rdata);
        Ok(Self {
            key_tag: r.read_u16()?,
            algorithm: r.read_u8()?,
            digest_type: r.read_u8()?,
            digest: r.read_rest().to_vec(),
        })
    }

    pub(super) fn parse_text(s: &mut Scanner<'_>) -> Result<Self> {
        Ok(Self {
            key_tag: s.u16("key tag")?,
            algorithm: s.u8("algorithm")?,
            digest_type: s.u8("digest type")?,
            digest: s.hex_rest()?,
        })
    }

    pub(super) fn emit(&self, w: &mut MessageWriter) {
        w.write_u16(self.key_tag);
        w.write_u8(self.algorithm);
        w.write_u8(self.digest_type);
        w.write_bytes(&self.digest);
    }
}

impl fmt::Display for Ds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.key_tag,
            self.algorithm,
            self.digest_type,
            HEXUPPER.encode(&self.digest)
        )
    }
}

/// A windowed type bitmap, as used by NSEC and NSEC3.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TypeBitmap {
    types: Vec<u16>,
}

impl TypeBitmap {
    /// Builds a bitmap from type codes; duplicates collapse, order is
    /// normalised ascending.
    pub fn new(mut types: Vec<u16>) -> Self {
        types.sort_unstable();
        types.dedup();
        Self { types }
    }

    /// The contained type codes, ascending.
    #[inline]
    pub fn types(&self) -> &[u16] {
        &self.types
    }

    /// True when `code` is present.
    pub fn contains(&self, code: u16) -> bool {
        self.types.binary_search(&code).is_ok()
    }

    fn parse(r: &mut WireReader<'_>) -> Result<Self> {
        let mut types = Vec::new();
        while !r.is_empty() {
            let window = r.read_u8()?;
            let len = r.read_u8()? as usize;
            if len == 0 || len > 32 {
                return Err(Error::presentation(format!(
                    "type bitmap window length {len}"
                )));
            }
            let bits = r.read_bytes(len)?;
            for (i, &byte) in bits.iter().enumerate() {
                for bit in 0..8 {
                    if byte & (0x80 >> bit) != 0 {
                        types.push(u16::from(window) << 8 | (i as u16) << 3 | bit as u16);
                    }
                }
            }
        }
        Ok(Self { types })
    }

    fn emit(&self, w: &mut MessageWriter) {
        let mut idx = 0;
        while idx < self.types.len() {
            let window = (self.types[idx] >> 8) as u8;
            let mut bits = [0u8; 32];
            let mut max_octet = 0;
            while idx < self.types.len() && (self.types[idx] >> 8) as u8 == window {
                let low = (self.types[idx] & 0xFF) as usize;
                bits[low >> 3] |= 0x80 >> (low & 7);
                max_octet = low >> 3;
                idx += 1;
            }
            w.write_u8(window);
            w.write_u8(max_octet as u8 + 1);
            w.write_bytes(&bits[..=max_octet]);
        }
    }

    fn fmt_types(&self, f: &mut fmt::Formatter<'_>, lead_space: bool) -> fmt::Result {
        for (i, &code) in self.types.iter().enumerate() {
            if i > 0 || lead_space {
                f.write_str(" ")?;
            }
            write!(f, "{}", Type::from_code(code))?;
        }
        Ok(())
    }

    fn parse_text(s: &mut Scanner<'_>) -> Result<Self> {
        let mut types = Vec::new();
        while !s.at_end()? {
            types.push(s.rtype()?.code());
        }
        Ok(Self::new(types))
    }
}

/// NSEC — authenticated denial of existence, RFC 4034.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nsec {
    next: Name,
    types: TypeBitmap,
}

impl Nsec {
    /// Creates an NSEC body.
    pub fn new(next: Name, types: TypeBitmap) -> Self {
        Self { next, types }
    }

    /// The next owner name in canonical zone order.
    #[inline]
    pub fn next(&self) -> &Name {
        &self.next
    }

    /// The types present at the owner.
    #[inline]
    pub fn types(&self) -> &TypeBitmap {
        &self.types
    }

    pub(super) fn parse(message: &[u8], offset: usize, rdlen: u16) -> Result<Self> {
        let (next, consumed) = NameParser::new(message).parse_name(offset)?;
        let mut r = WireReader::new_at(message, offset + consumed);
        r.restrict(
            (rdlen as usize)
                .checked_sub(consumed)
                .ok_or(Error::eof(offset + consumed))?,
        )?;
        Ok(Self {
            next,
            types: TypeBitmap::parse(&mut r)?,
        })
    }

    pub(super) fn parse_text(s: &mut Scanner<'_>) -> Result<Self> {
        Ok(Self {
            next: s.name()?,
            types: TypeBitmap::parse_text(s)?,
        })
    }

    pub(super) fn emit(&self, w: &mut MessageWriter) {
        w.write_name(&self.next, false);
        self.types.emit(w);
    }
}

impl fmt::Display for Nsec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.next)?;
        self.types.fmt_types(f, true)
    }
}

/// NSEC3 — hashed denial of existence, RFC 5155.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nsec3 {
    hash_algorithm: u8,
    flags: u8,
    iterations: u16,
    salt: Vec<u8>,
    next_hashed: Vec<u8>,
    types: TypeBitmap,
}

impl Nsec3 {
    /// Creates an NSEC3 body.
    pub fn new(
        hash_algorithm: u8,
        flags: u8,
        iterations: u16,
        salt: Vec<u8>,
        next_hashed: Vec<u8>,
        types: TypeBitmap,
    ) -> Self {
        Self {
            hash_algorithm,
            flags,
            iterations,
            salt,
            next_hashed,
            types,
        }
    }

    /// The hash algorithm; 1 is SHA-1.
    #[inline]
    pub const fn hash_algorithm(&self) -> u8 {
        self.hash_algorithm
    }

    /// The flags octet; bit 0 is opt-out.
    #[inline]
    pub const fn flags(&self) -> u8 {
        self.flags
    }

    /// The iteration count.
    #[inline]
    pub const fn iterations(&self) -> u16 {
        self.iterations
    }

    /// The salt octets.
    #[inline]
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// The hashed next owner.
    #[inline]
    pub fn next_hashed(&self) -> &[u8] {
        &self.next_hashed
    }

    /// The types present at the owner.
    #[inline]
    pub fn types(&self) -> &TypeBitmap {
        &self.types
    }

    pub(super) fn parse(rdata: &[u8]) -> Result<Self> {
        let mut r = WireReader::new(rdata);
        let hash_algorithm = r.read_u8()?;
        let flags = r.read_u8()?;
        let iterations = r.read_u16()?;
        let salt = r.read_counted_string()?.to_vec();
        let hash_len = r.read_u8()? as usize;
        let next_hashed = r.read_bytes(hash_len)?.to_vec();
        Ok(Self {
            hash_algorithm,
            flags,
            iterations,
            salt,
            next_hashed,
            types: TypeBitmap::parse(&mut r)?,
        })
    }

    pub(super) fn parse_text(s: &mut Scanner<'_>) -> Result<Self> {
        let hash_algorithm = s.u8("hash algorithm")?;
        let flags = s.u8("flags")?;
        let iterations = s.u16("iterations")?;
        let salt_token = s.take()?;
        let salt = if salt_token.text == "-" {
            Vec::new()
        } else {
            HEXLOWER
                .decode(salt_token.text.to_ascii_lowercase().as_bytes())
                .map_err(|e| Error::presentation(format!("bad salt: {e}")))?
        };
        let next_hashed = s.base32hex()?;
        Ok(Self {
            hash_algorithm,
            flags,
            iterations,
            salt,
            next_hashed,
            types: TypeBitmap::parse_text(s)?,
        })
    }

    pub(super) fn emit(&self, w: &mut MessageWriter) {
        w.write_u8(self.hash_algorithm);
        w.write_u8(self.flags);
        w.write_u16(self.iterations);
        w.write_u8(self.salt.len() as u8);
        w.write_bytes(&self.salt);
        w.write_u8(self.next_hashed.len() as u8);
        w.write_bytes(&self.next_hashed);
        self.types.emit(w);
    }

    fn fmt_salt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.salt.is_empty() {
            f.write_str("-")
        } else {
            f.write_str(&HEXLOWER.encode(&self.salt))
        }
    }
}

impl fmt::Display for Nsec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} ", self.hash_algorithm, self.flags, self.iterations)?;
        self.fmt_salt(f)?;
        write!(
            f,
            " {}",
            BASE32HEX_NOPAD.encode(&self.next_hashed).to_lowercase()
        )?;
        self.types.fmt_types(f, true)
    }
}

/// NSEC3PARAM — the NSEC3 parameters of a zone, RFC 5155.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nsec3param {
    hash_algorithm: u8,
    flags: u8,
    iterations: u16,
    salt: Vec<u8>,
}

impl Nsec3param {
    /// Creates an NSEC3PARAM body.
    pub fn new(hash_algorithm: u8, flags: u8, iterations: u16, salt: Vec<u8>) -> Self {
        Self {
            hash_algorithm,
            flags,
            iterations,
            salt,
        }
    }

    /// The hash algorithm.
    #[inline]
    pub const fn hash_algorithm(&self) -> u8 {
        self.hash_algorithm
    }

    /// The flags octet.
    #[inline]
    pub const fn flags(&self) -> u8 {
        self.flags
    }

    /// The iteration count.
    #[inline]
    pub const fn iterations(&self) -> u16 {
        self.iterations
    }

    /// The salt octets.
    #[inline]
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub(super) fn parse(rdata: &[u8]) -> Result<Self> {
        let mut r = WireReader::new(rdata);
        let hash_algorithm = r.read_u8()?;
        let flags = r.read_u8()?;
        let iterations = r.read_u16()?;
        let salt = r.read_counted_string()?.to_vec();
        Ok(Self {
            hash_algorithm,
            flags,
            iterations,
            salt,
        })
    }

    pub(super) fn parse_text(s: &mut Scanner<'_>) -> Result<Self> {
        let hash_algorithm = s.u8("hash algorithm")?;
        let flags = s.u8("flags")?;
        let iterations = s.u16("iterations")?;
        let salt_token = s.take()?;
        let salt = if salt_token.text == "-" {
            Vec::new()
        } else {
            HEXLOWER
                .decode(salt_token.text.to_ascii_lowercase().as_bytes())
                .map_err(|e| Error::presentation(format!("bad salt: {e}")))?
        };
        Ok(Self {
            hash_algorithm,
            flags,
            iterations,
            salt,
        })
    }

    pub(super) fn emit(&self, w: &mut MessageWriter) {
        w.write_u8(self.hash_algorithm);
        w.write_u8(self.flags);
        w.write_u16(self.iterations);
        w.write_u8(self.salt.len() as u8);
        w.write_bytes(&self.salt);
    }
}

impl fmt::Display for Nsec3param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} ", self.hash_algorithm, self.flags, self.iterations)?;
        if self.salt.is_empty() {
            f.write_str("-")
        } else {
            f.write_str(&HEXLOWER.encode(&self.salt))
        }
    }
}

/// SSHFP — an SSH host key fingerprint, RFC 4255.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sshfp {
    algorithm: u8,
    fingerprint_type: u8,
    fingerprint: Vec<u8>,
}

impl Sshfp {
    /// Creates an SSHFP body.
    pub fn new(algorithm: u8, fingerprint_type: u8, fingerprint: Vec<u8>) -> Self {
        Self {
            algorithm,
            fingerprint_type,
            fingerprint,
        }
    }

    /// The host key algorithm.
    #[inline]
    pub const fn algorithm(&self) -> u8 {
        self.algorithm
    }

    /// The fingerprint digest type.
    #[inline]
    pub const fn fingerprint_type(&self) -> u8 {
        self.fingerprint_type
    }

    /// The fingerprint octets.
    #[inline]
    pub fn fingerprint(&self) -> &[u8] {
        &self.fingerprint
    }

    pub(super) fn parse(rdata: &[u8]) -> Result<Self> {
        let mut r = WireReader::new(rdata);
        Ok(Self {
            algorithm: r.read_u8()?,
            fingerprint_type: r.read_u8()?,
            fingerprint: r.read_rest().to_vec(),
        })
    }

    pub(super) fn parse_text(s: &mut Scanner<'_>) -> Result<Self> {
        Ok(Self {
            algorithm: s.u8("algorithm")?,
            fingerprint_type: s.u8("fingerprint type")?,
            fingerprint: s.hex_rest()?,
        })
    }

    pub(super) fn emit(&self, w: &mut MessageWriter) {
        w.write_u8(self.algorithm);
        w.write_u8(self.fingerprint_type);
        w.write_bytes(&self.fingerprint);
    }
}

impl fmt::Display for Sshfp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.algorithm,
            self.fingerprint_type,
            HEXLOWER.encode(&self.fingerprint)
        )
    }
}

/// The shared TLSA/SMIMEA body, RFC 6698 / RFC 8162.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tlsa {
    usage: u8,
    selector: u8,
    matching_type: u8,
    data: Vec<u8>,
}

impl Tlsa {
    /// Creates a certificate association body.
    pub fn new(usage: u8, selector: u8, matching_type: u8, data: Vec<u8>) -> Self {
        Self {
            usage,
            selector,
            matching_type,
            data,
        }
    }

    /// The certificate usage.
    #[inline]
    pub const fn usage(&self) -> u8 {
        self.usage
    }

    /// The selector.
    #[inline]
    pub const fn selector(&self) -> u8 {
        self.selector
    }

    /// The matching type.
    #[inline]
    pub const fn matching_type(&self) -> u8 {
        self.matching_type
    }

    /// The association data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(super) fn parse(rdata: &[u8]) -> Result<Self> {
        let mut r = WireReader::new(rdata);
        Ok(Self {
            usage: r.read_u8()?,
            selector: r.read_u8()?,
            matching_type: r.read_u8()?,
            data: r.read_rest().to_vec(),
        })
    }

    pub(super) fn parse_text(s: &mut Scanner<'_>) -> Result<Self> {
        Ok(Self {
            usage: s.u8("usage")?,
            selector: s.u8("selector")?,
            matching_type: s.u8("matching type")?,
            data: s.hex_rest()?,
        })
    }

    pub(super) fn emit(&self, w: &mut MessageWriter) {
        w.write_u8(self.usage);
        w.write_u8(self.selector);
        w.write_u8(self.matching_type);
        w.write_bytes(&self.data);
    }
}

impl fmt::Display for Tlsa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.usage,
            self.selector,
            self.matching_type,
            HEXLOWER.encode(&self.data)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rtype::RecordType;
    use std::str::FromStr;

    #[test]
    fn sig_wire_round_trip() {
        let sig = Sig::new(
            Type::Known(RecordType::A),
            13,
            2,
            3600,
            1_700_003_600,
            1_700_000_000,
            34567,
            Name::from_str("example.com.").unwrap(),
            vec![1, 2, 3, 4, 5, 6, 7, 8],
        );
        let mut w = MessageWriter::default();
        sig.emit(&mut w);
        let bytes = w.freeze();
        assert_eq!(Sig::parse(&bytes, 0, bytes.len() as u16).unwrap(), sig);
    }

    #[test]
    fn sig_text_round_trip() {
        let sig = Sig::new(
            Type::Known(RecordType::MX),
            8,
            2,
            7200,
            1_893_456_000,
            1_577_836_800,
            1,
            Name::from_str("example.com.").unwrap(),
            b"signaturedata".to_vec(),
        );
        let text = sig.to_string();
        assert_eq!(
            Sig::parse_text(&mut Scanner::new(&text, None)).unwrap(),
            sig
        );
    }

    #[test]
    fn timestamp_format() {
        // 2020-01-01T00:00:00Z
        assert_eq!(format_time(1_577_836_800), "20200101000000");
        // epoch
        assert_eq!(format_time(0), "19700101000000");
        let mut s = Scanner::new("20200101000000", None);
        assert_eq!(parse_time(&mut s).unwrap(), 1_577_836_800);
        let mut s = Scanner::new("1577836800", None);
        assert_eq!(parse_time(&mut s).unwrap(), 1_577_836_800);
    }

    #[test]
    fn dnskey_key_tag_is_stable() {
        let key = Dnskey::new(
            Dnskey::FLAG_ZONE,
            3,
            13,
            vec![0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC],
        );
        assert_eq!(key.key_tag(), key.key_tag());
        assert!(key.is_zone_key());
        assert!(!key.is_sep());
    }

    #[test]
    fn dnskey_round_trip() {
        let key = Dnskey::new(257, 3, 8, b"publickeybytes".to_vec());
        let mut w = MessageWriter::default();
        key.emit(&mut w);
        assert_eq!(Dnskey::parse(w.as_bytes()).unwrap(), key);
        assert_eq!(
            Dnskey::parse_text(&mut Scanner::new(&key.to_string(), None)).unwrap(),
            key
        );
    }

    #[test]
    fn ds_round_trip() {
        let ds = Ds::new(60485, 5, 1, vec![0x2B, 0xB1, 0x83, 0xAF]);
        let mut w = MessageWriter::default();
        ds.emit(&mut w);
        assert_eq!(Ds::parse(w.as_bytes()).unwrap(), ds);
        assert_eq!(
            Ds::parse_text(&mut Scanner::new(&ds.to_string(), None)).unwrap(),
            ds
        );
    }

    #[test]
    fn type_bitmap_round_trip() {
        let bitmap = TypeBitmap::new(vec![
            RecordType::A.code(),
            RecordType::MX.code(),
            RecordType::RRSIG.code(),
            RecordType::NSEC.code(),
            RecordType::DLV.code(),
        ]);
        let mut w = MessageWriter::default();
        bitmap.emit(&mut w);
        let mut r = WireReader::new(w.as_bytes());
        assert_eq!(TypeBitmap::parse(&mut r).unwrap(), bitmap);
        assert!(bitmap.contains(RecordType::A.code()));
        assert!(!bitmap.contains(RecordType::AAAA.code()));
    }

    #[test]
    fn nsec_round_trip() {
        let nsec = Nsec::new(
            Name::from_str("host.example.com.").unwrap(),
            TypeBitmap::new(vec![
                RecordType::A.code(),
                RecordType::RRSIG.code(),
                RecordType::NSEC.code(),
            ]),
        );
        let mut w = MessageWriter::default();
        nsec.emit(&mut w);
        let bytes = w.freeze();
        assert_eq!(Nsec::parse(&bytes, 0, bytes.len() as u16).unwrap(), nsec);
        assert_eq!(
            Nsec::parse_text(&mut Scanner::new(&nsec.to_string(), None)).unwrap(),
            nsec
        );
    }

    #[test]
    fn nsec3_round_trip() {
        let nsec3 = Nsec3::new(
            1,
            1,
            12,
            vec![0xAA, 0xBB],
            vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10],
            TypeBitmap::new(vec![RecordType::A.code(), RecordType::SOA.code()]),
        );
        let mut w = MessageWriter::default();
        nsec3.emit(&mut w);
        assert_eq!(Nsec3::parse(w.as_bytes()).unwrap(), nsec3);
        assert_eq!(
            Nsec3::parse_text(&mut Scanner::new(&nsec3.to_string(), None)).unwrap(),
            nsec3
        );
    }

    #[test]
    fn nsec3param_empty_salt() {
        let param = Nsec3param::new(1, 0, 0, Vec::new());
        assert_eq!(param.to_string(), "1 0 0 -");
        assert_eq!(
            Nsec3param::parse_text(&mut Scanner::new(&param.to_string(), None)).unwrap(),
            param
        );
    }

    #[test]
    fn tlsa_round_trip() {
        let tlsa = Tlsa::new(3, 1, 1, vec![0xDE, 0xAD, 0xBE, 0xEF]);
        let mut w = MessageWriter::default();
        tlsa.emit(&mut w);
        assert_eq!(Tlsa::parse(w.as_bytes()).unwrap(), tlsa);
        assert_eq!(
            Tlsa::parse_text(&mut Scanner::new(&tlsa.to_string(), None)).unwrap(),
            tlsa
        );
    }

    #[test]
    fn sshfp_round_trip() {
        let sshfp = Sshfp::new(4, 2, vec![0x01, 0x02, 0x03]);
        let mut w = MessageWriter::default();
        sshfp.emit(&mut w);
        assert_eq!(Sshfp::parse(w.as_bytes()).unwrap(), sshfp);
    }
}
