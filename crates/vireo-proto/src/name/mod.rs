//! Domain names.
//!
//! A [`Name`] is an ordered sequence of labels, each 1..=63 octets, with a
//! total wire form of at most 255 octets including length prefixes and the
//! terminating root label. Names are immutable values.
//!
//! Unlike a server-side name type, a stub resolver must distinguish
//! *relative* names (no terminal root label, eligible for search-path
//! expansion) from *absolute* ones. Presentation input is absolute iff it
//! carries a trailing dot; wire input is always absolute.
//!
//! Comparison folds ASCII A-Z only; other octets compare byte-exact. Hash
//! and equality agree with that folding.

mod label;
mod parse;

pub use label::{Label, LabelIter};
pub use parse::NameParser;

use crate::error::{Error, Result};
use crate::{MAX_LABELS, MAX_LABEL_LEN, MAX_NAME_LEN};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Inline storage for the label portion of a name's wire form.
///
/// The terminating root label is not stored; [`Name::is_absolute`] carries
/// that bit instead, so relative and absolute names share one layout.
type NameBuf = SmallVec<[u8; 32]>;

/// An immutable domain name, relative or absolute.
#[derive(Clone)]
pub struct Name {
    wire: NameBuf,
    labels: u8,
    absolute: bool,
}

impl Name {
    /// The absolute root name, `.`.
    #[inline]
    pub fn root() -> Self {
        Self {
            wire: SmallVec::new(),
            labels: 0,
            absolute: true,
        }
    }

    /// The relative empty name, written `@`.
    #[inline]
    pub fn empty() -> Self {
        Self {
            wire: SmallVec::new(),
            labels: 0,
            absolute: false,
        }
    }

    pub(crate) fn from_parts(wire: NameBuf, labels: u8, absolute: bool) -> Self {
        Self {
            wire,
            labels,
            absolute,
        }
    }

    /// Parses presentation text, resolving a relative result against
    /// `origin` when one is given.
    pub fn from_str_relative(text: &str, origin: Option<&Name>) -> Result<Self> {
        let name = Self::from_str(text)?;
        match origin {
            Some(origin) if !name.is_absolute() => name.concatenate(origin),
            _ => Ok(name),
        }
    }

    /// The stored wire form: length-prefixed labels, no terminating root.
    #[inline]
    pub fn wire_bytes(&self) -> &[u8] {
        &self.wire
    }

    /// The emitted wire length, terminating root label included.
    #[inline]
    pub fn wire_len(&self) -> usize {
        self.wire.len() + 1
    }

    /// The number of labels, counting the root of an absolute name.
    ///
    /// `www.example.com.` has four labels; the relative `host` has one.
    #[inline]
    pub fn label_count(&self) -> usize {
        self.labels as usize + usize::from(self.absolute)
    }

    /// Returns true iff the final label is the zero-length root.
    #[inline]
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// Returns true for the absolute root name.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.absolute && self.labels == 0
    }

    /// Returns true iff the first label is the literal `*`.
    #[inline]
    pub fn is_wildcard(&self) -> bool {
        self.wire.first() == Some(&1) && self.wire.get(1) == Some(&b'*')
    }

    /// Iterates the labels, leftmost first; the root is not yielded.
    #[inline]
    pub fn labels(&self) -> LabelIter<'_> {
        LabelIter::new(&self.wire)
    }

    /// Appends `suffix`, failing if the result would not fit in 255 octets.
    ///
    /// Concatenating onto an absolute name is the identity, so absolutising
    /// a search-path entry twice is harmless.
    pub fn concatenate(&self, suffix: &Name) -> Result<Self> {
        if self.absolute {
            return Ok(self.clone());
        }

        let stored = self.wire.len() + suffix.wire.len();
        if stored + 1 > MAX_NAME_LEN {
            return Err(Error::NameTooLong { len: stored + 1 });
        }
        let labels = self.labels as usize + suffix.labels as usize;
        if labels + 1 > MAX_LABELS {
            return Err(Error::NameTooLong { len: stored + 1 });
        }

        let mut wire = NameBuf::with_capacity(stored);
        wire.extend_from_slice(&self.wire);
        wire.extend_from_slice(&suffix.wire);
        Ok(Self {
            wire,
            labels: labels as u8,
            absolute: suffix.absolute,
        })
    }

    /// Returns true iff `self` ends with exactly the labels of `other`.
    ///
    /// Every name is a subdomain of itself. A relative name is never a
    /// subdomain of an absolute one, or vice versa.
    pub fn is_subdomain_of(&self, other: &Name) -> bool {
        if self.absolute != other.absolute || self.labels < other.labels {
            return false;
        }
        let skip = (self.labels - other.labels) as usize;
        self.labels()
            .skip(skip)
            .zip(other.labels())
            .all(|(a, b)| a.eq_folded(&b))
    }

    /// Rewrites the `old` suffix of this name to `new`.
    ///
    /// This is the DNAME substitution of RFC 6672: the labels of `self`
    /// above `old` are kept and re-rooted under `new`. Returns `Ok(None)`
    /// when `self` is not a subdomain of `old`, and fails when the rewrite
    /// would exceed 255 octets.
    pub fn replace_suffix(&self, old: &Name, new: &Name) -> Result<Option<Self>> {
        if !self.is_subdomain_of(old) {
            return Ok(None);
        }

        let keep = (self.labels - old.labels) as usize;
        let mut split = 0usize;
        for _ in 0..keep {
            split += 1 + self.wire[split] as usize;
        }

        let prefix = Self {
            wire: SmallVec::from_slice(&self.wire[..split]),
            labels: keep as u8,
            absolute: false,
        };
        prefix.concatenate(new).map(Some)
    }

    /// Strips the leftmost label; `None` for the root and the empty name.
    pub fn parent(&self) -> Option<Self> {
        if self.labels == 0 {
            return None;
        }
        let first = 1 + self.wire[0] as usize;
        Some(Self {
            wire: SmallVec::from_slice(&self.wire[first..]),
            labels: self.labels - 1,
            absolute: self.absolute,
        })
    }

    /// Renders the name, lowercasing label content.
    pub fn to_lowercase_string(&self) -> CompactString {
        let mut out = CompactString::const_new("");
        for (i, label) in self.labels().enumerate() {
            if i > 0 {
                out.push('.');
            }
            for c in label.to_string().chars() {
                out.push(c.to_ascii_lowercase());
            }
        }
        if self.absolute {
            out.push('.');
        } else if self.labels == 0 {
            out.push('@');
        }
        out
    }
}

impl FromStr for Name {
    type Err = Error;

    /// Parses dotted presentation text with `\DDD` and `\c` escapes.
    ///
    /// A trailing unescaped dot makes the name absolute; `.` alone is the
    /// root and `@` alone the relative empty name.
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::presentation("empty name"));
        }
        if s == "." {
            return Ok(Self::root());
        }
        if s == "@" {
            return Ok(Self::empty());
        }

        let bytes = s.as_bytes();
        let mut wire = NameBuf::new();
        let mut labels = 0u8;
        let mut current: SmallVec<[u8; 64]> = SmallVec::new();
        let mut absolute = false;
        let mut i = 0;

        let mut flush = |current: &mut SmallVec<[u8; 64]>, wire: &mut NameBuf, labels: &mut u8| {
            if current.len() > MAX_LABEL_LEN {
                return Err(Error::LabelTooLong { len: current.len() });
            }
            if wire.len() + 1 + current.len() + 1 > MAX_NAME_LEN {
                return Err(Error::NameTooLong {
                    len: wire.len() + 1 + current.len() + 1,
                });
            }
            if *labels as usize + 1 >= MAX_LABELS {
                return Err(Error::NameTooLong { len: MAX_NAME_LEN + 1 });
            }
            wire.push(current.len() as u8);
            wire.extend_from_slice(current);
            current.clear();
            *labels += 1;
            Ok(())
        };

        while i < bytes.len() {
            match bytes[i] {
                b'\\' => {
                    let next = *bytes
                        .get(i + 1)
                        .ok_or_else(|| Error::presentation("dangling escape"))?;
                    if next.is_ascii_digit() {
                        if i + 3 >= bytes.len() {
                            return Err(Error::presentation("truncated \\DDD escape"));
                        }
                        let digits = &s[i + 1..i + 4];
                        let value: u16 = digits
                            .parse()
                            .map_err(|_| Error::presentation("malformed \\DDD escape"))?;
                        let value = u8::try_from(value)
                            .map_err(|_| Error::presentation("\\DDD escape above 255"))?;
                        current.push(value);
                        i += 4;
                    } else {
                        current.push(next);
                        i += 2;
                    }
                }
                b'.' => {
                    if current.is_empty() {
                        return Err(Error::presentation("empty label"));
                    }
                    flush(&mut current, &mut wire, &mut labels)?;
                    i += 1;
                    if i == bytes.len() {
                        absolute = true;
                    }
                }
                other => {
                    current.push(other);
                    i += 1;
                }
            }
        }

        if !current.is_empty() {
            flush(&mut current, &mut wire, &mut labels)?;
        }

        Ok(Self {
            wire,
            labels,
            absolute,
        })
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.labels == 0 {
            return f.write_str(if self.absolute { "." } else { "@" });
        }
        for (i, label) in self.labels().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{label}")?;
        }
        if self.absolute {
            f.write_str(".")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({self})")
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        if self.labels != other.labels || self.absolute != other.absolute {
            return false;
        }
        self.labels()
            .zip(other.labels())
            .all(|(a, b)| a.eq_folded(&b))
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.absolute.hash(state);
        for label in self.labels() {
            state.write_u8(label.len() as u8);
            for &byte in label.as_bytes() {
                state.write_u8(byte.to_ascii_lowercase());
            }
        }
    }
}

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Name {
    /// Canonical ordering per RFC 4034 §6.1: rightmost labels first.
    fn cmp(&self, other: &Self) -> Ordering {
        let mine: SmallVec<[Label<'_>; 8]> = self.labels().collect();
        let theirs: SmallVec<[Label<'_>; 8]> = other.labels().collect();

        for (a, b) in mine.iter().rev().zip(theirs.iter().rev()) {
            match a.cmp_canonical(b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        mine.len()
            .cmp(&theirs.len())
            .then(self.absolute.cmp(&other.absolute))
    }
}

impl Serialize for Name {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = CompactString::deserialize(deserializer)?;
        Self::from_str(&text).map_err(serde::de::Error::custom)
    }
}
