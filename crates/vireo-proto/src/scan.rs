//! Presentation-text scanning.
//!
//! A [`Scanner`] splits one record's presentation form into whitespace
//! separated tokens, honouring quoted character-strings and backslash
//! escapes, and offers typed accessors for the field shapes the record
//! catalog needs: fixed-width integers, TTLs, origin-relative names, and
//! base16/base32hex/base64 blobs.
//!
//! The grammar accepted is exactly what the catalog's `Display`
//! implementations emit, which is what the round-trip contract requires.

use crate::error::{Error, Result};
use crate::name::Name;
use crate::rtype::Type;
use data_encoding::{BASE32HEX_NOPAD, BASE64, HEXLOWER_PERMISSIVE};

/// One token of presentation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// The token text, escapes intact, quotes stripped.
    pub text: &'a str,
    /// Whether the token was written inside double quotes.
    pub quoted: bool,
}

/// A tokenizer over one record's presentation text.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    origin: Option<&'a Name>,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner; `origin` anchors relative names.
    pub fn new(input: &'a str, origin: Option<&'a Name>) -> Self {
        Self {
            input,
            pos: 0,
            origin,
        }
    }

    /// Returns the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token<'a>>> {
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        if self.pos >= bytes.len() {
            return Ok(None);
        }

        if bytes[self.pos] == b'"' {
            let start = self.pos + 1;
            let mut i = start;
            while i < bytes.len() {
                match bytes[i] {
                    b'\\' => i += 2,
                    b'"' => {
                        self.pos = i + 1;
                        return Ok(Some(Token {
                            text: &self.input[start..i],
                            quoted: true,
                        }));
                    }
                    _ => i += 1,
                }
            }
            return Err(Error::presentation("unterminated quoted string"));
        }

        let start = self.pos;
        let mut i = start;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
            if bytes[i] == b'\\' {
                i += 2;
            } else {
                i += 1;
            }
        }
        self.pos = i.min(bytes.len());
        Ok(Some(Token {
            text: &self.input[start..self.pos],
            quoted: false,
        }))
    }

    /// Returns the next token, failing at end of input.
    pub fn take(&mut self) -> Result<Token<'a>> {
        self.next_token()?
            .ok_or_else(|| Error::presentation("unexpected end of record text"))
    }

    /// Fails unless the input is exhausted.
    pub fn expect_end(&mut self) -> Result<()> {
        match self.next_token()? {
            None => Ok(()),
            Some(t) => Err(Error::presentation(format!("trailing token {:?}", t.text))),
        }
    }

    fn integer(&mut self, what: &'static str) -> Result<u64> {
        let token = self.take()?;
        token
            .text
            .parse()
            .map_err(|_| Error::presentation(format!("{what}: not a number: {:?}", token.text)))
    }

    /// Reads an 8-bit integer field.
    pub fn u8(&mut self, what: &'static str) -> Result<u8> {
        let value = self.integer(what)?;
        u8::try_from(value).map_err(|_| Error::FieldRange {
            field: what,
            value,
            max: u64::from(u8::MAX),
        })
    }

    /// Reads a 16-bit integer field.
    pub fn u16(&mut self, what: &'static str) -> Result<u16> {
        let value = self.integer(what)?;
        u16::try_from(value).map_err(|_| Error::FieldRange {
            field: what,
            value,
            max: u64::from(u16::MAX),
        })
    }

    /// Reads a 32-bit integer field.
    pub fn u32(&mut self, what: &'static str) -> Result<u32> {
        let value = self.integer(what)?;
        u32::try_from(value).map_err(|_| Error::FieldRange {
            field: what,
            value,
            max: u64::from(u32::MAX),
        })
    }

    /// Reads a TTL, rejecting values above 2^31 - 1.
    pub fn ttl(&mut self) -> Result<u32> {
        let value = self.u32("TTL")?;
        if value > 0x7FFF_FFFF {
            return Err(Error::BadTtl(value));
        }
        Ok(value)
    }

    /// Reads a domain name, resolving relative input against the origin.
    pub fn name(&mut self) -> Result<Name> {
        let token = self.take()?;
        Name::from_str_relative(token.text, self.origin)
    }

    /// Reads a record type by mnemonic or `TYPEnnn` form.
    pub fn rtype(&mut self) -> Result<Type> {
        let token = self.take()?;
        crate::registry::type_from_mnemonic(token.text)
            .ok_or_else(|| Error::presentation(format!("unknown type {:?}", token.text)))
    }

    /// Reads one character-string, unescaping into raw octets.
    pub fn string_bytes(&mut self) -> Result<Vec<u8>> {
        let token = self.take()?;
        let bytes = unescape(token.text)?;
        if bytes.len() > 255 {
            return Err(Error::FieldRange {
                field: "character-string",
                value: bytes.len() as u64,
                max: 255,
            });
        }
        Ok(bytes)
    }

    /// Returns true when no tokens remain.
    pub fn at_end(&mut self) -> Result<bool> {
        let saved = self.pos;
        let end = self.next_token()?.is_none();
        self.pos = saved;
        Ok(end)
    }

    /// Decodes all remaining tokens as one base64 blob.
    pub fn base64_rest(&mut self) -> Result<Vec<u8>> {
        let joined = self.join_rest()?;
        BASE64
            .decode(joined.as_bytes())
            .map_err(|e| Error::presentation(format!("bad base64: {e}")))
    }

    /// Decodes all remaining tokens as one base16 blob.
    pub fn hex_rest(&mut self) -> Result<Vec<u8>> {
        let joined = self.join_rest()?;
        HEXLOWER_PERMISSIVE
            .decode(joined.as_bytes())
            .map_err(|e| Error::presentation(format!("bad base16: {e}")))
    }

    /// Decodes one token as unpadded base32hex (NSEC3 owner hashes).
    pub fn base32hex(&mut self) -> Result<Vec<u8>> {
        let token = self.take()?;
        BASE32HEX_NOPAD
            .decode(token.text.to_ascii_uppercase().as_bytes())
            .map_err(|e| Error::presentation(format!("bad base32hex: {e}")))
    }

    fn join_rest(&mut self) -> Result<String> {
        let mut joined = String::new();
        while let Some(token) = self.next_token()? {
            joined.push_str(token.text);
        }
        if joined.is_empty() {
            return Err(Error::presentation("missing data field"));
        }
        Ok(joined)
    }
}

/// Resolves `\DDD` and `\c` escapes into raw octets.
pub fn unescape(text: &str) -> Result<Vec<u8>> {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            let next = *bytes
                .get(i + 1)
                .ok_or_else(|| Error::presentation("dangling escape"))?;
            if next.is_ascii_digit() {
                if i + 3 >= bytes.len() {
                    return Err(Error::presentation("truncated \\DDD escape"));
                }
                let value: u16 = text[i + 1..i + 4]
                    .parse()
                    .map_err(|_| Error::presentation("malformed \\DDD escape"))?;
                out.push(
                    u8::try_from(value)
                        .map_err(|_| Error::presentation("\\DDD escape above 255"))?,
                );
                i += 4;
            } else {
                out.push(next);
                i += 2;
            }
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    Ok(out)
}

/// Escapes raw octets for presentation, quoting when asked.
pub fn escape_bytes(bytes: &[u8], out: &mut String) {
    for &byte in bytes {
        match byte {
            b'"' | b'\\' => {
                out.push('\\');
                out.push(byte as char);
            }
            0x20..=0x7E => out.push(byte as char),
            _ => out.push_str(&format!("\\{byte:03}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn splits_plain_tokens() {
        let mut s = Scanner::new("10 mail.example.com.", None);
        assert_eq!(s.u16("preference").unwrap(), 10);
        assert_eq!(s.name().unwrap().to_string(), "mail.example.com.");
        assert!(s.at_end().unwrap());
    }

    #[test]
    fn quoted_strings_keep_spaces() {
        let mut s = Scanner::new("\"hello world\" plain", None);
        let first = s.take().unwrap();
        assert!(first.quoted);
        assert_eq!(first.text, "hello world");
        let second = s.take().unwrap();
        assert!(!second.quoted);
        assert_eq!(second.text, "plain");
    }

    #[test]
    fn quoted_escape_of_quote() {
        let mut s = Scanner::new(r#""say \"hi\"""#, None);
        let bytes = s.string_bytes().unwrap();
        assert_eq!(bytes, b"say \"hi\"");
    }

    #[test]
    fn origin_applies_to_relative_names() {
        let origin = Name::from_str("example.com.").unwrap();
        let mut s = Scanner::new("mail", Some(&origin));
        assert_eq!(s.name().unwrap().to_string(), "mail.example.com.");
    }

    #[test]
    fn width_enforcement() {
        assert!(Scanner::new("256", None).u8("x").is_err());
        assert!(Scanner::new("65536", None).u16("x").is_err());
        assert!(Scanner::new("2147483648", None).ttl().is_err());
        assert_eq!(Scanner::new("2147483647", None).ttl().unwrap(), 0x7FFF_FFFF);
    }

    #[test]
    fn base64_spans_tokens() {
        let mut s = Scanner::new("aGVs bG8=", None);
        assert_eq!(s.base64_rest().unwrap(), b"hello");
    }

    #[test]
    fn hex_rejects_nonalphabet() {
        let mut s = Scanner::new("zz", None);
        assert!(s.hex_rest().is_err());
    }

    #[test]
    fn unescape_round_trip() {
        let mut rendered = String::new();
        escape_bytes(&[0, b'a', b'"', 200], &mut rendered);
        assert_eq!(unescape(&rendered).unwrap(), vec![0, b'a', b'"', 200]);
    }

    #[test]
    fn trailing_tokens_detected() {
        let mut s = Scanner::new("1 2", None);
        s.u8("a").unwrap();
        assert!(s.expect_end().is_err());
    }
}
