//! Wire-format name parsing with compression pointers.

use super::Name;
use crate::error::{Error, Result};
use crate::{MAX_LABELS, MAX_NAME_LEN};
use smallvec::SmallVec;

/// Hard bound on pointer hops; no valid message needs anywhere near this.
const MAX_POINTER_HOPS: usize = 128;

/// Parses names out of a message buffer, resolving compression pointers.
///
/// The parser holds the whole message because a pointer may target any
/// earlier offset. Pointers must point strictly backwards; forward and
/// self-referencing pointers are rejected outright, and a hop counter plus
/// the 255-octet name bound terminate backward cycles through label data.
#[derive(Debug, Clone, Copy)]
pub struct NameParser<'a> {
    message: &'a [u8],
}

impl<'a> NameParser<'a> {
    /// Creates a parser over a message buffer.
    #[inline]
    pub const fn new(message: &'a [u8]) -> Self {
        Self { message }
    }

    /// Parses the name at `offset`.
    ///
    /// Returns the name and the octets consumed at the original position,
    /// which is the distance to whatever follows the name there; octets
    /// reached through pointers are not counted.
    pub fn parse_name(&self, offset: usize) -> Result<(Name, usize)> {
        let mut wire: SmallVec<[u8; 32]> = SmallVec::new();
        let mut labels = 0u8;
        let mut pos = offset;
        let mut consumed = None;
        let mut hops = 0usize;

        loop {
            let len_byte = *self.message.get(pos).ok_or(Error::eof(pos))?;

            match len_byte {
                0 => {
                    let consumed = consumed.unwrap_or(pos + 1 - offset);
                    return Ok((Name::from_parts(wire, labels, true), consumed));
                }
                len @ 1..=0x3F => {
                    let len = len as usize;
                    let end = pos + 1 + len;
                    if end > self.message.len() {
                        return Err(Error::eof(end));
                    }
                    if wire.len() + 1 + len + 1 > MAX_NAME_LEN {
                        return Err(Error::NameTooLong {
                            len: wire.len() + 1 + len + 1,
                        });
                    }
                    if labels as usize + 1 >= MAX_LABELS {
                        return Err(Error::NameTooLong { len: MAX_NAME_LEN + 1 });
                    }
                    wire.extend_from_slice(&self.message[pos..end]);
                    labels += 1;
                    pos = end;
                }
                0xC0..=0xFF => {
                    let low = *self.message.get(pos + 1).ok_or(Error::eof(pos + 1))?;
                    let target = usize::from(u16::from_be_bytes([len_byte & 0x3F, low]));
                    if target >= pos {
                        return Err(Error::BadPointer {
                            offset: pos,
                            target,
                        });
                    }
                    hops += 1;
                    if hops > MAX_POINTER_HOPS {
                        return Err(Error::PointerChain {
                            max: MAX_POINTER_HOPS,
                        });
                    }
                    consumed.get_or_insert(pos + 2 - offset);
                    pos = target;
                }
                other => {
                    return Err(Error::BadLabelType {
                        value: other,
                        offset: pos,
                    });
                }
            }
        }
    }

    /// Parses the name at `offset`, discarding the consumed count.
    #[inline]
    pub fn parse(&self, offset: usize) -> Result<Name> {
        self.parse_name(offset).map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_name() {
        let wire = [
            3, b'w', b'w', b'w', 7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm',
            0,
        ];
        let (name, consumed) = NameParser::new(&wire).parse_name(0).unwrap();
        assert_eq!(name.to_string(), "www.example.com.");
        assert!(name.is_absolute());
        assert_eq!(consumed, wire.len());
    }

    #[test]
    fn compressed_tail() {
        // offset 0: example.com.  offset 13: www + pointer to 0
        let wire = [
            7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0, 3, b'w', b'w',
            b'w', 0xC0, 0x00,
        ];
        let parser = NameParser::new(&wire);

        let (first, c1) = parser.parse_name(0).unwrap();
        assert_eq!(first.to_string(), "example.com.");
        assert_eq!(c1, 13);

        let (second, c2) = parser.parse_name(13).unwrap();
        assert_eq!(second.to_string(), "www.example.com.");
        assert_eq!(c2, 6);
    }

    #[test]
    fn root_name() {
        let wire = [0u8];
        let (name, consumed) = NameParser::new(&wire).parse_name(0).unwrap();
        assert!(name.is_root());
        assert_eq!(consumed, 1);
    }

    #[test]
    fn forward_pointer_rejected() {
        let wire = [0xC0, 0x04, 0, 0, 0];
        assert!(matches!(
            NameParser::new(&wire).parse_name(0),
            Err(Error::BadPointer { .. })
        ));
    }

    #[test]
    fn self_pointer_rejected() {
        let wire = [0xC0, 0x00];
        assert!(matches!(
            NameParser::new(&wire).parse_name(0),
            Err(Error::BadPointer { .. })
        ));
    }

    #[test]
    fn backward_cycle_terminates() {
        // A backward pointer can still cycle through label data: parsing
        // from offset 4 reads "abc", hits the pointer, and returns to 0.
        let wire = [3, b'a', b'b', b'c', 0xC0, 0x00];
        let result = NameParser::new(&wire).parse_name(4);
        assert!(matches!(
            result,
            Err(Error::NameTooLong { .. }) | Err(Error::PointerChain { .. })
        ));
    }

    #[test]
    fn truncated_label_rejected() {
        let wire = [5, b'a', b'b'];
        assert!(matches!(
            NameParser::new(&wire).parse_name(0),
            Err(Error::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn reserved_label_type_rejected() {
        let wire = [0x40, 0x00];
        assert!(matches!(
            NameParser::new(&wire).parse_name(0),
            Err(Error::BadLabelType { .. })
        ));
    }
}
