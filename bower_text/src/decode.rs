// Copyright 2025 the Bower Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lossy UTF-8 codepoint decoding.
//!
//! Text handed to the layout engine is a byte string. Well-formed sequences
//! decode to their codepoint; anything else decodes to [`REPLACEMENT`] and
//! consumes exactly one byte, so every malformed byte shows up as its own glyph.

/// Codepoint produced for a byte that does not start a valid UTF-8 sequence.
pub const REPLACEMENT: char = '?';

/// Decodes the codepoint starting at byte `offset`.
///
/// Returns the codepoint and the number of bytes it occupies, or `None` once
/// `offset` is past the end of `bytes`.
pub fn decode_at(bytes: &[u8], offset: usize) -> Option<(char, usize)> {
    let rest = bytes.get(offset..)?;
    let &lead = rest.first()?;
    let len = match lead {
        0x00..=0x7F => return Some((char::from(lead), 1)),
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return Some((REPLACEMENT, 1)),
    };
    // `from_utf8` rejects bad continuation bytes, overlong forms and surrogates.
    let decoded = rest
        .get(..len)
        .and_then(|seq| core::str::from_utf8(seq).ok())
        .and_then(|s| s.chars().next());
    Some(match decoded {
        Some(ch) => (ch, len),
        None => (REPLACEMENT, 1),
    })
}

/// Iterator over `(byte_offset, codepoint)` pairs of a byte string.
#[derive(Clone, Debug)]
pub struct Codepoints<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Codepoints<'a> {
    /// Starts decoding at the beginning of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }
}

impl Iterator for Codepoints<'_> {
    type Item = (usize, char);

    fn next(&mut self) -> Option<Self::Item> {
        let (ch, len) = decode_at(self.bytes, self.offset)?;
        let at = self.offset;
        self.offset += len;
        Some((at, ch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn chars(bytes: &[u8]) -> Vec<char> {
        Codepoints::new(bytes).map(|(_, ch)| ch).collect()
    }

    #[test]
    fn ascii_and_multibyte() {
        assert_eq!(decode_at(b"a", 0), Some(('a', 1)));
        assert_eq!(decode_at("é".as_bytes(), 0), Some(('é', 2)));
        assert_eq!(decode_at("€".as_bytes(), 0), Some(('€', 3)));
        assert_eq!(decode_at("🦀".as_bytes(), 0), Some(('🦀', 4)));
        assert_eq!(decode_at(b"a", 1), None);
    }

    #[test]
    fn malformed_bytes_become_single_byte_placeholders() {
        assert_eq!(chars(b"a\xFFb"), ['a', REPLACEMENT, 'b']);
        // Truncated three-byte sequence: each byte is its own placeholder.
        assert_eq!(chars(b"\xE2\x82"), [REPLACEMENT, REPLACEMENT]);
        // Lone continuation byte.
        assert_eq!(chars(b"\x80x"), [REPLACEMENT, 'x']);
        // Overlong encoding of '/'.
        assert_eq!(chars(b"\xC0\xAF"), [REPLACEMENT, REPLACEMENT]);
    }

    #[test]
    fn offsets_follow_byte_lengths() {
        let offsets: Vec<usize> = Codepoints::new("aé€b".as_bytes())
            .map(|(at, _)| at)
            .collect();
        assert_eq!(offsets, [0, 1, 3, 6]);
    }
}
