//! Bit unpacking for qfcode strings.
//!
//! A code is read as one continuous MSB-first bit stream: every alphabet
//! symbol contributes its six bits in order, and anything else is dropped.
//! Fields are then pulled off the front with a forward-only cursor.

use log::debug;

use super::qfcode::DecodeError;
use super::symbols::{symbol_value, SYMBOL_BITS};

/// Widest field the cursor can read in one call.
pub const MAX_FIELD_BITS: usize = 16;

/// The flat bit sequence behind a code.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitSequence {
    bits: Vec<bool>,
    skipped: usize,
}

impl BitSequence {
    /// Unpacks a code, skipping characters outside the alphabet.
    pub fn unpack(code: &str) -> Self {
        let mut bits = Vec::with_capacity(code.len() * SYMBOL_BITS);
        let mut skipped = 0;

        for (pos, c) in code.chars().enumerate() {
            let value = match symbol_value(c) {
                Some(v) => v,
                None => {
                    debug!("skipping non-alphabet character {:?} at position {}", c, pos);
                    skipped += 1;
                    continue;
                }
            };
            for shift in (0..SYMBOL_BITS).rev() {
                bits.push((value >> shift) & 1 == 1);
            }
        }

        BitSequence { bits, skipped }
    }

    /// Total number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True when the code carried no alphabet symbols.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of input characters that were not alphabet symbols.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// The unpacked bits, most significant first.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Returns a cursor positioned at the first bit.
    pub fn cursor(&self) -> BitCursor<'_> {
        BitCursor {
            bits: &self.bits,
            pos: 0,
        }
    }
}

/// A read position over a bit sequence. Only moves forward.
#[derive(Debug, Clone)]
pub struct BitCursor<'a> {
    bits: &'a [bool],
    pos: usize,
}

impl<'a> BitCursor<'a> {
    /// Bits consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bits left to read.
    pub fn remaining(&self) -> usize {
        self.bits.len() - self.pos
    }

    /// Reads `n` bits (at most 16) as an unsigned MSB-first integer.
    ///
    /// `field` names what is being read and is carried in the error when
    /// fewer than `n` bits remain. On error the cursor does not move.
    pub fn read_bits(&mut self, n: usize, field: &'static str) -> Result<u16, DecodeError> {
        debug_assert!(n <= MAX_FIELD_BITS, "field {} wider than 16 bits", field);
        if n > self.remaining() {
            return Err(DecodeError::Truncated {
                field,
                needed: n,
                remaining: self.remaining(),
            });
        }

        let value = self.bits[self.pos..self.pos + n]
            .iter()
            .fold(0u16, |acc, &bit| (acc << 1) | bit as u16);
        self.pos += n;
        Ok(value)
    }

    /// Reads a single bit as a flag.
    pub fn read_flag(&mut self, field: &'static str) -> Result<bool, DecodeError> {
        Ok(self.read_bits(1, field)? == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpack_is_msb_first() {
        // 'g' = 32 = 100000, 'B' = 1 = 000001
        let seq = BitSequence::unpack("gB");
        let expected = [
            true, false, false, false, false, false, false, false, false, false, false, true,
        ];
        assert_eq!(seq.bits(), &expected);
        assert_eq!(seq.len(), 12);
        assert_eq!(seq.skipped(), 0);
    }

    #[test]
    fn unpack_skips_non_alphabet_characters() {
        let clean = BitSequence::unpack("gkwAAAAQ");
        let noisy = BitSequence::unpack(" gk-w\nAA=AAQ ");
        assert_eq!(clean.bits(), noisy.bits());
        assert_eq!(noisy.skipped(), 5);
    }

    #[test]
    fn unpack_empty() {
        let seq = BitSequence::unpack("");
        assert!(seq.is_empty());
        assert_eq!(seq.cursor().remaining(), 0);
    }

    #[test]
    fn read_bits_across_symbol_boundaries() {
        // "gkw" = 100000 100100 110000
        let seq = BitSequence::unpack("gkw");
        let mut cursor = seq.cursor();
        assert_eq!(cursor.read_bits(2, "flags").unwrap(), 0b10);
        assert_eq!(cursor.read_bits(7, "a").unwrap(), 4);
        assert_eq!(cursor.read_bits(7, "b").unwrap(), 76);
        assert_eq!(cursor.position(), 16);
        assert_eq!(cursor.remaining(), 2);
    }

    #[test]
    fn read_full_width() {
        let seq = BitSequence::unpack("///");
        let mut cursor = seq.cursor();
        assert_eq!(cursor.read_bits(16, "wide").unwrap(), u16::MAX);
        assert_eq!(cursor.read_bits(0, "empty").unwrap(), 0);
    }

    #[test]
    fn read_past_end_is_truncated() {
        let seq = BitSequence::unpack("A");
        let mut cursor = seq.cursor();
        cursor.read_bits(4, "head").unwrap();
        let err = cursor.read_bits(3, "tail").unwrap_err();
        assert_eq!(
            err,
            DecodeError::Truncated {
                field: "tail",
                needed: 3,
                remaining: 2
            }
        );
        // A failed read leaves the cursor where it was.
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn read_flag() {
        let seq = BitSequence::unpack("g");
        let mut cursor = seq.cursor();
        assert!(cursor.read_flag("first").unwrap());
        assert!(!cursor.read_flag("second").unwrap());
    }
}
