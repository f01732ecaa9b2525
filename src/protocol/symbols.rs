//! The 64-symbol qfcode alphabet.
//!
//! Each symbol carries one 6-bit value. Lookups go through a compile-time
//! table indexed by ASCII byte.

/// The alphabet in value order: symbol `i` encodes the value `i`.
pub const ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Bits carried by one symbol.
pub const SYMBOL_BITS: usize = 6;

/// Marks ASCII bytes that are not in the alphabet.
const NO_SYMBOL: u8 = 0xFF;

/// ASCII byte -> 6-bit value, or `NO_SYMBOL`.
static SYMBOL_VALUES: [u8; 128] = build_symbol_values();

const fn build_symbol_values() -> [u8; 128] {
    let mut table = [NO_SYMBOL; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Returns the 6-bit value of `c`, or `None` if it is not an alphabet symbol.
pub fn symbol_value(c: char) -> Option<u8> {
    if !c.is_ascii() {
        return None;
    }
    match SYMBOL_VALUES[c as usize] {
        NO_SYMBOL => None,
        v => Some(v),
    }
}

/// Returns the symbol for a 6-bit value, or `None` if `value >= 64`.
pub fn symbol_char(value: u8) -> Option<char> {
    ALPHABET.get(value as usize).map(|&b| b as char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_symbol_maps_to_its_position() {
        for (i, &b) in ALPHABET.iter().enumerate() {
            assert_eq!(symbol_value(b as char), Some(i as u8));
            assert_eq!(symbol_char(i as u8), Some(b as char));
        }
    }

    #[test]
    fn known_values() {
        assert_eq!(symbol_value('A'), Some(0));
        assert_eq!(symbol_value('a'), Some(26));
        assert_eq!(symbol_value('0'), Some(52));
        assert_eq!(symbol_value('+'), Some(62));
        assert_eq!(symbol_value('/'), Some(63));
    }

    #[test]
    fn non_symbols_are_rejected() {
        for c in ['-', '_', '=', ' ', '\n', '\t', 'é', '€', '\0'] {
            assert_eq!(symbol_value(c), None, "{:?} should not be a symbol", c);
        }
        assert_eq!(symbol_char(64), None);
    }
}
