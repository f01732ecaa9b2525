//! qfcode wire handling.
//!
//! This module implements the qfcode symbol alphabet, MSB-first bit
//! unpacking, the state and game-record decoders, and the update-line parser
//! for the viewer loop.

pub mod bits;
pub mod parser;
pub mod qfcode;
pub mod symbols;

pub use bits::{BitCursor, BitSequence};
pub use parser::{parse_update, Update};
pub use qfcode::{
    decode, decode_move_log, decode_state, decode_strict, read_header, step_piece, DecodeError,
    Decoded, Header, DEFAULT_CODE,
};
pub use symbols::{symbol_char, symbol_value, ALPHABET};
