//! qfcode -- Quoridor position and game-record decoding.
//!
//! Exposes the board model, the qfcode decoder, range validation, record
//! playback, and the viewer and batch front ends used by the binaries and
//! integration tests.

pub mod batch;
pub mod board;
pub mod playback;
pub mod protocol;
pub mod validate;
pub mod viewer;
