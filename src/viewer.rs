//! Viewer state management.
//!
//! Holds the current playback, the viewer options, and writes one response
//! line per update. Every `qfcode` update is decoded from scratch; nothing
//! carries over from the previous board.

use std::collections::HashMap;
use std::io::{self, Write};

use log::{debug, info};
use serde::Serialize;

use crate::playback::Playback;
use crate::protocol::qfcode::{decode, decode_strict};
use crate::validate::validate;

/// Option name: reject codes with out-of-range values.
pub const OPTION_STRICT: &str = "Strict";

/// Option name: pretty-print JSON responses.
pub const OPTION_PRETTY: &str = "Pretty";

/// Holds the mutable state of the viewer between updates.
#[derive(Debug, Default)]
pub struct Viewer {
    pub playback: Option<Playback>,
    pub options: HashMap<String, String>,
    pub last_message: Option<String>,
}

impl Viewer {
    /// Creates a viewer with no board.
    pub fn new() -> Self {
        Viewer::default()
    }

    /// Sets a viewer option. A missing value is stored as empty.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        debug!("setoption {} = {:?}", name, value);
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Reads a boolean option. An empty value counts as set.
    fn flag(&self, name: &str) -> bool {
        self.options
            .get(name)
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "" | "true" | "1" | "on"))
            .unwrap_or(false)
    }

    fn to_json<T: Serialize>(&self, value: &T) -> io::Result<String> {
        let json = if self.flag(OPTION_PRETTY) {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }

    fn write_board<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match &self.playback {
            Some(pb) => writeln!(out, "board {}", self.to_json(&pb.snapshot())?),
            None => writeln!(out, "error no board loaded"),
        }
    }

    /// Decodes a code and replaces the board.
    ///
    /// Writes `warning` lines for out-of-range values (or `error` in strict
    /// mode), then the new `board`. A code that fails to decode clears the
    /// board.
    pub fn handle_code<W: Write>(&mut self, code: &str, out: &mut W) -> io::Result<()> {
        let strict = self.flag(OPTION_STRICT);
        let result = if strict { decode_strict(code) } else { decode(code) };

        let decoded = match result {
            Ok(d) => d,
            Err(e) => {
                self.playback = None;
                writeln!(out, "error {}", e)?;
                return out.flush();
            }
        };

        if !strict {
            for warning in validate(&decoded) {
                writeln!(out, "warning {}", self.to_json(&warning)?)?;
            }
        }

        let pb = Playback::new(decoded);
        info!(
            "loaded board: {} record entries, {} to move",
            pb.log().len(),
            pb.turn()
        );
        self.playback = Some(pb);
        self.write_board(out)?;
        out.flush()
    }

    /// Records and echoes a text message.
    pub fn handle_message<W: Write>(&mut self, text: &str, out: &mut W) -> io::Result<()> {
        self.last_message = Some(text.to_string());
        writeln!(out, "mesg {}", text)?;
        out.flush()
    }

    /// Steps forward. Writes the applied `move` and the new `board`, or
    /// `nomove` at the end of the record.
    pub fn handle_next<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let entry = self.playback.as_mut().and_then(|pb| pb.next());
        self.write_step(entry, out)
    }

    /// Steps back. Writes the undone `move` and the new `board`, or `nomove`
    /// at the start of the record.
    pub fn handle_back<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let entry = self.playback.as_mut().and_then(|pb| pb.back());
        self.write_step(entry, out)
    }

    fn write_step<W: Write, T: Serialize>(&self, entry: Option<T>, out: &mut W) -> io::Result<()> {
        match entry {
            Some(entry) => {
                writeln!(out, "move {}", self.to_json(&entry)?)?;
                self.write_board(out)?;
            }
            None => writeln!(out, "nomove")?,
        }
        out.flush()
    }

    /// Returns to the state block's position and writes the board.
    pub fn handle_rewind<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if let Some(pb) = self.playback.as_mut() {
            pb.rewind();
        }
        self.write_board(out)?;
        out.flush()
    }

    /// Plays to the end of the record and writes the board.
    pub fn handle_end<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if let Some(pb) = self.playback.as_mut() {
            pb.fast_forward();
        }
        self.write_board(out)?;
        out.flush()
    }

    /// Writes the current board.
    pub fn handle_show<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.write_board(out)?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }
}
