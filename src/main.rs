//! qfcode -- a line-oriented Quoridor board viewer.
//!
//! This binary reads update lines from stdin (`qfcode:<code>`, `mesg:<text>`
//! and stepping commands) and writes one response per update to stdout.

use std::io::{self, BufRead};

use log::error;

use qfcode::protocol::parser::{parse_update, Update};
use qfcode::viewer::Viewer;

/// Runs the viewer loop, reading updates from stdin and writing responses
/// to stdout.
fn main() {
    env_logger::init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut viewer = Viewer::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let update = match parse_update(&line) {
            Some(u) => u,
            None => continue,
        };

        let result = match update {
            Update::Code { code } => viewer.handle_code(&code, &mut out),
            Update::Message { text } => viewer.handle_message(&text, &mut out),
            Update::Next => viewer.handle_next(&mut out),
            Update::Back => viewer.handle_back(&mut out),
            Update::Rewind => viewer.handle_rewind(&mut out),
            Update::End => viewer.handle_end(&mut out),
            Update::Show => viewer.handle_show(&mut out),
            Update::IsReady => viewer.handle_isready(&mut out),
            Update::SetOption { name, value } => {
                viewer.set_option(name, value);
                Ok(())
            }
            Update::Quit => break,
        };

        if let Err(e) = result {
            error!("failed to write response: {}", e);
            break;
        }
    }
}
