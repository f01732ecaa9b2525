//! Update-line parser.
//!
//! Parses the text lines a board page receives (`qfcode:<code>` and
//! `mesg:<text>`) plus the viewer's own stepping commands into structured
//! `Update` variants that the viewer loop can dispatch on.

use log::warn;

/// A parsed update line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    /// Replace the board with a freshly decoded code.
    Code { code: String },

    /// A text message for whoever is watching the board.
    Message { text: String },

    /// Step forward one record entry.
    Next,

    /// Step back one record entry.
    Back,

    /// Return to the position in the state block.
    Rewind,

    /// Play every remaining record entry.
    End,

    /// Print the current board.
    Show,

    /// Synchronization ping; the viewer replies `readyok`.
    IsReady,

    /// Set a viewer option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Stop the viewer.
    Quit,
}

/// Parses a single line of input into an `Update`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_update(line: &str) -> Option<Update> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Push-channel form: `<kind>:<payload>`, payload taken verbatim.
    if let Some(code) = trimmed.strip_prefix("qfcode:") {
        return parse_code(code);
    }
    if let Some(text) = trimmed.strip_prefix("mesg:") {
        return Some(Update::Message {
            text: text.to_string(),
        });
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    match tokens[0] {
        "next" => Some(Update::Next),
        "back" => Some(Update::Back),
        "rewind" => Some(Update::Rewind),
        "end" => Some(Update::End),
        "show" => Some(Update::Show),
        "isready" => Some(Update::IsReady),
        "quit" => Some(Update::Quit),

        "qfcode" => parse_code(tokens.get(1).copied().unwrap_or("")),
        "setoption" => parse_setoption(&tokens),

        other => {
            warn!("unknown update: {}", other);
            None
        }
    }
}

fn parse_code(code: &str) -> Option<Update> {
    let code = code.trim();
    if code.is_empty() {
        warn!("malformed qfcode update: expected 'qfcode:<code>'");
        return None;
    }
    Some(Update::Code {
        code: code.to_string(),
    })
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Update> {
    if tokens.len() < 3 || tokens[1] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                warn!("malformed setoption: empty name");
                return None;
            }
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name_parts.join(" "), value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Update::SetOption { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_push_channel_code() {
        assert_eq!(
            parse_update("qfcode:gkwAAAAQ"),
            Some(Update::Code {
                code: "gkwAAAAQ".to_string()
            })
        );
    }

    #[test]
    fn parse_spaced_code() {
        assert_eq!(
            parse_update("qfcode  gkwAAAAQ"),
            Some(Update::Code {
                code: "gkwAAAAQ".to_string()
            })
        );
    }

    #[test]
    fn code_keeps_non_alphabet_characters() {
        // The decoder skips them; the parser must not.
        assert_eq!(
            parse_update("qfcode:gkw-AAAAQ"),
            Some(Update::Code {
                code: "gkw-AAAAQ".to_string()
            })
        );
    }

    #[test]
    fn parse_missing_code_returns_none() {
        assert_eq!(parse_update("qfcode:"), None);
        assert_eq!(parse_update("qfcode"), None);
    }

    #[test]
    fn parse_message_keeps_spacing() {
        assert_eq!(
            parse_update("mesg:white to move,  think hard"),
            Some(Update::Message {
                text: "white to move,  think hard".to_string()
            })
        );
        assert_eq!(
            parse_update("mesg:"),
            Some(Update::Message {
                text: String::new()
            })
        );
    }

    #[test]
    fn parse_stepping_commands() {
        assert_eq!(parse_update("next"), Some(Update::Next));
        assert_eq!(parse_update("back"), Some(Update::Back));
        assert_eq!(parse_update("rewind"), Some(Update::Rewind));
        assert_eq!(parse_update("end"), Some(Update::End));
        assert_eq!(parse_update("show"), Some(Update::Show));
    }

    #[test]
    fn parse_isready_and_quit() {
        assert_eq!(parse_update("isready"), Some(Update::IsReady));
        assert_eq!(parse_update("quit"), Some(Update::Quit));
    }

    #[test]
    fn parse_empty_line_returns_none() {
        assert_eq!(parse_update(""), None);
        assert_eq!(parse_update("  "), None);
        assert_eq!(parse_update("\t"), None);
    }

    #[test]
    fn parse_unknown_update_returns_none() {
        assert_eq!(parse_update("foobar"), None);
        assert_eq!(parse_update("chat:hello"), None);
    }

    #[test]
    fn parse_setoption_with_value() {
        assert_eq!(
            parse_update("setoption name Strict value true"),
            Some(Update::SetOption {
                name: "Strict".to_string(),
                value: Some("true".to_string()),
            })
        );
    }

    #[test]
    fn parse_setoption_no_value() {
        assert_eq!(
            parse_update("setoption name Pretty"),
            Some(Update::SetOption {
                name: "Pretty".to_string(),
                value: None,
            })
        );
    }

    #[test]
    fn parse_setoption_malformed_returns_none() {
        assert_eq!(parse_update("setoption"), None);
        assert_eq!(parse_update("setoption foo"), None);
        assert_eq!(parse_update("setoption name value 1"), None);
    }

    #[test]
    fn parse_with_leading_trailing_whitespace() {
        assert_eq!(parse_update("  next  "), Some(Update::Next));
        assert_eq!(
            parse_update("  qfcode:AAAAAAAA \n"),
            Some(Update::Code {
                code: "AAAAAAAA".to_string()
            })
        );
    }
}
