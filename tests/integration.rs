//! Integration tests for the qfcode binaries.
//!
//! Spawns the viewer and batch processes, sends input via stdin, and
//! verifies stdout responses.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

/// Sends a sequence of update lines to the viewer and collects stdout lines.
fn run_viewer(updates: &[&str]) -> Vec<String> {
    run_binary(env!("CARGO_BIN_EXE_qfcode"), &[], updates)
}

/// Feeds codes to the batch decoder and collects its JSONL output.
fn run_batch(args: &[&str], codes: &[&str]) -> Vec<serde_json::Value> {
    run_binary(env!("CARGO_BIN_EXE_qfbatch"), args, codes)
        .iter()
        .map(|l| serde_json::from_str(l).expect("batch output is JSON"))
        .collect()
}

fn run_binary(exe: &str, args: &[&str], input: &[&str]) -> Vec<String> {
    let mut child = Command::new(exe)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start binary");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for line in input {
        writeln!(stdin, "{}", line).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

fn board(line: &str) -> serde_json::Value {
    let json = line
        .strip_prefix("board ")
        .unwrap_or_else(|| panic!("expected a board line, got: {}", line));
    serde_json::from_str(json).unwrap()
}

/// No state block; record: White steps north, Black steps south.
const TWO_STEP_CODE: &str = "QCBA";

#[test]
fn isready_response() {
    let lines = run_viewer(&["isready", "quit"]);
    assert_eq!(lines, vec!["readyok"]);
}

#[test]
fn unknown_updates_are_ignored() {
    let lines = run_viewer(&["foobar", "chat:hi", "", "isready", "quit"]);
    assert_eq!(lines, vec!["readyok"]);
}

#[test]
fn quit_stops_processing() {
    let lines = run_viewer(&["quit", "isready"]);
    assert!(lines.is_empty());
}

#[test]
fn eof_without_quit_exits_cleanly() {
    let lines = run_viewer(&["isready"]);
    assert_eq!(lines, vec!["readyok"]);
}

#[test]
fn code_update_shows_start_board() {
    let lines = run_viewer(&["qfcode:gkwAAAAQ", "quit"]);
    assert_eq!(lines.len(), 1);
    let b = board(&lines[0]);
    assert_eq!(b["pieces"], serde_json::json!([4, 76]));
    assert_eq!(b["turn"], "black");
    assert_eq!(b["turn_number"], 1);
    assert_eq!(b["last_move"]["source"], "state");
    assert_eq!(b["last_move"]["move"]["kind"], "piece");
    assert_eq!(b["last_move"]["move"]["player"], "white");
}

#[test]
fn full_stepping_session() {
    let lines = run_viewer(&[
        &format!("qfcode:{}", TWO_STEP_CODE),
        "next",
        "next",
        "next",
        "back",
        "rewind",
        "end",
        "show",
        "quit",
    ]);

    let kinds: Vec<&str> = lines
        .iter()
        .map(|l| l.split(' ').next().unwrap_or(""))
        .collect();
    assert_eq!(
        kinds,
        vec![
            "board", "move", "board", "move", "board", "nomove", "move", "board", "board",
            "board", "board"
        ]
    );

    assert_eq!(board(&lines[2])["pieces"], serde_json::json!([13, 76]));
    assert_eq!(board(&lines[4])["pieces"], serde_json::json!([13, 67]));
    assert_eq!(board(&lines[4])["turn"], "white");
    assert_eq!(board(&lines[7])["pieces"], serde_json::json!([13, 76]));
    assert_eq!(board(&lines[8])["ply"], 0);
    assert_eq!(board(&lines[9])["ply"], 2);
    assert_eq!(lines[9], lines[10]);
}

#[test]
fn new_code_replaces_board() {
    let lines = run_viewer(&[
        &format!("qfcode:{}", TWO_STEP_CODE),
        "end",
        "qfcode:AAAAAAAA",
        "next",
        "quit",
    ]);
    assert_eq!(lines.len(), 4);
    let b = board(&lines[2]);
    assert_eq!(b["pieces"], serde_json::json!([4, 76]));
    assert_eq!(b["record_length"], 0);
    assert_eq!(lines[3], "nomove");
}

#[test]
fn truncated_code_reports_error() {
    let lines = run_viewer(&["qfcode:gkwAAAA", "show", "quit"]);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("error truncated input"), "{}", lines[0]);
    assert_eq!(lines[1], "error no board loaded");
}

#[test]
fn strict_option_rejects_off_board_piece() {
    let lines = run_viewer(&["qfcode:skwAAAAQ", "quit"]);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("warning "));

    let lines = run_viewer(&["setoption name Strict value true", "qfcode:skwAAAAQ", "quit"]);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("error value out of range"), "{}", lines[0]);
}

#[test]
fn message_is_echoed() {
    let lines = run_viewer(&["mesg:your move", "quit"]);
    assert_eq!(lines, vec!["mesg your move"]);
}

#[test]
fn batch_decodes_in_input_order() {
    let records = run_batch(
        &["--quiet", "--threads", "2"],
        &["AAAAAAAA", "", "gkwAAAA", TWO_STEP_CODE],
    );
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["line"], 1);
    assert_eq!(records[0]["decoded"]["has_state"], false);
    assert_eq!(records[1]["line"], 3);
    assert!(records[1]["error"].is_string());
    assert_eq!(records[2]["line"], 4);
    assert_eq!(records[2]["decoded"]["log"]["entries"][1]["to"], 67);
}

#[test]
fn batch_strict_flag() {
    let records = run_batch(&["--quiet"], &["skwAAAAQ"]);
    assert_eq!(records[0]["warnings"][0]["kind"], "piece_off_board");

    let records = run_batch(&["--quiet", "--strict"], &["skwAAAAQ"]);
    assert!(records[0].get("decoded").is_none());
    assert!(records[0]["error"].is_string());
}
