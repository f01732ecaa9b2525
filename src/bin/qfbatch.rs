//! Batch qfcode decoding CLI.
//!
//! Reads one code per line and writes one JSON object per code as JSONL.
//!
//! Usage:
//!   cargo run --release --bin qfbatch -- [OPTIONS]
//!
//! Options:
//!   --input FILE    Input file path (default: stdin)
//!   --output FILE   Output file path (default: stdout)
//!   --threads N     Number of parallel threads (default: 4)
//!   --strict        Reject codes with out-of-range values
//!   --quiet         Suppress summary output

use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::process;
use std::time::Instant;

use qfcode::batch::{self, BatchConfig};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = BatchConfig::default();
    let mut input_path: Option<String> = None;
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--threads" => {
                i += 1;
                config.threads = match args.get(i).and_then(|v| v.parse().ok()) {
                    Some(n) => n,
                    None => usage_error("invalid --threads value"),
                };
            }
            "--input" => {
                i += 1;
                input_path = Some(value_of(&args, i, "--input"));
            }
            "--output" => {
                i += 1;
                output_path = Some(value_of(&args, i, "--output"));
            }
            "--strict" => {
                config.strict = true;
            }
            "--quiet" => {
                config.quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => usage_error(&format!("Unknown argument: {}", other)),
        }
        i += 1;
    }

    let lines = match read_lines(input_path.as_deref()) {
        Ok(lines) => lines,
        Err(e) => {
            eprintln!("failed to read input: {}", e);
            process::exit(1);
        }
    };

    if !config.quiet {
        eprintln!(
            "Batch decode: {} lines, {} threads, strict {}",
            lines.len(),
            config.threads,
            config.strict
        );
    }

    let start = Instant::now();
    let records = match batch::decode_batch(&lines, &config) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    let written = match output_path.as_deref() {
        Some(path) => File::create(path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            batch::write_jsonl(&records, &mut writer)
        }),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            batch::write_jsonl(&records, &mut writer)
        }
    };
    if let Err(e) = written {
        eprintln!("failed to write output: {}", e);
        process::exit(1);
    }

    if !config.quiet {
        eprintln!(
            "Decoded {} codes in {:.3}s",
            records.len(),
            elapsed.as_secs_f64()
        );
        batch::print_summary(&records);
        if let Some(path) = output_path {
            eprintln!("Wrote {} records to {}", records.len(), path);
        }
    }
}

fn read_lines(path: Option<&str>) -> io::Result<Vec<String>> {
    match path {
        Some(path) => BufReader::new(File::open(path)?).lines().collect(),
        None => io::stdin().lock().lines().collect(),
    }
}

fn value_of(args: &[String], i: usize, flag: &str) -> String {
    match args.get(i) {
        Some(v) => v.clone(),
        None => usage_error(&format!("missing value for {}", flag)),
    }
}

fn usage_error(msg: &str) -> ! {
    eprintln!("{}", msg);
    print_usage();
    process::exit(1);
}

fn print_usage() {
    eprintln!("Usage: qfbatch [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --input FILE     Input file path (default: stdin)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --strict         Reject codes with out-of-range values");
    eprintln!("  --quiet          Suppress summary output");
    eprintln!("  --help           Show this help");
}
