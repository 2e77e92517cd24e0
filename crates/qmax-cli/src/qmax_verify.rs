//! Exhaustive comparator verification CLI
//!
//! Usage: qmax_verify [--width <N>] [--fixed]
//!
//! Runs the comparator on every pair of operands of the given width and
//! checks that it always returns the larger one.
//!
//! Example: qmax_verify --width 8

use qmax_comparator::app::verify::verify_with_progress;
use qmax_comparator::{EncodingMode, MAX_EXHAUSTIVE_WIDTH};
use std::env;
use std::io::{self, Write};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_VERIFY_WIDTH: u32 = 6;

fn print_usage(program: &str) {
    eprintln!("Usage: {} [--width <N>] [--fixed]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!(
        "  --width <N>    Operand width, 1-{} (default: {})",
        MAX_EXHAUSTIVE_WIDTH, DEFAULT_VERIFY_WIDTH
    );
    eprintln!("  --fixed        Encode all width - 1 magnitude bits");
    eprintln!("  --help, -h     Show this help message");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let mut width = DEFAULT_VERIFY_WIDTH;
    let mut encoding = EncodingMode::Minimal;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--width" => {
                i += 1;
                width = match args.get(i).and_then(|v| v.parse().ok()) {
                    Some(w) => w,
                    None => {
                        eprintln!("--width requires a numeric value");
                        std::process::exit(1);
                    }
                };
            }
            "--fixed" => encoding = EncodingMode::Fixed,
            "--help" | "-h" => {
                print_usage(&args[0]);
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage(&args[0]);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    info!(width, ?encoding, "starting verification");
    println!(
        "Verifying all {}-bit operand pairs ({:?} encoding)...",
        width, encoding
    );
    let start = Instant::now();

    let result = verify_with_progress(width, encoding, |done, total| {
        let progress = if total > 0 {
            (done as f64 / total as f64) * 100.0
        } else {
            100.0
        };
        print!("\r[Verify] Progress: {:.1}% ({}/{})", progress, done, total);
        let _ = io::stdout().flush();
    });
    println!();

    let report = match result {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "Checked {} pairs in {:.2} seconds.",
        report.pairs_checked,
        start.elapsed().as_secs_f64()
    );

    if report.is_ok() {
        println!("All pairs returned the larger number.");
    } else {
        println!("{} mismatches:", report.mismatches.len());
        for m in report.mismatches.iter().take(20) {
            println!(
                "  max({}, {}) = {}, comparator returned {}",
                m.number_1, m.number_2, m.expected, m.found
            );
        }
        std::process::exit(1);
    }
}
