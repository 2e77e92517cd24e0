//! Saved circuit runner CLI
//!
//! Usage: qmax_run <PATH> [--shots <N>] [--seed <N>] [--draw] [--qasm]
//!
//! Loads a circuit saved by `qmax_compare --save`, simulates it and prints
//! the measurement counts.
//!
//! Example: qmax_run cmp_5_-3.qcirc --shots 16 --draw

use qmax_comparator::domain::circuit_format::CircuitFormatError;
use qmax_comparator::domain::draw::draw;
use qmax_comparator::domain::qasm::to_qasm;
use qmax_comparator::infra::circuit_io::load_circuit;
use qmax_comparator::{DEFAULT_SHOTS, Simulator};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn format_load_error(path: &Path, err: CircuitFormatError) -> String {
    match err {
        CircuitFormatError::InvalidMagic => format!(
            "Invalid file: '{}' is not a circuit file.",
            path.display()
        ),
        CircuitFormatError::UnsupportedVersion(version) => format!(
            "Unsupported format version: {}.\nPlease save the circuit again.",
            version
        ),
        CircuitFormatError::TrailingData | CircuitFormatError::HeaderMismatch { .. } => format!(
            "Corrupted file '{}': {}.",
            path.display(),
            err
        ),
        other => format!("{}", other),
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <PATH> [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --shots <N>    Number of shots (default: {})", DEFAULT_SHOTS);
    eprintln!("  --seed <N>     Seed for measurement sampling");
    eprintln!("  --draw         Print the circuit");
    eprintln!("  --qasm         Print the circuit as OpenQASM 2.0");
    eprintln!("  --help, -h     Show this help message");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let mut path: Option<PathBuf> = None;
    let mut shots = DEFAULT_SHOTS;
    let mut seed: Option<u64> = None;
    let mut show_drawing = false;
    let mut show_qasm = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--shots" | "--seed" => {
                let name = args[i].clone();
                i += 1;
                let Some(value) = args.get(i).and_then(|v| v.parse::<u64>().ok()) else {
                    eprintln!("{} requires a numeric value", name);
                    std::process::exit(1);
                };
                if name == "--seed" {
                    seed = Some(value);
                } else {
                    shots = match u32::try_from(value) {
                        Ok(s) => s,
                        Err(_) => {
                            eprintln!("Shot count too large: {}", value);
                            std::process::exit(1);
                        }
                    };
                }
            }
            "--draw" => show_drawing = true,
            "--qasm" => show_qasm = true,
            "--help" | "-h" => {
                print_usage(&args[0]);
                std::process::exit(0);
            }
            value if !value.starts_with('-') => {
                if path.is_some() {
                    eprintln!("Error: duplicate path argument '{}'.", value);
                    std::process::exit(1);
                }
                path = Some(PathBuf::from(value));
            }
            other => {
                eprintln!("Unknown option: {}", other);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let Some(path) = path else {
        eprintln!("Error: Missing circuit path.");
        print_usage(&args[0]);
        std::process::exit(1);
    };

    let circuit = match load_circuit(&path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", format_load_error(&path, e));
            std::process::exit(1);
        }
    };

    let stats = circuit.stats();
    println!("Circuit file: {}", path.display());
    println!(
        "Loaded {} qubits, {} classical bits, {} operations (depth {})",
        stats.num_qubits, stats.num_clbits, stats.size, stats.depth
    );
    for (name, count) in &stats.gate_counts {
        println!("  {:<10} {}", name, count);
    }

    if show_drawing {
        println!();
        println!("{}", draw(&circuit));
    }
    if show_qasm {
        println!();
        print!("{}", to_qasm(&circuit));
    }

    let simulator = Simulator::new(seed);
    info!(shots, seed = simulator.seed(), "simulating loaded circuit");
    let start = Instant::now();
    let counts = match simulator.run(&circuit, shots) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!();
    println!("Seed: {}", simulator.seed());
    println!("Counts: {}", counts);
    for (outcome, count) in counts.iter() {
        let share = count as f64 / counts.total() as f64;
        println!("  {:>12} {:>8} ({:.1}%)", outcome, count, share * 100.0);
    }
    println!(
        "Simulated {} shot(s) in {:.3} seconds.",
        shots,
        start.elapsed().as_secs_f64()
    );
}
