//! Quantum max-of-pair CLI
//!
//! Usage: qmax_compare <number_1> <number_2> [options]
//!
//! Options:
//!   --width <N>    Operand width in bits (default: 32)
//!   --fixed        Encode all width - 1 magnitude bits
//!   --shots <N>    Number of simulation shots (default: 1)
//!   --seed <N>     Seed for measurement sampling
//!   --draw         Print the circuit
//!   --qasm         Print the circuit as OpenQASM 2.0
//!   --save [PATH]  Save the circuit (default: cmp_<n1>_<n2>.qcirc)
//!   --help, -h     Show help
//!
//! Example: qmax_compare -- -17 42 --draw

use qmax_comparator::domain::qasm::to_qasm;
use qmax_comparator::infra::circuit_io::{get_circuit_path, save_circuit};
use qmax_comparator::{
    ComparatorConfig, ComparatorError, DEFAULT_WIDTH, EncodingMode, MAX_WIDTH, run_comparison,
};
use std::env;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

struct Args {
    number_1: i64,
    number_2: i64,
    config: ComparatorConfig,
    qasm: bool,
    save: Option<PathBuf>,
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <number_1> <number_2> [options]", program);
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <number_1>       First signed integer");
    eprintln!("  <number_2>       Second signed integer");
    eprintln!();
    eprintln!("Options:");
    eprintln!(
        "  --width <N>      Operand width in bits, 1-{} (default: {})",
        MAX_WIDTH, DEFAULT_WIDTH
    );
    eprintln!("  --fixed          Encode all width - 1 magnitude bits");
    eprintln!("  --shots <N>      Number of simulation shots (default: 1)");
    eprintln!("  --seed <N>       Seed for measurement sampling");
    eprintln!("  --draw           Print the circuit");
    eprintln!("  --qasm           Print the circuit as OpenQASM 2.0");
    eprintln!("  --save [PATH]    Save the circuit (default: cmp_<n1>_<n2>.qcirc)");
    eprintln!("  --help, -h       Show this help message");
}

fn option_value<'a>(args: &'a [String], i: &mut usize, name: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(|s| s.as_str())
        .ok_or_else(|| format!("{} requires a value", name))
}

fn parse_number<T: std::str::FromStr>(value: &str, what: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("Invalid {}: {}", what, value))
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().collect();

    let mut numbers: Vec<i64> = Vec::new();
    let mut config = ComparatorConfig::default();
    let mut qasm = false;
    let mut save = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--width" => {
                let value = option_value(&args, &mut i, "--width")?;
                config.width = parse_number(value, "width")?;
            }
            "--fixed" => config.encoding = EncodingMode::Fixed,
            "--shots" => {
                let value = option_value(&args, &mut i, "--shots")?;
                config.shots = parse_number(value, "shot count")?;
            }
            "--seed" => {
                let value = option_value(&args, &mut i, "--seed")?;
                config.seed = Some(parse_number(value, "seed")?);
            }
            "--draw" => config.draw = true,
            "--qasm" => qasm = true,
            "--save" => {
                // PATH is optional; operands and options are never taken as one
                let path = args
                    .get(i + 1)
                    .filter(|next| !next.starts_with("--") && next.parse::<i64>().is_err());
                save = Some(path.map(PathBuf::from));
                if path.is_some() {
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                std::process::exit(0);
            }
            "--" => {}
            // Negative operands look like options
            value if value.parse::<i64>().is_ok() => {
                if numbers.len() == 2 {
                    return Err(format!("Unexpected argument: {}", value));
                }
                numbers.push(parse_number(value, "number")?);
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    let [number_1, number_2] = numbers[..] else {
        return Err("Expected exactly two numbers".to_string());
    };

    let save = save.map(|path| save_path(path, number_1, number_2));

    Ok(Args {
        number_1,
        number_2,
        config,
        qasm,
        save,
    })
}

/// Explicit `--save` path, or the default name for the pair
fn save_path(path: Option<PathBuf>, number_1: i64, number_2: i64) -> PathBuf {
    path.unwrap_or_else(|| PathBuf::from(get_circuit_path(number_1, number_2)))
}

fn format_error(err: &ComparatorError) -> String {
    match err {
        ComparatorError::Encoding(e) => format!("{}.\nUse --width to allow larger operands.", e),
        other => other.to_string(),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage(&env::args().next().unwrap_or_default());
            std::process::exit(1);
        }
    };

    info!(
        number_1 = args.number_1,
        number_2 = args.number_2,
        width = args.config.width,
        shots = args.config.shots,
        "comparing"
    );
    let start = Instant::now();
    let outcome = match run_comparison(args.number_1, args.number_2, &args.config) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", format_error(&e));
            std::process::exit(1);
        }
    };
    let elapsed = start.elapsed();

    if let Some(drawing) = &outcome.drawing {
        println!("{}", drawing);
        println!();
    }

    if args.qasm {
        print!("{}", to_qasm(&outcome.comparator.circuit));
        println!();
    }

    if let Some(path) = &args.save {
        match save_circuit(path, &outcome.comparator.circuit) {
            Ok(_) => println!("Circuit saved to {}", path.display()),
            Err(e) => {
                eprintln!("Error saving circuit: {}", e);
                std::process::exit(1);
            }
        }
    }

    let stats = outcome.comparator.circuit.stats();
    println!(
        "Circuit: {} qubits, {} operations, depth {}",
        stats.num_qubits, stats.size, stats.depth
    );
    println!("Counts: {}", outcome.counts);
    println!(
        "{} {} {}",
        outcome.number_1,
        if outcome.less_than { "<" } else { ">=" },
        outcome.number_2
    );
    println!("Larger number: {}", outcome.larger);
    println!("Completed in {:.3} seconds.", elapsed.as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_path_default_and_explicit() {
        assert_eq!(save_path(None, -17, 42), PathBuf::from("cmp_-17_42.qcirc"));
        assert_eq!(
            save_path(Some(PathBuf::from("out.qcirc")), -17, 42),
            PathBuf::from("out.qcirc")
        );
    }
}
