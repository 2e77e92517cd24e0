//! Circuit growth by operand width
//!
//! - Goal: show how qubit count, gate count and depth grow with the operand width.
//! - Method: for each width, build comparators for random operand pairs (minimal
//!   encoding) and for the fixed encoding, and report circuit statistics.
//!
//! ## Usage
//! ```sh
//! cargo run --example circuit_growth -p qmax-comparator --release
//! # Different sample count (e.g. 500 pairs per width)
//! cargo run --example circuit_growth -p qmax-comparator --release -- 500
//! ```

use std::time::Instant;

use rand::Rng;

use qmax_comparator::domain::encoding::operand_range;
use qmax_comparator::{EncodingMode, build_comparator, encode_operands};

const DEFAULT_SAMPLE_PAIRS: usize = 200;
const WIDTHS: [u32; 6] = [4, 8, 16, 24, 32, 42];

fn main() {
    let sample = parse_sample_count();
    println!("[Circuit Growth]");
    println!("Sample pairs per width: {sample}");
    println!();
    println!(
        "{:>5} | {:>12} | {:>12} | {:>12} | {:>6} | {:>6} | {:>6}",
        "width", "avg qubits", "avg ops", "avg depth", "fixedQ", "fixedN", "fixedD"
    );

    let start = Instant::now();
    let mut rng = rand::thread_rng();

    for width in WIDTHS {
        let (min, max) = operand_range(width);
        let mut qubits = 0u64;
        let mut ops = 0u64;
        let mut depth = 0u64;

        for _ in 0..sample {
            let a = rng.gen_range(min..=max);
            let b = rng.gen_range(min..=max);
            let bits = encode_operands(a, b, width, EncodingMode::Minimal)
                .expect("operands sampled from the valid range");
            let stats = build_comparator(&bits)
                .expect("comparator fits in the qubit limit")
                .circuit
                .stats();
            qubits += stats.num_qubits as u64;
            ops += stats.size as u64;
            depth += stats.depth as u64;
        }

        let bits = encode_operands(0, 0, width, EncodingMode::Fixed)
            .expect("zero fits in every width");
        let fixed = build_comparator(&bits)
            .expect("comparator fits in the qubit limit")
            .circuit
            .stats();

        let n = sample.max(1) as f64;
        println!(
            "{:>5} | {:>12.2} | {:>12.2} | {:>12.2} | {:>6} | {:>6} | {:>6}",
            width,
            qubits as f64 / n,
            ops as f64 / n,
            depth as f64 / n,
            fixed.num_qubits,
            fixed.size,
            fixed.depth
        );
    }

    println!();
    println!("Elapsed: {:.2} seconds", start.elapsed().as_secs_f64());
}

fn parse_sample_count() -> usize {
    std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SAMPLE_PAIRS)
}
