//! Comparison workflow
//!
//! Encode both operands, build the comparator, simulate it and read back the
//! result bit. The result qubit is |1> exactly when `number_1 < number_2`.

use crate::config::{ComparatorConfig, ConfigError};
use crate::domain::circuit::CircuitError;
use crate::domain::comparator::{ComparatorCircuit, build_comparator};
use crate::domain::draw::draw;
use crate::domain::encoding::{EncodingError, encode_operands};
use crate::domain::simulator::{Counts, SimulationError, Simulator};
use thiserror::Error;
use tracing::debug;

/// Everything produced by one comparison
#[derive(Clone, Debug)]
pub struct ComparisonOutcome {
    pub number_1: i64,
    pub number_2: i64,
    /// Whether the comparator reported `number_1 < number_2`
    pub less_than: bool,
    /// The larger operand (`number_1` when equal)
    pub larger: i64,
    /// Measurement histogram of the result bit
    pub counts: Counts,
    pub comparator: ComparatorCircuit,
    /// Text drawing, when requested
    pub drawing: Option<String>,
}

/// Return the larger of two 32-bit operands using the default configuration
pub fn find_the_largest_number(number_1: i64, number_2: i64) -> Result<i64, ComparatorError> {
    find_the_largest_number_with(number_1, number_2, &ComparatorConfig::default())
}

/// Return the larger of two operands
pub fn find_the_largest_number_with(
    number_1: i64,
    number_2: i64,
    config: &ComparatorConfig,
) -> Result<i64, ComparatorError> {
    run_comparison(number_1, number_2, config).map(|outcome| outcome.larger)
}

/// Whether `number_1 < number_2` according to the comparator
pub fn less_than(
    number_1: i64,
    number_2: i64,
    config: &ComparatorConfig,
) -> Result<bool, ComparatorError> {
    run_comparison(number_1, number_2, config).map(|outcome| outcome.less_than)
}

/// Run a full comparison and keep all intermediate artifacts
pub fn run_comparison(
    number_1: i64,
    number_2: i64,
    config: &ComparatorConfig,
) -> Result<ComparisonOutcome, ComparatorError> {
    config.validate()?;

    let bits = encode_operands(number_1, number_2, config.width, config.encoding)?;
    let comparator = build_comparator(&bits)?;
    let counts = Simulator::new(config.seed).run(&comparator.circuit, config.shots)?;

    // Any shot reading 0 means number_1 is not smaller
    let result_bit = comparator.result_clbit.0 as usize;
    let less_than = counts.bit_count(result_bit, false) == 0;
    let larger = if less_than { number_2 } else { number_1 };

    debug!(number_1, number_2, less_than, larger, "comparison finished");

    let drawing = config.draw.then(|| draw(&comparator.circuit));

    Ok(ComparisonOutcome {
        number_1,
        number_2,
        less_than,
        larger,
        counts,
        comparator,
        drawing,
    })
}

/// Errors from the comparison workflow
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComparatorError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    Circuit(#[from] CircuitError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}
