//! State vector simulator
//!
//! The state is stored sparsely: only basis states with a non-zero amplitude
//! are kept, keyed by their `u128` basis index (bit `k` = qubit `k`).
//! Amplitudes are real since the supported gate set (X, H, CX, CCX, real
//! initialize) never introduces a complex phase. Permutation gates keep the
//! number of stored entries constant, so a comparator circuit stays at a
//! single basis state regardless of its width.

use crate::constants::PRUNE_EPSILON;
use crate::domain::circuit::Circuit;
use crate::domain::gate::{Op, Qubit};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace};

#[cfg(feature = "fxhash-state")]
type AmplitudeMap = rustc_hash::FxHashMap<u128, f64>;

#[cfg(not(feature = "fxhash-state"))]
type AmplitudeMap = std::collections::HashMap<u128, f64>;

/// Per-shot seed mixing constant (golden ratio)
const SHOT_SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Sparse real state vector
#[derive(Clone, Debug)]
pub struct StateVector {
    amplitudes: AmplitudeMap,
    num_qubits: u32,
}

impl StateVector {
    /// All qubits in |0>
    pub fn new(num_qubits: u32) -> Self {
        let mut amplitudes = AmplitudeMap::default();
        amplitudes.insert(0, 1.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Number of basis states with a stored amplitude
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Amplitude of a basis state
    pub fn amplitude(&self, basis: u128) -> f64 {
        self.amplitudes.get(&basis).copied().unwrap_or(0.0)
    }

    /// Probability of measuring `qubit` as 1
    pub fn probability_of_one(&self, qubit: Qubit) -> f64 {
        let mask = qubit.mask();
        self.amplitudes
            .iter()
            .filter(|(basis, _)| *basis & mask != 0)
            .map(|(_, amp)| amp * amp)
            .sum()
    }

    /// Apply one operation, writing measurement results into `clbits`
    pub fn apply<R: Rng>(&mut self, op: &Op, clbits: &mut [bool], rng: &mut R) {
        match *op {
            Op::Initialize { qubit, amplitudes } => {
                self.reset(qubit, rng);
                self.prepare(qubit, amplitudes);
            }
            Op::X(q) => {
                let mask = q.mask();
                self.permute(|basis| basis ^ mask);
            }
            Op::H(q) => self.hadamard(q),
            Op::Cx { control, target } => {
                let (c, t) = (control.mask(), target.mask());
                self.permute(|basis| if basis & c != 0 { basis ^ t } else { basis });
            }
            Op::Ccx {
                control_1,
                control_2,
                target,
            } => {
                let controls = control_1.mask() | control_2.mask();
                let t = target.mask();
                self.permute(|basis| {
                    if basis & controls == controls {
                        basis ^ t
                    } else {
                        basis
                    }
                });
            }
            Op::Measure { qubit, clbit } => {
                clbits[clbit.0 as usize] = self.measure(qubit, rng);
            }
        }
    }

    /// Measure a qubit and collapse the state
    pub fn measure<R: Rng>(&mut self, qubit: Qubit, rng: &mut R) -> bool {
        let p_one = self.probability_of_one(qubit);
        let outcome = rng.r#gen::<f64>() < p_one;
        let p = if outcome { p_one } else { 1.0 - p_one };
        let scale = 1.0 / p.sqrt();
        let mask = qubit.mask();

        self.amplitudes
            .retain(|basis, _| (*basis & mask != 0) == outcome);
        for amp in self.amplitudes.values_mut() {
            *amp *= scale;
        }
        outcome
    }

    /// Return a qubit to |0> (measure, then flip on 1)
    pub fn reset<R: Rng>(&mut self, qubit: Qubit, rng: &mut R) {
        if self.measure(qubit, rng) {
            let mask = qubit.mask();
            self.permute(|basis| basis ^ mask);
        }
    }

    /// Prepare `alpha|0> + beta|1>` on a qubit currently in |0>
    fn prepare(&mut self, qubit: Qubit, [alpha, beta]: [f64; 2]) {
        let mask = qubit.mask();
        let mut next = AmplitudeMap::default();
        for (&basis, &amp) in &self.amplitudes {
            if alpha.abs() > PRUNE_EPSILON {
                next.insert(basis, amp * alpha);
            }
            if beta.abs() > PRUNE_EPSILON {
                next.insert(basis | mask, amp * beta);
            }
        }
        self.amplitudes = next;
    }

    fn hadamard(&mut self, qubit: Qubit) {
        let mask = qubit.mask();
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let mut next = AmplitudeMap::default();
        for (&basis, &amp) in &self.amplitudes {
            let zero = basis & !mask;
            let one = basis | mask;
            let sign = if basis & mask != 0 { -1.0 } else { 1.0 };
            *next.entry(zero).or_insert(0.0) += amp * s;
            *next.entry(one).or_insert(0.0) += sign * amp * s;
        }
        next.retain(|_, amp| amp.abs() > PRUNE_EPSILON);
        self.amplitudes = next;
    }

    fn permute(&mut self, f: impl Fn(u128) -> u128) {
        self.amplitudes = self
            .amplitudes
            .drain()
            .map(|(basis, amp)| (f(basis), amp))
            .collect();
    }
}

/// Measurement outcome histogram
///
/// Keys are bitstrings with classical bit 0 right-most.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Counts {
    counts: BTreeMap<String, u64>,
}

impl Counts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one shot
    pub fn record(&mut self, clbits: &[bool]) {
        *self.counts.entry(bitstring(clbits)).or_insert(0) += 1;
    }

    /// Number of shots with this outcome
    pub fn get(&self, outcome: &str) -> u64 {
        self.counts.get(outcome).copied().unwrap_or(0)
    }

    pub fn contains(&self, outcome: &str) -> bool {
        self.counts.contains_key(outcome)
    }

    /// Total number of shots
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Most frequent outcome (lowest bitstring on ties)
    pub fn most_frequent(&self) -> Option<&str> {
        self.counts
            .iter()
            .fold(None, |best: Option<(&String, u64)>, (k, &v)| match best {
                Some((_, bv)) if bv >= v => best,
                _ => Some((k, v)),
            })
            .map(|(k, _)| k.as_str())
    }

    /// Number of shots in which classical bit `clbit` read `value`
    pub fn bit_count(&self, clbit: usize, value: bool) -> u64 {
        let want = if value { '1' } else { '0' };
        self.counts
            .iter()
            .filter(|(k, _)| {
                k.len() > clbit && k.as_bytes()[k.len() - 1 - clbit] as char == want
            })
            .map(|(_, &v)| v)
            .sum()
    }

    /// Outcomes with their counts, in bitstring order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    fn merge(mut self, other: Counts) -> Counts {
        for (k, v) in other.counts {
            *self.counts.entry(k).or_insert(0) += v;
        }
        self
    }
}

impl fmt::Display for Counts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.counts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{}': {}", k, v)?;
        }
        write!(f, "}}")
    }
}

fn bitstring(clbits: &[bool]) -> String {
    clbits
        .iter()
        .rev()
        .map(|&b| if b { '1' } else { '0' })
        .collect()
}

/// Shot-based circuit simulator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Simulator {
    seed: u64,
}

impl Simulator {
    /// Create a simulator; `None` draws a fresh base seed
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::thread_rng().r#gen());
        Self { seed }
    }

    /// Base seed shared by all shots
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Run `shots` independent executions and histogram the classical bits
    ///
    /// Shots run in parallel. Shot `k` always uses the same RNG stream for a
    /// given base seed, so results are reproducible.
    pub fn run(&self, circuit: &Circuit, shots: u32) -> Result<Counts, SimulationError> {
        if shots == 0 {
            return Err(SimulationError::ZeroShots);
        }

        debug!(
            qubits = circuit.num_qubits(),
            ops = circuit.ops().len(),
            shots,
            seed = self.seed,
            "running simulation"
        );

        let counts = (0..shots)
            .into_par_iter()
            .fold(Counts::new, |mut counts, shot| {
                counts.record(&self.run_shot(circuit, shot));
                counts
            })
            .reduce(Counts::new, Counts::merge);

        debug!(%counts, "simulation finished");
        Ok(counts)
    }

    /// Execute a single shot and return the classical bits
    pub fn run_shot(&self, circuit: &Circuit, shot: u32) -> Vec<bool> {
        let mut rng = StdRng::seed_from_u64(self.seed ^ (shot as u64).wrapping_mul(SHOT_SEED_MIX));
        let (state, clbits) = execute(circuit, &mut rng);
        trace!(shot, basis_states = state.len(), "shot finished");
        clbits
    }
}

/// Run a circuit once, returning the final state and classical bits
pub fn execute<R: Rng>(circuit: &Circuit, rng: &mut R) -> (StateVector, Vec<bool>) {
    let mut state = StateVector::new(circuit.num_qubits());
    let mut clbits = vec![false; circuit.num_clbits() as usize];
    for op in circuit.ops() {
        state.apply(op, &mut clbits, rng);
    }
    (state, clbits)
}

/// Simulation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// At least one shot is required
    #[error("Shot count must be at least 1")]
    ZeroShots,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gate::Clbit;

    fn circuit(qubits: u32, clbits: u32) -> Circuit {
        let mut circuit = Circuit::new();
        circuit.add_qreg("q", qubits).unwrap();
        if clbits > 0 {
            circuit.add_creg("c", clbits).unwrap();
        }
        circuit
    }

    #[test]
    fn test_x_and_measure() {
        let mut c = circuit(2, 2);
        c.x(Qubit(1)).unwrap();
        c.measure(Qubit(0), Clbit(0)).unwrap();
        c.measure(Qubit(1), Clbit(1)).unwrap();

        let counts = Simulator::new(Some(1)).run(&c, 10).unwrap();
        assert_eq!(counts.get("10"), 10);
        assert_eq!(counts.total(), 10);
        assert_eq!(counts.bit_count(1, true), 10);
        assert_eq!(counts.bit_count(0, false), 10);
    }

    #[test]
    fn test_toffoli_truth_table() {
        for (a, b) in [(false, false), (false, true), (true, false), (true, true)] {
            let mut c = circuit(3, 1);
            c.initialize_bit(Qubit(0), a).unwrap();
            c.initialize_bit(Qubit(1), b).unwrap();
            c.ccx(Qubit(0), Qubit(1), Qubit(2)).unwrap();
            c.measure(Qubit(2), Clbit(0)).unwrap();

            let counts = Simulator::new(Some(7)).run(&c, 1).unwrap();
            let expected = if a && b { "1" } else { "0" };
            assert_eq!(counts.get(expected), 1, "a={} b={}", a, b);
        }
    }

    #[test]
    fn test_cx_on_high_qubit() {
        let mut c = circuit(128, 1);
        c.x(Qubit(0)).unwrap();
        c.cx(Qubit(0), Qubit(127)).unwrap();
        c.measure(Qubit(127), Clbit(0)).unwrap();

        let mut rng = StdRng::seed_from_u64(0);
        let (state, clbits) = execute(&c, &mut rng);
        assert_eq!(clbits, vec![true]);
        assert_eq!(state.amplitude(1 | (1u128 << 127)), 1.0);
    }

    #[test]
    fn test_hadamard_twice_is_identity() {
        let mut c = circuit(1, 0);
        c.h(Qubit(0)).unwrap();
        c.h(Qubit(0)).unwrap();

        let mut rng = StdRng::seed_from_u64(0);
        let (state, _) = execute(&c, &mut rng);
        assert_eq!(state.len(), 1);
        assert!((state.amplitude(0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_superposition_statistics() {
        let mut c = circuit(1, 1);
        c.h(Qubit(0)).unwrap();
        c.measure(Qubit(0), Clbit(0)).unwrap();

        let counts = Simulator::new(Some(42)).run(&c, 2000).unwrap();
        let ones = counts.get("1");
        assert_eq!(counts.total(), 2000);
        assert!(ones > 850 && ones < 1150, "ones = {}", ones);
    }

    #[test]
    fn test_measurement_collapses_entangled_pair() {
        let mut c = circuit(2, 2);
        c.h(Qubit(0)).unwrap();
        c.cx(Qubit(0), Qubit(1)).unwrap();
        c.measure(Qubit(0), Clbit(0)).unwrap();
        c.measure(Qubit(1), Clbit(1)).unwrap();

        let counts = Simulator::new(Some(3)).run(&c, 500).unwrap();
        assert_eq!(counts.get("00") + counts.get("11"), 500);
        assert!(!counts.contains("01"));
        assert!(!counts.contains("10"));
    }

    #[test]
    fn test_initialize_resets_qubit() {
        let mut c = circuit(1, 1);
        c.x(Qubit(0)).unwrap();
        c.initialize_bit(Qubit(0), false).unwrap();
        c.measure(Qubit(0), Clbit(0)).unwrap();

        let counts = Simulator::new(Some(5)).run(&c, 20).unwrap();
        assert_eq!(counts.get("0"), 20);
    }

    #[test]
    fn test_initialize_real_amplitudes() {
        let mut c = circuit(1, 0);
        c.initialize(Qubit(0), [0.6, -0.8]).unwrap();

        let mut rng = StdRng::seed_from_u64(0);
        let (state, _) = execute(&c, &mut rng);
        assert!((state.amplitude(0) - 0.6).abs() < 1e-12);
        assert!((state.amplitude(1) + 0.8).abs() < 1e-12);
        assert!((state.probability_of_one(Qubit(0)) - 0.64).abs() < 1e-12);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut c = circuit(3, 3);
        for q in 0..3 {
            c.h(Qubit(q)).unwrap();
            c.measure(Qubit(q), Clbit(q)).unwrap();
        }

        let first = Simulator::new(Some(99)).run(&c, 256).unwrap();
        let second = Simulator::new(Some(99)).run(&c, 256).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_shots_rejected() {
        let c = circuit(1, 1);
        assert_eq!(
            Simulator::new(Some(0)).run(&c, 0),
            Err(SimulationError::ZeroShots)
        );
    }

    #[test]
    fn test_counts_display_and_most_frequent() {
        let mut counts = Counts::new();
        counts.record(&[true]);
        counts.record(&[false]);
        counts.record(&[true]);

        assert_eq!(counts.to_string(), "{'0': 1, '1': 2}");
        assert_eq!(counts.most_frequent(), Some("1"));
        assert_eq!(Counts::new().most_frequent(), None);
    }

    #[test]
    fn test_counts_iter_in_bitstring_order() {
        let mut counts = Counts::new();
        counts.record(&[true, false]);
        counts.record(&[false, false]);
        counts.record(&[true, false]);

        let entries: Vec<(&str, u64)> = counts.iter().collect();
        assert_eq!(entries, vec![("00", 1), ("01", 2)]);
        assert_eq!(Counts::new().iter().count(), 0);
    }
}
