//! Bit-serial comparator construction
//!
//! Each encoded bit pair `i` (most significant first) gets a qubit triple
//! `a_i = 3i`, `b_i = 3i + 1`, `extra_i = 3i + 2`:
//!
//! 1. `U_<`: `X a_i; CCX(a_i, b_i -> extra_i); CX(a_i -> b_i)` leaves
//!    `extra_i = !a & b`, `b_i = (a == b)` and `a_i = !a`.
//! 2. For `i > 0`, `CCX(prefix_eq, extra_i -> extra_0)` adds "all higher bits
//!    equal and `a < b` here" into the result qubit `extra_0`.
//! 3. For `0 < i < last`, `U_0` (`X b_i; CCX(a_i, b_i -> extra_i); X b_i`)
//!    clears `extra_i`, which is then reused to hold the running prefix
//!    equality `prefix_eq & b_i`.
//!
//! The prefix equality of triple 0 lives in `b_0`, so triple 1 reads it from
//! there; later triples read it from `extra_{i-1}`. At most one term of the
//! XOR chain is 1, so `extra_0` ends as `number_1 < number_2`.

use crate::domain::circuit::{Circuit, CircuitError};
use crate::domain::encoding::BitPair;
use crate::domain::gate::{Clbit, Qubit};
use tracing::debug;

/// A built comparator and where its answer lands
#[derive(Clone, Debug, PartialEq)]
pub struct ComparatorCircuit {
    pub circuit: Circuit,
    /// Encoded operand bits, most significant first
    pub bits: Vec<BitPair>,
    /// Qubit holding `number_1 < number_2`
    pub result_qubit: Qubit,
    /// Classical bit the result qubit is measured into
    pub result_clbit: Clbit,
}

/// Qubit indices of one triple
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Triple {
    a: Qubit,
    b: Qubit,
    extra: Qubit,
}

/// Build the comparator circuit for already encoded bits
///
/// Encoded operands always contain the sign pair. An empty slice yields a
/// circuit with no qubits and no measurement.
pub fn build_comparator(bits: &[BitPair]) -> Result<ComparatorCircuit, CircuitError> {
    let mut circuit = Circuit::new();
    let result = circuit.add_creg("c", 1)?;
    let result_clbit = Clbit(result.offset);

    let mut triples: Vec<Triple> = Vec::with_capacity(bits.len());

    for (i, pair) in bits.iter().enumerate() {
        let triple = add_triple(&mut circuit, i)?;

        circuit.initialize_bit(triple.a, pair.a)?;
        circuit.initialize_bit(triple.b, pair.b)?;
        circuit.initialize_bit(triple.extra, false)?;

        // U_<
        circuit.x(triple.a)?;
        circuit.ccx(triple.a, triple.b, triple.extra)?;
        circuit.cx(triple.a, triple.b)?;

        if i > 0 {
            let prefix_eq = if i == 1 { triples[0].b } else { triples[i - 1].extra };
            circuit.ccx(prefix_eq, triple.extra, triples[0].extra)?;

            // U_0 and prefix update, skipped for the last bit
            if i + 1 < bits.len() {
                circuit.x(triple.b)?;
                circuit.ccx(triple.a, triple.b, triple.extra)?;
                circuit.x(triple.b)?;

                circuit.ccx(prefix_eq, triple.b, triple.extra)?;
            }
        }

        triples.push(triple);
    }

    let result_qubit = match triples.first() {
        Some(first) => {
            circuit.measure(first.extra, result_clbit)?;
            first.extra
        }
        None => Qubit(0),
    };

    debug!(
        bits = bits.len(),
        qubits = circuit.num_qubits(),
        ops = circuit.ops().len(),
        "built comparator circuit"
    );

    Ok(ComparatorCircuit {
        circuit,
        bits: bits.to_vec(),
        result_qubit,
        result_clbit,
    })
}

fn add_triple(circuit: &mut Circuit, i: usize) -> Result<Triple, CircuitError> {
    let a = circuit.add_qreg(&format!("a_{}", i), 1)?;
    let b = circuit.add_qreg(&format!("b_{}", i), 1)?;
    let extra = circuit.add_qreg(&format!("extra_{}", i), 1)?;
    Ok(Triple {
        a: Qubit(a.offset),
        b: Qubit(b.offset),
        extra: Qubit(extra.offset),
    })
}
