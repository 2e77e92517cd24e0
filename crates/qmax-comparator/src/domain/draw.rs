//! Text drawing of circuits
//!
//! One row per qubit followed by one row per classical bit. Operations are
//! packed left to right into layers; an operation occupies every row its
//! vertical connector crosses, so connectors never overlap.
//!
//! ```text
//! a_0: --|1>--[X]---*----*--
//!                   |    |
//! b_0: --|0>-------(+)---|--
//! ```

use crate::domain::circuit::Circuit;
use crate::domain::gate::{Clbit, Op, Qubit};

const QUBIT_WIRE: char = '-';
const CLBIT_WIRE: char = '=';
const EMPTY_GAP: &str = "   ";

/// Symbol placed in one row of a layer, tagged with its operation
#[derive(Clone, Copy)]
struct Cell {
    op: usize,
    symbol: &'static str,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum RowKind {
    Qubit,
    Clbit,
}

/// Render a circuit as text
pub fn draw(circuit: &Circuit) -> String {
    let num_qubits = circuit.num_qubits() as usize;
    let num_rows = num_qubits + circuit.num_clbits() as usize;
    if num_rows == 0 {
        return String::new();
    }

    let row_kind = |row: usize| {
        if row < num_qubits {
            RowKind::Qubit
        } else {
            RowKind::Clbit
        }
    };

    let mut next_free = vec![0usize; num_rows];
    let mut layers: Vec<Vec<Option<Cell>>> = Vec::new();

    for (index, op) in circuit.ops().iter().enumerate() {
        let (lo, hi) = span(op, num_qubits);
        let layer = next_free[lo..=hi].iter().copied().max().unwrap_or(0);
        if layer == layers.len() {
            layers.push(vec![None; num_rows]);
        }

        let column = &mut layers[layer];
        for (row, cell) in column.iter_mut().enumerate().take(hi + 1).skip(lo) {
            let symbol = match row_kind(row) {
                RowKind::Qubit => "-|-",
                RowKind::Clbit => "=|=",
            };
            *cell = Some(Cell { op: index, symbol });
        }
        for (row, symbol) in symbols(op, num_qubits) {
            column[row] = Some(Cell { op: index, symbol });
        }
        for free in &mut next_free[lo..=hi] {
            *free = layer + 1;
        }
    }

    let labels: Vec<String> = (0..num_rows)
        .map(|row| match row_kind(row) {
            RowKind::Qubit => circuit
                .qubit_label(Qubit(row as u32))
                .unwrap_or_else(|| format!("q_{}", row)),
            RowKind::Clbit => circuit
                .clbit_label(Clbit((row - num_qubits) as u32))
                .unwrap_or_else(|| format!("c_{}", row - num_qubits)),
        })
        .collect();
    let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut lines = Vec::with_capacity(num_rows * 2);
    for row in 0..num_rows {
        let wire = match row_kind(row) {
            RowKind::Qubit => QUBIT_WIRE,
            RowKind::Clbit => CLBIT_WIRE,
        };

        let mut line = format!("{:>width$}: {}", labels[row], wire, width = label_width);
        let mut gap = " ".repeat(label_width + 3);
        for column in &layers {
            match column[row] {
                Some(cell) => {
                    line.push(wire);
                    line.push_str(cell.symbol);
                }
                None => line.extend(std::iter::repeat_n(wire, 4)),
            }
            line.push(wire);

            // Connector continues into the spacer line below
            let below = column.get(row + 1).copied().flatten();
            let crosses = matches!((column[row], below), (Some(a), Some(b)) if a.op == b.op);
            gap.push(' ');
            gap.push_str(if crosses { " | " } else { EMPTY_GAP });
            gap.push(' ');
        }
        lines.push(line);
        if row + 1 < num_rows {
            lines.push(gap.trim_end().to_string());
        }
    }

    lines.join("\n")
}

/// First and last row an operation occupies
fn span(op: &Op, num_qubits: usize) -> (usize, usize) {
    let qubits = op.qubits();
    let lo = qubits.iter().map(|q| q.0 as usize).min().unwrap_or(0);
    let hi = match op.clbit() {
        Some(c) => num_qubits + c.0 as usize,
        None => qubits.iter().map(|q| q.0 as usize).max().unwrap_or(0),
    };
    (lo, hi)
}

/// Rows that carry a gate symbol rather than a plain connector
fn symbols(op: &Op, num_qubits: usize) -> Vec<(usize, &'static str)> {
    match *op {
        Op::Initialize { qubit, amplitudes } => {
            let symbol = if amplitudes == [1.0, 0.0] {
                "|0>"
            } else if amplitudes == [0.0, 1.0] {
                "|1>"
            } else {
                "|ψ>"
            };
            vec![(qubit.0 as usize, symbol)]
        }
        Op::X(q) => vec![(q.0 as usize, "[X]")],
        Op::H(q) => vec![(q.0 as usize, "[H]")],
        Op::Cx { control, target } => {
            vec![(control.0 as usize, "-*-"), (target.0 as usize, "(+)")]
        }
        Op::Ccx {
            control_1,
            control_2,
            target,
        } => vec![
            (control_1.0 as usize, "-*-"),
            (control_2.0 as usize, "-*-"),
            (target.0 as usize, "(+)"),
        ],
        Op::Measure { qubit, clbit } => vec![
            (qubit.0 as usize, "[M]"),
            (num_qubits + clbit.0 as usize, "=v="),
        ],
    }
}
