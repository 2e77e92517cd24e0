//! Gate and operation definitions

use std::fmt;

/// Index of a qubit within a circuit
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Qubit(pub u32);

/// Index of a classical bit within a circuit
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Clbit(pub u32);

impl Qubit {
    /// Bit mask of this qubit in a basis index
    #[inline]
    pub fn mask(self) -> u128 {
        1u128 << self.0
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl fmt::Display for Clbit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// A circuit operation
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Op {
    /// Reset a qubit to |0> and prepare `amplitudes[0]|0> + amplitudes[1]|1>`
    Initialize { qubit: Qubit, amplitudes: [f64; 2] },
    /// Pauli-X (NOT)
    X(Qubit),
    /// Hadamard
    H(Qubit),
    /// Controlled-NOT
    Cx { control: Qubit, target: Qubit },
    /// Toffoli (controlled-controlled-NOT)
    Ccx {
        control_1: Qubit,
        control_2: Qubit,
        target: Qubit,
    },
    /// Measure a qubit in the computational basis into a classical bit
    Measure { qubit: Qubit, clbit: Clbit },
}

// Opcodes used by the binary circuit format
const OP_INITIALIZE: u8 = 1;
const OP_X: u8 = 2;
const OP_H: u8 = 3;
const OP_CX: u8 = 4;
const OP_CCX: u8 = 5;
const OP_MEASURE: u8 = 6;

impl Op {
    /// Lowercase gate name (also the OpenQASM mnemonic where one exists)
    pub fn name(&self) -> &'static str {
        match self {
            Op::Initialize { .. } => "initialize",
            Op::X(_) => "x",
            Op::H(_) => "h",
            Op::Cx { .. } => "cx",
            Op::Ccx { .. } => "ccx",
            Op::Measure { .. } => "measure",
        }
    }

    /// Qubits touched by this operation, controls first
    pub fn qubits(&self) -> Vec<Qubit> {
        match *self {
            Op::Initialize { qubit, .. } | Op::X(qubit) | Op::H(qubit) => vec![qubit],
            Op::Cx { control, target } => vec![control, target],
            Op::Ccx {
                control_1,
                control_2,
                target,
            } => vec![control_1, control_2, target],
            Op::Measure { qubit, .. } => vec![qubit],
        }
    }

    /// Classical bit written by this operation
    pub fn clbit(&self) -> Option<Clbit> {
        match *self {
            Op::Measure { clbit, .. } => Some(clbit),
            _ => None,
        }
    }

    /// True for reversible gates (everything except initialize and measure)
    pub fn is_unitary(&self) -> bool {
        !matches!(self, Op::Initialize { .. } | Op::Measure { .. })
    }

    /// Binary format opcode
    pub fn opcode(&self) -> u8 {
        match self {
            Op::Initialize { .. } => OP_INITIALIZE,
            Op::X(_) => OP_X,
            Op::H(_) => OP_H,
            Op::Cx { .. } => OP_CX,
            Op::Ccx { .. } => OP_CCX,
            Op::Measure { .. } => OP_MEASURE,
        }
    }

    /// Raw operands for the binary format: three indices and two amplitudes
    pub fn to_raw(&self) -> ([u32; 3], [f64; 2]) {
        match *self {
            Op::Initialize { qubit, amplitudes } => ([qubit.0, 0, 0], amplitudes),
            Op::X(q) | Op::H(q) => ([q.0, 0, 0], [0.0; 2]),
            Op::Cx { control, target } => ([control.0, target.0, 0], [0.0; 2]),
            Op::Ccx {
                control_1,
                control_2,
                target,
            } => ([control_1.0, control_2.0, target.0], [0.0; 2]),
            Op::Measure { qubit, clbit } => ([qubit.0, clbit.0, 0], [0.0; 2]),
        }
    }

    /// Rebuild an operation from its binary form
    ///
    /// Returns `None` for an unknown opcode.
    pub fn from_raw(opcode: u8, args: [u32; 3], amplitudes: [f64; 2]) -> Option<Self> {
        let op = match opcode {
            OP_INITIALIZE => Op::Initialize {
                qubit: Qubit(args[0]),
                amplitudes,
            },
            OP_X => Op::X(Qubit(args[0])),
            OP_H => Op::H(Qubit(args[0])),
            OP_CX => Op::Cx {
                control: Qubit(args[0]),
                target: Qubit(args[1]),
            },
            OP_CCX => Op::Ccx {
                control_1: Qubit(args[0]),
                control_2: Qubit(args[1]),
                target: Qubit(args[2]),
            },
            OP_MEASURE => Op::Measure {
                qubit: Qubit(args[0]),
                clbit: Clbit(args[1]),
            },
            _ => return None,
        };
        Some(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_qubits_order() {
        let op = Op::Ccx {
            control_1: Qubit(0),
            control_2: Qubit(4),
            target: Qubit(2),
        };
        assert_eq!(op.qubits(), vec![Qubit(0), Qubit(4), Qubit(2)]);
        assert_eq!(op.name(), "ccx");
        assert!(op.is_unitary());
    }

    #[test]
    fn test_measure_is_not_unitary() {
        let op = Op::Measure {
            qubit: Qubit(2),
            clbit: Clbit(0),
        };
        assert!(!op.is_unitary());
        assert_eq!(op.clbit(), Some(Clbit(0)));
    }

    #[test]
    fn test_from_raw_unknown_opcode() {
        assert_eq!(Op::from_raw(0, [0; 3], [0.0; 2]), None);
        assert_eq!(Op::from_raw(0xFF, [0; 3], [0.0; 2]), None);
    }

    #[test]
    fn test_raw_keeps_operand_order() {
        let op = Op::Cx {
            control: Qubit(7),
            target: Qubit(3),
        };
        let (args, amps) = op.to_raw();
        assert_eq!(args, [7, 3, 0]);
        assert_eq!(Op::from_raw(op.opcode(), args, amps), Some(op));
    }

    #[test]
    fn test_qubit_mask() {
        assert_eq!(Qubit(0).mask(), 1);
        assert_eq!(Qubit(127).mask(), 1u128 << 127);
    }
}
