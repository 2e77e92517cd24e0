//! Circuit model
//!
//! A circuit is a list of named quantum and classical registers plus an
//! ordered list of operations. Qubits and classical bits are numbered
//! contiguously in register order. Every appender validates its operands, so
//! a `Circuit` value is always well-formed.

use crate::constants::{AMPLITUDE_EPSILON, MAX_CLBITS, MAX_QUBITS};
use crate::domain::gate::{Clbit, Op, Qubit};
use std::collections::BTreeMap;
use thiserror::Error;

/// Register kind
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterKind {
    Quantum,
    Classical,
}

/// A named group of qubits or classical bits
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Register {
    pub kind: RegisterKind,
    pub name: String,
    pub size: u32,
    /// Index of the first bit in the circuit-wide numbering
    pub offset: u32,
}

impl Register {
    /// Circuit-wide index of bit `k`, if in range
    pub fn index(&self, k: u32) -> Option<u32> {
        (k < self.size).then_some(self.offset + k)
    }

    /// Qubit `k` of a quantum register
    pub fn qubit(&self, k: u32) -> Option<Qubit> {
        match self.kind {
            RegisterKind::Quantum => self.index(k).map(Qubit),
            RegisterKind::Classical => None,
        }
    }

    /// Classical bit `k` of a classical register
    pub fn clbit(&self, k: u32) -> Option<Clbit> {
        match self.kind {
            RegisterKind::Classical => self.index(k).map(Clbit),
            RegisterKind::Quantum => None,
        }
    }

    fn contains(&self, index: u32) -> bool {
        index >= self.offset && index < self.offset + self.size
    }

    fn label(&self, index: u32) -> String {
        if self.size == 1 {
            self.name.clone()
        } else {
            format!("{}_{}", self.name, index - self.offset)
        }
    }
}

/// Summary statistics of a circuit
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CircuitStats {
    pub num_qubits: u32,
    pub num_clbits: u32,
    /// Total number of operations
    pub size: usize,
    /// Number of layers when every operation waits for its operands
    pub depth: usize,
    /// Operation count by name
    pub gate_counts: BTreeMap<&'static str, usize>,
}

/// Quantum circuit
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Circuit {
    registers: Vec<Register>,
    ops: Vec<Op>,
    num_qubits: u32,
    num_clbits: u32,
}

impl Circuit {
    /// Create an empty circuit
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    pub fn num_clbits(&self) -> u32 {
        self.num_clbits
    }

    /// Registers in the order they were added
    pub fn registers(&self) -> &[Register] {
        &self.registers
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Look up a register by name
    pub fn register(&self, name: &str) -> Option<&Register> {
        self.registers.iter().find(|r| r.name == name)
    }

    /// Add a quantum register of `size` qubits
    pub fn add_qreg(&mut self, name: &str, size: u32) -> Result<Register, CircuitError> {
        self.add_register(RegisterKind::Quantum, name, size)
    }

    /// Add a classical register of `size` bits
    pub fn add_creg(&mut self, name: &str, size: u32) -> Result<Register, CircuitError> {
        self.add_register(RegisterKind::Classical, name, size)
    }

    /// Add a register of either kind
    pub fn add_register(
        &mut self,
        kind: RegisterKind,
        name: &str,
        size: u32,
    ) -> Result<Register, CircuitError> {
        if !is_valid_register_name(name) {
            return Err(CircuitError::InvalidRegisterName(name.to_string()));
        }
        if self.register(name).is_some() {
            return Err(CircuitError::DuplicateRegister(name.to_string()));
        }
        if size == 0 {
            return Err(CircuitError::EmptyRegister(name.to_string()));
        }

        let offset = match kind {
            RegisterKind::Quantum => {
                let total = self.num_qubits as u64 + size as u64;
                if total > MAX_QUBITS as u64 {
                    return Err(CircuitError::TooManyQubits {
                        requested: total,
                        max: MAX_QUBITS,
                    });
                }
                let offset = self.num_qubits;
                self.num_qubits += size;
                offset
            }
            RegisterKind::Classical => {
                let total = self.num_clbits as u64 + size as u64;
                if total > MAX_CLBITS as u64 {
                    return Err(CircuitError::TooManyClbits {
                        requested: total,
                        max: MAX_CLBITS,
                    });
                }
                let offset = self.num_clbits;
                self.num_clbits += size;
                offset
            }
        };

        let register = Register {
            kind,
            name: name.to_string(),
            size,
            offset,
        };
        self.registers.push(register.clone());
        Ok(register)
    }

    /// Append an operation after validating it
    pub fn push(&mut self, op: Op) -> Result<&mut Self, CircuitError> {
        self.validate_op(&op)?;
        self.ops.push(op);
        Ok(self)
    }

    /// Prepare `amplitudes[0]|0> + amplitudes[1]|1>` on a qubit
    pub fn initialize(
        &mut self,
        qubit: Qubit,
        amplitudes: [f64; 2],
    ) -> Result<&mut Self, CircuitError> {
        self.push(Op::Initialize { qubit, amplitudes })
    }

    /// Prepare the basis state |bit> on a qubit
    pub fn initialize_bit(&mut self, qubit: Qubit, bit: bool) -> Result<&mut Self, CircuitError> {
        let amplitudes = if bit { [0.0, 1.0] } else { [1.0, 0.0] };
        self.initialize(qubit, amplitudes)
    }

    pub fn x(&mut self, qubit: Qubit) -> Result<&mut Self, CircuitError> {
        self.push(Op::X(qubit))
    }

    pub fn h(&mut self, qubit: Qubit) -> Result<&mut Self, CircuitError> {
        self.push(Op::H(qubit))
    }

    pub fn cx(&mut self, control: Qubit, target: Qubit) -> Result<&mut Self, CircuitError> {
        self.push(Op::Cx { control, target })
    }

    pub fn ccx(
        &mut self,
        control_1: Qubit,
        control_2: Qubit,
        target: Qubit,
    ) -> Result<&mut Self, CircuitError> {
        self.push(Op::Ccx {
            control_1,
            control_2,
            target,
        })
    }

    pub fn measure(&mut self, qubit: Qubit, clbit: Clbit) -> Result<&mut Self, CircuitError> {
        self.push(Op::Measure { qubit, clbit })
    }

    /// Display label of a qubit (`name` or `name_k`)
    pub fn qubit_label(&self, qubit: Qubit) -> Option<String> {
        self.label(RegisterKind::Quantum, qubit.0)
    }

    /// Display label of a classical bit (`name` or `name_k`)
    pub fn clbit_label(&self, clbit: Clbit) -> Option<String> {
        self.label(RegisterKind::Classical, clbit.0)
    }

    fn label(&self, kind: RegisterKind, index: u32) -> Option<String> {
        self.registers
            .iter()
            .find(|r| r.kind == kind && r.contains(index))
            .map(|r| r.label(index))
    }

    /// Size, depth and per-gate counts
    pub fn stats(&self) -> CircuitStats {
        let mut qubit_layer = vec![0usize; self.num_qubits as usize];
        let mut clbit_layer = vec![0usize; self.num_clbits as usize];
        let mut gate_counts = BTreeMap::new();
        let mut depth = 0;

        for op in &self.ops {
            *gate_counts.entry(op.name()).or_insert(0) += 1;

            let qubits = op.qubits();
            let mut layer = qubits
                .iter()
                .map(|q| qubit_layer[q.0 as usize])
                .max()
                .unwrap_or(0);
            if let Some(c) = op.clbit() {
                layer = layer.max(clbit_layer[c.0 as usize]);
            }

            for q in &qubits {
                qubit_layer[q.0 as usize] = layer + 1;
            }
            if let Some(c) = op.clbit() {
                clbit_layer[c.0 as usize] = layer + 1;
            }
            depth = depth.max(layer + 1);
        }

        CircuitStats {
            num_qubits: self.num_qubits,
            num_clbits: self.num_clbits,
            size: self.ops.len(),
            depth,
            gate_counts,
        }
    }

    fn validate_op(&self, op: &Op) -> Result<(), CircuitError> {
        let qubits = op.qubits();
        for (i, q) in qubits.iter().enumerate() {
            if q.0 >= self.num_qubits {
                return Err(CircuitError::QubitOutOfRange {
                    qubit: q.0,
                    num_qubits: self.num_qubits,
                });
            }
            if qubits[..i].contains(q) {
                return Err(CircuitError::DuplicateQubit {
                    gate: op.name(),
                    qubit: q.0,
                });
            }
        }

        if let Some(c) = op.clbit()
            && c.0 >= self.num_clbits
        {
            return Err(CircuitError::ClbitOutOfRange {
                clbit: c.0,
                num_clbits: self.num_clbits,
            });
        }

        if let Op::Initialize { amplitudes, .. } = op {
            let [alpha, beta] = *amplitudes;
            let norm = alpha * alpha + beta * beta;
            if !alpha.is_finite() || !beta.is_finite() || (norm - 1.0).abs() > AMPLITUDE_EPSILON {
                return Err(CircuitError::InvalidAmplitudes { alpha, beta });
            }
        }

        Ok(())
    }
}

/// Register names follow OpenQASM identifiers: `[a-z][A-Za-z0-9_]*`
fn is_valid_register_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Circuit construction errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CircuitError {
    #[error("Qubit {qubit} out of range (circuit has {num_qubits} qubits)")]
    QubitOutOfRange { qubit: u32, num_qubits: u32 },
    #[error("Classical bit {clbit} out of range (circuit has {num_clbits} bits)")]
    ClbitOutOfRange { clbit: u32, num_clbits: u32 },
    /// The same qubit appears twice in one gate
    #[error("Gate {gate} uses qubit {qubit} more than once")]
    DuplicateQubit { gate: &'static str, qubit: u32 },
    #[error("Register name already in use: {0}")]
    DuplicateRegister(String),
    #[error("Invalid register name: {0:?}")]
    InvalidRegisterName(String),
    #[error("Too many qubits: {requested} requested, at most {max} supported")]
    TooManyQubits { requested: u64, max: u32 },
    #[error("Too many classical bits: {requested} requested, at most {max} supported")]
    TooManyClbits { requested: u64, max: u32 },
    #[error("Register {0} has no bits")]
    EmptyRegister(String),
    /// Initialize amplitudes must be finite and normalized
    #[error("Invalid initialize amplitudes: [{alpha}, {beta}] is not a unit vector")]
    InvalidAmplitudes { alpha: f64, beta: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_qubit_circuit() -> Circuit {
        let mut circuit = Circuit::new();
        circuit.add_qreg("q", 2).unwrap();
        circuit.add_creg("c", 1).unwrap();
        circuit
    }

    #[test]
    fn test_registers_are_contiguous() {
        let mut circuit = Circuit::new();
        let a = circuit.add_qreg("a", 2).unwrap();
        let c = circuit.add_creg("c", 1).unwrap();
        let b = circuit.add_qreg("b", 3).unwrap();

        assert_eq!(a.offset, 0);
        assert_eq!(b.offset, 2);
        assert_eq!(c.offset, 0);
        assert_eq!(circuit.num_qubits(), 5);
        assert_eq!(circuit.num_clbits(), 1);
        assert_eq!(b.qubit(2), Some(Qubit(4)));
        assert_eq!(b.qubit(3), None);
        assert_eq!(b.clbit(0), None);
    }

    #[test]
    fn test_duplicate_register_rejected() {
        let mut circuit = Circuit::new();
        circuit.add_qreg("a", 1).unwrap();
        assert_eq!(
            circuit.add_creg("a", 1),
            Err(CircuitError::DuplicateRegister("a".to_string()))
        );
    }

    #[test]
    fn test_invalid_register_names() {
        let mut circuit = Circuit::new();
        for name in ["", "A", "1a", "a-b", "a b"] {
            assert!(matches!(
                circuit.add_qreg(name, 1),
                Err(CircuitError::InvalidRegisterName(_))
            ));
        }
        assert!(circuit.add_qreg("extra_0", 1).is_ok());
    }

    #[test]
    fn test_qubit_limit() {
        let mut circuit = Circuit::new();
        circuit.add_qreg("a", MAX_QUBITS).unwrap();
        assert!(matches!(
            circuit.add_qreg("b", 1),
            Err(CircuitError::TooManyQubits { .. })
        ));
    }

    #[test]
    fn test_clbit_limit() {
        let mut circuit = Circuit::new();
        circuit.add_creg("c", MAX_CLBITS).unwrap();
        assert_eq!(
            circuit.add_creg("d", 1),
            Err(CircuitError::TooManyClbits {
                requested: MAX_CLBITS as u64 + 1,
                max: MAX_CLBITS
            })
        );

        let mut circuit = Circuit::new();
        assert_eq!(
            circuit.add_creg("c", u32::MAX),
            Err(CircuitError::TooManyClbits {
                requested: u32::MAX as u64,
                max: MAX_CLBITS
            })
        );
        assert_eq!(circuit.num_clbits(), 0);
        assert!(circuit.registers().is_empty());
    }

    #[test]
    fn test_empty_register_rejected() {
        let mut circuit = Circuit::new();
        assert_eq!(
            circuit.add_qreg("q", 0),
            Err(CircuitError::EmptyRegister("q".to_string()))
        );
        assert_eq!(
            circuit.add_creg("c", 0),
            Err(CircuitError::EmptyRegister("c".to_string()))
        );
        assert!(circuit.registers().is_empty());
    }

    #[test]
    fn test_gate_validation() {
        let mut circuit = two_qubit_circuit();

        assert!(circuit.cx(Qubit(0), Qubit(1)).is_ok());
        assert_eq!(
            circuit.cx(Qubit(1), Qubit(1)).err(),
            Some(CircuitError::DuplicateQubit {
                gate: "cx",
                qubit: 1
            })
        );
        assert_eq!(
            circuit.x(Qubit(2)).err(),
            Some(CircuitError::QubitOutOfRange {
                qubit: 2,
                num_qubits: 2
            })
        );
        assert_eq!(
            circuit.measure(Qubit(0), Clbit(1)).err(),
            Some(CircuitError::ClbitOutOfRange {
                clbit: 1,
                num_clbits: 1
            })
        );
        // Rejected operations are not appended
        assert_eq!(circuit.ops().len(), 1);
    }

    #[test]
    fn test_initialize_amplitudes_validation() {
        let mut circuit = two_qubit_circuit();
        let s = std::f64::consts::FRAC_1_SQRT_2;

        assert!(circuit.initialize(Qubit(0), [s, -s]).is_ok());
        assert!(circuit.initialize_bit(Qubit(1), true).is_ok());
        assert!(matches!(
            circuit.initialize(Qubit(0), [1.0, 1.0]),
            Err(CircuitError::InvalidAmplitudes { .. })
        ));
        assert!(matches!(
            circuit.initialize(Qubit(0), [f64::NAN, 0.0]),
            Err(CircuitError::InvalidAmplitudes { .. })
        ));
    }

    #[test]
    fn test_labels() {
        let mut circuit = Circuit::new();
        circuit.add_qreg("a_0", 1).unwrap();
        circuit.add_qreg("q", 2).unwrap();
        circuit.add_creg("c", 1).unwrap();

        assert_eq!(circuit.qubit_label(Qubit(0)).as_deref(), Some("a_0"));
        assert_eq!(circuit.qubit_label(Qubit(2)).as_deref(), Some("q_1"));
        assert_eq!(circuit.qubit_label(Qubit(3)), None);
        assert_eq!(circuit.clbit_label(Clbit(0)).as_deref(), Some("c"));
    }

    #[test]
    fn test_stats_depth_and_counts() {
        let mut circuit = Circuit::new();
        circuit.add_qreg("q", 3).unwrap();
        circuit.add_creg("c", 1).unwrap();
        circuit.x(Qubit(0)).unwrap();
        circuit.x(Qubit(1)).unwrap();
        circuit.ccx(Qubit(0), Qubit(1), Qubit(2)).unwrap();
        circuit.x(Qubit(0)).unwrap();
        circuit.measure(Qubit(2), Clbit(0)).unwrap();

        let stats = circuit.stats();
        assert_eq!(stats.size, 5);
        // x,x in parallel | ccx | x and measure in parallel
        assert_eq!(stats.depth, 3);
        assert_eq!(stats.gate_counts.get("x"), Some(&3));
        assert_eq!(stats.gate_counts.get("ccx"), Some(&1));
        assert_eq!(stats.gate_counts.get("measure"), Some(&1));
    }

    #[test]
    fn test_empty_circuit_stats() {
        let stats = Circuit::new().stats();
        assert_eq!(stats.size, 0);
        assert_eq!(stats.depth, 0);
        assert!(stats.gate_counts.is_empty());
    }
}
