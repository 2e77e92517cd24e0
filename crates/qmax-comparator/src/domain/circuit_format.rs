//! Circuit file format definitions
//!
//! This module defines the binary format for saved circuits: a fixed-size
//! header, one variable-length record per register, then one fixed-size
//! record per operation. All integers are little-endian.

use crate::constants::{CIRCUIT_MAGIC, FILE_FORMAT_VERSION, FILE_HEADER_SIZE, OP_ENTRY_SIZE};
use crate::domain::circuit::{Circuit, CircuitError, RegisterKind};
use crate::domain::gate::Op;
use thiserror::Error;

const REGISTER_KIND_QUANTUM: u8 = 0;
const REGISTER_KIND_CLASSICAL: u8 = 1;

/// Circuit file header
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CircuitHeader {
    /// File format version
    pub version: u16,
    /// Total qubits over all quantum registers
    pub num_qubits: u32,
    /// Total bits over all classical registers
    pub num_clbits: u32,
    /// Number of register records
    pub num_registers: u32,
    /// Number of operation records
    pub num_ops: u32,
}

impl CircuitHeader {
    /// Describe an existing circuit
    pub fn for_circuit(circuit: &Circuit) -> Self {
        Self {
            version: FILE_FORMAT_VERSION,
            num_qubits: circuit.num_qubits(),
            num_clbits: circuit.num_clbits(),
            num_registers: circuit.registers().len() as u32,
            num_ops: circuit.ops().len() as u32,
        }
    }

    /// Serialize header to bytes (32 bytes)
    pub fn to_bytes(&self) -> [u8; FILE_HEADER_SIZE] {
        let mut buf = [0u8; FILE_HEADER_SIZE];

        buf[0..8].copy_from_slice(&CIRCUIT_MAGIC);
        buf[8..10].copy_from_slice(&self.version.to_le_bytes());
        // 10..12 reserved
        buf[12..16].copy_from_slice(&self.num_qubits.to_le_bytes());
        buf[16..20].copy_from_slice(&self.num_clbits.to_le_bytes());
        buf[20..24].copy_from_slice(&self.num_registers.to_le_bytes());
        buf[24..28].copy_from_slice(&self.num_ops.to_le_bytes());
        // 28..32 reserved

        buf
    }

    /// Deserialize header from bytes
    pub fn from_bytes(buf: &[u8; FILE_HEADER_SIZE]) -> Result<Self, CircuitFormatError> {
        if buf[0..8] != CIRCUIT_MAGIC {
            return Err(CircuitFormatError::InvalidMagic);
        }

        let version = u16::from_le_bytes([buf[8], buf[9]]);
        if version != FILE_FORMAT_VERSION {
            return Err(CircuitFormatError::UnsupportedVersion(version));
        }

        Ok(Self {
            version,
            num_qubits: u32::from_le_bytes([buf[12], buf[13], buf[14], buf[15]]),
            num_clbits: u32::from_le_bytes([buf[16], buf[17], buf[18], buf[19]]),
            num_registers: u32::from_le_bytes([buf[20], buf[21], buf[22], buf[23]]),
            num_ops: u32::from_le_bytes([buf[24], buf[25], buf[26], buf[27]]),
        })
    }

    /// Check a rebuilt circuit against the counts recorded in the header
    pub fn verify(&self, circuit: &Circuit) -> Result<(), CircuitFormatError> {
        let found = Self::for_circuit(circuit);
        let checks = [
            ("qubits", self.num_qubits, found.num_qubits),
            ("classical bits", self.num_clbits, found.num_clbits),
        ];
        for (field, expected, found) in checks {
            if expected != found {
                return Err(CircuitFormatError::HeaderMismatch {
                    field,
                    expected,
                    found,
                });
            }
        }
        Ok(())
    }
}

/// Register kind tag
pub fn register_kind_to_u8(kind: RegisterKind) -> u8 {
    match kind {
        RegisterKind::Quantum => REGISTER_KIND_QUANTUM,
        RegisterKind::Classical => REGISTER_KIND_CLASSICAL,
    }
}

/// Parse a register kind tag
pub fn register_kind_from_u8(tag: u8) -> Result<RegisterKind, CircuitFormatError> {
    match tag {
        REGISTER_KIND_QUANTUM => Ok(RegisterKind::Quantum),
        REGISTER_KIND_CLASSICAL => Ok(RegisterKind::Classical),
        other => Err(CircuitFormatError::UnknownRegisterKind(other)),
    }
}

/// Serialize one operation (32 bytes)
///
/// Layout: opcode, 3 reserved bytes, three u32 operands, two f64 amplitudes.
pub fn encode_op(op: &Op) -> [u8; OP_ENTRY_SIZE] {
    let mut buf = [0u8; OP_ENTRY_SIZE];
    let (args, amplitudes) = op.to_raw();

    buf[0] = op.opcode();
    // 1..4 reserved
    buf[4..8].copy_from_slice(&args[0].to_le_bytes());
    buf[8..12].copy_from_slice(&args[1].to_le_bytes());
    buf[12..16].copy_from_slice(&args[2].to_le_bytes());
    buf[16..24].copy_from_slice(&amplitudes[0].to_le_bytes());
    buf[24..32].copy_from_slice(&amplitudes[1].to_le_bytes());

    buf
}

/// Deserialize one operation
pub fn decode_op(buf: &[u8; OP_ENTRY_SIZE]) -> Result<Op, CircuitFormatError> {
    let u32_at = |i: usize| u32::from_le_bytes([buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]);
    let f64_at = |i: usize| {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&buf[i..i + 8]);
        f64::from_le_bytes(bytes)
    };

    let args = [u32_at(4), u32_at(8), u32_at(12)];
    let amplitudes = [f64_at(16), f64_at(24)];
    Op::from_raw(buf[0], args, amplitudes).ok_or(CircuitFormatError::UnknownOpcode(buf[0]))
}

/// Circuit format errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CircuitFormatError {
    /// Invalid magic number (not a circuit file)
    #[error("Invalid file format: not a valid circuit file")]
    InvalidMagic,
    /// Unsupported format version
    #[error("Unsupported format version: {0}")]
    UnsupportedVersion(u16),
    /// Operation record with an unknown opcode
    #[error("Unknown opcode: {0}")]
    UnknownOpcode(u8),
    /// Register record with an unknown kind tag
    #[error("Unknown register kind: {0}")]
    UnknownRegisterKind(u8),
    /// Register name is not valid UTF-8
    #[error("Register name is not valid UTF-8")]
    InvalidRegisterName,
    /// Rebuilt circuit disagrees with the header
    #[error("Header mismatch: {field} expected {expected}, found {found}")]
    HeaderMismatch {
        field: &'static str,
        expected: u32,
        found: u32,
    },
    /// Bytes left after the last operation record
    #[error("Unexpected data after the last operation")]
    TrailingData,
    /// A stored register or operation is invalid
    #[error("Invalid circuit: {0}")]
    Circuit(#[from] CircuitError),
    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for CircuitFormatError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
