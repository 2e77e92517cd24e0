//! Comparator related constants

// =============================================================================
// Register limits
// =============================================================================

/// Maximum number of qubits in a circuit (one `u128` basis index)
pub const MAX_QUBITS: u32 = 128;

/// Maximum number of classical bits in a circuit
pub const MAX_CLBITS: u32 = MAX_QUBITS;

/// Number of qubits used per encoded bit (a_i, b_i, extra_i)
pub const QUBITS_PER_BIT: u32 = 3;

/// Smallest supported operand width (sign bit only)
pub const MIN_WIDTH: u32 = 1;

/// Largest supported operand width (42 * 3 = 126 qubits)
pub const MAX_WIDTH: u32 = MAX_QUBITS / QUBITS_PER_BIT;

/// Default operand width (signed 32-bit integers)
pub const DEFAULT_WIDTH: u32 = 32;

/// Largest width accepted by exhaustive verification (2^20 pairs)
pub const MAX_EXHAUSTIVE_WIDTH: u32 = 10;

// =============================================================================
// Simulation parameters
// =============================================================================

/// Default number of shots
///
/// Gates are ideal and the measured qubit always ends in a basis state,
/// so a single shot is enough.
pub const DEFAULT_SHOTS: u32 = 1;

/// Tolerance for amplitude normalization checks
pub const AMPLITUDE_EPSILON: f64 = 1e-9;

/// Amplitudes below this magnitude are dropped from the state vector
pub const PRUNE_EPSILON: f64 = 1e-12;

// =============================================================================
// File format
// =============================================================================

/// Magic number for circuit files
pub const CIRCUIT_MAGIC: [u8; 8] = *b"QMAXCIRC";

/// Circuit file format version
pub const FILE_FORMAT_VERSION: u16 = 1;

/// Byte size of the circuit file header
pub const FILE_HEADER_SIZE: usize = 32;

/// Byte size of one serialized operation
pub const OP_ENTRY_SIZE: usize = 32;
