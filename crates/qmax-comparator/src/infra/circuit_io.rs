//! Circuit file I/O operations
//!
//! This module provides functions for reading and writing circuit files.

use crate::constants::{FILE_HEADER_SIZE, OP_ENTRY_SIZE};
use crate::domain::circuit::Circuit;
use crate::domain::circuit_format::{
    CircuitFormatError, CircuitHeader, decode_op, encode_op, register_kind_from_u8,
    register_kind_to_u8,
};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

/// Write a circuit to any writer
pub fn write_circuit<W: Write>(writer: &mut W, circuit: &Circuit) -> io::Result<()> {
    let header = CircuitHeader::for_circuit(circuit);
    writer.write_all(&header.to_bytes())?;

    for register in circuit.registers() {
        let name = register.name.as_bytes();
        let name_len = u16::try_from(name.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "register name too long"))?;
        writer.write_u8(register_kind_to_u8(register.kind))?;
        writer.write_u32::<LittleEndian>(register.size)?;
        writer.write_u16::<LittleEndian>(name_len)?;
        writer.write_all(name)?;
    }

    for op in circuit.ops() {
        writer.write_all(&encode_op(op))?;
    }

    Ok(())
}

/// Read a circuit from any reader
///
/// The circuit is rebuilt through the validating appenders, so a file that
/// decodes successfully always yields a well-formed circuit.
pub fn read_circuit<R: Read>(reader: &mut R) -> Result<Circuit, CircuitFormatError> {
    let mut header_buf = [0u8; FILE_HEADER_SIZE];
    reader.read_exact(&mut header_buf)?;
    let header = CircuitHeader::from_bytes(&header_buf)?;

    let mut circuit = Circuit::new();

    for _ in 0..header.num_registers {
        let kind = register_kind_from_u8(reader.read_u8()?)?;
        let size = reader.read_u32::<LittleEndian>()?;
        let name_len = reader.read_u16::<LittleEndian>()? as usize;
        let mut name = vec![0u8; name_len];
        reader.read_exact(&mut name)?;
        let name = String::from_utf8(name).map_err(|_| CircuitFormatError::InvalidRegisterName)?;
        circuit.add_register(kind, &name, size)?;
    }

    for _ in 0..header.num_ops {
        let mut op_buf = [0u8; OP_ENTRY_SIZE];
        reader.read_exact(&mut op_buf)?;
        circuit.push(decode_op(&op_buf)?)?;
    }

    let mut rest = [0u8; 1];
    if reader.read(&mut rest)? != 0 {
        return Err(CircuitFormatError::TrailingData);
    }

    header.verify(&circuit)?;
    Ok(circuit)
}

/// Save circuit to file
pub fn save_circuit(path: impl AsRef<Path>, circuit: &Circuit) -> io::Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_circuit(&mut writer, circuit)?;
    writer.flush()?;

    debug!(
        path = %path.display(),
        qubits = circuit.num_qubits(),
        ops = circuit.ops().len(),
        "saved circuit"
    );
    Ok(())
}

/// Load circuit from file
pub fn load_circuit(path: impl AsRef<Path>) -> Result<Circuit, CircuitFormatError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let circuit = read_circuit(&mut reader)?;

    debug!(
        path = %path.display(),
        qubits = circuit.num_qubits(),
        ops = circuit.ops().len(),
        "loaded circuit"
    );
    Ok(circuit)
}

/// Default file name for the comparator circuit of a pair
pub fn get_circuit_path(number_1: i64, number_2: i64) -> String {
    format!("cmp_{}_{}.qcirc", number_1, number_2)
}
