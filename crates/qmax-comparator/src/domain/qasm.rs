//! OpenQASM 2.0 export

use crate::domain::circuit::{Circuit, Register, RegisterKind};
use crate::domain::gate::Op;
use std::fmt;

/// Render a circuit as an OpenQASM 2.0 program
///
/// `initialize` has no qelib1 equivalent; it is emitted as `reset` followed by
/// `x` for |1> or `ry(theta)` for a general real state.
pub fn to_qasm(circuit: &Circuit) -> String {
    Qasm(circuit).to_string()
}

/// OpenQASM 2.0 view of a circuit
pub struct Qasm<'a>(pub &'a Circuit);

impl fmt::Display for Qasm<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let circuit = self.0;
        writeln!(f, "OPENQASM 2.0;")?;
        writeln!(f, "include \"qelib1.inc\";")?;

        for register in circuit.registers() {
            let keyword = match register.kind {
                RegisterKind::Quantum => "qreg",
                RegisterKind::Classical => "creg",
            };
            writeln!(f, "{} {}[{}];", keyword, register.name, register.size)?;
        }

        for op in circuit.ops() {
            write_op(f, circuit.registers(), op)?;
        }

        Ok(())
    }
}

fn write_op(f: &mut fmt::Formatter<'_>, registers: &[Register], op: &Op) -> fmt::Result {
    let q = |index: u32| operand(registers, RegisterKind::Quantum, index);
    match *op {
        Op::Initialize { qubit, amplitudes } => {
            let target = q(qubit.0);
            writeln!(f, "reset {};", target)?;
            let [alpha, beta] = amplitudes;
            if amplitudes == [0.0, 1.0] {
                writeln!(f, "x {};", target)
            } else if amplitudes != [1.0, 0.0] {
                let theta = 2.0 * beta.atan2(alpha);
                writeln!(f, "ry({}) {};", theta, target)
            } else {
                Ok(())
            }
        }
        Op::X(t) => writeln!(f, "x {};", q(t.0)),
        Op::H(t) => writeln!(f, "h {};", q(t.0)),
        Op::Cx { control, target } => writeln!(f, "cx {},{};", q(control.0), q(target.0)),
        Op::Ccx {
            control_1,
            control_2,
            target,
        } => writeln!(
            f,
            "ccx {},{},{};",
            q(control_1.0),
            q(control_2.0),
            q(target.0)
        ),
        Op::Measure { qubit, clbit } => writeln!(
            f,
            "measure {} -> {};",
            q(qubit.0),
            operand(registers, RegisterKind::Classical, clbit.0)
        ),
    }
}

/// `name[k]` for a circuit-wide bit index
fn operand(registers: &[Register], kind: RegisterKind, index: u32) -> String {
    registers
        .iter()
        .filter(|r| r.kind == kind)
        .find(|r| index >= r.offset && index < r.offset + r.size)
        .map(|r| format!("{}[{}]", r.name, index - r.offset))
        .unwrap_or_else(|| format!("?[{}]", index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gate::{Clbit, Qubit};

    #[test]
    fn test_qasm_header_and_registers() {
        let mut circuit = Circuit::new();
        circuit.add_qreg("q", 2).unwrap();
        circuit.add_creg("c", 1).unwrap();

        let qasm = to_qasm(&circuit);
        assert_eq!(
            qasm,
            "OPENQASM 2.0;\ninclude \"qelib1.inc\";\nqreg q[2];\ncreg c[1];\n"
        );
    }

    #[test]
    fn test_qasm_gates() {
        let mut circuit = Circuit::new();
        circuit.add_qreg("a", 1).unwrap();
        circuit.add_qreg("b", 2).unwrap();
        circuit.add_creg("c", 1).unwrap();
        circuit.x(Qubit(0)).unwrap();
        circuit.h(Qubit(1)).unwrap();
        circuit.cx(Qubit(0), Qubit(2)).unwrap();
        circuit.ccx(Qubit(0), Qubit(1), Qubit(2)).unwrap();
        circuit.measure(Qubit(2), Clbit(0)).unwrap();

        let qasm = to_qasm(&circuit);
        let body: Vec<&str> = qasm.lines().skip(5).collect();
        assert_eq!(
            body,
            vec![
                "x a[0];",
                "h b[0];",
                "cx a[0],b[1];",
                "ccx a[0],b[0],b[1];",
                "measure b[1] -> c[0];",
            ]
        );
    }

    #[test]
    fn test_qasm_initialize() {
        let mut circuit = Circuit::new();
        circuit.add_qreg("q", 3).unwrap();
        circuit.initialize_bit(Qubit(0), false).unwrap();
        circuit.initialize_bit(Qubit(1), true).unwrap();
        circuit.initialize(Qubit(2), [0.0, -1.0]).unwrap();

        let qasm = to_qasm(&circuit);
        let body: Vec<&str> = qasm.lines().skip(3).collect();
        assert_eq!(body[0], "reset q[0];");
        assert_eq!(body[1], "reset q[1];");
        assert_eq!(body[2], "x q[1];");
        assert_eq!(body[3], "reset q[2];");
        assert!(body[4].starts_with("ry(-3.14159"), "{}", body[4]);
        assert_eq!(body.len(), 5);
    }

    #[test]
    fn test_display_matches_to_qasm() {
        let mut circuit = Circuit::new();
        circuit.add_qreg("q", 1).unwrap();
        circuit.add_creg("c", 1).unwrap();
        circuit.x(Qubit(0)).unwrap();
        circuit.measure(Qubit(0), Clbit(0)).unwrap();

        let rendered = format!("{}", Qasm(&circuit));
        assert_eq!(rendered, to_qasm(&circuit));
        assert!(rendered.ends_with("x q[0];\nmeasure q[0] -> c[0];\n"));
    }
}
