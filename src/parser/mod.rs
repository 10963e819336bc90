//! OpenQASM 2.0 front-end producing labelled circuits.
//!
//! Every gate, measurement and reset becomes one [`Gate`](crate::ir::Gate),
//! labelled `g{k}` by its position in the program. Parameters are skipped and
//! barriers are ignored.

pub mod ast;
pub mod rules;

use self::ast::{Argument, ParsedStatement};
use self::rules::{
    barrier, comment, creg, gate_call, gate_def, include, measure, openqasm_version, qreg, reset,
};
use crate::error::{ResizeError, ResizeResult};
use crate::ir::{Circuit, GateType};
use nom::{branch::alt, character::complete::multispace0};
use std::collections::HashMap;
use tracing::debug;

/// Longest input excerpt quoted in a parse error.
const ERROR_CONTEXT: usize = 40;

fn parse_error(input: &str) -> ResizeError {
    let excerpt: String = input.chars().take(ERROR_CONTEXT).collect();
    ResizeError::Parse(format!("at: {}", excerpt.trim_end()))
}

/// Skips whitespace and comments.
fn skip_trivia(mut input: &str) -> &str {
    loop {
        let (rem, _) = multispace0::<&str, nom::error::Error<&str>>(input).unwrap_or((input, ""));
        input = rem;
        match comment(input) {
            Ok((rem, _)) => input = rem,
            Err(_) => return input,
        }
    }
}

fn parse_statements(input: &str) -> ResizeResult<Vec<ParsedStatement>> {
    let mut current_input = skip_trivia(input);
    if current_input.is_empty() {
        return Err(ResizeError::Parse(
            "empty file or missing OPENQASM header".to_string(),
        ));
    }

    let (rem, version) = openqasm_version(current_input).map_err(|_| {
        ResizeError::Parse(
            "missing or invalid OPENQASM header, file must start with 'OPENQASM 2.0;'".to_string(),
        )
    })?;
    if version != "2.0" {
        return Err(ResizeError::Parse(format!(
            "unsupported OpenQASM version '{version}', only '2.0' is supported"
        )));
    }
    current_input = rem;

    let mut statements = Vec::new();
    loop {
        current_input = skip_trivia(current_input);
        if current_input.is_empty() {
            return Ok(statements);
        }
        let (rem, stmt) = alt((
            include, qreg, creg, measure, reset, barrier, gate_def, gate_call,
        ))(current_input)
        .map_err(|_| parse_error(current_input))?;
        statements.push(stmt);
        current_input = rem;
    }
}

/// Quantum registers, flattened into one index space.
#[derive(Default)]
struct Registers {
    qregs: HashMap<String, (usize, usize)>, // name -> (start_index, size)
    num_qubits: usize,
}

impl Registers {
    fn declare(&mut self, name: &str, size: usize) -> ResizeResult<()> {
        if self.qregs.contains_key(name) {
            return Err(ResizeError::Parse(format!("register '{name}' declared twice")));
        }
        self.qregs.insert(name.to_string(), (self.num_qubits, size));
        self.num_qubits += size;
        Ok(())
    }

    /// Resolves an argument to one qubit, or every qubit of a register.
    fn resolve(&self, (name, idx): &Argument) -> ResizeResult<Vec<usize>> {
        let &(start, size) = self
            .qregs
            .get(name)
            .ok_or_else(|| ResizeError::UndefinedRegister(name.clone()))?;
        match idx {
            Some(i) if *i < size => Ok(vec![start + i]),
            Some(i) => Err(ResizeError::QubitOutOfRange {
                qubit: *i,
                num_qubits: size,
            }),
            None => Ok((start..start + size).collect()),
        }
    }

    /// Expands register broadcasting into one operand list per gate.
    fn broadcast(&self, args: &[Argument]) -> ResizeResult<Vec<Vec<usize>>> {
        let resolved = args
            .iter()
            .map(|arg| self.resolve(arg))
            .collect::<ResizeResult<Vec<_>>>()?;
        let width = resolved.iter().map(Vec::len).max().unwrap_or(0);
        if resolved.iter().any(|r| r.len() != 1 && r.len() != width) {
            return Err(ResizeError::Parse(
                "register size mismatch in gate call".to_string(),
            ));
        }
        Ok((0..width)
            .map(|i| {
                resolved
                    .iter()
                    .map(|r| if r.len() == 1 { r[0] } else { r[i] })
                    .collect()
            })
            .collect())
    }
}

/// Parses an OpenQASM 2.0 program into a labelled circuit.
pub fn parse_qasm(input: &str) -> ResizeResult<Circuit> {
    let statements = parse_statements(input)?;

    let mut registers = Registers::default();
    for stmt in statements.iter().filter(|s| s.is_declaration()) {
        if let ParsedStatement::QReg(name, size) = stmt {
            registers.declare(name, *size)?;
        }
    }

    let mut circuit = Circuit::new(registers.num_qubits);
    for stmt in statements {
        match stmt {
            ParsedStatement::QReg(..) | ParsedStatement::CReg(..) => {}
            ParsedStatement::Include(file) => debug!("Ignoring include \"{}\"", file),
            ParsedStatement::Barrier(_) => {}
            ParsedStatement::GateDef(name) => {
                return Err(ResizeError::Parse(format!(
                    "gate definitions are not supported, found '{name}'"
                )));
            }
            ParsedStatement::Gate(name, args) => {
                let gate_type = GateType::from_name(&name);
                for qubits in registers.broadcast(&args)? {
                    circuit.append(gate_type.clone(), qubits)?;
                }
            }
            ParsedStatement::Measure(qubit, _) => {
                for q in registers.resolve(&qubit)? {
                    circuit.append(GateType::Measure, vec![q])?;
                }
            }
            ParsedStatement::Reset(qubit) => {
                for q in registers.resolve(&qubit)? {
                    circuit.append(GateType::Reset, vec![q])?;
                }
            }
        }
    }

    debug!(
        "Parsed circuit with {} qubits and {} gates",
        circuit.num_qubits,
        circuit.len()
    );
    Ok(circuit)
}
