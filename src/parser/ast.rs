/// A register reference: `q[3]` or a whole register `q`.
pub type Argument = (String, Option<usize>);

/// Internal AST for parsed statements
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedStatement {
    QReg(String, usize),
    CReg(String, usize),
    Gate(String, Vec<Argument>), // Name, Qubits (parameters are dropped)
    Measure(Argument, Argument), // Qubit -> Cbit
    Reset(Argument),
    Include(String), // Filename
    Barrier(Vec<Argument>),
    GateDef(String), // Name
}

impl ParsedStatement {
    /// Whether the statement declares a register.
    pub fn is_declaration(&self) -> bool {
        matches!(self, ParsedStatement::QReg(..) | ParsedStatement::CReg(..))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_declaration() {
        assert!(ParsedStatement::QReg("q".to_string(), 2).is_declaration());
        assert!(!ParsedStatement::Reset(("q".to_string(), Some(0))).is_declaration());
    }
}
