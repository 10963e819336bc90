use serde::Serialize;
use std::fmt;

/// Quantum Gate Types
///
/// The operation name carried by a gate. It is informational only: reuse
/// analysis looks at qubit operands and circuit order, never at what the
/// gate does.
///
/// # Examples
///
/// ```
/// use q_resize::ir::GateType;
/// assert_eq!(GateType::from_name("CX"), GateType::CX);
/// assert_eq!(GateType::from_name("foo"), GateType::Custom("foo".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum GateType {
    /// Hadamard gate
    H,
    /// Pauli-X gate (NOT)
    X,
    /// Pauli-Y gate
    Y,
    /// Pauli-Z gate
    Z,
    /// Controlled-NOT gate
    CX,
    /// Controlled-Z gate
    CZ,
    /// Swap gate
    SWAP,
    /// Rotation around X-axis
    RX,
    /// Rotation around Y-axis
    RY,
    /// Rotation around Z-axis
    RZ,
    /// General unitary gate U(theta, phi, lambda)
    U,
    /// Identity gate (wait)
    ID,
    /// S gate (sqrt(Z))
    S,
    /// S-dagger gate (inverse of S)
    Sdg,
    /// T gate (sqrt(S))
    T,
    /// T-dagger gate (inverse of T)
    Tdg,
    /// Toffoli gate (CCX)
    CCX,
    /// Measurement in the computational basis
    Measure,
    /// Reset to |0>
    Reset,
    /// Any other named operation
    Custom(String),
}

impl GateType {
    /// Maps an operation name to its gate type.
    ///
    /// Standard names are matched case-insensitively; unknown names are kept
    /// verbatim as [`GateType::Custom`].
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "h" => GateType::H,
            "x" => GateType::X,
            "y" => GateType::Y,
            "z" => GateType::Z,
            "cx" | "cnot" => GateType::CX,
            "cz" => GateType::CZ,
            "swap" => GateType::SWAP,
            "rx" => GateType::RX,
            "ry" => GateType::RY,
            "rz" | "u1" => GateType::RZ,
            "u" | "u2" | "u3" => GateType::U,
            "id" => GateType::ID,
            "s" => GateType::S,
            "sdg" => GateType::Sdg,
            "t" => GateType::T,
            "tdg" => GateType::Tdg,
            "ccx" => GateType::CCX,
            "measure" => GateType::Measure,
            "reset" => GateType::Reset,
            _ => GateType::Custom(name.to_string()),
        }
    }

    /// Canonical lower-case name.
    pub fn as_str(&self) -> &str {
        match self {
            GateType::H => "h",
            GateType::X => "x",
            GateType::Y => "y",
            GateType::Z => "z",
            GateType::CX => "cx",
            GateType::CZ => "cz",
            GateType::SWAP => "swap",
            GateType::RX => "rx",
            GateType::RY => "ry",
            GateType::RZ => "rz",
            GateType::U => "u",
            GateType::ID => "id",
            GateType::S => "s",
            GateType::Sdg => "sdg",
            GateType::T => "t",
            GateType::Tdg => "tdg",
            GateType::CCX => "ccx",
            GateType::Measure => "measure",
            GateType::Reset => "reset",
            GateType::Custom(name) => name,
        }
    }
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(GateType::from_name("CX"), GateType::CX);
        assert_eq!(GateType::from_name("h"), GateType::H);
        assert_eq!(GateType::from_name("u3"), GateType::U);
    }

    #[test]
    fn test_custom_keeps_name() {
        let gate = GateType::from_name("MyGate");
        assert_eq!(gate, GateType::Custom("MyGate".to_string()));
        assert_eq!(gate.to_string(), "MyGate");
    }
}
