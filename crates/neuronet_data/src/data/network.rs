use serde::{Deserialize, Serialize};

/// Role of a neuron in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Receives an externally injected value.
    Input,
    /// Internal processing unit.
    Hidden,
    /// Produces an output value and accepts a desired value for training.
    Output,
}

impl Role {
    #[must_use]
    pub fn accepts_external_input(self) -> bool {
        matches!(self, Role::Input)
    }

    #[must_use]
    pub fn accepts_desired_value(self) -> bool {
        matches!(self, Role::Output)
    }
}

/// Built-in activation functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivationKind {
    /// Hyperbolic tangent, range (-1, 1).
    #[default]
    Tanh,
    /// Logistic sigmoid, range (0, 1).
    Sigmoid,
    /// `x / (1 + |x|)`, range (-1, 1).
    Softsign,
}

/// Structural rules a brain enforces when synapses are created.
///
/// Synapses into Input neurons and self-loops are always rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyPolicy {
    /// Output neurons may have outgoing synapses.
    pub allow_output_projections: bool,
}

impl Default for TopologyPolicy {
    fn default() -> Self {
        Self {
            allow_output_projections: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_capabilities() {
        assert!(Role::Input.accepts_external_input());
        assert!(!Role::Input.accepts_desired_value());
        assert!(!Role::Hidden.accepts_external_input());
        assert!(!Role::Hidden.accepts_desired_value());
        assert!(Role::Output.accepts_desired_value());
    }

    #[test]
    fn test_activation_kind_serde_names() {
        let json = serde_json::to_string(&ActivationKind::Softsign).unwrap();
        assert_eq!(json, "\"softsign\"");
        let kind: ActivationKind = serde_json::from_str("\"tanh\"").unwrap();
        assert_eq!(kind, ActivationKind::Tanh);
    }
}
