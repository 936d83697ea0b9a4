use serde::{Deserialize, Serialize};

use super::network::Role;

/// Learnable state of one neuron.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NeuronParams {
    /// Role, used to check the snapshot matches the target topology.
    pub role: Role,
    /// Bias weight.
    pub bias_weight: f64,
}

/// Learnable state of one synapse.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SynapseParams {
    /// Position of the source neuron in [`ParameterSnapshot::neurons`].
    pub source: usize,
    /// Position of the destination neuron in [`ParameterSnapshot::neurons`].
    pub destination: usize,
    /// Connection weight.
    pub weight: f64,
}

/// The learnable parameters of a brain: bias weights and synapse weights.
///
/// Neurons and synapses are listed in creation order of the live elements,
/// so a snapshot applies to any brain built by the same construction sequence.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct ParameterSnapshot {
    pub neurons: Vec<NeuronParams>,
    pub synapses: Vec<SynapseParams>,
}

impl ParameterSnapshot {
    /// Total number of scalar parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.neurons.len() + self.synapses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neurons.is_empty() && self.synapses.is_empty()
    }
}
