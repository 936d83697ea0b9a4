//! Plain data shared by the Neuronet crates: handles, roles, activation kinds,
//! topology policy and the learnable-parameter snapshot.

pub mod data;

pub use data::handle::{BrainId, NeuronId, SynapseId};
pub use data::network::{ActivationKind, Role, TopologyPolicy};
pub use data::params::{NeuronParams, ParameterSnapshot, SynapseParams};
