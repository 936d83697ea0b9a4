//! Re-exports of the engine, data and persistence types.

pub use neuronet_core::analysis::{summarize, to_graph, GraphSummary};
pub use neuronet_core::trainer::{evaluate, signs_match};
pub use neuronet_core::{
    feed_forward, feed_forward_with_rng, xor_samples, ActivationFunction, ActivationKind,
    AppConfig, Brain, BrainError, BrainId, GroupMember, Layers, NetworkConfig, Neuron,
    NeuronGroup, NeuronId, ParameterSnapshot, Role, Sample, Schedule, SharedActivation, Synapse,
    SynapseId, TopologyPolicy, Trainer, TrainingConfig, TrainingReport,
};
pub use neuronet_data::{NeuronParams, SynapseParams};
pub use neuronet_io::{load_parameters, save_parameters, IoError};
