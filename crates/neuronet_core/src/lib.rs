//! # Neuronet Core
//!
//! A connectionist engine: neurons joined by weighted synapses, forward
//! propagation in dependency order and backpropagated delta-rule training.
//!
//! This crate contains:
//! - The [`Brain`] arena owning neurons and synapses with consistent adjacency
//! - Role-tagged [`Neuron`]s and weighted [`Synapse`]s
//! - Nestable [`NeuronGroup`]s for layer wiring
//! - A feed-forward topology builder, an online [`Trainer`] and graph diagnostics
//!
//! ## Example
//!
//! ```
//! use neuronet_core::{Brain, Role};
//!
//! let mut brain = Brain::with_seed(42);
//! let input = brain.add_neuron(Role::Input);
//! let output = brain.add_neuron(Role::Output);
//! brain.add_synapse(input, output, 0.5).unwrap();
//! brain.set_bias_weight(output, 0.0).unwrap();
//!
//! let out = brain.evaluate(&[1.0]).unwrap();
//! assert_eq!(out, vec![0.5f64.tanh()]);
//! ```

/// Activation functions and the pluggable trait
pub mod activation;
/// Graph diagnostics via petgraph
pub mod analysis;
/// Brain arena, wiring, scheduling, propagation and topology construction
pub mod brain;
/// Configuration for network shape and training
pub mod config;
/// Error types
pub mod error;
/// Nestable neuron groups
pub mod group;
/// Training metrics and logging setup
pub mod metrics;
/// Role-tagged neuron state and arithmetic
pub mod neuron;
/// Weighted edges
pub mod synapse;
/// Online training loop
pub mod trainer;

pub use activation::{ActivationFunction, SharedActivation};
pub use brain::{feed_forward, feed_forward_with_rng, Brain, Layers, Schedule, BIAS_UNIT_OUTPUT};
pub use config::{AppConfig, NetworkConfig, TrainingConfig};
pub use error::{BrainError, Result};
pub use group::{GroupMember, NeuronGroup};
pub use metrics::{init_logging, TrainingMetrics};
pub use neuron::Neuron;
pub use neuronet_data::{
    ActivationKind, BrainId, NeuronId, ParameterSnapshot, Role, SynapseId, TopologyPolicy,
};
pub use synapse::Synapse;
pub use trainer::{xor_samples, Sample, Trainer, TrainingReport};
