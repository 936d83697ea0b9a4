//! Error types for brain construction, propagation and training.

use neuronet_data::{NeuronId, SynapseId};
use thiserror::Error;

/// Main error type for brain operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BrainError {
    /// Synapse creation rejected: foreign endpoint, self-loop or disallowed roles.
    #[error("Invalid connection {from} -> {to}: {reason}")]
    InvalidConnection {
        from: NeuronId,
        to: NeuronId,
        reason: String,
    },

    /// The synapse is absent from the adjacency view it was looked up in.
    #[error("Synapse {0} is not connected")]
    SynapseNotConnected(SynapseId),

    /// The two views of an edge disagree. This is a bookkeeping bug, never a user error.
    #[error("Adjacency inconsistency at {neuron}: {detail}")]
    AdjacencyInconsistency { neuron: NeuronId, detail: String },

    /// The brain cannot be driven in its current shape.
    #[error("Illegal topology: {0}")]
    IllegalTopology(String),

    /// The handle belongs to another brain or to a removed neuron.
    #[error("Unknown neuron {0}")]
    UnknownNeuron(NeuronId),

    /// A parameter snapshot does not fit the brain it is loaded into.
    #[error("Parameter mismatch: {0}")]
    ParameterMismatch(String),
}

/// Result type alias for brain operations.
pub type Result<T> = std::result::Result<T, BrainError>;

impl BrainError {
    #[must_use]
    pub fn invalid_connection<S: Into<String>>(from: NeuronId, to: NeuronId, reason: S) -> Self {
        Self::InvalidConnection {
            from,
            to,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn inconsistency<S: Into<String>>(neuron: NeuronId, detail: S) -> Self {
        Self::AdjacencyInconsistency {
            neuron,
            detail: detail.into(),
        }
    }

    #[must_use]
    pub fn illegal_topology<S: Into<String>>(msg: S) -> Self {
        Self::IllegalTopology(msg.into())
    }

    #[must_use]
    pub fn parameter_mismatch<S: Into<String>>(msg: S) -> Self {
        Self::ParameterMismatch(msg.into())
    }

    /// True for errors that signal corrupted internal state.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::AdjacencyInconsistency { .. })
    }
}
