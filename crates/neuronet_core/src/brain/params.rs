//! Export and import of the learnable parameters.

use super::Brain;
use crate::error::{BrainError, Result};
use neuronet_data::{NeuronId, NeuronParams, ParameterSnapshot, SynapseParams};
use std::collections::HashMap;

impl Brain {
    /// Position of each live neuron in creation order.
    fn neuron_ordinals(&self) -> HashMap<NeuronId, usize> {
        self.neurons()
            .enumerate()
            .map(|(ordinal, (id, _))| (id, ordinal))
            .collect()
    }

    /// Snapshot of every bias weight and synapse weight.
    #[must_use]
    pub fn parameters(&self) -> ParameterSnapshot {
        let ordinals = self.neuron_ordinals();
        let neurons = self
            .neurons()
            .map(|(_, n)| NeuronParams {
                role: n.role(),
                bias_weight: n.bias_weight(),
            })
            .collect();
        let synapses = self
            .synapses()
            .filter_map(|(_, s)| {
                Some(SynapseParams {
                    source: *ordinals.get(&s.source())?,
                    destination: *ordinals.get(&s.destination())?,
                    weight: s.weight(),
                })
            })
            .collect();
        ParameterSnapshot { neurons, synapses }
    }

    /// Loads a snapshot taken from a brain with the same topology.
    ///
    /// The whole snapshot is checked before any parameter is written.
    pub fn load_parameters(&mut self, snapshot: &ParameterSnapshot) -> Result<()> {
        if snapshot.neurons.len() != self.neuron_count {
            return Err(BrainError::parameter_mismatch(format!(
                "snapshot has {} neurons, brain has {}",
                snapshot.neurons.len(),
                self.neuron_count
            )));
        }
        if snapshot.synapses.len() != self.synapse_count {
            return Err(BrainError::parameter_mismatch(format!(
                "snapshot has {} synapses, brain has {}",
                snapshot.synapses.len(),
                self.synapse_count
            )));
        }

        let ordinals = self.neuron_ordinals();
        let neuron_ids: Vec<NeuronId> = self.neurons().map(|(id, _)| id).collect();
        for ((id, neuron), params) in self.neurons().zip(&snapshot.neurons) {
            if neuron.role() != params.role {
                return Err(BrainError::parameter_mismatch(format!(
                    "neuron {id} is {:?}, snapshot expects {:?}",
                    neuron.role(),
                    params.role
                )));
            }
        }
        let synapse_ids: Vec<_> = self.synapses().map(|(sid, _)| sid).collect();
        for ((sid, synapse), params) in self.synapses().zip(&snapshot.synapses) {
            let endpoints = (
                ordinals.get(&synapse.source()).copied(),
                ordinals.get(&synapse.destination()).copied(),
            );
            if endpoints != (Some(params.source), Some(params.destination)) {
                return Err(BrainError::parameter_mismatch(format!(
                    "synapse {sid} endpoints differ from snapshot ({} -> {})",
                    params.source, params.destination
                )));
            }
        }

        for (id, params) in neuron_ids.into_iter().zip(&snapshot.neurons) {
            self.neuron_mut(id)?.set_bias_weight(params.bias_weight);
        }
        for (sid, params) in synapse_ids.into_iter().zip(&snapshot.synapses) {
            self.synapse_mut(sid)?.set_weight(params.weight);
        }
        tracing::debug!(parameters = snapshot.len(), "Loaded parameters");
        Ok(())
    }
}
