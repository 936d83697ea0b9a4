//! Structural edits: connecting, disconnecting and removing.

use super::Brain;
use crate::error::{BrainError, Result};
use crate::neuron::Neuron;
use crate::synapse::Synapse;
use neuronet_data::{NeuronId, SynapseId};

impl Brain {
    /// Checks whether a synapse `from -> to` would be accepted.
    pub fn can_connect(&self, from: NeuronId, to: NeuronId) -> Result<()> {
        if from.brain() != self.id || to.brain() != self.id {
            return Err(BrainError::invalid_connection(
                from,
                to,
                "endpoints must belong to this brain",
            ));
        }
        let source = self.neuron_ref(from)?;
        let destination = self.neuron_ref(to)?;

        if from == to {
            return Err(BrainError::invalid_connection(from, to, "self-loops are not allowed"));
        }
        if destination.role().accepts_external_input() {
            return Err(BrainError::invalid_connection(
                from,
                to,
                "input neurons take no incoming synapses",
            ));
        }
        if destination.is_bias_unit() {
            return Err(BrainError::invalid_connection(
                from,
                to,
                "bias units take no incoming synapses",
            ));
        }
        if source.role().accepts_desired_value() && !self.policy.allow_output_projections {
            return Err(BrainError::invalid_connection(
                from,
                to,
                "output projections are disabled by policy",
            ));
        }
        let duplicate = source
            .outgoing()
            .iter()
            .any(|&sid| self.synapse(sid).map(Synapse::destination) == Some(to));
        if duplicate {
            return Err(BrainError::invalid_connection(from, to, "already connected"));
        }
        Ok(())
    }

    /// Creates a synapse with a random initial weight.
    pub fn connect(&mut self, from: NeuronId, to: NeuronId) -> Result<SynapseId> {
        self.can_connect(from, to)?;
        let weight = self.random_weight();
        self.attach(from, to, weight)
    }

    /// Creates a synapse with an explicit weight.
    pub fn add_synapse(&mut self, from: NeuronId, to: NeuronId, weight: f64) -> Result<SynapseId> {
        self.can_connect(from, to)?;
        self.attach(from, to, weight)
    }

    fn attach(&mut self, from: NeuronId, to: NeuronId, weight: f64) -> Result<SynapseId> {
        let sid = SynapseId::new(self.id, self.synapses.len());
        self.neuron_mut(from)?.outgoing_mut().insert(sid);
        self.neuron_mut(to)?.incoming_mut().insert(sid);
        self.outgoing_of.entry(from).or_default().insert(sid);
        self.incoming_of.entry(to).or_default().insert(sid);
        self.synapses.push(Some(Synapse::new(from, to, weight)));
        self.synapse_count += 1;
        self.invalidate_schedule();
        tracing::trace!(synapse = %sid, %from, %to, weight, "Connected");
        Ok(sid)
    }

    /// Removes a synapse from the brain and from both endpoints.
    ///
    /// Every view is checked before anything is mutated; if the views
    /// disagree the brain is left untouched and `AdjacencyInconsistency` is
    /// returned.
    pub fn remove_synapse(&mut self, sid: SynapseId) -> Result<Synapse> {
        let synapse = self
            .synapse(sid)
            .ok_or(BrainError::SynapseNotConnected(sid))?;
        let (from, to) = (synapse.source(), synapse.destination());

        let in_source = self.neuron_ref(from)?.outgoing().contains(&sid);
        let in_destination = self.neuron_ref(to)?.incoming().contains(&sid);
        let in_outgoing_map = self.outgoing_of.get(&from).is_some_and(|s| s.contains(&sid));
        let in_incoming_map = self.incoming_of.get(&to).is_some_and(|s| s.contains(&sid));
        if !(in_source && in_outgoing_map) {
            return Err(BrainError::inconsistency(
                from,
                format!("{sid} missing from an outgoing view"),
            ));
        }
        if !(in_destination && in_incoming_map) {
            return Err(BrainError::inconsistency(
                to,
                format!("{sid} missing from an incoming view"),
            ));
        }

        self.neuron_mut(from)?.outgoing_mut().remove(&sid);
        self.neuron_mut(to)?.incoming_mut().remove(&sid);
        if let Some(set) = self.outgoing_of.get_mut(&from) {
            set.remove(&sid);
        }
        if let Some(set) = self.incoming_of.get_mut(&to) {
            set.remove(&sid);
        }
        let removed = self.synapses[sid.index()]
            .take()
            .ok_or(BrainError::SynapseNotConnected(sid))?;
        self.synapse_count -= 1;
        self.invalidate_schedule();
        tracing::trace!(synapse = %sid, %from, %to, "Removed synapse");
        Ok(removed)
    }

    /// Removes `sid` as seen from `neuron`.
    ///
    /// Fails with `SynapseNotConnected` when the synapse is not in the
    /// neuron's adjacency view. If the synapse does claim the neuron as an
    /// endpoint but is missing from its view, that is an inconsistency.
    pub fn disconnect(&mut self, neuron: NeuronId, sid: SynapseId) -> Result<Synapse> {
        let view = self.neuron_ref(neuron)?;
        let listed = view.incoming().contains(&sid) || view.outgoing().contains(&sid);
        if !listed {
            return match self.synapse(sid) {
                Some(s) if s.touches(neuron) => Err(BrainError::inconsistency(
                    neuron,
                    format!("{sid} names this neuron but is not in its view"),
                )),
                _ => Err(BrainError::SynapseNotConnected(sid)),
            };
        }
        self.remove_synapse(sid)
    }

    /// Removes every synapse touching `neuron` and returns how many were removed.
    pub fn disconnect_all(&mut self, neuron: NeuronId) -> Result<usize> {
        let view = self.neuron_ref(neuron)?;
        // Snapshot first: removal mutates the sets being walked.
        let incident: Vec<SynapseId> = view
            .incoming()
            .iter()
            .chain(view.outgoing().iter())
            .copied()
            .collect();

        for &sid in &incident {
            self.remove_synapse(sid)?;
        }

        let view = self.neuron_ref(neuron)?;
        if view.degree() != 0 {
            return Err(BrainError::inconsistency(
                neuron,
                "adjacency not empty after disconnect_all",
            ));
        }
        tracing::debug!(%neuron, removed = incident.len(), "Disconnected neuron");
        Ok(incident.len())
    }

    /// Removes a neuron and every synapse touching it.
    ///
    /// The neuron leaves the input/output enumerations; the relative order of
    /// the remaining entries is preserved.
    pub fn remove_neuron(&mut self, neuron: NeuronId) -> Result<Neuron> {
        self.disconnect_all(neuron)?;

        let outgoing = self.outgoing_of.remove(&neuron).unwrap_or_default();
        let incoming = self.incoming_of.remove(&neuron).unwrap_or_default();
        if !outgoing.is_empty() || !incoming.is_empty() {
            return Err(BrainError::inconsistency(
                neuron,
                "brain-level adjacency not empty on removal",
            ));
        }

        self.input_neurons.retain(|&id| id != neuron);
        self.output_neurons.retain(|&id| id != neuron);
        let removed = self.neurons[neuron.index()]
            .take()
            .ok_or(BrainError::UnknownNeuron(neuron))?;
        self.neuron_count -= 1;
        self.invalidate_schedule();
        tracing::debug!(%neuron, "Removed neuron");
        Ok(removed)
    }
}
