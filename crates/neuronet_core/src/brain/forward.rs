use super::Brain;
use crate::error::{BrainError, Result};
use crate::synapse::Synapse;
use neuronet_data::NeuronId;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

impl Brain {
    fn ensure_io(&self) -> Result<()> {
        if self.input_neurons.is_empty() {
            return Err(BrainError::illegal_topology("brain has no input neurons"));
        }
        if self.output_neurons.is_empty() {
            return Err(BrainError::illegal_topology("brain has no output neurons"));
        }
        Ok(())
    }

    /// Sum of the weighted signals entering `id`, in synapse creation order.
    fn net_input(&self, id: NeuronId) -> f64 {
        self.neuron(id).map_or(0.0, |neuron| {
            neuron
                .incoming()
                .iter()
                .filter_map(|&sid| self.synapse(sid))
                .map(Synapse::output)
                .sum()
        })
    }

    #[cfg(feature = "parallel")]
    fn level_inputs(&self, level: &[NeuronId]) -> Vec<f64> {
        if level.len() >= self.parallel_threshold {
            level.par_iter().map(|&id| self.net_input(id)).collect()
        } else {
            level.iter().map(|&id| self.net_input(id)).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn level_inputs(&self, level: &[NeuronId]) -> Vec<f64> {
        level.iter().map(|&id| self.net_input(id)).collect()
    }

    /// Fires one neuron and pushes its output into its outgoing synapses.
    fn fire(&mut self, id: NeuronId, net_input: f64) -> Result<()> {
        let neuron = self
            .neurons
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(BrainError::UnknownNeuron(id))?;
        let output = neuron.fire(net_input);
        for &sid in neuron.outgoing() {
            let synapse = self
                .synapses
                .get_mut(sid.index())
                .and_then(Option::as_mut)
                .ok_or_else(|| BrainError::inconsistency(id, format!("dangling outgoing {sid}")))?;
            synapse.set_input(output);
        }
        Ok(())
    }

    /// Forward pass over every neuron in dependency order.
    ///
    /// Each level's incoming sums are computed first (on the rayon pool when
    /// the level is wide enough), then the level fires and writes downstream
    /// caches before the next level reads them.
    pub fn propagate(&mut self) -> Result<()> {
        self.ensure_io()?;
        let schedule = self.schedule()?;

        for level in schedule.levels() {
            let inputs = self.level_inputs(level);
            for (&id, net_input) in level.iter().zip(inputs) {
                self.fire(id, net_input)?;
            }
        }
        Ok(())
    }

    /// Backward pass in the exact reverse of the propagation order.
    ///
    /// Every non-input neuron computes its error term, applies the delta rule
    /// to its incoming synapses, then updates its bias weight.
    pub fn backpropagate(&mut self) -> Result<()> {
        self.ensure_io()?;
        if let Some(&missing) = self
            .output_neurons
            .iter()
            .find(|&&id| self.neuron(id).is_some_and(|n| n.desired().is_none()))
        {
            return Err(BrainError::illegal_topology(format!(
                "desired value not set for output {missing}"
            )));
        }

        let schedule = self.schedule()?;
        let rate = self.learning_rate;

        for id in schedule.order().rev() {
            let downstream = self.downstream_error(id)?;
            let neuron = self
                .neurons
                .get_mut(id.index())
                .and_then(Option::as_mut)
                .ok_or(BrainError::UnknownNeuron(id))?;
            if neuron.role().accepts_external_input() {
                continue;
            }

            let error = neuron.compute_error_term(downstream);
            for &sid in neuron.incoming() {
                let synapse = self
                    .synapses
                    .get_mut(sid.index())
                    .and_then(Option::as_mut)
                    .ok_or_else(|| BrainError::inconsistency(id, format!("dangling incoming {sid}")))?;
                synapse.learn(rate, error);
            }
            neuron.learn_bias(rate);
        }
        Ok(())
    }

    /// Sum of `weight * destination.error_term` over the outgoing synapses of `id`.
    fn downstream_error(&self, id: NeuronId) -> Result<f64> {
        let neuron = self.neuron_ref(id)?;
        let mut sum = 0.0;
        for &sid in neuron.outgoing() {
            let synapse = self
                .synapse(sid)
                .ok_or_else(|| BrainError::inconsistency(id, format!("dangling outgoing {sid}")))?;
            let destination = self.neuron_ref(synapse.destination())?;
            sum += synapse.differential(destination.error_term());
        }
        Ok(sum)
    }

    /// Sets the inputs, propagates and returns the outputs.
    pub fn evaluate(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        self.set_input(inputs)?;
        self.propagate()?;
        Ok(self.output())
    }
}
