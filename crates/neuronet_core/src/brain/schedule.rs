//! Dependency-ordered traversal plan.
//!
//! Neurons are grouped into levels with Kahn's algorithm: level 0 holds every
//! neuron without incoming synapses, and each later level holds the neurons
//! whose sources all sit in earlier levels. Inside a level neurons keep
//! creation order. For layered feed-forward wiring the levels are exactly the
//! layers in construction order.

use super::Brain;
use crate::error::{BrainError, Result};
use neuronet_data::NeuronId;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    levels: Vec<Vec<NeuronId>>,
}

impl Schedule {
    /// Builds the level plan. Cyclic wiring has no valid order and is rejected.
    pub fn build(brain: &Brain) -> Result<Self> {
        let mut pending: HashMap<NeuronId, usize> = brain
            .neurons()
            .map(|(id, n)| (id, n.incoming().len()))
            .collect();

        let mut frontier: Vec<NeuronId> = brain
            .neurons()
            .filter(|(_, n)| n.incoming().is_empty())
            .map(|(id, _)| id)
            .collect();

        let mut levels = Vec::new();
        let mut placed = 0;
        while !frontier.is_empty() {
            let mut next = Vec::new();
            for &id in &frontier {
                for &sid in brain.neuron_ref(id)?.outgoing() {
                    let Some(synapse) = brain.synapse(sid) else {
                        return Err(BrainError::inconsistency(id, format!("dangling outgoing {sid}")));
                    };
                    let to = synapse.destination();
                    if let Some(count) = pending.get_mut(&to) {
                        *count -= 1;
                        if *count == 0 {
                            next.push(to);
                        }
                    }
                }
            }
            placed += frontier.len();
            next.sort_unstable();
            levels.push(std::mem::replace(&mut frontier, next));
        }

        if placed != brain.neuron_count() {
            return Err(BrainError::illegal_topology(format!(
                "cyclic wiring: {} of {} neurons cannot be ordered",
                brain.neuron_count() - placed,
                brain.neuron_count()
            )));
        }
        Ok(Self { levels })
    }

    /// Levels in propagation order.
    #[must_use]
    pub fn levels(&self) -> &[Vec<NeuronId>] {
        &self.levels
    }

    /// Flattened propagation order.
    pub fn order(&self) -> impl DoubleEndedIterator<Item = NeuronId> + '_ {
        self.levels.iter().flatten().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl Brain {
    /// Cached schedule, rebuilt after any structural edit.
    pub fn schedule(&mut self) -> Result<Arc<Schedule>> {
        if let Some(schedule) = &self.schedule {
            return Ok(Arc::clone(schedule));
        }
        let schedule = Arc::new(Schedule::build(self)?);
        tracing::debug!(
            neurons = schedule.len(),
            levels = schedule.levels().len(),
            "Rebuilt propagation schedule"
        );
        self.schedule = Some(Arc::clone(&schedule));
        Ok(schedule)
    }

    /// Dependency levels in propagation order.
    pub fn layers(&mut self) -> Result<Vec<Vec<NeuronId>>> {
        Ok(self.schedule()?.levels().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuronet_data::Role;

    #[test]
    fn test_layered_wiring_yields_layers() {
        let mut brain = Brain::with_seed(1);
        let input = brain.add_layer("in", Role::Input, 2);
        let hidden = brain.add_layer("hidden", Role::Hidden, 3);
        let output = brain.add_layer("out", Role::Output, 1);
        input.connect_all_to(&hidden, &mut brain).unwrap();
        hidden.connect_all_to(&output, &mut brain).unwrap();

        let layers = brain.layers().unwrap();

        assert_eq!(
            layers,
            vec![input.leaf_neurons(), hidden.leaf_neurons(), output.leaf_neurons()]
        );
    }

    #[test]
    fn test_skip_connection_waits_for_all_sources() {
        let mut brain = Brain::with_seed(1);
        let i = brain.add_neuron(Role::Input);
        let o = brain.add_neuron(Role::Output);
        let h = brain.add_neuron(Role::Hidden);
        brain.connect(i, h).unwrap();
        brain.connect(h, o).unwrap();
        brain.connect(i, o).unwrap();

        let order: Vec<_> = brain.schedule().unwrap().order().collect();

        assert_eq!(order, vec![i, h, o]);
    }

    #[test]
    fn test_cycle_is_rejected() {
        let mut brain = Brain::with_seed(1);
        let i = brain.add_neuron(Role::Input);
        let a = brain.add_neuron(Role::Hidden);
        let b = brain.add_neuron(Role::Hidden);
        brain.connect(i, a).unwrap();
        brain.connect(a, b).unwrap();
        brain.connect(b, a).unwrap();

        assert!(matches!(
            brain.schedule(),
            Err(BrainError::IllegalTopology(_))
        ));
    }

    #[test]
    fn test_schedule_is_invalidated_by_edits() {
        let mut brain = Brain::with_seed(1);
        let i = brain.add_neuron(Role::Input);
        let o = brain.add_neuron(Role::Output);
        assert_eq!(brain.schedule().unwrap().levels().len(), 1);

        brain.connect(i, o).unwrap();
        assert_eq!(brain.schedule().unwrap().levels().len(), 2);
    }
}
