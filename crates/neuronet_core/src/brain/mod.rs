//! The brain arena: owns neurons and synapses, keeps adjacency consistent and
//! drives propagation and backpropagation.
//!
//! Neurons and synapses live in slot vectors and are addressed by handles that
//! carry the brain's id. Every structural edit goes through methods in
//! [`wiring`], which update the neuron-local sets and the brain-level
//! `incoming_of` / `outgoing_of` maps together.

pub mod forward;
pub mod params;
pub mod schedule;
pub mod topology;
pub mod wiring;

use crate::activation::{default_activation, SharedActivation};
use crate::error::{BrainError, Result};
use crate::group::NeuronGroup;
use crate::neuron::Neuron;
use crate::synapse::Synapse;
use neuronet_data::{BrainId, NeuronId, Role, SynapseId, TopologyPolicy};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

pub use schedule::Schedule;
pub use topology::{feed_forward, feed_forward_with_rng, Layers};

/// Learning rate used when none is configured.
pub const DEFAULT_LEARNING_RATE: f64 = 0.09;
/// Initial weights and biases are drawn from `-range..range`.
pub const DEFAULT_WEIGHT_RANGE: f64 = 0.5;
/// Dependency levels at least this wide are summed on the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Output of the unit created by [`Brain::add_bias_unit`] in feed-forward builds.
pub const BIAS_UNIT_OUTPUT: f64 = 1.0;

/// Owning container of a neuron/synapse graph.
///
/// A clone is an independent brain with a fresh [`BrainId`]: the same
/// structure and state, but handles issued by one are rejected by the other.
/// Map a handle across with [`NeuronId::index`] and [`NeuronId::new`].
#[derive(Debug)]
pub struct Brain {
    id: BrainId,
    neurons: Vec<Option<Neuron>>,
    synapses: Vec<Option<Synapse>>,
    outgoing_of: HashMap<NeuronId, BTreeSet<SynapseId>>,
    incoming_of: HashMap<NeuronId, BTreeSet<SynapseId>>,
    input_neurons: Vec<NeuronId>,
    output_neurons: Vec<NeuronId>,
    neuron_count: usize,
    synapse_count: usize,
    policy: TopologyPolicy,
    learning_rate: f64,
    weight_range: f64,
    parallel_threshold: usize,
    rng: ChaCha8Rng,
    schedule: Option<Arc<Schedule>>,
}

impl Clone for Brain {
    fn clone(&self) -> Self {
        let id = BrainId::next();
        let neuron = |n: &NeuronId| NeuronId::new(id, n.index());
        let rehome = |map: &HashMap<NeuronId, BTreeSet<SynapseId>>| {
            map.iter()
                .map(|(n, set)| {
                    let set: BTreeSet<SynapseId> =
                        set.iter().map(|s| SynapseId::new(id, s.index())).collect();
                    (neuron(n), set)
                })
                .collect::<HashMap<_, _>>()
        };
        Self {
            id,
            neurons: self
                .neurons
                .iter()
                .map(|slot| slot.as_ref().map(|n| n.reissued(id)))
                .collect(),
            synapses: self
                .synapses
                .iter()
                .map(|slot| slot.as_ref().map(|s| s.reissued(id)))
                .collect(),
            outgoing_of: rehome(&self.outgoing_of),
            incoming_of: rehome(&self.incoming_of),
            input_neurons: self.input_neurons.iter().map(neuron).collect(),
            output_neurons: self.output_neurons.iter().map(neuron).collect(),
            neuron_count: self.neuron_count,
            synapse_count: self.synapse_count,
            policy: self.policy,
            learning_rate: self.learning_rate,
            weight_range: self.weight_range,
            parallel_threshold: self.parallel_threshold,
            rng: self.rng.clone(),
            schedule: None,
        }
    }
}

impl Default for Brain {
    fn default() -> Self {
        Self::new()
    }
}

impl Brain {
    /// Creates an empty brain seeded from system entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }

    /// Creates an empty brain with a reproducible weight initialization.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    #[must_use]
    pub fn with_rng(rng: ChaCha8Rng) -> Self {
        Self {
            id: BrainId::next(),
            neurons: Vec::new(),
            synapses: Vec::new(),
            outgoing_of: HashMap::new(),
            incoming_of: HashMap::new(),
            input_neurons: Vec::new(),
            output_neurons: Vec::new(),
            neuron_count: 0,
            synapse_count: 0,
            policy: TopologyPolicy::default(),
            learning_rate: DEFAULT_LEARNING_RATE,
            weight_range: DEFAULT_WEIGHT_RANGE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            rng,
            schedule: None,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: TopologyPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_learning_rate(mut self, rate: f64) -> Self {
        self.learning_rate = rate;
        self
    }

    /// Sets the half-width of the uniform range used for new weights.
    #[must_use]
    pub fn with_weight_range(mut self, range: f64) -> Self {
        self.weight_range = range.abs();
        self
    }

    /// Minimum level width summed in parallel. `usize::MAX` disables it.
    #[must_use]
    pub fn with_parallel_threshold(mut self, min_level_len: usize) -> Self {
        self.parallel_threshold = min_level_len.max(1);
        self
    }

    #[must_use]
    pub fn id(&self) -> BrainId {
        self.id
    }

    #[must_use]
    pub fn policy(&self) -> TopologyPolicy {
        self.policy
    }

    #[must_use]
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn set_learning_rate(&mut self, rate: f64) {
        self.learning_rate = rate;
    }

    #[must_use]
    pub fn neuron_count(&self) -> usize {
        self.neuron_count
    }

    #[must_use]
    pub fn synapse_count(&self) -> usize {
        self.synapse_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neuron_count == 0
    }

    /// Input neurons in the order `set_input` binds them.
    #[must_use]
    pub fn input_neurons(&self) -> &[NeuronId] {
        &self.input_neurons
    }

    /// Output neurons in the order `output` and `set_desired` bind them.
    #[must_use]
    pub fn output_neurons(&self) -> &[NeuronId] {
        &self.output_neurons
    }

    #[must_use]
    pub fn contains_neuron(&self, id: NeuronId) -> bool {
        self.neuron(id).is_some()
    }

    #[must_use]
    pub fn neuron(&self, id: NeuronId) -> Option<&Neuron> {
        if id.brain() != self.id {
            return None;
        }
        self.neurons.get(id.index()).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn synapse(&self, id: SynapseId) -> Option<&Synapse> {
        if id.brain() != self.id {
            return None;
        }
        self.synapses.get(id.index()).and_then(Option::as_ref)
    }

    /// Live neurons in creation order.
    pub fn neurons(&self) -> impl Iterator<Item = (NeuronId, &Neuron)> + '_ {
        let brain = self.id;
        self.neurons
            .iter()
            .enumerate()
            .filter_map(move |(slot, n)| n.as_ref().map(|n| (NeuronId::new(brain, slot), n)))
    }

    /// Live synapses in creation order.
    pub fn synapses(&self) -> impl Iterator<Item = (SynapseId, &Synapse)> + '_ {
        let brain = self.id;
        self.synapses
            .iter()
            .enumerate()
            .filter_map(move |(slot, s)| s.as_ref().map(|s| (SynapseId::new(brain, slot), s)))
    }

    /// Brain-level view of the synapses leaving `id`.
    #[must_use]
    pub fn outgoing_of(&self, id: NeuronId) -> Option<&BTreeSet<SynapseId>> {
        self.outgoing_of.get(&id)
    }

    /// Brain-level view of the synapses entering `id`.
    #[must_use]
    pub fn incoming_of(&self, id: NeuronId) -> Option<&BTreeSet<SynapseId>> {
        self.incoming_of.get(&id)
    }

    pub(crate) fn neuron_ref(&self, id: NeuronId) -> Result<&Neuron> {
        self.neuron(id).ok_or(BrainError::UnknownNeuron(id))
    }

    pub(crate) fn neuron_mut(&mut self, id: NeuronId) -> Result<&mut Neuron> {
        if id.brain() != self.id {
            return Err(BrainError::UnknownNeuron(id));
        }
        self.neurons
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(BrainError::UnknownNeuron(id))
    }

    pub(crate) fn synapse_mut(&mut self, id: SynapseId) -> Result<&mut Synapse> {
        if id.brain() != self.id {
            return Err(BrainError::SynapseNotConnected(id));
        }
        self.synapses
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(BrainError::SynapseNotConnected(id))
    }

    fn random_weight(&mut self) -> f64 {
        if self.weight_range > 0.0 {
            self.rng.gen_range(-self.weight_range..self.weight_range)
        } else {
            0.0
        }
    }

    fn invalidate_schedule(&mut self) {
        self.schedule = None;
    }

    /// Adds a neuron with the default tanh activation.
    pub fn add_neuron(&mut self, role: Role) -> NeuronId {
        self.add_neuron_with(role, default_activation())
    }

    /// Adds a neuron with a caller-supplied activation.
    ///
    /// Hidden and Output neurons get a random bias weight; Input neurons pass
    /// values through and keep a zero bias.
    pub fn add_neuron_with(&mut self, role: Role, activation: SharedActivation) -> NeuronId {
        let bias = if role.accepts_external_input() {
            0.0
        } else {
            self.random_weight()
        };
        self.insert_neuron(Neuron::new(role, bias, activation))
    }

    /// Adds a hidden unit that always outputs `value`.
    ///
    /// It takes no incoming synapses and backpropagation never changes it.
    pub fn add_bias_unit(&mut self, value: f64) -> NeuronId {
        self.insert_neuron(Neuron::bias_unit(value, default_activation()))
    }

    fn insert_neuron(&mut self, neuron: Neuron) -> NeuronId {
        let role = neuron.role();
        let id = NeuronId::new(self.id, self.neurons.len());
        self.neurons.push(Some(neuron));
        self.outgoing_of.insert(id, BTreeSet::new());
        self.incoming_of.insert(id, BTreeSet::new());
        match role {
            Role::Input => self.input_neurons.push(id),
            Role::Output => self.output_neurons.push(id),
            Role::Hidden => {}
        }
        self.neuron_count += 1;
        self.invalidate_schedule();
        tracing::trace!(neuron = %id, ?role, "Added neuron");
        id
    }

    /// Adds `count` neurons of one role and returns them as a named group.
    pub fn add_layer(&mut self, name: impl Into<String>, role: Role, count: usize) -> NeuronGroup {
        self.add_layer_with(name, role, count, default_activation())
    }

    pub fn add_layer_with(
        &mut self,
        name: impl Into<String>,
        role: Role,
        count: usize,
        activation: SharedActivation,
    ) -> NeuronGroup {
        let ids: Vec<NeuronId> = (0..count)
            .map(|_| self.add_neuron_with(role, Arc::clone(&activation)))
            .collect();
        NeuronGroup::with_neurons(name, ids)
    }

    #[must_use]
    pub fn bias_weight(&self, id: NeuronId) -> Option<f64> {
        self.neuron(id).map(Neuron::bias_weight)
    }

    pub fn set_bias_weight(&mut self, id: NeuronId, bias_weight: f64) -> Result<()> {
        self.neuron_mut(id)?.set_bias_weight(bias_weight);
        Ok(())
    }

    #[must_use]
    pub fn weight(&self, id: SynapseId) -> Option<f64> {
        self.synapse(id).map(Synapse::weight)
    }

    pub fn set_weight(&mut self, id: SynapseId, weight: f64) -> Result<()> {
        self.synapse_mut(id)?.set_weight(weight);
        Ok(())
    }

    /// Binds `values[i]` to the i-th input neuron.
    pub fn set_input(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != self.input_neurons.len() {
            return Err(BrainError::illegal_topology(format!(
                "expected {} input values, got {}",
                self.input_neurons.len(),
                values.len()
            )));
        }
        for (i, &value) in values.iter().enumerate() {
            let id = self.input_neurons[i];
            self.neuron_mut(id)?.inject(value);
        }
        Ok(())
    }

    /// Binds `values[i]` as the desired value of the i-th output neuron.
    pub fn set_desired(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != self.output_neurons.len() {
            return Err(BrainError::illegal_topology(format!(
                "expected {} desired values, got {}",
                self.output_neurons.len(),
                values.len()
            )));
        }
        for (i, &value) in values.iter().enumerate() {
            let id = self.output_neurons[i];
            self.neuron_mut(id)?.set_desired(value);
        }
        Ok(())
    }

    /// Same as [`Brain::set_desired`].
    pub fn set_training(&mut self, values: &[f64]) -> Result<()> {
        self.set_desired(values)
    }

    /// Outputs of the output neurons in their stable order.
    #[must_use]
    pub fn output(&self) -> Vec<f64> {
        self.output_neurons
            .iter()
            .map(|&id| self.neuron(id).map_or(0.0, Neuron::output))
            .collect()
    }

    /// Checks every adjacency invariant.
    ///
    /// Each live synapse must appear in its source's outgoing view and its
    /// destination's incoming view, both neuron-local and brain-level, and no
    /// view may reference anything else. Together these give the degree
    /// invariant: a neuron's degree equals the number of synapses touching it.
    pub fn verify(&self) -> Result<()> {
        for (sid, synapse) in self.synapses() {
            let (from, to) = (synapse.source(), synapse.destination());
            let source = self.neuron(from).ok_or_else(|| {
                BrainError::inconsistency(from, format!("source of {sid} is gone"))
            })?;
            let destination = self.neuron(to).ok_or_else(|| {
                BrainError::inconsistency(to, format!("destination of {sid} is gone"))
            })?;

            if !source.outgoing().contains(&sid) {
                return Err(BrainError::inconsistency(
                    from,
                    format!("{sid} missing from outgoing set"),
                ));
            }
            if !destination.incoming().contains(&sid) {
                return Err(BrainError::inconsistency(
                    to,
                    format!("{sid} missing from incoming set"),
                ));
            }
        }

        for (nid, neuron) in self.neurons() {
            if self.outgoing_of.get(&nid) != Some(neuron.outgoing()) {
                return Err(BrainError::inconsistency(nid, "outgoing views disagree"));
            }
            if self.incoming_of.get(&nid) != Some(neuron.incoming()) {
                return Err(BrainError::inconsistency(nid, "incoming views disagree"));
            }
            for &sid in neuron.outgoing() {
                if self.synapse(sid).map(Synapse::source) != Some(nid) {
                    return Err(BrainError::inconsistency(
                        nid,
                        format!("dangling outgoing {sid}"),
                    ));
                }
            }
            for &sid in neuron.incoming() {
                if self.synapse(sid).map(Synapse::destination) != Some(nid) {
                    return Err(BrainError::inconsistency(
                        nid,
                        format!("dangling incoming {sid}"),
                    ));
                }
            }
        }

        for &nid in self.outgoing_of.keys().chain(self.incoming_of.keys()) {
            if !self.contains_neuron(nid) {
                return Err(BrainError::inconsistency(nid, "adjacency entry for removed neuron"));
            }
        }
        Ok(())
    }
}
