//! Named, nestable collections of neurons.
//!
//! Groups describe layers. They hold handles only; the brain owns the neurons.

use crate::brain::Brain;
use crate::error::Result;
use neuronet_data::{NeuronId, SynapseId};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub enum GroupMember {
    Neuron(NeuronId),
    Group(NeuronGroup),
}

impl From<NeuronId> for GroupMember {
    fn from(id: NeuronId) -> Self {
        GroupMember::Neuron(id)
    }
}

impl From<NeuronGroup> for GroupMember {
    fn from(group: NeuronGroup) -> Self {
        GroupMember::Group(group)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NeuronGroup {
    name: String,
    members: Vec<GroupMember>,
}

impl NeuronGroup {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_neurons(name: impl Into<String>, ids: impl IntoIterator<Item = NeuronId>) -> Self {
        let mut group = Self::new(name);
        group.members.extend(ids.into_iter().map(GroupMember::Neuron));
        group
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add(&mut self, member: impl Into<GroupMember>) {
        self.members.push(member.into());
    }

    #[must_use]
    pub fn members(&self) -> &[GroupMember] {
        &self.members
    }

    /// Directly nested groups.
    pub fn groups(&self) -> impl Iterator<Item = &NeuronGroup> {
        self.members.iter().filter_map(|m| match m {
            GroupMember::Group(g) => Some(g),
            GroupMember::Neuron(_) => None,
        })
    }

    /// Depth-first lookup of a nested group by name, including `self`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&NeuronGroup> {
        if self.name == name {
            return Some(self);
        }
        self.groups().find_map(|g| g.find(name))
    }

    /// All neurons reachable through nested groups, in member order.
    #[must_use]
    pub fn leaf_neurons(&self) -> Vec<NeuronId> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<NeuronId>) {
        for member in &self.members {
            match member {
                GroupMember::Neuron(id) => out.push(*id),
                GroupMember::Group(g) => g.collect_leaves(out),
            }
        }
    }

    /// Number of leaf neurons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members
            .iter()
            .map(|m| match m {
                GroupMember::Neuron(_) => 1,
                GroupMember::Group(g) => g.len(),
            })
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, id: NeuronId) -> bool {
        self.members.iter().any(|m| match m {
            GroupMember::Neuron(n) => *n == id,
            GroupMember::Group(g) => g.contains(id),
        })
    }

    /// Leaf neurons with repeats dropped, keeping first occurrences.
    fn distinct_leaves(&self) -> Vec<NeuronId> {
        let mut seen = HashSet::new();
        self.leaf_neurons()
            .into_iter()
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Connects every distinct leaf of `self` to every distinct leaf of `target`.
    ///
    /// A neuron listed more than once is wired once. All pairs are validated
    /// before the first synapse is created, so a rejected pair leaves the
    /// brain unchanged.
    pub fn connect_all_to(&self, target: &NeuronGroup, brain: &mut Brain) -> Result<Vec<SynapseId>> {
        let sources = self.distinct_leaves();
        let destinations = target.distinct_leaves();

        for &from in &sources {
            for &to in &destinations {
                brain.can_connect(from, to)?;
            }
        }

        let mut created = Vec::with_capacity(sources.len() * destinations.len());
        for &from in &sources {
            for &to in &destinations {
                created.push(brain.connect(from, to)?);
            }
        }

        tracing::debug!(
            from = %self.name,
            to = %target.name,
            synapses = created.len(),
            "Connected groups"
        );
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BrainError;
    use neuronet_data::Role;

    #[test]
    fn test_leaf_neurons_flattens_nested_groups_in_order() {
        let mut brain = Brain::with_seed(1);
        let a = brain.add_neuron(Role::Input);
        let b = brain.add_neuron(Role::Hidden);
        let c = brain.add_neuron(Role::Hidden);
        let d = brain.add_neuron(Role::Output);

        let mut inner = NeuronGroup::with_neurons("inner", [b]);
        inner.add(NeuronGroup::with_neurons("deepest", [c]));

        let mut outer = NeuronGroup::new("outer");
        outer.add(a);
        outer.add(inner);
        outer.add(d);

        assert_eq!(outer.leaf_neurons(), vec![a, b, c, d]);
        assert_eq!(outer.len(), 4);
        assert!(outer.contains(c));
        assert_eq!(outer.find("deepest").map(NeuronGroup::len), Some(1));
        assert!(outer.find("missing").is_none());
    }

    #[test]
    fn test_connect_all_to_creates_cross_product() {
        let mut brain = Brain::with_seed(2);
        let inputs = brain.add_layer("input", Role::Input, 3);
        let outputs = brain.add_layer("output", Role::Output, 2);

        let created = inputs.connect_all_to(&outputs, &mut brain).unwrap();

        assert_eq!(created.len(), 6);
        assert_eq!(brain.synapse_count(), 6);
        for id in outputs.leaf_neurons() {
            assert_eq!(brain.neuron(id).unwrap().incoming().len(), 3);
        }
        brain.verify().unwrap();
    }

    #[test]
    fn test_connect_all_to_is_all_or_nothing() {
        let mut brain = Brain::with_seed(3);
        let hidden = brain.add_layer("hidden", Role::Hidden, 2);
        let mut mixed = brain.add_layer("out", Role::Output, 1);
        mixed.add(brain.add_neuron(Role::Input));

        let err = hidden.connect_all_to(&mixed, &mut brain).unwrap_err();

        assert!(matches!(err, BrainError::InvalidConnection { .. }));
        assert_eq!(brain.synapse_count(), 0);
    }

    #[test]
    fn test_connect_all_to_wires_repeated_leaf_once() {
        let mut brain = Brain::with_seed(4);
        let i = brain.add_neuron(Role::Input);
        let o1 = brain.add_neuron(Role::Output);
        let o2 = brain.add_neuron(Role::Output);
        let source = NeuronGroup::with_neurons("in", [i]);
        let mut target = NeuronGroup::with_neurons("out", [o1, o2]);
        target.add(NeuronGroup::with_neurons("again", [o1]));

        let created = source.connect_all_to(&target, &mut brain).unwrap();

        assert_eq!(created.len(), 2);
        assert_eq!(brain.synapse_count(), 2);
        brain.verify().unwrap();
    }

    #[test]
    fn test_connect_all_to_existing_edge_creates_nothing() {
        let mut brain = Brain::with_seed(5);
        let i = brain.add_neuron(Role::Input);
        let o1 = brain.add_neuron(Role::Output);
        let o2 = brain.add_neuron(Role::Output);
        brain.connect(i, o2).unwrap();

        let source = NeuronGroup::with_neurons("in", [i]);
        let target = NeuronGroup::with_neurons("out", [o1, o2]);
        let err = source.connect_all_to(&target, &mut brain).unwrap_err();

        assert!(matches!(err, BrainError::InvalidConnection { .. }));
        assert_eq!(brain.synapse_count(), 1);
    }

    #[test]
    fn test_empty_group() {
        let group = NeuronGroup::new("empty");
        assert!(group.is_empty());
        assert_eq!(group.name(), "empty");
        assert!(group.leaf_neurons().is_empty());
    }
}
