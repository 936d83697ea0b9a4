//! Read-only graph diagnostics over a brain, built on `petgraph`.
//!
//! Nothing here is needed for propagation; it exists for inspection.

use crate::brain::Brain;
use neuronet_data::{NeuronId, SynapseId};
use petgraph::algo::{connected_components, is_cyclic_directed};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSummary {
    pub neurons: usize,
    pub synapses: usize,
    pub acyclic: bool,
    /// Weakly connected components.
    pub components: usize,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
}

/// Copies the neuron/synapse graph into a `petgraph` digraph.
#[must_use]
pub fn to_graph(brain: &Brain) -> DiGraph<NeuronId, SynapseId> {
    let mut graph = DiGraph::with_capacity(brain.neuron_count(), brain.synapse_count());
    let mut index: HashMap<NeuronId, NodeIndex> = HashMap::new();
    for (id, _) in brain.neurons() {
        index.insert(id, graph.add_node(id));
    }
    for (sid, synapse) in brain.synapses() {
        if let (Some(&a), Some(&b)) = (
            index.get(&synapse.source()),
            index.get(&synapse.destination()),
        ) {
            graph.add_edge(a, b, sid);
        }
    }
    graph
}

#[must_use]
pub fn summarize(brain: &Brain) -> GraphSummary {
    let graph = to_graph(brain);
    let (max_in_degree, max_out_degree) = brain.neurons().fold((0, 0), |(i, o), (_, n)| {
        (i.max(n.incoming().len()), o.max(n.outgoing().len()))
    });
    GraphSummary {
        neurons: graph.node_count(),
        synapses: graph.edge_count(),
        acyclic: !is_cyclic_directed(&graph),
        components: connected_components(&graph),
        max_in_degree,
        max_out_degree,
    }
}
