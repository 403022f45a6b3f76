//! Labeled transition systems and their spanning trees.
//!
//! A [`TransitionSystem`] is a directed graph whose arcs are labeled by events, together with
//! an initial state. A [`SpanningTree`] computed from the initial state assigns every
//! reachable state the Parikh vector of the (unique) tree path reaching it. Arcs between
//! reachable states that are not part of the tree are chords, each closing a cycle.

use indexmap::IndexSet;
use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;


mod spanning_tree;

pub use spanning_tree::{Chord, SpanningTree};

/// A labeled transition system with named states and event-labeled arcs.
#[derive(Clone, Debug)]
pub struct TransitionSystem {
    graph: DiGraph<String, String>,
    initial: NodeIndex,
}

impl TransitionSystem {
    /// Create a transition system consisting of just the initial state.
    pub fn new(initial: &str) -> TransitionSystem {
        let mut graph = DiGraph::new();
        let initial = graph.add_node(initial.to_string());
        TransitionSystem { graph, initial }
    }

    pub fn add_state(&mut self, name: &str) -> NodeIndex {
        self.graph.add_node(name.to_string())
    }

    /// Add an arc `source -event-> target`.
    ///
    /// # Panics
    ///
    /// Panics if one of the states does not belong to this transition system.
    pub fn add_arc(&mut self, source: NodeIndex, event: &str, target: NodeIndex) -> EdgeIndex {
        self.graph.add_edge(source, target, event.to_string())
    }

    pub fn initial_state(&self) -> NodeIndex {
        self.initial
    }

    pub fn set_initial_state(&mut self, state: NodeIndex) {
        assert!(
            state.index() < self.graph.node_count(),
            "State {state:?} does not belong to this transition system."
        );
        self.initial = state;
    }

    pub fn graph(&self) -> &DiGraph<String, String> {
        &self.graph
    }

    pub fn num_states(&self) -> usize {
        self.graph.node_count()
    }

    pub fn states(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices()
    }

    pub fn state_name(&self, state: NodeIndex) -> &str {
        &self.graph[state]
    }

    /// All events labeling some arc, sorted and without duplicates.
    pub fn events(&self) -> IndexSet<String> {
        let mut events = self
            .graph
            .edge_weights()
            .cloned()
            .collect::<IndexSet<_>>();
        events.sort();
        events
    }

    /// The outgoing arcs of `state` as `(event, target)` pairs, in insertion order.
    pub fn successors(&self, state: NodeIndex) -> Vec<(EdgeIndex, &str, NodeIndex)> {
        let mut result = self
            .graph
            .edges_directed(state, Direction::Outgoing)
            .map(|edge| (edge.id(), edge.weight().as_str(), edge.target()))
            .collect::<Vec<_>>();
        result.sort_by_key(|(edge, _, _)| *edge);
        result
    }

    /// Test whether some arc labeled `event` leaves `state`.
    pub fn is_event_enabled(&self, state: NodeIndex, event: &str) -> bool {
        self.graph
            .edges_directed(state, Direction::Outgoing)
            .any(|edge| edge.weight() == event)
    }
}
