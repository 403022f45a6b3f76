use crate::error::SynthesisError;
use indexmap::{IndexMap, IndexSet};
use num::bigint::BigInt;
use num::traits::{Signed, Zero};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

/// A node of a [`PetriNet`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NetNode {
    Place { initial_marking: BigInt },
    Transition { label: String },
}

/// A place/transition Petri net with arc weights.
///
/// Places are numbered in creation order; markings are vectors indexed by this number.
/// Transitions are identified by their label.
#[derive(Clone, Debug, Default)]
pub struct PetriNet {
    net: DiGraph<NetNode, BigInt>,
    places: IndexSet<NodeIndex>,
    transitions: IndexMap<String, NodeIndex>,
}

impl PetriNet {
    pub fn new() -> PetriNet {
        PetriNet::default()
    }

    pub fn graph(&self) -> &DiGraph<NetNode, BigInt> {
        &self.net
    }

    /// Create a transition with the given label, or return the existing one.
    pub fn create_transition(&mut self, label: &str) -> NodeIndex {
        if let Some(transition) = self.transitions.get(label) {
            return *transition;
        }
        let transition = self.net.add_node(NetNode::Transition {
            label: label.to_string(),
        });
        self.transitions.insert(label.to_string(), transition);
        transition
    }

    pub fn create_place(&mut self, initial_marking: BigInt) -> NodeIndex {
        let place = self.net.add_node(NetNode::Place { initial_marking });
        self.places.insert(place);
        place
    }

    /// Add an arc producing `weight` tokens. Zero weights create no arc.
    pub fn create_flow_to_place(&mut self, transition: NodeIndex, place: NodeIndex, weight: BigInt) {
        if !weight.is_zero() {
            self.net.update_edge(transition, place, weight);
        }
    }

    /// Add an arc consuming `weight` tokens. Zero weights create no arc.
    pub fn create_flow_to_transition(
        &mut self,
        place: NodeIndex,
        transition: NodeIndex,
        weight: BigInt,
    ) {
        if !weight.is_zero() {
            self.net.update_edge(place, transition, weight);
        }
    }

    pub fn num_places(&self) -> usize {
        self.places.len()
    }

    /// Places in creation order.
    pub fn places(&self) -> &IndexSet<NodeIndex> {
        &self.places
    }

    /// Transition labels in creation order.
    pub fn transition_labels(&self) -> impl Iterator<Item = &str> {
        self.transitions.keys().map(|it| it.as_str())
    }

    pub fn transition(&self, label: &str) -> Option<NodeIndex> {
        self.transitions.get(label).copied()
    }

    pub fn num_arcs(&self) -> usize {
        self.net.edge_count()
    }

    pub fn initial_marking(&self) -> Vec<BigInt> {
        self.places
            .iter()
            .map(|place| match &self.net[*place] {
                NetNode::Place { initial_marking } => initial_marking.clone(),
                NetNode::Transition { .. } => unreachable!("Place list contains a transition."),
            })
            .collect()
    }

    /// Fire the transition with the given label under `marking`.
    ///
    /// Every input place must hold at least as many tokens as its arc weight.
    pub fn fire(&self, marking: &[BigInt], label: &str) -> Result<Vec<BigInt>, SynthesisError> {
        let transition = self
            .transition(label)
            .ok_or_else(|| SynthesisError::UnknownEvent(label.to_string()))?;
        if marking.len() != self.places.len() {
            return Err(SynthesisError::DimensionMismatch {
                expected: self.places.len(),
                actual: marking.len(),
            });
        }

        let mut next = marking.to_vec();
        for edge in self.net.edges_directed(transition, Direction::Incoming) {
            let index = self.place_index(edge.source());
            next[index] -= edge.weight();
            if next[index].is_negative() {
                return Err(SynthesisError::NotEnabled(label.to_string()));
            }
        }
        for edge in self.net.edges_directed(transition, Direction::Outgoing) {
            let index = self.place_index(edge.target());
            next[index] += edge.weight();
        }
        Ok(next)
    }

    /// Test whether the given sequence of labels can be fired from the initial marking.
    /// Unknown labels are reported as an error.
    pub fn can_fire_sequence<S: AsRef<str>>(&self, labels: &[S]) -> Result<bool, SynthesisError> {
        let mut marking = self.initial_marking();
        for label in labels {
            marking = match self.fire(&marking, label.as_ref()) {
                Ok(next) => next,
                Err(SynthesisError::NotEnabled(_)) => return Ok(false),
                Err(error) => return Err(error),
            };
        }
        Ok(true)
    }

    fn place_index(&self, place: NodeIndex) -> usize {
        self.places
            .get_index_of(&place)
            .unwrap_or_else(|| unreachable!("Arcs of a transition always lead to places."))
    }
}
