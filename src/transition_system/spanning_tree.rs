use crate::error::SynthesisError;
use crate::transition_system::TransitionSystem;
use indexmap::IndexSet;
use log::trace;
use petgraph::graph::{EdgeIndex, NodeIndex};
use std::collections::{BTreeSet, VecDeque};

/// An arc between reachable states which is not part of the spanning tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chord {
    pub edge: EdgeIndex,
    pub source: NodeIndex,
    pub target: NodeIndex,
    /// `pv(source) + event - pv(target)`: the effect of the cycle closed by this chord.
    pub parikh_vector: Vec<i64>,
}

/// A breadth-first spanning tree of the states reachable from the initial state.
///
/// Parikh vectors are dense vectors indexed by [`SpanningTree::event_index`].
#[derive(Clone, Debug)]
pub struct SpanningTree {
    events: IndexSet<String>,
    reaching: Vec<Option<Vec<i64>>>,
    tree_edges: BTreeSet<EdgeIndex>,
    chords: Vec<Chord>,
}

impl SpanningTree {
    pub fn new(ts: &TransitionSystem) -> SpanningTree {
        let events = ts.events();
        let mut reaching: Vec<Option<Vec<i64>>> = vec![None; ts.num_states()];
        let mut tree_edges = BTreeSet::new();

        let initial = ts.initial_state();
        reaching[initial.index()] = Some(vec![0; events.len()]);
        let mut queue = VecDeque::from([initial]);
        while let Some(state) = queue.pop_front() {
            for (edge, event, target) in ts.successors(state) {
                if reaching[target.index()].is_some() {
                    continue;
                }
                let Some(mut vector) = reaching[state.index()].clone() else {
                    unreachable!("Dequeued states are always reachable.");
                };
                if let Some(index) = events.get_index_of(event) {
                    vector[index] += 1;
                }
                reaching[target.index()] = Some(vector);
                tree_edges.insert(edge);
                queue.push_back(target);
            }
        }

        let mut chords = Vec::new();
        for state in ts.states() {
            let Some(source_pv) = &reaching[state.index()] else {
                continue;
            };
            for (edge, event, target) in ts.successors(state) {
                if tree_edges.contains(&edge) {
                    continue;
                }
                let Some(target_pv) = &reaching[target.index()] else {
                    unreachable!("The target of an arc leaving a reachable state is reachable.");
                };
                let mut parikh_vector = source_pv
                    .iter()
                    .zip(target_pv)
                    .map(|(s, t)| s - t)
                    .collect::<Vec<_>>();
                if let Some(index) = events.get_index_of(event) {
                    parikh_vector[index] += 1;
                }
                trace!("Chord {edge:?} closes a cycle with effect {parikh_vector:?}.");
                chords.push(Chord {
                    edge,
                    source: state,
                    target,
                    parikh_vector,
                });
            }
        }

        SpanningTree {
            events,
            reaching,
            tree_edges,
            chords,
        }
    }

    /// All events of the transition system, sorted.
    pub fn events(&self) -> &IndexSet<String> {
        &self.events
    }

    pub fn num_events(&self) -> usize {
        self.events.len()
    }

    pub fn event_index(&self, event: &str) -> Result<usize, SynthesisError> {
        self.events
            .get_index_of(event)
            .ok_or_else(|| SynthesisError::UnknownEvent(event.to_string()))
    }

    /// The Parikh vector of the tree path from the initial state to `state`, or `None` when
    /// `state` is not reachable.
    pub fn reaching_parikh_vector(&self, state: NodeIndex) -> Option<&[i64]> {
        self.reaching
            .get(state.index())
            .and_then(|it| it.as_deref())
    }

    pub fn is_reachable(&self, state: NodeIndex) -> bool {
        self.reaching_parikh_vector(state).is_some()
    }

    pub fn is_tree_edge(&self, edge: EdgeIndex) -> bool {
        self.tree_edges.contains(&edge)
    }

    pub fn chords(&self) -> &[Chord] {
        &self.chords
    }
}
