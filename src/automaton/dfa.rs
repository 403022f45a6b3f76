use crate::automaton::{FiniteAutomaton, Symbol};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// A deterministic finite automaton with a partial transition function.
///
/// States are indexed by an integer from `0` to `N-1`. A missing transition means the word
/// is rejected. The alphabet is kept explicitly, since it may contain events that do not
/// label any transition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dfa {
    alphabet: BTreeSet<String>,
    transitions: Vec<BTreeMap<String, usize>>,
    finals: Vec<bool>,
    initial: usize,
}

impl From<&FiniteAutomaton> for Dfa {
    /// Subset construction. Only subsets reachable from the initial state are created and
    /// the empty subset is omitted.
    fn from(value: &FiniteAutomaton) -> Self {
        let alphabet = value.alphabet();
        let start = value.epsilon_closure(&BTreeSet::from([value.initial_state()]));

        let mut index = BTreeMap::from([(start.clone(), 0usize)]);
        let mut subsets = vec![start.clone()];
        let mut transitions = vec![BTreeMap::new()];
        let mut queue = VecDeque::from([start]);
        while let Some(subset) = queue.pop_front() {
            let source = index[&subset];
            for event in &alphabet {
                let next = value.step(&subset, event);
                if next.is_empty() {
                    continue;
                }
                let target = match index.get(&next) {
                    Some(target) => *target,
                    None => {
                        let target = subsets.len();
                        index.insert(next.clone(), target);
                        subsets.push(next.clone());
                        transitions.push(BTreeMap::new());
                        queue.push_back(next);
                        target
                    }
                };
                transitions[source].insert(event.clone(), target);
            }
        }

        let finals = subsets
            .iter()
            .map(|subset| subset.iter().any(|state| value.is_final(*state)))
            .collect();

        Dfa {
            alphabet,
            transitions,
            finals,
            initial: 0,
        }
    }
}

impl From<FiniteAutomaton> for Dfa {
    fn from(value: FiniteAutomaton) -> Self {
        Dfa::from(&value)
    }
}

impl Dfa {
    /// The automaton accepting every word over `alphabet`.
    pub fn sigma_star(alphabet: &BTreeSet<String>) -> Dfa {
        Dfa {
            alphabet: alphabet.clone(),
            transitions: vec![alphabet.iter().map(|event| (event.clone(), 0)).collect()],
            finals: vec![true],
            initial: 0,
        }
    }

    /// The automaton accepting all words over `alphabet` whose last symbol is `event`.
    pub fn ending_with(alphabet: &BTreeSet<String>, event: &str) -> Dfa {
        let sigma_star = FiniteAutomaton::sigma_star(alphabet.iter().map(|it| it.as_str()));
        let mut result =
            Dfa::from(sigma_star.concatenate(&FiniteAutomaton::atomic_language(Symbol::event(event))));
        result.alphabet.extend(alphabet.iter().cloned());
        result
    }

    pub fn num_states(&self) -> usize {
        self.transitions.len()
    }

    pub fn states(&self) -> std::ops::Range<usize> {
        0..self.num_states()
    }

    pub fn initial_state(&self) -> usize {
        self.initial
    }

    pub fn alphabet(&self) -> &BTreeSet<String> {
        &self.alphabet
    }

    /// # Panics
    ///
    /// Panics if `state` does not belong to this automaton.
    pub fn is_final(&self, state: usize) -> bool {
        self.finals[state]
    }

    /// # Panics
    ///
    /// Panics if `state` does not belong to this automaton.
    pub fn successor(&self, state: usize, event: &str) -> Option<usize> {
        self.transitions[state].get(event).copied()
    }

    /// The outgoing transitions of `state`, ordered by event.
    pub fn edges(&self, state: usize) -> impl Iterator<Item = (&str, usize)> {
        self.transitions[state]
            .iter()
            .map(|(event, target)| (event.as_str(), *target))
    }

    pub fn accepts<S: AsRef<str>>(&self, word: &[S]) -> bool {
        let mut state = self.initial;
        for event in word {
            let Some(next) = self.successor(state, event.as_ref()) else {
                return false;
            };
            state = next;
        }
        self.finals[state]
    }

    /// Product automaton accepting the intersection of both languages. The alphabet is the
    /// union of both alphabets.
    pub fn intersection(&self, other: &Dfa) -> Dfa {
        let alphabet = self
            .alphabet
            .union(&other.alphabet)
            .cloned()
            .collect::<BTreeSet<_>>();
        let start = (self.initial, other.initial);

        let mut index = BTreeMap::from([(start, 0usize)]);
        let mut pairs = vec![start];
        let mut transitions = vec![BTreeMap::new()];
        let mut queue = VecDeque::from([start]);
        while let Some((left, right)) = queue.pop_front() {
            let source = index[&(left, right)];
            for event in &alphabet {
                let (Some(left), Some(right)) =
                    (self.successor(left, event), other.successor(right, event))
                else {
                    continue;
                };
                let target = *index.entry((left, right)).or_insert_with(|| {
                    pairs.push((left, right));
                    transitions.push(BTreeMap::new());
                    queue.push_back((left, right));
                    pairs.len() - 1
                });
                transitions[source].insert(event.clone(), target);
            }
        }

        Dfa {
            alphabet,
            finals: pairs
                .iter()
                .map(|(left, right)| self.finals[*left] && other.finals[*right])
                .collect(),
            transitions,
            initial: 0,
        }
    }

    /// The unique minimal (partial) automaton for the language of `self`.
    ///
    /// States that are unreachable or cannot reach a final state are removed first (the
    /// initial state is always kept), then equivalent states are merged using Moore's
    /// partition refinement. States of the result are numbered in BFS order from the
    /// initial state.
    pub fn minimize(&self) -> Dfa {
        let live = self.live_states();

        // Start with the final/non-final partition of live states.
        let mut block = self
            .finals
            .iter()
            .map(|is_final| usize::from(*is_final))
            .collect::<Vec<_>>();
        let mut block_count = live
            .iter()
            .map(|state| block[*state])
            .collect::<BTreeSet<_>>()
            .len();
        loop {
            let mut signatures = BTreeMap::new();
            let mut refined = vec![0usize; self.num_states()];
            for &state in &live {
                let signature = (
                    block[state],
                    self.alphabet
                        .iter()
                        .map(|event| {
                            self.successor(state, event)
                                .filter(|target| live.contains(target))
                                .map(|target| block[target])
                        })
                        .collect::<Vec<_>>(),
                );
                let next_id = signatures.len();
                refined[state] = *signatures.entry(signature).or_insert(next_id);
            }
            block = refined;
            if signatures.len() == block_count {
                break;
            }
            block_count = signatures.len();
        }

        // Build the quotient automaton, numbering blocks in BFS order.
        let mut index = BTreeMap::from([(block[self.initial], 0usize)]);
        let mut representatives = vec![self.initial];
        let mut queue = VecDeque::from([self.initial]);
        let mut transitions = vec![BTreeMap::new()];
        while let Some(state) = queue.pop_front() {
            let source = index[&block[state]];
            for (event, target) in self.edges(state) {
                if !live.contains(&target) {
                    continue;
                }
                let target_id = *index.entry(block[target]).or_insert_with(|| {
                    representatives.push(target);
                    transitions.push(BTreeMap::new());
                    queue.push_back(target);
                    representatives.len() - 1
                });
                transitions[source].insert(event.to_string(), target_id);
            }
        }

        Dfa {
            alphabet: self.alphabet.clone(),
            finals: representatives
                .iter()
                .map(|state| self.finals[*state])
                .collect(),
            transitions,
            initial: 0,
        }
    }

    /// States reachable from the initial state that can also reach a final state, plus
    /// the initial state itself.
    fn live_states(&self) -> BTreeSet<usize> {
        let mut reachable = BTreeSet::from([self.initial]);
        let mut queue = VecDeque::from([self.initial]);
        while let Some(state) = queue.pop_front() {
            for (_, target) in self.edges(state) {
                if reachable.insert(target) {
                    queue.push_back(target);
                }
            }
        }

        let mut predecessors = vec![Vec::new(); self.num_states()];
        for state in self.states() {
            for (_, target) in self.edges(state) {
                predecessors[target].push(state);
            }
        }
        let mut productive = self
            .states()
            .filter(|state| self.finals[*state])
            .collect::<BTreeSet<_>>();
        let mut queue = productive.iter().copied().collect::<VecDeque<_>>();
        while let Some(state) = queue.pop_front() {
            for &predecessor in &predecessors[state] {
                if productive.insert(predecessor) {
                    queue.push_back(predecessor);
                }
            }
        }

        let mut live = reachable
            .intersection(&productive)
            .copied()
            .collect::<BTreeSet<_>>();
        live.insert(self.initial);
        live
    }
}
