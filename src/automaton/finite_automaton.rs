use crate::automaton::Symbol;
use std::collections::{BTreeSet, VecDeque};

/// A non-deterministic finite automaton with epsilon transitions.
///
/// States are indexed by an integer from `0` to `N-1`. The automaton is built from atomic
/// languages using the usual regular operations; each operation returns a new automaton.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FiniteAutomaton {
    states: Vec<NfaState>,
    initial: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct NfaState {
    is_final: bool,
    edges: Vec<(Symbol, usize)>,
}

impl FiniteAutomaton {
    /// The automaton accepting no word at all.
    pub fn empty_language() -> FiniteAutomaton {
        FiniteAutomaton {
            states: vec![NfaState::default()],
            initial: 0,
        }
    }

    /// The automaton accepting exactly the one-symbol word `symbol` (or just the empty word
    /// for [`Symbol::Epsilon`]).
    pub fn atomic_language(symbol: Symbol) -> FiniteAutomaton {
        FiniteAutomaton {
            states: vec![
                NfaState {
                    is_final: false,
                    edges: vec![(symbol, 1)],
                },
                NfaState {
                    is_final: true,
                    edges: Vec::new(),
                },
            ],
            initial: 0,
        }
    }

    /// The automaton accepting every word over `alphabet`.
    pub fn sigma_star<'a, I: IntoIterator<Item = &'a str>>(alphabet: I) -> FiniteAutomaton {
        alphabet
            .into_iter()
            .fold(FiniteAutomaton::empty_language(), |result, event| {
                result.union(&FiniteAutomaton::atomic_language(Symbol::event(event)))
            })
            .kleene_star()
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn initial_state(&self) -> usize {
        self.initial
    }

    /// # Panics
    ///
    /// Panics if `state` does not belong to this automaton.
    pub fn is_final(&self, state: usize) -> bool {
        self.states[state].is_final
    }

    /// The outgoing transitions of `state`.
    ///
    /// # Panics
    ///
    /// Panics if `state` does not belong to this automaton.
    pub fn edges(&self, state: usize) -> impl Iterator<Item = (&Symbol, usize)> {
        self.states[state]
            .edges
            .iter()
            .map(|(symbol, target)| (symbol, *target))
    }

    /// All events that appear on some transition.
    pub fn alphabet(&self) -> BTreeSet<String> {
        self.states
            .iter()
            .flat_map(|state| state.edges.iter())
            .filter_map(|(symbol, _)| symbol.as_event())
            .map(|event| event.to_string())
            .collect()
    }

    /// The language of `self` followed by the language of `other`.
    pub fn concatenate(&self, other: &FiniteAutomaton) -> FiniteAutomaton {
        let mut result = self.clone();
        let offset = result.append(other);
        for state in 0..self.num_states() {
            if result.states[state].is_final {
                result.states[state].is_final = false;
                result.states[state]
                    .edges
                    .push((Symbol::Epsilon, offset + other.initial));
            }
        }
        result
    }

    /// The union of the languages of `self` and `other`.
    pub fn union(&self, other: &FiniteAutomaton) -> FiniteAutomaton {
        let mut result = FiniteAutomaton {
            states: vec![NfaState::default()],
            initial: 0,
        };
        let left = result.append(self);
        let right = result.append(other);
        result.states[0].edges = vec![
            (Symbol::Epsilon, left + self.initial),
            (Symbol::Epsilon, right + other.initial),
        ];
        result
    }

    /// Zero or more repetitions of the language of `self`.
    pub fn kleene_star(&self) -> FiniteAutomaton {
        let mut result = FiniteAutomaton {
            states: vec![NfaState {
                is_final: true,
                edges: Vec::new(),
            }],
            initial: 0,
        };
        let offset = result.append(self);
        result.states[0]
            .edges
            .push((Symbol::Epsilon, offset + self.initial));
        for state in offset..result.num_states() {
            if result.states[state].is_final {
                result.states[state].edges.push((Symbol::Epsilon, 0));
            }
        }
        result
    }

    /// One or more repetitions of the language of `self`.
    pub fn kleene_plus(&self) -> FiniteAutomaton {
        self.concatenate(&self.kleene_star())
    }

    /// The language of `self` extended by the empty word.
    pub fn optional(&self) -> FiniteAutomaton {
        self.union(&FiniteAutomaton::atomic_language(Symbol::Epsilon))
    }

    /// The automaton accepting all prefixes of words of `self`: every state from which a
    /// final state can be reached becomes final.
    pub fn prefix_closure(&self) -> FiniteAutomaton {
        let mut predecessors = vec![Vec::new(); self.num_states()];
        for (source, state) in self.states.iter().enumerate() {
            for (_, target) in &state.edges {
                predecessors[*target].push(source);
            }
        }

        let mut result = self.clone();
        let mut queue = (0..self.num_states())
            .filter(|it| self.states[*it].is_final)
            .collect::<VecDeque<_>>();
        while let Some(state) = queue.pop_front() {
            for &predecessor in &predecessors[state] {
                if !result.states[predecessor].is_final {
                    result.states[predecessor].is_final = true;
                    queue.push_back(predecessor);
                }
            }
        }
        result
    }

    /// All states reachable from `states` using only epsilon transitions (including
    /// `states` themselves).
    pub fn epsilon_closure(&self, states: &BTreeSet<usize>) -> BTreeSet<usize> {
        let mut result = states.clone();
        let mut stack = states.iter().copied().collect::<Vec<_>>();
        while let Some(state) = stack.pop() {
            for (symbol, target) in self.edges(state) {
                if symbol.is_epsilon() && result.insert(target) {
                    stack.push(target);
                }
            }
        }
        result
    }

    /// The epsilon closure of all `event` successors of `states`.
    pub fn step(&self, states: &BTreeSet<usize>, event: &str) -> BTreeSet<usize> {
        let targets = states
            .iter()
            .flat_map(|state| self.edges(*state))
            .filter(|(symbol, _)| symbol.as_event() == Some(event))
            .map(|(_, target)| target)
            .collect::<BTreeSet<_>>();
        self.epsilon_closure(&targets)
    }

    /// Test whether the given word is accepted.
    pub fn accepts<S: AsRef<str>>(&self, word: &[S]) -> bool {
        let mut current = self.epsilon_closure(&BTreeSet::from([self.initial]));
        for event in word {
            current = self.step(&current, event.as_ref());
            if current.is_empty() {
                return false;
            }
        }
        current.iter().any(|state| self.states[*state].is_final)
    }

    /// Copy all states of `other` into `self`, returning the index offset of the copy.
    fn append(&mut self, other: &FiniteAutomaton) -> usize {
        let offset = self.states.len();
        self.states.extend(other.states.iter().map(|state| NfaState {
            is_final: state.is_final,
            edges: state
                .edges
                .iter()
                .map(|(symbol, target)| (symbol.clone(), offset + target))
                .collect(),
        }));
        offset
    }
}
