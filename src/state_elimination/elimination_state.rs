use crate::automaton::Dfa;
use crate::semilinear::SemilinearSet;
use crate::state_elimination::EliminationConfig;

/// The intermediate state of [`crate::state_elimination::StateElimination`].
///
/// `mapping` is a square matrix (stored row by row) where entry `(s1, s2)` is the semilinear
/// set of Parikh vectors of paths from `s1` to `s2` that only pass through already
/// eliminated states. `None` means no such path is known.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EliminationState {
    pub num_states: usize,
    pub eliminated: usize,
    pub mapping: Vec<Option<SemilinearSet>>,
}

impl From<&Dfa> for EliminationState {
    /// Every state reaches itself by the empty word, and each transition `s -σ-> t`
    /// contributes `{σ}` to entry `(s, t)`.
    fn from(value: &Dfa) -> Self {
        let num_states = value.num_states();
        let mut state = EliminationState {
            num_states,
            eliminated: 0,
            mapping: vec![None; num_states * num_states],
        };
        for source in value.states() {
            state.add(source, source, &SemilinearSet::null());
            for (event, target) in value.edges(source) {
                state.add(source, target, &SemilinearSet::containing_event(event, 1));
            }
        }
        state
    }
}

impl From<&EliminationConfig> for EliminationState {
    fn from(value: &EliminationConfig) -> Self {
        EliminationState::from(&value.dfa)
    }
}

impl EliminationState {
    pub fn get(&self, source: usize, target: usize) -> Option<&SemilinearSet> {
        self.mapping[source * self.num_states + target].as_ref()
    }

    /// Extend entry `(source, target)` by `set`, returning the size of the updated entry.
    pub fn add(&mut self, source: usize, target: usize, set: &SemilinearSet) -> usize {
        let entry = &mut self.mapping[source * self.num_states + target];
        let updated = match entry {
            Some(current) => current.union(set),
            None => set.clone(),
        };
        let size = updated.len();
        *entry = Some(updated);
        size
    }
}
