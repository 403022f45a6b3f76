use crate::automaton::{Dfa, FiniteAutomaton};

/// A "flat" configuration object for the state elimination procedure.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EliminationConfig {
    /// The minimal automaton whose language is converted. [`EliminationConfig::new`]
    /// minimizes the given automaton automatically.
    pub dfa: Dfa,
    /// Cancel the procedure if an intermediate semilinear set exceeds the given number of
    /// linear sets (default: `usize::MAX`).
    ///
    /// The Kleene star used by the procedure can produce exponentially many linear sets, so
    /// this is a useful guard for large automata. Sizes are estimated before each star or
    /// concatenation runs, so the limit also applies to linear sets that would later be
    /// merged as duplicates. A star whose size does not fit into `usize` is always cancelled.
    pub max_linear_sets: usize,
}

impl From<Dfa> for EliminationConfig {
    fn from(value: Dfa) -> Self {
        EliminationConfig::new(&value)
    }
}

impl From<&Dfa> for EliminationConfig {
    fn from(value: &Dfa) -> Self {
        EliminationConfig::new(value)
    }
}

impl From<&FiniteAutomaton> for EliminationConfig {
    fn from(value: &FiniteAutomaton) -> Self {
        EliminationConfig::new(&Dfa::from(value))
    }
}

impl EliminationConfig {
    /// Create a new [`EliminationConfig`] for the minimized version of `dfa`.
    pub fn new(dfa: &Dfa) -> EliminationConfig {
        EliminationConfig {
            dfa: dfa.minimize(),
            max_linear_sets: usize::MAX,
        }
    }
}
