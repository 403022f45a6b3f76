//! Finite automata over string events.
//!
//! [`FiniteAutomaton`] is an epsilon-NFA built compositionally from atomic languages. It is
//! converted into a [`Dfa`] by subset construction, and [`Dfa::minimize`] produces the
//! minimal automaton consumed by [`crate::state_elimination`].

use std::fmt::{Display, Formatter};


mod dfa;
mod finite_automaton;

pub use dfa::Dfa;
pub use finite_automaton::FiniteAutomaton;

/// A transition label: either a named event or the empty word.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Symbol {
    Epsilon,
    Event(String),
}

impl Symbol {
    pub fn event(name: &str) -> Symbol {
        Symbol::Event(name.to_string())
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    pub fn as_event(&self) -> Option<&str> {
        match self {
            Symbol::Epsilon => None,
            Symbol::Event(name) => Some(name.as_str()),
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Epsilon => write!(f, "ε"),
            Symbol::Event(name) => write!(f, "{name}"),
        }
    }
}
