//! Conversion of finite automata into semilinear sets.
//!
//! The language of an automaton is mapped to the set of Parikh vectors of its words. The
//! conversion uses state elimination: the automaton is first minimized, then states are
//! removed one by one while tracking, for every pair of states, the semilinear set of paths
//! between them.
//!
//! The procedure is implemented as a resumable [`StateElimination`] computation (one
//! eliminated state per step), so it can be paused, cancelled, or (with the `serde` feature)
//! serialized mid-run.
//!
//! # Example
//!
//! ```
//! use extremal_regions::automaton::{FiniteAutomaton, Symbol};
//! use extremal_regions::semilinear::SemilinearSet;
//! use extremal_regions::state_elimination::to_semilinear_set;
//!
//! let a = FiniteAutomaton::atomic_language(Symbol::event("a"));
//! let aa = a.concatenate(&a);
//! let set = to_semilinear_set(&aa).unwrap();
//! assert_eq!(set, SemilinearSet::containing_event("a", 2));
//! ```

use crate::automaton::Dfa;
use crate::semilinear::SemilinearSet;
use cancel_this::Cancellable;
use computation_process::{Algorithm, Computation};


mod elimination_config;
mod elimination_state;
mod elimination_step;

pub use elimination_config::EliminationConfig;
pub use elimination_state::EliminationState;
pub use elimination_step::EliminationStep;

/// The state elimination procedure as a resumable computation.
pub type StateElimination =
    Computation<EliminationConfig, EliminationState, SemilinearSet, EliminationStep>;

/// Compute the semilinear set of Parikh vectors of all words accepted by `automaton`.
///
/// The automaton is minimized first. Use [`StateElimination`] directly to configure
/// resource limits.
pub fn to_semilinear_set<A: Into<Dfa>>(automaton: A) -> Cancellable<SemilinearSet> {
    let config = EliminationConfig::from(automaton.into());
    let initial = EliminationState::from(&config);
    StateElimination::run(config, initial)
}
