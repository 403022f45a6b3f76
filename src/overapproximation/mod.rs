//! Petri net over-approximation by minimal regions.
//!
//! A region assigns an initial marking and per-event arc weights to a single place such that
//! the place never blocks a behavior of the input. Regions form the integer points of a
//! polyhedral cone, and the minimal regions are its extremal rays. Every driver in this module
//! builds that cone, enumerates its extremal rays, and turns each ray into a place:
//!
//!  - [`overapproximate_lts`] and [`overapproximate_lts_net`] work on the reachable part of a
//!    [`TransitionSystem`](crate::transition_system::TransitionSystem).
//!  - [`overapproximate_language`] works on the prefix closure of the language of a
//!    [`FiniteAutomaton`](crate::automaton::FiniteAutomaton).
//!
//! [`RegionMode`] decides whether regions may consume and produce on the same event.
//!
//! # Example
//!
//! ```
//! use extremal_regions::overapproximation::{RegionMode, overapproximate_lts_net};
//! use extremal_regions::transition_system::TransitionSystem;
//!
//! let mut ts = TransitionSystem::new("s0");
//! let s1 = ts.add_state("s1");
//! ts.add_arc(ts.initial_state(), "a", s1);
//!
//! let net = overapproximate_lts_net(&ts, RegionMode::Impure).unwrap();
//! assert!(net.can_fire_sequence(&["a"]).unwrap());
//! assert!(!net.can_fire_sequence(&["a", "a"]).unwrap());
//! ```

#[cfg(test)]
mod tests;

mod language;
mod lts;
mod mode;

pub use language::{LanguageConfig, language_cone, language_regions, overapproximate_language};
pub use lts::{lts_cone, overapproximate_lts, overapproximate_lts_net};
pub use mode::RegionMode;
