//! Petri net over-approximation of transition systems and regular languages using minimal
//! regions.
//!
//! The crate is organized bottom-up:
//!
//!  - [`semilinear`] and [`automaton`] describe languages and their Parikh images.
//!  - [`state_elimination`] converts a finite automaton into a semilinear set.
//!  - [`cone`] enumerates the extremal rays of a polyhedral cone.
//!  - [`transition_system`] and [`net`] are the input and output models.
//!  - [`overapproximation`] ties everything together.

use crate::semilinear::SemilinearSet;

#[cfg(test)]
mod test_utils;

pub mod automaton;
pub mod cone;
pub mod error;
pub mod net;
pub mod overapproximation;
pub mod semilinear;
pub mod state_elimination;
pub mod transition_system;

pub use error::SynthesisError;

/// A utility method for printing useful metadata of semilinear sets.
fn log_set(set: &SemilinearSet) -> String {
    format!(
        "linear sets={}; periods={}",
        set.len(),
        set.iter().map(|it| it.periods().len()).sum::<usize>()
    )
}
