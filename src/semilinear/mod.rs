//! Semilinear sets of Parikh vectors.
//!
//! A [`SemilinearSet`] is a finite union of [`LinearSet`] objects, and each linear set is a
//! base [`ParikhVector`] plus arbitrary non-negative multiples of its period vectors. These
//! are exactly the Parikh images of regular languages, which is what
//! [`crate::state_elimination`] computes.
//!
//! # Equality
//!
//! `==` compares representations, not the described sets of vectors. Two semilinear sets
//! can describe the same vectors and still compare unequal. Semantic comparison is available
//! through [`SemilinearSet::is_equivalent_to`], which checks membership of all vectors up to
//! a component bound.
//!
//! # Example
//!
//! ```
//! use extremal_regions::semilinear::{ParikhVector, SemilinearSet};
//!
//! let a = SemilinearSet::containing_event("a", 1);
//! let ab = a.concatenate(&SemilinearSet::containing_event("b", 1));
//! let star = a.union(&ab).kleene_star();
//!
//! assert!(star.contains(&ParikhVector::from_word(["a", "a", "b"])));
//! assert!(!star.contains(&ParikhVector::from_word(["b"])));
//! ```


mod linear_set;
mod parikh_vector;
mod semilinear_set;

pub use linear_set::LinearSet;
pub use parikh_vector::ParikhVector;
pub use semilinear_set::SemilinearSet;
