//! Polyhedral cones and the enumeration of their extremal rays.
//!
//! A [`PolyhedralCone`] is the solution set `{x : Bx = 0, Ax >= 0}` of a homogeneous linear
//! system with integer coefficients. Its extremal rays are computed by the double description
//! method, using exact arithmetic throughout. The enumeration is available as a resumable
//! [`ExtremalRays`] computation which processes one inequality per step.
//!
//! # Non-pointed cones
//!
//! A cone that contains a line (for example, the whole space) has no extremal rays in the
//! strict sense. For such cones, the rays of the pointed part `C ∩ L⊥` are returned, where
//! `L` is the largest linear subspace contained in `C`. In particular, the whole space yields
//! no rays at all.
//!
//! # Example
//!
//! ```
//! use extremal_regions::cone::PolyhedralCone;
//! use num::bigint::BigInt;
//!
//! let mut cone = PolyhedralCone::new(2);
//! cone.add_inequality([1, 0]).unwrap();
//! cone.add_inequality([-1, 1]).unwrap();
//! let rays = cone.find_extremal_rays().unwrap();
//!
//! let expected = [[0, 1], [1, 1]]
//!     .map(|ray| ray.map(BigInt::from).to_vec());
//! assert_eq!(rays.into_iter().collect::<Vec<_>>(), expected);
//! ```

use crate::cone::linear_algebra::dot;
use crate::error::SynthesisError;
use cancel_this::Cancellable;
use computation_process::Computation;
use indexmap::IndexSet;
use num::bigint::BigInt;
use num::traits::{Signed, Zero};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

#[cfg(test)]
mod tests;

mod double_description;
mod linear_algebra;
mod ray_enumeration;

pub use double_description::{DoubleDescriptionState, DoubleDescriptionStep, ReducedRay};
pub use ray_enumeration::RayEnumeration;

/// An extremal ray: an integer vector whose components have no common divisor.
pub type Ray = Vec<BigInt>;

/// The double description method as a resumable computation.
pub type ExtremalRays =
    Computation<RayEnumeration, DoubleDescriptionState, BTreeSet<Ray>, DoubleDescriptionStep>;

/// A polyhedral cone `{x : Bx = 0, Ax >= 0}` over a fixed number of variables.
///
/// Rows are stored as sets: adding a duplicate row has no effect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolyhedralCone {
    num_variables: usize,
    equations: IndexSet<Vec<BigInt>>,
    inequalities: IndexSet<Vec<BigInt>>,
}

impl PolyhedralCone {
    /// An unconstrained cone (the whole space) with `num_variables` variables.
    pub fn new(num_variables: usize) -> PolyhedralCone {
        PolyhedralCone {
            num_variables,
            equations: IndexSet::new(),
            inequalities: IndexSet::new(),
        }
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    /// The rows of `B`, in insertion order.
    pub fn equations(&self) -> impl Iterator<Item = &Vec<BigInt>> {
        self.equations.iter()
    }

    /// The rows of `A`, in insertion order.
    pub fn inequalities(&self) -> impl Iterator<Item = &Vec<BigInt>> {
        self.inequalities.iter()
    }

    /// Add an equation `b * x = 0`. There must be exactly one coefficient per variable.
    pub fn add_equation<T: Into<BigInt>, I: IntoIterator<Item = T>>(
        &mut self,
        coefficients: I,
    ) -> Result<(), SynthesisError> {
        let row = self.check_row(coefficients)?;
        self.equations.insert(row);
        Ok(())
    }

    /// Add an inequality `a * x >= 0`. There must be exactly one coefficient per variable.
    pub fn add_inequality<T: Into<BigInt>, I: IntoIterator<Item = T>>(
        &mut self,
        coefficients: I,
    ) -> Result<(), SynthesisError> {
        let row = self.check_row(coefficients)?;
        self.inequalities.insert(row);
        Ok(())
    }

    /// Test whether `vector` satisfies all constraints of this cone.
    pub fn contains(&self, vector: &[BigInt]) -> bool {
        vector.len() == self.num_variables
            && self.equations.iter().all(|row| dot(row, vector).is_zero())
            && self
                .inequalities
                .iter()
                .all(|row| !dot(row, vector).is_negative())
    }

    /// Compute the extremal rays of this cone (see the module documentation for cones that
    /// are not pointed).
    pub fn find_extremal_rays(&self) -> Cancellable<BTreeSet<Ray>> {
        RayEnumeration::from(self).enumerate()
    }

    fn check_row<T: Into<BigInt>, I: IntoIterator<Item = T>>(
        &self,
        coefficients: I,
    ) -> Result<Vec<BigInt>, SynthesisError> {
        let row = coefficients.into_iter().map(Into::into).collect::<Vec<_>>();
        if row.len() != self.num_variables {
            return Err(SynthesisError::DimensionMismatch {
                expected: self.num_variables,
                actual: row.len(),
            });
        }
        Ok(row)
    }
}

impl Display for PolyhedralCone {
    /// One line per row, e.g. `1*x[0] + -1*x[2] >= 0`, enclosed in brackets.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "[")?;
        let rows = self
            .equations
            .iter()
            .map(|row| (row, "="))
            .chain(self.inequalities.iter().map(|row| (row, ">=")));
        for (row, operation) in rows {
            let mut first = true;
            for (index, value) in row.iter().enumerate() {
                if value.is_zero() {
                    continue;
                }
                if !first {
                    write!(f, " + ")?;
                }
                write!(f, "{value}*x[{index}]")?;
                first = false;
            }
            if first {
                write!(f, "0")?;
            }
            writeln!(f, " {operation} 0")?;
        }
        write!(f, "]")
    }
}
