use crate::cone::linear_algebra::{dot, normalize, nullspace};
use crate::cone::{DoubleDescriptionState, ExtremalRays, PolyhedralCone, Ray};
use cancel_this::Cancellable;
use computation_process::Algorithm;
use log::debug;
use num::bigint::BigInt;
use num::traits::Zero;
use std::collections::BTreeSet;

/// A "flat" configuration object for the enumeration of extremal rays.
///
/// The constraint system of a [`PolyhedralCone`] is reduced to a pointed cone
/// `{y : M*y >= 0}` in a lower-dimensional coordinate system first:
///
///  - The lineality space `L = {x : Bx = 0, Ax = 0}` is computed. Only the pointed part
///    `C ∩ L⊥` of a cone has extremal rays, so the cone is restricted to it.
///  - The remaining equations are eliminated by choosing an integer basis `N` of their
///    solution space, so that `x = N*y`.
///  - Every inequality row `a` is projected to `a*N`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RayEnumeration {
    /// Number of variables of the original cone.
    pub dimension: usize,
    /// The basis vectors `N` (columns), each given in the original coordinates.
    pub basis: Vec<Ray>,
    /// The projected inequalities `M`, in the reduced coordinates.
    pub inequalities: Vec<Vec<BigInt>>,
    /// Cancel the procedure if the number of intermediate rays exceeds the given limit
    /// (default: `usize::MAX`).
    pub max_rays: usize,
}

impl From<&PolyhedralCone> for RayEnumeration {
    fn from(value: &PolyhedralCone) -> Self {
        RayEnumeration::new(value)
    }
}

impl RayEnumeration {
    pub fn new(cone: &PolyhedralCone) -> RayEnumeration {
        let dimension = cone.num_variables();
        let equations = cone.equations().cloned().collect::<Vec<_>>();
        let all_rows = equations
            .iter()
            .chain(cone.inequalities())
            .cloned()
            .collect::<Vec<_>>();

        let lineality = nullspace(&all_rows, dimension);
        let mut restricted = equations;
        restricted.extend(lineality.iter().cloned());
        let basis = nullspace(&restricted, dimension);

        let inequalities = cone
            .inequalities()
            .map(|row| normalize(basis.iter().map(|column| dot(row, column)).collect()))
            .filter(|row| row.iter().any(|it| !it.is_zero()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();

        debug!(
            "Reduced cone of dimension {} to dimension {} (lineality={}; inequalities={}).",
            dimension,
            basis.len(),
            lineality.len(),
            inequalities.len()
        );

        RayEnumeration {
            dimension,
            basis,
            inequalities,
            max_rays: usize::MAX,
        }
    }

    /// Dimension of the reduced coordinate system.
    pub fn reduced_dimension(&self) -> usize {
        self.basis.len()
    }

    /// Map a vector of reduced coordinates back into the original coordinates.
    pub fn expand(&self, reduced: &[BigInt]) -> Vec<BigInt> {
        let mut result = vec![BigInt::zero(); self.dimension];
        for (coefficient, column) in reduced.iter().zip(&self.basis) {
            if coefficient.is_zero() {
                continue;
            }
            for (value, entry) in result.iter_mut().zip(column) {
                *value += coefficient * entry;
            }
        }
        result
    }

    /// Run the double description method to completion.
    pub fn enumerate(self) -> Cancellable<BTreeSet<Ray>> {
        let initial = DoubleDescriptionState::from(&self);
        ExtremalRays::run(self, initial)
    }
}
