use crate::cone::linear_algebra::{dot, normalize, nullspace, rank};
use crate::cone::{Ray, RayEnumeration};
use cancel_this::{Cancelled, is_cancelled};
use computation_process::Incomplete::Suspended;
use computation_process::{Completable, ComputationStep};
use log::{debug, trace};
use num::bigint::{BigInt, Sign};
use num::traits::Signed;
use std::collections::BTreeSet;

/// A ray of the intermediate cone, in reduced coordinates, together with the indices of the
/// processed inequalities it satisfies with equality.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReducedRay {
    pub coordinates: Vec<BigInt>,
    pub zeros: BTreeSet<usize>,
}

/// The intermediate state of [`crate::cone::ExtremalRays`]: the extremal rays of the cone
/// given by the already processed inequalities, and the inequalities still waiting.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoubleDescriptionState {
    pub rays: Vec<ReducedRay>,
    pub pending: Vec<usize>,
    pub processed: usize,
}

impl From<&RayEnumeration> for DoubleDescriptionState {
    /// The initial cone is the simplicial cone of a maximal linearly independent subset `K` of
    /// the inequalities. Its rays are the solutions that are tight on all rows of `K` but one.
    ///
    /// # Panics
    ///
    /// The reduced cone is pointed, so the inequalities must have full rank.
    fn from(value: &RayEnumeration) -> Self {
        let dimension = value.reduced_dimension();
        if dimension == 0 {
            return DoubleDescriptionState {
                rays: Vec::new(),
                pending: Vec::new(),
                processed: 0,
            };
        }

        let mut independent: Vec<usize> = Vec::new();
        let mut pending = Vec::new();
        for (index, row) in value.inequalities.iter().enumerate() {
            if independent.len() < dimension {
                let mut candidate = independent
                    .iter()
                    .map(|it| value.inequalities[*it].clone())
                    .collect::<Vec<_>>();
                candidate.push(row.clone());
                if rank(&candidate, dimension) == candidate.len() {
                    independent.push(index);
                    continue;
                }
            }
            pending.push(index);
        }
        assert_eq!(
            independent.len(),
            dimension,
            "Inequalities of a pointed cone must have full rank."
        );

        let rays = independent
            .iter()
            .map(|excluded| {
                let others = independent
                    .iter()
                    .filter(|it| *it != excluded)
                    .map(|it| value.inequalities[*it].clone())
                    .collect::<Vec<_>>();
                let Some(mut coordinates) = nullspace(&others, dimension).pop() else {
                    unreachable!("Independent rows leave a one-dimensional nullspace.");
                };
                if dot(&value.inequalities[*excluded], &coordinates).is_negative() {
                    coordinates.iter_mut().for_each(|it| *it = -it.clone());
                }
                ReducedRay {
                    coordinates,
                    zeros: independent
                        .iter()
                        .filter(|it| *it != excluded)
                        .copied()
                        .collect(),
                }
            })
            .collect();

        // Process the rows in reverse, so that `pop` takes them in their original order.
        pending.reverse();
        DoubleDescriptionState {
            rays,
            pending,
            processed: independent.len(),
        }
    }
}

/// A [`ComputationStep`] which intersects the current cone with one further inequality.
///
/// Rays strictly inside the new half-space are kept, rays on its boundary are kept and
/// remember the new tight row, and rays outside are removed. Each adjacent pair of an inside
/// and an outside ray contributes a new ray on the boundary.
pub struct DoubleDescriptionStep;

impl ComputationStep<RayEnumeration, DoubleDescriptionState, BTreeSet<Ray>>
    for DoubleDescriptionStep
{
    fn step(
        context: &RayEnumeration,
        state: &mut DoubleDescriptionState,
    ) -> Completable<BTreeSet<Ray>> {
        let total = context.inequalities.len();
        if state.rays.len() > context.max_rays {
            debug!(
                "[row:{}/{}] Enumeration canceled (exceeded ray count).",
                state.processed, total
            );

            return Err(Cancelled::new("RayEnumeration::max_rays").into());
        }

        let Some(row_index) = state.pending.pop() else {
            let result = state
                .rays
                .iter()
                .map(|ray| normalize(context.expand(&ray.coordinates)))
                .collect::<BTreeSet<_>>();
            debug!(
                "[row:{}/{}] Enumeration finished with {} rays.",
                state.processed,
                total,
                result.len()
            );
            return Ok(result);
        };

        let row = &context.inequalities[row_index];
        let mut positive = Vec::new();
        let mut negative = Vec::new();
        let mut next_rays = Vec::new();
        for ray in state.rays.drain(..) {
            let value = dot(row, &ray.coordinates);
            match value.sign() {
                Sign::Plus => positive.push((value, ray)),
                Sign::Minus => negative.push((value, ray)),
                Sign::NoSign => {
                    let mut ray = ray;
                    ray.zeros.insert(row_index);
                    next_rays.push(ray);
                }
            }
        }

        // Only a ray that is tight on at least `dimension - 2` common rows can be adjacent.
        let required = context.reduced_dimension().saturating_sub(2);
        let others = positive
            .iter()
            .chain(negative.iter())
            .map(|(_, ray)| &ray.zeros)
            .chain(next_rays.iter().map(|ray| &ray.zeros))
            .collect::<Vec<_>>();
        let mut created = Vec::new();
        for (p_value, p_ray) in &positive {
            is_cancelled!()?;
            for (n_value, n_ray) in &negative {
                let common = p_ray
                    .zeros
                    .intersection(&n_ray.zeros)
                    .copied()
                    .collect::<BTreeSet<_>>();
                if common.len() < required {
                    continue;
                }
                let adjacent = others.iter().all(|zeros| {
                    std::ptr::eq(*zeros, &p_ray.zeros)
                        || std::ptr::eq(*zeros, &n_ray.zeros)
                        || !common.is_subset(zeros)
                });
                if !adjacent {
                    continue;
                }

                // p_value > 0 and n_value < 0, so both coefficients are positive.
                let coordinates = p_ray
                    .coordinates
                    .iter()
                    .zip(&n_ray.coordinates)
                    .map(|(p, n)| p_value * n - n_value * p)
                    .collect::<Vec<_>>();
                let mut zeros = common;
                zeros.insert(row_index);
                trace!("New ray {coordinates:?} on the boundary of row {row_index}.");
                created.push(ReducedRay {
                    coordinates: normalize(coordinates),
                    zeros,
                });
            }
        }

        debug!(
            "[row:{}/{}] Kept {} rays, removed {} rays, created {} rays.",
            state.processed + 1,
            total,
            positive.len() + next_rays.len(),
            negative.len(),
            created.len()
        );

        next_rays.extend(positive.into_iter().map(|(_, ray)| ray));
        next_rays.extend(created);
        next_rays.sort_by(|a, b| a.coordinates.cmp(&b.coordinates));
        state.rays = next_rays;
        state.processed += 1;
        Err(Suspended)
    }
}
