use num::bigint::BigInt;
use num::traits::{Signed, Zero};
use std::fmt::{Display, Formatter};

/// A region: the description of a single Petri net place.
///
/// Weights are indexed by event. A transition consumes `backward[e]` tokens from the place
/// and produces `forward[e]` tokens. A region is pure if no event both consumes and produces
/// tokens.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    pub initial_marking: BigInt,
    pub backward: Vec<BigInt>,
    pub forward: Vec<BigInt>,
}

impl Region {
    /// Create a region from separate consumption (`backward`) and production (`forward`)
    /// weights.
    ///
    /// # Panics
    ///
    /// Both weight vectors must have the same length.
    pub fn impure(initial_marking: BigInt, backward: Vec<BigInt>, forward: Vec<BigInt>) -> Region {
        assert_eq!(backward.len(), forward.len(), "Weight vectors must match.");
        Region {
            initial_marking,
            backward,
            forward,
        }
    }

    /// Create a pure region from one signed weight per event. Positive weights become
    /// production, negative weights become consumption.
    pub fn pure(initial_marking: BigInt, weights: &[BigInt]) -> Region {
        let zero = BigInt::zero();
        Region {
            initial_marking,
            backward: weights
                .iter()
                .map(|w| if w.is_negative() { -w } else { zero.clone() })
                .collect(),
            forward: weights
                .iter()
                .map(|w| if w.is_positive() { w.clone() } else { zero.clone() })
                .collect(),
        }
    }

    pub fn num_events(&self) -> usize {
        self.forward.len()
    }

    /// The effect of firing the event with the given index once.
    pub fn weight(&self, event: usize) -> BigInt {
        &self.forward[event] - &self.backward[event]
    }

    pub fn is_pure(&self) -> bool {
        self.forward
            .iter()
            .zip(&self.backward)
            .all(|(f, b)| f.is_zero() || b.is_zero())
    }

    /// The marking reached after firing events according to the given Parikh vector.
    pub fn marking_after(&self, parikh_vector: &[i64]) -> BigInt {
        parikh_vector
            .iter()
            .enumerate()
            .fold(self.initial_marking.clone(), |marking, (event, count)| {
                marking + self.weight(event) * BigInt::from(*count)
            })
    }

    /// Test whether the event with the given index can fire in `marking`.
    pub fn enables(&self, marking: &BigInt, event: usize) -> bool {
        marking >= &self.backward[event]
    }
}

impl Display for Region {
    /// For example `{init=1, 0:1/1}` lists the initial marking followed by
    /// `event:backward/forward` for every event index with a non-zero weight.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{init={}", self.initial_marking)?;
        for (event, (b, w)) in self.backward.iter().zip(&self.forward).enumerate() {
            if b.is_zero() && w.is_zero() {
                continue;
            }
            write!(f, ", {event}:{b}/{w}")?;
        }
        write!(f, "}}")
    }
}
