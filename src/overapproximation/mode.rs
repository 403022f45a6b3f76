use crate::cone::PolyhedralCone;
use crate::error::SynthesisError;
use crate::net::Region;
use num::bigint::BigInt;
use num::traits::One;

/// The kind of regions that are synthesized.
///
/// The mode fixes, in one place, the layout of the cone variables, the constraint rows built
/// over them, and the interpretation of an extremal ray as a [`Region`]:
///
///  - [`RegionMode::Impure`]: variables `[m0, forward(e_1..e_E), backward(e_1..e_E)]`, all
///    non-negative.
///  - [`RegionMode::Pure`]: variables `[m0, weight(e_1..e_E)]` where only `m0` is required to
///    be non-negative, since the signed weights may be negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegionMode {
    Pure,
    #[default]
    Impure,
}

impl RegionMode {
    /// Number of cone variables for `num_events` events.
    pub fn dimension(self, num_events: usize) -> usize {
        match self {
            RegionMode::Pure => 1 + num_events,
            RegionMode::Impure => 1 + 2 * num_events,
        }
    }

    /// The row `initial * m0 + effect(parikh_vector)`, i.e. the marking reached after firing
    /// the events counted by `parikh_vector` (scaled by `initial` for the initial marking).
    pub fn row<T: Clone + Into<BigInt>>(self, initial: i64, parikh_vector: &[T]) -> Vec<BigInt> {
        let weights = parikh_vector.iter().cloned().map(Into::into);
        let mut row = vec![BigInt::from(initial)];
        match self {
            RegionMode::Pure => row.extend(weights),
            RegionMode::Impure => {
                let forward = weights.collect::<Vec<_>>();
                let backward = forward.iter().map(|it| -it).collect::<Vec<_>>();
                row.extend(forward);
                row.extend(backward);
            }
        }
        row
    }

    /// A row stating that `event` can fire in the marking reached by `prefix`.
    pub fn enabled_after<T: Clone + Into<BigInt>>(self, prefix: &[T], event: usize) -> Vec<BigInt> {
        let mut row = self.row(1, prefix);
        match self {
            // m + w(event) >= 0
            RegionMode::Pure => row[1 + event] += BigInt::one(),
            // m - backward(event) >= 0
            RegionMode::Impure => row[1 + prefix.len() + event] -= BigInt::one(),
        }
        row
    }

    /// A row stating that `event` could fire as the last event of a word with Parikh vector
    /// `word` (which already counts this last occurrence of `event`).
    pub fn enabled_last<T: Clone + Into<BigInt>>(self, word: &[T], event: usize) -> Vec<BigInt> {
        let mut row = self.row(1, word);
        match self {
            // The marking after the word is m + w(event) and must be non-negative.
            RegionMode::Pure => {}
            // The marking before the last event is m - forward(event) + backward(event) and
            // must be at least backward(event).
            RegionMode::Impure => row[1 + event] -= BigInt::one(),
        }
        row
    }

    /// Require all variables that describe token counts to be non-negative.
    pub fn add_non_negativity(
        self,
        cone: &mut PolyhedralCone,
        num_events: usize,
    ) -> Result<(), SynthesisError> {
        let dimension = self.dimension(num_events);
        let constrained = match self {
            RegionMode::Pure => 1,
            RegionMode::Impure => dimension,
        };
        for variable in 0..constrained {
            let mut row = vec![0; dimension];
            row[variable] = 1;
            cone.add_inequality(row)?;
        }
        Ok(())
    }

    /// Interpret an extremal ray as a region.
    ///
    /// # Panics
    ///
    /// The ray must have exactly [`RegionMode::dimension`] coordinates.
    pub fn region(self, ray: &[BigInt], num_events: usize) -> Region {
        assert_eq!(ray.len(), self.dimension(num_events), "Ray has wrong dimension.");
        match self {
            RegionMode::Pure => Region::pure(ray[0].clone(), &ray[1..]),
            RegionMode::Impure => Region::impure(
                ray[0].clone(),
                ray[1 + num_events..].to_vec(),
                ray[1..1 + num_events].to_vec(),
            ),
        }
    }
}
