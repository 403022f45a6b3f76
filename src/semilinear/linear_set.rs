use crate::semilinear::ParikhVector;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// A linear set `base + periods*`, i.e. all vectors `base + k_1*p_1 + ... + k_n*p_n` for
/// non-negative integers `k_i`.
///
/// The zero vector is never stored as a period. Equality is structural: two linear sets
/// describing the same vectors through different periods compare unequal. Use
/// [`crate::semilinear::SemilinearSet::is_equivalent_to`] for a semantic comparison.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearSet {
    base: ParikhVector,
    periods: BTreeSet<ParikhVector>,
}

impl LinearSet {
    /// The linear set containing just the zero vector.
    pub const NULL: LinearSet = LinearSet {
        base: ParikhVector::new(),
        periods: BTreeSet::new(),
    };

    /// Create a linear set from a base vector and a collection of periods. Zero periods
    /// are dropped.
    pub fn new<I: IntoIterator<Item = ParikhVector>>(base: ParikhVector, periods: I) -> LinearSet {
        LinearSet {
            base,
            periods: periods.into_iter().filter(|it| !it.is_zero()).collect(),
        }
    }

    /// The linear set containing `count` copies of `event` and nothing else.
    pub fn containing_event(event: &str, count: usize) -> LinearSet {
        LinearSet {
            base: ParikhVector::with_count(event, count),
            periods: BTreeSet::new(),
        }
    }

    /// The constant part (base vector) of this set.
    pub fn base(&self) -> &ParikhVector {
        &self.base
    }

    /// The repeated part (period vectors) of this set.
    pub fn periods(&self) -> &BTreeSet<ParikhVector> {
        &self.periods
    }

    /// Concatenation: the bases are added and the periods are united.
    pub fn concatenate(&self, other: &LinearSet) -> LinearSet {
        LinearSet::new(
            self.base.add(&other.base),
            self.periods.iter().chain(other.periods.iter()).cloned(),
        )
    }

    /// Kleene plus: one or more repetitions. The base becomes an additional period.
    pub fn kleene_plus(&self) -> LinearSet {
        LinearSet::new(
            self.base.clone(),
            self.periods
                .iter()
                .cloned()
                .chain(std::iter::once(self.base.clone())),
        )
    }

    /// Exact membership test: is `vector` equal to `base` plus a non-negative integer
    /// combination of the periods?
    ///
    /// The search tries every multiplicity of every period, so it is exponential in the
    /// number of periods.
    pub fn contains(&self, vector: &ParikhVector) -> bool {
        let Some(remainder) = vector.checked_sub(&self.base) else {
            return false;
        };
        let periods = self.periods.iter().collect::<Vec<_>>();
        is_combination(&remainder, &periods)
    }

    /// True if every vector of `other` surely belongs to `self`: the periods of `other`
    /// are periods of `self` and the base of `other` is a member of `self`.
    ///
    /// This is only a sufficient condition for containment.
    pub(crate) fn covers(&self, other: &LinearSet) -> bool {
        other.periods.is_subset(&self.periods) && self.contains(&other.base)
    }
}

/// Search for non-negative multiplicities of `periods` that sum up to `target`.
///
/// Every period is non-zero, hence each one can only be subtracted finitely often.
fn is_combination(target: &ParikhVector, periods: &[&ParikhVector]) -> bool {
    if target.is_zero() {
        return true;
    }
    let Some((first, rest)) = periods.split_first() else {
        return false;
    };
    let mut remainder = target.clone();
    loop {
        if is_combination(&remainder, rest) {
            return true;
        }
        match remainder.checked_sub(first) {
            Some(next) => remainder = next,
            None => return false,
        }
    }
}

impl Display for LinearSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}+[", self.base)?;
        for (index, period) in self.periods.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{period}")?;
        }
        write!(f, "]*)")
    }
}
