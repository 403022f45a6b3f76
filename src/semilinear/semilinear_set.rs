use crate::semilinear::{LinearSet, ParikhVector};
use cancel_this::{Cancellable, is_cancelled};
use std::collections::{BTreeSet, VecDeque};
use std::fmt::{Display, Formatter};

/// A semilinear set: a finite union of [`LinearSet`] objects.
///
/// Semilinear sets are immutable; every operation returns a new value. Equality and hashing
/// are structural (they compare the sets of linear sets), not semantic.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SemilinearSet {
    linear_sets: BTreeSet<LinearSet>,
}

impl SemilinearSet {
    /// The empty semilinear set.
    pub const EMPTY: SemilinearSet = SemilinearSet {
        linear_sets: BTreeSet::new(),
    };

    /// The semilinear set containing just the zero vector.
    pub fn null() -> SemilinearSet {
        SemilinearSet::containing(LinearSet::NULL)
    }

    /// The semilinear set consisting of the single given linear set.
    pub fn containing(linear_set: LinearSet) -> SemilinearSet {
        SemilinearSet {
            linear_sets: BTreeSet::from([linear_set]),
        }
    }

    /// The semilinear set containing `count` copies of `event` and nothing else.
    pub fn containing_event(event: &str, count: usize) -> SemilinearSet {
        SemilinearSet::containing(LinearSet::containing_event(event, count))
    }

    pub fn iter(&self) -> impl Iterator<Item = &LinearSet> {
        self.linear_sets.iter()
    }

    /// Number of linear sets in this union.
    pub fn len(&self) -> usize {
        self.linear_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.linear_sets.is_empty()
    }

    pub fn union(&self, other: &SemilinearSet) -> SemilinearSet {
        SemilinearSet {
            linear_sets: self.linear_sets.union(&other.linear_sets).cloned().collect(),
        }
    }

    /// Pairwise concatenation of all members of `self` with all members of `other`.
    pub fn concatenate(&self, other: &SemilinearSet) -> SemilinearSet {
        let mut linear_sets = BTreeSet::new();
        for first in &self.linear_sets {
            for second in &other.linear_sets {
                linear_sets.insert(first.concatenate(second));
            }
        }
        SemilinearSet { linear_sets }
    }

    /// Kleene star.
    ///
    /// For every subset `T` of the members, the result contains the concatenation of
    /// `kleene_plus(L)` over all `L` in `T` (the empty subset contributes the zero vector).
    /// The subsets are enumerated explicitly, so the result can have up to `2^k` members
    /// for `k` members of `self`.
    pub fn kleene_star(&self) -> SemilinearSet {
        let mut subsets = vec![LinearSet::NULL];
        for member in &self.linear_sets {
            let plus = member.kleene_plus();
            let extended = subsets
                .iter()
                .map(|subset| subset.concatenate(&plus))
                .collect::<Vec<_>>();
            subsets.extend(extended);
        }
        SemilinearSet {
            linear_sets: subsets.into_iter().collect(),
        }
    }

    /// Like [`SemilinearSet::concatenate`], but checks for cancellation after every
    /// produced member.
    pub(crate) fn cancellable_concatenate(
        &self,
        other: &SemilinearSet,
    ) -> Cancellable<SemilinearSet> {
        let mut linear_sets = BTreeSet::new();
        for first in &self.linear_sets {
            for second in &other.linear_sets {
                is_cancelled!()?;
                linear_sets.insert(first.concatenate(second));
            }
        }
        Ok(SemilinearSet { linear_sets })
    }

    /// Like [`SemilinearSet::kleene_star`], but checks for cancellation after every
    /// produced subset.
    pub(crate) fn cancellable_kleene_star(&self) -> Cancellable<SemilinearSet> {
        let mut subsets = vec![LinearSet::NULL];
        for member in &self.linear_sets {
            let plus = member.kleene_plus();
            let mut extended = Vec::with_capacity(subsets.len());
            for subset in &subsets {
                is_cancelled!()?;
                extended.push(subset.concatenate(&plus));
            }
            subsets.extend(extended);
        }
        Ok(SemilinearSet {
            linear_sets: subsets.into_iter().collect(),
        })
    }

    /// Number of linear sets produced by [`SemilinearSet::kleene_star`] before duplicates
    /// are merged, i.e. `2^len`. `None` if this number does not fit into `usize`.
    pub(crate) fn kleene_star_size(&self) -> Option<usize> {
        u32::try_from(self.len())
            .ok()
            .and_then(|exponent| 1usize.checked_shl(exponent))
    }

    /// Exact membership test.
    ///
    /// Each linear set is searched for a non-negative combination of its periods, which
    /// takes time exponential in the number of periods.
    pub fn contains(&self, vector: &ParikhVector) -> bool {
        self.linear_sets.iter().any(|it| it.contains(vector))
    }

    /// Look for a vector of `self` that is not a member of `other`.
    ///
    /// Linear sets are infinite, so only vectors whose components are all at most `bound`
    /// are enumerated (the base vector of each linear set is always tested). Linear sets that
    /// are syntactically covered by some member of `other` are skipped.
    pub fn find_counterexample(&self, other: &SemilinearSet, bound: usize) -> Option<ParikhVector> {
        for linear in &self.linear_sets {
            if other.iter().any(|it| it.covers(linear)) {
                continue;
            }

            let mut visited = BTreeSet::from([linear.base().clone()]);
            let mut queue = VecDeque::from([linear.base().clone()]);
            while let Some(vector) = queue.pop_front() {
                if !other.contains(&vector) {
                    return Some(vector);
                }
                for period in linear.periods() {
                    let next = vector.add(period);
                    if next.is_bounded_by(bound) && visited.insert(next.clone()) {
                        queue.push_back(next);
                    }
                }
            }
        }
        None
    }

    /// Bounded containment check, see [`SemilinearSet::find_counterexample`] and the cost
    /// notes on [`SemilinearSet::is_equivalent_to`].
    pub fn is_subset_of(&self, other: &SemilinearSet, bound: usize) -> bool {
        self.find_counterexample(other, bound).is_none()
    }

    /// Bounded semantic equivalence: containment in both directions up to `bound`.
    ///
    /// Unlike `==`, this compares the represented vectors, not the representation.
    /// Every enumerated vector is tested with [`SemilinearSet::contains`], so the cost grows
    /// with the number of vectors below `bound` times the (exponential) membership test.
    pub fn is_equivalent_to(&self, other: &SemilinearSet, bound: usize) -> bool {
        self.is_subset_of(other, bound) && other.is_subset_of(self, bound)
    }
}

impl From<LinearSet> for SemilinearSet {
    fn from(value: LinearSet) -> Self {
        SemilinearSet::containing(value)
    }
}

impl FromIterator<LinearSet> for SemilinearSet {
    fn from_iter<T: IntoIterator<Item = LinearSet>>(iter: T) -> Self {
        SemilinearSet {
            linear_sets: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SemilinearSet {
    type Item = &'a LinearSet;
    type IntoIter = std::collections::btree_set::Iter<'a, LinearSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.linear_sets.iter()
    }
}

impl Display for SemilinearSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (index, linear) in self.linear_sets.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{linear}")?;
        }
        write!(f, "]")
    }
}
