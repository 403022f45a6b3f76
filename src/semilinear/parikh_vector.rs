use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// A Parikh vector: a mapping from event names to the number of occurrences of that event.
///
/// Events that are absent implicitly count zero. Zero entries are never stored, so two
/// vectors are equal exactly when they assign the same count to every event.
///
/// The derived [`Ord`] is a total order used for deterministic storage. The componentwise
/// partial order is available through [`ParikhVector::try_compare`].
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParikhVector {
    counts: BTreeMap<String, usize>,
}

impl ParikhVector {
    /// The zero vector.
    pub const fn new() -> ParikhVector {
        ParikhVector {
            counts: BTreeMap::new(),
        }
    }

    /// Count the events of the given word.
    pub fn from_word<I, S>(word: I) -> ParikhVector
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut result = ParikhVector::new();
        for event in word {
            *result.counts.entry(event.as_ref().to_string()).or_default() += 1;
        }
        result
    }

    /// A vector containing `count` copies of `event` and nothing else.
    pub fn with_count(event: &str, count: usize) -> ParikhVector {
        let mut result = ParikhVector::new();
        if count > 0 {
            result.counts.insert(event.to_string(), count);
        }
        result
    }

    /// Number of occurrences of `event` (zero for absent events).
    pub fn get(&self, event: &str) -> usize {
        self.counts.get(event).copied().unwrap_or(0)
    }

    /// The events with a non-zero count, in sorted order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(|it| it.as_str())
    }

    /// Iterate over `(event, count)` pairs with a non-zero count.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(event, count)| (event.as_str(), *count))
    }

    pub fn is_zero(&self) -> bool {
        self.counts.is_empty()
    }

    /// Componentwise sum of two vectors.
    pub fn add(&self, other: &ParikhVector) -> ParikhVector {
        let mut result = self.clone();
        for (event, count) in &other.counts {
            *result.counts.entry(event.clone()).or_default() += *count;
        }
        result
    }

    /// Componentwise difference `self - other`, or `None` if some component would
    /// become negative.
    pub fn checked_sub(&self, other: &ParikhVector) -> Option<ParikhVector> {
        let mut result = self.clone();
        for (event, count) in &other.counts {
            let current = result.get(event);
            match current.cmp(count) {
                Ordering::Less => return None,
                Ordering::Equal => {
                    result.counts.remove(event);
                }
                Ordering::Greater => {
                    result.counts.insert(event.clone(), current - *count);
                }
            }
        }
        Some(result)
    }

    /// Compare two vectors in the componentwise partial order.
    ///
    /// Returns `None` when the vectors are incomparable.
    pub fn try_compare(&self, other: &ParikhVector) -> Option<Ordering> {
        let mut result = Ordering::Equal;
        for event in self.labels().chain(other.labels()) {
            let component = self.get(event).cmp(&other.get(event));
            match (result, component) {
                (_, Ordering::Equal) => {}
                (Ordering::Equal, _) => result = component,
                (current, component) if current != component => return None,
                _ => {}
            }
        }
        Some(result)
    }

    /// Keep only the events accepted by `keep`.
    pub fn restrict<F: Fn(&str) -> bool>(&self, keep: F) -> ParikhVector {
        ParikhVector {
            counts: self
                .counts
                .iter()
                .filter(|(event, _)| keep(event))
                .map(|(event, count)| (event.clone(), *count))
                .collect(),
        }
    }

    /// True if no component of this vector exceeds `bound`.
    pub(crate) fn is_bounded_by(&self, bound: usize) -> bool {
        self.counts.values().all(|count| *count <= bound)
    }
}

impl Display for ParikhVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (index, (event, count)) in self.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{event}={count}")?;
        }
        write!(f, "}}")
    }
}
