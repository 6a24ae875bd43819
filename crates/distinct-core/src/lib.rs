#![forbid(unsafe_code)]

//! Duplicate detection over arbitrary sequences.
//!
//! Every entry point runs the same single pass: walk the sequence left to
//! right, remember what has been seen, stop at the first repeat. Only the
//! membership structure varies, see [`SeenSet`].

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::Hash;

/// Membership structure used to remember already-observed elements.
pub trait SeenSet<T> {
    fn empty() -> Self;

    /// Records `item`. Returns `false` when an equal element was already present,
    /// in which case nothing is stored.
    fn insert(&mut self, item: T) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone)]
pub struct HashSeen<T>(HashSet<T>);

impl<T: Eq + Hash> SeenSet<T> for HashSeen<T> {
    fn empty() -> Self {
        Self(HashSet::new())
    }

    fn insert(&mut self, item: T) -> bool {
        self.0.insert(item)
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Debug, Clone)]
pub struct OrderedSeen<T>(BTreeSet<T>);

impl<T: Ord> SeenSet<T> for OrderedSeen<T> {
    fn empty() -> Self {
        Self(BTreeSet::new())
    }

    fn insert(&mut self, item: T) -> bool {
        self.0.insert(item)
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Growing list with a containment scan per insert. Quadratic; only useful
/// for element types that are neither hashable nor ordered.
#[derive(Debug, Clone)]
pub struct LinearSeen<T>(Vec<T>);

impl<T: PartialEq> SeenSet<T> for LinearSeen<T> {
    fn empty() -> Self {
        Self(Vec::new())
    }

    fn insert(&mut self, item: T) -> bool {
        if self.0.contains(&item) {
            return false;
        }
        self.0.push(item);
        true
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MembershipStrategy {
    #[default]
    Hash,
    Ordered,
    Linear,
}

impl MembershipStrategy {
    #[must_use]
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw.trim() {
            "hash" => Some(Self::Hash),
            "ordered" | "tree" => Some(Self::Ordered),
            "linear" => Some(Self::Linear),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hash => "hash",
            Self::Ordered => "ordered",
            Self::Linear => "linear",
        }
    }
}

/// Returns `true` when no element of `seq` repeats.
#[must_use]
pub fn is_unique<I>(seq: I) -> bool
where
    I: IntoIterator,
    I::Item: Eq + Hash,
{
    is_unique_with::<HashSeen<I::Item>, I>(seq)
}

#[must_use]
pub fn is_unique_with<S, I>(seq: I) -> bool
where
    I: IntoIterator,
    S: SeenSet<I::Item>,
{
    let mut seen = S::empty();
    seq.into_iter().all(|item| seen.insert(item))
}

#[must_use]
pub fn is_unique_by_strategy<I>(strategy: MembershipStrategy, seq: I) -> bool
where
    I: IntoIterator,
    I::Item: Eq + Hash + Ord,
{
    match strategy {
        MembershipStrategy::Hash => is_unique_with::<HashSeen<I::Item>, I>(seq),
        MembershipStrategy::Ordered => is_unique_with::<OrderedSeen<I::Item>, I>(seq),
        MembershipStrategy::Linear => is_unique_with::<LinearSeen<I::Item>, I>(seq),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplicate<T> {
    pub element: T,
    pub first_index: usize,
    pub repeat_index: usize,
}

/// Finds the earliest position at which an element repeats.
#[must_use]
pub fn first_duplicate<I>(seq: I) -> Option<Duplicate<I::Item>>
where
    I: IntoIterator,
    I::Item: Eq + Hash,
{
    let mut seen: HashMap<I::Item, usize> = HashMap::new();
    for (repeat_index, item) in seq.into_iter().enumerate() {
        match seen.entry(item) {
            Entry::Occupied(slot) => {
                let (element, first_index) = slot.remove_entry();
                return Some(Duplicate {
                    element,
                    first_index,
                    repeat_index,
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(repeat_index);
            }
        }
    }
    None
}

/// Treats the Unicode scalar values of `text` as the sequence. No case folding.
#[must_use]
pub fn chars_are_unique(text: &str) -> bool {
    is_unique(text.chars())
}

/// Drops exactly one trailing `\n` or `\r\n` from a whole-stream read.
#[must_use]
pub fn normalize_stream_text(raw: &str) -> &str {
    raw.strip_suffix("\r\n")
        .or_else(|| raw.strip_suffix('\n'))
        .unwrap_or(raw)
}
