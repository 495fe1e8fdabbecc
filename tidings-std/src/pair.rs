//! A two-field value container that iterates over its fields.
//!
//! Iterating a [`Pair`] yields exactly two single-entry mappings, always in
//! the same order: `{"first": first}` then `{"second": second}`. Iteration is
//! lazy and borrows the pair, so it can be restarted any number of times.

use std::iter::FusedIterator;

/// Key of the first field.
pub const FIRST: &str = "first";
/// Key of the second field.
pub const SECOND: &str = "second";

/// An immutable pair of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pair<A, B> {
    first: A,
    second: B,
}

impl<A, B> Pair<A, B> {
    /// Create a new pair.
    pub const fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    /// The first value.
    pub fn first(&self) -> &A {
        &self.first
    }

    /// The second value.
    pub fn second(&self) -> &B {
        &self.second
    }

    /// Iterate over the two fields as keyed entries.
    pub fn iter(&self) -> PairIter<'_, A, B> {
        PairIter {
            pair: self,
            next: 0,
        }
    }

    /// Split into the two values.
    pub fn into_inner(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A, B> From<(A, B)> for Pair<A, B> {
    fn from((first, second): (A, B)) -> Self {
        Self::new(first, second)
    }
}

/// One field of a [`Pair`], keyed by its field name.
#[derive(Debug, PartialEq, Eq)]
pub enum PairEntry<'a, A, B> {
    /// `{"first": value}`
    First(&'a A),
    /// `{"second": value}`
    Second(&'a B),
}

impl<A, B> PairEntry<'_, A, B> {
    /// The field name this entry maps from.
    pub fn key(&self) -> &'static str {
        match self {
            Self::First(_) => FIRST,
            Self::Second(_) => SECOND,
        }
    }
}

impl<A, B> Clone for PairEntry<'_, A, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A, B> Copy for PairEntry<'_, A, B> {}

/// Iterator over the entries of a [`Pair`].
#[derive(Debug)]
pub struct PairIter<'a, A, B> {
    pair: &'a Pair<A, B>,
    next: u8,
}

impl<'a, A, B> Iterator for PairIter<'a, A, B> {
    type Item = PairEntry<'a, A, B>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = match self.next {
            0 => PairEntry::First(&self.pair.first),
            1 => PairEntry::Second(&self.pair.second),
            _ => return None,
        };
        self.next += 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = 2usize.saturating_sub(self.next as usize);
        (remaining, Some(remaining))
    }
}

impl<A, B> ExactSizeIterator for PairIter<'_, A, B> {}

impl<A, B> FusedIterator for PairIter<'_, A, B> {}

impl<'a, A, B> IntoIterator for &'a Pair<A, B> {
    type Item = PairEntry<'a, A, B>;
    type IntoIter = PairIter<'a, A, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
