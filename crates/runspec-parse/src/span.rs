use std::ops::Range;

use derive_more::derive::{AsRef, Deref, From};

/// A byte range into the run spec (or token) being parsed.
#[derive(Default, Clone, Debug, PartialEq, Eq, Deref, AsRef, From)]
pub struct Span(Range<usize>);

impl Span {
    pub fn new(range: Range<usize>) -> Self {
        Self(range)
    }
    pub fn range(&self) -> Range<usize> {
        self.0.clone()
    }
    /// `true` if `other` lies entirely within `self`.
    pub fn contains_span(&self, other: &Span) -> bool {
        other.start >= self.start && other.end <= self.end
    }
}
