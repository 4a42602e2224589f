use std::{cmp::Ordering, fmt::{self, Display, Formatter}};

/// A base-pair position, compared as `i64`.
///
/// The source this engine was distilled from compared positions by
/// subtracting two `long` values and casting the result to `int`, which
/// silently overflows once either position exceeds `i32::MAX`. This type
/// instead always compares via `i64::cmp`, never a subtract-and-cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BpPosition(pub i64);

impl BpPosition {
    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for BpPosition {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<BpPosition> for i64 {
    fn from(value: BpPosition) -> Self {
        value.0
    }
}

impl Ord for BpPosition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for BpPosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for BpPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
