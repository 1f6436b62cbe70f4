//! Layered config merging.

/// Combine two config layers; `other` is the higher-priority layer.
pub trait Merge {
    fn merge(self, other: Self) -> Self;
}

impl<T> Merge for Option<T> {
    fn merge(self, other: Self) -> Self {
        other.or(self)
    }
}
