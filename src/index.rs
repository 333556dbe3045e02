//! Tensor index identity.
//!
//! Grounded on `algebra/IndexId.hpp`: an index id is either a user-given string
//! label or a generated `(generation, slot)` tag used to keep dummy indices
//! minted by the canonical reducer disjoint across factors.

use std::fmt;

/// Identity of an index, independent of its upper/lower position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndexId {
    Named(String),
    /// `(generation, slot)` — generation ties together the indices minted for
    /// one gamma-chain node; slot distinguishes the two indices of a σ.
    Tag(i64, i64),
}

impl fmt::Display for IndexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexId::Named(s) => write!(f, "{s}"),
            IndexId::Tag(g, s) => write!(f, "#{g}.{s}"),
        }
    }
}

/// A single tensor index: its identity plus whether it is upper (contravariant)
/// or lower (covariant).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TensorIndex {
    pub id: IndexId,
    pub upper: bool,
}

impl TensorIndex {
    pub fn new(id: IndexId, upper: bool) -> Self {
        TensorIndex { id, upper }
    }

    pub fn upper(id: IndexId) -> Self {
        TensorIndex { id, upper: true }
    }

    pub fn lower(id: IndexId) -> Self {
        TensorIndex { id, upper: false }
    }

    /// Two indices are dual iff they share an id but differ in position.
    pub fn is_dual(&self, other: &TensorIndex) -> bool {
        self.id == other.id && self.upper != other.upper
    }

    /// Two indices are equal iff they share both id and position.
    pub fn is_equal(&self, other: &TensorIndex) -> bool {
        self.id == other.id && self.upper == other.upper
    }

    pub fn with_position(&self, upper: bool) -> Self {
        TensorIndex {
            id: self.id.clone(),
            upper,
        }
    }
}

pub type TensorIndices = Vec<TensorIndex>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duality_requires_same_id_opposite_position() {
        let a = TensorIndex::upper(IndexId::Named("mu".into()));
        let b = TensorIndex::lower(IndexId::Named("mu".into()));
        let c = TensorIndex::upper(IndexId::Named("mu".into()));
        let d = TensorIndex::upper(IndexId::Named("nu".into()));
        assert!(a.is_dual(&b));
        assert!(!a.is_dual(&c));
        assert!(a.is_equal(&c));
        assert!(!a.is_dual(&d));
    }

    #[test]
    fn tags_with_different_slots_are_distinct() {
        let a = IndexId::Tag(1, 0);
        let b = IndexId::Tag(1, 1);
        assert_ne!(a, b);
    }
}
