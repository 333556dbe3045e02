//! Generic tensor-over-a-basis primitive.
//!
//! Grounded on `algebra/TensorBase.hpp`: a tensor is an id drawn from a fixed
//! basis, plus an ordered list of indices bounded by that id's arity. The
//! basis trait stands in for the C++ template parameter.

use crate::error::{EngineError, Result};
use crate::index::{TensorIndex, TensorIndices};
use std::fmt::Debug;
use std::hash::Hash;

/// A fixed alphabet of tensor identifiers, each with its own maximum index count.
pub trait Basis {
    type Id: Clone + Debug + PartialEq + Eq + Hash + std::fmt::Display;

    /// Whether `id` is a member of this basis.
    fn allows(id: &Self::Id) -> bool;

    /// Maximum number of indices `id` may carry.
    fn max_index_count(id: &Self::Id) -> usize;
}

/// A tensor: a basis identifier plus its indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TensorBase<B: Basis> {
    id: B::Id,
    indices: TensorIndices,
}

impl<B: Basis> TensorBase<B> {
    /// Construct a tensor with no indices yet.
    pub fn create(id: B::Id) -> Result<Self> {
        if !B::allows(&id) {
            return Err(EngineError::UnknownBasisId(id.to_string()));
        }
        Ok(TensorBase {
            id,
            indices: Vec::new(),
        })
    }

    pub fn with_index(id: B::Id, index: TensorIndex) -> Result<Self> {
        Self::create(id)?.push(index)
    }

    pub fn with_indices(id: B::Id, indices: TensorIndices) -> Result<Self> {
        let mut t = Self::create(id)?;
        for idx in indices {
            t = t.push(idx)?;
        }
        Ok(t)
    }

    pub fn id(&self) -> &B::Id {
        &self.id
    }

    pub fn indices(&self) -> &TensorIndices {
        &self.indices
    }

    pub fn max_indices(&self) -> usize {
        B::max_index_count(&self.id)
    }

    pub fn actual_index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_complete(&self) -> bool {
        self.indices.len() == self.max_indices()
    }

    /// Append one index, enforcing the basis's arity bound.
    pub fn push(mut self, index: TensorIndex) -> Result<Self> {
        if self.indices.len() >= self.max_indices() {
            return Err(EngineError::TooManyIndices {
                id: self.id.to_string(),
                max: self.max_indices(),
            });
        }
        self.indices.push(index);
        Ok(self)
    }

    pub fn push_all(mut self, indices: TensorIndices) -> Result<Self> {
        for idx in indices {
            self = self.push(idx)?;
        }
        Ok(self)
    }

    /// Replace the index at `pos` with `repl`.
    pub fn replace_index(&self, pos: usize, repl: TensorIndex) -> Result<Self> {
        if pos >= self.indices.len() {
            return Err(EngineError::Internal(format!(
                "index position {pos} out of range"
            )));
        }
        let mut indices = self.indices.clone();
        indices[pos] = repl;
        Ok(TensorBase {
            id: self.id.clone(),
            indices,
        })
    }

    /// Finds a permutation `p` such that `self.indices[p.map[i]] == other.indices[i]`
    /// for every `i`, by brute-force search over all permutations of equal length.
    pub fn mapping_to(&self, other: &TensorBase<B>) -> Option<crate::permutation::Permutation> {
        if self.id != other.id || self.indices.len() != other.indices.len() {
            return None;
        }
        let n = self.indices.len();
        let mut found = None;
        crate::permutation::for_permutations(n, &mut |perm| {
            if found.is_some() {
                return;
            }
            if (0..n).all(|i| self.indices[perm.map[i]] == other.indices[i]) {
                found = Some(perm.clone());
            }
        });
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexId;

    #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    enum TestId {
        Pair,
    }
    impl std::fmt::Display for TestId {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "pair")
        }
    }
    struct TestBasis;
    impl Basis for TestBasis {
        type Id = TestId;
        fn allows(_id: &TestId) -> bool {
            true
        }
        fn max_index_count(_id: &TestId) -> usize {
            2
        }
    }

    #[test]
    fn too_many_indices_is_rejected() {
        let t = TensorBase::<TestBasis>::create(TestId::Pair).unwrap();
        let t = t
            .push(TensorIndex::upper(IndexId::Named("a".into())))
            .unwrap();
        let t = t
            .push(TensorIndex::upper(IndexId::Named("b".into())))
            .unwrap();
        let err = t.push(TensorIndex::upper(IndexId::Named("c".into())));
        assert!(matches!(err, Err(EngineError::TooManyIndices { .. })));
    }

    #[test]
    fn mapping_to_finds_reordering_permutation() {
        let a = TensorBase::<TestBasis>::with_indices(
            TestId::Pair,
            vec![
                TensorIndex::upper(IndexId::Named("a".into())),
                TensorIndex::upper(IndexId::Named("b".into())),
            ],
        )
        .unwrap();
        let b = TensorBase::<TestBasis>::with_indices(
            TestId::Pair,
            vec![
                TensorIndex::upper(IndexId::Named("b".into())),
                TensorIndex::upper(IndexId::Named("a".into())),
            ],
        )
        .unwrap();
        let perm = a.mapping_to(&b).expect("should find permutation");
        assert_eq!(perm.map, vec![1, 0]);
    }
}
