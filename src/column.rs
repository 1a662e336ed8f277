use arrow::array::{Array, PrimitiveArray};
use arrow::error::ArrowError;

use crate::error::Result;
use crate::id::VertexId;

/// A chunked column of fixed-width vertex identifiers.
///
/// Chunks are Arrow primitive arrays; every chunk supports lock-free random
/// access, so parallel range reads need no coordination beyond partitioning.
/// Identifier columns carry no nulls; chunks with a validity bitmap are
/// rejected up front.
#[derive(Debug, Clone)]
pub struct ChunkedArray<V: VertexId> {
    chunks: Vec<PrimitiveArray<V::Arrow>>,
    len: usize,
}

impl<V: VertexId> ChunkedArray<V> {
    pub fn from_chunks(chunks: Vec<PrimitiveArray<V::Arrow>>) -> Result<Self> {
        for chunk in &chunks {
            if chunk.null_count() > 0 {
                return Err(ArrowError::InvalidArgumentError(
                    "identifier columns must not contain nulls".to_string(),
                )
                .into());
            }
        }
        let len = chunks.iter().map(|c| c.len()).sum();
        Ok(ChunkedArray { chunks, len })
    }

    /// Convenience constructor wrapping a single chunk.
    pub fn from_values(values: Vec<V>) -> Self {
        let chunk = PrimitiveArray::<V::Arrow>::from_iter_values(values);
        let len = chunk.len();
        ChunkedArray {
            chunks: vec![chunk],
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn num_chunks(&self) -> usize {
        self.chunks.len()
    }

    /// Raw values of one chunk.
    pub fn chunk_values(&self, index: usize) -> &[V] {
        self.chunks[index].values().as_ref()
    }

    pub fn iter_chunks(&self) -> impl Iterator<Item = &[V]> {
        self.chunks.iter().map(|c| c.values().as_ref())
    }
}
