use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use arrow::array::{ArrayRef, PrimitiveArray};
use arrow::datatypes::{UInt32Type, UInt64Type};

use crate::error::{GraphError, Result};

/// What a sealed buffer holds, carried as an explicit tag so callers never
/// have to downcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    VertexIds,
    EdgeOffsets,
    Neighbors,
}

/// Handle to the shared-memory arena the construction pipeline allocates
/// from. Buffers are built through fixed or growable builders and sealed
/// into immutable arrays; the arena only tracks a byte budget here, the
/// actual placement discipline belongs to the surrounding object store.
///
/// Safe to share across construction workers.
#[derive(Debug)]
pub struct Arena {
    limit: usize,
    allocated: AtomicUsize,
}

impl Arena {
    pub fn with_limit(limit: usize) -> Self {
        Arena {
            limit,
            allocated: AtomicUsize::new(0),
        }
    }

    pub fn unbounded() -> Self {
        Self::with_limit(usize::MAX)
    }

    /// Total bytes charged so far (cumulative, never decremented).
    pub fn allocated_bytes(&self) -> usize {
        self.allocated.load(Ordering::Relaxed)
    }

    fn charge(&self, bytes: usize) -> Result<()> {
        let prev = self.allocated.fetch_add(bytes, Ordering::Relaxed);
        if prev.saturating_add(bytes) > self.limit {
            self.allocated.fetch_sub(bytes, Ordering::Relaxed);
            return Err(GraphError::allocation(format!(
                "arena limit exceeded: requested {} bytes, {} of {} in use",
                bytes, prev, self.limit
            )));
        }
        Ok(())
    }

    /// Allocate a zero-initialized buffer of `len` elements.
    pub fn allocate_fixed<T>(&self, len: usize, kind: BufferKind) -> Result<FixedArrayBuilder<T>>
    where
        T: Copy + Default + Send + Sync,
    {
        self.charge(len * std::mem::size_of::<T>())?;
        log::trace!(
            "arena: fixed {:?} buffer, {} elements",
            kind,
            len
        );
        Ok(FixedArrayBuilder {
            data: vec![T::default(); len].into_boxed_slice(),
            kind,
        })
    }

    /// Allocate a growable append-only buffer with an initial capacity hint.
    pub fn allocate_growable<T>(
        &self,
        hint: usize,
        kind: BufferKind,
    ) -> Result<GrowableArrayBuilder<'_, T>>
    where
        T: Copy + Default + Send + Sync,
    {
        let capacity = hint.max(16);
        self.charge(capacity * std::mem::size_of::<T>())?;
        log::trace!(
            "arena: growable {:?} buffer, capacity hint {}",
            kind,
            capacity
        );
        Ok(GrowableArrayBuilder {
            arena: self,
            data: Vec::with_capacity(capacity),
            kind,
        })
    }
}

/// Fixed-length arena buffer populated in place and sealed afterwards.
#[derive(Debug)]
pub struct FixedArrayBuilder<T> {
    data: Box<[T]>,
    kind: BufferKind,
}

impl<T: Copy + Default + Send + Sync> FixedArrayBuilder<T> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// A view that can be handed to several workers at once. The exclusive
    /// borrow keeps the builder itself untouchable while views are live.
    pub fn shared(&mut self) -> SharedSlice<'_, T> {
        SharedSlice {
            ptr: self.data.as_mut_ptr(),
            len: self.data.len(),
            _marker: PhantomData,
        }
    }

    pub fn seal(self) -> SealedArray<T> {
        SealedArray {
            data: self.data.into(),
            kind: self.kind,
        }
    }
}

/// Growable append-only arena buffer; growth is charged against the arena
/// and surfaces as an allocation error when the budget runs out.
#[derive(Debug)]
pub struct GrowableArrayBuilder<'a, T> {
    arena: &'a Arena,
    data: Vec<T>,
    kind: BufferKind,
}

impl<T: Copy + Default + Send + Sync> GrowableArrayBuilder<'_, T> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn append(&mut self, value: T) -> Result<()> {
        if self.data.len() == self.data.capacity() {
            let grown = self.data.capacity().max(16);
            self.arena.charge(grown * std::mem::size_of::<T>())?;
            self.data.reserve_exact(grown);
        }
        self.data.push(value);
        Ok(())
    }

    pub fn seal(self) -> SealedArray<T> {
        SealedArray {
            data: self.data.into(),
            kind: self.kind,
        }
    }
}

/// Immutable, arena-owned array produced by sealing a builder.
#[derive(Debug, Clone)]
pub struct SealedArray<T> {
    data: Arc<[T]>,
    kind: BufferKind,
}

impl<T> SealedArray<T> {
    pub fn kind(&self) -> BufferKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

/// Sealed vertex-id array surfaced without type erasure: the identifier
/// width is a closed set of variants resolved by matching, not by runtime
/// type inspection.
#[derive(Debug, Clone)]
pub enum SealedVertexIds {
    U32(SealedArray<u32>),
    U64(SealedArray<u64>),
}

impl SealedVertexIds {
    pub fn len(&self) -> usize {
        match self {
            SealedVertexIds::U32(a) => a.len(),
            SealedVertexIds::U64(a) => a.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Materialize as an Arrow array for hand-off to the loader.
    pub fn to_arrow(&self) -> ArrayRef {
        match self {
            SealedVertexIds::U32(a) => Arc::new(PrimitiveArray::<UInt32Type>::from_iter_values(
                a.as_slice().iter().copied(),
            )),
            SealedVertexIds::U64(a) => Arc::new(PrimitiveArray::<UInt64Type>::from_iter_values(
                a.as_slice().iter().copied(),
            )),
        }
    }
}

impl From<SealedArray<u32>> for SealedVertexIds {
    fn from(array: SealedArray<u32>) -> Self {
        SealedVertexIds::U32(array)
    }
}

impl From<SealedArray<u64>> for SealedVertexIds {
    fn from(array: SealedArray<u64>) -> Self {
        SealedVertexIds::U64(array)
    }
}

/// Mutable view over a builder's buffer shared across scatter workers.
///
/// Disjointness is the caller's contract: slots are claimed from per-vertex
/// atomic cursors, so no two workers ever address the same cell. Bounds are
/// always checked; overlap is not.
pub struct SharedSlice<'a, T> {
    ptr: *mut T,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

unsafe impl<T: Send> Send for SharedSlice<'_, T> {}
unsafe impl<T: Send> Sync for SharedSlice<'_, T> {}

impl<T: Copy> SharedSlice<'_, T> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn write(&self, index: usize, value: T) {
        assert!(index < self.len);
        unsafe {
            *self.ptr.add(index) = value;
        }
    }

    pub fn get(&self, index: usize) -> T {
        assert!(index < self.len);
        unsafe { *self.ptr.add(index) }
    }

    /// Borrow `[start, end)` mutably.
    ///
    /// # Safety
    /// No other live borrow (from this or any other worker) may overlap the
    /// range for the duration of the returned slice.
    pub unsafe fn slice_mut(&self, start: usize, end: usize) -> &mut [T] {
        assert!(start <= end && end <= self.len);
        std::slice::from_raw_parts_mut(self.ptr.add(start), end - start)
    }

    /// Borrow `[start, end)` immutably.
    ///
    /// # Safety
    /// No concurrent writer may overlap the range while the slice is live.
    pub unsafe fn slice(&self, start: usize, end: usize) -> &[T] {
        assert!(start <= end && end <= self.len);
        std::slice::from_raw_parts(self.ptr.add(start), end - start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallel::parallel_for;

    #[test]
    fn test_fixed_builder_seal() {
        let arena = Arena::unbounded();
        let mut builder = arena.allocate_fixed::<u64>(4, BufferKind::VertexIds).unwrap();
        builder.as_mut_slice().copy_from_slice(&[3, 1, 4, 1]);
        let sealed = builder.seal();
        assert_eq!(sealed.as_slice(), &[3, 1, 4, 1]);
        assert_eq!(sealed.kind(), BufferKind::VertexIds);
    }

    #[test]
    fn test_growable_builder_append() {
        let arena = Arena::unbounded();
        let mut builder = arena
            .allocate_growable::<u32>(2, BufferKind::VertexIds)
            .unwrap();
        for v in 0..100u32 {
            builder.append(v).unwrap();
        }
        let sealed = builder.seal();
        assert_eq!(sealed.len(), 100);
        assert_eq!(sealed.as_slice()[99], 99);
    }

    #[test]
    fn test_limit_enforced() {
        let arena = Arena::with_limit(64);
        assert!(arena.allocate_fixed::<u64>(4, BufferKind::EdgeOffsets).is_ok());
        let err = arena
            .allocate_fixed::<u64>(1024, BufferKind::EdgeOffsets)
            .unwrap_err();
        assert!(matches!(err, crate::error::GraphError::Allocation(_)));
    }

    #[test]
    fn test_shared_slice_parallel_disjoint_writes() {
        let arena = Arena::unbounded();
        let mut builder = arena
            .allocate_fixed::<u64>(1000, BufferKind::Neighbors)
            .unwrap();
        let view = builder.shared();
        parallel_for(1000, 8, None, |i| view.write(i, i as u64 * 2));
        drop(view);
        let sealed = builder.seal();
        assert!(sealed.as_slice().iter().enumerate().all(|(i, &v)| v == i as u64 * 2));
    }

    #[test]
    fn test_sealed_vertex_ids_to_arrow() {
        let arena = Arena::unbounded();
        let mut builder = arena
            .allocate_growable::<u64>(4, BufferKind::VertexIds)
            .unwrap();
        for v in [10u64, 20, 30] {
            builder.append(v).unwrap();
        }
        let tagged: SealedVertexIds = builder.seal().into();
        let array = tagged.to_arrow();
        assert_eq!(array.len(), 3);
    }
}
