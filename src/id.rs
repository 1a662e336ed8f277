use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

use arrow::datatypes::{ArrowNativeType, ArrowPrimitiveType, UInt32Type, UInt64Type};
use num_traits::PrimInt;

/// Fragment identifier within the distributed graph.
pub type FragId = u32;

/// Dense per-graph vertex label identifier, in `[0, vertex_label_num)`.
pub type LabelId = i32;

/// Fixed-width vertex identifier type, instantiated for `u32` and `u64`.
///
/// The associated Arrow type ties a chunked gid/lid column to the concrete
/// primitive array holding it; the `ArrowNativeType` bound is what lets a
/// chunk's scalar buffer be read back as a plain `&[Self]`.
pub trait VertexId:
    PrimInt + ArrowNativeType + Hash + Debug + Default + Send + Sync + 'static
{
    type Arrow: ArrowPrimitiveType<Native = Self>;

    const BITS: u32;

    fn from_usize(value: usize) -> Self;
    fn from_u64(value: u64) -> Self;
    fn as_u64(self) -> u64;
}

impl VertexId for u32 {
    type Arrow = UInt32Type;

    const BITS: u32 = 32;

    fn from_usize(value: usize) -> Self {
        value as u32
    }
    fn from_u64(value: u64) -> Self {
        value as u32
    }
    fn as_u64(self) -> u64 {
        self as u64
    }
}

impl VertexId for u64 {
    type Arrow = UInt64Type;

    const BITS: u32 = 64;

    fn from_usize(value: usize) -> Self {
        value as u64
    }
    fn from_u64(value: u64) -> Self {
        value
    }
    fn as_u64(self) -> u64 {
        self
    }
}

/// Fixed-width edge identifier type, instantiated for `u32` and `u64`.
pub trait EdgeId: PrimInt + Debug + Default + Send + Sync + 'static {
    fn from_usize(value: usize) -> Self;
}

impl EdgeId for u32 {
    fn from_usize(value: usize) -> Self {
        value as u32
    }
}

impl EdgeId for u64 {
    fn from_usize(value: usize) -> Self {
        value as u64
    }
}

/// Smallest bit width whose value range covers `num` distinct values.
fn num_to_bitwidth(num: u64) -> u32 {
    if num <= 2 {
        1
    } else {
        64 - (num - 1).leading_zeros()
    }
}

/// Bidirectional codec between a global vertex id and its
/// `(fragment, label, offset)` triple.
///
/// The packing is `[fid | label | offset]` from the high bits down, with the
/// fragment and label fields sized for the configured counts and the offset
/// taking the remainder. The configuration is fixed at graph-load time;
/// out-of-range arguments are contract violations and only checked in debug
/// builds.
#[derive(Debug, Clone)]
pub struct IdParser<V> {
    fnum: FragId,
    label_num: LabelId,
    fid_offset: u32,
    label_offset: u32,
    fid_mask: u64,
    label_mask: u64,
    offset_mask: u64,
    _marker: PhantomData<V>,
}

impl<V: VertexId> IdParser<V> {
    pub fn new(fnum: FragId, label_num: LabelId) -> Self {
        let fid_bits = num_to_bitwidth(fnum as u64);
        let label_bits = num_to_bitwidth(label_num as u64);
        debug_assert!(fid_bits + label_bits < V::BITS);
        let offset_bits = V::BITS - fid_bits - label_bits;
        IdParser {
            fnum,
            label_num,
            fid_offset: offset_bits + label_bits,
            label_offset: offset_bits,
            fid_mask: (1u64 << fid_bits) - 1,
            label_mask: (1u64 << label_bits) - 1,
            offset_mask: (1u64 << offset_bits) - 1,
            _marker: PhantomData,
        }
    }

    pub fn fnum(&self) -> FragId {
        self.fnum
    }

    pub fn label_num(&self) -> LabelId {
        self.label_num
    }

    /// Largest representable offset under this configuration.
    pub fn max_offset(&self) -> u64 {
        self.offset_mask
    }

    pub fn fid(&self, id: V) -> FragId {
        ((id.as_u64() >> self.fid_offset) & self.fid_mask) as FragId
    }

    pub fn label_id(&self, id: V) -> LabelId {
        ((id.as_u64() >> self.label_offset) & self.label_mask) as LabelId
    }

    pub fn offset(&self, id: V) -> usize {
        (id.as_u64() & self.offset_mask) as usize
    }

    pub fn generate_id(&self, fid: FragId, label: LabelId, offset: u64) -> V {
        debug_assert!(fid < self.fnum);
        debug_assert!(label >= 0 && label < self.label_num);
        debug_assert!(offset <= self.offset_mask);
        V::from_u64(
            ((fid as u64) << self.fid_offset)
                | ((label as u64) << self.label_offset)
                | offset,
        )
    }

    /// Compose a local id: a gid with the fragment field left zero.
    pub fn generate_local_id(&self, label: LabelId, offset: u64) -> V {
        debug_assert!(label >= 0 && label < self.label_num);
        debug_assert!(offset <= self.offset_mask);
        V::from_u64(((label as u64) << self.label_offset) | offset)
    }

    /// Strip the fragment field off a gid, keeping label and offset.
    pub fn to_local_id(&self, gid: V) -> V {
        V::from_u64(gid.as_u64() & !(self.fid_mask << self.fid_offset))
    }
}
