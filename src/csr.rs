use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use crate::arena::{Arena, BufferKind, FixedArrayBuilder, SealedArray, SharedSlice};
use crate::error::{GraphError, Result};
use crate::id::{EdgeId, IdParser, LabelId, VertexId};
use crate::parallel::parallel_for;

/// One adjacency entry: the neighbor's lid and the edge's id.
///
/// The eid is the edge's position in the combined (chunk-concatenated) edge
/// stream, stable across the CSR and CSC built from the same stream so the
/// two can cross-reference one edge.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NbrUnit<V, E> {
    pub vid: V,
    pub eid: E,
}

/// Per-label CSR or CSC adjacency arrays plus the graph-wide multigraph flag.
///
/// For each label, bucket `v` occupies `offsets[v]..offsets[v+1]` of the
/// `NbrUnit` array; `offsets` has length `tvnum + 1`, starts at zero and is
/// non-decreasing. Buckets are sorted by `(vid, eid)`, so duplicate
/// neighbors sit adjacent in ascending edge-id order.
#[derive(Debug)]
pub struct AdjacencyList<V, E> {
    pub edges: Vec<SealedArray<NbrUnit<V, E>>>,
    pub offsets: Vec<SealedArray<i64>>,
    pub is_multigraph: bool,
}

impl<V: VertexId, E: EdgeId> AdjacencyList<V, E> {
    /// Neighbor range of one vertex, O(1).
    pub fn neighbors(&self, label: LabelId, offset: usize) -> &[NbrUnit<V, E>] {
        let offs = self.offsets[label as usize].as_slice();
        let start = offs[offset] as usize;
        let end = offs[offset + 1] as usize;
        &self.edges[label as usize].as_slice()[start..end]
    }

    pub fn edge_count(&self, label: LabelId) -> usize {
        self.edges[label as usize].len()
    }
}

/// Validate that src and dst columns describe the same edges and return the
/// eid base of each chunk.
fn chunk_eid_bases<V: VertexId>(
    src_chunks: &[SealedArray<V>],
    dst_chunks: &[SealedArray<V>],
) -> Result<Vec<usize>> {
    if src_chunks.len() != dst_chunks.len() {
        return Err(GraphError::invalid_parameter(format!(
            "src/dst chunk count mismatch: {} vs {}",
            src_chunks.len(),
            dst_chunks.len()
        )));
    }
    let mut bases = Vec::with_capacity(src_chunks.len());
    let mut base = 0usize;
    for (index, (src, dst)) in src_chunks.iter().zip(dst_chunks.iter()).enumerate() {
        if src.len() != dst.len() {
            return Err(GraphError::invalid_parameter(format!(
                "src/dst length mismatch in chunk {}: {} vs {}",
                index,
                src.len(),
                dst.len()
            )));
        }
        bases.push(base);
        base += src.len();
    }
    Ok(bases)
}

fn zero_degrees(tvnums: &[usize]) -> Vec<Vec<AtomicI64>> {
    tvnums
        .iter()
        .map(|&tvnum| (0..tvnum).map(|_| AtomicI64::new(0)).collect())
        .collect()
}

/// Prefix-sum per-label degree histograms into offset buffers and allocate
/// the matching neighbor buffers.
fn alloc_from_degrees<V: VertexId, E: EdgeId>(
    arena: &Arena,
    degrees: &[Vec<AtomicI64>],
) -> Result<(Vec<FixedArrayBuilder<i64>>, Vec<FixedArrayBuilder<NbrUnit<V, E>>>)> {
    let mut offsets = Vec::with_capacity(degrees.len());
    let mut edges = Vec::with_capacity(degrees.len());
    for label_degrees in degrees {
        let tvnum = label_degrees.len();
        let mut builder = arena.allocate_fixed::<i64>(tvnum + 1, BufferKind::EdgeOffsets)?;
        {
            let slice = builder.as_mut_slice();
            let mut sum = 0i64;
            slice[0] = 0;
            for (v, degree) in label_degrees.iter().enumerate() {
                sum += degree.load(Ordering::Relaxed);
                slice[v + 1] = sum;
            }
        }
        let edge_count = builder.as_slice()[tvnum] as usize;
        edges.push(arena.allocate_fixed::<NbrUnit<V, E>>(edge_count, BufferKind::Neighbors)?);
        offsets.push(builder);
    }
    Ok((offsets, edges))
}

/// Fresh scatter cursors seeded from the offset arrays. Kept separate from
/// the histogram counters; the two uses never share an allocation.
fn scatter_cursors(offsets: &[FixedArrayBuilder<i64>]) -> Vec<Vec<AtomicI64>> {
    offsets
        .iter()
        .map(|builder| {
            let slice = builder.as_slice();
            slice[..slice.len() - 1]
                .iter()
                .map(|&start| AtomicI64::new(start))
                .collect()
        })
        .collect()
}

/// Sort every bucket by `(vid, eid)`, one vertex per work item.
///
/// The eid tie-break makes bucket order deterministic regardless of the
/// scatter interleaving, so identical input produces identical structures at
/// any concurrency level.
pub fn sort_edges_with_respect_to_vertex<V: VertexId, E: EdgeId>(
    view: &SharedSlice<'_, NbrUnit<V, E>>,
    offsets: &[i64],
    concurrency: usize,
) {
    let tvnum = offsets.len().saturating_sub(1);
    parallel_for(tvnum, concurrency, None, |v| {
        let start = offsets[v] as usize;
        let end = offsets[v + 1] as usize;
        // Buckets are disjoint by construction.
        let bucket = unsafe { view.slice_mut(start, end) };
        bucket.sort_unstable_by_key(|nbr| (nbr.vid, nbr.eid));
    });
}

/// Scan sorted buckets for a repeated ordered (source, neighbor) pair.
///
/// Requires sorted buckets. Two adjacent entries with the same neighbor but
/// the same eid are one edge seen from both ends (an undirected self-loop)
/// and do not count; the pair must come from distinct edges.
pub fn check_is_multigraph<V: VertexId, E: EdgeId>(
    view: &SharedSlice<'_, NbrUnit<V, E>>,
    offsets: &[i64],
    concurrency: usize,
) -> bool {
    let tvnum = offsets.len().saturating_sub(1);
    let flag = AtomicBool::new(false);
    parallel_for(tvnum, concurrency, None, |v| {
        if flag.load(Ordering::Relaxed) {
            return;
        }
        let start = offsets[v] as usize;
        let end = offsets[v + 1] as usize;
        let bucket = unsafe { view.slice(start, end) };
        for pair in bucket.windows(2) {
            if pair[0].vid == pair[1].vid && pair[0].eid != pair[1].eid {
                flag.store(true, Ordering::Relaxed);
                return;
            }
        }
    });
    flag.load(Ordering::Relaxed)
}

/// Sort, run the multigraph check, and seal builders into the final result.
fn finish<V: VertexId, E: EdgeId>(
    mut edges: Vec<FixedArrayBuilder<NbrUnit<V, E>>>,
    offsets: Vec<FixedArrayBuilder<i64>>,
    concurrency: usize,
) -> AdjacencyList<V, E> {
    let mut is_multigraph = false;
    for (edge_builder, offset_builder) in edges.iter_mut().zip(offsets.iter()) {
        let offs = offset_builder.as_slice();
        let view = edge_builder.shared();
        sort_edges_with_respect_to_vertex(&view, offs, concurrency);
        is_multigraph |= check_is_multigraph(&view, offs, concurrency);
    }
    let total: usize = edges.iter().map(|b| b.len()).sum();
    log::debug!(
        "adjacency built: {} labels, {} entries, multigraph: {}",
        edges.len(),
        total,
        is_multigraph
    );
    AdjacencyList {
        edges: edges.into_iter().map(|b| b.seal()).collect(),
        offsets: offsets.into_iter().map(|b| b.seal()).collect(),
        is_multigraph,
    }
}

/// Histogram + scatter for the directed out-edge CSR, left unsorted and
/// unsealed so both the directed and the memory-optimized undirected paths
/// can build on it.
fn build_directed_builders<V: VertexId, E: EdgeId>(
    arena: &Arena,
    parser: &IdParser<V>,
    src_chunks: &[SealedArray<V>],
    dst_chunks: &[SealedArray<V>],
    tvnums: &[usize],
    vertex_label_num: LabelId,
    concurrency: usize,
) -> Result<(Vec<FixedArrayBuilder<i64>>, Vec<FixedArrayBuilder<NbrUnit<V, E>>>)> {
    check_tvnums(tvnums, vertex_label_num)?;
    let bases = chunk_eid_bases(src_chunks, dst_chunks)?;

    let degrees = zero_degrees(tvnums);
    parallel_for(src_chunks.len(), concurrency, None, |c| {
        for &u in src_chunks[c].as_slice() {
            let label = parser.label_id(u) as usize;
            degrees[label][parser.offset(u)].fetch_add(1, Ordering::Relaxed);
        }
    });

    let (offsets, mut edges) = alloc_from_degrees::<V, E>(arena, &degrees)?;
    drop(degrees);

    let cursors = scatter_cursors(&offsets);
    let views: Vec<SharedSlice<'_, NbrUnit<V, E>>> =
        edges.iter_mut().map(|b| b.shared()).collect();
    parallel_for(src_chunks.len(), concurrency, None, |c| {
        let src = src_chunks[c].as_slice();
        let dst = dst_chunks[c].as_slice();
        let base = bases[c];
        for i in 0..src.len() {
            let u = src[i];
            let label = parser.label_id(u) as usize;
            let slot = cursors[label][parser.offset(u)].fetch_add(1, Ordering::Relaxed) as usize;
            views[label].write(
                slot,
                NbrUnit {
                    vid: dst[i],
                    eid: E::from_usize(base + i),
                },
            );
        }
    });
    drop(views);

    Ok((offsets, edges))
}

fn check_tvnums(tvnums: &[usize], vertex_label_num: LabelId) -> Result<()> {
    if tvnums.len() != vertex_label_num as usize {
        return Err(GraphError::invalid_parameter(format!(
            "expected {} per-label vertex counts, got {}",
            vertex_label_num,
            tvnums.len()
        )));
    }
    Ok(())
}

/// Build the out-edge CSR of a directed graph from translated COO chunks.
pub fn generate_directed_csr<V: VertexId, E: EdgeId>(
    arena: &Arena,
    parser: &IdParser<V>,
    src_chunks: &[SealedArray<V>],
    dst_chunks: &[SealedArray<V>],
    tvnums: &[usize],
    vertex_label_num: LabelId,
    concurrency: usize,
) -> Result<AdjacencyList<V, E>> {
    let (offsets, edges) = build_directed_builders::<V, E>(
        arena,
        parser,
        src_chunks,
        dst_chunks,
        tvnums,
        vertex_label_num,
        concurrency,
    )?;
    Ok(finish(edges, offsets, concurrency))
}

/// Build the in-edge CSC from an already-built CSR, treating every entry
/// `(u, v, eid)` as the reversed edge `(v, u, eid)`. Avoids a second scan of
/// the raw columns at the cost of one extra pass over the CSR.
pub fn generate_directed_csc<V: VertexId, E: EdgeId>(
    arena: &Arena,
    parser: &IdParser<V>,
    tvnums: &[usize],
    vertex_label_num: LabelId,
    concurrency: usize,
    oedges: &[SealedArray<NbrUnit<V, E>>],
    oedge_offsets: &[SealedArray<i64>],
) -> Result<AdjacencyList<V, E>> {
    check_tvnums(tvnums, vertex_label_num)?;
    let label_num = vertex_label_num as usize;
    if oedges.len() != label_num || oedge_offsets.len() != label_num {
        return Err(GraphError::invalid_parameter(
            "CSR label count does not match vertex_label_num".to_string(),
        ));
    }
    for (label, offsets) in oedge_offsets.iter().enumerate() {
        if offsets.len() != tvnums[label] + 1 {
            return Err(GraphError::invalid_parameter(format!(
                "CSR offsets for label {} have length {}, expected {}",
                label,
                offsets.len(),
                tvnums[label] + 1
            )));
        }
    }

    let degrees = zero_degrees(tvnums);
    for src_label in 0..label_num {
        let entries = oedges[src_label].as_slice();
        parallel_for(entries.len(), concurrency, None, |i| {
            let nbr = entries[i].vid;
            let label = parser.label_id(nbr) as usize;
            degrees[label][parser.offset(nbr)].fetch_add(1, Ordering::Relaxed);
        });
    }

    let (offsets, mut edges) = alloc_from_degrees::<V, E>(arena, &degrees)?;
    drop(degrees);

    let cursors = scatter_cursors(&offsets);
    let views: Vec<SharedSlice<'_, NbrUnit<V, E>>> =
        edges.iter_mut().map(|b| b.shared()).collect();
    for src_label in 0..label_num {
        let entries = oedges[src_label].as_slice();
        let offs = oedge_offsets[src_label].as_slice();
        parallel_for(tvnums[src_label], concurrency, None, |u| {
            let u_lid = parser.generate_local_id(src_label as LabelId, u as u64);
            for entry in &entries[offs[u] as usize..offs[u + 1] as usize] {
                let label = parser.label_id(entry.vid) as usize;
                let slot =
                    cursors[label][parser.offset(entry.vid)].fetch_add(1, Ordering::Relaxed)
                        as usize;
                views[label].write(
                    slot,
                    NbrUnit {
                        vid: u_lid,
                        eid: entry.eid,
                    },
                );
            }
        });
    }
    drop(views);

    Ok(finish(edges, offsets, concurrency))
}

/// Build the single undirected adjacency structure in one scan of the COO.
///
/// Every edge `(u, v)` contributes `{v, eid}` to `u`'s bucket and `{u, eid}`
/// to `v`'s bucket; a self-loop contributes both, i.e. two entries in its
/// vertex's bucket. Counters for both directions are held simultaneously,
/// trading peak memory for a single pass.
pub fn generate_undirected_csr<V: VertexId, E: EdgeId>(
    arena: &Arena,
    parser: &IdParser<V>,
    src_chunks: &[SealedArray<V>],
    dst_chunks: &[SealedArray<V>],
    tvnums: &[usize],
    vertex_label_num: LabelId,
    concurrency: usize,
) -> Result<AdjacencyList<V, E>> {
    check_tvnums(tvnums, vertex_label_num)?;
    let bases = chunk_eid_bases(src_chunks, dst_chunks)?;

    let degrees = zero_degrees(tvnums);
    parallel_for(src_chunks.len(), concurrency, None, |c| {
        let src = src_chunks[c].as_slice();
        let dst = dst_chunks[c].as_slice();
        for i in 0..src.len() {
            for &endpoint in &[src[i], dst[i]] {
                let label = parser.label_id(endpoint) as usize;
                degrees[label][parser.offset(endpoint)].fetch_add(1, Ordering::Relaxed);
            }
        }
    });

    let (offsets, mut edges) = alloc_from_degrees::<V, E>(arena, &degrees)?;
    drop(degrees);

    let cursors = scatter_cursors(&offsets);
    let views: Vec<SharedSlice<'_, NbrUnit<V, E>>> =
        edges.iter_mut().map(|b| b.shared()).collect();
    parallel_for(src_chunks.len(), concurrency, None, |c| {
        let src = src_chunks[c].as_slice();
        let dst = dst_chunks[c].as_slice();
        let base = bases[c];
        for i in 0..src.len() {
            let eid = E::from_usize(base + i);
            for (from, to) in [(src[i], dst[i]), (dst[i], src[i])] {
                let label = parser.label_id(from) as usize;
                let slot =
                    cursors[label][parser.offset(from)].fetch_add(1, Ordering::Relaxed) as usize;
                views[label].write(slot, NbrUnit { vid: to, eid });
            }
        }
    });
    drop(views);

    Ok(finish(edges, offsets, concurrency))
}

/// Two-pass, memory-optimized equivalent of [`generate_undirected_csr`].
///
/// Builds the directed out-edge CSR first, then folds the reverse direction
/// into the final buckets with one extra pass over that CSR instead of
/// rescanning the raw columns. The final offsets and sorted buckets are
/// identical to the single-pass variant.
pub fn generate_undirected_csr_memopt<V: VertexId, E: EdgeId>(
    arena: &Arena,
    parser: &IdParser<V>,
    src_chunks: &[SealedArray<V>],
    dst_chunks: &[SealedArray<V>],
    tvnums: &[usize],
    vertex_label_num: LabelId,
    concurrency: usize,
) -> Result<AdjacencyList<V, E>> {
    let (out_offsets, out_edges) = build_directed_builders::<V, E>(
        arena,
        parser,
        src_chunks,
        dst_chunks,
        tvnums,
        vertex_label_num,
        concurrency,
    )?;
    let label_num = vertex_label_num as usize;

    // Total degree = out-degree (from the directed offsets) + in-degree
    // (one pass over the CSR entries).
    let degrees: Vec<Vec<AtomicI64>> = out_offsets
        .iter()
        .map(|builder| {
            let offs = builder.as_slice();
            (0..offs.len() - 1)
                .map(|v| AtomicI64::new(offs[v + 1] - offs[v]))
                .collect()
        })
        .collect();
    for src_label in 0..label_num {
        let entries = out_edges[src_label].as_slice();
        parallel_for(entries.len(), concurrency, None, |i| {
            let nbr = entries[i].vid;
            let label = parser.label_id(nbr) as usize;
            degrees[label][parser.offset(nbr)].fetch_add(1, Ordering::Relaxed);
        });
    }

    let (offsets, mut edges) = alloc_from_degrees::<V, E>(arena, &degrees)?;
    drop(degrees);

    let cursors = scatter_cursors(&offsets);
    let views: Vec<SharedSlice<'_, NbrUnit<V, E>>> =
        edges.iter_mut().map(|b| b.shared()).collect();
    for src_label in 0..label_num {
        let entries = out_edges[src_label].as_slice();
        let offs = out_offsets[src_label].as_slice();
        parallel_for(tvnums[src_label], concurrency, None, |u| {
            let u_lid = parser.generate_local_id(src_label as LabelId, u as u64);
            for entry in &entries[offs[u] as usize..offs[u + 1] as usize] {
                // Forward copy into u's bucket.
                let slot = cursors[src_label][u].fetch_add(1, Ordering::Relaxed) as usize;
                views[src_label].write(slot, *entry);
                // Reverse entry into the neighbor's bucket.
                let label = parser.label_id(entry.vid) as usize;
                let slot =
                    cursors[label][parser.offset(entry.vid)].fetch_add(1, Ordering::Relaxed)
                        as usize;
                views[label].write(
                    slot,
                    NbrUnit {
                        vid: u_lid,
                        eid: entry.eid,
                    },
                );
            }
        });
    }
    drop(views);
    drop(out_edges);
    drop(out_offsets);

    Ok(finish(edges, offsets, concurrency))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;
    use pretty_assertions::assert_eq;

    fn seal_chunk(arena: &Arena, values: &[u64]) -> SealedArray<u64> {
        let mut builder = arena
            .allocate_fixed::<u64>(values.len(), BufferKind::VertexIds)
            .unwrap();
        builder.as_mut_slice().copy_from_slice(values);
        builder.seal()
    }

    fn single_label_parser() -> IdParser<u64> {
        IdParser::new(1, 1)
    }

    #[test]
    fn test_directed_csr_concrete_scenario() {
        // 3 native vertices, edges [(0,1), (1,2), (0,1)].
        let arena = Arena::unbounded();
        let parser = single_label_parser();
        let srcs = [seal_chunk(&arena, &[0, 1, 0])];
        let dsts = [seal_chunk(&arena, &[1, 2, 1])];

        let csr = generate_directed_csr::<u64, u64>(&arena, &parser, &srcs, &dsts, &[3], 1, 4)
            .unwrap();

        assert!(csr.is_multigraph);
        assert_eq!(csr.offsets[0].as_slice(), &[0, 2, 3, 3]);
        assert_eq!(
            csr.neighbors(0, 0),
            &[NbrUnit { vid: 1, eid: 0 }, NbrUnit { vid: 1, eid: 2 }]
        );
        assert_eq!(csr.neighbors(0, 1), &[NbrUnit { vid: 2, eid: 1 }]);
        assert_eq!(csr.neighbors(0, 2), &[]);
    }

    #[test]
    fn test_directed_csc_from_csr() {
        let arena = Arena::unbounded();
        let parser = single_label_parser();
        let srcs = [seal_chunk(&arena, &[0, 1, 0])];
        let dsts = [seal_chunk(&arena, &[1, 2, 1])];

        let csr = generate_directed_csr::<u64, u64>(&arena, &parser, &srcs, &dsts, &[3], 1, 2)
            .unwrap();
        let csc = generate_directed_csc::<u64, u64>(
            &arena,
            &parser,
            &[3],
            1,
            2,
            &csr.edges,
            &csr.offsets,
        )
        .unwrap();

        assert!(csc.is_multigraph);
        assert_eq!(csc.offsets[0].as_slice(), &[0, 0, 2, 3]);
        assert_eq!(
            csc.neighbors(0, 1),
            &[NbrUnit { vid: 0, eid: 0 }, NbrUnit { vid: 0, eid: 2 }]
        );
        assert_eq!(csc.neighbors(0, 2), &[NbrUnit { vid: 1, eid: 1 }]);
    }

    #[test]
    fn test_undirected_both_buckets() {
        let arena = Arena::unbounded();
        let parser = single_label_parser();
        let srcs = [seal_chunk(&arena, &[0, 1])];
        let dsts = [seal_chunk(&arena, &[1, 2])];

        let adj = generate_undirected_csr::<u64, u64>(&arena, &parser, &srcs, &dsts, &[3], 1, 2)
            .unwrap();

        assert!(!adj.is_multigraph);
        assert_eq!(adj.offsets[0].as_slice(), &[0, 1, 3, 4]);
        assert_eq!(adj.neighbors(0, 0), &[NbrUnit { vid: 1, eid: 0 }]);
        assert_eq!(
            adj.neighbors(0, 1),
            &[NbrUnit { vid: 0, eid: 0 }, NbrUnit { vid: 2, eid: 1 }]
        );
        assert_eq!(adj.neighbors(0, 2), &[NbrUnit { vid: 1, eid: 1 }]);
    }

    #[test]
    fn test_undirected_self_loop_two_entries_not_multigraph() {
        let arena = Arena::unbounded();
        let parser = single_label_parser();
        let srcs = [seal_chunk(&arena, &[1])];
        let dsts = [seal_chunk(&arena, &[1])];

        let adj = generate_undirected_csr::<u64, u64>(&arena, &parser, &srcs, &dsts, &[2], 1, 2)
            .unwrap();

        assert_eq!(adj.offsets[0].as_slice(), &[0, 0, 2]);
        assert_eq!(
            adj.neighbors(0, 1),
            &[NbrUnit { vid: 1, eid: 0 }, NbrUnit { vid: 1, eid: 0 }]
        );
        // Both entries are the same edge; not a multigraph.
        assert!(!adj.is_multigraph);
    }

    #[test]
    fn test_duplicate_undirected_edge_is_multigraph() {
        let arena = Arena::unbounded();
        let parser = single_label_parser();
        let srcs = [seal_chunk(&arena, &[0, 1])];
        let dsts = [seal_chunk(&arena, &[1, 0])];

        let adj = generate_undirected_csr::<u64, u64>(&arena, &parser, &srcs, &dsts, &[2], 1, 2)
            .unwrap();
        assert!(adj.is_multigraph);
    }

    #[test]
    fn test_memopt_matches_single_pass() {
        let arena = Arena::unbounded();
        let parser = single_label_parser();
        let srcs = [seal_chunk(&arena, &[0, 1, 0, 3])];
        let dsts = [seal_chunk(&arena, &[1, 2, 1, 3])];

        let single = generate_undirected_csr::<u64, u64>(
            &arena, &parser, &srcs, &dsts, &[4], 1, 2,
        )
        .unwrap();
        let two_pass = generate_undirected_csr_memopt::<u64, u64>(
            &arena, &parser, &srcs, &dsts, &[4], 1, 2,
        )
        .unwrap();

        assert_eq!(single.is_multigraph, two_pass.is_multigraph);
        assert_eq!(single.offsets[0].as_slice(), two_pass.offsets[0].as_slice());
        assert_eq!(single.edges[0].as_slice(), two_pass.edges[0].as_slice());
    }

    #[test]
    fn test_empty_edge_list() {
        let arena = Arena::unbounded();
        let parser = single_label_parser();
        let csr = generate_directed_csr::<u64, u64>(&arena, &parser, &[], &[], &[3], 1, 2)
            .unwrap();
        assert!(!csr.is_multigraph);
        assert_eq!(csr.offsets[0].as_slice(), &[0, 0, 0, 0]);
        assert_eq!(csr.edge_count(0), 0);
    }

    #[test]
    fn test_mismatched_chunks_rejected() {
        let arena = Arena::unbounded();
        let parser = single_label_parser();
        let srcs = [seal_chunk(&arena, &[0, 1])];
        let dsts = [seal_chunk(&arena, &[1])];
        let err = generate_directed_csr::<u64, u64>(&arena, &parser, &srcs, &dsts, &[2], 1, 1)
            .unwrap_err();
        assert!(matches!(err, GraphError::InvalidParameter(_)));
    }
}
