use hashbrown::hash_map::Entry;
use parking_lot::Mutex;

use crate::arena::{Arena, BufferKind, SealedArray, SharedSlice};
use crate::column::ChunkedArray;
use crate::error::{GraphError, Result};
use crate::id::{FragId, IdParser, LabelId, VertexId};
use crate::parallel::parallel_for;

/// Per-label gid to lid mapping for vertices owned by other fragments.
pub type OuterVertexMap<V> = hashbrown::HashMap<V, V>;

/// Scan all edge endpoint columns and assign a dense local id to every
/// referenced vertex that another fragment owns.
///
/// For each label the result is a gid→lid map plus the sealed reverse list:
/// the gid at position `offset(lid) - native_count` is the one the lid was
/// assigned for. Assignment order is first-seen order over the columns
/// (src columns before dst columns, chunks in sequence), so labels are
/// scanned by at most one worker each; parallelism is across labels only.
///
/// `start_ids[label]` is the lid for that label's first outer vertex,
/// `parser.generate_local_id(label, native_count)`.
pub fn generate_outer_vertices_map<V: VertexId>(
    arena: &Arena,
    parser: &IdParser<V>,
    fid: FragId,
    vertex_label_num: LabelId,
    srcs: &[ChunkedArray<V>],
    dsts: &[ChunkedArray<V>],
    start_ids: &[V],
    concurrency: usize,
) -> Result<(Vec<OuterVertexMap<V>>, Vec<SealedArray<V>>)> {
    let label_num = vertex_label_num as usize;
    if start_ids.len() != label_num {
        return Err(GraphError::invalid_parameter(format!(
            "expected {} start ids, got {}",
            label_num,
            start_ids.len()
        )));
    }

    // One result slot per label. With chunk size 1 every label index is
    // claimed by exactly one worker, and the parallel_for join barrier
    // guarantees each slot is filled before collection below.
    let slots: Vec<Mutex<Option<Result<(OuterVertexMap<V>, SealedArray<V>)>>>> =
        (0..label_num).map(|_| Mutex::new(None)).collect();

    parallel_for(label_num, concurrency.min(label_num.max(1)), Some(1), |label| {
        let result = scan_label(
            arena,
            parser,
            fid,
            label as LabelId,
            srcs,
            dsts,
            start_ids[label],
        );
        *slots[label].lock() = Some(result);
    });

    let mut maps = Vec::with_capacity(label_num);
    let mut lists = Vec::with_capacity(label_num);
    for slot in slots {
        // An empty slot would mean parallel_for skipped an index, which its
        // exactly-once contract rules out; treat it like any other contract
        // violation inside a parallel region and abort.
        let (map, list) = slot
            .into_inner()
            .expect("label worker did not report a result")?;
        maps.push(map);
        lists.push(list);
    }
    log::debug!(
        "outer vertex map: {} labels, {} outer vertices",
        label_num,
        lists.iter().map(|l| l.len()).sum::<usize>()
    );
    Ok((maps, lists))
}

fn scan_label<V: VertexId>(
    arena: &Arena,
    parser: &IdParser<V>,
    fid: FragId,
    label: LabelId,
    srcs: &[ChunkedArray<V>],
    dsts: &[ChunkedArray<V>],
    start_id: V,
) -> Result<(OuterVertexMap<V>, SealedArray<V>)> {
    let mut map = OuterVertexMap::new();
    let mut list = arena.allocate_growable::<V>(256, BufferKind::VertexIds)?;
    for column in srcs.iter().chain(dsts.iter()) {
        for chunk in column.iter_chunks() {
            for &gid in chunk {
                if parser.fid(gid) == fid || parser.label_id(gid) != label {
                    continue;
                }
                if let Entry::Vacant(entry) = map.entry(gid) {
                    let lid = start_id + <V as VertexId>::from_usize(list.len());
                    entry.insert(lid);
                    list.append(gid)?;
                }
            }
        }
    }
    Ok((map, list.seal()))
}

/// Translate a chunked gid column into sealed lid chunks.
///
/// Native gids keep their offset with the fragment field stripped; foreign
/// gids resolve through the label's outer map. Chunks translate in parallel,
/// each worker writing its own chunk's output buffer. A gid that is neither
/// native nor mapped fails the whole call with `InvalidReference`; the first
/// detected miss wins and is reported after all workers join.
pub fn generate_local_id_list<V: VertexId>(
    arena: &Arena,
    parser: &IdParser<V>,
    gid_list: &ChunkedArray<V>,
    fid: FragId,
    ovg2l_maps: &[OuterVertexMap<V>],
    concurrency: usize,
) -> Result<Vec<SealedArray<V>>> {
    let num_chunks = gid_list.num_chunks();
    let mut builders = Vec::with_capacity(num_chunks);
    for index in 0..num_chunks {
        builders.push(arena.allocate_fixed::<V>(
            gid_list.chunk_values(index).len(),
            BufferKind::VertexIds,
        )?);
    }
    let views: Vec<SharedSlice<'_, V>> = builders.iter_mut().map(|b| b.shared()).collect();
    let first_error: Mutex<Option<GraphError>> = Mutex::new(None);

    parallel_for(num_chunks, concurrency, Some(1), |index| {
        let gids = gid_list.chunk_values(index);
        let view = &views[index];
        for (i, &gid) in gids.iter().enumerate() {
            if parser.fid(gid) == fid {
                view.write(i, parser.to_local_id(gid));
                continue;
            }
            let label = parser.label_id(gid) as usize;
            match ovg2l_maps.get(label).and_then(|map| map.get(&gid)) {
                Some(&lid) => view.write(i, lid),
                None => {
                    let mut slot = first_error.lock();
                    if slot.is_none() {
                        *slot = Some(GraphError::invalid_reference(gid.as_u64()));
                    }
                    return;
                }
            }
        }
    });
    drop(views);

    if let Some(err) = first_error.into_inner() {
        return Err(err);
    }
    Ok(builders.into_iter().map(|b| b.seal()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;
    use pretty_assertions::assert_eq;

    fn parser() -> IdParser<u64> {
        IdParser::new(2, 2)
    }

    // Fragment 0 is local; native counts: label 0 -> 4, label 1 -> 2.
    fn start_ids(parser: &IdParser<u64>) -> Vec<u64> {
        vec![
            parser.generate_local_id(0, 4),
            parser.generate_local_id(1, 2),
        ]
    }

    #[test]
    fn test_outer_map_completeness_and_inverse() {
        let arena = Arena::unbounded();
        let parser = parser();
        let foreign = |label, off| parser.generate_id(1, label, off);
        let native = |label, off| parser.generate_id(0, label, off);

        let srcs = vec![ChunkedArray::from_values(vec![
            native(0, 0),
            foreign(0, 7),
            foreign(1, 3),
            foreign(0, 7),
        ])];
        let dsts = vec![ChunkedArray::from_values(vec![
            foreign(0, 9),
            native(1, 1),
            foreign(0, 7),
            foreign(1, 5),
        ])];

        let (maps, lists) = generate_outer_vertices_map(
            &arena,
            &parser,
            0,
            2,
            &srcs,
            &dsts,
            &start_ids(&parser),
            4,
        )
        .unwrap();

        // Label 0: gids 7 and 9 (in first-seen order: srcs before dsts).
        assert_eq!(maps[0].len(), 2);
        assert_eq!(lists[0].as_slice(), &[foreign(0, 7), foreign(0, 9)]);
        assert_eq!(maps[0][&foreign(0, 7)], parser.generate_local_id(0, 4));
        assert_eq!(maps[0][&foreign(0, 9)], parser.generate_local_id(0, 5));

        // Label 1: gids 3 and 5.
        assert_eq!(maps[1].len(), 2);
        assert_eq!(lists[1].as_slice(), &[foreign(1, 3), foreign(1, 5)]);
        assert_eq!(maps[1][&foreign(1, 3)], parser.generate_local_id(1, 2));
        assert_eq!(maps[1][&foreign(1, 5)], parser.generate_local_id(1, 3));

        // Reverse list is the exact inverse of the map.
        for (label, map) in maps.iter().enumerate() {
            for (&gid, &lid) in map {
                let native_count = parser.offset(start_ids(&parser)[label]);
                assert_eq!(lists[label].as_slice()[parser.offset(lid) - native_count], gid);
            }
        }
    }

    #[test]
    fn test_local_id_translation() {
        let arena = Arena::unbounded();
        let parser = parser();
        let foreign = parser.generate_id(1, 0, 7);
        let srcs = vec![ChunkedArray::from_values(vec![foreign])];
        let dsts = vec![ChunkedArray::from_values(vec![parser.generate_id(0, 0, 1)])];
        let (maps, _) = generate_outer_vertices_map(
            &arena,
            &parser,
            0,
            2,
            &srcs,
            &dsts,
            &start_ids(&parser),
            1,
        )
        .unwrap();

        let gids = ChunkedArray::from_values(vec![
            parser.generate_id(0, 0, 2),
            foreign,
            parser.generate_id(0, 1, 0),
        ]);
        let lids = generate_local_id_list(&arena, &parser, &gids, 0, &maps, 2).unwrap();
        assert_eq!(lids.len(), 1);
        assert_eq!(
            lids[0].as_slice(),
            &[
                parser.generate_local_id(0, 2),
                parser.generate_local_id(0, 4),
                parser.generate_local_id(1, 0),
            ]
        );
    }

    #[test]
    fn test_unmapped_foreign_gid_is_invalid_reference() {
        let arena = Arena::unbounded();
        let parser = parser();
        let maps = vec![OuterVertexMap::new(), OuterVertexMap::new()];
        let stray = parser.generate_id(1, 0, 42);
        let gids = ChunkedArray::from_values(vec![stray]);
        let err = generate_local_id_list(&arena, &parser, &gids, 0, &maps, 2).unwrap_err();
        assert!(matches!(err, GraphError::InvalidReference(gid) if gid == stray));
    }
}
