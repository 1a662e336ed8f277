pub mod arena;
pub mod column;
pub mod csr;
pub mod error;
pub mod id;
pub mod parallel;
pub mod vertex_map;

pub use arena::{Arena, BufferKind, FixedArrayBuilder, GrowableArrayBuilder, SealedArray, SealedVertexIds, SharedSlice};
pub use column::ChunkedArray;
pub use csr::{generate_directed_csc, generate_directed_csr, generate_undirected_csr, generate_undirected_csr_memopt, AdjacencyList, NbrUnit};
pub use error::{GraphError, Result};
pub use id::{EdgeId, FragId, IdParser, LabelId, VertexId};
pub use parallel::{default_concurrency, parallel_for};
pub use vertex_map::{generate_local_id_list, generate_outer_vertices_map, OuterVertexMap};

pub mod prelude {
    pub use crate::arena::{Arena, BufferKind, SealedArray, SealedVertexIds};
    pub use crate::column::ChunkedArray;
    pub use crate::csr::{
        generate_directed_csc, generate_directed_csr, generate_undirected_csr,
        generate_undirected_csr_memopt, AdjacencyList, NbrUnit,
    };
    pub use crate::error::{GraphError, Result};
    pub use crate::id::{EdgeId, FragId, IdParser, LabelId, VertexId};
    pub use crate::parallel::{default_concurrency, parallel_for};
    pub use crate::vertex_map::{
        generate_local_id_list, generate_outer_vertices_map, OuterVertexMap,
    };
}
