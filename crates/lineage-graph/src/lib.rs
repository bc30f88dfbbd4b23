#![forbid(unsafe_code)]

//! Directed provenance graph container.
//!
//! Vertices model versions of an image, edges model the derivation steps between them.
//! The container is an arena indexed by small integer slots; handles are generation
//! checked, so a handle that outlived its vertex or edge is simply ignored.
//!
//! Algorithms that need an acyclic graph (topological sort, closure, reduction, DAG paths)
//! report [`GraphError::NotADag`] instead of returning partial data.

pub mod alg;
pub mod error;
pub mod graph;

pub use error::{GraphError, Result};
pub use graph::{
    AdjacencyFlags, Edge, Graph, GraphCopyFlags, MeaningOfDirection, ReturnOrder, Toward, Vertex,
};
