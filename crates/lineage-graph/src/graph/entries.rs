//! Internal storage entries for [`Graph`](super::Graph).

use super::{Edge, Vertex};

#[derive(Debug, Clone)]
pub(in crate::graph) struct VertexSlot<N> {
    pub(in crate::graph) generation: u32,
    pub(in crate::graph) data: Option<VertexData<N>>,
}

#[derive(Debug, Clone)]
pub(in crate::graph) struct VertexData<N> {
    pub(in crate::graph) props: N,
    // Incident edges in insertion order.
    pub(in crate::graph) out: Vec<Edge>,
    pub(in crate::graph) in_: Vec<Edge>,
}

#[derive(Debug, Clone)]
pub(in crate::graph) struct EdgeSlot<E> {
    pub(in crate::graph) generation: u32,
    pub(in crate::graph) data: Option<EdgeData<E>>,
}

#[derive(Debug, Clone)]
pub(in crate::graph) struct EdgeData<E> {
    pub(in crate::graph) source: Vertex,
    pub(in crate::graph) target: Vertex,
    pub(in crate::graph) props: E,
}
