//! Graph container APIs.
//!
//! This module contains the core `Graph` container: arena storage for vertices and edges,
//! adjacency and degree queries, and payload access. The DAG algorithms live in
//! `graph/algorithms.rs` (as methods) and in [`crate::alg`].

mod algorithms;
mod entries;
mod handle;
mod options;

use entries::{EdgeData, EdgeSlot, VertexData, VertexSlot};
use handle::next_slot_index;
use rustc_hash::FxBuildHasher;

pub use handle::{Edge, Vertex};
pub use options::{AdjacencyFlags, GraphCopyFlags, MeaningOfDirection, ReturnOrder, Toward};

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// A directed graph of versioned vertices with derivation edges.
///
/// At most one edge exists per ordered vertex pair: [`add_edge`](Self::add_edge) on an
/// already connected pair returns the existing edge.
#[derive(Debug, Clone)]
pub struct Graph<N, E> {
    direction: MeaningOfDirection,

    // Slots are only appended through `next_slot_index`, so slot positions fit in `u32`.
    vertices: Vec<VertexSlot<N>>,
    free_vertices: Vec<u32>,
    vertex_count: usize,

    edges: Vec<EdgeSlot<E>>,
    free_edges: Vec<u32>,
    edge_count: usize,
    edge_index: HashMap<(Vertex, Vertex), Edge>,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new(MeaningOfDirection::default())
    }
}

impl<N, E> Graph<N, E> {
    pub fn new(direction: MeaningOfDirection) -> Self {
        Self {
            direction,
            vertices: Vec::new(),
            free_vertices: Vec::new(),
            vertex_count: 0,
            edges: Vec::new(),
            free_edges: Vec::new(),
            edge_count: 0,
            edge_index: HashMap::default(),
        }
    }

    pub fn meaning_of_direction(&self) -> MeaningOfDirection {
        self.direction
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.free_vertices.clear();
        self.vertex_count = 0;
        self.edges.clear();
        self.free_edges.clear();
        self.edge_count = 0;
        self.edge_index.clear();
    }

    fn vertex_data(&self, v: Vertex) -> Option<&VertexData<N>> {
        let slot = self.vertices.get(v.slot())?;
        if slot.generation != v.generation {
            return None;
        }
        slot.data.as_ref()
    }

    fn vertex_data_mut(&mut self, v: Vertex) -> Option<&mut VertexData<N>> {
        let slot = self.vertices.get_mut(v.slot())?;
        if slot.generation != v.generation {
            return None;
        }
        slot.data.as_mut()
    }

    fn edge_data(&self, e: Edge) -> Option<&EdgeData<E>> {
        let slot = self.edges.get(e.slot())?;
        if slot.generation != e.generation {
            return None;
        }
        slot.data.as_ref()
    }

    fn edge_data_mut(&mut self, e: Edge) -> Option<&mut EdgeData<E>> {
        let slot = self.edges.get_mut(e.slot())?;
        if slot.generation != e.generation {
            return None;
        }
        slot.data.as_mut()
    }

    /// Upper bound (exclusive) of vertex slot indices; used by dense algorithm snapshots.
    pub(crate) fn vertex_slot_capacity(&self) -> usize {
        self.vertices.len()
    }

    pub fn contains_vertex(&self, v: Vertex) -> bool {
        self.vertex_data(v).is_some()
    }

    pub fn contains_edge(&self, e: Edge) -> bool {
        self.edge_data(e).is_some()
    }

    /// Inserts a vertex carrying `props`. Returns [`Vertex::NULL`] (dropping `props`) once
    /// `u32::MAX` slots are in use.
    pub fn add_vertex_with(&mut self, props: N) -> Vertex {
        let data = VertexData {
            props,
            out: Vec::new(),
            in_: Vec::new(),
        };
        if let Some(index) = self.free_vertices.pop() {
            let slot = &mut self.vertices[index as usize];
            slot.data = Some(data);
            self.vertex_count += 1;
            return Vertex::new(index, slot.generation);
        }
        let Some(index) = next_slot_index(self.vertices.len()) else {
            tracing::warn!("vertex arena exhausted");
            return Vertex::NULL;
        };
        self.vertices.push(VertexSlot {
            generation: 0,
            data: Some(data),
        });
        self.vertex_count += 1;
        Vertex::new(index, 0)
    }

    /// Removes `v` together with every edge touching it. Returns `false` for a null or
    /// stale handle.
    pub fn remove_vertex(&mut self, v: Vertex) -> bool {
        let Some(data) = self.vertex_data(v) else {
            return false;
        };
        let incident: Vec<Edge> = data.out.iter().chain(data.in_.iter()).copied().collect();
        for e in incident {
            // Self loops are listed twice; the second detach is a no-op.
            let _ = self.detach_edge(e);
        }

        let slot = &mut self.vertices[v.slot()];
        slot.data = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_vertices.push(v.index);
        self.vertex_count -= 1;
        true
    }

    pub fn remove_vertices(&mut self, vertices: &[Vertex]) {
        for &v in vertices {
            self.remove_vertex(v);
        }
    }

    pub fn remove_edge(&mut self, e: Edge) -> bool {
        self.detach_edge(e).is_some()
    }

    fn detach_edge(&mut self, e: Edge) -> Option<EdgeData<E>> {
        let slot = self.edges.get_mut(e.slot())?;
        if slot.generation != e.generation {
            return None;
        }
        let data = slot.data.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_edges.push(e.index);
        self.edge_count -= 1;
        self.edge_index.remove(&(data.source, data.target));
        if let Some(s) = self.vertex_data_mut(data.source) {
            s.out.retain(|x| *x != e);
        }
        if let Some(t) = self.vertex_data_mut(data.target) {
            t.in_.retain(|x| *x != e);
        }
        Some(data)
    }

    fn insert_edge(&mut self, v1: Vertex, v2: Vertex, props: E) -> Edge {
        let data = EdgeData {
            source: v1,
            target: v2,
            props,
        };
        let e = if let Some(index) = self.free_edges.pop() {
            let slot = &mut self.edges[index as usize];
            slot.data = Some(data);
            Edge::new(index, slot.generation)
        } else {
            let Some(index) = next_slot_index(self.edges.len()) else {
                tracing::warn!("edge arena exhausted");
                return Edge::NULL;
            };
            self.edges.push(EdgeSlot {
                generation: 0,
                data: Some(data),
            });
            Edge::new(index, 0)
        };
        self.edge_count += 1;
        self.edge_index.insert((v1, v2), e);
        if let Some(s) = self.vertex_data_mut(v1) {
            s.out.push(e);
        }
        if let Some(t) = self.vertex_data_mut(v2) {
            t.in_.push(e);
        }
        e
    }

    /// Inserts `v1 -> v2` carrying `props`. On an already connected pair the existing edge
    /// is kept and its payload replaced. Returns [`Edge::NULL`] if an endpoint is invalid.
    pub fn add_edge_with(&mut self, v1: Vertex, v2: Vertex, props: E) -> Edge {
        if !self.contains_vertex(v1) || !self.contains_vertex(v2) {
            return Edge::NULL;
        }
        if let Some(e) = self.edge(v1, v2) {
            if let Some(data) = self.edge_data_mut(e) {
                data.props = props;
            }
            return e;
        }
        self.insert_edge(v1, v2, props)
    }

    pub fn edge(&self, v1: Vertex, v2: Vertex) -> Option<Edge> {
        // Keys carry endpoint generations, so stale endpoints never match.
        self.edge_index.get(&(v1, v2)).copied()
    }

    pub fn has_edge(&self, v1: Vertex, v2: Vertex) -> bool {
        self.edge(v1, v2).is_some()
    }

    /// Adjacency test that ignores edge direction.
    pub fn is_connected(&self, v1: Vertex, v2: Vertex) -> bool {
        self.has_edge(v1, v2) || self.has_edge(v2, v1)
    }

    pub fn vertex_properties(&self, v: Vertex) -> Option<&N> {
        self.vertex_data(v).map(|d| &d.props)
    }

    pub fn vertex_properties_mut(&mut self, v: Vertex) -> Option<&mut N> {
        self.vertex_data_mut(v).map(|d| &mut d.props)
    }

    pub fn set_vertex_properties(&mut self, v: Vertex, props: N) -> bool {
        let Some(data) = self.vertex_data_mut(v) else {
            return false;
        };
        data.props = props;
        true
    }

    pub fn edge_properties(&self, e: Edge) -> Option<&E> {
        self.edge_data(e).map(|d| &d.props)
    }

    pub fn edge_properties_mut(&mut self, e: Edge) -> Option<&mut E> {
        self.edge_data_mut(e).map(|d| &mut d.props)
    }

    pub fn set_edge_properties(&mut self, e: Edge, props: E) -> bool {
        let Some(data) = self.edge_data_mut(e) else {
            return false;
        };
        data.props = props;
        true
    }

    /// Linear scan in vertex-storage order; equality is delegated to the payload type.
    pub fn find_vertex_by_properties<T>(&self, value: &T) -> Option<Vertex>
    where
        T: ?Sized,
        N: PartialEq<T>,
    {
        self.vertices
            .iter()
            .enumerate()
            .find_map(|(index, slot)| match &slot.data {
                Some(data) if data.props == *value => {
                    Some(Vertex::new(index as u32, slot.generation))
                }
                _ => None,
            })
    }

    /// Live vertices in storage (slot) order.
    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.data.is_some())
            .map(|(index, slot)| Vertex::new(index as u32, slot.generation))
    }

    /// Live edges in storage (slot) order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.data.is_some())
            .map(|(index, slot)| Edge::new(index as u32, slot.generation))
    }

    pub fn edge_pairs(&self) -> Vec<(Vertex, Vertex)> {
        self.edges
            .iter()
            .filter_map(|slot| slot.data.as_ref())
            .map(|d| (d.source, d.target))
            .collect()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0
    }

    pub fn out_degree(&self, v: Vertex) -> usize {
        self.vertex_data(v).map_or(0, |d| d.out.len())
    }

    pub fn in_degree(&self, v: Vertex) -> usize {
        self.vertex_data(v).map_or(0, |d| d.in_.len())
    }

    pub fn source(&self, e: Edge) -> Option<Vertex> {
        self.edge_data(e).map(|d| d.source)
    }

    pub fn target(&self, e: Edge) -> Option<Vertex> {
        self.edge_data(e).map(|d| d.target)
    }

    /// Neighbours of `v`: targets of outbound edges first, then sources of inbound edges.
    /// A vertex connected in both directions is listed once per edge.
    pub fn adjacent_vertices(&self, v: Vertex, flags: AdjacencyFlags) -> Vec<Vertex> {
        let flags = flags.resolve(self.direction);
        let mut out: Vec<Vertex> = Vec::new();
        if flags.contains(AdjacencyFlags::OUTBOUND) {
            self.for_each_successor(v, |w| out.push(w));
        }
        if flags.contains(AdjacencyFlags::INBOUND) {
            self.for_each_predecessor(v, |u| out.push(u));
        }
        out
    }

    pub fn edges_of(&self, v: Vertex, flags: AdjacencyFlags) -> Vec<Edge> {
        let flags = flags.resolve(self.direction);
        let Some(data) = self.vertex_data(v) else {
            return Vec::new();
        };
        let mut out: Vec<Edge> = Vec::new();
        if flags.contains(AdjacencyFlags::OUTBOUND) {
            out.extend_from_slice(&data.out);
        }
        if flags.contains(AdjacencyFlags::INBOUND) {
            out.extend_from_slice(&data.in_);
        }
        out
    }

    pub fn successors(&self, v: Vertex) -> Vec<Vertex> {
        let mut out: Vec<Vertex> = Vec::with_capacity(self.out_degree(v));
        self.for_each_successor(v, |w| out.push(w));
        out
    }

    pub fn predecessors(&self, v: Vertex) -> Vec<Vertex> {
        let mut out: Vec<Vertex> = Vec::with_capacity(self.in_degree(v));
        self.for_each_predecessor(v, |u| out.push(u));
        out
    }

    pub fn for_each_successor<F>(&self, v: Vertex, mut f: F)
    where
        F: FnMut(Vertex),
    {
        let Some(data) = self.vertex_data(v) else {
            return;
        };
        for &e in &data.out {
            if let Some(edge) = self.edge_data(e) {
                f(edge.target);
            }
        }
    }

    pub fn for_each_predecessor<F>(&self, v: Vertex, mut f: F)
    where
        F: FnMut(Vertex),
    {
        let Some(data) = self.vertex_data(v) else {
            return;
        };
        for &e in &data.in_ {
            if let Some(edge) = self.edge_data(e) {
                f(edge.source);
            }
        }
    }

    /// Vertices without parents, in storage order.
    pub fn roots(&self) -> Vec<Vertex> {
        match self.direction {
            MeaningOfDirection::ParentToChild => self.find_zero_degree(true),
            MeaningOfDirection::ChildToParent => self.find_zero_degree(false),
        }
    }

    /// Vertices without children, in storage order.
    pub fn leaves(&self) -> Vec<Vertex> {
        match self.direction {
            MeaningOfDirection::ParentToChild => self.find_zero_degree(false),
            MeaningOfDirection::ChildToParent => self.find_zero_degree(true),
        }
    }

    fn find_zero_degree(&self, inbound: bool) -> Vec<Vertex> {
        self.vertices()
            .filter(|&v| {
                if inbound {
                    self.in_degree(v) == 0
                } else {
                    self.out_degree(v) == 0
                }
            })
            .collect()
    }
}

impl<N, E> Graph<N, E>
where
    N: Default,
    E: Default,
{
    pub fn add_vertex(&mut self) -> Vertex {
        self.add_vertex_with(N::default())
    }

    /// Idempotent per ordered pair: returns the existing edge if `v1 -> v2` is already
    /// present. Returns [`Edge::NULL`] if an endpoint is invalid.
    pub fn add_edge(&mut self, v1: Vertex, v2: Vertex) -> Edge {
        if !self.contains_vertex(v1) || !self.contains_vertex(v2) {
            return Edge::NULL;
        }
        if let Some(e) = self.edge(v1, v2) {
            return e;
        }
        self.insert_edge(v1, v2, E::default())
    }

    /// Payload of `v1 -> v2`, or `E::default()` if the pair is not connected.
    pub fn edge_properties_between(&self, v1: Vertex, v2: Vertex) -> E
    where
        E: Clone,
    {
        self.edge(v1, v2)
            .and_then(|e| self.edge_properties(e))
            .cloned()
            .unwrap_or_default()
    }
}
