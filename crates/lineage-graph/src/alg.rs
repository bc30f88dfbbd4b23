//! Graph algorithms over [`Graph`].
//!
//! The `Graph` methods (`topological_sort`, `shortest_path`, `transitive_closure`, ...)
//! are built on the same internals; the free functions here expose the lower-level
//! pieces.

pub(crate) mod closure;
pub(crate) mod cycles;
pub(crate) mod dominators;
pub(crate) mod paths;
pub(crate) mod search;
pub(crate) mod topology;

pub use paths::PathMode;

use crate::error::{GraphError, Result};
use crate::graph::{Graph, Toward, Vertex};
use topology::{Topology, Way};

/// Vertices reachable from `start`, in breadth-first discovery order.
pub fn bfs<N, E>(g: &Graph<N, E>, start: Vertex, toward: Toward) -> Vec<Vertex> {
    let t = Topology::new(g);
    let Some(s) = t.dense(start) else {
        return Vec::new();
    };
    let way = Way::toward(g.meaning_of_direction(), toward);
    t.to_vertices(search::bfs_order(&t, s, way))
}

/// Vertices reachable from `start`, in depth-first discovery order.
pub fn dfs<N, E>(g: &Graph<N, E>, start: Vertex, toward: Toward) -> Vec<Vertex> {
    let t = Topology::new(g);
    let Some(s) = t.dense(start) else {
        return Vec::new();
    };
    let way = Way::toward(g.meaning_of_direction(), toward);
    t.to_vertices(search::dfs_order(&t, s, way))
}

pub fn components<N, E>(g: &Graph<N, E>) -> Vec<Vec<Vertex>> {
    let t = Topology::new(g);
    cycles::components(&t)
        .into_iter()
        .map(|comp| t.to_vertices(comp))
        .collect()
}

pub fn find_cycles<N, E>(g: &Graph<N, E>) -> Vec<Vec<Vertex>> {
    let t = Topology::new(g);
    cycles::find_cycles(&t)
        .into_iter()
        .map(|scc| t.to_vertices(scc))
        .collect()
}

pub fn is_acyclic<N, E>(g: &Graph<N, E>) -> bool {
    search::topological_order(&Topology::new(g)).is_some()
}

/// Distances from `source` toward the leaves, for every reachable vertex (storage order).
/// `source` itself is reported at distance 0.
pub fn dag_distances<N, E>(
    g: &Graph<N, E>,
    source: Vertex,
    mode: PathMode,
) -> Result<Vec<(Vertex, usize)>> {
    let t = Topology::new(g);
    let Some(s) = t.dense(source) else {
        return Ok(Vec::new());
    };
    let way = Way::toward(g.meaning_of_direction(), Toward::Leaves);
    let paths =
        paths::dag_paths(&t, s, way, mode).ok_or_else(|| GraphError::not_a_dag("dag_distances"))?;
    Ok(paths
        .distances
        .iter()
        .enumerate()
        .filter_map(|(i, d)| d.map(|d| (t.vertex(i), d)))
        .collect())
}

/// Immediate dominators of the vertices reachable from `root` toward the leaves, as
/// `(vertex, immediate dominator)` pairs in storage order. The root itself is omitted.
pub fn dominator_tree<N, E>(g: &Graph<N, E>, root: Vertex) -> Vec<(Vertex, Vertex)> {
    let t = Topology::new(g);
    let Some(r) = t.dense(root) else {
        return Vec::new();
    };
    let way = Way::toward(g.meaning_of_direction(), Toward::Leaves);
    dominators::immediate_dominators(&t, r, way)
        .into_iter()
        .enumerate()
        .filter_map(|(i, d)| match d {
            Some(d) if i != r => Some((t.vertex(i), t.vertex(d))),
            _ => None,
        })
        .collect()
}
