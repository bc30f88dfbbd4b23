//! DAG algorithms exposed as [`Graph`] methods.

use super::{Edge, Graph, GraphCopyFlags, MeaningOfDirection, ReturnOrder, Toward, Vertex};
use crate::alg::closure::{closure_edges, is_redundant, reachability};
use crate::alg::dominators::{dominated_subtree, immediate_dominators};
use crate::alg::paths::{PathMode, dag_paths};
use crate::alg::search::{bfs_order, dfs_order, topological_order};
use crate::alg::topology::{Topology, Way};
use crate::error::{GraphError, Result};

impl<N, E> Graph<N, E> {
    /// Vertices ordered so that every edge's source precedes its target.
    pub fn topological_sort(&self) -> Result<Vec<Vertex>> {
        let t = Topology::new(self);
        let order =
            topological_order(&t).ok_or_else(|| GraphError::not_a_dag("topological_sort"))?;
        Ok(t.to_vertices(order))
    }

    /// Shortest path between `v1` and `v2`, searched from `v1` first and from `v2` if `v2`
    /// is not a descendant of `v1`.
    ///
    /// The result always starts with `v1` and ends with `v2`; it is empty if neither vertex
    /// reaches the other or a handle is invalid.
    pub fn shortest_path(&self, v1: Vertex, v2: Vertex) -> Result<Vec<Vertex>> {
        let t = Topology::new(self);
        let (Some(d1), Some(d2)) = (t.dense(v1), t.dense(v2)) else {
            return Ok(Vec::new());
        };
        if d1 == d2 {
            return Ok(vec![v1]);
        }

        let forward = dag_paths(&t, d1, Way::Forward, PathMode::Shortest)
            .ok_or_else(|| GraphError::not_a_dag("shortest_path"))?;
        if forward.is_reachable(d2) {
            let mut chain = forward.chain_to(d2);
            chain.reverse();
            return Ok(t.to_vertices(chain));
        }

        // Assume inverted parameters.
        let backward = dag_paths(&t, d2, Way::Forward, PathMode::Shortest)
            .ok_or_else(|| GraphError::not_a_dag("shortest_path"))?;
        if backward.is_reachable(d1) {
            return Ok(t.to_vertices(backward.chain_to(d1)));
        }
        Ok(Vec::new())
    }

    /// The longest path from a root through `v` to a leaf.
    ///
    /// The sequence follows the physical edge direction: root, ..., v, ..., leaf for
    /// [`MeaningOfDirection::ParentToChild`] and leaf, ..., v, ..., root for
    /// [`MeaningOfDirection::ChildToParent`], so `path[i] -> path[i + 1]` is always an edge.
    /// Among equally long candidates the root/leaf that comes first in storage order wins.
    pub fn longest_path_touching(&self, v: Vertex) -> Result<Vec<Vertex>> {
        let t = Topology::new(self);
        let Some(d) = t.dense(v) else {
            return Ok(Vec::new());
        };

        let up = dag_paths(
            &t,
            d,
            Way::toward(self.direction, Toward::Roots),
            PathMode::Longest,
        )
        .ok_or_else(|| GraphError::not_a_dag("longest_path_touching"))?;
        let down = dag_paths(
            &t,
            d,
            Way::toward(self.direction, Toward::Leaves),
            PathMode::Longest,
        )
        .ok_or_else(|| GraphError::not_a_dag("longest_path_touching"))?;

        // `chain_to` lists the far end first and ends with `d`.
        let mut path: Vec<usize> = match up.most_remote() {
            Some(root) => up.chain_to(root),
            None => vec![d],
        };
        if let Some(leaf) = down.most_remote() {
            let mut to_leaf = down.chain_to(leaf);
            to_leaf.reverse();
            path.extend(to_leaf.into_iter().skip(1));
        }

        if self.direction == MeaningOfDirection::ChildToParent {
            path.reverse();
        }
        Ok(t.to_vertices(path))
    }

    /// For `v` reachable from `root`, every vertex dominated by `v` (all paths from `root`
    /// to it pass through `v`), listed in breadth-first or depth-first discovery order
    /// starting from `root`. Searches run toward the leaves.
    pub fn vertices_dominated_by(
        &self,
        v: Vertex,
        root: Vertex,
        order: ReturnOrder,
    ) -> Vec<Vertex> {
        let t = Topology::new(self);
        let (Some(dv), Some(dr)) = (t.dense(v), t.dense(root)) else {
            return Vec::new();
        };
        let way = Way::toward(self.direction, Toward::Leaves);

        let discovered = match order {
            ReturnOrder::BreadthFirst => bfs_order(&t, dr, way),
            ReturnOrder::DepthFirst => dfs_order(&t, dr, way),
        };
        let idom = immediate_dominators(&t, dr, way);
        let in_tree = dominated_subtree(&idom, dv);

        t.to_vertices(discovered.into_iter().filter(|&u| in_tree[u]))
    }
}

impl<N, E> Graph<N, E>
where
    N: Clone + Default,
    E: Clone + Default,
{
    /// A copy of this graph with an edge `u -> w` for every `w` reachable from `u`.
    pub fn transitive_closure(&self, flags: GraphCopyFlags) -> Result<Self> {
        let t = Topology::new(self);
        let order =
            topological_order(&t).ok_or_else(|| GraphError::not_a_dag("transitive_closure"))?;
        let reach = reachability(&t, &order);

        let (mut closure, copied) = self.derived_skeleton(&t);
        for (u, w) in closure_edges(&reach) {
            closure.add_edge(copied[u], copied[w]);
        }
        self.copy_properties(&mut closure, flags, &t, &copied);
        Ok(closure)
    }

    /// A copy of this graph without the edges implied by transitivity.
    pub fn transitive_reduction(&self, flags: GraphCopyFlags) -> Result<Self> {
        self.transitive_reduction_with_removed(flags)
            .map(|(reduction, _)| reduction)
    }

    /// Like [`transitive_reduction`](Self::transitive_reduction), also returning the edges
    /// of `self` that were dropped as redundant.
    pub fn transitive_reduction_with_removed(
        &self,
        flags: GraphCopyFlags,
    ) -> Result<(Self, Vec<Edge>)> {
        let t = Topology::new(self);
        let order =
            topological_order(&t).ok_or_else(|| GraphError::not_a_dag("transitive_reduction"))?;
        let reach = reachability(&t, &order);

        let (mut reduction, copied) = self.derived_skeleton(&t);
        for (s, w) in self.edge_pairs() {
            let (Some(ds), Some(dw)) = (t.dense(s), t.dense(w)) else {
                continue;
            };
            if !is_redundant(&t, &reach, ds, dw) {
                reduction.add_edge(copied[ds], copied[dw]);
            }
        }
        self.copy_properties(&mut reduction, flags, &t, &copied);

        let removed = self.edge_difference(&reduction, &t, &copied);
        Ok((reduction, removed))
    }

    /// An edgeless graph with one vertex per vertex of `self`, plus the dense-index map.
    fn derived_skeleton(&self, t: &Topology) -> (Self, Vec<Vertex>) {
        let mut out = Self::new(self.direction);
        let copied: Vec<Vertex> = (0..t.len()).map(|_| out.add_vertex()).collect();
        (out, copied)
    }

    fn copy_properties(
        &self,
        other: &mut Self,
        flags: GraphCopyFlags,
        t: &Topology,
        copied: &[Vertex],
    ) {
        if flags.contains(GraphCopyFlags::VERTEX_PROPERTIES) {
            for (i, &copy) in copied.iter().enumerate() {
                if let Some(props) = self.vertex_properties(t.vertex(i)) {
                    other.set_vertex_properties(copy, props.clone());
                }
            }
        }
        if flags.contains(GraphCopyFlags::EDGE_PROPERTIES) {
            for e in self.edges() {
                let Some((copy_s, copy_t)) = self.copied_endpoints(e, t, copied) else {
                    continue;
                };
                let Some(copied_edge) = other.edge(copy_s, copy_t) else {
                    continue;
                };
                if let Some(props) = self.edge_properties(e) {
                    other.set_edge_properties(copied_edge, props.clone());
                }
            }
        }
    }

    /// Edges of `self` with no counterpart in `other`.
    fn edge_difference(&self, other: &Self, t: &Topology, copied: &[Vertex]) -> Vec<Edge> {
        self.edges()
            .filter(|&e| {
                self.copied_endpoints(e, t, copied)
                    .is_some_and(|(s, w)| !other.has_edge(s, w))
            })
            .collect()
    }

    fn copied_endpoints(
        &self,
        e: Edge,
        t: &Topology,
        copied: &[Vertex],
    ) -> Option<(Vertex, Vertex)> {
        let s = t.dense(self.source(e)?)?;
        let w = t.dense(self.target(e)?)?;
        Some((copied[s], copied[w]))
    }
}
