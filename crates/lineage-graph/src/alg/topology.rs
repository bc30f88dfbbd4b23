//! Dense adjacency snapshot used by the algorithms.
//!
//! Arena slots may have holes, so every algorithm first maps live vertices onto
//! `0..vertex_count` (storage order) and works on plain index lists.

use crate::graph::{Graph, MeaningOfDirection, Toward, Vertex};

const NO_INDEX: usize = usize::MAX;

/// Physical orientation used while walking a [`Topology`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Way {
    Forward,
    Reverse,
}

impl Way {
    pub(crate) fn flip(self) -> Self {
        match self {
            Way::Forward => Way::Reverse,
            Way::Reverse => Way::Forward,
        }
    }

    pub(crate) fn toward(direction: MeaningOfDirection, toward: Toward) -> Self {
        match (direction, toward) {
            (MeaningOfDirection::ParentToChild, Toward::Leaves)
            | (MeaningOfDirection::ChildToParent, Toward::Roots) => Way::Forward,
            (MeaningOfDirection::ParentToChild, Toward::Roots)
            | (MeaningOfDirection::ChildToParent, Toward::Leaves) => Way::Reverse,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Topology {
    pub(crate) vertices: Vec<Vertex>,
    dense_of_slot: Vec<usize>,
    succ: Vec<Vec<usize>>,
    pred: Vec<Vec<usize>>,
}

impl Topology {
    pub(crate) fn new<N, E>(g: &Graph<N, E>) -> Self {
        let vertices: Vec<Vertex> = g.vertices().collect();
        let mut dense_of_slot: Vec<usize> = vec![NO_INDEX; g.vertex_slot_capacity()];
        for (i, v) in vertices.iter().enumerate() {
            dense_of_slot[v.slot()] = i;
        }

        let mut succ: Vec<Vec<usize>> = vec![Vec::new(); vertices.len()];
        let mut pred: Vec<Vec<usize>> = vec![Vec::new(); vertices.len()];
        for (u, &v) in vertices.iter().enumerate() {
            g.for_each_successor(v, |w| {
                let w = dense_of_slot[w.slot()];
                succ[u].push(w);
                pred[w].push(u);
            });
        }

        Self {
            vertices,
            dense_of_slot,
            succ,
            pred,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Dense index of `v`, or `None` for a null, stale or foreign handle.
    pub(crate) fn dense(&self, v: Vertex) -> Option<usize> {
        let i = *self.dense_of_slot.get(v.slot())?;
        (i != NO_INDEX && self.vertices[i] == v).then_some(i)
    }

    pub(crate) fn vertex(&self, i: usize) -> Vertex {
        self.vertices[i]
    }

    pub(crate) fn succ(&self, u: usize) -> &[usize] {
        &self.succ[u]
    }

    pub(crate) fn neighbors(&self, u: usize, way: Way) -> &[usize] {
        match way {
            Way::Forward => &self.succ[u],
            Way::Reverse => &self.pred[u],
        }
    }

    pub(crate) fn to_vertices(&self, indices: impl IntoIterator<Item = usize>) -> Vec<Vertex> {
        indices.into_iter().map(|i| self.vertices[i]).collect()
    }
}
