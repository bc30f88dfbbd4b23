//! Single-source DAG paths with unit edge weights.

use super::search::reachable_topological_order;
use super::topology::{Topology, Way};

/// Whether a path search minimizes or maximizes the distance to each vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathMode {
    Shortest,
    Longest,
}

#[derive(Debug, Clone)]
pub(crate) struct DagPaths {
    /// `None` marks an unreachable vertex.
    pub(crate) distances: Vec<Option<usize>>,
    pub(crate) predecessors: Vec<Option<usize>>,
}

impl DagPaths {
    pub(crate) fn is_reachable(&self, v: usize) -> bool {
        self.distances[v].is_some()
    }

    /// Walks predecessors back from `target` to the source; `[target, ..., source]`.
    pub(crate) fn chain_to(&self, target: usize) -> Vec<usize> {
        let mut out: Vec<usize> = vec![target];
        let mut cur = target;
        while let Some(p) = self.predecessors[cur] {
            out.push(p);
            cur = p;
        }
        out
    }

    /// The reachable vertex with the greatest non-zero distance; ties go to the lowest
    /// (storage order) index.
    pub(crate) fn most_remote(&self) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for (i, d) in self.distances.iter().enumerate() {
            let Some(d) = *d else {
                continue;
            };
            if d == 0 {
                continue;
            }
            if best.is_none_or(|(_, best_d)| d > best_d) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }
}

/// Relaxes edges in topological order of the part reachable from `source`.
/// `None` if that part contains a cycle.
pub(crate) fn dag_paths(t: &Topology, source: usize, way: Way, mode: PathMode) -> Option<DagPaths> {
    let order = reachable_topological_order(t, source, way)?;
    let n = t.len();
    let mut distances: Vec<Option<usize>> = vec![None; n];
    let mut predecessors: Vec<Option<usize>> = vec![None; n];
    distances[source] = Some(0);

    for u in order {
        let Some(du) = distances[u] else {
            continue;
        };
        let candidate = du + 1;
        for &w in t.neighbors(u, way) {
            let better = match (distances[w], mode) {
                (None, _) => true,
                (Some(dw), PathMode::Shortest) => candidate < dw,
                (Some(dw), PathMode::Longest) => candidate > dw,
            };
            if better {
                distances[w] = Some(candidate);
                predecessors[w] = Some(u);
            }
        }
    }

    Some(DagPaths {
        distances,
        predecessors,
    })
}
