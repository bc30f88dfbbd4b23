//! Reachability sets for transitive closure and reduction.

use super::topology::Topology;
use rustc_hash::FxBuildHasher;

type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

/// For each vertex, the set of vertices reachable over one or more edges.
/// `order` must be a topological order of `t`.
pub(crate) fn reachability(t: &Topology, order: &[usize]) -> Vec<HashSet<usize>> {
    let mut reach: Vec<HashSet<usize>> = vec![HashSet::default(); t.len()];
    for &u in order.iter().rev() {
        let mut set: HashSet<usize> = HashSet::default();
        for &w in t.succ(u) {
            set.insert(w);
            set.extend(reach[w].iter().copied());
        }
        reach[u] = set;
    }
    reach
}

/// Closure edges `(u, w)`, grouped by `u` and sorted by `w` (storage order).
pub(crate) fn closure_edges(reach: &[HashSet<usize>]) -> Vec<(usize, usize)> {
    let mut out: Vec<(usize, usize)> = Vec::new();
    for (u, set) in reach.iter().enumerate() {
        let mut targets: Vec<usize> = set.iter().copied().collect();
        targets.sort_unstable();
        out.extend(targets.into_iter().map(|w| (u, w)));
    }
    out
}

/// Whether `u -> w` is implied by a longer path through another successor of `u`.
pub(crate) fn is_redundant(t: &Topology, reach: &[HashSet<usize>], u: usize, w: usize) -> bool {
    t.succ(u).iter().any(|&s| s != w && reach[s].contains(&w))
}
