//! Dominator tree (Cooper, Harvey & Kennedy, "A Simple, Fast Dominance Algorithm").
//!
//! Iterates the data-flow equations over reverse postorder until the immediate dominators
//! settle. Works on cyclic graphs as well.

use super::search::dfs_postorder;
use super::topology::{Topology, Way};

const UNDEFINED: usize = usize::MAX;

/// Immediate dominator of every vertex reachable from `root` (walking `way`).
/// The root maps to itself; unreachable vertices map to `None`.
pub(crate) fn immediate_dominators(t: &Topology, root: usize, way: Way) -> Vec<Option<usize>> {
    let n = t.len();
    let postorder = dfs_postorder(t, root, way);
    let mut rpo_index: Vec<usize> = vec![UNDEFINED; n];
    for (i, &u) in postorder.iter().rev().enumerate() {
        rpo_index[u] = i;
    }

    let mut idom: Vec<usize> = vec![UNDEFINED; n];
    idom[root] = root;

    let mut changed = true;
    while changed {
        changed = false;
        for &b in postorder.iter().rev().skip(1) {
            let mut new_idom = UNDEFINED;
            for &p in t.neighbors(b, way.flip()) {
                if idom[p] == UNDEFINED {
                    continue;
                }
                new_idom = if new_idom == UNDEFINED {
                    p
                } else {
                    intersect(&idom, &rpo_index, p, new_idom)
                };
            }
            if new_idom != UNDEFINED && idom[b] != new_idom {
                idom[b] = new_idom;
                changed = true;
            }
        }
    }

    idom.into_iter()
        .map(|d| (d != UNDEFINED).then_some(d))
        .collect()
}

fn intersect(idom: &[usize], rpo_index: &[usize], mut a: usize, mut b: usize) -> usize {
    while a != b {
        while rpo_index[a] > rpo_index[b] {
            a = idom[a];
        }
        while rpo_index[b] > rpo_index[a] {
            b = idom[b];
        }
    }
    a
}

/// `v` and every vertex below it in the dominator tree, as a membership mask.
pub(crate) fn dominated_subtree(idom: &[Option<usize>], v: usize) -> Vec<bool> {
    let n = idom.len();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (u, d) in idom.iter().enumerate() {
        if let Some(d) = *d {
            if d != u {
                children[d].push(u);
            }
        }
    }

    let mut in_tree = vec![false; n];
    let mut stack: Vec<usize> = vec![v];
    in_tree[v] = true;
    while let Some(u) = stack.pop() {
        for &c in &children[u] {
            if !in_tree[c] {
                in_tree[c] = true;
                stack.push(c);
            }
        }
    }
    in_tree
}
