//! Breadth-first / depth-first discovery and topological ordering.

use super::topology::{Topology, Way};
use std::collections::VecDeque;

pub(crate) fn bfs_order(t: &Topology, start: usize, way: Way) -> Vec<usize> {
    let mut visited = vec![false; t.len()];
    let mut out: Vec<usize> = Vec::new();
    let mut q: VecDeque<usize> = VecDeque::new();
    visited[start] = true;
    q.push_back(start);
    while let Some(u) = q.pop_front() {
        out.push(u);
        for &w in t.neighbors(u, way) {
            if !visited[w] {
                visited[w] = true;
                q.push_back(w);
            }
        }
    }
    out
}

/// Discovery (pre-)order of a depth-first search; same order as the recursive walk.
pub(crate) fn dfs_order(t: &Topology, start: usize, way: Way) -> Vec<usize> {
    let mut visited = vec![false; t.len()];
    let mut out: Vec<usize> = vec![start];
    let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
    visited[start] = true;
    while let Some(top) = stack.last_mut() {
        let (u, next) = *top;
        let adj = t.neighbors(u, way);
        if next < adj.len() {
            top.1 += 1;
            let w = adj[next];
            if !visited[w] {
                visited[w] = true;
                out.push(w);
                stack.push((w, 0));
            }
        } else {
            stack.pop();
        }
    }
    out
}

/// Depth-first finishing order of the vertices reachable from `start`.
pub(crate) fn dfs_postorder(t: &Topology, start: usize, way: Way) -> Vec<usize> {
    let mut visited = vec![false; t.len()];
    let mut out: Vec<usize> = Vec::new();
    let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
    visited[start] = true;
    while let Some(top) = stack.last_mut() {
        let (u, next) = *top;
        let adj = t.neighbors(u, way);
        if next < adj.len() {
            top.1 += 1;
            let w = adj[next];
            if !visited[w] {
                visited[w] = true;
                stack.push((w, 0));
            }
        } else {
            out.push(u);
            stack.pop();
        }
    }
    out
}

/// Kahn's algorithm, seeded in storage order. `None` if the graph has a cycle.
pub(crate) fn topological_order(t: &Topology) -> Option<Vec<usize>> {
    let n = t.len();
    let mut indegree: Vec<usize> = (0..n).map(|u| t.neighbors(u, Way::Reverse).len()).collect();
    let mut q: VecDeque<usize> = (0..n).filter(|&u| indegree[u] == 0).collect();
    let mut out: Vec<usize> = Vec::with_capacity(n);
    while let Some(u) = q.pop_front() {
        out.push(u);
        for &w in t.succ(u) {
            indegree[w] -= 1;
            if indegree[w] == 0 {
                q.push_back(w);
            }
        }
    }
    (out.len() == n).then_some(out)
}

/// Topological order of the vertices reachable from `source` when walking `way`.
/// `None` if a cycle is reachable.
pub(crate) fn reachable_topological_order(
    t: &Topology,
    source: usize,
    way: Way,
) -> Option<Vec<usize>> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Color {
        White,
        Gray,
        Black,
    }

    let mut color = vec![Color::White; t.len()];
    let mut finished: Vec<usize> = Vec::new();
    let mut stack: Vec<(usize, usize)> = vec![(source, 0)];
    color[source] = Color::Gray;
    while let Some(top) = stack.last_mut() {
        let (u, next) = *top;
        let adj = t.neighbors(u, way);
        if next < adj.len() {
            top.1 += 1;
            let w = adj[next];
            match color[w] {
                Color::White => {
                    color[w] = Color::Gray;
                    stack.push((w, 0));
                }
                // Back edge.
                Color::Gray => return None,
                Color::Black => {}
            }
        } else {
            color[u] = Color::Black;
            finished.push(u);
            stack.pop();
        }
    }
    finished.reverse();
    Some(finished)
}
