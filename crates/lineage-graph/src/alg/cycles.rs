//! Strongly connected components and weak connectivity.

use super::topology::{Topology, Way};
use std::collections::VecDeque;

/// Weakly connected components in storage order of their first vertex.
pub(crate) fn components(t: &Topology) -> Vec<Vec<usize>> {
    let mut seen = vec![false; t.len()];
    let mut out: Vec<Vec<usize>> = Vec::new();

    for start in 0..t.len() {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        let mut comp: Vec<usize> = Vec::new();
        let mut q: VecDeque<usize> = VecDeque::new();
        q.push_back(start);
        while let Some(v) = q.pop_front() {
            comp.push(v);
            for way in [Way::Forward, Way::Reverse] {
                for &n in t.neighbors(v, way) {
                    if !seen[n] {
                        seen[n] = true;
                        q.push_back(n);
                    }
                }
            }
        }
        out.push(comp);
    }

    out
}

/// Strongly connected components (Tarjan). Reports SCCs with size > 1, or self-loops,
/// each sorted in storage order, ordered by their first vertex.
pub(crate) fn find_cycles(t: &Topology) -> Vec<Vec<usize>> {
    struct Tarjan<'a> {
        t: &'a Topology,
        index: usize,
        stack: Vec<usize>,
        on_stack: Vec<bool>,
        indices: Vec<Option<usize>>,
        lowlink: Vec<usize>,
        sccs: Vec<Vec<usize>>,
    }

    impl Tarjan<'_> {
        fn visit(&mut self, v: usize) {
            self.indices[v] = Some(self.index);
            self.lowlink[v] = self.index;
            self.index += 1;
            self.stack.push(v);
            self.on_stack[v] = true;
        }

        /// Iterative walk from `root`; each frame is `(vertex, next successor slot)`.
        fn strongconnect(&mut self, root: usize) {
            let t = self.t;
            let mut frames: Vec<(usize, usize)> = vec![(root, 0)];
            self.visit(root);

            while let Some(top) = frames.last_mut() {
                let (v, next) = *top;
                let succ = t.succ(v);
                if next < succ.len() {
                    top.1 += 1;
                    let w = succ[next];
                    match self.indices[w] {
                        None => {
                            self.visit(w);
                            frames.push((w, 0));
                        }
                        Some(w_idx) if self.on_stack[w] => {
                            self.lowlink[v] = self.lowlink[v].min(w_idx);
                        }
                        Some(_) => {}
                    }
                    continue;
                }

                frames.pop();
                if let Some(&(parent, _)) = frames.last() {
                    self.lowlink[parent] = self.lowlink[parent].min(self.lowlink[v]);
                }
                if Some(self.lowlink[v]) == self.indices[v] {
                    self.pop_component(v);
                }
            }
        }

        fn pop_component(&mut self, v: usize) {
            let mut scc: Vec<usize> = Vec::new();
            while let Some(w) = self.stack.pop() {
                self.on_stack[w] = false;
                scc.push(w);
                if w == v {
                    break;
                }
            }
            self.sccs.push(scc);
        }
    }

    let n = t.len();
    let mut tarjan = Tarjan {
        t,
        index: 0,
        stack: Vec::new(),
        on_stack: vec![false; n],
        indices: vec![None; n],
        lowlink: vec![0; n],
        sccs: Vec::new(),
    };

    for v in 0..n {
        if tarjan.indices[v].is_none() {
            tarjan.strongconnect(v);
        }
    }

    let mut cycles: Vec<Vec<usize>> = Vec::new();
    for mut scc in tarjan.sccs {
        if scc.len() > 1 {
            scc.sort_unstable();
            cycles.push(scc);
        } else if t.succ(scc[0]).contains(&scc[0]) {
            cycles.push(scc);
        }
    }

    cycles.sort_by(|a, b| a.first().cmp(&b.first()));
    cycles
}
