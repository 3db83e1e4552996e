/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::cell::Cell;

use crate::bitsets::BitSet;

/// A directed simple graph whose adjacency is a vector of bitsets indexed
/// by vertex.
///
/// The vertex count is fixed at construction (or [`reset`](Graph::reset));
/// there is no dynamic vertex insertion. Edge `(u, v)` exists iff bit `v`
/// is set in the adjacency bitset of `u`. The edge count is a lazy cache:
/// zero means "unknown, recount on demand", so bulk mutation through
/// [`neighbors_mut`](Graph::neighbors_mut) simply invalidates it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug)]
pub struct Graph<B: BitSet> {
    num_vertices: usize,
    num_edges: Cell<u64>,
    adj: Vec<B>,
    name: String,
    path: String,
}

impl<B: BitSet> PartialEq for Graph<B> {
    fn eq(&self, other: &Self) -> bool {
        self.num_vertices == other.num_vertices && self.adj == other.adj
    }
}

impl<B: BitSet> Graph<B> {
    /// Creates a graph with `n` vertices and no edges.
    pub fn empty(n: usize) -> Self {
        Self {
            num_vertices: n,
            num_edges: Cell::new(0),
            adj: (0..n).map(|_| B::empty(n)).collect(),
            name: String::new(),
            path: String::new(),
        }
    }

    /// Discards all edges and re-dimensions the graph to `n` vertices.
    /// Name and path are kept.
    pub fn reset(&mut self, n: usize) {
        self.num_vertices = n;
        self.num_edges.set(0);
        self.adj = (0..n).map(|_| B::empty(n)).collect();
    }

    #[inline(always)]
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Number of arcs. Recounts and caches when the cache is unknown.
    pub fn num_edges(&self) -> u64 {
        if self.num_edges.get() == 0 {
            let count = self.adj.iter().map(|bb| bb.count() as u64).sum();
            self.num_edges.set(count);
        }
        self.num_edges.get()
    }

    #[inline(always)]
    pub(crate) fn edge_cache(&self) -> &Cell<u64> {
        &self.num_edges
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    #[inline(always)]
    pub fn is_edge(&self, u: usize, v: usize) -> bool {
        self.adj[u].contains(v)
    }

    /// The neighbors of `v` as a bitset.
    #[inline(always)]
    pub fn neighbors(&self, v: usize) -> &B {
        &self.adj[v]
    }

    /// Mutable access to the adjacency row of `v`.
    ///
    /// Invalidates the edge-count cache; the caller is responsible for
    /// keeping the graph simple (bit `v` of row `v` must stay zero).
    pub fn neighbors_mut(&mut self, v: usize) -> &mut B {
        self.num_edges.set(0);
        &mut self.adj[v]
    }

    /// Adds the arc `(u, v)`. Self-loops are silently rejected; adding an
    /// existing arc is a no-op.
    pub fn add_edge(&mut self, u: usize, v: usize) {
        debug_assert!(u < self.num_vertices && v < self.num_vertices);
        if u != v && !self.adj[u].contains(v) {
            self.adj[u].insert(v);
            self.num_edges.set(self.num_edges.get() + 1);
        }
    }

    /// Removes the arc `(u, v)` if present.
    pub fn remove_edge(&mut self, u: usize, v: usize) {
        debug_assert!(u < self.num_vertices && v < self.num_vertices);
        if u != v && self.adj[u].contains(v) {
            self.adj[u].remove(v);
            self.num_edges.set(self.num_edges.get().saturating_sub(1));
        }
    }

    /// Removes every arc of the graph.
    pub fn remove_all_edges(&mut self) {
        for bb in &mut self.adj {
            bb.clear();
        }
        self.num_edges.set(0);
    }

    /// Removes every arc leaving or entering `v`.
    pub fn remove_all_edges_from(&mut self, v: usize) {
        self.adj[v].clear();
        for bb in &mut self.adj {
            bb.remove(v);
        }
        self.num_edges.set(0);
    }

    /// Out-degree of `v`.
    #[inline(always)]
    pub fn degree(&self, v: usize) -> usize {
        self.adj[v].count()
    }

    /// Number of neighbors of `v` inside the vertex set `others`.
    pub fn degree_in(&self, v: usize, others: &B) -> usize {
        let mut nb = self.adj[v].clone();
        nb.intersect_with(others);
        nb.count()
    }

    /// Number of neighbors of `v` inside `others`, truncated at `ub`.
    pub fn degree_in_truncated(&self, v: usize, others: &B, ub: usize) -> usize {
        let mut count = 0;
        for u in self.adj[v].ones() {
            if others.contains(u) {
                count += 1;
                if count >= ub {
                    return ub;
                }
            }
        }
        count
    }

    /// Maximum out-degree over all vertices.
    pub fn max_graph_degree(&self) -> usize {
        (0..self.num_vertices)
            .map(|v| self.degree(v))
            .max()
            .unwrap_or(0)
    }

    /// Arc density, `|E| / (|V| · (|V| − 1))`.
    pub fn density(&self) -> f64 {
        let max_edges = self.num_vertices as u64 * (self.num_vertices as u64).saturating_sub(1);
        if max_edges == 0 {
            return 0.0;
        }
        self.num_edges() as f64 / max_edges as f64
    }

    /// The subgraph induced by `vertices`, renumbered to `0..vertices.len()`
    /// in list order.
    pub fn create_subgraph(&self, vertices: &[usize]) -> Self {
        let n = vertices.len();
        let mut sub = Self::empty(n);
        sub.name = self.name.clone();
        sub.path = self.path.clone();
        for (i, &u) in vertices.iter().enumerate() {
            for (j, &v) in vertices.iter().enumerate() {
                if i != j && self.is_edge(u, v) {
                    sub.add_edge(i, j);
                }
            }
        }
        sub
    }

    /// The complement graph: arc `(u, v)` present iff absent here, `u ≠ v`.
    pub fn create_complement(&self) -> Self {
        let mut co = Self::empty(self.num_vertices);
        co.name = self.name.clone();
        co.path = self.path.clone();
        for u in 0..self.num_vertices {
            for v in 0..self.num_vertices {
                if u != v && !self.is_edge(u, v) {
                    co.add_edge(u, v);
                }
            }
        }
        co
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bitsets::DenseBitSet;

    #[test]
    fn test_directed_edges() {
        let mut g: Graph<DenseBitSet> = Graph::empty(4);
        g.add_edge(0, 1);
        g.add_edge(1, 0);
        g.add_edge(2, 3);
        g.add_edge(2, 2); // self-loop, silently rejected
        g.add_edge(0, 1); // duplicate, no-op

        assert!(g.is_edge(0, 1) && g.is_edge(1, 0));
        assert!(!g.is_edge(3, 2));
        assert!(!g.is_edge(2, 2));
        assert_eq!(g.num_edges(), 3);
        assert_eq!(g.degree(2), 1);

        g.remove_edge(1, 0);
        assert_eq!(g.num_edges(), 2);
        assert!(!g.is_edge(1, 0));
    }

    #[test]
    fn test_lazy_edge_cache() {
        let mut g: Graph<DenseBitSet> = Graph::empty(3);
        g.add_edge(0, 1);
        assert_eq!(g.num_edges(), 1);
        g.neighbors_mut(0).insert(2);
        g.neighbors_mut(2).insert(0);
        assert_eq!(g.num_edges(), 3);
    }

    #[test]
    fn test_subgraph_and_complement() {
        let mut g: Graph<DenseBitSet> = Graph::empty(4);
        g.add_edge(0, 1);
        g.add_edge(1, 2);
        g.add_edge(2, 0);

        let sub = g.create_subgraph(&[0, 1]);
        assert_eq!(sub.num_vertices(), 2);
        assert_eq!(sub.num_edges(), 1);
        assert!(sub.is_edge(0, 1));

        let co = g.create_complement();
        assert_eq!(co.num_edges() + g.num_edges(), 4 * 3);
        for u in 0..4 {
            for v in 0..4 {
                if u != v {
                    assert_ne!(g.is_edge(u, v), co.is_edge(u, v));
                }
            }
        }
    }
}
