/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::bitsets::BitSet;

use super::Graph;

/// An undirected simple graph.
///
/// # Implementation Notes
///
/// This is a newtype over [`Graph`] maintaining the symmetry invariant
/// `adj[u].contains(v) ⇔ adj[v].contains(u)`. The edge count registers
/// each undirected edge once; recounting sums the per-vertex degrees and
/// halves the result, and a non-even sum is a data-model violation that
/// panics with a diagnostic.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct UGraph<B: BitSet>(Graph<B>);

impl<B: BitSet> UGraph<B> {
    /// Creates a graph with `n` vertices and no edges.
    pub fn empty(n: usize) -> Self {
        Self(Graph::empty(n))
    }

    /// Discards all edges and re-dimensions the graph to `n` vertices.
    pub fn reset(&mut self, n: usize) {
        self.0.reset(n);
    }

    /// The triangle `K₃`.
    pub fn make_triangle() -> Self {
        let mut tri = Self::empty(3);
        tri.add_edge(0, 1);
        tri.add_edge(0, 2);
        tri.add_edge(1, 2);
        tri
    }

    /// The complete graph on `n` vertices.
    pub fn make_clique(n: usize) -> Self {
        let mut clique = Self::empty(n);
        for u in 0..n {
            for v in u + 1..n {
                clique.add_edge(u, v);
            }
        }
        clique
    }

    /// The cycle `C_n`, `n ≥ 3`.
    pub fn make_cycle(n: usize) -> Self {
        let mut cycle = Self::empty(n);
        for v in 0..n - 1 {
            cycle.add_edge(v, v + 1);
        }
        cycle.add_edge(n - 1, 0);
        cycle
    }

    /// The star with center `0` and leaves `1..n`.
    pub fn make_star(n: usize) -> Self {
        let mut star = Self::empty(n);
        for v in 1..n {
            star.add_edge(0, v);
        }
        star
    }

    #[inline(always)]
    pub fn num_vertices(&self) -> usize {
        self.0.num_vertices()
    }

    /// Number of undirected edges. Recounts lazily when the cache is
    /// unknown.
    ///
    /// # Panics
    ///
    /// If the sum of degrees is odd: the adjacency lost its symmetry,
    /// which is a programming error.
    pub fn num_edges(&self) -> u64 {
        if self.0.edge_cache().get() == 0 {
            let sum: u64 = (0..self.num_vertices())
                .map(|v| self.degree(v) as u64)
                .sum();
            if sum % 2 != 0 {
                panic!("odd number of edge endpoints ({sum}) in an undirected graph: the adjacency matrix is no longer symmetric");
            }
            self.0.edge_cache().set(sum / 2);
        }
        self.0.edge_cache().get()
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.0.set_name(name);
    }

    pub fn path(&self) -> &str {
        self.0.path()
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.0.set_path(path);
    }

    #[inline(always)]
    pub fn is_edge(&self, u: usize, v: usize) -> bool {
        self.0.is_edge(u, v)
    }

    /// The neighbors of `v` as a bitset.
    #[inline(always)]
    pub fn neighbors(&self, v: usize) -> &B {
        self.0.neighbors(v)
    }

    /// Adds the undirected edge `{u, v}`, setting both adjacency bits and
    /// counting one edge. Self-loops are silently rejected.
    pub fn add_edge(&mut self, u: usize, v: usize) {
        debug_assert!(u < self.num_vertices() && v < self.num_vertices());
        if u != v && !self.0.is_edge(u, v) {
            let cache = self.0.edge_cache().get();
            self.0.neighbors_mut(u).insert(v);
            self.0.neighbors_mut(v).insert(u);
            self.0.edge_cache().set(cache + 1);
        }
    }

    /// Removes the undirected edge `{u, v}` if present.
    pub fn remove_edge(&mut self, u: usize, v: usize) {
        debug_assert!(u < self.num_vertices() && v < self.num_vertices());
        if u != v && self.0.is_edge(u, v) {
            let cache = self.0.edge_cache().get();
            self.0.neighbors_mut(u).remove(v);
            self.0.neighbors_mut(v).remove(u);
            self.0.edge_cache().set(cache.saturating_sub(1));
        }
    }

    /// Removes every edge of the graph.
    pub fn remove_all_edges(&mut self) {
        self.0.remove_all_edges();
    }

    /// Removes every edge incident to `v`.
    pub fn remove_all_edges_from(&mut self, v: usize) {
        self.0.remove_all_edges_from(v);
    }

    #[inline(always)]
    pub fn degree(&self, v: usize) -> usize {
        self.0.degree(v)
    }

    /// Number of neighbors of `v` inside the vertex set `others`.
    #[inline]
    pub fn degree_in(&self, v: usize, others: &B) -> usize {
        self.0.degree_in(v, others)
    }

    /// Number of neighbors of `v` inside `others`, truncated at `ub`.
    #[inline]
    pub fn degree_in_truncated(&self, v: usize, others: &B, ub: usize) -> usize {
        self.0.degree_in_truncated(v, others, ub)
    }

    /// Number of neighbors of `v` with index greater than `v`.
    pub fn degree_up(&self, v: usize) -> usize {
        if v + 1 >= self.num_vertices() {
            return 0;
        }
        self.neighbors(v).count_in_range(v + 1, self.num_vertices() - 1)
    }

    /// Maximum degree over all vertices.
    pub fn max_graph_degree(&self) -> usize {
        self.0.max_graph_degree()
    }

    /// Maximum degree inside the subgraph induced by `sg`:
    /// `max over v ∈ sg of |N(v) ∩ sg|`.
    pub fn max_subgraph_degree(&self, sg: &B) -> usize {
        sg.ones().map(|v| self.degree_in(v, sg)).max().unwrap_or(0)
    }

    /// Number of edges with exactly one endpoint inside `sg`.
    pub fn outgoing_degree(&self, sg: &B) -> usize {
        sg.ones()
            .map(|v| self.degree(v) - self.degree_in(v, sg))
            .sum()
    }

    /// Number of edges of the subgraph induced by `sg`.
    pub fn num_edges_in_subgraph(&self, sg: &B) -> u64 {
        let sum: u64 = sg.ones().map(|v| self.degree_in(v, sg) as u64).sum();
        sum / 2
    }

    /// Edge density, `2 |E| / (|V| · (|V| − 1))`.
    pub fn density(&self) -> f64 {
        let max_edges = self.num_vertices() as u64 * (self.num_vertices() as u64).saturating_sub(1);
        if max_edges == 0 {
            return 0.0;
        }
        2.0 * self.num_edges() as f64 / max_edges as f64
    }

    /// The subgraph induced by `vertices`, renumbered to
    /// `0..vertices.len()` in list order.
    pub fn create_subgraph(&self, vertices: &[usize]) -> Self {
        let n = vertices.len();
        let mut sub = Self::empty(n);
        sub.set_name(self.name());
        sub.set_path(self.path());
        for i in 0..n {
            for j in i + 1..n {
                if self.is_edge(vertices[i], vertices[j]) {
                    sub.add_edge(i, j);
                }
            }
        }
        sub
    }

    /// The subgraph induced by the neighborhood of `v`.
    pub fn create_neighborhood_subgraph(&self, v: usize) -> Self {
        self.create_subgraph(&self.neighbors(v).to_vec())
    }

    /// The complement graph.
    pub fn create_complement(&self) -> Self {
        let n = self.num_vertices();
        let mut co = Self::empty(n);
        co.set_name(self.name());
        co.set_path(self.path());
        for u in 0..n {
            for v in u + 1..n {
                if !self.is_edge(u, v) {
                    co.add_edge(u, v);
                }
            }
        }
        co
    }

    /// Iterates over the edges `{u, v}` with `u < v`, in ascending order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.num_vertices()).flat_map(move |u| {
            self.neighbors(u)
                .ones()
                .skip_while(move |&v| v <= u)
                .map(move |v| (u, v))
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bitsets::{DenseBitSet, SparseBitSet};

    #[test]
    fn test_symmetry() {
        let mut g: UGraph<DenseBitSet> = UGraph::empty(5);
        g.add_edge(0, 3);
        g.add_edge(3, 0); // same edge
        assert!(g.is_edge(0, 3) && g.is_edge(3, 0));
        assert_eq!(g.num_edges(), 1);
        g.remove_edge(3, 0);
        assert_eq!(g.num_edges(), 0);
        assert!(!g.is_edge(0, 3));
    }

    #[test]
    fn test_builders() {
        let tri: UGraph<DenseBitSet> = UGraph::make_triangle();
        assert_eq!(tri.num_edges(), 3);
        assert!((0..3).all(|v| tri.degree(v) == 2));

        let k5: UGraph<DenseBitSet> = UGraph::make_clique(5);
        assert_eq!(k5.num_edges(), 10);

        let c6: UGraph<SparseBitSet> = UGraph::make_cycle(6);
        assert_eq!(c6.num_edges(), 6);
        assert!((0..6).all(|v| c6.degree(v) == 2));

        let star: UGraph<SparseBitSet> = UGraph::make_star(7);
        assert_eq!(star.num_edges(), 6);
        assert_eq!(star.degree(0), 6);
        assert_eq!(star.degree_up(0), 6);
        assert_eq!(star.degree_up(3), 0);
    }

    #[test]
    fn test_complement_union_is_complete() {
        let mut g: UGraph<DenseBitSet> = UGraph::empty(6);
        g.add_edge(0, 1);
        g.add_edge(2, 4);
        g.add_edge(3, 5);
        let co = g.create_complement();
        assert_eq!(g.num_edges() + co.num_edges(), 6 * 5 / 2);

        let mut all = co.clone();
        for (u, v) in g.edges() {
            all.add_edge(u, v);
        }
        assert_eq!(all, UGraph::make_clique(6));
    }

    #[test]
    fn test_subgraph_degrees() {
        let g: UGraph<DenseBitSet> = UGraph::make_clique(6);
        let sg = DenseBitSet::from_bits(6, [0, 2, 4]);
        assert_eq!(g.max_subgraph_degree(&sg), 2);
        assert_eq!(g.outgoing_degree(&sg), 9);
        assert_eq!(g.num_edges_in_subgraph(&sg), 3);

        let sub = g.create_subgraph(&[0, 2, 4]);
        assert_eq!(sub.num_edges(), 3);
    }

    #[test]
    fn test_edges_iterator() {
        let mut g: UGraph<DenseBitSet> = UGraph::empty(4);
        g.add_edge(2, 1);
        g.add_edge(0, 3);
        g.add_edge(0, 1);
        let edges: Vec<_> = g.edges().collect();
        assert_eq!(edges, vec![(0, 1), (0, 3), (1, 2)]);
    }

    #[test]
    #[should_panic(expected = "odd number of edge endpoints")]
    fn test_odd_degree_sum_panics() {
        let mut g: UGraph<DenseBitSet> = UGraph::empty(3);
        g.add_edge(0, 1);
        // break the symmetry behind the refinement's back
        g.0.neighbors_mut(2).insert(0);
        g.num_edges();
    }
}
