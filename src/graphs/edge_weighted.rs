/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use log::warn;

use crate::bitsets::BitSet;

use super::{UGraph, Weight};

/// Which weights a bulk transformation touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeightScope {
    Vertex,
    Edge,
    Both,
}

/// An undirected graph with an `n × n` weight matrix.
///
/// Convention: `we[v][v]` holds the weight of vertex `v`, `we[u][v]` the
/// weight of edge `{u, v}`, and non-edges hold the `NO_WEIGHT` sentinel.
/// The matrix is kept symmetric.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeWeightedGraph<B: BitSet, W: Weight = f64> {
    graph: UGraph<B>,
    we: Vec<Vec<W>>,
}

impl<B: BitSet, W: Weight> EdgeWeightedGraph<B, W> {
    /// Creates a graph with `n` vertices, no edges, vertex weights `val`
    /// and every off-diagonal entry `NO_WEIGHT`.
    pub fn with_weight(n: usize, val: W) -> Self {
        let mut we = vec![vec![W::NO_WEIGHT; n]; n];
        for (v, row) in we.iter_mut().enumerate() {
            row[v] = val;
        }
        Self {
            graph: UGraph::empty(n),
            we,
        }
    }

    /// Creates a graph with `n` vertices, no edges and default vertex
    /// weights.
    pub fn empty(n: usize) -> Self {
        Self::with_weight(n, W::DEFAULT)
    }

    /// Wraps an existing graph: default vertex weights, default weight on
    /// every edge, `NO_WEIGHT` elsewhere.
    pub fn from_graph(graph: UGraph<B>) -> Self {
        let n = graph.num_vertices();
        let mut we = vec![vec![W::NO_WEIGHT; n]; n];
        for (v, row) in we.iter_mut().enumerate() {
            row[v] = W::DEFAULT;
            for u in graph.neighbors(v).ones() {
                row[u] = W::DEFAULT;
            }
        }
        Self { graph, we }
    }

    /// Discards edges and weights, re-dimensioning to `n` vertices.
    pub fn reset(&mut self, n: usize, val: W) {
        self.graph.reset(n);
        self.we = vec![vec![W::NO_WEIGHT; n]; n];
        for (v, row) in self.we.iter_mut().enumerate() {
            row[v] = val;
        }
    }

    pub fn graph(&self) -> &UGraph<B> {
        &self.graph
    }

    #[inline(always)]
    pub fn num_vertices(&self) -> usize {
        self.graph.num_vertices()
    }

    pub fn num_edges(&self) -> u64 {
        self.graph.num_edges()
    }

    pub fn is_edge(&self, u: usize, v: usize) -> bool {
        self.graph.is_edge(u, v)
    }

    pub fn degree(&self, v: usize) -> usize {
        self.graph.degree(v)
    }

    pub fn neighbors(&self, v: usize) -> &B {
        self.graph.neighbors(v)
    }

    /// Adds the edge `{u, v}` with weight `val`.
    pub fn add_edge(&mut self, u: usize, v: usize, val: W) {
        self.graph.add_edge(u, v);
        if self.graph.is_edge(u, v) {
            self.we[u][v] = val;
            self.we[v][u] = val;
        }
    }

    #[inline(always)]
    pub fn vertex_weight(&self, v: usize) -> W {
        self.we[v][v]
    }

    pub fn set_vertex_weight(&mut self, v: usize, val: W) {
        self.we[v][v] = val;
    }

    #[inline(always)]
    pub fn edge_weight(&self, u: usize, v: usize) -> W {
        self.we[u][v]
    }

    /// Sets the weight of the edge `{u, v}` symmetrically.
    ///
    /// On a non-edge only `NO_WEIGHT` can be stored; any other value is
    /// refused with a warning.
    pub fn set_edge_weight(&mut self, u: usize, v: usize, val: W) {
        if u != v && !self.graph.is_edge(u, v) && val != W::NO_WEIGHT {
            warn!("attempt to set weight {val} on the non-edge ({u}, {v}), ignored");
            return;
        }
        self.we[u][v] = val;
        if u != v {
            self.we[v][u] = val;
        }
    }

    /// The full weight matrix.
    pub fn weights(&self) -> &Vec<Vec<W>> {
        &self.we
    }

    /// Assigns the modulus edge weights `we(u, v) = ((u + v + 2) mod m) + 1`
    /// on edges (Pullan 2008) and `NO_WEIGHT` on non-edges.
    pub fn set_modulus_edge_weight(&mut self, m: usize) {
        debug_assert!(m > 0);
        let n = self.num_vertices();
        for u in 0..n {
            for v in 0..n {
                if self.graph.is_edge(u, v) {
                    self.we[u][v] = W::from_index((u + v + 2) % m + 1);
                } else if u != v {
                    self.we[u][v] = W::NO_WEIGHT;
                }
            }
        }
    }

    /// Turns the wrapper into a pure edge-weighted graph: every vertex
    /// weight becomes `NO_WEIGHT`; with `erase_non_edges` the off-diagonal
    /// non-edge entries are cleared too.
    pub fn make_edge_weighted(&mut self, erase_non_edges: bool) {
        let n = self.num_vertices();
        for v in 0..n {
            self.we[v][v] = W::NO_WEIGHT;
        }
        if erase_non_edges {
            self.erase_non_edge_weights();
        }
    }

    /// Sets every off-diagonal non-edge entry to `NO_WEIGHT`.
    pub fn erase_non_edge_weights(&mut self) {
        let n = self.num_vertices();
        for u in 0..n {
            for v in 0..n {
                if u != v && !self.graph.is_edge(u, v) {
                    self.we[u][v] = W::NO_WEIGHT;
                }
            }
        }
    }

    /// Applies `f` to the weights selected by `scope`, skipping
    /// `NO_WEIGHT` entries.
    pub fn transform_weights(&mut self, f: impl Fn(W) -> W, scope: WeightScope) {
        let n = self.num_vertices();
        for u in 0..n {
            for v in 0..n {
                let selected = match scope {
                    WeightScope::Vertex => u == v,
                    WeightScope::Edge => u != v,
                    WeightScope::Both => true,
                };
                if selected && self.we[u][v] != W::NO_WEIGHT {
                    self.we[u][v] = f(self.we[u][v]);
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bitsets::DenseBitSet;

    fn path_graph() -> EdgeWeightedGraph<DenseBitSet, i32> {
        // 0 - 1 - 2 - 3 - 4
        let mut ewg = EdgeWeightedGraph::empty(5);
        for v in 0..4 {
            ewg.add_edge(v, v + 1, 1);
        }
        ewg
    }

    #[test]
    fn test_modulus_edge_weights() {
        let mut ewg = path_graph();
        ewg.set_modulus_edge_weight(200);
        assert_eq!(ewg.edge_weight(0, 1), 4);
        assert_eq!(ewg.edge_weight(1, 2), 6);
        assert_eq!(ewg.edge_weight(3, 4), 10);
        assert_eq!(ewg.edge_weight(0, 2), -1);
        // symmetric
        assert_eq!(ewg.edge_weight(1, 0), 4);
    }

    #[test]
    fn test_non_edge_weight_refused() {
        let mut ewg = path_graph();
        ewg.set_edge_weight(0, 4, 9);
        assert_eq!(ewg.edge_weight(0, 4), -1);
        ewg.set_edge_weight(0, 1, 9);
        assert_eq!(ewg.edge_weight(1, 0), 9);
    }

    #[test]
    fn test_make_edge_weighted() {
        let mut ewg = path_graph();
        assert_eq!(ewg.vertex_weight(2), 1);
        ewg.make_edge_weighted(true);
        assert!((0..5).all(|v| ewg.vertex_weight(v) == -1));
        assert_eq!(ewg.edge_weight(1, 2), 1);
    }

    #[test]
    fn test_transform_scope() {
        let mut ewg = path_graph();
        ewg.transform_weights(|w| w * 3, WeightScope::Edge);
        assert_eq!(ewg.edge_weight(0, 1), 3);
        assert_eq!(ewg.vertex_weight(0), 1);
        ewg.transform_weights(|w| w + 1, WeightScope::Both);
        assert_eq!(ewg.edge_weight(0, 1), 4);
        assert_eq!(ewg.vertex_weight(0), 2);
        // non-edges stay at the sentinel
        assert_eq!(ewg.edge_weight(0, 2), -1);
    }
}
