/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::cmp::Reverse;

use dsi_progress_logger::prelude::*;
use log::debug;

use crate::bitsets::BitSet;
use crate::graphs::{EdgeWeightedGraph, Graph, UGraph, Weight, WeightedGraph};

use super::decode::{invert_permutation, Decode};

/// The vertex-ordering strategies of [`Sorter::new_order`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortAlg {
    /// Trivial isomorphism: the identity permutation.
    None,
    /// Non-decreasing degree (stable).
    Min,
    /// Non-increasing degree (stable).
    Max,
    /// Non-decreasing degree, ties broken by support (stable).
    MinWithSupport,
    /// Non-increasing degree, ties broken by support (stable).
    MaxWithSupport,
    /// Degeneracy ordering extracting a minimum-degree vertex at each
    /// step.
    MinDegen,
    /// Degeneracy ordering extracting a maximum-degree vertex at each
    /// step.
    MaxDegen,
    /// [`MinDegen`](SortAlg::MinDegen) breaking ties in the order of a
    /// support-tiebroken baseline sort.
    MinDegenCompo,
    /// [`MaxDegen`](SortAlg::MaxDegen) breaking ties in the order of a
    /// support-tiebroken baseline sort.
    MaxDegenCompo,
}

/// Where the first extracted vertex lands in the new ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Natural order.
    FirstToLast,
    /// The ordering is reversed as a final step.
    LastToFirst,
}

/// Produces vertex permutations of an undirected graph by degree, support
/// and degeneracy criteria.
///
/// The orderings accumulate naturally in new → old form
/// (`nodes[new] = old`); `new_order` optionally inverts the result into
/// old → new form, which is what [`reorder`] consumes.
pub struct Sorter<'a, B: BitSet> {
    g: &'a UGraph<B>,
    num_vertices: usize,
    deg: Vec<usize>,
    support: Vec<usize>,
    nodes: Vec<usize>,
    active: B,
}

impl<'a, B: BitSet> Sorter<'a, B> {
    pub fn new(g: &'a UGraph<B>) -> Self {
        let n = g.num_vertices();
        Self {
            g,
            num_vertices: n,
            deg: vec![0; n],
            support: vec![0; n],
            nodes: Vec::with_capacity(n),
            active: B::empty(n),
        }
    }

    /// Degrees of all vertices, as last computed.
    pub fn degrees(&self) -> &[usize] {
        &self.deg
    }

    fn compute_deg(&mut self) {
        for v in 0..self.num_vertices {
            self.deg[v] = self.g.degree(v);
        }
    }

    /// Support of a vertex: sum of the degrees of its neighbors.
    fn compute_support(&mut self) {
        for v in 0..self.num_vertices {
            self.support[v] = self.g.neighbors(v).ones().map(|w| self.deg[w]).sum();
        }
    }

    fn fill_identity(&mut self) {
        self.nodes.clear();
        self.nodes.extend(0..self.num_vertices);
    }

    fn sort_non_decreasing_deg(&mut self) {
        self.fill_identity();
        let deg = &self.deg;
        self.nodes.sort_by_key(|&v| deg[v]);
    }

    fn sort_non_increasing_deg(&mut self) {
        self.fill_identity();
        let deg = &self.deg;
        self.nodes.sort_by_key(|&v| Reverse(deg[v]));
    }

    fn sort_non_decreasing_deg_with_support(&mut self) {
        self.fill_identity();
        let (deg, support) = (&self.deg, &self.support);
        self.nodes.sort_by_key(|&v| (deg[v], support[v]));
    }

    fn sort_non_increasing_deg_with_support(&mut self) {
        self.fill_identity();
        let (deg, support) = (&self.deg, &self.support);
        self.nodes.sort_by_key(|&v| Reverse((deg[v], support[v])));
    }

    /// One degeneracy extraction step: appends `v`, deactivates it and
    /// decrements the degree of its still-active neighbors.
    fn extract(&mut self, v: usize) {
        self.nodes.push(v);
        self.active.remove(v);
        for w in self.g.neighbors(v).ones() {
            if self.active.contains(w) {
                self.deg[w] -= 1;
            }
        }
    }

    /// Degeneracy ordering, minimum remaining degree first. Ties resolve
    /// to the lowest vertex index. Corrupts the degree array.
    fn sort_degen_non_decreasing_deg(&mut self) {
        self.active.insert_range(0, self.num_vertices - 1);
        self.nodes.clear();
        for _ in 0..self.num_vertices {
            let mut pick = usize::MAX;
            let mut min_deg = usize::MAX;
            for v in self.active.ones() {
                if self.deg[v] < min_deg {
                    min_deg = self.deg[v];
                    pick = v;
                }
            }
            self.extract(pick);
        }
    }

    /// Degeneracy ordering, maximum remaining degree first. Ties resolve
    /// to the lowest vertex index. Corrupts the degree array.
    fn sort_degen_non_increasing_deg(&mut self) {
        self.active.insert_range(0, self.num_vertices - 1);
        self.nodes.clear();
        for _ in 0..self.num_vertices {
            let mut pick = usize::MAX;
            let mut max_deg = None;
            for v in self.active.ones() {
                if max_deg.is_none() || self.deg[v] > max_deg.unwrap() {
                    max_deg = Some(self.deg[v]);
                    pick = v;
                }
            }
            self.extract(pick);
        }
    }

    /// Composite degeneracy ordering: equal-degree ties resolve to the
    /// vertex coming first in the baseline order currently in `nodes`.
    fn sort_degen_composite(&mut self, non_decreasing: bool) {
        debug_assert_eq!(self.nodes.len(), self.num_vertices);
        self.active.insert_range(0, self.num_vertices - 1);
        let base = core::mem::take(&mut self.nodes);
        for _ in 0..self.num_vertices {
            let mut pick = usize::MAX;
            let mut best: Option<usize> = None;
            for &u in &base {
                if !self.active.contains(u) {
                    continue;
                }
                let better = match best {
                    None => true,
                    Some(b) => {
                        if non_decreasing {
                            self.deg[u] < b
                        } else {
                            self.deg[u] > b
                        }
                    }
                };
                if better {
                    best = Some(self.deg[u]);
                    pick = u;
                }
            }
            self.extract(pick);
        }
    }

    /// One-shot ordering driver.
    ///
    /// Runs `alg`, reverses the result for
    /// [`LastToFirst`](Placement::LastToFirst) placement, and finally
    /// inverts it into old → new format when `o2n` is set.
    /// [`SortAlg::None`] returns the identity immediately, ignoring both
    /// flags.
    pub fn new_order(&mut self, alg: SortAlg, placement: Placement, o2n: bool) -> Vec<usize> {
        if self.num_vertices == 0 {
            return Vec::new();
        }
        if alg == SortAlg::None {
            debug!("trivial isomorphism requested, returning the identity");
            self.fill_identity();
            return self.nodes.clone();
        }

        match alg {
            SortAlg::None => unreachable!(),
            SortAlg::Min => {
                self.compute_deg();
                self.sort_non_decreasing_deg();
            }
            SortAlg::Max => {
                self.compute_deg();
                self.sort_non_increasing_deg();
            }
            SortAlg::MinWithSupport => {
                self.compute_deg();
                self.compute_support();
                self.sort_non_decreasing_deg_with_support();
            }
            SortAlg::MaxWithSupport => {
                self.compute_deg();
                self.compute_support();
                self.sort_non_increasing_deg_with_support();
            }
            SortAlg::MinDegen => {
                self.compute_deg();
                self.sort_degen_non_decreasing_deg();
            }
            SortAlg::MaxDegen => {
                self.compute_deg();
                self.sort_degen_non_increasing_deg();
            }
            SortAlg::MinDegenCompo => {
                self.compute_deg();
                self.compute_support();
                self.sort_non_decreasing_deg_with_support();
                self.sort_degen_composite(true);
            }
            SortAlg::MaxDegenCompo => {
                self.compute_deg();
                self.compute_support();
                self.sort_non_increasing_deg_with_support();
                self.sort_degen_composite(false);
            }
        }

        if placement == Placement::LastToFirst {
            self.nodes.reverse();
        }
        if o2n {
            invert_permutation(&self.nodes)
        } else {
            self.nodes.clone()
        }
    }

    /// Materializes the isomorphic graph under the old → new permutation
    /// `o2n`; see [`reorder`].
    pub fn reorder(&self, o2n: &[usize], decode: Option<&mut Decode>) -> UGraph<B> {
        reorder(self.g, o2n, decode)
    }
}

/// Builds the isomorphic copy of `g` under the old → new permutation
/// `o2n`: edge `{u, v}` becomes `{o2n[u], o2n[v]}`. Name and path are
/// copied. When `decode` is given, the new → old inverse of `o2n` is
/// pushed onto its stack so results on the new graph can be translated
/// back.
pub fn reorder<B: BitSet>(
    g: &UGraph<B>,
    o2n: &[usize],
    decode: Option<&mut Decode>,
) -> UGraph<B> {
    let n = g.num_vertices();
    debug_assert_eq!(o2n.len(), n);

    let mut out = UGraph::empty(n);
    out.set_name(g.name());
    out.set_path(g.path());

    let mut pl = ProgressLogger::default();
    pl.item_name("node").expected_updates(Some(n));
    pl.start("Reordering graph...");
    for u in 0..n {
        for v in u + 1..n {
            if g.is_edge(u, v) {
                out.add_edge(o2n[u], o2n[v]);
            }
        }
        pl.light_update();
    }
    pl.done();

    if let Some(decode) = decode {
        decode.add_ordering(invert_permutation(o2n));
    }
    out
}

/// [`reorder`] for directed graphs: probes the full adjacency matrix
/// instead of the upper triangle.
pub fn reorder_directed<B: BitSet>(
    g: &Graph<B>,
    o2n: &[usize],
    decode: Option<&mut Decode>,
) -> Graph<B> {
    let n = g.num_vertices();
    debug_assert_eq!(o2n.len(), n);

    let mut out = Graph::empty(n);
    out.set_name(g.name());
    out.set_path(g.path());
    for u in 0..n {
        for v in g.neighbors(u).ones() {
            out.add_edge(o2n[u], o2n[v]);
        }
    }
    if let Some(decode) = decode {
        decode.add_ordering(invert_permutation(o2n));
    }
    out
}

/// [`reorder`] for vertex-weighted graphs: weights migrate by
/// `out.w[o2n[v]] = w[v]`.
pub fn reorder_weighted<B: BitSet, W: Weight>(
    g: &WeightedGraph<B, W>,
    o2n: &[usize],
    decode: Option<&mut Decode>,
) -> WeightedGraph<B, W> {
    let mut out = WeightedGraph::from_graph(reorder(g.graph(), o2n, decode));
    for v in 0..g.num_vertices() {
        out.set_weight(o2n[v], g.weight(v));
    }
    out
}

/// [`reorder`] for edge-weighted graphs: the weight matrix migrates
/// symmetrically, diagonal included.
pub fn reorder_edge_weighted<B: BitSet, W: Weight>(
    g: &EdgeWeightedGraph<B, W>,
    o2n: &[usize],
    decode: Option<&mut Decode>,
) -> EdgeWeightedGraph<B, W> {
    let n = g.num_vertices();
    debug_assert_eq!(o2n.len(), n);

    let mut out = EdgeWeightedGraph::with_weight(n, W::NO_WEIGHT);
    for (u, v) in g.graph().edges() {
        out.add_edge(o2n[u], o2n[v], g.edge_weight(u, v));
    }
    for v in 0..n {
        out.set_vertex_weight(o2n[v], g.vertex_weight(v));
    }
    if let Some(decode) = decode {
        decode.add_ordering(invert_permutation(o2n));
    }
    out
}

/// Vertex-weight ordering strategies of [`WeightedSorter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeightAlg {
    /// Non-increasing vertex weight (stable).
    MaxWeight,
    /// Non-decreasing vertex weight (stable).
    MinWeight,
}

/// [`Sorter`] over a vertex-weighted graph, adding weight-based absolute
/// orderings.
pub struct WeightedSorter<'a, B: BitSet, W: Weight> {
    wg: &'a WeightedGraph<B, W>,
}

impl<'a, B: BitSet, W: Weight> WeightedSorter<'a, B, W> {
    pub fn new(wg: &'a WeightedGraph<B, W>) -> Self {
        Self { wg }
    }

    /// Runs a degree-based ordering of the wrapped graph.
    pub fn new_order(&self, alg: SortAlg, placement: Placement, o2n: bool) -> Vec<usize> {
        Sorter::new(self.wg.graph()).new_order(alg, placement, o2n)
    }

    /// Runs a vertex-weight ordering. Equal weights keep their index
    /// order (stable sort).
    pub fn new_weight_order(&self, alg: WeightAlg, placement: Placement, o2n: bool) -> Vec<usize> {
        let mut nodes: Vec<usize> = (0..self.wg.num_vertices()).collect();
        let wg = self.wg;
        match alg {
            WeightAlg::MinWeight => nodes.sort_by(|&a, &b| {
                wg.weight(a)
                    .partial_cmp(&wg.weight(b))
                    .unwrap_or(core::cmp::Ordering::Equal)
            }),
            WeightAlg::MaxWeight => nodes.sort_by(|&a, &b| {
                wg.weight(b)
                    .partial_cmp(&wg.weight(a))
                    .unwrap_or(core::cmp::Ordering::Equal)
            }),
        }
        if placement == Placement::LastToFirst {
            nodes.reverse();
        }
        if o2n {
            invert_permutation(&nodes)
        } else {
            nodes
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bitsets::DenseBitSet;
    use crate::graphs::DenseUGraph;

    /// K₄ minus the edge {1, 3}; degrees [3, 2, 3, 2].
    fn k4_minus_edge() -> DenseUGraph {
        let mut g = UGraph::empty(4);
        g.add_edge(0, 1);
        g.add_edge(0, 2);
        g.add_edge(0, 3);
        g.add_edge(1, 2);
        g.add_edge(2, 3);
        g
    }

    #[test]
    fn test_none_is_identity() {
        let g = k4_minus_edge();
        let mut sorter = Sorter::new(&g);
        assert_eq!(
            sorter.new_order(SortAlg::None, Placement::LastToFirst, true),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn test_absolute_orders() {
        let g = k4_minus_edge();
        let mut sorter = Sorter::new(&g);

        let min = sorter.new_order(SortAlg::Min, Placement::FirstToLast, false);
        assert_eq!(min, vec![1, 3, 0, 2]);
        assert!(min.windows(2).all(|w| g.degree(w[0]) <= g.degree(w[1])));

        let max = sorter.new_order(SortAlg::Max, Placement::FirstToLast, false);
        assert_eq!(max, vec![0, 2, 1, 3]);
        assert!(max.windows(2).all(|w| g.degree(w[0]) >= g.degree(w[1])));

        // LastToFirst is the reverse of FirstToLast
        let min_ltf = sorter.new_order(SortAlg::Min, Placement::LastToFirst, false);
        assert_eq!(min_ltf, vec![2, 0, 3, 1]);
    }

    #[test]
    fn test_support_tiebreak() {
        // path 0 - 1 - 2 - 3 - 4: degrees [1, 2, 2, 2, 1],
        // supports [2, 3, 4, 3, 2]
        let mut g: DenseUGraph = UGraph::empty(5);
        for v in 0..4 {
            g.add_edge(v, v + 1);
        }
        let mut sorter = Sorter::new(&g);
        let min = sorter.new_order(SortAlg::MinWithSupport, Placement::FirstToLast, false);
        assert_eq!(min, vec![0, 4, 1, 3, 2]);
        let max = sorter.new_order(SortAlg::MaxWithSupport, Placement::FirstToLast, false);
        assert_eq!(max, vec![2, 1, 3, 0, 4]);
    }

    #[test]
    fn test_degen_min() {
        let g = k4_minus_edge();
        let mut sorter = Sorter::new(&g);
        let order = sorter.new_order(SortAlg::MinDegen, Placement::FirstToLast, false);
        // 1 has minimum degree (ties with 3, lower index wins); removing it
        // leaves degrees [2, -, 2, 2], so 0 is next, and so on
        assert_eq!(order, vec![1, 0, 2, 3]);

        // suffix-degree property of a min-degeneracy ordering
        let mut remaining = DenseBitSet::from_bits(4, 0..4);
        for &v in &order {
            let dv = g.degree_in(v, &remaining);
            let min = remaining
                .ones()
                .map(|u| g.degree_in(u, &remaining))
                .min()
                .unwrap();
            assert_eq!(dv, min);
            remaining.remove(v);
        }
    }

    #[test]
    fn test_degen_composite_follows_baseline() {
        let g = k4_minus_edge();
        let mut sorter = Sorter::new(&g);
        let simple = sorter.new_order(SortAlg::MinDegen, Placement::FirstToLast, false);
        let compo = sorter.new_order(SortAlg::MinDegenCompo, Placement::FirstToLast, false);
        // baseline (min degree with support) is [1, 3, 0, 2]: the first
        // extracted vertex is again 1, but the next tie resolves to 3
        assert_eq!(simple, vec![1, 0, 2, 3]);
        assert_eq!(compo, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_o2n_is_inverse() {
        let g = k4_minus_edge();
        let mut sorter = Sorter::new(&g);
        let n2o = sorter.new_order(SortAlg::Max, Placement::FirstToLast, false);
        let o2n = sorter.new_order(SortAlg::Max, Placement::FirstToLast, true);
        assert_eq!(invert_permutation(&n2o), o2n);
    }

    #[test]
    fn test_reorder_round_trip() {
        let g = k4_minus_edge();
        let mut sorter = Sorter::new(&g);
        let o2n = sorter.new_order(SortAlg::MinDegen, Placement::FirstToLast, true);

        let mut decode = Decode::new();
        let g2 = sorter.reorder(&o2n, Some(&mut decode));
        assert_eq!(g2.num_edges(), g.num_edges());
        // degrees are preserved through the isomorphism
        for v in 0..4 {
            assert_eq!(g2.degree(o2n[v]), g.degree(v));
        }
        // the decode stack translates new indices back to old ones
        for v in 0..4 {
            assert_eq!(decode.decode(o2n[v]), v);
        }

        let back = reorder(&g2, &invert_permutation(&o2n), None);
        assert_eq!(back, g);
    }

    #[test]
    fn test_reorder_weighted_migrates() {
        let mut wg: WeightedGraph<DenseBitSet, i32> =
            WeightedGraph::from_graph(k4_minus_edge());
        wg.set_modulus_weight(200);
        let o2n = vec![3, 1, 0, 2];
        let out = reorder_weighted(&wg, &o2n, None);
        for v in 0..4 {
            assert_eq!(out.weight(o2n[v]), wg.weight(v));
            assert_eq!(out.degree(o2n[v]), wg.degree(v));
        }
    }

    #[test]
    fn test_reorder_edge_weighted_migrates() {
        let mut ewg: EdgeWeightedGraph<DenseBitSet, i32> = EdgeWeightedGraph::empty(4);
        ewg.add_edge(0, 1, 5);
        ewg.add_edge(1, 2, 7);
        ewg.set_vertex_weight(3, 9);
        let o2n = vec![2, 0, 3, 1];
        let out = reorder_edge_weighted(&ewg, &o2n, None);
        assert_eq!(out.edge_weight(2, 0), 5);
        assert_eq!(out.edge_weight(0, 3), 7);
        assert_eq!(out.vertex_weight(1), 9);
        assert_eq!(out.edge_weight(2, 3), -1);
    }

    #[test]
    fn test_weight_orders() {
        let mut wg: WeightedGraph<DenseBitSet, i32> = WeightedGraph::empty(4);
        wg.set_weight(0, 5);
        wg.set_weight(1, 2);
        wg.set_weight(2, 9);
        wg.set_weight(3, 2);
        let sorter = WeightedSorter::new(&wg);
        let min = sorter.new_weight_order(WeightAlg::MinWeight, Placement::FirstToLast, false);
        assert_eq!(min, vec![1, 3, 0, 2]);
        let max = sorter.new_weight_order(WeightAlg::MaxWeight, Placement::FirstToLast, false);
        assert_eq!(max, vec![2, 0, 1, 3]);
    }

    #[test]
    fn test_directed_reorder() {
        let mut g: Graph<DenseBitSet> = Graph::empty(3);
        g.add_edge(0, 1);
        g.add_edge(2, 0);
        let o2n = vec![1, 2, 0];
        let out = reorder_directed(&g, &o2n, None);
        assert!(out.is_edge(1, 2));
        assert!(out.is_edge(0, 1));
        assert_eq!(out.num_edges(), 2);
    }
}
