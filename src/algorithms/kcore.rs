/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use log::info;

use crate::bitsets::BitSet;
use crate::graphs::UGraph;

/// Linear-time k-core decomposition (Batagelj & Zaveršnik).
///
/// The engine keeps four parallel arrays: `deg` (current degree, which is
/// the core number once [`find_kcore`](KCore::find_kcore) returns), `bin`
/// (offsets into `ver` of each degree class), `ver` (vertices bin-sorted
/// by non-decreasing degree) and `pos` (the inverse of `ver`).
///
/// With a subgraph bitset, degrees and the main loop are restricted to the
/// vertices of the set, and neighborhoods are intersected with it.
pub struct KCore<'a, B: BitSet> {
    g: &'a UGraph<B>,
    subgraph: Option<&'a B>,
    deg: Vec<usize>,
    bin: Vec<usize>,
    ver: Vec<usize>,
    pos: Vec<usize>,
}

impl<'a, B: BitSet> KCore<'a, B> {
    /// Prepares a decomposition of the full graph.
    ///
    /// # Panics
    ///
    /// On a graph with no vertices.
    pub fn new(g: &'a UGraph<B>) -> Self {
        assert!(
            g.num_vertices() > 0,
            "k-core decomposition of a graph with no vertices"
        );
        let n = g.num_vertices();
        Self {
            g,
            subgraph: None,
            deg: vec![0; n],
            bin: Vec::new(),
            ver: vec![0; n],
            pos: vec![0; n],
        }
    }

    /// Prepares a decomposition restricted to the vertices of `subgraph`.
    pub fn with_subgraph(g: &'a UGraph<B>, subgraph: &'a B) -> Self {
        assert!(
            !subgraph.is_empty(),
            "k-core decomposition of an empty subgraph"
        );
        let n = g.num_vertices();
        Self {
            g,
            subgraph: Some(subgraph),
            deg: vec![0; n],
            bin: Vec::new(),
            ver: vec![0; subgraph.count()],
            pos: vec![0; n],
        }
    }

    /// Core number of `v`, valid after [`find_kcore`](KCore::find_kcore).
    #[inline(always)]
    pub fn core_number(&self, v: usize) -> usize {
        self.deg[v]
    }

    /// Core numbers of all vertices.
    pub fn core_numbers(&self) -> &[usize] {
        &self.deg
    }

    /// The largest core number, i.e. the degeneracy of the graph.
    pub fn max_core_number(&self) -> usize {
        self.deg[*self.ver.last().unwrap()]
    }

    /// Number of vertices with core number exactly `k`.
    pub fn core_size(&self, k: usize) -> usize {
        self.vertices().filter(|&v| self.deg[v] == k).count()
    }

    /// Vertices with core number at least `k` (`k = 0` is the whole
    /// vertex set).
    pub fn core_set(&self, k: usize) -> Vec<usize> {
        self.vertices().filter(|&v| self.deg[v] >= k).collect()
    }

    /// The vertices in the order produced by the decomposition
    /// (new-to-old format).
    pub fn kcore_ordering(&self) -> &[usize] {
        &self.ver
    }

    fn vertices(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        match self.subgraph {
            None => Box::new(0..self.g.num_vertices()),
            Some(sg) => Box::new(sg.ones()),
        }
    }

    /// Computes the initial (sub)graph degrees and sizes the degree bins.
    fn init_kcore(&mut self) {
        let mut max_deg = 0;
        match self.subgraph {
            None => {
                for v in 0..self.g.num_vertices() {
                    self.deg[v] = self.g.degree(v);
                    max_deg = max_deg.max(self.deg[v]);
                }
            }
            Some(sg) => {
                for v in sg.ones() {
                    self.deg[v] = self.g.degree_in(v, sg);
                    max_deg = max_deg.max(self.deg[v]);
                }
            }
        }
        // one slot past the maximum degree, so that the end offset of the
        // top degree class is always addressable
        self.bin = vec![0; max_deg + 2];
        for v in self.vertices().collect::<Vec<_>>() {
            self.bin[self.deg[v]] += 1;
        }
    }

    /// Re-sizes the bins from the degrees currently in `deg`. Full graph
    /// only.
    fn init_bin(&mut self) {
        let max_deg = self.deg.iter().copied().max().unwrap_or(0);
        self.bin = vec![0; max_deg + 2];
        for v in 0..self.g.num_vertices() {
            self.bin[self.deg[v]] += 1;
        }
    }

    /// Turns the bin counts into offsets.
    fn bins_to_offsets(&mut self) {
        let mut start = 0;
        for bin in self.bin.iter_mut() {
            let num = *bin;
            *bin = start;
            start += num;
        }
    }

    /// After placement the bins point one past their class; shift them
    /// back so `bin[d]` is again the first position of degree class `d`.
    fn correct_bins(&mut self) {
        for d in (1..self.bin.len()).rev() {
            self.bin[d] = self.bin[d - 1];
        }
        self.bin[0] = 0;
    }

    /// Bin-sorts the vertices by non-decreasing degree into `ver`,
    /// recording positions in `pos`.
    fn bin_sort(&mut self) {
        self.bins_to_offsets();
        match self.subgraph {
            None => {
                for v in 0..self.g.num_vertices() {
                    self.pos[v] = self.bin[self.deg[v]];
                    self.ver[self.pos[v]] = v;
                    self.bin[self.deg[v]] += 1;
                }
            }
            Some(sg) => {
                for v in sg.ones() {
                    self.pos[v] = self.bin[self.deg[v]];
                    self.ver[self.pos[v]] = v;
                    self.bin[self.deg[v]] += 1;
                }
            }
        }
        self.correct_bins();
    }

    #[inline]
    fn place(&mut self, v: usize) {
        self.pos[v] = self.bin[self.deg[v]];
        self.ver[self.pos[v]] = v;
        self.bin[self.deg[v]] += 1;
    }

    /// Bin-sorts the vertices of `order` (reversed when `rev`) by the
    /// degrees currently in `deg`.
    fn bin_sort_order(&mut self, order: &[usize], rev: bool) {
        self.bins_to_offsets();
        if rev {
            for &v in order.iter().rev() {
                self.place(v);
            }
        } else {
            for &v in order {
                self.place(v);
            }
        }
        self.correct_bins();
    }

    /// Moves `u` to the head of its degree bin and shrinks the bin, so
    /// that decrementing `deg[u]` afterwards keeps `ver` bin-sorted. Does
    /// not update the degree itself.
    #[inline]
    fn swap_to_bin_head(&mut self, u: usize) {
        let du = self.deg[u];
        let pu = self.pos[u];
        let pw = self.bin[du];
        let w = self.ver[pw];
        if u != w {
            self.pos[u] = pw;
            self.pos[w] = pu;
            self.ver[pu] = w;
            self.ver[pw] = u;
        }
        self.bin[du] += 1;
    }

    /// Runs the decomposition.
    ///
    /// Afterwards `deg[v]` is the core number of `v`, `ver` is a
    /// degeneracy ordering by non-decreasing core, and the degree of the
    /// last vertex of `ver` is the graph degeneracy.
    pub fn find_kcore(&mut self) {
        self.init_kcore();
        self.bin_sort();
        let g = self.g;

        match self.subgraph {
            None => {
                for i in 0..self.ver.len() {
                    let v = self.ver[i];
                    for u in g.neighbors(v).ones() {
                        if self.deg[u] > self.deg[v] {
                            self.swap_to_bin_head(u);
                            self.deg[u] -= 1;
                        }
                    }
                }
            }
            Some(sg) => {
                for i in 0..self.ver.len() {
                    let v = self.ver[i];
                    let mut nb = g.neighbors(v).clone();
                    nb.intersect_with(sg);
                    for u in nb.ones() {
                        if self.deg[u] > self.deg[v] {
                            self.swap_to_bin_head(u);
                            self.deg[u] -= 1;
                        }
                    }
                }
            }
        }
    }

    /// Degeneracy ordering driven by a known upper bound `ub` on the core
    /// number: vertices whose degree reaches `ub` (or the nearest real
    /// degree above it) are processed first and end up last in `ver`, in
    /// deterministic UB-compressed order.
    ///
    /// Returns the corrected bound: the nearest degree `≥ ub` that occurs
    /// in the graph, or `ub` unchanged when `ub` is already at least the
    /// maximum degree. After this call `deg` no longer holds core
    /// numbers.
    ///
    /// # Panics
    ///
    /// If the engine was constructed with a subgraph: the variant is
    /// defined on the full graph only.
    pub fn find_kcore_ub(&mut self, ub: usize) -> usize {
        assert!(
            self.subgraph.is_none(),
            "the UB-driven decomposition is only defined on the full graph"
        );
        self.init_kcore();
        self.bin_sort();
        let g = self.g;

        // ub at least the maximum degree: nothing to compress
        if ub + 2 >= self.bin.len() {
            info!("upper bound {ub} is not below the maximum degree: vertices left as is");
            return ub;
        }

        // correct ub to the nearest existing degree
        let mut ub = ub;
        let w = self.ver[self.bin[ub]];
        if self.deg[w] != ub {
            ub = self.deg[w];
        }

        let mut deg = ub;
        while deg >= 1 {
            let mut p_iter = self.bin[deg];
            loop {
                let v = self.ver[p_iter];
                let dv = self.deg[v];
                let mut first_new_ub = true;
                let mut p_new_ub = None;

                for u in g.neighbors(v).ones() {
                    if self.deg[u] > ub {
                        self.swap_to_bin_head(u);
                        // a vertex about to drop below ub + 1 inherits the
                        // degree of the extracted vertex instead
                        if self.deg[u] == ub + 1 {
                            self.deg[u] = dv;
                            if first_new_ub && dv != ub {
                                first_new_ub = false;
                                p_new_ub = Some(self.pos[u]);
                            }
                        } else {
                            self.deg[u] -= 1;
                        }
                    }
                }

                // extra pass over the vertices just demoted to ub by v
                if let Some(mut p) = p_new_ub {
                    while p != self.bin[ub + 1] {
                        let vv = self.ver[p];
                        let dvv = self.deg[vv];
                        for u in g.neighbors(vv).ones() {
                            if self.deg[u] > ub {
                                self.swap_to_bin_head(u);
                                if self.deg[u] == ub + 1 {
                                    self.deg[u] = dvv;
                                } else {
                                    self.deg[u] -= 1;
                                }
                            }
                        }
                        p += 1;
                    }
                }

                p_iter += 1;
                if p_iter == self.bin[deg + 1] {
                    break;
                }
            }

            // next non-empty degree class below the current one
            let done = deg;
            loop {
                deg -= 1;
                if self.bin[done] != self.bin[deg] || deg == 0 {
                    break;
                }
            }
        }

        // final sorting pass: reverse bin-sort on the updated degrees
        self.init_bin();
        let order = self.ver.clone();
        self.bin_sort_order(&order, true);

        ub
    }

    /// Width of the ordering in `ver`: the maximum, over the scan, of the
    /// number of neighbors not yet visited. On the ordering produced by
    /// [`find_kcore`](KCore::find_kcore) the forward width equals the
    /// maximum core number. `rev` scans `ver` from last to first.
    pub fn width(&self, rev: bool) -> usize {
        let mut max_w = 0;
        let mut seen = B::empty(self.g.num_vertices());
        let mut scan = |v: usize| {
            let mut unseen = self.g.neighbors(v).clone();
            unseen.difference_with(&seen);
            max_w = max_w.max(unseen.count());
            seen.insert(v);
        };
        if rev {
            for &v in self.ver.iter().rev() {
                scan(v);
            }
        } else {
            for &v in self.ver.iter() {
                scan(v);
            }
        }
        max_w
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bitsets::{BitSet, DenseBitSet};
    use crate::graphs::DenseUGraph;

    #[test]
    fn test_triangle() {
        let g: DenseUGraph = UGraph::make_triangle();
        let mut kc = KCore::new(&g);
        kc.find_kcore();
        assert_eq!(kc.max_core_number(), 2);
        for v in 0..3 {
            assert_eq!(kc.core_number(v), 2);
        }
        assert_eq!(kc.width(false), 2);
    }

    #[test]
    fn test_star() {
        let g: DenseUGraph = UGraph::make_star(4);
        let mut kc = KCore::new(&g);
        kc.find_kcore();
        assert_eq!(kc.max_core_number(), 1);
        assert!((0..4).all(|v| kc.core_number(v) == 1));
        assert_eq!(kc.core_size(0), 0);
        assert_eq!(kc.core_size(1), 4);
        // leaves come first, the center was placed in the last bin
        assert_eq!(kc.kcore_ordering(), &[1, 2, 3, 0]);
    }

    #[test]
    fn test_star_with_triangle() {
        // star on 11 vertices plus the edge {1, 6}: the triangle
        // {0, 1, 6} through the center is the 2-core
        let mut g: DenseUGraph = UGraph::make_star(11);
        g.add_edge(1, 6);
        let mut kc = KCore::new(&g);
        kc.find_kcore();
        assert_eq!(kc.max_core_number(), 2);
        assert_eq!(kc.core_size(1), 8);
        assert_eq!(kc.core_size(2), 3);
        let core2 = kc
            .core_set(2)
            .into_iter()
            .collect::<std::collections::BTreeSet<_>>();
        assert_eq!(core2, [0, 1, 6].into_iter().collect());
        assert_eq!(kc.width(false), 2);
    }

    #[test]
    fn test_clique_cores() {
        let g: DenseUGraph = UGraph::make_clique(5);
        let mut kc = KCore::new(&g);
        kc.find_kcore();
        assert!((0..5).all(|v| kc.core_number(v) == 4));
        assert_eq!(kc.core_set(4).len(), 5);
        assert_eq!(kc.width(false), 4);
    }

    #[test]
    fn test_subgraph_mode() {
        // K₅ restricted to three of its vertices is a triangle
        let g: DenseUGraph = UGraph::make_clique(5);
        let sg = DenseBitSet::from_bits(5, [0, 2, 4]);
        let mut kc = KCore::with_subgraph(&g, &sg);
        kc.find_kcore();
        assert_eq!(kc.core_number(0), 2);
        assert_eq!(kc.core_number(2), 2);
        assert_eq!(kc.core_number(4), 2);
        assert_eq!(kc.max_core_number(), 2);
        assert_eq!(kc.kcore_ordering().len(), 3);
    }

    #[test]
    fn test_ub_at_max_degree_is_noop() {
        let g: DenseUGraph = UGraph::make_triangle();
        let mut kc = KCore::new(&g);
        assert_eq!(kc.find_kcore_ub(2), 2);

        let mut g: DenseUGraph = UGraph::make_star(11);
        g.add_edge(1, 6);
        let mut kc = KCore::new(&g);
        assert_eq!(kc.find_kcore_ub(10), 10);
    }

    #[test]
    fn test_ub_corrects_to_existing_degree() {
        // star with a triangle: degrees are 10 (center), 3 (vertices 1
        // and 6) and 1; asking for ub = 5 corrects to the center degree
        let mut g: DenseUGraph = UGraph::make_star(11);
        g.add_edge(1, 6);
        let mut kc = KCore::new(&g);
        let ub = kc.find_kcore_ub(5);
        assert_eq!(ub, 10);
        // the result is still a permutation of the vertices
        let mut order = kc.kcore_ordering().to_vec();
        order.sort_unstable();
        assert_eq!(order, (0..11).collect::<Vec<_>>());
    }

    #[test]
    #[should_panic(expected = "full graph")]
    fn test_ub_with_subgraph_panics() {
        let g: DenseUGraph = UGraph::make_clique(4);
        let sg = DenseBitSet::from_bits(4, [0, 1]);
        let mut kc = KCore::with_subgraph(&g, &sg);
        kc.find_kcore_ub(1);
    }
}
