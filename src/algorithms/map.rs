/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::bitsets::BitSet;
use crate::graphs::UGraph;

use super::decode::invert_permutation;
use super::sort::{Placement, SortAlg, Sorter};

/// A pair of complementary permutations translating vertex indices
/// between two orderings of the same graph.
///
/// `l2r` and `r2l` are mutual inverses (`r2l[l2r[v]] == v` for every
/// vertex); construction enforces the invariant and panics on violation.
/// The two short labels name the orderings for diagnostics.
#[derive(Clone, Debug)]
pub struct GraphMap {
    l2r: Vec<usize>,
    r2l: Vec<usize>,
    name_l: String,
    name_r: String,
}

impl GraphMap {
    /// Runs two independent sorters on `g` and composes their orderings:
    /// `l2r[v] = rhs_o2n[lhs_n2o[v]]` and symmetrically for `r2l`.
    pub fn build_mapping<B: BitSet>(
        g: &UGraph<B>,
        alg_l: SortAlg,
        placement_l: Placement,
        alg_r: SortAlg,
        placement_r: Placement,
        name_l: impl Into<String>,
        name_r: impl Into<String>,
    ) -> Self {
        let o2n_l = Sorter::new(g).new_order(alg_l, placement_l, true);
        let o2n_r = Sorter::new(g).new_order(alg_r, placement_r, true);
        Self::from_orders(&o2n_l, &o2n_r, name_l, name_r)
    }

    /// Composes two old → new orderings of the same vertex set.
    pub fn from_orders(
        o2n_l: &[usize],
        o2n_r: &[usize],
        name_l: impl Into<String>,
        name_r: impl Into<String>,
    ) -> Self {
        assert_eq!(o2n_l.len(), o2n_r.len(), "orderings of different length");
        let n2o_l = invert_permutation(o2n_l);
        let n2o_r = invert_permutation(o2n_r);
        let map = Self {
            l2r: (0..o2n_l.len()).map(|v| o2n_r[n2o_l[v]]).collect(),
            r2l: (0..o2n_l.len()).map(|v| o2n_l[n2o_r[v]]).collect(),
            name_l: name_l.into(),
            name_r: name_r.into(),
        };
        if !map.is_consistent() {
            panic!(
                "inconsistent mapping between orderings '{}' and '{}'",
                map.name_l, map.name_r
            );
        }
        map
    }

    /// Mapping between the original vertex space (left) and a single
    /// ordering (right).
    pub fn from_single_order(o2n: &[usize], name_r: impl Into<String>) -> Self {
        Self {
            l2r: o2n.to_vec(),
            r2l: invert_permutation(o2n),
            name_l: "ORIGINAL GRAPH".to_string(),
            name_r: name_r.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.l2r.len()
    }

    pub fn is_empty(&self) -> bool {
        self.l2r.is_empty()
    }

    pub fn l2r(&self) -> &[usize] {
        &self.l2r
    }

    pub fn r2l(&self) -> &[usize] {
        &self.r2l
    }

    pub fn name_l(&self) -> &str {
        &self.name_l
    }

    pub fn name_r(&self) -> &str {
        &self.name_r
    }

    #[inline(always)]
    pub fn map_l2r(&self, v: usize) -> usize {
        self.l2r[v]
    }

    #[inline(always)]
    pub fn map_r2l(&self, v: usize) -> usize {
        self.r2l[v]
    }

    /// Maps a set of vertices from the left space into the right one.
    /// With `overwrite`, `out` is cleared first; otherwise the mapped
    /// bits are added to it.
    pub fn map_l2r_set<B: BitSet>(&self, input: &B, out: &mut B, overwrite: bool) {
        if overwrite {
            out.clear();
        }
        for v in input.ones() {
            out.insert(self.l2r[v]);
        }
    }

    /// Maps a set of vertices from the right space into the left one.
    pub fn map_r2l_set<B: BitSet>(&self, input: &B, out: &mut B, overwrite: bool) {
        if overwrite {
            out.clear();
        }
        for v in input.ones() {
            out.insert(self.r2l[v]);
        }
    }

    /// Checks the mutual-inverse invariant.
    pub fn is_consistent(&self) -> bool {
        self.l2r.len() == self.r2l.len()
            && (0..self.l2r.len()).all(|v| self.r2l[self.l2r[v]] == v)
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
    fn test_build_mapping() {
        let g = k4_minus_edge();
        let gm = GraphMap::build_mapping(
            &g,
            SortAlg::Max,
            Placement::FirstToLast,
            SortAlg::Min,
            Placement::FirstToLast,
            "MAX F2L",
            "MIN F2L",
        );
        assert_eq!(gm.len(), 4);
        assert!(gm.is_consistent());
        assert_eq!(gm.l2r(), &[2, 3, 0, 1]);
        assert_eq!(gm.r2l(), &[2, 3, 0, 1]);
    }

    #[test]
    fn test_map_round_trip() {
        let g = k4_minus_edge();
        let gm = GraphMap::build_mapping(
            &g,
            SortAlg::Max,
            Placement::FirstToLast,
            SortAlg::Min,
            Placement::FirstToLast,
            "MAX F2L",
            "MIN F2L",
        );

        let input = DenseBitSet::from_bits(4, [1, 3]);
        let mut mapped = DenseBitSet::empty(4);
        gm.map_l2r_set(&input, &mut mapped, true);
        assert_eq!(mapped.to_vec(), vec![1, 3]);

        let mut back = DenseBitSet::empty(4);
        gm.map_r2l_set(&mapped, &mut back, true);
        assert_eq!(back, input);
    }

    #[test]
    fn test_single_order() {
        let g = k4_minus_edge();
        let o2n = Sorter::new(&g).new_order(SortAlg::Min, Placement::FirstToLast, true);
        let gm = GraphMap::from_single_order(&o2n, "MIN F2L");
        assert_eq!(gm.l2r(), o2n.as_slice());
        assert_eq!(gm.name_l(), "ORIGINAL GRAPH");
        assert!(gm.is_consistent());
        for v in 0..4 {
            assert_eq!(gm.map_r2l(gm.map_l2r(v)), v);
            assert_eq!(gm.map_l2r(gm.map_r2l(v)), v);
        }
    }

    #[test]
    #[should_panic(expected = "orderings of different length")]
    fn test_length_mismatch_panics() {
        GraphMap::from_orders(&[0, 1], &[0, 1, 2], "L", "R");
    }
}
