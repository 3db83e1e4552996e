/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! A sparse low-density graph built on both bitset backends must yield
//! identical edge counts, degree sequences, k-core decompositions and
//! degeneracy orderings.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use bitgraph::algorithms::{KCore, Placement, SortAlg, Sorter};
use bitgraph::bitsets::BitSet;
use bitgraph::graphs::{DenseUGraph, SparseUGraph, UGraph};

const N: usize = 2_000;
const DENSITY: f64 = 0.002;

fn build_both() -> (DenseUGraph, SparseUGraph) {
    let mut rng = SmallRng::seed_from_u64(4242);
    let mut dense: DenseUGraph = UGraph::empty(N);
    let mut sparse: SparseUGraph = UGraph::empty(N);
    for u in 0..N - 1 {
        for v in u + 1..N {
            if rng.random_bool(DENSITY) {
                dense.add_edge(u, v);
                sparse.add_edge(u, v);
            }
        }
    }
    (dense, sparse)
}

#[test]
fn test_backends_agree_end_to_end() {
    let (dense, sparse) = build_both();

    // edge counts and degree sequences
    assert_eq!(dense.num_edges(), sparse.num_edges());
    assert!(dense.num_edges() > 0);
    for v in 0..N {
        assert_eq!(dense.degree(v), sparse.degree(v));
        assert_eq!(
            dense.neighbors(v).ones().collect::<Vec<_>>(),
            sparse.neighbors(v).ones().collect::<Vec<_>>()
        );
    }

    // k-core decompositions
    let mut kd = KCore::new(&dense);
    kd.find_kcore();
    let mut ks = KCore::new(&sparse);
    ks.find_kcore();
    assert_eq!(kd.core_numbers(), ks.core_numbers());
    assert_eq!(kd.kcore_ordering(), ks.kcore_ordering());
    assert_eq!(kd.max_core_number(), ks.max_core_number());

    // degeneracy orderings
    let mut sd = Sorter::new(&dense);
    let mut ss = Sorter::new(&sparse);
    let od = sd.new_order(SortAlg::MinDegen, Placement::FirstToLast, true);
    let os = ss.new_order(SortAlg::MinDegen, Placement::FirstToLast, true);
    assert_eq!(od, os);
}

#[test]
fn test_degree_up_agrees() {
    let (dense, sparse) = build_both();
    for v in (0..N).step_by(37) {
        assert_eq!(dense.degree_up(v), sparse.degree_up(v));
    }
}
