/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Conversions between graphs over different bitset backends.

use crate::bitsets::BitSet;

use super::{EdgeWeightedGraph, UGraph, Weight, WeightedGraph};

/// Rebuilds `g` over another bitset backend (typically dense ↔ sparse),
/// preserving vertices, edges, name and path.
pub fn convert_ugraph<A: BitSet, B: BitSet>(g: &UGraph<A>) -> UGraph<B> {
    let mut out = UGraph::empty(g.num_vertices());
    out.set_name(g.name());
    out.set_path(g.path());
    for (u, v) in g.edges() {
        out.add_edge(u, v);
    }
    out
}

/// [`convert_ugraph`] for vertex-weighted graphs; weights are copied.
pub fn convert_weighted<A: BitSet, B: BitSet, W: Weight>(
    g: &WeightedGraph<A, W>,
) -> WeightedGraph<B, W> {
    let mut out = WeightedGraph::from_graph(convert_ugraph(g.graph()));
    for v in 0..g.num_vertices() {
        out.set_weight(v, g.weight(v));
    }
    out
}

/// [`convert_ugraph`] for edge-weighted graphs; the weight matrix is
/// copied entry by entry.
pub fn convert_edge_weighted<A: BitSet, B: BitSet, W: Weight>(
    g: &EdgeWeightedGraph<A, W>,
) -> EdgeWeightedGraph<B, W> {
    let n = g.num_vertices();
    let mut out = EdgeWeightedGraph::with_weight(n, W::NO_WEIGHT);
    for (u, v) in g.graph().edges() {
        out.add_edge(u, v, g.edge_weight(u, v));
    }
    for v in 0..n {
        out.set_vertex_weight(v, g.vertex_weight(v));
    }
    out
}
