/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Graph layer: directed and undirected simple graphs over a bitset
//! backend, plus vertex-weighted and edge-weighted wrappers, backend
//! conversions and a seeded random generator.

mod graph;
pub use graph::*;

mod ugraph;
pub use ugraph::*;

mod weighted;
pub use weighted::*;

mod edge_weighted;
pub use edge_weighted::*;

pub mod convert;
pub use convert::*;

pub mod random;
pub use random::*;

use crate::bitsets::{DenseBitSet, SparseBitSet};

/// Directed graph over the dense backend.
pub type DenseGraph = Graph<DenseBitSet>;
/// Directed graph over the sparse backend.
pub type SparseGraph = Graph<SparseBitSet>;
/// Undirected graph over the dense backend.
pub type DenseUGraph = UGraph<DenseBitSet>;
/// Undirected graph over the sparse backend.
pub type SparseUGraph = UGraph<SparseBitSet>;
