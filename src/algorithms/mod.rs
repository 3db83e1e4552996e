/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Ordering engines: degree and degeneracy sorters, k-core decomposition,
//! and the permutation plumbing that translates results between vertex
//! spaces.

mod decode;
pub use decode::*;

mod sort;
pub use sort::*;

mod kcore;
pub use kcore::*;

mod map;
pub use map::*;
