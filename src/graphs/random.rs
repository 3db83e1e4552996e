/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use dsi_progress_logger::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::bitsets::BitSet;
use crate::io::write_dimacs;

use super::{UGraph, Weight, WeightedGraph};

/// Seed of the generator when the caller does not provide one, so that
/// benchmark runs are reproducible by default.
pub const DEFAULT_SEED: u64 = 0;

/// Generates a uniform simple random graph: every edge `{u, v}` with
/// `u < v` is present independently with probability `p`. No self-loops.
pub fn random_ugraph<B: BitSet>(n: usize, p: f64, rng: &mut SmallRng) -> UGraph<B> {
    assert!((0.0..=1.0).contains(&p), "p must be in [0..1]");
    let mut g = UGraph::empty(n);
    for u in 0..n.saturating_sub(1) {
        for v in u + 1..n {
            if rng.random_bool(p) {
                g.add_edge(u, v);
            }
        }
    }
    g.set_name(format!("r{}_{:.2}", n, p));
    g
}

/// Generates a vertex-weighted uniform random graph with integer weights
/// drawn uniformly from `[1, max_weight]`.
pub fn random_weighted_ugraph<B: BitSet, W: Weight>(
    n: usize,
    p: f64,
    max_weight: usize,
    rng: &mut SmallRng,
) -> WeightedGraph<B, W> {
    let mut wg = WeightedGraph::from_graph(random_ugraph(n, p, rng));
    for v in 0..n {
        wg.set_weight(v, W::from_index(rng.random_range(1..=max_weight)));
    }
    wg
}

/// The parameters of a random benchmark grid: sizes `n_lo..=n_hi` by
/// `n_step`, densities `p_lo..=p_hi` by `p_step`, `reps` instances per
/// cell.
#[derive(Clone, Copy, Debug)]
pub struct RandomSpec {
    pub n_lo: usize,
    pub n_hi: usize,
    pub p_lo: f64,
    pub p_hi: f64,
    pub reps: usize,
    pub n_step: usize,
    pub p_step: f64,
}

impl RandomSpec {
    /// Number of (size, density) cells of the grid.
    fn num_cells(&self) -> usize {
        let sizes = if self.n_lo > self.n_hi {
            0
        } else {
            (self.n_hi - self.n_lo) / self.n_step + 1
        };
        let mut densities = 0;
        let mut p = self.p_lo;
        while p <= self.p_hi + f64::EPSILON {
            densities += 1;
            p += self.p_step;
        }
        sizes * densities
    }

    fn validate(&self) {
        assert!(self.n_lo > 0 && self.n_lo <= self.n_hi);
        assert!(self.p_lo > 0.0 && self.p_lo <= self.p_hi && self.p_hi <= 1.0);
        assert!(self.reps > 0 && self.n_step > 0 && self.p_step > 0.0);
    }
}

/// Writes a benchmark of uniform random graphs in DIMACS format under
/// `dir`, one file `r<n>_<p>_<rep>.txt` per instance.
pub fn write_benchmark<B: BitSet>(dir: impl AsRef<Path>, spec: RandomSpec, seed: u64) -> Result<()> {
    spec.validate();
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Could not create the benchmark directory {}", dir.display()))?;

    let mut rng = SmallRng::seed_from_u64(seed);

    let mut pl = ProgressLogger::default();
    pl.item_name("graph")
        .expected_updates(Some(spec.num_cells() * spec.reps));
    pl.start("Generating random graph benchmark...");

    let mut n = spec.n_lo;
    while n <= spec.n_hi {
        let mut p = spec.p_lo;
        while p <= spec.p_hi + f64::EPSILON {
            for rep in 0..spec.reps {
                let g: UGraph<B> = random_ugraph(n, p, &mut rng);
                let filename = dir.join(format!("r{}_{:.2}_{}.txt", n, p, rep));
                let mut writer = BufWriter::new(File::create(&filename).with_context(|| {
                    format!("Could not create the instance file {}", filename.display())
                })?);
                write_dimacs(&g, &mut writer)?;
                pl.light_update();
            }
            p += spec.p_step;
        }
        n += spec.n_step;
    }

    pl.done();
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bitsets::DenseBitSet;

    #[test]
    fn test_same_seed_same_graph() {
        let mut rng = SmallRng::seed_from_u64(DEFAULT_SEED);
        let a: UGraph<DenseBitSet> = random_ugraph(50, 0.3, &mut rng);
        let mut rng = SmallRng::seed_from_u64(DEFAULT_SEED);
        let b: UGraph<DenseBitSet> = random_ugraph(50, 0.3, &mut rng);
        assert_eq!(a, b);

        let mut rng = SmallRng::seed_from_u64(DEFAULT_SEED + 1);
        let c: UGraph<DenseBitSet> = random_ugraph(50, 0.3, &mut rng);
        assert_ne!(a, c);
    }

    #[test]
    fn test_density_in_the_ballpark() {
        let mut rng = SmallRng::seed_from_u64(DEFAULT_SEED);
        let g: UGraph<DenseBitSet> = random_ugraph(200, 0.2, &mut rng);
        let density = g.density();
        assert!((0.15..0.25).contains(&density), "density {}", density);
    }

    #[test]
    fn test_weighted_generation() {
        let mut rng = SmallRng::seed_from_u64(DEFAULT_SEED);
        let wg: WeightedGraph<DenseBitSet, i32> = random_weighted_ugraph(30, 0.5, 10, &mut rng);
        assert!(wg.weights().iter().all(|&w| (1..=10).contains(&w)));
    }
}
