/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgMatches, Args, Command, FromArgMatches};

use bitgraph::bitsets::DenseBitSet;
use bitgraph::graphs::{write_benchmark, RandomSpec, DEFAULT_SEED};

pub const COMMAND_NAME: &str = "bench";

#[derive(Args, Debug)]
#[command(
    about = "Generate a benchmark grid of uniform random graphs in DIMACS format.",
    long_about = None
)]
struct CliArgs {
    /// The smallest number of vertices.
    n_lo: usize,
    /// The largest number of vertices.
    n_hi: usize,
    /// The smallest density.
    p_lo: f64,
    /// The largest density.
    p_hi: f64,
    /// Instances generated per (size, density) cell.
    reps: usize,
    /// Increment of the number of vertices.
    n_step: usize,
    /// Increment of the density.
    p_step: f64,
    /// The output directory; created if missing.
    out_dir: PathBuf,

    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    /// Seed of the pseudorandom number generator.
    seed: u64,
}

pub fn cli(command: Command) -> Command {
    command.subcommand(CliArgs::augment_args(Command::new(COMMAND_NAME)))
}

pub fn main(submatches: &ArgMatches) -> Result<()> {
    let args = CliArgs::from_arg_matches(submatches)?;

    let spec = RandomSpec {
        n_lo: args.n_lo,
        n_hi: args.n_hi,
        p_lo: args.p_lo,
        p_hi: args.p_hi,
        reps: args.reps,
        n_step: args.n_step,
        p_step: args.p_step,
    };
    log::info!(
        "generating benchmark under {}: sizes [{}, {}] step {}, densities [{}, {}] step {}, {} reps",
        args.out_dir.display(),
        spec.n_lo,
        spec.n_hi,
        spec.n_step,
        spec.p_lo,
        spec.p_hi,
        spec.p_step,
        spec.reps
    );
    write_benchmark::<DenseBitSet>(&args.out_dir, spec, args.seed)
}
