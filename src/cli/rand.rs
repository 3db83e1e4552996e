/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgMatches, Args, Command, FromArgMatches};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use bitgraph::bitsets::DenseBitSet;
use bitgraph::graphs::{random_ugraph, UGraph, DEFAULT_SEED};
use bitgraph::io::{write_dimacs, write_graph, Format};

pub const COMMAND_NAME: &str = "rand";

#[derive(Args, Debug)]
#[command(about = "Generate a uniform random graph.", long_about = None)]
struct CliArgs {
    /// The number of vertices.
    n: usize,
    /// The edge probability.
    p: f64,
    /// The output file; stdout in DIMACS format when missing.
    output: Option<PathBuf>,

    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    /// Seed of the pseudorandom number generator.
    seed: u64,

    #[arg(short, long)]
    /// Output format (dimacs, mtx, edges, gml); defaults to the output
    /// file extension.
    format: Option<String>,
}

pub fn cli(command: Command) -> Command {
    command.subcommand(CliArgs::augment_args(Command::new(COMMAND_NAME)))
}

pub fn main(submatches: &ArgMatches) -> Result<()> {
    let args = CliArgs::from_arg_matches(submatches)?;

    let mut rng = SmallRng::seed_from_u64(args.seed);
    let g: UGraph<DenseBitSet> = random_ugraph(args.n, args.p, &mut rng);
    log::info!(
        "generated {} with {} vertices and {} edges",
        g.name(),
        g.num_vertices(),
        g.num_edges()
    );

    let format = args.format.as_deref().map(str::parse::<Format>).transpose()?;
    match args.output {
        Some(path) => write_graph(&g, path, format)?,
        None => write_dimacs(&g, &mut std::io::stdout().lock())?,
    }
    Ok(())
}
