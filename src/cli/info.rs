/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgMatches, Args, Command, FromArgMatches};

use bitgraph::algorithms::KCore;
use bitgraph::bitsets::DenseBitSet;
use bitgraph::graphs::UGraph;
use bitgraph::io::read_graph;
use bitgraph::utils::RunInfo;

pub const COMMAND_NAME: &str = "info";

#[derive(Args, Debug)]
#[command(about = "Print size, density and k-core statistics of a graph file.", long_about = None)]
struct CliArgs {
    /// The graph file (dimacs, mtx or edge list, by extension).
    source: PathBuf,
}

pub fn cli(command: Command) -> Command {
    command.subcommand(CliArgs::augment_args(Command::new(COMMAND_NAME)))
}

pub fn main(submatches: &ArgMatches) -> Result<()> {
    let args = CliArgs::from_arg_matches(submatches)?;

    let mut run = RunInfo::new();
    let g: UGraph<DenseBitSet> = read_graph(&args.source)?;

    run.start_phase("kcore");
    let mut kc = KCore::new(&g);
    kc.find_kcore();
    run.end_phase();

    println!("name:       {}", g.name());
    println!("vertices:   {}", g.num_vertices());
    println!("edges:      {}", g.num_edges());
    println!("density:    {:.6}", g.density());
    println!("max degree: {}", g.max_graph_degree());
    println!("max core:   {}", kc.max_core_number());
    println!("width:      {}", kc.width(false));
    println!("timing:     {}", run);
    Ok(())
}
