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
use bitgraph::graphs::UGraph;
use bitgraph::io::{read_graph, write_graph, Format};

pub const COMMAND_NAME: &str = "convert";

#[derive(Args, Debug)]
#[command(about = "Convert a graph file between the supported formats.", long_about = None)]
struct CliArgs {
    /// The source file (dimacs, mtx or edge list, by extension).
    source: PathBuf,
    /// The destination file.
    dest: PathBuf,

    #[arg(short, long)]
    /// Destination format (dimacs, mtx, edges, gml); defaults to the
    /// destination extension.
    format: Option<String>,
}

pub fn cli(command: Command) -> Command {
    command.subcommand(CliArgs::augment_args(Command::new(COMMAND_NAME)))
}

pub fn main(submatches: &ArgMatches) -> Result<()> {
    let args = CliArgs::from_arg_matches(submatches)?;

    let g: UGraph<DenseBitSet> = read_graph(&args.source)?;
    log::info!(
        "read {} ({} vertices, {} edges)",
        args.source.display(),
        g.num_vertices(),
        g.num_edges()
    );
    let format = args.format.as_deref().map(str::parse::<Format>).transpose()?;
    write_graph(&g, &args.dest, format)
}
