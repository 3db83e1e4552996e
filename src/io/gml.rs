/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! GML exporter (write only).

use std::io::Write;

use anyhow::Result;

use crate::bitsets::BitSet;
use crate::graphs::UGraph;

use super::timestamp_comment;

/// Writes `g` as an undirected GML graph.
pub fn write_gml<B: BitSet>(g: &UGraph<B>, writer: &mut impl Write) -> Result<()> {
    writeln!(writer, "# File written by bitgraph: {}", timestamp_comment())?;
    writeln!(writer, "graph [")?;
    writeln!(writer, "  directed 0")?;
    if !g.name().is_empty() {
        writeln!(writer, "  label \"{}\"", g.name())?;
    }
    for v in 0..g.num_vertices() {
        writeln!(writer, "  node [ id {v} ]")?;
    }
    for (u, v) in g.edges() {
        writeln!(writer, "  edge [ source {u} target {v} ]")?;
    }
    writeln!(writer, "]")?;
    Ok(())
}
