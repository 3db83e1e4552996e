/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Plain edge-list format (`.edges`): one 1-based `u v` pair per line,
//! `%` or `#` comments.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use itertools::Itertools;

use crate::bitsets::BitSet;
use crate::graphs::UGraph;

use super::timestamp_comment;

/// Reads an undirected graph from an edge list. The vertex count is the
/// largest endpoint mentioned.
pub fn read_edges<B: BitSet>(reader: impl BufRead) -> Result<UGraph<B>> {
    let mut pairs = Vec::new();
    let mut n = 0;
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.context("Could not read a line of an edge-list file")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') || line.starts_with('#') {
            continue;
        }
        let (u, v) = line
            .split_whitespace()
            .collect_tuple()
            .with_context(|| format!("bad edge line {}: '{}'", lineno + 1, line))?;
        let u: usize = u.parse().with_context(|| format!("bad endpoint on line {}", lineno + 1))?;
        let v: usize = v.parse().with_context(|| format!("bad endpoint on line {}", lineno + 1))?;
        anyhow::ensure!(u >= 1 && v >= 1, "endpoints are 1-based on line {}", lineno + 1);
        n = n.max(u).max(v);
        pairs.push((u - 1, v - 1));
    }
    let mut g = UGraph::empty(n);
    for (u, v) in pairs {
        g.add_edge(u, v);
    }
    Ok(g)
}

/// Writes `g` as an edge list with a timestamp comment.
pub fn write_edges<B: BitSet>(g: &UGraph<B>, writer: &mut impl Write) -> Result<()> {
    writeln!(writer, "% File written by bitgraph: {}", timestamp_comment())?;
    if !g.name().is_empty() {
        writeln!(writer, "% {}", g.name())?;
    }
    for (u, v) in g.edges() {
        writeln!(writer, "{} {}", u + 1, v + 1)?;
    }
    Ok(())
}
