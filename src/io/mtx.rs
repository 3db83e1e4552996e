/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Matrix Market coordinate format (`.mtx`), pattern symmetric flavor.

use std::io::{BufRead, Write};

use anyhow::{ensure, Context, Result};
use itertools::Itertools;

use crate::bitsets::BitSet;
use crate::graphs::UGraph;

use super::timestamp_comment;

const BANNER: &str = "%%MatrixMarket";

/// Reads an undirected graph in Matrix Market coordinate format: a
/// `%%MatrixMarket` banner, `%` comments, one `N N M` size line, then one
/// 1-based `u v` pair per line.
pub fn read_mtx<B: BitSet>(reader: impl BufRead) -> Result<UGraph<B>> {
    let mut lines = reader.lines().enumerate();

    let (_, banner) = lines.next().context("empty MatrixMarket file")?;
    let banner = banner.context("Could not read the MatrixMarket banner")?;
    ensure!(
        banner.starts_with(BANNER),
        "not a MatrixMarket file: first line is '{banner}'"
    );
    ensure!(
        banner.contains("coordinate"),
        "unsupported MatrixMarket layout in banner '{banner}'"
    );

    let mut g: Option<UGraph<B>> = None;
    for (lineno, line) in lines {
        let line = line.context("Could not read a line of a MatrixMarket file")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        if g.is_none() {
            let (rows, cols, _entries) = line
                .split_whitespace()
                .collect_tuple()
                .with_context(|| format!("bad size line {}: '{}'", lineno + 1, line))?;
            let rows: usize = rows.parse().context("bad row count")?;
            let cols: usize = cols.parse().context("bad column count")?;
            ensure!(rows == cols, "the adjacency matrix must be square");
            g = Some(UGraph::empty(rows));
            continue;
        }
        let g = g.as_mut().unwrap();
        let (u, v) = line
            .split_whitespace()
            .collect_tuple()
            .with_context(|| format!("bad entry line {}: '{}'", lineno + 1, line))?;
        let u: usize = u.parse().context("bad entry row")?;
        let v: usize = v.parse().context("bad entry column")?;
        let n = g.num_vertices();
        ensure!(
            (1..=n).contains(&u) && (1..=n).contains(&v),
            "entry ({u}, {v}) out of range on line {}",
            lineno + 1
        );
        g.add_edge(u - 1, v - 1);
    }
    g.context("MatrixMarket file has no size line")
}

/// Writes `g` in Matrix Market pattern symmetric format.
pub fn write_mtx<B: BitSet>(g: &UGraph<B>, writer: &mut impl Write) -> Result<()> {
    writeln!(writer, "{BANNER} matrix coordinate pattern symmetric")?;
    writeln!(writer, "% File written by bitgraph: {}", timestamp_comment())?;
    if !g.name().is_empty() {
        writeln!(writer, "% {}", g.name())?;
    }
    writeln!(
        writer,
        "{} {} {}",
        g.num_vertices(),
        g.num_vertices(),
        g.num_edges()
    )?;
    for (u, v) in g.edges() {
        writeln!(writer, "{} {}", u + 1, v + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bitsets::SparseBitSet;

    #[test]
    fn test_round_trip() {
        let mut g: UGraph<SparseBitSet> = UGraph::empty(5);
        g.add_edge(0, 4);
        g.add_edge(1, 2);
        g.set_name("mtx toy");

        let mut out = Vec::new();
        write_mtx(&g, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("%%MatrixMarket matrix coordinate pattern symmetric"));
        assert!(text.contains("5 5 2"));

        let back: UGraph<SparseBitSet> = read_mtx(text.as_bytes()).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn test_rejects_bad_banner() {
        assert!(read_mtx::<SparseBitSet>("3 3 1\n1 2\n".as_bytes()).is_err());
        assert!(read_mtx::<SparseBitSet>("%%MatrixMarket matrix array\n3 3 1\n".as_bytes()).is_err());
    }
}
