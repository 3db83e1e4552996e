/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! DIMACS clique format (`.clq`, `.col`).
//!
//! `c` lines are comments; one `p edge N M` line announces the sizes;
//! `e u v` lines declare undirected edges with 1-based endpoints. The
//! weighted extensions are honored: `n v w` declares the weight of vertex
//! `v`, the extended form `e u v w` stores `w` as the edge weight, and a
//! self-loop `e v v w` is interpreted as the weight of vertex `v`.

use std::io::{BufRead, Write};

use anyhow::{bail, ensure, Context, Result};

use crate::bitsets::BitSet;
use crate::graphs::{EdgeWeightedGraph, UGraph, Weight, WeightedGraph};

use super::timestamp_comment;

/// Modulus used for generated weights when a weighted instance carries
/// none (Pullan 2008).
pub const DEFAULT_WEIGHT_MODULUS: usize = 200;

struct DimacsBody {
    n: usize,
    edges: Vec<(usize, usize, Option<String>)>,
    vertex_weights: Vec<(usize, String)>,
}

/// Parses the shared shape of a DIMACS file: header, edge lines with an
/// optional trailing weight token, and `n` lines.
fn read_body(reader: impl BufRead) -> Result<DimacsBody> {
    let mut header: Option<(usize, usize)> = None;
    let mut edges = Vec::new();
    let mut vertex_weights = Vec::new();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line.context("Could not read a line of a DIMACS file")?;
        let line = line.trim();
        let context = || format!("line {}: '{}'", lineno + 1, line);

        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("p") => {
                ensure!(header.is_none(), "duplicated 'p' line at {}", context());
                let format = tokens.next();
                ensure!(
                    format == Some("edge") || format == Some("edges") || format == Some("col"),
                    "unsupported DIMACS format token at {}",
                    context()
                );
                let n = tokens
                    .next()
                    .and_then(|t| t.parse::<usize>().ok())
                    .with_context(|| format!("bad vertex count at {}", context()))?;
                let m = tokens
                    .next()
                    .and_then(|t| t.parse::<usize>().ok())
                    .with_context(|| format!("bad edge count at {}", context()))?;
                header = Some((n, m));
            }
            Some("e") => {
                ensure!(header.is_some(), "edge before 'p' line at {}", context());
                let u = tokens
                    .next()
                    .and_then(|t| t.parse::<usize>().ok())
                    .with_context(|| format!("bad edge endpoint at {}", context()))?;
                let v = tokens
                    .next()
                    .and_then(|t| t.parse::<usize>().ok())
                    .with_context(|| format!("bad edge endpoint at {}", context()))?;
                let n = header.unwrap().0;
                ensure!(
                    (1..=n).contains(&u) && (1..=n).contains(&v),
                    "edge endpoint out of range at {}",
                    context()
                );
                edges.push((u - 1, v - 1, tokens.next().map(str::to_string)));
            }
            Some("n") => {
                ensure!(header.is_some(), "weight before 'p' line at {}", context());
                let v = tokens
                    .next()
                    .and_then(|t| t.parse::<usize>().ok())
                    .with_context(|| format!("bad weighted vertex at {}", context()))?;
                let w = tokens
                    .next()
                    .with_context(|| format!("missing vertex weight at {}", context()))?;
                ensure!(
                    (1..=header.unwrap().0).contains(&v),
                    "weighted vertex out of range at {}",
                    context()
                );
                vertex_weights.push((v - 1, w.to_string()));
            }
            _ => bail!("unrecognized DIMACS line at {}", context()),
        }
    }

    let (n, _) = header.context("DIMACS file has no 'p edge' line")?;
    Ok(DimacsBody {
        n,
        edges,
        vertex_weights,
    })
}

/// Reads an unweighted undirected graph; weight tokens, if present, are
/// ignored.
pub fn read_dimacs<B: BitSet>(reader: impl BufRead) -> Result<UGraph<B>> {
    let body = read_body(reader)?;
    let mut g = UGraph::empty(body.n);
    for (u, v, _) in body.edges {
        g.add_edge(u, v);
    }
    Ok(g)
}

/// Reads a vertex-weighted undirected graph.
///
/// Weights come from `n v w` lines; when the file carries none at all,
/// the modulus weights `w(v) = ((v + 1) mod 200) + 1` are generated
/// instead, preserving the behavior of unweighted benchmark instances.
pub fn read_dimacs_weighted<B: BitSet, W: Weight>(
    reader: impl BufRead,
) -> Result<WeightedGraph<B, W>> {
    let body = read_body(reader)?;
    let mut wg = WeightedGraph::with_weight(body.n, W::NO_WEIGHT);
    for &(u, v, _) in &body.edges {
        wg.add_edge(u, v);
    }
    if body.vertex_weights.is_empty() {
        wg.set_modulus_weight(DEFAULT_WEIGHT_MODULUS);
    } else {
        for (v, token) in body.vertex_weights {
            let w = W::parse(&token)
                .with_context(|| format!("could not parse the weight of vertex {}", v + 1))?;
            wg.set_weight(v, w);
        }
    }
    Ok(wg)
}

/// Reads an edge-weighted undirected graph.
///
/// Edge weights come from the extended `e u v w` form (`NO_WEIGHT` when
/// the token is missing); a self-loop `e v v w` and the `n v w` form both
/// declare the weight of vertex `v`.
pub fn read_dimacs_edge_weighted<B: BitSet, W: Weight>(
    reader: impl BufRead,
) -> Result<EdgeWeightedGraph<B, W>> {
    let body = read_body(reader)?;
    let mut ewg = EdgeWeightedGraph::with_weight(body.n, W::NO_WEIGHT);
    for (u, v, token) in body.edges {
        let w = match &token {
            Some(token) => W::parse(token)
                .with_context(|| format!("could not parse the weight of edge ({u}, {v})"))?,
            None => W::NO_WEIGHT,
        };
        if u == v {
            ewg.set_vertex_weight(u, w);
        } else {
            ewg.add_edge(u, v, w);
        }
    }
    for (v, token) in body.vertex_weights {
        let w = W::parse(&token)
            .with_context(|| format!("could not parse the weight of vertex {}", v + 1))?;
        ewg.set_vertex_weight(v, w);
    }
    Ok(ewg)
}

/// Writes `g` in DIMACS format: timestamp comment, optional name comment,
/// `p edge` line, then the edges in ascending order with 1-based
/// endpoints.
pub fn write_dimacs<B: BitSet>(g: &UGraph<B>, writer: &mut impl Write) -> Result<()> {
    writeln!(writer, "c File written by bitgraph: {}", timestamp_comment())?;
    if !g.name().is_empty() {
        writeln!(writer, "c {}", g.name())?;
    }
    writeln!(writer, "p edge {} {}", g.num_vertices(), g.num_edges())?;
    for (u, v) in g.edges() {
        writeln!(writer, "e {} {}", u + 1, v + 1)?;
    }
    Ok(())
}

/// [`write_dimacs`] plus one `n v w` line per vertex whose weight is not
/// `NO_WEIGHT`.
pub fn write_dimacs_weighted<B: BitSet, W: Weight>(
    wg: &WeightedGraph<B, W>,
    writer: &mut impl Write,
) -> Result<()> {
    let g = wg.graph();
    writeln!(writer, "c File written by bitgraph: {}", timestamp_comment())?;
    if !g.name().is_empty() {
        writeln!(writer, "c {}", g.name())?;
    }
    writeln!(writer, "p edge {} {}", g.num_vertices(), g.num_edges())?;
    for v in 0..g.num_vertices() {
        if wg.weight(v) != W::NO_WEIGHT {
            writeln!(writer, "n {} {}", v + 1, wg.weight(v))?;
        }
    }
    for (u, v) in g.edges() {
        writeln!(writer, "e {} {}", u + 1, v + 1)?;
    }
    Ok(())
}

/// [`write_dimacs`] in the extended `e u v w` form. Vertex weights other
/// than `NO_WEIGHT` are written as `n` lines; every edge carries its
/// weight, `NO_WEIGHT` included.
pub fn write_dimacs_edge_weighted<B: BitSet, W: Weight>(
    ewg: &EdgeWeightedGraph<B, W>,
    writer: &mut impl Write,
) -> Result<()> {
    let g = ewg.graph();
    writeln!(writer, "c File written by bitgraph: {}", timestamp_comment())?;
    if !g.name().is_empty() {
        writeln!(writer, "c {}", g.name())?;
    }
    writeln!(writer, "p edge {} {}", g.num_vertices(), g.num_edges())?;
    for v in 0..g.num_vertices() {
        if ewg.vertex_weight(v) != W::NO_WEIGHT {
            writeln!(writer, "n {} {}", v + 1, ewg.vertex_weight(v))?;
        }
    }
    for (u, v) in g.edges() {
        writeln!(writer, "e {} {} {}", u + 1, v + 1, ewg.edge_weight(u, v))?;
    }
    Ok(())
}
