/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Readers and writers for the supported ASCII graph formats, plus
//! extension-based auto-detection.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::bitsets::BitSet;
use crate::graphs::{UGraph, Weight, WeightedGraph};

pub mod dimacs;
pub use dimacs::*;

pub mod mtx;
pub use mtx::*;

pub mod edges;
pub use edges::*;

pub mod gml;
pub use gml::*;

/// Timestamp of the leading comment emitted by every writer.
pub(crate) fn timestamp_comment() -> String {
    jiff::Zoned::now().strftime("%a %b %e %H:%M:%S %Y").to_string()
}

/// The supported file formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// DIMACS clique format (`.clq`, `.col`). Also the fallback for
    /// unknown extensions.
    Dimacs,
    /// Matrix Market coordinate pattern symmetric (`.mtx`).
    Mtx,
    /// Plain 1-based edge list (`.edges`).
    EdgeList,
    /// GML (write only).
    Gml,
}

impl Format {
    /// Detects the format from a file extension; unknown extensions fall
    /// back to DIMACS.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("mtx") => Format::Mtx,
            Some("edges") => Format::EdgeList,
            Some("gml") => Format::Gml,
            _ => Format::Dimacs,
        }
    }
}

impl FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dimacs" | "clq" | "col" => Ok(Format::Dimacs),
            "mtx" => Ok(Format::Mtx),
            "edges" | "edgelist" => Ok(Format::EdgeList),
            "gml" => Ok(Format::Gml),
            _ => bail!("unknown format '{s}'"),
        }
    }
}

/// Reads an undirected graph, detecting the format from the extension.
/// The graph name is set to the file stem and the path is recorded.
pub fn read_graph<B: BitSet>(path: impl AsRef<Path>) -> Result<UGraph<B>> {
    let path = path.as_ref();
    let reader = BufReader::new(
        File::open(path).with_context(|| format!("Could not open {}", path.display()))?,
    );
    let mut g = match Format::from_path(path) {
        Format::Dimacs => read_dimacs(reader),
        Format::Mtx => read_mtx(reader),
        Format::EdgeList => read_edges(reader),
        Format::Gml => bail!("GML is a write-only format"),
    }
    .with_context(|| format!("Could not parse {}", path.display()))?;
    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
        g.set_name(stem);
    }
    g.set_path(path.display().to_string());
    Ok(g)
}

/// Reads a vertex-weighted graph from a DIMACS file.
pub fn read_weighted_graph<B: BitSet, W: Weight>(
    path: impl AsRef<Path>,
) -> Result<WeightedGraph<B, W>> {
    let path = path.as_ref();
    let reader = BufReader::new(
        File::open(path).with_context(|| format!("Could not open {}", path.display()))?,
    );
    let mut wg = read_dimacs_weighted(reader)
        .with_context(|| format!("Could not parse {}", path.display()))?;
    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
        wg.graph_mut().set_name(stem);
    }
    wg.graph_mut().set_path(path.display().to_string());
    Ok(wg)
}

/// Writes an undirected graph; the format defaults to the one detected
/// from the extension.
pub fn write_graph<B: BitSet>(
    g: &UGraph<B>,
    path: impl AsRef<Path>,
    format: Option<Format>,
) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(
        File::create(path).with_context(|| format!("Could not create {}", path.display()))?,
    );
    match format.unwrap_or_else(|| Format::from_path(path)) {
        Format::Dimacs => write_dimacs(g, &mut writer),
        Format::Mtx => write_mtx(g, &mut writer),
        Format::EdgeList => write_edges(g, &mut writer),
        Format::Gml => write_gml(g, &mut writer),
    }
    .with_context(|| format!("Could not write {}", path.display()))
}

impl<B: BitSet> UGraph<B> {
    /// Reads a graph from a file, auto-detecting the format by extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        read_graph(path)
    }
}
