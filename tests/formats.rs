/*
 * SPDX-FileCopyrightText: 2023 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::fs::File;
use std::io::BufWriter;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use bitgraph::bitsets::{DenseBitSet, SparseBitSet};
use bitgraph::graphs::{random_ugraph, DenseUGraph, UGraph, WeightedGraph};
use bitgraph::io::{
    read_graph, read_weighted_graph, write_dimacs, write_dimacs_weighted, write_edges, write_gml,
    write_graph, write_mtx, Format,
};

fn toy_graph() -> DenseUGraph {
    let mut rng = SmallRng::seed_from_u64(77);
    let mut g = random_ugraph(40, 0.2, &mut rng);
    g.set_name("toy instance");
    g
}

#[test]
fn test_dimacs_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("toy.clq");

    let g = toy_graph();
    let mut writer = BufWriter::new(File::create(&path).unwrap());
    write_dimacs(&g, &mut writer).unwrap();
    drop(writer);

    let back: DenseUGraph = read_graph(&path).unwrap();
    assert_eq!(back, g);
    assert_eq!(back.name(), "toy");
    assert!(back.path().ends_with("toy.clq"));
}

#[test]
fn test_mtx_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("toy.mtx");

    let g = toy_graph();
    let mut writer = BufWriter::new(File::create(&path).unwrap());
    write_mtx(&g, &mut writer).unwrap();
    drop(writer);

    let back: UGraph<SparseBitSet> = read_graph(&path).unwrap();
    assert_eq!(back.num_edges(), g.num_edges());
    for u in 0..40 {
        for v in 0..40 {
            assert_eq!(back.is_edge(u, v), g.is_edge(u, v));
        }
    }
}

#[test]
fn test_edges_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("toy.edges");

    let mut g = toy_graph();
    // the edge-list reader infers the vertex count from the largest
    // endpoint, so pin it down
    g.add_edge(0, 39);
    let mut writer = BufWriter::new(File::create(&path).unwrap());
    write_edges(&g, &mut writer).unwrap();
    drop(writer);

    let back: DenseUGraph = read_graph(&path).unwrap();
    assert_eq!(back.num_vertices(), 40);
    assert_eq!(back.num_edges(), g.num_edges());
}

#[test]
fn test_write_graph_dispatches_on_extension() {
    let dir = tempfile::tempdir().unwrap();
    let g = toy_graph();

    for (file, expected_first) in [
        ("g.clq", "c "),
        ("g.mtx", "%%MatrixMarket"),
        ("g.edges", "% "),
        ("g.gml", "# "),
    ] {
        let path = dir.path().join(file);
        write_graph(&g, &path, None).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(
            text.starts_with(expected_first),
            "{file} starts with {:?}",
            &text[..20.min(text.len())]
        );
    }

    // explicit format overrides the extension
    let path = dir.path().join("odd_name.txt");
    write_graph(&g, &path, Some(Format::Mtx)).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("%%MatrixMarket"));
}

#[test]
fn test_weighted_dimacs_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("weighted.clq");

    let mut wg: WeightedGraph<DenseBitSet, i32> = WeightedGraph::empty(6);
    wg.add_edge(0, 1);
    wg.add_edge(4, 5);
    wg.set_modulus_weight(200);

    let mut writer = BufWriter::new(File::create(&path).unwrap());
    write_dimacs_weighted(&wg, &mut writer).unwrap();
    drop(writer);

    let back: WeightedGraph<DenseBitSet, i32> = read_weighted_graph(&path).unwrap();
    assert_eq!(back.weights(), wg.weights());
    assert_eq!(back.num_edges(), 2);
}

#[test]
fn test_gml_is_write_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("toy.gml");
    let g = toy_graph();
    let mut writer = BufWriter::new(File::create(&path).unwrap());
    write_gml(&g, &mut writer).unwrap();
    drop(writer);
    assert!(read_graph::<DenseBitSet>(&path).is_err());
}

#[test]
fn test_missing_file_is_an_error() {
    let err = read_graph::<DenseBitSet>("/no/such/file.clq").unwrap_err();
    assert!(err.to_string().contains("Could not open"));
}
