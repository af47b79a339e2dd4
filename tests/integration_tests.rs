//! Integration tests for butterfly-walk
//!
//! Library tests load small road files from temporary directories; CLI tests
//! run the built binary against the same fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use butterfly_walk::{
    load_graph, Error, EngineOptions, LoaderConfig, Preset, RecordField, Route,
    ShortestPathEngine,
};
use predicates::prelude::*;
use tempfile::TempDir;

/// A-B-C-D town plus an unconnected corner (ids 500/501)
const TOWN_CSV: &str = "\
start,end,name,distance
101,202,Main St,2
202,303,Oak St,3
101,303,Elm St,6
303,404,Pine St,1
500,501,Lonely Ln,4
";

fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write fixture");
    path
}

fn town(dir: &TempDir) -> PathBuf {
    write_fixture(dir, "town.csv", TOWN_CSV)
}

fn butterfly_walk() -> Command {
    Command::cargo_bin("butterfly-walk").expect("binary should build")
}

/// Row in the VTrans layout: 62 columns, ids at 60/61, name at 9, miles at 31
fn vt_row(from: i64, to: i64, name: &str, miles: f64) -> String {
    let mut fields = vec![String::new(); 62];
    fields[9] = name.to_string();
    fields[31] = miles.to_string();
    fields[60] = from.to_string();
    fields[61] = to.to_string();
    fields.join(",")
}

fn vt_fixture(dir: &TempDir) -> PathBuf {
    let header = (0..62).map(|i| format!("F{i}")).collect::<Vec<_>>().join(",");
    let rows = [
        vt_row(53980, 1200, "SHANNON ST", 0.12),
        vt_row(1200, 1300, "COLLEGE ST", 0.3),
        vt_row(1300, 30783, "MAIN ST", 0.2),
        vt_row(53980, 30783, "FOREST TRAIL", 0.9),
    ];
    write_fixture(dir, "vt.csv", &format!("{header}\n{}\n", rows.join("\n")))
}

fn assert_route(path: &Path, config: &LoaderConfig, from: i64, to: i64, names: &[&str], total: f64) {
    let graph = load_graph(path, config).expect("graph should load");
    let engine = ShortestPathEngine::new(&graph);
    let table = engine.compute_distances(from).expect("source should exist");
    let route = engine.reconstruct_path(to, &table).expect("destination should exist");

    assert_eq!(route.street_names(), names);
    assert_eq!(route.total_distance(), Some(total));
    assert_eq!(table.distance_to(&graph, to).unwrap(), total);
}

#[test]
fn test_town_route_from_file() {
    let dir = TempDir::new().unwrap();
    let path = town(&dir);

    assert_route(
        &path,
        &LoaderConfig::default(),
        101,
        404,
        &["Main St", "Oak St", "Pine St"],
        6.0,
    );
}

#[test]
fn test_town_distances_from_file() {
    let dir = TempDir::new().unwrap();
    let graph = load_graph(town(&dir), &LoaderConfig::default()).unwrap();
    let table = ShortestPathEngine::new(&graph).compute_distances(101).unwrap();

    let expected = [(101, 0.0), (202, 2.0), (303, 5.0), (404, 6.0), (500, f64::INFINITY)];
    for (id, distance) in expected {
        assert_eq!(table.distance_to(&graph, id).unwrap(), distance, "vertex {id}");
    }
}

#[test]
fn test_disconnected_destination_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let graph = load_graph(town(&dir), &LoaderConfig::default()).unwrap();

    let route = butterfly_walk::shortest_route(&graph, 101, 501).unwrap();
    assert_eq!(
        route,
        Route::NoPath {
            source: 101,
            destination: 501
        }
    );
}

#[test]
fn test_duplicate_rows_collapse() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "dup.csv",
        "start,end,name,distance\n1,2,Main St,2\n1,2,Main St,2\n",
    );
    let graph = load_graph(path, &LoaderConfig::default()).unwrap();

    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.roads(1).unwrap().len(), 1);
    assert_eq!(graph.roads(2).unwrap().len(), 1);
}

#[test]
fn test_vt_preset() {
    let dir = TempDir::new().unwrap();
    let path = vt_fixture(&dir);

    assert_route(
        &path,
        &Preset::VtRoadCenterline.config(),
        53980,
        30783,
        &["SHANNON ST", "COLLEGE ST", "MAIN ST"],
        0.12 + 0.3 + 0.2,
    );
}

#[test]
fn test_parallel_engine_on_file() {
    let dir = TempDir::new().unwrap();
    let graph = load_graph(vt_fixture(&dir), &Preset::VtRoadCenterline.config()).unwrap();

    let sequential = ShortestPathEngine::new(&graph).compute_distances(1200).unwrap();
    let parallel = ShortestPathEngine::with_options(
        &graph,
        EngineOptions {
            parallel: true,
            ..Default::default()
        },
    )
    .compute_distances(1200)
    .unwrap();

    assert_eq!(sequential, parallel);
}

#[test]
fn test_malformed_row_aborts_load() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "bad.csv",
        "start,end,name,distance\n1,2,Main St,2\n2,3,Oak St,three\n3,4,Pine St,1\n",
    );

    match load_graph(path, &LoaderConfig::default()) {
        Err(Error::MalformedRecord { line, field, .. }) => {
            assert_eq!(line, 3);
            assert_eq!(field, RecordField::Distance);
        }
        other => panic!("Expected MalformedRecord, got {other:?}"),
    }
}

#[test]
fn test_config_file_layout() {
    let dir = TempDir::new().unwrap();
    let data = write_fixture(
        &dir,
        "roads.psv",
        "street|len|a|b\nMain St|2|1|2\nOak St|3|2|3\n",
    );
    let layout = write_fixture(
        &dir,
        "layout.toml",
        "delimiter = \"|\"\n[columns]\nstart = \"a\"\nend = \"b\"\nlabel = \"street\"\ndistance = 1\n",
    );

    let config = LoaderConfig::from_file(layout).unwrap();
    assert_route(&data, &config, 1, 3, &["Main St", "Oak St"], 5.0);
}

#[test]
fn test_cli_prints_route() {
    let dir = TempDir::new().unwrap();
    let path = town(&dir);

    butterfly_walk()
        .arg(&path)
        .args(["--from", "101", "--to", "404"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Walking route from 101 to 404:"))
        .stdout(predicate::str::contains("1. Main St (2)"))
        .stdout(predicate::str::contains("3. Pine St (1)"))
        .stdout(predicate::str::contains("Distance: 6"));
}

#[test]
fn test_cli_json_output() {
    let dir = TempDir::new().unwrap();
    let path = town(&dir);

    let output = butterfly_walk()
        .arg(&path)
        .args(["--from", "101", "--to", "404", "--json", "--parallel"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "found");
    assert_eq!(json["total_distance"], 6.0);
    assert_eq!(json["legs"].as_array().unwrap().len(), 3);
}

#[test]
fn test_cli_no_path() {
    let dir = TempDir::new().unwrap();
    let path = town(&dir);

    butterfly_walk()
        .arg(&path)
        .args(["--from", "101", "--to", "500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No path from 101 to 500"));
}

#[test]
fn test_cli_unknown_vertex_fails() {
    let dir = TempDir::new().unwrap();
    let path = town(&dir);

    butterfly_walk()
        .arg(&path)
        .args(["--from", "101", "--to", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown vertex 999"));
}

#[test]
fn test_cli_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    butterfly_walk()
        .arg(dir.path().join("nope.csv"))
        .args(["--from", "1", "--to", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read"));
}

#[test]
fn test_cli_column_suggestion() {
    let dir = TempDir::new().unwrap();
    let path = town(&dir);

    butterfly_walk()
        .arg(&path)
        .args(["--dry-run", "--distance-column", "distanse"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("did you mean 'distance'"));
}

#[test]
fn test_cli_dry_run() {
    let dir = TempDir::new().unwrap();
    let path = vt_fixture(&dir);

    butterfly_walk()
        .arg(&path)
        .args(["--dry-run", "--preset", "vt-road-centerline"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Graph: 4 intersections, 8 directed roads"));
}

#[test]
fn test_cli_help_and_version() {
    butterfly_walk()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));

    butterfly_walk()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
