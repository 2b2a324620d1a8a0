use fortdeps::core::{merge_units, MergePolicy, Project};
use fortdeps::formatters::{DotFormatter, JsonCompactFormatter};
use fortdeps::parsers::{MacroTable, UnitExtractor};
use serde_json::Value;
use std::path::Path;

fn sample_project() -> Project {
    let macros = MacroTable::new();
    let extractor = UnitExtractor::new(&macros);
    let files = vec![
        extractor
            .parse_source(Path::new("kinds.f90"), "module kinds\nend module kinds\n")
            .unwrap(),
        extractor
            .parse_source(
                Path::new("main.f90"),
                "program main\n  use kinds\n  use mpi\nend program main\n",
            )
            .unwrap(),
    ];
    merge_units(files, MergePolicy::LastWins)
        .resolve()
        .with_name("sample")
}

#[test]
fn json_compact_reports_files_units_and_unresolved() {
    let project = sample_project();
    let output = JsonCompactFormatter::new().format_project(&project).unwrap();
    let v: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(v["meta"]["project"], "sample");
    assert_eq!(v["meta"]["files"], 2);
    assert_eq!(v["meta"]["units"], 2);

    let files = v["files"].as_array().unwrap();
    assert_eq!(files[1]["path"], "main.f90");
    assert_eq!(files[1]["depends"][0], "kinds.f90");
    assert_eq!(files[0]["units"][0], "kinds");

    let main = v["units"]
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["name"] == "main")
        .unwrap();
    assert_eq!(main["kind"], "program");
    assert_eq!(main["depends"][0]["file"], "kinds.f90");
    assert!(main["depends"][1]["file"].is_null());

    assert_eq!(v["unresolved"], serde_json::json!(["mpi"]));
    assert_eq!(v["diagnostics"].as_array().unwrap().len(), 2);
}

#[test]
fn ignored_units_are_left_out_of_file_entries() {
    let macros = MacroTable::new();
    let extractor = UnitExtractor::new(&macros);
    let files = vec![extractor
        .parse_source(
            Path::new("lib.f90"),
            "module keep\nend module keep\nmodule vendored\nend module vendored\n",
        )
        .unwrap()];
    let mut sources = merge_units(files, MergePolicy::LastWins);
    sources.remove_ignored_modules(["vendored"]);
    let project = sources.resolve();

    let output = JsonCompactFormatter::new().format_project(&project).unwrap();
    let v: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(v["files"][0]["units"], serde_json::json!(["keep"]));
    assert_eq!(v["units"].as_array().unwrap().len(), 1);
}

#[test]
fn pretty_output_parses_the_same() {
    let project = sample_project();
    let compact = JsonCompactFormatter::new().format_project(&project).unwrap();
    let pretty = JsonCompactFormatter::new()
        .with_pretty(true)
        .format_project(&project)
        .unwrap();

    assert!(pretty.lines().count() > compact.lines().count());
    let a: Value = serde_json::from_str(&compact).unwrap();
    let b: Value = serde_json::from_str(&pretty).unwrap();
    assert_eq!(a, b);
}

#[test]
fn dot_output_contains_unit_graph() {
    let project = sample_project();
    let dot = DotFormatter::new().format_project(&project);

    assert!(dot.starts_with("// sample\n"));
    assert!(dot.contains("digraph"));
    assert!(dot.contains("main"));
    assert!(dot.contains("mpi"));
    assert!(dot.contains("->"));
}
