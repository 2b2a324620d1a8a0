use fortdeps::core::{DependError, UnitKind};
use fortdeps::parsers::{MacroTable, UnitExtractor};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

const TWO_MODULES: &str = "\
module kinds
  implicit none
  integer, parameter :: dp = kind(1.0d0)
end module kinds

module solver
  use kinds
  use, intrinsic :: iso_fortran_env, only: output_unit
contains
  subroutine solve()
    use grid, only: nx
  end subroutine solve
end module solver
";

fn names(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn extracts_each_unit_with_its_own_imports() {
    let macros = MacroTable::new();
    let units = UnitExtractor::new(&macros)
        .extract(Path::new("solver.f90"), TWO_MODULES)
        .unwrap();

    assert_eq!(units.len(), 2);

    let kinds = &units["kinds"];
    assert_eq!(kinds.kind, UnitKind::Module);
    assert!(kinds.imports.is_empty());
    assert_eq!((kinds.start_line, kinds.end_line), (0, 3));

    let solver = &units["solver"];
    assert_eq!(solver.file, Path::new("solver.f90"));
    assert_eq!(
        solver.imports,
        names(&["grid", "iso_fortran_env", "kinds"])
    );
}

#[test]
fn imports_are_lowercased_and_deduplicated() {
    let text = "program main\n  use Beta\n  use alpha\n  USE BETA, only: x\nend program main\n";
    let macros = MacroTable::new();
    let source = UnitExtractor::new(&macros)
        .parse_source(Path::new("main.f90"), text)
        .unwrap();

    let main = &source.units["main"];
    assert_eq!(main.kind, UnitKind::Program);
    let imports: Vec<&str> = main.imports.iter().map(String::as_str).collect();
    assert_eq!(imports, vec!["alpha", "beta"]);
    assert_eq!(source.imports, names(&["alpha", "beta"]));
}

#[test]
fn use_outside_units_is_not_attributed() {
    let text = "use stray\nmodule a\nend module a\nuse also_stray\n";
    let macros = MacroTable::new();
    let source = UnitExtractor::new(&macros)
        .parse_source(Path::new("a.f90"), text)
        .unwrap();

    assert!(source.units["a"].imports.is_empty());
    assert!(source.imports.is_empty());
}

#[test]
fn file_without_units_has_no_imports() {
    let text = "subroutine helper()\n  use kinds\nend subroutine helper\n";
    let macros = MacroTable::new();
    let source = UnitExtractor::new(&macros)
        .parse_source(Path::new("helper.f90"), text)
        .unwrap();

    assert!(source.units.is_empty());
    assert!(source.imports.is_empty());
}

#[test]
fn macros_rewrite_imported_names() {
    let text = "module consumer\n  use foo_bar\nend module consumer\n";
    let macros = MacroTable::new().with_macro("foo_", "baz_").unwrap();
    let units = UnitExtractor::new(&macros)
        .extract(Path::new("consumer.f90"), text)
        .unwrap();

    assert_eq!(units["consumer"].imports, names(&["baz_bar"]));
}

#[test]
fn later_duplicate_in_same_file_wins() {
    let text = "module dup\n  use first\nend module\nmodule dup\n  use second\nend module\n";
    let macros = MacroTable::new();
    let units = UnitExtractor::new(&macros)
        .extract(Path::new("dup.f90"), text)
        .unwrap();

    assert_eq!(units.len(), 1);
    assert_eq!(units["dup"].start_line, 3);
    assert_eq!(units["dup"].imports, names(&["second"]));
}

#[test]
fn submodule_interfaces_do_not_open_units() {
    let text = "\
module shapes
  use kinds
  interface
    module pure function area(r) result(a)
      real, intent(in) :: r
      real :: a
    end function area
    module elemental subroutine scale(x)
      real, intent(inout) :: x
    end subroutine scale
  end interface
end module shapes
";
    let macros = MacroTable::new();
    let units = UnitExtractor::new(&macros)
        .extract(Path::new("shapes.f90"), text)
        .unwrap();

    assert_eq!(units.len(), 1);
    assert_eq!(units["shapes"].imports, names(&["kinds"]));
    assert_eq!(units["shapes"].end_line, 11);
}

#[test]
fn unbalanced_units_are_a_structural_error() {
    let text = "module open_only\n  use kinds\n";
    let macros = MacroTable::new();
    let err = UnitExtractor::new(&macros)
        .extract(Path::new("broken.f90"), text)
        .unwrap_err();

    match &err {
        DependError::Structural { path, begins, ends } => {
            assert_eq!(path, Path::new("broken.f90"));
            assert_eq!((*begins, *ends), (1, 0));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("broken.f90 (1 begins/0 ends)"));
}

#[test]
fn stray_end_is_a_structural_error() {
    let text = "print *, 'hi'\nend program\n";
    let macros = MacroTable::new();
    let err = UnitExtractor::new(&macros)
        .extract(Path::new("stray.f90"), text)
        .unwrap_err();

    assert!(matches!(
        err,
        DependError::Structural {
            begins: 0,
            ends: 1,
            ..
        }
    ));
}

#[test]
fn load_file_reads_non_utf8_sources() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("latin.f90");
    let mut bytes = b"module latin\n  ! caf".to_vec();
    bytes.push(0xe9);
    bytes.extend_from_slice(b"\n  use kinds\nend module latin\n");
    fs::write(&path, bytes).unwrap();

    let macros = MacroTable::new();
    let source = UnitExtractor::new(&macros).load_file(&path).unwrap();

    assert_eq!(source.path, path);
    assert_eq!(source.units["latin"].imports, names(&["kinds"]));
}

#[test]
fn load_file_reports_missing_files() {
    let macros = MacroTable::new();
    let err = UnitExtractor::new(&macros)
        .load_file(Path::new("/nonexistent/missing.f90"))
        .unwrap_err();
    assert!(matches!(err, DependError::Io { .. }));
}
