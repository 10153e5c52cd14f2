//! Integration tests for apidecl CLI commands.
//!
//! Uses tempfile for testing file-based operations.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use apidecl::cli::{
    Cli, CliError, ExportFormat, cmd_check, cmd_deps, cmd_export, cmd_import, cmd_namespaces,
    cmd_routes, cmd_show, cmd_validate, run,
};
use apidecl::config::Settings;
use apidecl_core::formats::FormatError;
use apidecl_core::wire::RoutePart;
use apidecl_core::{
    DataType, Field, Namespace, Registry, StructDef, WireErrorKind, standard_registry,
};
use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Create a temporary directory for tests.
fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn registry() -> Registry {
    standard_registry().unwrap()
}

/// A registry with a field referencing an undeclared type.
fn broken_registry() -> Registry {
    let mut ns = Namespace::new("broken");
    ns.declare(StructDef::new("Holder").field(Field::new("item", DataType::named("Missing"))))
        .unwrap();
    let mut registry = Registry::new();
    registry.insert(ns).unwrap();
    registry
}

fn write_payload(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn settings_for(bundle: Option<PathBuf>) -> Settings {
    Settings::resolve_with(bundle, None, |_| None)
}

// =============================================================================
// INSPECTION COMMAND TESTS
// =============================================================================

#[test]
fn test_namespaces_text_lists_all() {
    let out = cmd_namespaces(&registry(), false).unwrap();
    for name in ["async", "file_requests", "files", "paper", "sharing", "team"] {
        assert!(out.contains(name), "missing {name}:\n{out}");
    }
}

#[test]
fn test_namespaces_json_mode() {
    let out = cmd_namespaces(&registry(), true).unwrap();
    let parsed: Value = serde_json::from_str(&out).unwrap();
    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 6);
    assert_eq!(items[0]["name"], "async");
}

#[test]
fn test_routes_filtered_by_namespace() {
    let out = cmd_routes(&registry(), Some("team"), false).unwrap();
    assert!(out.lines().count() >= 10);
    assert!(out.lines().all(|l| l.starts_with("team/")));
    assert!(out.contains("/2/team/team_folder/archive"));
}

#[test]
fn test_routes_marks_deprecated() {
    let out = cmd_routes(&registry(), Some("file_requests"), true).unwrap();
    let parsed: Value = serde_json::from_str(&out).unwrap();
    let list_v1 = parsed
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["route"] == "list")
        .unwrap();
    assert_eq!(list_v1["deprecated"], true);
    let list_v2 = parsed
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["route"] == "list:2")
        .unwrap();
    assert_eq!(list_v2["path"], "/2/file_requests/list_v2");
}

#[test]
fn test_routes_unknown_namespace() {
    let result = cmd_routes(&registry(), Some("nope"), false);
    assert!(matches!(result, Err(CliError::Declaration(_))));
}

#[test]
fn test_show_route_type_and_namespace() {
    let r = registry();

    let route = cmd_show(&r, "paper/docs/update", false).unwrap();
    assert!(route.starts_with("route docs/update (PaperDocUpdateArgs"));

    let def = cmd_show(&r, "paper.PaperDocUpdateError", false).unwrap();
    assert!(def.starts_with("union PaperDocUpdateError extends DocLookupError"));
    assert!(def.contains("revision_mismatch"));

    let ns = cmd_show(&r, "async", false).unwrap();
    assert!(ns.starts_with("namespace async\n"));
}

#[test]
fn test_show_json_mode() {
    let out = cmd_show(&registry(), "team.TeamFolderArchiveArg", true).unwrap();
    let parsed: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["Struct"]["name"], "TeamFolderArchiveArg");
}

#[test]
fn test_show_unknown_targets() {
    let r = registry();
    assert!(cmd_show(&r, "paper/docs/nope", false).is_err());
    assert!(cmd_show(&r, "paper.Nope", false).is_err());
    assert!(cmd_show(&r, "nope", false).is_err());
}

#[test]
fn test_deps_of_archive_error() {
    let out = cmd_deps(&registry(), "team.TeamFolderArchiveError", 4, false).unwrap();
    assert!(out.lines().any(|l| l.starts_with("team.")));
}

#[test]
fn test_deps_requires_qualified_name() {
    let result = cmd_deps(&registry(), "TeamFolderArchiveError", 2, false);
    assert!(matches!(result, Err(CliError::InvalidArgument(_))));
}

// =============================================================================
// CHECK COMMAND TESTS
// =============================================================================

#[test]
fn test_check_builtin_passes_strict() {
    let out = cmd_check(&registry(), false, true).unwrap();
    assert!(out.contains("0 error(s), 0 warning(s)"), "{out}");
}

#[test]
fn test_check_json_mode() {
    let out = cmd_check(&registry(), true, false).unwrap();
    let parsed: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["findings"].as_array().unwrap().len(), 0);
}

#[test]
fn test_check_fails_on_unresolved_reference() {
    match cmd_check(&broken_registry(), false, false) {
        Err(CliError::CheckFailed { errors, report, .. }) => {
            assert!(errors >= 1);
            assert!(report.contains("broken.Holder"));
        }
        other => panic!("expected CheckFailed, got {other:?}"),
    }
}

// =============================================================================
// EXPORT / IMPORT COMMAND TESTS
// =============================================================================

#[test]
fn test_export_canonical_then_import() {
    let temp = create_temp_dir();
    let path = temp.path().join("api.bundle");

    let msg = cmd_export(&registry(), &path, ExportFormat::Canonical, None).unwrap();
    assert!(msg.contains("canonical"));
    assert!(path.exists());

    let out = cmd_import(&path, false).unwrap();
    assert!(out.contains("6 namespace(s)"));
}

#[test]
fn test_export_is_byte_identical() {
    let temp = create_temp_dir();
    let a = temp.path().join("a.bundle");
    let b = temp.path().join("b.bundle");
    cmd_export(&registry(), &a, ExportFormat::Canonical, None).unwrap();
    cmd_export(&registry(), &b, ExportFormat::Canonical, None).unwrap();
    assert_eq!(std::fs::read(a).unwrap(), std::fs::read(b).unwrap());
}

#[test]
fn test_export_json_then_import() {
    let temp = create_temp_dir();
    let path = temp.path().join("api.json");
    cmd_export(&registry(), &path, ExportFormat::Json, None).unwrap();

    let out = cmd_import(&path, true).unwrap();
    let parsed: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["namespaces"], 6);
}

#[test]
fn test_export_stone_single_namespace() {
    let temp = create_temp_dir();
    let path = temp.path().join("paper.stone");
    cmd_export(&registry(), &path, ExportFormat::Stone, Some("paper")).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("namespace paper\n"));
    assert!(!text.contains("namespace team"));
}

#[test]
fn test_export_unknown_namespace() {
    let temp = create_temp_dir();
    let path = temp.path().join("nope.json");
    let result = cmd_export(&registry(), &path, ExportFormat::Json, Some("nope"));
    assert!(matches!(
        result,
        Err(CliError::Format(FormatError::UnknownNamespace(_)))
    ));
    assert!(!path.exists());
}

#[test]
fn test_import_tampered_bundle() {
    let temp = create_temp_dir();
    let path = temp.path().join("api.bundle");
    cmd_export(&registry(), &path, ExportFormat::Canonical, None).unwrap();

    let mut bytes = std::fs::read(&path).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xff;
    std::fs::write(&path, bytes).unwrap();

    let result = cmd_import(&path, false);
    assert!(matches!(
        result,
        Err(CliError::Format(FormatError::ChecksumMismatch { .. }))
    ));
}

#[test]
fn test_import_garbage() {
    let temp = create_temp_dir();
    let path = write_payload(&temp, "garbage.bin", "not a bundle");
    assert!(matches!(cmd_import(&path, false), Err(CliError::Format(_))));
}

#[test]
fn test_import_reports_failed_checks() {
    let temp = create_temp_dir();
    let path = temp.path().join("broken.bundle");
    cmd_export(&broken_registry(), &path, ExportFormat::Canonical, None).unwrap();
    assert!(matches!(
        cmd_import(&path, false),
        Err(CliError::CheckFailed { .. })
    ));
}

// =============================================================================
// VALIDATE COMMAND TESTS
// =============================================================================

#[test]
fn test_validate_fills_defaults() {
    let temp = create_temp_dir();
    let input = write_payload(&temp, "arg.json", r#"{"team_folder_id": "123456789"}"#);

    let out = cmd_validate(&registry(), "team/team_folder/archive", RoutePart::Arg, &input, true).unwrap();
    let parsed: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["force_async_off"], false);
}

#[test]
fn test_validate_reports_path() {
    let temp = create_temp_dir();
    let input = write_payload(&temp, "arg.json", r#"{"limit": 0}"#);

    match cmd_validate(&registry(), "team/team_folder/list", RoutePart::Arg, &input, false) {
        Err(CliError::Wire(err)) => {
            assert_eq!(err.path, "$.limit");
            assert!(matches!(err.kind, WireErrorKind::OutOfRange { .. }));
        }
        other => panic!("expected a wire error, got {other:?}"),
    }
}

#[test]
fn test_validate_error_union_other() {
    let temp = create_temp_dir();
    let input = write_payload(&temp, "err.json", r#"{".tag": "brand_new_error"}"#);

    let out = cmd_validate(&registry(), "paper/docs/update", RoutePart::Error, &input, true).unwrap();
    assert_eq!(out.trim(), r#"{".tag":"other"}"#);
}

#[test]
fn test_validate_invalid_json() {
    let temp = create_temp_dir();
    let input = write_payload(&temp, "bad.json", "not valid json");
    let result = cmd_validate(&registry(), "paper/docs/update", RoutePart::Arg, &input, false);
    assert!(matches!(result, Err(CliError::Json(_))));
}

// =============================================================================
// DISPATCH TESTS
// =============================================================================

#[test]
fn test_run_with_bundle_flag() {
    let temp = create_temp_dir();
    let path = temp.path().join("api.bundle");
    cmd_export(&registry(), &path, ExportFormat::Canonical, Some("async")).unwrap();

    let cli = Cli::try_parse_from(["apidecl", "namespaces", "--bundle", path.to_str().unwrap()]).unwrap();
    let out = run(&cli, &settings_for(cli.bundle.clone())).unwrap();
    assert_eq!(out.lines().count(), 1);
    assert!(out.starts_with("async"));
}

#[test]
fn test_run_parses_validate_part() {
    let cli = Cli::try_parse_from([
        "apidecl",
        "validate",
        "--route",
        "paper/docs/list",
        "--part",
        "result",
        "--input",
        "page.json",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        apidecl::cli::Commands::Validate { part: RoutePart::Result, .. }
    ));

    assert!(Cli::try_parse_from(["apidecl", "validate", "--route", "x/y", "--part", "body", "--input", "f"]).is_err());
}
