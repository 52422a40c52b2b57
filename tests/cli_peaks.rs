mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

use cairn::models::{Feature, TagCondition, TypeConfig, TypeDefinition};
use common::{mountain_types, peak, vienna_nodes, write_database, TestNode};

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone()).expect("utf-8")
}

#[test]
fn cli_help_exits_zero_without_database() {
    for flag in ["-h", "--help"] {
        let mut cmd = cargo_bin_cmd!("peaks");
        cmd.arg(flag);
        cmd.assert()
            .success()
            .stdout(predicate::str::contains("DATABASE"))
            .stdout(predicate::str::contains("LOCATION"))
            .stdout(predicate::str::contains("Found").not());
    }
}

#[test]
fn cli_missing_location_exits_one_with_usage() {
    let mut cmd = cargo_bin_cmd!("peaks");
    cmd.arg("/does/not/matter");
    cmd.assert()
        .code(1)
        .stderr(predicate::str::starts_with("ERROR: "))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn cli_bad_location_exits_one_with_usage() {
    let tmp = tempdir().expect("tempdir");
    write_database(tmp.path(), mountain_types(), &vienna_nodes());

    let mut cmd = cargo_bin_cmd!("peaks");
    cmd.arg(tmp.path()).args(["48.2", "east"]);
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("ERROR: invalid coordinate"))
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("Found").not());
}

#[test]
fn cli_missing_database_exits_one() {
    let tmp = tempdir().expect("tempdir");
    let missing = tmp.path().join("missing");

    let mut cmd = cargo_bin_cmd!("peaks");
    cmd.arg(&missing).args(["48.2", "16.3"]);
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("cannot open database"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn cli_reports_single_peak() {
    let tmp = tempdir().expect("tempdir");
    write_database(
        tmp.path(),
        mountain_types(),
        &[peak(1, 47.7672, 15.8069, Some("Schneeberg"), Some(2076))],
    );

    let mut cmd = cargo_bin_cmd!("peaks");
    cmd.arg(tmp.path()).arg("48.2 16.3");
    let assert = cmd.assert().success();

    assert_eq!(
        stdout_of(&assert),
        "Found 1 peaks around 48.2 N 16.3 E:\n\
         \x20 Schneeberg \t(2076 m a.s.l.)\n\
         Highest peak around: Schneeberg (2076 m a.s.l.)\n"
    );
}

#[test]
fn cli_counts_all_but_lists_complete_peaks() {
    let tmp = tempdir().expect("tempdir");
    write_database(tmp.path(), mountain_types(), &vienna_nodes());

    let mut cmd = cargo_bin_cmd!("peaks");
    cmd.arg(tmp.path()).args(["48.2", "16.3"]);
    let assert = cmd.assert().success();
    let output = stdout_of(&assert);
    let lines: Vec<&str> = output.lines().collect();

    // 4 peaks in range, the unnamed one and Kahlenberg (no ele) are not listed
    assert_eq!(
        lines,
        vec![
            "Found 4 peaks around 48.2 N 16.3 E:",
            "  Schneeberg \t(2076 m a.s.l.)",
            "  Rax \t(2007 m a.s.l.)",
            "Highest peak around: Schneeberg (2076 m a.s.l.)",
        ]
    );
}

#[test]
fn cli_no_peak_found() {
    let tmp = tempdir().expect("tempdir");
    write_database(tmp.path(), mountain_types(), &vienna_nodes());

    let mut cmd = cargo_bin_cmd!("peaks");
    cmd.arg(tmp.path()).args(["-33.86", "151.2"]);
    cmd.assert()
        .success()
        .stdout("Found 0 peaks around 33.86 S 151.2 E:\nNo peak found\n");
}

#[test]
fn cli_radius_option() {
    let tmp = tempdir().expect("tempdir");
    write_database(tmp.path(), mountain_types(), &vienna_nodes());

    let mut cmd = cargo_bin_cmd!("peaks");
    cmd.args(["--radius", "400"]).arg(tmp.path()).arg("48.2,16.3");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Found 5 peaks"))
        .stdout(predicate::str::contains(
            "Highest peak around: Grossglockner (3798 m a.s.l.)",
        ));

    let mut cmd = cargo_bin_cmd!("peaks");
    cmd.args(["--radius", "20"]).arg(tmp.path()).arg("48.2 16.3");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Found 1 peaks"))
        .stdout(predicate::str::contains(
            "Highest peak around: Kahlenberg (? m a.s.l.)",
        ));
}

#[test]
fn cli_highest_without_name() {
    let tmp = tempdir().expect("tempdir");
    let nodes: Vec<TestNode> = vec![
        peak(1, 48.0, 16.0, None, Some(900)),
        peak(2, 48.1, 16.1, Some("Anninger"), Some(675)),
    ];
    write_database(tmp.path(), mountain_types(), &nodes);

    let mut cmd = cargo_bin_cmd!("peaks");
    cmd.arg(tmp.path()).args(["48.2", "16.3"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Found 2 peaks"))
        .stdout(predicate::str::contains("  Anninger \t(675 m a.s.l.)"))
        .stdout(predicate::str::contains(
            "Highest peak around: No name (900 m a.s.l.)",
        ));
}

#[test]
fn cli_database_without_peak_type_exits_one() {
    let tmp = tempdir().expect("tempdir");
    let types = TypeConfig::new(vec![TypeDefinition {
        name: "natural_spring".to_string(),
        conditions: vec![TagCondition::new("natural", Some("spring"))],
        features: vec![Feature::Name],
    }])
    .unwrap();
    write_database(tmp.path(), types, &[]);

    let mut cmd = cargo_bin_cmd!("peaks");
    cmd.arg(tmp.path()).args(["48.2", "16.3"]);
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("unknown type 'natural_peak'"));
}
