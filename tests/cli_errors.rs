mod common;

use common::{stderr, Workbook};

#[test]
fn missing_source_setting_is_fatal() {
    let wb = Workbook::new();

    let output = wb.command().arg("generate").output().unwrap();

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("missing required setting 'source.location'"), "stderr: {err}");
    assert!(err.contains("NBPORT_SOURCE"), "stderr: {err}");
}

#[test]
fn unreachable_source_is_fatal() {
    let wb = Workbook::new();

    let output = wb.run(&["generate"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("data source unavailable"));
    assert!(!wb.out_dir().exists());
}

#[test]
fn source_from_environment() {
    let wb = Workbook::with_sample_rows();

    let output = wb
        .command()
        .args(["check", "--task", "T1"])
        .env("NBPORT_SOURCE", wb.tracker())
        .env("NBPORT_PAYLOAD_DIR", wb.payloads())
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
}

#[test]
fn unknown_config_key_warns_with_suggestion() {
    let wb = Workbook::with_sample_rows();
    std::fs::write(wb.root().join("nbport.toml"), "[output]\nfoldr = \"x\"\n").unwrap();

    let output = wb.run(&["check", "--task", "T1"]);

    let err = stderr(&output);
    assert!(err.contains("unknown config key"), "stderr: {err}");
    assert!(err.contains("folder"), "stderr: {err}");
}

#[test]
fn missing_static_payload_is_fatal() {
    let wb = Workbook::with_sample_rows();
    std::fs::remove_file(wb.payloads().join("static/setup_cell.py")).unwrap();

    let output = wb.run(&["generate"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("setup_cell.py"));
    assert!(!wb.out_dir().exists());
}
