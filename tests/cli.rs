//! CLI integration tests — runs the built binary against the fixture menus.
//!
//! Run with: `cargo test --test cli`

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixture_menus() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/menus.json")
}

fn run(config_dir: &TempDir, args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_toc-outline");
    Command::new(bin)
        .arg("--menus")
        .arg(fixture_menus())
        .arg("--config-dir")
        .arg(config_dir.path())
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn navigate_prints_three_links() {
    let tmp = TempDir::new().unwrap();
    let out = run(
        &tmp,
        &[
            "navigate",
            "collection/interoperability",
            "/collection/interoperability/getting-started/first-steps",
        ],
    );
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Previous: Installation"));
    assert!(text.contains("Up: Getting started"));
    assert!(text.contains("Next: Reference"));
}

#[test]
fn navigate_unknown_container_fails() {
    let tmp = TempDir::new().unwrap();
    let out = run(&tmp, &["navigate", "collection/none", "/x"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("collection/none"));
}

#[test]
fn flatten_lists_reading_order() {
    let tmp = TempDir::new().unwrap();
    let out = run(&tmp, &["flatten", "ogmenu-12"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("001 Overview [placeholder]"));
    assert!(text.contains("[inaccessible]"));
    assert!(text.contains("Reading order"));
}

#[test]
fn render_uses_config_and_cache() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("outline.toml"),
        "[links]\nup_label = \"Contents\"\n",
    )
    .unwrap();
    let cache_dir = tmp.path().join("cache");
    let cache_arg = cache_dir.to_str().unwrap();
    let args = [
        "render",
        "collection/interoperability",
        "/collection/interoperability/reference/glossary",
        "--cache-dir",
        cache_arg,
    ];

    let first = run(&tmp, &args);
    assert!(first.status.success());
    assert!(stdout(&first).contains(r#"rel="up">Contents</a>"#));
    assert!(String::from_utf8_lossy(&first.stderr).contains("1 rendered"));

    let second = run(&tmp, &args);
    assert_eq!(stdout(&first), stdout(&second));
    assert!(String::from_utf8_lossy(&second.stderr).contains("1 cached"));

    let invalidate = run(
        &tmp,
        &["invalidate", "ogmenu_instance:12", "--cache-dir", cache_arg],
    );
    assert!(stdout(&invalidate).contains("Invalidated 1 cached renders"));
}

#[test]
fn check_reports_orphan_container() {
    let tmp = TempDir::new().unwrap();
    let out = run(&tmp, &["check"]);
    assert!(!out.status.success());
    assert!(stdout(&out).contains("solution/orphan: menu 'ogmenu-99' does not exist"));
}

#[test]
fn gen_config_parses_back() {
    let tmp = TempDir::new().unwrap();
    let out = run(&tmp, &["gen-config"]);
    assert!(out.status.success());
    std::fs::write(tmp.path().join("outline.toml"), &out.stdout).unwrap();
    let again = run(&tmp, &["flatten", "ogmenu-12"]);
    assert!(again.status.success());
}
