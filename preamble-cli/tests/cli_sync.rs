use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use filetime::{set_file_mtime, FileTime};
use predicates::str::contains;
use tempfile::TempDir;

const SENTINEL: &str = "# The above is automatically generated  - DO NOT TOUCH ABOVE THIS LINE.";

// 2023-11-14 12:00:00 UTC.
const T: i64 = 1_699_963_200;

fn preamble_cmd(cwd: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("preamble"));
    cmd.current_dir(cwd).env_remove("RUST_LOG");
    cmd
}

fn source_tree() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir_all(dir.path().join("pkg")).expect("mkdir");
    fs::write(dir.path().join("pkg/model.py"), "class Model:\n    pass\n").expect("write");
    fs::write(dir.path().join("pkg/__init__.py"), "").expect("write");
    fs::write(dir.path().join("README.md"), "# readme\n").expect("write");
    for name in ["pkg/model.py", "pkg/__init__.py"] {
        set_file_mtime(dir.path().join(name), FileTime::from_unix_time(T, 0)).expect("mtime");
    }
    dir
}

#[test]
fn sync_inserts_preamble_and_keeps_backup() {
    let dir = source_tree();

    preamble_cmd(dir.path())
        .args(["sync", "."])
        .assert()
        .success()
        .stdout(contains("model.py (inserted)"))
        .stdout(contains("1 inserted"));

    let model = dir.path().join("pkg/model.py");
    let text = fs::read_to_string(&model).expect("read");
    assert!(text.starts_with(&"#".repeat(80)));
    assert!(text.contains(SENTINEL));
    assert!(text.contains("#     SFL Scientific\n"));
    assert!(text.ends_with("class Model:\n    pass\n"));

    assert!(dir.path().join("pkg/model.py.~backup~").exists());
    assert!(!dir.path().join("pkg/model.py.~temp~").exists());
    assert_eq!(
        fs::read_to_string(dir.path().join("pkg/__init__.py")).unwrap(),
        "",
        "package markers are excluded by default"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("README.md")).unwrap(),
        "# readme\n"
    );
}

#[test]
fn second_sync_reports_current() {
    let dir = source_tree();
    preamble_cmd(dir.path()).args(["sync", "."]).assert().success();
    let first = fs::read(dir.path().join("pkg/model.py")).unwrap();

    preamble_cmd(dir.path())
        .args(["sync", "pkg/**/*.py"])
        .assert()
        .success()
        .stdout(contains("model.py (current)"));
    assert_eq!(fs::read(dir.path().join("pkg/model.py")).unwrap(), first);
}

#[test]
fn dry_run_reports_and_writes_nothing() {
    let dir = source_tree();

    preamble_cmd(dir.path())
        .args(["sync", ".", "--dry-run"])
        .assert()
        .success()
        .stdout(contains("[dry-run]"))
        .stdout(contains("model.py (inserted)"));

    assert_eq!(
        fs::read_to_string(dir.path().join("pkg/model.py")).unwrap(),
        "class Model:\n    pass\n"
    );
    assert!(!dir.path().join("pkg/model.py.~backup~").exists());
}

#[test]
fn no_insert_skips_bare_files() {
    let dir = source_tree();

    preamble_cmd(dir.path())
        .args(["sync", ".", "--no-insert"])
        .assert()
        .success()
        .stdout(contains("model.py (skipped)"));
    assert_eq!(
        fs::read_to_string(dir.path().join("pkg/model.py")).unwrap(),
        "class Model:\n    pass\n"
    );
}

#[test]
fn label_and_filters_come_from_config_file() {
    let dir = source_tree();
    fs::write(
        dir.path().join(".preamble.yaml"),
        "label: Acme Labs\ninclude: [\".md\"]\nexclude: []\n",
    )
    .unwrap();

    preamble_cmd(dir.path())
        .args(["sync", "."])
        .assert()
        .success()
        .stdout(contains("README.md (inserted)"));

    let readme = fs::read_to_string(dir.path().join("README.md")).unwrap();
    assert!(readme.contains("#     Acme Labs\n"));
    assert!(readme.ends_with("# readme\n"));
    assert_eq!(
        fs::read_to_string(dir.path().join("pkg/model.py")).unwrap(),
        "class Model:\n    pass\n"
    );
}

#[test]
fn broken_config_fails_with_path() {
    let dir = source_tree();
    let cfg = dir.path().join("bad.yaml");
    fs::write(&cfg, "insert_missing: [").unwrap();

    preamble_cmd(dir.path())
        .args(["sync", ".", "--config"])
        .arg(&cfg)
        .assert()
        .failure()
        .stderr(contains("bad.yaml"));
}

#[test]
fn invalid_pattern_fails() {
    let dir = source_tree();
    preamble_cmd(dir.path())
        .args(["sync", "pkg/[oops"])
        .assert()
        .failure()
        .stderr(contains("invalid path pattern"));
}

#[test]
fn strict_mode_fails_on_unreadable_file() {
    let dir = source_tree();
    fs::write(dir.path().join("pkg/blob.py"), [0xffu8, 0xfe, 0x00]).unwrap();

    preamble_cmd(dir.path())
        .args(["sync", "."])
        .assert()
        .success()
        .stdout(contains("1 failed"));

    preamble_cmd(dir.path())
        .args(["sync", ".", "--strict"])
        .assert()
        .failure()
        .stderr(contains("1 file(s) failed"));
}

#[test]
fn diff_shows_inserted_preamble_lines() {
    let dir = source_tree();

    let assert = preamble_cmd(dir.path())
        .args(["diff", "."])
        .assert()
        .success()
        .stdout(contains("--- a/"))
        .stdout(contains("+++ b/"));
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    assert!(
        stdout
            .lines()
            .any(|line| line.starts_with('+') && line.contains(SENTINEL)),
        "expected the sentinel as an added line"
    );

    preamble_cmd(dir.path()).args(["sync", "."]).assert().success();
    preamble_cmd(dir.path())
        .args(["diff", "."])
        .assert()
        .success()
        .stdout(contains("No differences"));
}

#[test]
fn status_json_tracks_missing_then_current() {
    let dir = source_tree();

    let before = preamble_cmd(dir.path())
        .args(["status", ".", "--json"])
        .assert()
        .success();
    let json: serde_json::Value =
        serde_json::from_slice(&before.get_output().stdout).expect("json");
    assert_eq!(json["summary"]["files"], 1);
    assert_eq!(json["files"][0]["status"], "missing");

    preamble_cmd(dir.path()).args(["sync", "."]).assert().success();

    let after = preamble_cmd(dir.path())
        .args(["status", ".", "--json"])
        .assert()
        .success();
    let json: serde_json::Value =
        serde_json::from_slice(&after.get_output().stdout).expect("json");
    assert_eq!(json["files"][0]["status"], "current");
    assert_eq!(json["summary"]["needs_sync"], 0);
}

#[test]
#[cfg(unix)]
fn shebang_stays_on_first_line() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("run.py");
    fs::write(&script, "#!/usr/bin/env python3\nprint('hi')\n").unwrap();

    preamble_cmd(dir.path()).args(["sync", "."]).assert().success();

    let text = fs::read_to_string(&script).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("#!/usr/bin/env python3"));
    assert_eq!(lines.next(), Some("#".repeat(80).as_str()));
    assert!(text.ends_with("print('hi')\n"));
}
