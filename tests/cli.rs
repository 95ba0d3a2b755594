//! End-to-end tests against the built `colourcat` binary.

use std::io::{Read, Write};
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn colourcat(args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_colourcat"));
    cmd.arg("--no-config")
        .args(args)
        .env_remove("COLOURCAT_THEME")
        .env_remove("COLOURCAT_COLOR")
        .env_remove("NO_COLOR")
        .env_remove("RUST_LOG")
        .env("COLORTERM", "truecolor");
    cmd
}

fn run(args: &[&str]) -> Output {
    colourcat(args).output().unwrap()
}

fn write(dir: &Path, name: &str, content: &[u8]) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_owned()
}

const PYTHON: &str = "import sys\n\ndef main():\n    print(sys.argv)\n";

#[test]
fn test_python_file_prints_and_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "hello.py", PYTHON.as_bytes());

    let out = run(&[&file]);
    assert!(out.status.success());
    assert!(!out.stdout.is_empty());
}

#[test]
fn test_nonexistent_path_fails() {
    let out = run(&["/definitely/not/here.py"]);
    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("No such file or directory"), "{stderr}");
}

#[test]
fn test_color_always_emits_escapes_with_resets() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "hello.py", PYTHON.as_bytes());

    let out = run(&["--color", "always", &file]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("\x1b[38;2;"));
    for line in stdout.lines() {
        assert!(line.ends_with("\x1b[0m"), "{line:?}");
    }
}

#[test]
fn test_plain_output_is_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "hello.py", PYTHON.as_bytes());

    let out = run(&["--color", "always", "--plain", &file]);
    assert!(out.status.success());
    assert_eq!(out.stdout, PYTHON.as_bytes());
}

#[test]
fn test_piped_output_is_plain_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "hello.py", PYTHON.as_bytes());

    let out = run(&[&file]);
    assert_eq!(out.stdout, PYTHON.as_bytes());
}

#[test]
fn test_later_files_still_printed_after_failure() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "a.txt", b"second\n");
    let missing = dir.path().join("missing.txt");

    let out = run(&[missing.to_str().unwrap(), &file]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(out.stdout, b"second\n");
}

#[test]
fn test_stdin() {
    let mut child = colourcat(&["--color", "always", "-l", "python"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(PYTHON.as_bytes())
        .unwrap();
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("\x1b["));
}

#[test]
fn test_binary_refused_without_flag() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "blob.bin", b"\x00\x01\x02binary");

    let out = run(&[&file]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("binary"));

    let out = run(&["--binary", &file]);
    assert!(out.status.success());
    assert_eq!(out.stdout, b"\x00\x01\x02binary");
}

#[test]
fn test_detect_reports_python() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "hello.py", PYTHON.as_bytes());

    let out = run(&["--detect", "--json", &file]);
    assert!(out.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(rows[0]["syntax"], "Python");
    assert_eq!(rows[0]["method"], "extension");
    assert_eq!(rows[0]["binary"], false);
}

#[test]
fn test_unknown_language_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "hello.py", PYTHON.as_bytes());

    let out = run(&["--language", "zzqqxx", &file]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_unknown_theme_json_envelope() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "hello.py", PYTHON.as_bytes());

    let out = run(&["--color", "always", "--theme", "zzqqxx", "--json", &file]);
    assert_eq!(out.status.code(), Some(2));
    let err: serde_json::Value = serde_json::from_slice(&out.stderr).unwrap();
    assert_eq!(err["ok"], false);
    assert_eq!(err["error"]["code"], "unknown_theme");
}

#[test]
fn test_list_languages_filtered() {
    let out = run(&["--output", "id", "--list-languages=python"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.lines().next(), Some("Python"));
}

#[test]
fn test_list_themes_marks_default_active() {
    let out = run(&["--json", "--list-themes"]);
    assert!(out.status.success());
    let themes: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let active: Vec<&str> = themes
        .as_array()
        .unwrap()
        .iter()
        .filter(|t| t["active"] == true)
        .filter_map(|t| t["name"].as_str())
        .collect();
    assert_eq!(active, ["base16-ocean.dark"]);
}

#[test]
fn test_config_file_sets_line_numbers() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "config.toml", b"number = true\n");
    let file = write(dir.path(), "a.txt", b"x\ny\n");

    let out = Command::new(env!("CARGO_BIN_EXE_colourcat"))
        .args(["--config", &config, &file])
        .env_remove("NO_COLOR")
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(out.stdout, b"     1  x\n     2  y\n");
}

#[test]
fn test_config_mapping_selects_language() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "config.toml", b"[mappings]\n\"*.tpl\" = \"HTML\"\n");
    let file = write(dir.path(), "page.tpl", b"<p>{{ name }}</p>\n");

    let out = Command::new(env!("CARGO_BIN_EXE_colourcat"))
        .args(["--config", &config, "--detect", "--json", &file])
        .env_remove("COLOURCAT_THEME")
        .env_remove("COLOURCAT_COLOR")
        .output()
        .unwrap();
    assert!(out.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(rows[0]["syntax"], "HTML");
    assert_eq!(rows[0]["method"], "mapping");
}

#[test]
fn test_no_color_leaves_explicit_choice_alone() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "hello.py", PYTHON.as_bytes());

    let out = colourcat(&[&file])
        .env("NO_COLOR", "1")
        .env("COLOURCAT_COLOR", "auto")
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(out.stdout, PYTHON.as_bytes());

    let out = colourcat(&["--color", "always", &file])
        .env("NO_COLOR", "1")
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("\x1b[38;2;"));
}

#[test]
fn test_env_color_and_theme() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "hello.py", PYTHON.as_bytes());

    let out = colourcat(&[&file])
        .env("COLOURCAT_COLOR", "always")
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("\x1b[38;2;"));

    let out = colourcat(&[&file])
        .env("COLOURCAT_COLOR", "always")
        .env("COLOURCAT_THEME", "zzqqxx")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
    assert!(out.stdout.is_empty());

    // the command line beats the environment
    let out = colourcat(&["--color", "never", &file])
        .env("COLOURCAT_COLOR", "always")
        .env("COLOURCAT_THEME", "zzqqxx")
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(out.stdout, PYTHON.as_bytes());
}

#[test]
fn test_mixed_failures_exit_with_last_status() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.py");
    let blob = write(dir.path(), "blob.bin", b"\x00\x01\x02binary");
    let file = write(dir.path(), "a.txt", b"last\n");

    let out = run(&[missing.to_str().unwrap(), &blob, &file]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(out.stdout, b"last\n");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("missing.py"), "{stderr}");
    assert!(stderr.contains("binary"), "{stderr}");
}

#[test]
fn test_text_with_magic_prefix_prints() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "notes.txt", b"BMW owners guide\n");

    let out = run(&[&file]);
    assert!(out.status.success());
    assert_eq!(out.stdout, b"BMW owners guide\n");
}

#[test]
fn test_broken_pipe_exits_quietly() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "big.py", PYTHON.repeat(20_000).as_bytes());

    let mut child = colourcat(&["--color", "always", &file])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    let mut head = [0u8; 256];
    child.stdout.take().unwrap().read_exact(&mut head).unwrap();

    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());
    assert!(out.stderr.is_empty(), "{}", String::from_utf8_lossy(&out.stderr));
}
