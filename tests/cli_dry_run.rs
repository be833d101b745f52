use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::{TempDir, tempdir};

fn sessionup_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_sessionup"))
}

/// A scratch dir holding a config without progress pauses.
fn workspace() -> TempDir {
    let dir = tempdir().expect("tempdir");
    fs::write(
        dir.path().join("config.toml"),
        "[defaults]\nprogress_ticks = 0\n",
    )
    .expect("write config");
    dir
}

fn write_template(dir: &Path, json: &str) -> PathBuf {
    let path = dir.join("sessions.json");
    fs::write(&path, json).expect("write template");
    path
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(sessionup_bin())
        .arg("--config")
        .arg(dir.join("config.toml"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run sessionup")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

fn tmux_lines(output: &Output) -> Vec<String> {
    stdout_lines(output)
        .into_iter()
        .filter(|line| line.starts_with("tmux "))
        .collect()
}

#[test]
fn dry_run_single_session_prints_layout_commands() {
    let dir = workspace();
    let output = run(dir.path(), &["-n", "demo", "-p", "/tmp/x", "--dry-run"]);
    assert!(output.status.success());

    let commands = tmux_lines(&output);
    assert_eq!(commands.first().unwrap(), "tmux list-sessions -F #{session_name}");
    assert_eq!(commands[1], "tmux new-session -d -s demo");
    assert_eq!(commands.last().unwrap(), "tmux select-window -t =demo:code");
    assert_eq!(
        commands.iter().filter(|c| c.contains("new-window")).count(),
        2
    );

    let lines = stdout_lines(&output);
    assert!(lines.contains(&"Creating TMUX session 'demo'".to_string()));
    assert_eq!(lines.last().unwrap(), "Successfully created session 'demo'.");
}

#[test]
fn template_sessions_are_processed_in_order() {
    let dir = workspace();
    let template = write_template(
        dir.path(),
        r#"[{"demo": "/tmp/x"}, {"web": "/tmp/y"}, {"demo": "/tmp/z"}]"#,
    );
    let output = run(dir.path(), &["-t", template.to_str().unwrap(), "--dry-run"]);
    assert!(output.status.success());

    let commands = tmux_lines(&output);
    let last_demo = commands
        .iter()
        .rposition(|c| c.contains("=demo"))
        .expect("demo commands");
    let first_web = commands
        .iter()
        .position(|c| c.contains("web"))
        .expect("web commands");
    assert!(last_demo < first_web);
    assert_eq!(
        commands.iter().filter(|c| c.contains("new-session")).count(),
        2
    );

    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("Successfully created session 'demo'."));
    assert!(text.contains("Successfully created session 'web'."));
    assert!(text.ends_with("A TMUX session named 'demo' already exists.\n"));
}

#[test]
fn malformed_template_dispatches_nothing() {
    let dir = workspace();
    let template = write_template(dir.path(), r#"[{"demo": "/tmp/x"}"#);
    let output = run(dir.path(), &["-t", template.to_str().unwrap(), "--dry-run"]);

    assert!(!output.status.success());
    assert!(tmux_lines(&output).is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Error reading JSON file"), "stderr: {stderr}");
}

#[test]
fn missing_template_is_reported() {
    let dir = workspace();
    let missing = dir.path().join("nope.json");
    let output = run(dir.path(), &["-t", missing.to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Template file not found"), "stderr: {stderr}");
}

#[test]
fn incomplete_flags_print_usage() {
    let dir = workspace();
    for args in [&["-n", "demo"][..], &[][..]] {
        let output = run(dir.path(), args);
        assert!(output.status.success());
        let text = String::from_utf8_lossy(&output.stdout);
        assert!(text.contains("--template"));
        assert!(text.contains("--name"));
        assert!(!text.contains("tmux new-session"));
    }
}
