use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("tasklist-{nanos}-{file_name}"))
}

fn run_session_with_config(input: &str, config_path: &PathBuf) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_tasklist");

    let mut child = Command::new(exe)
        .env("TASKLIST_DISABLE_NOTIFICATIONS", "1")
        .env("TASKLIST_CONFIG_PATH", config_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn session");

    {
        let stdin = child.stdin.as_mut().expect("stdin");
        stdin
            .write_all(input.as_bytes())
            .expect("failed to write to stdin");
    }

    child.wait_with_output().expect("failed to read output")
}

fn run_session(input: &str) -> std::process::Output {
    run_session_with_config(input, &temp_path("no-config.json"))
}

fn json_array(stdout: &str) -> serde_json::Value {
    let line = stdout
        .lines()
        .find(|line| line.starts_with('['))
        .expect("no JSON array in output");
    serde_json::from_str(line).unwrap()
}

#[test]
fn session_help_shows_usage() {
    let output = run_session("help\nexit\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage") || stdout.contains("USAGE"));
}

#[test]
fn session_question_mark_shows_usage() {
    let output = run_session("?\nexit\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage") || stdout.contains("USAGE"));
}

#[test]
fn session_invalid_command_prints_error_and_continues() {
    let output = run_session("nope\nadd \"still works\"\nexit\n");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added task: still works"));
}

#[test]
fn session_empty_list_prints_hint() {
    let output = run_session("list\nexit\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No tasks yet. Add one to get started."));
}

#[test]
fn session_lists_newest_first() {
    let output = run_session("add \"Buy milk\"\nadd \"Walk dog\"\nlist --json\nexit\n");
    assert!(output.status.success());

    let tasks = json_array(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(tasks.as_array().unwrap().len(), 2);
    assert_eq!(tasks[0]["text"], "Walk dog");
    assert_eq!(tasks[1]["text"], "Buy milk");
    assert_eq!(tasks[0]["id"], "task-2");
    assert_eq!(tasks[1]["id"], "task-1");
}

#[test]
fn session_toggle_flips_and_restores() {
    let output = run_session("add \"Buy milk\"\ntoggle task-1\ntoggle task-1\nexit\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Completed task: Buy milk (task-1)"));
    assert!(stdout.contains("Reopened task: Buy milk (task-1)"));
}

#[test]
fn session_delete_removes_task_and_emits_toast() {
    let output = run_session("add \"Buy milk\"\ndelete task-1\nlist\nexit\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Deleted task: Buy milk (task-1)"));
    assert!(stdout.contains("No tasks yet."));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Task deleted - The task has been removed from your list."));
}

#[test]
fn session_missing_id_is_benign() {
    let output = run_session("add \"Buy milk\"\ndelete task-9\nlist --json\nexit\n");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: not_found"));

    let tasks = json_array(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(tasks.as_array().unwrap().len(), 1);
}

#[test]
fn session_end_to_end_milk_and_dog() {
    let output = run_session(
        "add \"Buy milk\"\nadd \"Walk dog\"\ntoggle task-1\ndelete task-2\nlist --json\nexit\n",
    );
    assert!(output.status.success());

    let tasks = json_array(&String::from_utf8_lossy(&output.stdout));
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["text"], "Buy milk");
    assert_eq!(tasks[0]["completed"], true);
}

#[test]
fn session_show_prints_task_fields() {
    let output = run_session("add \"Buy milk\" --desc \"2 liters\"\nshow task-1\nexit\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("text: Buy milk"));
    assert!(stdout.contains("description: 2 liters"));
    assert!(stdout.contains("completed: no"));
}

#[test]
fn session_expands_configured_aliases() {
    let config_path = temp_path("alias-config.json");
    std::fs::write(
        &config_path,
        serde_json::to_string(&serde_json::json!({ "aliases": { "ls": "list" } })).unwrap(),
    )
    .unwrap();

    let output = run_session_with_config("ls\nexit\n", &config_path);
    std::fs::remove_file(&config_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No tasks yet."));
}

#[test]
fn session_theme_override_colors_list() {
    let output = run_session("add \"Buy milk\"\nlist --config-override theme=noir\nexit\n");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\x1b[38;5;208m"));
}
