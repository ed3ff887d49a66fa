#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn kanban(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kanban").unwrap();
    cmd.current_dir(dir.path()).env("KANBAN_ROOT", dir.path());
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) {
    std::fs::write(dir.path().join(name), content).unwrap();
}

fn read_tasks(dir: &TempDir) -> serde_json::Value {
    let raw = std::fs::read_to_string(dir.path().join("tasks.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

const SAMPLE: &str = r##"{
  "backlog": [{"id": "a", "descricao": "Alpha", "milestone": "m1"}],
  "todo": [],
  "doing": [{"id": "b", "descricao": "Beta",
             "timeline": [{"timestamp": "2026-10-20T10:00:00.000Z", "coluna": "doing"}]}],
  "done": [{"id": "c", "descricao": "Gamma",
            "timeline": [{"timestamp": "2026-10-18T09:00:00.000Z", "coluna": "todo"},
                         {"timestamp": "2026-10-19T12:00:00.000Z", "coluna": "done"}]}]
}"##;

const CATALOG: &str = r##"[{"id": "m1", "titulo": "First release", "cor": "#ff0000"}]"##;

// ---------------------------------------------------------------------------
// kanban board
// ---------------------------------------------------------------------------

#[test]
fn board_on_empty_directory_reports_no_tasks() {
    let dir = TempDir::new().unwrap();
    kanban(&dir)
        .arg("board")
        .assert()
        .success()
        .stdout(predicate::str::contains("backlog 0, todo 0, doing 0, done 0"))
        .stdout(predicate::str::contains("No tasks."));
}

#[test]
fn board_json_has_placeholders_for_missing_documents() {
    let dir = TempDir::new().unwrap();
    write(&dir, "tasks.json", SAMPLE);

    let json = json_stdout(kanban(&dir).args(["board", "--json"]));
    assert_eq!(json["tasks"]["backlog"][0]["id"], "a");
    assert_eq!(json["tasks"]["done"].as_array().unwrap().len(), 1);
    assert_eq!(
        json["status"],
        "# Status\n\n_(file not found: status.md)_\n"
    );
    assert!(json["llmGuide"]
        .as_str()
        .unwrap()
        .contains("file not found: llm-guide.md"));
    assert!(json.get("projectPath").is_some());
}

#[test]
fn board_fails_when_root_is_missing() {
    let dir = TempDir::new().unwrap();
    Command::cargo_bin("kanban")
        .unwrap()
        .env("KANBAN_ROOT", dir.path().join("nope"))
        .arg("board")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// ---------------------------------------------------------------------------
// kanban task
// ---------------------------------------------------------------------------

#[test]
fn task_add_creates_tasks_json() {
    let dir = TempDir::new().unwrap();
    kanban(&dir)
        .args(["task", "add", "Write", "the", "docs", "--id", "t1", "--column", "todo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added task [t1] to todo"));

    let tasks = read_tasks(&dir);
    assert_eq!(tasks["todo"][0]["id"], "t1");
    assert_eq!(tasks["todo"][0]["descricao"], "Write the docs");
    assert_eq!(tasks["todo"][0]["timeline"][0]["coluna"], "todo");
    assert_eq!(tasks["backlog"], serde_json::json!([]));
}

#[test]
fn task_add_writes_pretty_json() {
    let dir = TempDir::new().unwrap();
    kanban(&dir)
        .args(["task", "add", "Pretty", "--id", "p"])
        .assert()
        .success();
    let raw = std::fs::read_to_string(dir.path().join("tasks.json")).unwrap();
    assert!(raw.starts_with("{\n  \"backlog\": ["));
}

#[test]
fn task_add_rejects_unknown_column() {
    let dir = TempDir::new().unwrap();
    kanban(&dir)
        .args(["task", "add", "Nope", "--column", "later"])
        .assert()
        .failure();
    assert!(!dir.path().join("tasks.json").exists());
}

#[test]
fn task_move_records_transition() {
    let dir = TempDir::new().unwrap();
    write(&dir, "tasks.json", SAMPLE);

    kanban(&dir)
        .args(["task", "move", "a", "doing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved task [a] to doing"));

    let tasks = read_tasks(&dir);
    assert_eq!(tasks["backlog"], serde_json::json!([]));
    let doing = tasks["doing"].as_array().unwrap();
    assert_eq!(doing.len(), 2);
    assert_eq!(doing[1]["id"], "a");
    assert_eq!(doing[1]["timeline"][0]["coluna"], "doing");
}

#[test]
fn task_move_with_position_inserts_at_index() {
    let dir = TempDir::new().unwrap();
    write(&dir, "tasks.json", SAMPLE);

    kanban(&dir)
        .args(["task", "move", "a", "doing", "--position", "0"])
        .assert()
        .success();
    let tasks = read_tasks(&dir);
    assert_eq!(tasks["doing"][0]["id"], "a");
    assert_eq!(tasks["doing"][1]["id"], "b");
}

#[test]
fn task_move_keeps_tasks_with_unexpected_shapes() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "tasks.json",
        r#"{
  "backlog": [{"id": "a", "descricao": "Alpha"}],
  "todo": [
    {"id": 42, "descricao": "Numeric", "prioridade": "alta"},
    {"id": "w", "descricao": "Odd event", "timeline": [{"timestamp": "2026-01-01T00:00:00Z", "coluna": "review"}]},
    {"id": "t", "descricao": "Typed", "todos": "none", "milestone": 7}
  ],
  "doing": [],
  "done": []
}"#,
    );
    let before = read_tasks(&dir)["todo"].clone();

    kanban(&dir).args(["task", "move", "a", "doing"]).assert().success();

    let tasks = read_tasks(&dir);
    assert_eq!(tasks["todo"], before);
    assert_eq!(tasks["doing"][0]["id"], "a");
}

#[test]
fn task_move_unknown_id_fails() {
    let dir = TempDir::new().unwrap();
    write(&dir, "tasks.json", SAMPLE);
    kanban(&dir)
        .args(["task", "move", "zzz", "done"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("zzz"));
}

#[test]
fn task_delete_removes_task() {
    let dir = TempDir::new().unwrap();
    write(&dir, "tasks.json", SAMPLE);
    kanban(&dir).args(["task", "delete", "b"]).assert().success();
    assert_eq!(read_tasks(&dir)["doing"], serde_json::json!([]));
}

#[test]
fn task_list_filters_by_column() {
    let dir = TempDir::new().unwrap();
    write(&dir, "tasks.json", SAMPLE);
    kanban(&dir)
        .args(["task", "list", "--column", "done"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Gamma"))
        .stdout(predicate::str::contains("Alpha").not());
}

#[test]
fn task_list_json_keeps_board_order() {
    let dir = TempDir::new().unwrap();
    write(&dir, "tasks.json", SAMPLE);
    let json = json_stdout(kanban(&dir).args(["task", "list", "--json"]));
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["task"]["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["a", "b", "c"]);
}

#[test]
fn task_list_drops_invalid_entries() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "tasks.json",
        r#"{"backlog": [{"id": "ok", "descricao": "Fine"}, {"id": "", "descricao": "x"}, null]}"#,
    );
    let json = json_stdout(kanban(&dir).args(["task", "list", "--json"]));
    assert_eq!(json.as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// kanban status
// ---------------------------------------------------------------------------

#[test]
fn status_set_then_show() {
    let dir = TempDir::new().unwrap();
    kanban(&dir)
        .args(["status", "set", "# Sprint 4\n\nAll green."])
        .assert()
        .success();
    assert_eq!(
        std::fs::read_to_string(dir.path().join("status.md")).unwrap(),
        "# Sprint 4\n\nAll green."
    );
    kanban(&dir)
        .args(["status", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All green."));
}

#[test]
fn status_set_reads_stdin() {
    let dir = TempDir::new().unwrap();
    kanban(&dir)
        .args(["status", "set"])
        .write_stdin("from stdin\n")
        .assert()
        .success();
    assert_eq!(
        std::fs::read_to_string(dir.path().join("status.md")).unwrap(),
        "from stdin\n"
    );
}

#[test]
fn status_set_accepts_empty_content() {
    let dir = TempDir::new().unwrap();
    kanban(&dir).args(["status", "set", ""]).assert().success();
    assert_eq!(
        std::fs::read_to_string(dir.path().join("status.md")).unwrap(),
        ""
    );
}

#[test]
fn status_show_missing_file_prints_placeholder() {
    let dir = TempDir::new().unwrap();
    kanban(&dir)
        .args(["status", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_(file not found: status.md)_"));
}

// ---------------------------------------------------------------------------
// kanban timeline
// ---------------------------------------------------------------------------

#[test]
fn timeline_json_groups_newest_first() {
    let dir = TempDir::new().unwrap();
    write(&dir, "tasks.json", SAMPLE);
    write(&dir, ".kanban.yaml", "timeline:\n  utc_offset: \"+00:00\"\n");

    let json = json_stdout(kanban(&dir).args(["timeline", "--json"]));
    assert_eq!(json["period"], "all");
    let dates: Vec<&str> = json["groups"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, ["2026-10-20", "2026-10-19", "2026-10-18"]);
    assert_eq!(json["groups"][0]["entries"][0]["taskId"], "b");
    assert!(json["groups"][0]["entries"][0].get("milestone").is_none());
}

#[test]
fn timeline_column_filter() {
    let dir = TempDir::new().unwrap();
    write(&dir, "tasks.json", SAMPLE);
    write(&dir, ".kanban.yaml", "timeline:\n  utc_offset: \"+00:00\"\n");

    let json = json_stdout(kanban(&dir).args(["timeline", "--column", "done", "--json"]));
    let groups = json["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["entries"][0]["taskId"], "c");
    assert_eq!(groups[0]["entries"][0]["coluna"], "done");
}

#[test]
fn timeline_rejects_unknown_period() {
    let dir = TempDir::new().unwrap();
    kanban(&dir)
        .args(["timeline", "--period", "decade"])
        .assert()
        .failure();
}

#[test]
fn timeline_empty_board_says_so() {
    let dir = TempDir::new().unwrap();
    kanban(&dir)
        .arg("timeline")
        .assert()
        .success()
        .stdout(predicate::str::contains("No activity"));
}

// ---------------------------------------------------------------------------
// kanban milestone
// ---------------------------------------------------------------------------

#[test]
fn milestone_list_counts_tasks() {
    let dir = TempDir::new().unwrap();
    write(&dir, "tasks.json", SAMPLE);
    write(&dir, "milestones.json", CATALOG);
    kanban(&dir)
        .args(["milestone", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("First release"))
        .stdout(predicate::str::contains("#ff0000"));
}

#[test]
fn milestone_list_uses_configured_file() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("plan")).unwrap();
    write(&dir, "plan/ms.json", CATALOG);
    write(&dir, ".kanban.yaml", "milestones_file: plan/ms.json\n");

    let json = json_stdout(kanban(&dir).args(["milestone", "list", "--json"]));
    assert_eq!(json[0]["id"], "m1");
}

#[test]
fn milestone_info_lists_member_tasks() {
    let dir = TempDir::new().unwrap();
    write(&dir, "tasks.json", SAMPLE);
    write(&dir, "milestones.json", CATALOG);
    let json = json_stdout(kanban(&dir).args(["milestone", "info", "m1", "--json"]));
    assert_eq!(json["milestone"]["titulo"], "First release");
    assert_eq!(json["tasks"][0]["id"], "a");
}

#[test]
fn milestone_info_unknown_id_fails() {
    let dir = TempDir::new().unwrap();
    write(&dir, "milestones.json", CATALOG);
    kanban(&dir)
        .args(["milestone", "info", "m9"])
        .assert()
        .failure();
}
