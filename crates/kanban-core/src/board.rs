//! File store for a project directory.
//!
//! A board is four flat files. Reads are lenient per file: anything missing
//! or unreadable is replaced by a placeholder so the other files still load.
//! Writes are strict and touch exactly one file each.

use crate::error::{KanbanError, Result};
use crate::io::{atomic_write, read_optional};
use crate::paths;
use crate::task::{parse_tasks, to_json_pretty, TaskList};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything the UI needs to render one project, read fresh per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardData {
    pub status: String,
    pub tasks: TaskList,
    pub llm_guide: String,
    pub projeto_context: String,
    pub project_path: String,
}

pub fn placeholder(title: &str, file_name: &str) -> String {
    format!("# {title}\n\n_(file not found: {file_name})_\n")
}

pub fn load_board(project: &Path) -> Result<BoardData> {
    let meta = std::fs::metadata(project)?;
    if !meta.is_dir() {
        return Err(KanbanError::NotADirectory(project.to_path_buf()));
    }

    let status = read_or_placeholder(&paths::status_path(project), "Status");
    let llm_guide = read_or_placeholder(&paths::llm_guide_path(project), "LLM Guide");
    let projeto_context =
        read_or_placeholder(&paths::projeto_context_path(project), "Project Context");
    let tasks = load_tasks(project);

    Ok(BoardData {
        status,
        tasks,
        llm_guide,
        projeto_context,
        project_path: project.to_string_lossy().into_owned(),
    })
}

/// Read tasks.json leniently: missing or corrupt means an empty board.
pub fn load_tasks(project: &Path) -> TaskList {
    match read_optional(&paths::tasks_path(project)) {
        Some(raw) => parse_tasks(&raw),
        None => TaskList::default(),
    }
}

fn read_or_placeholder(path: &Path, title: &str) -> String {
    read_optional(path).unwrap_or_else(|| {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        tracing::debug!(path = %path.display(), "using placeholder");
        placeholder(title, &file_name)
    })
}

pub fn save_tasks(project: &Path, tasks: &TaskList) -> Result<()> {
    let data = to_json_pretty(tasks)?;
    atomic_write(&paths::tasks_path(project), data.as_bytes())?;
    tracing::debug!(project = %project.display(), count = tasks.len(), "saved tasks.json");
    Ok(())
}

pub fn save_status(project: &Path, content: &str) -> Result<()> {
    atomic_write(&paths::status_path(project), content.as_bytes())?;
    tracing::debug!(project = %project.display(), bytes = content.len(), "saved status.md");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
