//! Explicit board state container.
//!
//! `BoardState` owns one project's `TaskList`. Views read through
//! [`BoardState::tasks`] and every mutation goes through
//! [`BoardState::dispatch`] with an [`Action`].

use crate::board;
use crate::error::{KanbanError, Result};
use crate::task::{Column, Task, TaskList};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub type Clock = fn() -> DateTime<Utc>;

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Append `task` to `column`. A task with no recorded transitions gets
    /// one for `column`.
    AddTask { task: Task, column: Column },
    /// Move a task to `to` at `index` (clamped; end of column when absent).
    MoveTask {
        id: String,
        to: Column,
        #[serde(default)]
        index: Option<usize>,
    },
    /// Edit fields in place. An empty `detalhes` or `milestone` clears it.
    UpdateTask {
        id: String,
        #[serde(default)]
        descricao: Option<String>,
        #[serde(default)]
        detalhes: Option<String>,
        #[serde(default)]
        milestone: Option<String>,
    },
    DeleteTask {
        id: String,
    },
    ToggleTodo {
        id: String,
        index: usize,
    },
    ReplaceTasks {
        tasks: TaskList,
    },
}

// ---------------------------------------------------------------------------
// BoardState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct BoardState {
    tasks: TaskList,
    clock: Clock,
}

impl BoardState {
    pub fn new(mut tasks: TaskList) -> Self {
        tasks.retain_valid();
        Self {
            tasks,
            clock: Utc::now,
        }
    }

    pub fn with_clock(tasks: TaskList, clock: Clock) -> Self {
        Self {
            clock,
            ..Self::new(tasks)
        }
    }

    pub fn load(project: &Path) -> Self {
        Self::new(board::load_tasks(project))
    }

    pub fn save(&self, project: &Path) -> Result<()> {
        board::save_tasks(project, &self.tasks)
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    fn now_stamp(&self) -> String {
        (self.clock)().to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        match action {
            Action::AddTask { mut task, column } => {
                if !task.is_valid() {
                    return Err(KanbanError::InvalidField {
                        field: "task",
                        reason: "id and descricao must not be empty".into(),
                    });
                }
                if task.timeline_events().next().is_none() {
                    task.push_event(self.now_stamp(), column);
                }
                self.tasks.column_mut(column).push(task);
            }
            Action::MoveTask { id, to, index } => {
                let (from, pos) = self.position(&id)?;
                let mut task = self.tasks.column_mut(from).remove(pos);
                if from != to {
                    task.push_event(self.now_stamp(), to);
                }
                let target = self.tasks.column_mut(to);
                let at = index.unwrap_or(target.len()).min(target.len());
                target.insert(at, task);
            }
            Action::UpdateTask {
                id,
                descricao,
                detalhes,
                milestone,
            } => {
                if descricao.as_deref() == Some("") {
                    return Err(KanbanError::InvalidField {
                        field: "descricao",
                        reason: "must not be empty".into(),
                    });
                }
                let task = self.find_mut(&id)?;
                if let Some(d) = descricao {
                    task.set_descricao(d);
                }
                if let Some(d) = detalhes {
                    task.set_detalhes(Some(d).filter(|d| !d.is_empty()));
                }
                if let Some(m) = milestone {
                    task.set_milestone(Some(m).filter(|m| !m.is_empty()));
                }
            }
            Action::DeleteTask { id } => {
                let (column, pos) = self.position(&id)?;
                self.tasks.column_mut(column).remove(pos);
            }
            Action::ToggleTodo { id, index } => {
                if !self.find_mut(&id)?.toggle_todo(index) {
                    return Err(KanbanError::InvalidField {
                        field: "index",
                        reason: format!("task '{id}' has no checklist item {index}"),
                    });
                }
            }
            Action::ReplaceTasks { mut tasks } => {
                tasks.retain_valid();
                self.tasks = tasks;
            }
        }
        Ok(())
    }

    /// Column and index of the first task with `id`, in board order.
    fn position(&self, id: &str) -> Result<(Column, usize)> {
        Column::all()
            .iter()
            .find_map(|&c| {
                self.tasks
                    .column(c)
                    .iter()
                    .position(|t| t.has_id(id))
                    .map(|i| (c, i))
            })
            .ok_or_else(|| KanbanError::TaskNotFound(id.to_string()))
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Task> {
        let (column, pos) = self.position(id)?;
        Ok(&mut self.tasks.column_mut(column)[pos])
    }
}

/// One-line summary: "backlog 2, todo 1, doing 0, done 3"
pub fn summarize(tasks: &TaskList) -> String {
    Column::all()
        .iter()
        .map(|&c| format!("{c} {}", tasks.column(c).len()))
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
