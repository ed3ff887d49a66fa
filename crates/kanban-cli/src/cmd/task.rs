use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use kanban_core::state::{Action, BoardState};
use kanban_core::task::{new_task_id, Column, Task};
use std::path::Path;

#[derive(Subcommand)]
pub enum TaskSubcommand {
    /// Add a task
    Add {
        #[arg(required = true)]
        descricao: Vec<String>,
        /// Column to add to
        #[arg(long, default_value = "backlog")]
        column: String,
        /// Task id (generated when omitted)
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        detalhes: Option<String>,
        /// Milestone id
        #[arg(long)]
        milestone: Option<String>,
    },
    /// Move a task to another column
    Move {
        id: String,
        column: String,
        /// Position in the target column (0-based); appends if omitted
        #[arg(long, value_name = "N")]
        position: Option<usize>,
    },
    /// Delete a task
    Delete { id: String },
    /// List tasks, optionally for one column
    List {
        #[arg(long)]
        column: Option<String>,
    },
}

pub fn run(root: &Path, subcmd: TaskSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        TaskSubcommand::Add {
            descricao,
            column,
            id,
            detalhes,
            milestone,
        } => {
            let column: Column = column.parse()?;
            let mut task = Task::new(id.unwrap_or_else(new_task_id), descricao.join(" "));
            task.set_detalhes(detalhes.filter(|d| !d.is_empty()));
            task.set_milestone(milestone.filter(|m| !m.is_empty()));
            let state = apply(root, Action::AddTask { task, column })?;
            let added = state
                .tasks()
                .column(column)
                .last()
                .context("task was not added")?;
            if json {
                print_json(added)?;
            } else {
                println!("Added task [{}] to {column}: {}", added.id(), added.descricao());
            }
            Ok(())
        }
        TaskSubcommand::Move {
            id,
            column,
            position,
        } => {
            let to: Column = column.parse()?;
            apply(
                root,
                Action::MoveTask {
                    id: id.clone(),
                    to,
                    index: position,
                },
            )
            .with_context(|| format!("cannot move task '{id}'"))?;
            if json {
                print_json(&serde_json::json!({ "id": id, "column": to }))?;
            } else {
                println!("Moved task [{id}] to {to}");
            }
            Ok(())
        }
        TaskSubcommand::Delete { id } => {
            apply(root, Action::DeleteTask { id: id.clone() })
                .with_context(|| format!("cannot delete task '{id}'"))?;
            if json {
                print_json(&serde_json::json!({ "id": id, "deleted": true }))?;
            } else {
                println!("Deleted task [{id}]");
            }
            Ok(())
        }
        TaskSubcommand::List { column } => list(root, column.as_deref(), json),
    }
}

/// Load tasks.json, apply one action and write it back.
fn apply(root: &Path, action: Action) -> anyhow::Result<BoardState> {
    let mut state = BoardState::load(root);
    state.dispatch(action)?;
    state.save(root).context("failed to save tasks.json")?;
    Ok(state)
}

fn list(root: &Path, column: Option<&str>, json: bool) -> anyhow::Result<()> {
    let column: Option<Column> = column.map(str::parse::<Column>).transpose()?;
    let state = BoardState::load(root);
    let tasks: Vec<_> = state
        .tasks()
        .iter()
        .filter(|(c, _)| column.map_or(true, |want| want == *c))
        .collect();

    if json {
        let items: Vec<serde_json::Value> = tasks
            .iter()
            .map(|(c, t)| serde_json::json!({ "column": c, "task": t }))
            .collect();
        return print_json(&items);
    }

    if tasks.is_empty() {
        println!("No tasks.");
        return Ok(());
    }
    let rows = tasks
        .iter()
        .map(|(c, t)| {
            let items = t.todos();
            let todos = if items.is_empty() {
                "-".to_string()
            } else {
                let done = items.iter().filter(|i| i.done).count();
                format!("{done}/{}", items.len())
            };
            vec![c.to_string(), t.id().into_owned(), t.descricao().into_owned(), todos]
        })
        .collect();
    print_table(&["COLUMN", "ID", "DESCRICAO", "TODOS"], rows);
    Ok(())
}
