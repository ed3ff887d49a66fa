use crate::output::{print_json, print_table};
use anyhow::Context;
use kanban_core::{board, state::summarize, task::Column};
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let data = board::load_board(root)
        .with_context(|| format!("cannot read board at '{}'", root.display()))?;

    if json {
        return print_json(&data);
    }

    println!("{}", data.project_path);
    println!("{}", summarize(&data.tasks));
    println!();

    let rows: Vec<Vec<String>> = data
        .tasks
        .iter()
        .map(|(column, task)| {
            vec![
                column.to_string(),
                task.id().into_owned(),
                task.descricao().into_owned(),
                task.milestone().map_or_else(|| "-".into(), |m| m.into_owned()),
            ]
        })
        .collect();

    if rows.is_empty() {
        println!("No tasks. Add one with: kanban task add <descricao>");
    } else {
        print_table(&["COLUMN", "ID", "DESCRICAO", "MILESTONE"], rows);
    }

    let doing = data.tasks.column(Column::Doing).len();
    if doing > 0 {
        println!("\n{doing} in progress");
    }
    Ok(())
}
