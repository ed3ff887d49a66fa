use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use kanban_core::config::Config;
use kanban_core::error::KanbanError;
use kanban_core::{board, milestone};
use std::path::Path;

#[derive(Subcommand)]
pub enum MilestoneSubcommand {
    /// List the milestone catalog with task counts
    List,
    /// Show one milestone and the tasks that reference it
    Info { id: String },
}

pub fn run(root: &Path, subcmd: MilestoneSubcommand, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load .kanban.yaml")?;
    let catalog = milestone::load_catalog(root, &config);
    let tasks = board::load_tasks(root);

    match subcmd {
        MilestoneSubcommand::List => {
            if json {
                return print_json(&catalog);
            }
            if catalog.is_empty() {
                println!("No milestones in {}.", config.milestones_file);
                return Ok(());
            }
            let rows = catalog
                .iter()
                .map(|m| {
                    let count = tasks
                        .iter()
                        .filter(|(_, t)| t.milestone().as_deref() == Some(m.id.as_str()))
                        .count();
                    vec![m.id.clone(), m.titulo.clone(), m.cor.clone(), count.to_string()]
                })
                .collect();
            print_table(&["ID", "TITULO", "COR", "TASKS"], rows);
            Ok(())
        }
        MilestoneSubcommand::Info { id } => {
            let m = milestone::resolve(&id, &catalog)
                .ok_or_else(|| KanbanError::MilestoneNotFound(id.clone()))?;
            let members: Vec<_> = tasks
                .iter()
                .filter(|(_, t)| t.milestone().as_deref() == Some(id.as_str()))
                .collect();

            if json {
                let items: Vec<serde_json::Value> = members
                    .iter()
                    .map(|(c, t)| serde_json::json!({ "column": c, "id": t.get("id"), "descricao": t.descricao() }))
                    .collect();
                return print_json(&serde_json::json!({ "milestone": m, "tasks": items }));
            }

            println!("{}: {} ({})", m.id, m.titulo, m.cor);
            for (c, t) in &members {
                println!("  {:<8} [{}] {}", c.as_str(), t.id(), t.descricao());
            }
            Ok(())
        }
    }
}
