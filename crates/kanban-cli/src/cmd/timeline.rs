use crate::output::print_json;
use anyhow::Context;
use kanban_core::config::Config;
use kanban_core::timeline::{self, ColumnFilter, Period, Reference};
use kanban_core::{board, milestone};
use std::path::Path;

pub fn run(root: &Path, period: &str, column: &str, json: bool) -> anyhow::Result<()> {
    let period: Period = period.parse()?;
    let column: ColumnFilter = column.parse()?;
    let config = Config::load(root).context("failed to load .kanban.yaml")?;
    let reference = Reference::from_config(&config.timeline)?;

    let tasks = board::load_tasks(root);
    let catalog = milestone::load_catalog(root, &config);
    let groups = timeline::build_timeline(&tasks, &catalog, period, column, &reference);

    if json {
        return print_json(&serde_json::json!({ "period": period, "groups": groups }));
    }

    if groups.is_empty() {
        println!("No activity for period '{period}'.");
        return Ok(());
    }

    let offset = reference.offset();
    for group in &groups {
        println!("{}", group.date);
        for e in &group.entries {
            let time = e
                .at
                .map(|at| at.with_timezone(&offset).format("%H:%M").to_string())
                .unwrap_or_else(|| "--:--".into());
            let tag = e
                .milestone
                .map(|m| format!("  [{}]", m.titulo))
                .unwrap_or_default();
            println!("  {time}  {:<8} {}{tag}", e.coluna.as_str(), e.task.descricao());
        }
    }
    Ok(())
}
