use axum::extract::{Query, State};
use axum::Json;
use kanban_core::config::Config;
use kanban_core::error::KanbanError;
use kanban_core::milestone;
use kanban_core::timeline::{self, ColumnFilter, Period, Reference};

use super::require_project;
use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineQuery {
    pub project_path: Option<String>,
    pub period: Option<String>,
    pub coluna: Option<String>,
}

/// GET /api/timeline?projectPath=&period=&coluna=: grouped activity log.
pub async fn get_timeline(
    State(app): State<AppState>,
    Query(query): Query<TimelineQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let project = require_project(query.project_path)?;
    let period: Period = query.period.as_deref().unwrap_or("all").parse()?;
    let column: ColumnFilter = query.coluna.as_deref().unwrap_or("all").parse()?;

    let clock = app.clock;
    let result = tokio::task::spawn_blocking(move || {
        let config = Config::load(&project)?;
        let offset = config.timeline.offset()?;
        let reference = Reference::new(
            clock().with_timezone(&offset),
            config.timeline.week_start.weekday(),
        );
        let tasks = kanban_core::board::load_tasks(&project);
        let catalog = milestone::load_catalog(&project, &config);
        let groups = timeline::build_timeline(&tasks, &catalog, period, column, &reference);

        Ok::<_, KanbanError>(serde_json::json!({
            "period": period,
            "groups": groups,
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
