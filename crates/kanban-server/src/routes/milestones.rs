use axum::extract::Query;
use axum::Json;
use kanban_core::error::KanbanError;

use super::{require_project, ProjectQuery};
use crate::error::AppError;

/// GET /api/milestones?projectPath=: the project's milestone catalog.
pub async fn list_milestones(
    Query(query): Query<ProjectQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let project = require_project(query.project_path)?;
    let result = tokio::task::spawn_blocking(move || {
        let config = kanban_core::config::Config::load(&project)?;
        let catalog = kanban_core::milestone::load_catalog(&project, &config);
        Ok::<_, KanbanError>(serde_json::to_value(catalog)?)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
