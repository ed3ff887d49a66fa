use axum::Json;
use kanban_core::error::KanbanError;
use kanban_core::task::TaskList;

use super::{require_project, JsonBody};
use crate::error::AppError;

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveTasksBody {
    pub project_path: Option<String>,
    pub tasks: Option<serde_json::Value>,
}

/// POST /api/tasks: overwrite tasks.json with the posted collection.
///
/// Both fields are checked before anything touches the filesystem; `null`
/// counts as absent.
pub async fn save_tasks(
    JsonBody(body): JsonBody<SaveTasksBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let project = require_project(body.project_path)?;
    let raw = body
        .tasks
        .filter(|t| !t.is_null())
        .ok_or(KanbanError::MissingField("tasks"))?;
    if !raw.is_object() {
        return Err(KanbanError::InvalidField {
            field: "tasks",
            reason: "expected an object keyed by column".into(),
        }
        .into());
    }
    let tasks = TaskList::from_value(&raw);

    tokio::task::spawn_blocking(move || kanban_core::board::save_tasks(&project, &tasks))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "success": true })))
}
