use axum::Json;
use kanban_core::error::KanbanError;

use super::{require_project, JsonBody};
use crate::error::AppError;

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveStatusBody {
    pub project_path: Option<String>,
    pub content: Option<serde_json::Value>,
}

/// POST /api/status: overwrite status.md verbatim. An empty string is a
/// valid save; an absent or `null` content is not.
pub async fn save_status(
    JsonBody(body): JsonBody<SaveStatusBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let project = require_project(body.project_path)?;
    let content = match body.content {
        None | Some(serde_json::Value::Null) => {
            return Err(KanbanError::MissingField("content").into())
        }
        Some(serde_json::Value::String(s)) => s,
        Some(_) => {
            return Err(KanbanError::InvalidField {
                field: "content",
                reason: "expected a string".into(),
            }
            .into())
        }
    };

    tokio::task::spawn_blocking(move || kanban_core::board::save_status(&project, &content))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "success": true })))
}
