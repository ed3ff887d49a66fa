use axum::extract::{Query, State};
use axum::Json;
use kanban_core::error::KanbanError;
use kanban_core::state::{Action, BoardState};

use super::{require_project, JsonBody, ProjectQuery};
use crate::error::AppError;
use crate::state::AppState;

/// GET /api/board?projectPath=: the four project files, read fresh.
pub async fn get_board(
    Query(query): Query<ProjectQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let project = require_project(query.project_path)?;
    let result = tokio::task::spawn_blocking(move || {
        let board = kanban_core::board::load_board(&project)?;
        Ok::<_, KanbanError>(serde_json::to_value(board)?)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionBody {
    pub project_path: Option<String>,
    pub action: Option<serde_json::Value>,
}

/// POST /api/board/actions: apply one board action and persist tasks.json.
pub async fn dispatch_action(
    State(app): State<AppState>,
    JsonBody(body): JsonBody<ActionBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let project = require_project(body.project_path)?;
    let raw = body
        .action
        .filter(|a| !a.is_null())
        .ok_or(KanbanError::MissingField("action"))?;
    let action: Action =
        serde_json::from_value(raw).map_err(|e| KanbanError::InvalidField {
            field: "action",
            reason: e.to_string(),
        })?;

    let clock = app.clock;
    let result = tokio::task::spawn_blocking(move || {
        let mut state = BoardState::with_clock(kanban_core::board::load_tasks(&project), clock);
        state.dispatch(action)?;
        state.save(&project)?;
        Ok::<_, KanbanError>(serde_json::json!({
            "success": true,
            "tasks": state.tasks(),
        }))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}
