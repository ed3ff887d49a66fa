pub mod board;
pub mod milestones;
pub mod status;
pub mod tasks;
pub mod timeline;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use kanban_core::error::KanbanError;
use std::path::PathBuf;

use crate::error::AppError;

/// `Json` whose rejections (wrong content type, malformed JSON, a field of
/// the wrong type) are validation errors with a JSON body, not axum's
/// plain-text 415/422.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            KanbanError::InvalidField {
                field: "body",
                reason: rejection.body_text(),
            }
        })?;
        Ok(Self(value))
    }
}

/// Resolve the `projectPath` every request carries. Absent and empty are
/// both a validation error.
pub(crate) fn require_project(project_path: Option<String>) -> Result<PathBuf, KanbanError> {
    match project_path {
        Some(p) if !p.is_empty() => Ok(PathBuf::from(p)),
        _ => Err(KanbanError::MissingField("projectPath")),
    }
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectQuery {
    pub project_path: Option<String>,
}
