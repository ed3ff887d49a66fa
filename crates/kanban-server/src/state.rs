use kanban_core::state::Clock;
use std::path::PathBuf;

/// Shared application state passed to all route handlers.
///
/// Nothing about a project is cached here: every request names its project
/// directory and reads it from disk.
#[derive(Clone)]
pub struct AppState {
    /// Source of "now" for timeline filters and recorded transitions.
    pub clock: Clock,
    /// Static UI bundle served for non-API paths.
    pub ui_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(ui_dir: Option<PathBuf>) -> Self {
        Self {
            clock: chrono::Utc::now,
            ui_dir,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(None)
    }
}
