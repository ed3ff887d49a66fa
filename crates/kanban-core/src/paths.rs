use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File name constants
// ---------------------------------------------------------------------------

pub const STATUS_FILE: &str = "status.md";
pub const TASKS_FILE: &str = "tasks.json";
pub const LLM_GUIDE_FILE: &str = "llm-guide.md";
pub const PROJETO_CONTEXT_FILE: &str = "projeto-context.md";
pub const MILESTONES_FILE: &str = "milestones.json";
pub const CONFIG_FILE: &str = ".kanban.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn status_path(project: &Path) -> PathBuf {
    project.join(STATUS_FILE)
}

pub fn tasks_path(project: &Path) -> PathBuf {
    project.join(TASKS_FILE)
}

pub fn llm_guide_path(project: &Path) -> PathBuf {
    project.join(LLM_GUIDE_FILE)
}

pub fn projeto_context_path(project: &Path) -> PathBuf {
    project.join(PROJETO_CONTEXT_FILE)
}

pub fn config_path(project: &Path) -> PathBuf {
    project.join(CONFIG_FILE)
}
