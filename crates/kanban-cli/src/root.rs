use kanban_core::paths::TASKS_FILE;
use std::path::{Path, PathBuf};

/// Resolve the project directory.
///
/// Priority:
/// 1. `--root` flag / `KANBAN_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `tasks.json`
/// 3. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_project(&cwd).unwrap_or(cwd)
}

fn find_project(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(TASKS_FILE).is_file())
        .map(Path::to_path_buf)
}
