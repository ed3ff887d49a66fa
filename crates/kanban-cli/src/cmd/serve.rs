use anyhow::Result;
use kanban_server::AppState;
use std::path::PathBuf;

pub fn run(port: u16, no_open: bool, ui_dir: Option<PathBuf>) -> Result<()> {
    if let Some(dir) = &ui_dir {
        anyhow::ensure!(dir.is_dir(), "ui dir '{}' is not a directory", dir.display());
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
        let actual_port = listener.local_addr()?.port();
        println!("kanban board → http://localhost:{actual_port}  (PID {})", std::process::id());

        tokio::select! {
            res = kanban_server::serve_on(AppState::new(ui_dir), listener, !no_open) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    })
}
