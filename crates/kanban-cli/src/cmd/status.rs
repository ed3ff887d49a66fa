use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use kanban_core::board;
use std::io::Read;
use std::path::Path;

#[derive(Subcommand)]
pub enum StatusSubcommand {
    /// Print status.md (a placeholder when it does not exist)
    Show,
    /// Replace status.md. Reads stdin when no text is given.
    Set {
        /// New content; an explicit "" writes an empty file
        content: Option<String>,
    },
}

pub fn run(root: &Path, subcmd: StatusSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        StatusSubcommand::Show => {
            let data = board::load_board(root)
                .with_context(|| format!("cannot read board at '{}'", root.display()))?;
            if json {
                print_json(&serde_json::json!({ "status": data.status }))?;
            } else {
                print!("{}", data.status);
            }
            Ok(())
        }
        StatusSubcommand::Set { content } => {
            let content = match content {
                Some(c) => c,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("failed to read status from stdin")?;
                    buf
                }
            };
            board::save_status(root, &content).context("failed to save status.md")?;
            if json {
                print_json(&serde_json::json!({ "success": true, "bytes": content.len() }))?;
            } else {
                println!("Saved status.md ({} bytes)", content.len());
            }
            Ok(())
        }
    }
}
