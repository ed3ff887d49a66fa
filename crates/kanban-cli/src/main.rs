mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    milestone::MilestoneSubcommand, status::StatusSubcommand, task::TaskSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kanban",
    about = "Local-first kanban board backed by flat files",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project directory (default: nearest directory with tasks.json, else cwd)
    #[arg(long, global = true, env = "KANBAN_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the board API (and a static UI bundle, if given)
    Serve {
        /// Port to listen on (0 = OS-assigned)
        #[arg(long, default_value = "3141", env = "KANBAN_PORT")]
        port: u16,

        /// Don't open browser automatically
        #[arg(long)]
        no_open: bool,

        /// Directory with a built UI to serve at /
        #[arg(long, env = "KANBAN_UI_DIR")]
        ui_dir: Option<PathBuf>,
    },

    /// Show the board: the four columns and their tasks
    Board,

    /// Manage tasks
    Task {
        #[command(subcommand)]
        subcommand: TaskSubcommand,
    },

    /// Read or replace status.md
    Status {
        #[command(subcommand)]
        subcommand: StatusSubcommand,
    },

    /// Show the activity timeline
    Timeline {
        /// today | week | month | all
        #[arg(long, default_value = "all")]
        period: String,

        /// all | backlog | todo | doing | done
        #[arg(long, default_value = "all")]
        column: String,
    },

    /// Inspect the milestone catalog
    Milestone {
        #[command(subcommand)]
        subcommand: MilestoneSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Serve {
            port,
            no_open,
            ui_dir,
        } => cmd::serve::run(port, no_open, ui_dir),
        Commands::Board => cmd::board::run(&root, cli.json),
        Commands::Task { subcommand } => cmd::task::run(&root, subcommand, cli.json),
        Commands::Status { subcommand } => cmd::status::run(&root, subcommand, cli.json),
        Commands::Timeline { period, column } => {
            cmd::timeline::run(&root, &period, &column, cli.json)
        }
        Commands::Milestone { subcommand } => cmd::milestone::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
