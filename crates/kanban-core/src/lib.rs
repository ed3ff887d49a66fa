pub mod board;
pub mod config;
pub mod error;
pub mod io;
pub mod milestone;
pub mod paths;
pub mod state;
pub mod task;
pub mod timeline;

pub use error::{KanbanError, Result};
