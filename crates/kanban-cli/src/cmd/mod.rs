pub mod board;
pub mod milestone;
pub mod serve;
pub mod status;
pub mod task;
pub mod timeline;
