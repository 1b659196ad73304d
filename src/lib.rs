pub mod board;
pub mod commands;
pub mod completions;
pub mod config;
pub mod error;
pub mod fs;
pub mod logging;
pub mod models;
pub mod sort;
pub mod utils;
pub mod validation;

pub use board::Board;
pub use error::TaskError;
pub use fs::TaskStore;
pub use models::{Priority, Stage, Task, TaskList};
