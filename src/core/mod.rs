//! Core process state shared across commands.

mod state;

pub use state::{is_shutdown, is_watching, register_watcher, setup_shutdown_handler};
