pub mod args;
pub mod commands;
pub mod shell;

pub use args::Args;
pub use commands::CliApp;
