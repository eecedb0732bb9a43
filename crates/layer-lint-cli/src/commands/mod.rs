//! Subcommand implementations.

pub mod check;
pub mod init;
pub mod list_layers;
pub mod output;
pub mod scaffold;
