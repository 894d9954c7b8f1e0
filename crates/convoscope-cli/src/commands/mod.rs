//! CLI subcommand implementations

pub mod audio;
pub mod config;
pub mod models;
pub mod output;
pub mod record;
pub mod text;
