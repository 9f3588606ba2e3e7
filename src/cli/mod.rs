//! Command-line interface

pub mod commands;
pub mod display;

pub use commands::{Cli, Commands};
