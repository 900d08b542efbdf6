//! Library half of the `doctype` command-line tool.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod render;
