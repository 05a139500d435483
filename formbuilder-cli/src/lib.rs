//! Library side of the `formbuilder` binary: logging setup, data directory
//! resolution and the command implementations.

pub mod commands;
pub mod config;
pub mod logging;
