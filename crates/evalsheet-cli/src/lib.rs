//! Library components of the evalsheet CLI.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
