//! Library half of the `delta` binary: argument types, commands and logger
//! setup, split out so integration tests can drive them directly.

pub mod cli;
pub mod commands;
pub mod logger;
