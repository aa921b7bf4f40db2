//! Entry point wiring for the `stockfetch` and `stockfetch-status` binaries.

pub mod cli;
pub mod config;
pub mod main_lib;
