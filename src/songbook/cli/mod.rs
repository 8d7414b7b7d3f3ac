//! Terminal client for the songbook library.
//!
//! - `setup`: clap definitions and the grouped help screen
//! - `commands`: session setup and one handler per command
//! - `print`: tables, detail views and messages

mod commands;
mod print;
mod setup;

pub use commands::run;
