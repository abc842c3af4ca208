//! Line-oriented command shell over the ledger engine.

pub mod core;
pub mod help;
pub mod output;
mod shell;

pub use shell::{run_cli, run_script};
