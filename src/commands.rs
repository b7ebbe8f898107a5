//! Subcommands of the `jt` binary.
pub mod generate;
pub mod types;
