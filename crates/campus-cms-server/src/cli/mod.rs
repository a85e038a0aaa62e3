//! CLI subcommand implementations for the `campus-cms` binary.

pub mod contact_cmd;
pub mod content_cmd;
pub mod output;
pub mod programs_cmd;
pub mod serve;
