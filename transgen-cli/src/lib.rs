//! CLI library for testing purposes

pub mod args;
pub mod run;

pub use args::{Args, parse_delimiter, parse_platform};
pub use run::{Outcome, run};
