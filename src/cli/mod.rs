//! CLI module containing argument parsing for the simulator binary

pub mod args;

pub use args::{parse_args, validate_args, Args};
