//! Test module organization for the frontier

pub mod concurrency;
