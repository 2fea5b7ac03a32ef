//! Application orchestration for the simulator binary

pub mod initialization;

pub use initialization::{build_simulation_config, configure_logging, frontier_config, load_configuration};
