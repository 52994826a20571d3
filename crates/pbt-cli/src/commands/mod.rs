//! Command implementations for pbt-cli

pub mod plan;
pub mod plugins;

pub use plan::{PlanRequest, run_plan};
pub use plugins::run_plugins;
