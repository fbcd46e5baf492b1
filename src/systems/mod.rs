//! Application systems
//!
//! Per-frame systems kept out of main.rs so they can be tested headless.

mod autopilot;
mod simulation;

pub use autopilot::Autopilot;
pub use simulation::{SimulationResult, SimulationSystem};
