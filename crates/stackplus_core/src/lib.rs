//! Game rules for StackPlus
//!
//! This crate turns the geometry pipeline into a game:
//!
//! - [`ShapeCatalog`] - Validated shapes by name, loaded from RON
//! - [`GameSession`] - One round: control block, tower, lives, timer, score
//! - [`Tower`] - Stacked layers with a visible cap
//! - [`Motion`] - Sweep and yaw of the falling block
//! - [`LevelTable`] - Levels and their unlock thresholds
//! - [`ScoreStore`] - High score persistence ([`RonScoreFile`], [`MemoryScoreStore`])

mod catalog_error;
mod catalog;
mod lives;
mod levels;
mod scores;
pub mod motion;
pub mod tower;
pub mod session;

pub use catalog_error::CatalogError;
pub use catalog::{ShapeCatalog, ShapeSet};
pub use lives::{Lives, PlacementTimer, TimerTick};
pub use levels::{Level, LevelTable, Unlock};
pub use scores::{MemoryScoreStore, RonScoreFile, ScoreError, ScoreStore};
pub use motion::{Motion, MotionConfig};
pub use tower::{LayerPose, Tower, TowerLayer};
pub use session::{GamePhase, GameSession, SessionConfig, TickEvents, TickInput};

// Re-export geometry types for convenience
pub use stackplus_geom::{Polygon2D, Prism, Transform};
