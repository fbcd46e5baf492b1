//! Game simulation system
//!
//! Drives a [`GameSession`] once per frame:
//! - Delta time calculation (wall clock or fixed step)
//! - Session tick with the sampled input
//! - Score recording when the round ends

use std::time::Instant;

use stackplus_core::{GameSession, ScoreStore, TickEvents, TickInput};

/// Largest step a single frame may advance the round by
const MAX_DT: f64 = 0.25;

/// Result of a simulation update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationResult {
    /// What happened during the tick
    pub events: TickEvents,
    /// Seconds the round advanced
    pub dt: f64,
    /// The round ended with a new stored best
    pub new_record: bool,
}

/// Manages the game simulation loop
pub struct SimulationSystem {
    last_frame: Instant,
    fixed_dt: Option<f64>,
}

impl SimulationSystem {
    /// Simulation paced by the wall clock
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            fixed_dt: None,
        }
    }

    /// Simulation that advances by `dt` every frame, for headless runs
    pub fn fixed(dt: f64) -> Self {
        Self {
            last_frame: Instant::now(),
            fixed_dt: Some(dt.clamp(0.0, MAX_DT)),
        }
    }

    /// Run one simulation frame
    pub fn update(
        &mut self,
        session: &mut GameSession,
        scores: &mut dyn ScoreStore,
        input: TickInput,
    ) -> SimulationResult {
        let now = Instant::now();
        let raw_dt = (now - self.last_frame).as_secs_f64();
        self.last_frame = now;
        // Cap dt so a stall (first frame, lost focus) cannot skip a whole timer
        let dt = self.fixed_dt.unwrap_or_else(|| raw_dt.min(MAX_DT));

        let events = session.tick(dt, input);

        if events.contains(TickEvents::LIFE_LOST) {
            log::info!("{} lives left", session.lives().remaining());
        }

        let mut new_record = false;
        if events.contains(TickEvents::GAME_OVER) {
            match session.record_score(scores) {
                Ok(recorded) => new_record = recorded,
                Err(e) => log::warn!("Failed to save high score: {}", e),
            }
        }

        SimulationResult { events, dt, new_record }
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new()
    }
}
