//! Scripted player for headless rounds
//!
//! Stands in for pointer and button input: it aims the control block at the
//! yaw of the block below, give or take a random error, and drops it when
//! the sweep passes over the tower's center.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stackplus_core::{tower::BASE_THETA, GameSession, TickInput};

/// Drops when the control block is within this distance of the center
const DEFAULT_REACH: f64 = 0.1;

/// Input source that plays a round by itself
pub struct Autopilot {
    reach: f64,
    max_yaw_error: f64,
    yaw_error: f64,
    rng: StdRng,
}

impl Autopilot {
    /// Autopilot that misjudges the yaw by up to `max_yaw_error` degrees
    pub fn new(max_yaw_error: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut pilot = Self {
            reach: DEFAULT_REACH,
            max_yaw_error: max_yaw_error.abs(),
            yaw_error: 0.0,
            rng,
        };
        pilot.pick_error();
        pilot
    }

    fn pick_error(&mut self) {
        self.yaw_error = if self.max_yaw_error > 0.0 {
            self.rng.gen_range(-self.max_yaw_error..=self.max_yaw_error)
        } else {
            0.0
        };
    }

    /// Input for the next tick of `session`
    pub fn input(&mut self, session: &GameSession) -> TickInput {
        let target = if session.tower().is_empty() { BASE_THETA } else { 0.0 } + self.yaw_error;
        let offset = session.motion().theta_offset();
        let mut pointer = ((target - offset).rem_euclid(360.0) + 0.5) / 360.0;
        if session.motion().config().invert_x_axis {
            pointer = 1.0 - pointer;
        }

        let pose = session.control_pose(pointer);
        let clicked = pose.dx.hypot(pose.dy) <= self.reach;
        if clicked {
            self.pick_error();
        }
        TickInput { clicked, pointer }
    }
}
