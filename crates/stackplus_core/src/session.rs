//! One round of stacking
//!
//! A [`GameSession`] owns everything that changes while a level is played:
//! the falling control block, the tower under it, lives, the placement
//! timer and the score. The host advances it once per frame with
//! [`GameSession::tick`] and reacts to the returned [`TickEvents`].

use bitflags::bitflags;
use rand::rngs::StdRng;
use rand::SeedableRng;
use stackplus_geom::{spatial, Extruder, FlatView, Polygon2D, PolygonIntersector, Transform};

use crate::lives::{Lives, PlacementTimer};
use crate::motion::{Motion, MotionConfig};
use crate::tower::{LayerPose, Tower, TowerLayer, DEFAULT_MAX_VISIBLE};
use crate::{ScoreError, ScoreStore};

bitflags! {
    /// What happened during one tick
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct TickEvents: u8 {
        /// A block was dropped onto the tower
        const STACKED = 1 << 0;
        /// The placement timer ran out
        const LIFE_LOST = 1 << 1;
        /// The round ended
        const GAME_OVER = 1 << 2;
        /// The round ended above the previous best
        const NEW_HIGH_SCORE = 1 << 3;
        /// The placement timer is about to run out
        const TIMER_WARNING = 1 << 4;
    }
}

/// Where a round stands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    Paused,
    GameOver,
}

/// Player input sampled for one tick
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickInput {
    /// The drop button was pressed this frame
    pub clicked: bool,
    /// Pointer x over window width, `[0, 1]`
    pub pointer: f64,
}

/// Tuning for a round
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    pub lives: u32,
    /// Seconds allowed per placement
    pub placement_time: f64,
    pub motion: MotionConfig,
    pub max_visible_layers: usize,
    /// Snapping grid of the intersection
    pub tolerance: f64,
    /// Block height
    pub depth: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            lives: 3,
            placement_time: 6.0,
            motion: MotionConfig::default(),
            max_visible_layers: DEFAULT_MAX_VISIBLE,
            tolerance: stackplus_geom::DEFAULT_TOLERANCE,
            depth: stackplus_geom::DEFAULT_DEPTH,
        }
    }
}

/// State of one round on one shape
pub struct GameSession {
    shape: String,
    config: SessionConfig,
    control: TowerLayer,
    tower: Tower,
    motion: Motion,
    lives: Lives,
    timer: PlacementTimer,
    score: u32,
    stacked: u32,
    previous_high: u32,
    phase: GamePhase,
    rng: StdRng,
    extruder: Extruder,
    intersector: PolygonIntersector,
    view: FlatView,
}

impl GameSession {
    /// Start a round on `polygon` with an entropy-seeded generator
    pub fn new(shape: impl Into<String>, polygon: Polygon2D, config: SessionConfig, previous_high: u32) -> Self {
        Self::with_rng(shape, polygon, config, previous_high, StdRng::from_entropy())
    }

    /// Start a round with a fixed seed, for replays and tests
    pub fn with_seed(
        shape: impl Into<String>,
        polygon: Polygon2D,
        config: SessionConfig,
        previous_high: u32,
        seed: u64,
    ) -> Self {
        Self::with_rng(shape, polygon, config, previous_high, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        shape: impl Into<String>,
        polygon: Polygon2D,
        config: SessionConfig,
        previous_high: u32,
        mut rng: StdRng,
    ) -> Self {
        let shape = shape.into();
        let extruder = Extruder::new();
        let control = TowerLayer::new(polygon, &extruder, config.depth);
        let tower = Tower::new(control.clone(), config.max_visible_layers);
        let motion = Motion::new(config.motion, &mut rng);
        log::info!("Starting round on '{}' (best {})", shape, previous_high);
        Self {
            shape,
            config,
            control,
            tower,
            motion,
            lives: Lives::new(config.lives),
            timer: PlacementTimer::new(config.placement_time),
            score: 0,
            stacked: 0,
            previous_high,
            phase: GamePhase::Playing,
            rng,
            extruder,
            intersector: PolygonIntersector::with_tolerance(config.tolerance),
            view: FlatView::FLAT,
        }
    }

    pub fn shape(&self) -> &str {
        &self.shape
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Blocks dropped this round, including the one that ended it
    pub fn stacked(&self) -> u32 {
        self.stacked
    }

    /// Best score before this round started
    pub fn previous_high(&self) -> u32 {
        self.previous_high
    }

    pub fn lives(&self) -> &Lives {
        &self.lives
    }

    pub fn timer(&self) -> &PlacementTimer {
        &self.timer
    }

    pub fn tower(&self) -> &Tower {
        &self.tower
    }

    pub fn control(&self) -> &TowerLayer {
        &self.control
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn set_invert_x_axis(&mut self, invert: bool) {
        self.motion.set_invert_x_axis(invert);
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
        }
    }

    /// Where the control block is drawn for the given pointer
    pub fn control_pose(&self, pointer: f64) -> Transform {
        self.motion.pose(pointer)
    }

    /// Everything to draw: tower layers bottom to top, then the control block
    pub fn draw_list(&self, pointer: f64) -> Vec<LayerPose<'_>> {
        let mut poses = self.tower.layer_poses();
        poses.push(LayerPose {
            layer: &self.control,
            transform: self.control_pose(pointer),
        });
        poses
    }

    /// Advance the round by `dt` seconds
    pub fn tick(&mut self, dt: f64, input: TickInput) -> TickEvents {
        let mut events = TickEvents::empty();
        if self.phase != GamePhase::Playing {
            return events;
        }

        let pose = self.motion.pose(input.pointer);
        let timer = self.timer.advance(dt);
        if timer.warning {
            events |= TickEvents::TIMER_WARNING;
        }

        if input.clicked {
            self.timer.reset();
            self.stack(pose);
            events |= TickEvents::STACKED;
        }

        if self.control.is_empty() || self.lives.is_out() {
            self.phase = GamePhase::GameOver;
            events |= TickEvents::GAME_OVER;
            if self.score > self.previous_high {
                events |= TickEvents::NEW_HIGH_SCORE;
            }
            log::info!("Game over on '{}' with score {}", self.shape, self.score);
        }

        if timer.restarted {
            self.lives.lose_one();
            events |= TickEvents::LIFE_LOST;
            log::info!("Placement timer ran out, {} lives left", self.lives.remaining());
        }

        if input.clicked && !self.is_over() {
            self.score += 1;
        }

        self.motion.advance(dt);
        events
    }

    /// Record the final score; returns whether it beat the stored best
    pub fn record_score(&self, store: &mut dyn ScoreStore) -> Result<bool, ScoreError> {
        store.submit(&self.shape, self.score)
    }

    /// Drop the control block at `pose` onto the tower
    fn stack(&mut self, pose: Transform) {
        let (support, support_pose) = self.tower.support_pose();
        let support = spatial::apply_pose(support, &support_pose, &self.view);
        let falling = spatial::apply_pose(self.control.polygon(), &pose, &self.view);
        let overlap = self.intersector.intersect(&support, &falling);

        log::debug!(
            "Stacked at ({:.2}, {:.2}) yaw {}: {} vertices, area {:.3}",
            pose.dx,
            pose.dy,
            pose.theta,
            overlap.len(),
            overlap.area()
        );

        self.control = TowerLayer::new(overlap, &self.extruder, self.config.depth);
        self.tower.push(self.control.clone());
        self.stacked += 1;
        self.motion.restart(&mut self.rng);
    }
}
