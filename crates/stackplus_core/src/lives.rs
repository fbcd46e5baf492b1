//! Lives and the placement timer

/// Remaining attempts in a round
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lives {
    max: u32,
    remaining: u32,
}

impl Lives {
    pub fn new(max: u32) -> Self {
        Self { max, remaining: max }
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Take one life away, never going below zero
    pub fn lose_one(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn is_out(&self) -> bool {
        self.remaining == 0
    }

    pub fn reset(&mut self) {
        self.remaining = self.max;
    }
}

impl Default for Lives {
    fn default() -> Self {
        Self::new(3)
    }
}

/// Fraction of the placement time after which the player is warned
const WARNING_FRACTION: f64 = 0.75;

/// What happened to the timer during one advance
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimerTick {
    /// The timer ran out and started over
    pub restarted: bool,
    /// The warning threshold was crossed
    pub warning: bool,
}

/// Countdown for placing the next block
///
/// Running out does not stop the timer; it wraps around and reports
/// `restarted` so the caller can charge a life.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementTimer {
    duration: f64,
    elapsed: f64,
    warned: bool,
}

impl PlacementTimer {
    pub fn new(duration: f64) -> Self {
        Self {
            duration: duration.max(f64::EPSILON),
            elapsed: 0.0,
            warned: false,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Elapsed share of the duration, in `[0, 1)`
    pub fn progress(&self) -> f64 {
        self.elapsed / self.duration
    }

    /// Whether the warning threshold has been reached in this countdown
    pub fn is_warning(&self) -> bool {
        self.warned
    }

    pub fn advance(&mut self, dt: f64) -> TimerTick {
        let mut tick = TimerTick::default();
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.elapsed %= self.duration;
            self.warned = false;
            tick.restarted = true;
        }
        if !self.warned && self.elapsed >= WARNING_FRACTION * self.duration {
            self.warned = true;
            tick.warning = true;
        }
        tick
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.warned = false;
    }
}

impl Default for PlacementTimer {
    fn default() -> Self {
        Self::new(6.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lives_saturate() {
        let mut lives = Lives::new(2);
        lives.lose_one();
        assert!(!lives.is_out());
        lives.lose_one();
        lives.lose_one();
        assert_eq!(lives.remaining(), 0);
        assert!(lives.is_out());
        lives.reset();
        assert_eq!(lives.remaining(), 2);
    }

    #[test]
    fn test_default_lives() {
        assert_eq!(Lives::default().remaining(), 3);
    }

    #[test]
    fn test_timer_warns_once() {
        let mut timer = PlacementTimer::new(4.0);
        assert_eq!(timer.advance(2.0), TimerTick::default());
        let tick = timer.advance(1.0);
        assert!(tick.warning);
        assert!(!tick.restarted);
        assert!(!timer.advance(0.5).warning);
        assert!(timer.is_warning());
    }

    #[test]
    fn test_timer_wraps() {
        let mut timer = PlacementTimer::new(4.0);
        timer.advance(3.5);
        let tick = timer.advance(1.0);
        assert!(tick.restarted);
        assert!((timer.elapsed() - 0.5).abs() < 1e-9);
        assert!(!timer.is_warning());
    }

    #[test]
    fn test_timer_reset() {
        let mut timer = PlacementTimer::default();
        timer.advance(5.0);
        timer.reset();
        assert_eq!(timer.elapsed(), 0.0);
        assert!(!timer.is_warning());
        assert_eq!(timer.progress(), 0.0);
    }
}
