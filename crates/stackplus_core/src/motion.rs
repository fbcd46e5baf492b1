//! Movement of the falling block
//!
//! The control block sweeps the plane on a triangle wave in x and y while
//! the pointer chooses its yaw. After each stack the sweep restarts from a
//! corner, the x direction flips, and the yaw gets a fresh random offset.

use rand::Rng;
use stackplus_geom::Transform;

/// Triangle wave in `[-amplitude, amplitude]` with the given period
///
/// `shift` moves the wave by a fraction of a period; a shift of 0 starts at
/// `+amplitude`, a shift of -0.5 at `-amplitude`.
pub fn ctrl_pos(amplitude: f64, period: f64, shift: f64, t: f64) -> f64 {
    let phase = (t / period - shift).rem_euclid(1.0);
    4.0 * amplitude * (phase - 0.5).abs() - amplitude
}

/// Random yaw offset: a multiple of `step` degrees in `0..=360`
pub fn random_theta<R: Rng + ?Sized>(rng: &mut R, step: f64) -> f64 {
    if step <= 0.0 {
        return 0.0;
    }
    let slots = (360.0 / step).floor() as u32;
    f64::from(rng.gen_range(0..=slots)) * step
}

/// Yaw picked by a horizontal pointer position, quantized to `step` degrees
///
/// `fraction` is the pointer x over the window width; it is mirrored when
/// `invert` is set.
pub fn pointer_theta(fraction: f64, offset: f64, step: f64, invert: bool) -> f64 {
    let fraction = if invert { 1.0 - fraction } else { fraction };
    let theta = (360.0 * fraction + offset).rem_euclid(360.0);
    if step <= 0.0 {
        theta
    } else {
        (theta / step).floor() * step
    }
}

/// Parameters of the sweep
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionConfig {
    /// Half extent of the sweep
    pub amplitude: f64,
    /// Seconds for one full back-and-forth
    pub period: f64,
    /// Yaw quantization in degrees
    pub theta_step: f64,
    /// Mirror the pointer horizontally
    pub invert_x_axis: bool,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            amplitude: 4.0,
            period: 3.5,
            theta_step: 5.0,
            invert_x_axis: false,
        }
    }
}

/// Sweep state of the control block
#[derive(Clone, Debug)]
pub struct Motion {
    config: MotionConfig,
    phase_time: f64,
    forward: bool,
    theta_offset: f64,
}

impl Motion {
    /// Start a sweep in the top-left corner
    pub fn new<R: Rng + ?Sized>(config: MotionConfig, rng: &mut R) -> Self {
        Self {
            config,
            phase_time: 0.0,
            forward: true,
            theta_offset: random_theta(rng, config.theta_step),
        }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Seconds into the current sweep, always below the period
    pub fn phase_time(&self) -> f64 {
        self.phase_time
    }

    pub fn is_forward(&self) -> bool {
        self.forward
    }

    pub fn theta_offset(&self) -> f64 {
        self.theta_offset
    }

    /// Pose of the control block for a pointer at `pointer_fraction`
    pub fn pose(&self, pointer_fraction: f64) -> Transform {
        let MotionConfig { amplitude, period, theta_step, invert_x_axis } = self.config;
        let x_shift = if self.forward { -0.5 } else { 0.0 };
        Transform::new(
            ctrl_pos(amplitude, period, x_shift, self.phase_time),
            ctrl_pos(amplitude, period, 0.0, self.phase_time),
            0.0,
            pointer_theta(pointer_fraction, self.theta_offset, theta_step, invert_x_axis),
        )
    }

    /// Advance the sweep by `dt` seconds
    pub fn advance(&mut self, dt: f64) {
        if self.config.period > 0.0 {
            self.phase_time = (self.phase_time + dt).rem_euclid(self.config.period);
        }
    }

    /// Restart after a stack: back to the corner, other direction, new yaw
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.phase_time = 0.0;
        self.forward = !self.forward;
        self.theta_offset = random_theta(rng, self.config.theta_step);
    }

    pub fn set_invert_x_axis(&mut self, invert: bool) {
        self.config.invert_x_axis = invert;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_ctrl_pos_extremes() {
        assert!(approx_eq(ctrl_pos(4.0, 3.5, 0.0, 0.0), 4.0));
        assert!(approx_eq(ctrl_pos(4.0, 3.5, -0.5, 0.0), -4.0));
        // half a period later the wave is at the other end
        assert!(approx_eq(ctrl_pos(4.0, 3.5, 0.0, 1.75), -4.0));
        // a quarter period crosses zero
        assert!(approx_eq(ctrl_pos(4.0, 3.5, 0.0, 0.875), 0.0));
    }

    #[test]
    fn test_ctrl_pos_is_periodic_and_bounded() {
        for i in 0..100 {
            let t = i as f64 * 0.137;
            let v = ctrl_pos(4.0, 3.5, 0.0, t);
            assert!((-4.0..=4.0).contains(&v));
            assert!(approx_eq(v, ctrl_pos(4.0, 3.5, 0.0, t + 3.5)));
        }
    }

    #[test]
    fn test_random_theta_is_on_grid() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let theta = random_theta(&mut rng, 5.0);
            assert!((0.0..=360.0).contains(&theta));
            assert!(approx_eq(theta % 5.0, 0.0));
        }
    }

    #[test]
    fn test_pointer_theta() {
        assert!(approx_eq(pointer_theta(0.0, 0.0, 5.0, false), 0.0));
        assert!(approx_eq(pointer_theta(0.5, 0.0, 5.0, false), 180.0));
        // 0.26 * 360 = 93.6, quantized down to 90
        assert!(approx_eq(pointer_theta(0.26, 0.0, 5.0, false), 90.0));
        // offset wraps around
        assert!(approx_eq(pointer_theta(0.5, 270.0, 5.0, false), 90.0));
        // inverted pointer mirrors the fraction
        assert!(approx_eq(pointer_theta(0.25, 0.0, 5.0, true), 270.0));
    }

    #[test]
    fn test_pose_starts_top_left() {
        let motion = Motion::new(MotionConfig::default(), &mut StdRng::seed_from_u64(1));
        let pose = motion.pose(0.0);
        assert!(approx_eq(pose.dx, -4.0));
        assert!(approx_eq(pose.dy, 4.0));
        assert_eq!(pose.dz, 0.0);
    }

    #[test]
    fn test_restart_flips_direction() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut motion = Motion::new(MotionConfig::default(), &mut rng);
        motion.advance(1.0);
        motion.restart(&mut rng);
        assert!(!motion.is_forward());
        assert_eq!(motion.phase_time(), 0.0);
        // backwards sweeps start on the right
        assert!(approx_eq(motion.pose(0.0).dx, 4.0));
    }

    #[test]
    fn test_advance_wraps_period() {
        let mut motion = Motion::new(MotionConfig::default(), &mut StdRng::seed_from_u64(1));
        motion.advance(3.0);
        motion.advance(1.0);
        assert!(approx_eq(motion.phase_time(), 0.5));
    }
}
