//! Time-driven animations
//!
//! Both animations are pure functions of wall-clock time (milliseconds):
//! query them with `value_at(now)` instead of stepping them per frame.

use serde::{Deserialize, Serialize};

/// Linear interpolation between two values over a fixed duration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    /// Start time (ms)
    pub start: f64,
    /// Duration (ms)
    pub duration: f64,
}

impl Tween {
    pub fn new(from: f32, to: f32, start: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            start,
            duration,
        }
    }

    /// Progress in `[0, 1]`
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start) / self.duration).clamp(0.0, 1.0) as f32
    }

    /// Interpolated value at `now`, held at the ends outside the time window
    pub fn value_at(&self, now: f64) -> f32 {
        self.from + (self.to - self.from) * self.progress(now)
    }

    pub fn end_time(&self) -> f64 {
        self.start + self.duration.max(0.0)
    }

    pub fn is_finished(&self, now: f64) -> bool {
        now >= self.end_time()
    }
}

/// Spring parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringParams {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringParams {
    /// Undamped angular frequency (rad/s)
    fn omega0(&self) -> f32 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Damping ratio
    fn zeta(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// Displacement and speed below which a spring counts as at rest
const REST_THRESHOLD: f32 = 0.01;

/// Damped spring pulling a value toward a target
///
/// Solved in closed form from the state captured at the last retarget, so
/// the live value never depends on how often it is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    params: SpringParams,
    /// Value when the current segment started
    from: f32,
    /// Velocity (units/s) when the current segment started
    velocity: f32,
    target: f32,
    /// Segment start time (ms)
    start: f64,
}

impl Spring {
    /// A spring resting at `value`
    pub fn at_rest(value: f32, params: SpringParams) -> Self {
        Self {
            params,
            from: value,
            velocity: 0.0,
            target: value,
            start: 0.0,
        }
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Offset from target and velocity after `t` seconds of the segment
    fn solve(&self, t: f32) -> (f32, f32) {
        let x0 = self.from - self.target;
        let v0 = self.velocity;
        let w0 = self.params.omega0();
        let zeta = self.params.zeta();

        if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let decay = zeta * w0;
            let env = (-decay * t).exp();
            let (sin, cos) = (wd * t).sin_cos();
            let a = x0;
            let b = (v0 + decay * x0) / wd;
            let x = env * (a * cos + b * sin);
            let v = env * ((b * wd - decay * a) * cos - (a * wd + decay * b) * sin);
            (x, v)
        } else {
            // Critically damped (also used for overdamped parameters)
            let env = (-w0 * t).exp();
            let b = v0 + w0 * x0;
            let x = (x0 + b * t) * env;
            let v = (b - w0 * (x0 + b * t)) * env;
            (x, v)
        }
    }

    fn elapsed_secs(&self, now: f64) -> f32 {
        ((now - self.start).max(0.0) / 1000.0) as f32
    }

    /// Live value at `now`
    pub fn value_at(&self, now: f64) -> f32 {
        let (x, v) = self.solve(self.elapsed_secs(now));
        if x.abs() < REST_THRESHOLD && v.abs() < REST_THRESHOLD {
            self.target
        } else {
            self.target + x
        }
    }

    /// Live velocity (units/s) at `now`
    pub fn velocity_at(&self, now: f64) -> f32 {
        self.solve(self.elapsed_secs(now)).1
    }

    pub fn is_settled(&self, now: f64) -> bool {
        let (x, v) = self.solve(self.elapsed_secs(now));
        x.abs() < REST_THRESHOLD && v.abs() < REST_THRESHOLD
    }

    /// Aim at a new target, continuing from the in-flight value and velocity
    pub fn retarget(&mut self, target: f32, now: f64) {
        let value = self.value_at(now);
        let velocity = self.velocity_at(now);
        self.from = value;
        self.velocity = velocity;
        self.target = target;
        self.start = now;
    }
}
