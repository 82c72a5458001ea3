//! Damped spring animation
//!
//! Springs are solved analytically from the time elapsed since they
//! started, so a frame that arrives late lands on the same curve as one
//! that arrives on time.

use std::time::{Duration, Instant};

/// Physical parameters of a spring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Finish as soon as the value would cross its target
    pub overshoot_clamping: bool,
    pub rest_displacement_threshold: f64,
    pub rest_speed_threshold: f64,
}

impl SpringConfig {
    pub const DEFAULT_TENSION: f64 = 40.0;
    pub const DEFAULT_FRICTION: f64 = 7.0;

    /// Build from the tension/friction pair used by most UI toolkits.
    pub fn from_tension_friction(tension: f64, friction: f64) -> Self {
        Self {
            stiffness: (tension - 30.0) * 3.62 + 194.0,
            damping: (friction - 8.0) * 3.0 + 25.0,
            mass: 1.0,
            overshoot_clamping: false,
            rest_displacement_threshold: 0.001,
            rest_speed_threshold: 0.001,
        }
    }

    pub fn clamped(self) -> Self {
        Self {
            overshoot_clamping: true,
            ..self
        }
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::from_tension_friction(Self::DEFAULT_TENSION, Self::DEFAULT_FRICTION)
    }
}

/// A single spring run from `from` to `to`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    from: f64,
    to: f64,
    initial_velocity: f64,
}

/// Value of a spring at some point in time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub value: f64,
    pub velocity: f64,
    pub at_rest: bool,
}

impl Spring {
    pub fn new(config: SpringConfig, from: f64, to: f64, initial_velocity: f64) -> Self {
        Self {
            config,
            from,
            to,
            initial_velocity,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn sample(&self, elapsed: Duration) -> Sample {
        let SpringConfig {
            stiffness: k,
            damping: c,
            mass: m,
            ..
        } = self.config;
        let t = elapsed.as_secs_f64();
        let v0 = -self.initial_velocity;
        let x0 = self.to - self.from;

        let zeta = c / (2.0 * (k * m).sqrt());
        let omega0 = (k / m).sqrt();

        let (position, velocity) = if zeta < 1.0 {
            let omega1 = omega0 * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * omega0 * t).exp();
            let a = (v0 + zeta * omega0 * x0) / omega1;
            let (sin, cos) = (omega1 * t).sin_cos();
            let position = self.to - envelope * (a * sin + x0 * cos);
            let velocity = zeta * omega0 * envelope * (a * sin + x0 * cos)
                - envelope * (cos * (v0 + zeta * omega0 * x0) - omega1 * x0 * sin);
            (position, velocity)
        } else {
            let envelope = (-omega0 * t).exp();
            let position = self.to - envelope * (x0 + (v0 + omega0 * x0) * t);
            let velocity = envelope * (v0 * (t * omega0 - 1.0) + t * x0 * omega0 * omega0);
            (position, velocity)
        };

        let overshooting = self.config.overshoot_clamping
            && k != 0.0
            && if self.from < self.to {
                position > self.to
            } else {
                position < self.to
            };
        let slow = velocity.abs() <= self.config.rest_speed_threshold;
        let close = k == 0.0 || (self.to - position).abs() <= self.config.rest_displacement_threshold;

        if overshooting || (slow && close) {
            Sample {
                value: if k != 0.0 { self.to } else { position },
                velocity: 0.0,
                at_rest: true,
            }
        } else {
            Sample {
                value: position,
                velocity,
                at_rest: false,
            }
        }
    }
}

/// Where a value's animation stands after an `advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Idle,
    Running,
    /// Came to rest during this advance
    Finished {
        generation: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Run {
    spring: Spring,
    started_at: Instant,
    generation: u64,
}

/// A scalar driven by at most one spring at a time
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedValue {
    value: f64,
    velocity: f64,
    run: Option<Run>,
}

impl AnimatedValue {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            velocity: 0.0,
            run: None,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn is_animating(&self) -> bool {
        self.run.is_some()
    }

    pub fn target(&self) -> Option<f64> {
        self.run.map(|run| run.spring.target())
    }

    /// Start a spring toward `to` from wherever the value is now.
    ///
    /// A running spring is replaced and its completion is never reported.
    pub fn animate_to(&mut self, to: f64, config: SpringConfig, now: Instant, generation: u64) {
        self.run = Some(Run {
            spring: Spring::new(config, self.value, to, self.velocity),
            started_at: now,
            generation,
        });
    }

    /// Jump to `value` and drop any running spring.
    pub fn set_value(&mut self, value: f64) {
        self.value = value;
        self.velocity = 0.0;
        self.run = None;
    }

    pub fn advance(&mut self, now: Instant) -> Progress {
        let Some(run) = self.run else {
            return Progress::Idle;
        };
        let sample = run
            .spring
            .sample(now.saturating_duration_since(run.started_at));
        self.value = sample.value;
        self.velocity = sample.velocity;
        if sample.at_rest {
            self.run = None;
            Progress::Finished {
                generation: run.generation,
            }
        } else {
            Progress::Running
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn frames(spring: &Spring, step_ms: u64, max_ms: u64) -> Vec<Sample> {
        (0..=max_ms / step_ms)
            .map(|i| spring.sample(Duration::from_millis(i * step_ms)))
            .collect()
    }

    #[test]
    fn test_default_config_matches_tension_friction() {
        let config = SpringConfig::default();
        assert!((config.stiffness - 230.2).abs() < 1e-9);
        assert!((config.damping - 22.0).abs() < 1e-9);
        assert_eq!(config.mass, 1.0);
        assert!(!config.overshoot_clamping);
        assert!(config.clamped().overshoot_clamping);
    }

    #[test]
    fn test_starts_at_from() {
        let spring = Spring::new(SpringConfig::default().clamped(), -300.0, 0.0, 0.0);
        let sample = spring.sample(Duration::ZERO);
        assert_eq!(sample.value, -300.0);
        assert!(!sample.at_rest);
    }

    #[test]
    fn test_clamped_spring_never_passes_target_rising() {
        let spring = Spring::new(SpringConfig::default().clamped(), -300.0, 0.0, 0.0);
        let samples = frames(&spring, 16, 3000);
        assert!(samples.iter().all(|s| s.value <= 0.0));
        let last = samples.last().copied().expect("has frames");
        assert!(last.at_rest);
        assert_eq!(last.value, 0.0);
    }

    #[test]
    fn test_clamped_spring_never_passes_target_falling() {
        let spring = Spring::new(SpringConfig::default().clamped(), 0.7, 0.0, 0.0);
        let samples = frames(&spring, 16, 3000);
        assert!(samples.iter().all(|s| s.value >= 0.0));
        assert_eq!(samples.last().map(|s| s.value), Some(0.0));
    }

    #[test]
    fn test_unclamped_spring_overshoots() {
        let spring = Spring::new(SpringConfig::default(), 0.0, 1.0, 0.0);
        let samples = frames(&spring, 8, 3000);
        assert!(samples.iter().any(|s| s.value > 1.0));
        assert_eq!(samples.last().map(|s| s.at_rest), Some(true));
    }

    #[test]
    fn test_overdamped_spring_settles() {
        let config = SpringConfig {
            damping: 80.0,
            ..SpringConfig::default()
        };
        let spring = Spring::new(config, 0.0, 10.0, 0.0);
        let samples = frames(&spring, 16, 10_000);
        assert!(samples.iter().all(|s| s.value <= 10.0 + 1e-9));
        assert_eq!(samples.last().map(|s| s.at_rest), Some(true));
    }

    #[test]
    fn test_spring_at_target_rests_immediately() {
        let spring = Spring::new(SpringConfig::default().clamped(), 0.0, 0.0, 0.0);
        let sample = spring.sample(Duration::ZERO);
        assert!(sample.at_rest);
        assert_eq!(sample.value, 0.0);
    }

    #[test]
    fn test_animated_value_reports_generation_once() {
        let start = Instant::now();
        let mut value = AnimatedValue::new(0.0);
        assert_eq!(value.advance(start), Progress::Idle);

        value.animate_to(0.7, SpringConfig::default().clamped(), start, 3);
        assert!(value.is_animating());
        assert_eq!(value.target(), Some(0.7));
        assert_eq!(
            value.advance(start + Duration::from_millis(16)),
            Progress::Running
        );
        assert_eq!(
            value.advance(start + Duration::from_secs(5)),
            Progress::Finished { generation: 3 }
        );
        assert_eq!(value.value(), 0.7);
        assert_eq!(value.advance(start + Duration::from_secs(6)), Progress::Idle);
    }

    #[test]
    fn test_redirect_keeps_in_flight_value_and_velocity() {
        let start = Instant::now();
        let mut value = AnimatedValue::new(0.0);
        value.animate_to(1.0, SpringConfig::default().clamped(), start, 1);
        let mid = start + Duration::from_millis(50);
        value.advance(mid);
        let in_flight = value.value();
        let velocity = value.velocity();
        assert!(in_flight > 0.0 && in_flight < 1.0);
        assert!(velocity > 0.0);

        value.animate_to(0.0, SpringConfig::default().clamped(), mid, 2);
        value.advance(mid);
        assert!((value.value() - in_flight).abs() < 1e-9);

        assert_eq!(
            value.advance(mid + Duration::from_secs(5)),
            Progress::Finished { generation: 2 }
        );
        assert_eq!(value.value(), 0.0);
    }

    #[test]
    fn test_set_value_drops_run() {
        let start = Instant::now();
        let mut value = AnimatedValue::new(0.0);
        value.animate_to(1.0, SpringConfig::default(), start, 1);
        value.set_value(0.5);
        assert!(!value.is_animating());
        assert_eq!(value.advance(start + Duration::from_secs(1)), Progress::Idle);
        assert_eq!(value.value(), 0.5);
    }
}
