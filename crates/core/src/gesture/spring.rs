use serde::{Deserialize, Serialize};

/// Displacement and velocity below which a spring snaps onto its target.
const REST_EPSILON: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Stiffness for a unit mass; the natural frequency is `sqrt(stiffness)`.
    pub stiffness: f64,
}

impl SpringConfig {
    pub fn angular_frequency(&self) -> f64 {
        self.stiffness.max(0.0).sqrt()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self { stiffness: 144.0 }
    }
}

/// A critically damped spring on one scalar.
///
/// Uses the closed-form solution `x(t) = (a + b·t)·e^(−ωt)` so the step is
/// exact for any `dt`. Starting from rest it approaches the target
/// monotonically and never crosses it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    value: f64,
    velocity: f64,
    target: f64,
    omega: f64,
}

impl Spring {
    pub fn at_rest(value: f64, config: SpringConfig) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            omega: config.angular_frequency(),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Jump to `value` immediately and stop any motion.
    pub fn set(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn animate_to(&mut self, target: f64) {
        self.target = target;
    }

    pub fn is_settled(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Advance by `dt` seconds. Returns `true` while still moving.
    pub fn step(&mut self, dt: f64) -> bool {
        if self.is_settled() {
            return false;
        }
        if dt <= 0.0 {
            return true;
        }
        if self.omega <= 0.0 {
            self.set(self.target);
            return false;
        }

        let x0 = self.value - self.target;
        let b = self.velocity + self.omega * x0;
        let decay = (-self.omega * dt).exp();
        let x = (x0 + b * dt) * decay;
        let v = (self.velocity - self.omega * b * dt) * decay;

        if x.abs() < REST_EPSILON && v.abs() < REST_EPSILON {
            self.set(self.target);
            return false;
        }
        self.value = self.target + x;
        self.velocity = v;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(spring: &mut Spring, dt: f64, max_steps: usize) -> Vec<f64> {
        let mut trace = Vec::new();
        for _ in 0..max_steps {
            let moving = spring.step(dt);
            trace.push(spring.value());
            if !moving {
                break;
            }
        }
        trace
    }

    #[test]
    fn settles_on_target() {
        let mut spring = Spring::at_rest(0.0, SpringConfig::default());
        spring.animate_to(600.0);
        run(&mut spring, 1.0 / 60.0, 1_000);
        assert!(spring.is_settled());
        assert_eq!(spring.value(), 600.0);
    }

    #[test]
    fn approaches_without_overshoot() {
        let mut spring = Spring::at_rest(150.0, SpringConfig::default());
        spring.animate_to(0.0);
        let trace = run(&mut spring, 1.0 / 60.0, 1_000);
        assert!(trace.iter().all(|v| *v >= 0.0));
        assert!(trace.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn set_stops_motion() {
        let mut spring = Spring::at_rest(0.0, SpringConfig::default());
        spring.animate_to(100.0);
        spring.step(0.016);
        spring.set(42.0);
        assert!(spring.is_settled());
        assert!(!spring.step(0.016));
        assert_eq!(spring.value(), 42.0);
    }

    #[test]
    fn zero_stiffness_jumps() {
        let mut spring = Spring::at_rest(0.0, SpringConfig { stiffness: 0.0 });
        spring.animate_to(10.0);
        assert!(!spring.step(0.016));
        assert_eq!(spring.value(), 10.0);
    }
}
