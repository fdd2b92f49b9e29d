//! Tunable constants of the particle simulation.
//!
//! Defaults reproduce the storybook's feel exactly. Configs may override any
//! field; [`FieldParams::validate`] rejects ranges that would make sampling
//! panic or the motion rule degenerate.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// An inclusive sampling range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    fn check(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min.is_finite() && self.max.is_finite() && self.min <= self.max {
            Ok(())
        } else {
            Err(ConfigError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Simulation parameters shared by every particle of a field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    /// Drift particles spawned on every resize.
    pub ambient_count: usize,
    /// Hard cap on the population after a burst.
    pub max_particles: usize,
    /// Particles released by one burst when the caller does not say otherwise.
    pub burst_count: usize,
    pub radius: Span,
    /// Horizontal jitter of drifting particles.
    pub drift_vx: Span,
    /// Fall speed of drifting particles (positive is downward).
    pub drift_vy: Span,
    /// Initial speed of burst particles.
    pub burst_speed: Span,
    pub burst_friction: f32,
    pub burst_gravity: f32,
    /// A burst particle settles once both velocity components are below this.
    pub settle_threshold: f32,
    /// Amplitude of the lateral sway added to `x` every step.
    pub sway: f32,
    /// Upper bound of the per-particle oscillation speed.
    pub max_phase_speed: f32,
    /// Pointer influence radius in pixels.
    pub influence_radius: f32,
    /// Push applied at zero distance from the pointer.
    pub push_strength: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            ambient_count: 80,
            max_particles: 200,
            burst_count: 30,
            radius: Span::new(2.0, 6.0),
            drift_vx: Span::new(-0.25, 0.25),
            drift_vy: Span::new(0.2, 0.7),
            burst_speed: Span::new(8.0, 23.0),
            burst_friction: 0.92,
            burst_gravity: 0.2,
            settle_threshold: 0.5,
            sway: 0.5,
            max_phase_speed: 0.05,
            influence_radius: 300.0,
            push_strength: 4.0,
        }
    }
}

impl FieldParams {
    /// Reject parameter sets that break sampling or the mode invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.radius.check("radius")?;
        self.drift_vx.check("drift_vx")?;
        self.drift_vy.check("drift_vy")?;
        self.burst_speed.check("burst_speed")?;

        if self.radius.min <= 0.0 {
            return Err(ConfigError::InvalidValue {
                name: "radius.min",
                value: self.radius.min,
            });
        }
        // Friction must actually decay or bursts never settle.
        if !(self.burst_friction > 0.0 && self.burst_friction < 1.0) {
            return Err(ConfigError::InvalidValue {
                name: "burst_friction",
                value: self.burst_friction,
            });
        }
        let non_negative = [
            ("burst_gravity", self.burst_gravity),
            ("settle_threshold", self.settle_threshold),
            ("sway", self.sway),
            ("max_phase_speed", self.max_phase_speed),
            ("influence_radius", self.influence_radius),
            ("push_strength", self.push_strength),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidValue { name, value });
            }
        }
        if self.burst_gravity == 0.0 {
            return Err(ConfigError::InvalidValue {
                name: "burst_gravity",
                value: 0.0,
            });
        }
        if self.max_particles == 0 {
            return Err(ConfigError::InvalidValue {
                name: "max_particles",
                value: 0.0,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        FieldParams::default().validate().unwrap();
    }

    #[test]
    fn test_inverted_range_rejected() {
        let params = FieldParams {
            radius: Span::new(6.0, 2.0),
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::InvalidRange { name: "radius", .. })
        ));
    }

    #[test]
    fn test_friction_must_decay() {
        let params = FieldParams {
            burst_friction: 1.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let params: FieldParams = serde_json::from_str(r#"{ "ambient_count": 12 }"#).unwrap();
        assert_eq!(params.ambient_count, 12);
        assert_eq!(params.max_particles, 200);
        assert_eq!(params.burst_speed, Span::new(8.0, 23.0));
    }
}
