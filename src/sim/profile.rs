//! Force profiles - per-class simulation parameters
//!
//! A profile is static lookup data keyed by entity class. It is never mutated
//! at runtime; values are trusted presets and get no validation. A zero
//! radius or zero force is the legitimate way to disable an effect.

use serde::{Deserialize, Serialize};

/// Magnitude range for the randomly directed spawn velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
}

impl SpeedRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

/// Long-range force between cards, based on the shared position table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Magnetism {
    /// No interaction
    None,
    /// Participates in the table but exerts no force
    Neutral,
    /// Pushes other cards away, force fading linearly with distance
    Repulsion { radius: f32, force: f32 },
    /// Pulls toward other cards, force growing with distance inside the radius
    Attraction { radius: f32, force: f32 },
    /// Alternates between attract and repel every `phase_duration` seconds,
    /// at a fixed 400px range regardless of any configured radius
    Chaotic { phase_duration: f32 },
}

/// Periodic high-speed burst in a random direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dash {
    /// Minimum seconds between bursts
    pub cooldown: f32,
}

/// Simulation parameters for one entity class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceProfile {
    /// Vertical acceleration per tick; negative levitates
    pub gravity: f32,
    /// Velocity magnitude retained after a wall bounce, (0, 1]
    pub bounce: f32,
    /// Multiplicative velocity decay, applied once per tick, (0, 1]
    pub air_friction: f32,
    /// Spawn speed range
    pub initial_speed: SpeedRange,
    /// Inter-card force mode
    pub magnetism: Magnetism,
    /// Small stochastic velocity kicks
    pub random_impulses: bool,
    /// Periodic dash burst
    pub dash: Option<Dash>,
    /// Deformation intensity on collision, >= 0
    pub squash_stretch: f32,
}

/// Preset catalog: the five shipped archetypes.
///
/// Every card floats - none of the presets carries downward gravity.
impl ForceProfile {
    /// Zero gravity, lively bounce, gentle drift
    pub fn drifter() -> Self {
        Self {
            gravity: 0.0,
            bounce: 0.85,
            air_friction: 0.98,
            initial_speed: SpeedRange::new(3.0, 6.0),
            magnetism: Magnetism::Neutral,
            random_impulses: false,
            dash: None,
            squash_stretch: 0.25,
        }
    }

    /// Rises slowly and keeps its distance from the others
    pub fn levitator() -> Self {
        Self {
            gravity: -0.15,
            bounce: 0.6,
            air_friction: 0.95,
            initial_speed: SpeedRange::new(1.0, 2.5),
            magnetism: Magnetism::Repulsion {
                radius: 300.0,
                force: 0.8,
            },
            random_impulses: false,
            dash: None,
            squash_stretch: 0.1,
        }
    }

    /// Fast, erratic, flips between attracting and repelling the pack
    pub fn trickster() -> Self {
        Self {
            gravity: 0.0,
            bounce: 0.9,
            air_friction: 0.99,
            initial_speed: SpeedRange::new(4.0, 8.0),
            magnetism: Magnetism::Chaotic {
                phase_duration: 2.0,
            },
            random_impulses: true,
            dash: None,
            squash_stretch: 0.15,
        }
    }

    /// Ignores the others, punctuates its drift with sudden dashes
    pub fn striker() -> Self {
        Self {
            gravity: 0.0,
            bounce: 0.8,
            air_friction: 0.93,
            initial_speed: SpeedRange::new(5.0, 9.0),
            magnetism: Magnetism::None,
            random_impulses: false,
            dash: Some(Dash { cooldown: 3.0 }),
            squash_stretch: 0.2,
        }
    }

    /// Lifts slightly and draws the pack together
    pub fn gatherer() -> Self {
        Self {
            gravity: -0.05,
            bounce: 0.75,
            air_friction: 0.96,
            initial_speed: SpeedRange::new(3.0, 5.0),
            magnetism: Magnetism::Attraction {
                radius: 250.0,
                force: 0.3,
            },
            random_impulses: false,
            dash: None,
            squash_stretch: 0.3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_float() {
        for profile in [
            ForceProfile::drifter(),
            ForceProfile::levitator(),
            ForceProfile::trickster(),
            ForceProfile::striker(),
            ForceProfile::gatherer(),
        ] {
            assert!(profile.gravity <= 0.0);
            assert!(profile.bounce > 0.0 && profile.bounce <= 1.0);
            assert!(profile.air_friction > 0.0 && profile.air_friction <= 1.0);
            assert!(profile.initial_speed.min <= profile.initial_speed.max);
            assert!(profile.squash_stretch >= 0.0);
        }
    }

    #[test]
    fn test_profile_loads_from_json() {
        let json = r#"{
            "gravity": -0.15,
            "bounce": 0.6,
            "air_friction": 0.95,
            "initial_speed": { "min": 1.0, "max": 2.5 },
            "magnetism": { "Repulsion": { "radius": 300.0, "force": 0.8 } },
            "random_impulses": false,
            "dash": null,
            "squash_stretch": 0.1
        }"#;

        let profile: ForceProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile, ForceProfile::levitator());
    }
}
