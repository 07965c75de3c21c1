//! Card Drift - floating-card physics for a character showcase
//!
//! Core modules:
//! - `sim`: deterministic simulation (force profiles, integration, scenes)
//!
//! The engine animates a handful of free-floating cards inside a bounded
//! viewport. Each card follows a per-class [`ForceProfile`] (gravity bias,
//! inter-card magnetism, random impulses, dash bursts), bounces off the
//! viewport edges with squash/stretch feedback, and can be handed over to
//! direct pointer control mid-flight. Rendering, audio, and input tracking
//! are the embedder's job; this crate only produces position, rotation,
//! scale, and trail data once per frame.

pub mod sim;

pub use sim::{
    CardSize, ControlMode, Dash, EntityState, ForceProfile, Magnetism, PositionTable, Scene,
    SpeedRange, TrailPoint, Viewport, step,
};

use glam::Vec2;

/// Simulation constants
pub mod consts {
    /// Wall-clock duration of one nominal tick (dt = 1.0), in seconds.
    /// Tick durations are expressed as multiples of a 16 ms frame.
    pub const NOMINAL_FRAME_SECS: f32 = 0.016;
    /// Time-scale cap per tick, absorbs frame-rate hiccups
    pub const MAX_DT: f32 = 2.0;

    /// Card dimensions in pixels (fixed by the presentation layer)
    pub const CARD_WIDTH: f32 = 240.0;
    pub const CARD_HEIGHT: f32 = 160.0;
    /// Margin kept between a freshly spawned card and the viewport edges
    pub const SPAWN_PADDING: f32 = 100.0;

    /// Magnetism runs every Nth tick; the pair scan is the only O(n²) cost
    pub const MAGNETISM_INTERVAL: u32 = 3;
    /// Chaotic magnetism interaction range, regardless of profile radius
    pub const CHAOS_RANGE: f32 = 400.0;
    /// Chaotic magnetism base force
    pub const CHAOS_FORCE: f32 = 0.5;

    /// Per-tick probability of a random impulse (when the profile enables them)
    pub const IMPULSE_CHANCE: f32 = 0.005;
    /// Full width of the per-axis impulse kick, centered on zero
    pub const IMPULSE_KICK: f32 = 3.0;

    /// Per-tick probability of a dash once the cooldown has elapsed
    pub const DASH_CHANCE: f32 = 0.02;
    /// Dash snaps speed to this magnitude (pixels per tick)
    pub const DASH_SPEED: f32 = 12.0;

    /// Hard speed cap; guards against impulse/magnetism accumulation
    pub const MAX_SPEED: f32 = 60.0;

    /// Trail history length, newest first
    pub const TRAIL_LENGTH: usize = 6;
    /// Per-tick opacity decay of existing trail points
    pub const TRAIL_DECAY: f32 = 0.85;
    /// Trail points below this opacity are dropped
    pub const TRAIL_MIN_OPACITY: f32 = 0.1;

    /// Rotation rate as a fraction of horizontal speed (degrees per tick)
    pub const ROTATION_FACTOR: f32 = 0.5;
    /// Speed at which collision squash saturates
    pub const SQUASH_SPEED_REF: f32 = 10.0;

    /// Factor embedders apply to raw pointer velocity (pixels/second) to get
    /// a release velocity in simulation units for [`crate::Scene::end_drag`]
    pub const POINTER_VELOCITY_SCALE: f32 = 0.02;
}

/// Unit vector pointing at `angle` radians
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
