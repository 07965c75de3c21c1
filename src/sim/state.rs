//! Entity state and core simulation types

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::heading;

use super::profile::ForceProfile;

/// Viewport bounds in pixels, top-left anchored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Card dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardSize {
    pub width: f32,
    pub height: f32,
}

impl CardSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Offset from a card's top-left anchor to its center
    pub fn center_offset(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for CardSize {
    fn default() -> Self {
        Self {
            width: CARD_WIDTH,
            height: CARD_HEIGHT,
        }
    }
}

/// Who owns a card's motion right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMode {
    /// Advanced by the integration step each tick
    Simulated,
    /// Positioned directly by the pointer; integration is suspended
    Dragging,
}

/// Current direction of the chaotic magnetism cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChaosPhase {
    Attract,
    Repel,
}

impl ChaosPhase {
    pub fn flipped(self) -> Self {
        match self {
            ChaosPhase::Attract => ChaosPhase::Repel,
            ChaosPhase::Repel => ChaosPhase::Attract,
        }
    }
}

/// Phase clock for chaotic magnetism
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaosState {
    pub phase: ChaosPhase,
    /// Sim-clock timestamp of the last phase flip, seconds
    pub last_flip: f32,
}

impl Default for ChaosState {
    fn default() -> Self {
        Self {
            phase: ChaosPhase::Attract,
            last_flip: 0.0,
        }
    }
}

/// Trail point for card rendering (newest first)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    /// Card center at the time of recording
    pub pos: Vec2,
    pub opacity: f32,
}

/// The mutable simulation state of one floating card
#[derive(Debug, Clone)]
pub struct EntityState {
    /// Slot in the scene's position table
    pub index: usize,
    /// Top-left corner in viewport pixels
    pub pos: Vec2,
    pub vel: Vec2,
    /// Degrees, unbounded, accumulates with horizontal motion
    pub rotation: f32,
    /// Anisotropic scale; (1, 1) except the tick after a collision
    pub scale: Vec2,
    /// Motion trail, newest first, bounded length
    pub trail: Vec<TrailPoint>,
    pub control: ControlMode,
    /// Accumulated sim time, seconds
    pub clock: f32,
    /// Tick counter driving the magnetism throttle
    pub magnetism_tick: u32,
    pub chaos: ChaosState,
    /// Sim-clock timestamp of the last dash; None means a dash is allowed
    /// as soon as the chance rolls
    pub last_dash: Option<f32>,
}

impl EntityState {
    /// Spawn a card at a random padded position with a random velocity whose
    /// magnitude falls in the profile's initial speed range.
    pub fn spawn(
        index: usize,
        profile: &ForceProfile,
        viewport: Viewport,
        card: CardSize,
        rng: &mut impl Rng,
    ) -> Self {
        let pos = Vec2::new(
            spawn_coord(viewport.width, card.width, rng),
            spawn_coord(viewport.height, card.height, rng),
        );

        let range = profile.initial_speed;
        let speed = rng.random_range(range.min..=range.max);
        let angle = rng.random_range(0.0..std::f32::consts::TAU);

        Self {
            index,
            pos,
            vel: heading(angle) * speed,
            rotation: 0.0,
            scale: Vec2::ONE,
            trail: Vec::with_capacity(TRAIL_LENGTH),
            control: ControlMode::Simulated,
            clock: 0.0,
            magnetism_tick: 0,
            chaos: ChaosState::default(),
            last_dash: None,
        }
    }

    /// Record the card center to the trail and age out older points
    pub fn record_trail(&mut self, card: CardSize) {
        self.trail.truncate(TRAIL_LENGTH - 1);
        for point in &mut self.trail {
            point.opacity *= TRAIL_DECAY;
        }
        self.trail.retain(|point| point.opacity > TRAIL_MIN_OPACITY);
        self.trail.insert(
            0,
            TrailPoint {
                pos: self.pos + card.center_offset(),
                opacity: 1.0,
            },
        );
    }

    /// Axis-aligned bounding box top-left and bottom-right
    pub fn bounding_box(&self, card: CardSize) -> (Vec2, Vec2) {
        (self.pos, self.pos + Vec2::new(card.width, card.height))
    }
}

/// One spawn coordinate inside the padding band; degenerate viewports fall
/// back to centering instead of sampling an empty range.
fn spawn_coord(extent: f32, card_extent: f32, rng: &mut impl Rng) -> f32 {
    let safe = extent - card_extent - SPAWN_PADDING * 2.0;
    if safe > 0.0 {
        SPAWN_PADDING + rng.random_range(0.0..safe)
    } else {
        ((extent - card_extent) / 2.0).max(0.0)
    }
}
