//! Scene driver
//!
//! Owns one simulation per visible card plus the shared position table, and
//! advances everything once per display refresh. Selection changes tear the
//! whole scene down: drop the `Scene` and build a new one. The table and
//! every entity die with the value, so no stale tick can outlive its scene.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::profile::ForceProfile;
use super::state::{CardSize, ControlMode, EntityState, Viewport};
use super::step::step;
use super::table::PositionTable;

/// One card's simulation: state, class parameters, and its own RNG stream
#[derive(Debug, Clone)]
pub struct EntitySim {
    pub state: EntityState,
    pub profile: ForceProfile,
    rng: Pcg32,
}

/// All simulations for the currently selected character's cards
#[derive(Debug, Clone)]
pub struct Scene {
    viewport: Viewport,
    card: CardSize,
    table: PositionTable,
    entities: Vec<EntitySim>,
}

impl Scene {
    /// Spawn `count` cards sharing one force profile, at fresh random
    /// positions and velocities derived from `seed`.
    pub fn new(
        profile: &ForceProfile,
        count: usize,
        viewport: Viewport,
        card: CardSize,
        seed: u64,
    ) -> Self {
        let mut table = PositionTable::new(count);
        let mut entities = Vec::with_capacity(count);

        for index in 0..count {
            let mut rng = Pcg32::seed_from_u64(entity_seed(seed, index));
            let state = EntityState::spawn(index, profile, viewport, card, &mut rng);
            table.publish(index, state.pos);
            entities.push(EntitySim {
                state,
                profile: profile.clone(),
                rng,
            });
        }

        log::info!(
            "scene created: {} cards in {}x{} viewport (seed {})",
            count,
            viewport.width,
            viewport.height,
            seed
        );

        Self {
            viewport,
            card,
            table,
            entities,
        }
    }

    /// Advance every simulated card by one tick. Dragged cards are skipped;
    /// their positions flow in through [`Scene::drag_to`].
    pub fn advance(&mut self, dt: f32) {
        for entity in &mut self.entities {
            step(
                &mut entity.state,
                &entity.profile,
                &mut self.table,
                self.viewport,
                self.card,
                dt,
                &mut entity.rng,
            );
        }
    }

    /// Hand a card's motion over to the pointer
    pub fn begin_drag(&mut self, index: usize) {
        self.entities[index].state.control = ControlMode::Dragging;
        log::debug!("card {index} drag started");
    }

    /// Feed a raw pointer position while dragging. The position is published
    /// to the table so other cards' magnetism reacts to the dragged card in
    /// real time; no physics runs against it.
    pub fn drag_to(&mut self, index: usize, pos: Vec2) {
        let entity = &mut self.entities[index];
        if entity.state.control != ControlMode::Dragging {
            return;
        }
        entity.state.pos = pos;
        self.table.publish(index, pos);
    }

    /// Release a dragged card, seeding its velocity from the measured
    /// release gesture so the throw carries through.
    pub fn end_drag(&mut self, index: usize, release_vel: Vec2) {
        let entity = &mut self.entities[index];
        entity.state.control = ControlMode::Simulated;
        entity.state.vel = release_vel;
        log::debug!(
            "card {index} released with velocity ({}, {})",
            release_vel.x,
            release_vel.y
        );
    }

    /// Adopt new viewport bounds. In-flight positions are left alone; they
    /// re-clamp at their next natural collision.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        log::debug!(
            "viewport resized to {}x{}",
            viewport.width,
            viewport.height
        );
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn card(&self) -> CardSize {
        self.card
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Per-card render output: position, rotation, scale, trail
    pub fn entity(&self, index: usize) -> &EntityState {
        &self.entities[index].state
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntityState> {
        self.entities.iter().map(|entity| &entity.state)
    }

    pub fn table(&self) -> &PositionTable {
        &self.table
    }
}

/// Decorrelate per-entity RNG streams from the scene seed
fn entity_seed(seed: u64, index: usize) -> u64 {
    seed.wrapping_add((index as u64 + 1).wrapping_mul(2654435761))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_scene() -> Scene {
        Scene::new(
            &ForceProfile::drifter(),
            5,
            Viewport::new(1280.0, 720.0),
            CardSize::default(),
            12345,
        )
    }

    #[test]
    fn test_scene_spawns_and_publishes() {
        let scene = test_scene();
        assert_eq!(scene.len(), 5);
        assert_eq!(scene.table().len(), 5);
        for state in scene.entities() {
            assert_eq!(scene.table().get(state.index), state.pos);
            assert_eq!(state.control, ControlMode::Simulated);
        }
    }

    #[test]
    fn test_same_seed_same_scene() {
        let mut a = test_scene();
        let mut b = test_scene();

        for _ in 0..120 {
            a.advance(1.0);
            b.advance(1.0);
        }

        for (sa, sb) in a.entities().zip(b.entities()) {
            assert_eq!(sa.pos, sb.pos);
            assert_eq!(sa.vel, sb.vel);
            assert_eq!(sa.rotation, sb.rotation);
        }
    }

    #[test]
    fn test_entities_spread_apart() {
        let scene = test_scene();
        let positions: Vec<_> = scene.entities().map(|state| state.pos).collect();
        let all_same = positions.windows(2).all(|pair| pair[0] == pair[1]);
        assert!(!all_same, "entities should not all spawn at one point");
    }

    #[test]
    fn test_drag_handoff_round_trip() {
        let mut scene = test_scene();

        scene.begin_drag(2);
        assert_eq!(scene.entity(2).control, ControlMode::Dragging);

        // Dragged card holds still under advance; the rest keep moving
        let frozen = scene.entity(2).pos;
        let moving = scene.entity(0).pos;
        scene.advance(1.0);
        assert_eq!(scene.entity(2).pos, frozen);
        assert_ne!(scene.entity(0).pos, moving);

        scene.drag_to(2, Vec2::new(600.0, 400.0));
        assert_eq!(scene.entity(2).pos, Vec2::new(600.0, 400.0));
        assert_eq!(scene.table().get(2), Vec2::new(600.0, 400.0));

        scene.end_drag(2, Vec2::new(3.0, -2.0));
        assert_eq!(scene.entity(2).control, ControlMode::Simulated);
        assert_eq!(scene.entity(2).vel, Vec2::new(3.0, -2.0));

        // Motion resumes from the drop point, not the pre-drag position
        scene.advance(1.0);
        assert_ne!(scene.entity(2).pos, Vec2::new(600.0, 400.0));
    }

    #[test]
    fn test_drag_to_ignored_while_simulated() {
        let mut scene = test_scene();
        let before = scene.entity(0).pos;
        scene.drag_to(0, Vec2::new(999.0, 999.0));
        assert_eq!(scene.entity(0).pos, before);
    }

    #[test]
    fn test_resize_defers_reclamp_to_next_collision() {
        let mut scene = Scene::new(
            &ForceProfile::drifter(),
            1,
            Viewport::new(1920.0, 1080.0),
            CardSize::default(),
            7,
        );

        // Park the card far out, then shrink the viewport past it
        scene.begin_drag(0);
        scene.drag_to(0, Vec2::new(800.0, 500.0));
        scene.end_drag(0, Vec2::ZERO);
        scene.set_viewport(Viewport::new(400.0, 300.0));

        // Resize alone does not move the card
        assert_eq!(scene.entity(0).pos, Vec2::new(800.0, 500.0));

        // The very next tick resolves against the new bounds
        scene.advance(1.0);
        let (top_left, bottom_right) = scene.entity(0).bounding_box(scene.card());
        assert!(top_left.x >= 0.0 && top_left.y >= 0.0);
        assert!(bottom_right.x <= 400.0 && bottom_right.y <= 300.0);
    }

    #[test]
    fn test_distinct_seeds_differ() {
        let a = test_scene();
        let b = Scene::new(
            &ForceProfile::drifter(),
            5,
            Viewport::new(1280.0, 720.0),
            CardSize::default(),
            54321,
        );
        let differs = a
            .entities()
            .zip(b.entities())
            .any(|(sa, sb)| sa.pos != sb.pos);
        assert!(differs);
    }
}
