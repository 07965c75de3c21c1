//! Deterministic simulation module
//!
//! All engine logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, one stream per entity
//! - Time accumulated from the caller's `dt`, never wall clock
//! - No rendering or platform dependencies

pub mod profile;
pub mod scene;
pub mod state;
pub mod step;
pub mod table;

pub use profile::{Dash, ForceProfile, Magnetism, SpeedRange};
pub use scene::Scene;
pub use state::{CardSize, ChaosPhase, ChaosState, ControlMode, EntityState, TrailPoint, Viewport};
pub use step::step;
pub use table::PositionTable;
