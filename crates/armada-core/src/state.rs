//! Frame snapshot — the complete visible state produced each tick.
//!
//! Entities are identified by their stable handle bits so the snapshot stays
//! plain data (no ECS types leak out of the core).

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::{ShipClass, SquadStance, TargetStrategy, Team};
use crate::events::{CommEvent, DrawOp};
use crate::types::{Rgb, SimTime, SquadId};

/// Complete per-tick output consumed by exterior render/audio layers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: SimTime,
    pub ships: Vec<ShipView>,
    pub squads: Vec<SquadView>,
    pub torpedoes: Vec<TorpedoView>,
    pub planets: Vec<PlanetView>,
    pub asteroids: Vec<AsteroidView>,
    /// Draw primitives for this frame, in paint order.
    pub draw_ops: Vec<DrawOp>,
    /// Comm events emitted during this tick.
    pub events: Vec<CommEvent>,
}

/// A ship as seen by the exterior layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipView {
    /// Stable entity handle bits.
    pub id: u64,
    pub class: ShipClass,
    pub team: Team,
    pub squad: Option<SquadId>,
    pub position: DVec2,
    pub hp: f64,
    pub shield: f64,
    pub capacitor: f64,
    /// (hp + shield) / (max hp + max shield), in [0, 1].
    pub health_percent: f64,
    pub in_combat: bool,
    pub dead: bool,
    /// Current target's handle bits, if any.
    pub target: Option<u64>,
}

/// A squad as seen by the exterior layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadView {
    pub id: SquadId,
    pub team: Team,
    pub strategy: TargetStrategy,
    pub stance: SquadStance,
    pub centroid: DVec2,
    pub roster_size: u32,
    pub in_combat: bool,
    pub main_target: Option<u64>,
}

/// An in-flight torpedo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorpedoView {
    pub id: u64,
    pub position: DVec2,
    pub team: Team,
    pub released: bool,
}

/// A planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetView {
    pub position: DVec2,
    pub radius: f64,
    pub color: Rgb,
}

/// An asteroid and its remaining minerals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidView {
    pub position: DVec2,
    pub radius: f64,
    pub concentration: f64,
    pub mineral: Rgb,
}
