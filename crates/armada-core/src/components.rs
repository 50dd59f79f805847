//! ECS components for hecs entities.
//!
//! Components are plain data structs; game logic lives in systems. The only
//! methods here are constructors and trivial accessors on the component's
//! own fields. Cross-entity references never live in core components — the
//! sim crate keeps those in its own (non-serialized) state.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::catalog::ShipSpec;
use crate::constants::DEFAULT_FORCE_DAMP;
use crate::types::{Rgb, SquadId};

/// Physics state shared by every simulated object: ships, torpedoes,
/// planets, and asteroids.
///
/// Forces accumulate into `force` over the tick; the movement system
/// integrates `force / mass` into `position` exactly once per tick, after
/// every force-contributing pass has run, and then damps the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// World position.
    pub position: DVec2,
    /// Mass in abstract units. Invariant: mass > 0 (enforced at catalog load).
    pub mass: f64,
    /// Radius used for both physical repulsion and impact detection.
    pub collision_radius: f64,
    /// Accumulated force for this tick.
    pub force: DVec2,
    /// Fraction of the force buffer carried into the next tick
    /// (1.0 = eternal drift, < 1.0 decays toward rest).
    pub force_damp: f64,
    /// Per-axis displacement limit per tick, if any.
    pub speed_limit: Option<f64>,
}

impl Body {
    /// Create a body at rest.
    pub fn at(position: DVec2, mass: f64, collision_radius: f64) -> Self {
        Self {
            position,
            mass,
            collision_radius,
            force: DVec2::ZERO,
            force_damp: DEFAULT_FORCE_DAMP,
            speed_limit: None,
        }
    }

    /// Accumulate a force contribution for this tick.
    pub fn apply_force(&mut self, force: DVec2) {
        self.force += force;
    }
}

/// Per-instance ship stats, copied from the catalog at construction.
///
/// This is a copy rather than a shared reference because buffs apply
/// permanent multipliers to individual ships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipParameters {
    pub level: u32,
    pub color: Rgb,
    pub mass: f64,
    pub speed: f64,
    pub radius: f64,
    pub hp: f64,
    pub shield: f64,
    pub capacitor: f64,
    pub laser_range: f64,
    pub laser_damage: f64,
    pub laser_width: u32,
    pub ship_width: u32,
    pub shield_width: u32,
    pub shield_recharge: f64,
    pub hull_recharge: f64,
    pub cap_recharge: f64,
    /// Preferred stand-off distance from adversaries.
    pub keep_range: f64,
    /// Targeting weight used by the threat strategy.
    pub threat: f64,
    /// Multiplier applied to incoming damage (< 1.0 = armored).
    pub incoming_damage_modifier: f64,
    /// Multiplier applied to outgoing laser damage.
    pub outgoing_damage_modifier: f64,
    /// Derived: radius + shield_width.
    pub shield_radius: f64,
    /// Derived: shield_radius * 1.2.
    pub collision_radius: f64,
    /// Derived: hp + shield.
    pub total_health: f64,
}

impl ShipParameters {
    /// Build parameters from a catalog spec, applying level scaling once.
    pub fn from_spec(spec: &ShipSpec, level: u32) -> Self {
        let shield_radius = spec.radius + spec.shield_width as f64;
        Self {
            level,
            color: spec.color,
            mass: spec.mass,
            speed: spec.speed,
            radius: spec.radius,
            hp: spec.hp,
            shield: spec.shield,
            capacitor: spec.capacitor,
            laser_range: spec.laser_range,
            laser_damage: spec.laser_damage * level as f64,
            laser_width: spec.laser_width,
            ship_width: spec.ship_width,
            shield_width: spec.shield_width,
            shield_recharge: spec.shield_recharge,
            hull_recharge: spec.hull_recharge,
            cap_recharge: spec.cap_recharge,
            keep_range: spec.keep_range,
            threat: spec.threat,
            incoming_damage_modifier: 1.0,
            outgoing_damage_modifier: 1.0,
            shield_radius,
            collision_radius: shield_radius * 1.2,
            total_health: spec.hp + spec.shield,
        }
    }
}

/// Mutable combat state owned by a single ship.
///
/// `hp` and `shield` are clamped to `[0, parameter max]`; `hp == 0` means
/// the ship is dead (a terminal state, not an error).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipVitals {
    pub hp: f64,
    pub shield: f64,
    pub capacitor: f64,
}

impl ShipVitals {
    /// Fresh vitals at the parameter maxima.
    pub fn full(params: &ShipParameters) -> Self {
        Self {
            hp: params.hp,
            shield: params.shield,
            capacitor: params.capacitor,
        }
    }

    /// Current hp + shield.
    pub fn health(&self) -> f64 {
        self.hp + self.shield
    }

    /// Dead ships have zero hull.
    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }
}

/// Per-ship combat activity debounce and announcer edge-tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatStatus {
    /// True while the ship has recent combat activity.
    pub in_combat: bool,
    /// Ticks of combat activity remaining before `in_combat` drops.
    pub combat_timer: u32,
    /// Low-health announcement already made for the current excursion.
    pub low_announced: bool,
    /// Critical-health announcement already made for the current excursion.
    pub critical_announced: bool,
}

impl CombatStatus {
    /// Register combat activity (dealing or receiving damage).
    pub fn mark_active(&mut self) {
        self.in_combat = true;
        self.combat_timer = crate::constants::COMBAT_DEBOUNCE_TICKS;
    }
}

/// Squad membership tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadMember {
    pub squad: SquadId,
}

/// Laser weapon sub-state: capacitor gating and recharge bookkeeping.
///
/// A laser that runs its ship's capacitor dry drops into a recharge state
/// and counts back up to `full_charge` before it can fire again.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaserGun {
    pub cap_cost: f64,
    pub needs_recharge: bool,
    pub charge: u32,
    pub full_charge: u32,
}

impl Default for LaserGun {
    fn default() -> Self {
        Self {
            cap_cost: crate::constants::LASER_CAP_COST,
            needs_recharge: false,
            charge: 0,
            full_charge: crate::constants::LASER_FULL_CHARGE_TICKS,
        }
    }
}

/// Stationary planet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub radius: f64,
    pub color: Rgb,
}

/// Mineable asteroid. Depleted asteroids are swept at end of tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub radius: f64,
    /// Minerals remaining.
    pub concentration: f64,
    /// Mineral tint used by the renderer.
    pub mineral: Rgb,
}

impl Asteroid {
    /// Extract up to `amount` minerals; returns what was actually extracted.
    pub fn extract(&mut self, amount: f64) -> f64 {
        let extracted = amount.min(self.concentration);
        self.concentration -= extracted;
        extracted
    }

    /// True once all minerals are gone.
    pub fn is_depleted(&self) -> bool {
        self.concentration <= 0.0
    }
}
