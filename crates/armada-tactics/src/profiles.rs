//! Class-specific behavior profiles.
//!
//! One ship type driven by a small set of composable knobs replaces the
//! original family of per-class update overrides. The profile is applied
//! once at spawn (damage modifier, damping, collision padding) and consulted
//! each tick for role dispatch and force scaling.

use armada_core::enums::{ShipClass, ShipRole};

/// Behavioral knobs for a ship class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehaviorProfile {
    /// Role dispatched by the per-ship AI system.
    pub role: ShipRole,
    /// Scale on the attack-attraction force toward the current target.
    pub aggressiveness: f64,
    /// Scale on the keep-range repulsion from adversaries.
    /// 0.0 disables avoidance entirely (tanks, zerglings, berserkers).
    pub avoidance: f64,
    /// Multiplier folded into incoming damage at spawn (< 1.0 = armored).
    pub incoming_damage_modifier: f64,
    /// Force damping override, if the class coasts differently.
    pub force_damp: Option<f64>,
    /// Multiplier on the catalog collision radius (tanks need space).
    pub collision_radius_factor: f64,
}

impl Default for BehaviorProfile {
    fn default() -> Self {
        Self {
            role: ShipRole::Combat,
            aggressiveness: 1.0,
            avoidance: 1.0,
            incoming_damage_modifier: 1.0,
            force_damp: None,
            collision_radius_factor: 1.0,
        }
    }
}

/// Get the behavior profile for a ship class.
pub fn profile_for(class: ShipClass) -> BehaviorProfile {
    match class {
        ShipClass::Fighter | ShipClass::Spitter | ShipClass::Starbase => {
            BehaviorProfile::default()
        }
        ShipClass::Tank => BehaviorProfile {
            role: ShipRole::Tank,
            // Tanks don't avoid anyone
            avoidance: 0.0,
            incoming_damage_modifier: 0.75,
            collision_radius_factor: 3.0,
            ..BehaviorProfile::default()
        },
        ShipClass::Healer => BehaviorProfile {
            role: ShipRole::Healer,
            ..BehaviorProfile::default()
        },
        ShipClass::Miner => BehaviorProfile {
            role: ShipRole::Miner,
            collision_radius_factor: 2.0,
            ..BehaviorProfile::default()
        },
        ShipClass::Drone => BehaviorProfile {
            // Drones should be careful
            aggressiveness: 0.1,
            avoidance: 2.0,
            incoming_damage_modifier: 0.75,
            ..BehaviorProfile::default()
        },
        ShipClass::Zergling => BehaviorProfile {
            avoidance: 0.0,
            // Slippery
            incoming_damage_modifier: 0.5,
            force_damp: Some(0.998),
            ..BehaviorProfile::default()
        },
        ShipClass::Berserker | ShipClass::MegaBug => BehaviorProfile {
            avoidance: 0.0,
            ..BehaviorProfile::default()
        },
    }
}
