//! Ship combat operations: damage, healing, and health accounting.
//!
//! Death is a normal terminal state detected by the owning squad's
//! per-tick sweep, never an error. All operations here are idempotent-safe
//! against dead ships.

use armada_core::components::{CombatStatus, ShipParameters, ShipVitals};

/// Result of a damage application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageOutcome {
    /// The hit reduced hull to zero.
    pub died: bool,
}

/// Apply incoming damage to a ship.
///
/// The incoming-damage modifier applies first, then the shield drains
/// before the hull. Hull clamps at zero — repeated calls after death never
/// produce negative hp. Taking damage counts as combat activity.
pub fn take_damage(
    params: &ShipParameters,
    vitals: &mut ShipVitals,
    status: &mut CombatStatus,
    points: f64,
) -> DamageOutcome {
    if vitals.is_dead() {
        return DamageOutcome { died: false };
    }

    status.mark_active();
    let points = points * params.incoming_damage_modifier;

    if points < vitals.shield {
        vitals.shield -= points;
        DamageOutcome { died: false }
    } else {
        let spill = points - vitals.shield;
        vitals.shield = 0.0;
        vitals.hp = (vitals.hp - spill).max(0.0);
        DamageOutcome {
            died: vitals.is_dead(),
        }
    }
}

/// Heal a ship: hull first, remaining points spill to the shield, each
/// capped at its parameter maximum. Dead ships cannot be healed.
pub fn heal(params: &ShipParameters, vitals: &mut ShipVitals, points: f64) {
    if vitals.is_dead() {
        return;
    }

    let hull_damage = params.hp - vitals.hp;
    let to_hull = points.min(hull_damage);
    vitals.hp += to_hull;

    let spill = points - to_hull;
    if spill > 0.0 {
        vitals.shield = (vitals.shield + spill).min(params.shield);
    }
}

/// (hp + shield) / (max hp + max shield), clamped to [0, 1].
pub fn health_percent(params: &ShipParameters, vitals: &ShipVitals) -> f64 {
    (vitals.health() / params.total_health).clamp(0.0, 1.0)
}
