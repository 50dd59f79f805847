//! Passive recharge system.
//!
//! Shield, hull, and capacitor regenerate toward their caps each tick; the
//! per-ship combat debounce timer counts down here as well.

use hecs::World;

use armada_core::components::{CombatStatus, ShipParameters, ShipVitals};

/// Run passive recharge and combat-timer decay for all live ships.
pub fn run(world: &mut World) {
    for (_entity, (params, vitals, status)) in
        world.query_mut::<(&ShipParameters, &mut ShipVitals, &mut CombatStatus)>()
    {
        if vitals.is_dead() {
            continue;
        }

        vitals.shield = (vitals.shield + params.shield_recharge).min(params.shield);
        vitals.hp = (vitals.hp + params.hull_recharge).min(params.hp);
        vitals.capacitor = (vitals.capacitor + params.cap_recharge).min(params.capacitor);

        if status.combat_timer > 0 {
            status.combat_timer -= 1;
            if status.combat_timer == 0 {
                status.in_combat = false;
            }
        }
    }
}
