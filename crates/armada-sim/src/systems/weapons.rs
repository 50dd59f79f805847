//! Laser weapon system.
//!
//! Firing is refused silently when the capacitor is short, the gun is
//! recharging, or the target is out of range — all ordinary conditions.
//! A drained gun drops into a recharge state and counts back up to full
//! before it fires again.

use std::collections::HashMap;

use glam::DVec2;
use hecs::{Entity, World};

use armada_core::components::{Body, CombatStatus, LaserGun, ShipParameters, ShipVitals};
use armada_core::events::DrawOp;
use armada_core::types::Rgb;

use crate::ship;
use crate::systems::ship_ai::TargetingState;

struct Shot {
    target: Entity,
    damage: f64,
    color: Rgb,
    from: DVec2,
    to: DVec2,
    width: u32,
}

/// Fire every ship's laser at its current target, where possible.
pub fn run(world: &mut World, beam_ops: &mut Vec<DrawOp>) {
    // Live ship positions, for range checks against targets.
    let ship_positions: HashMap<Entity, DVec2> = world
        .query::<(&Body, &ShipVitals)>()
        .iter()
        .filter(|(_, (_, vitals))| !vitals.is_dead())
        .map(|(entity, (body, _))| (entity, body.position))
        .collect();

    let mut shots: Vec<Shot> = Vec::new();

    {
        let mut query = world.query::<(
            &Body,
            &ShipParameters,
            &mut ShipVitals,
            &mut CombatStatus,
            &mut LaserGun,
            &TargetingState,
        )>();
        let mut firing: Vec<_> = query.iter().collect();
        firing.sort_by_key(|(entity, _)| *entity);

        for (_entity, (body, params, vitals, status, gun, targeting)) in firing {
            if vitals.is_dead() {
                continue;
            }

            // Capacitor gate: an empty bank drops the gun into recharge.
            if vitals.capacitor < gun.cap_cost {
                gun.charge = 0;
                gun.needs_recharge = true;
                continue;
            }
            if gun.needs_recharge {
                gun.charge += 1;
                if gun.charge >= gun.full_charge {
                    gun.needs_recharge = false;
                }
                continue;
            }

            let Some(target) = targeting.target else {
                continue;
            };
            let Some(&target_pos) = ship_positions.get(&target) else {
                continue;
            };
            if body.position.distance(target_pos) > params.laser_range {
                continue;
            }

            shots.push(Shot {
                target,
                damage: params.laser_damage * params.outgoing_damage_modifier,
                color: params.color,
                from: body.position,
                to: target_pos,
                width: params.laser_width,
            });
            vitals.capacitor -= gun.cap_cost;
            status.mark_active();
        }
    }

    for shot in shots {
        beam_ops.push(DrawOp::Line {
            color: shot.color,
            start: shot.from,
            end: shot.to,
            width: shot.width,
        });
        if let Ok((params, vitals, status)) = world
            .query_one_mut::<(&ShipParameters, &mut ShipVitals, &mut CombatStatus)>(shot.target)
        {
            ship::take_damage(params, vitals, status, shot.damage);
        }
    }
}
