//! Health-band announcer.
//!
//! Emits one low-health and one critical-health announcement per excursion
//! below the respective band, re-arming once the ship recovers above it.
//! This is the "communicate" leg of the tick pipeline.

use hecs::World;

use armada_core::components::{CombatStatus, ShipParameters, ShipVitals};
use armada_core::constants::{CRITICAL_HEALTH_THRESHOLD, LOW_HEALTH_THRESHOLD};
use armada_core::enums::{ShipClass, Team};
use armada_core::events::CommEvent;

use crate::ship;

/// Scan ship health bands and emit announcement edges.
pub fn run(world: &mut World, events: &mut Vec<CommEvent>) {
    for (_entity, (params, vitals, status, class, team)) in world.query_mut::<(
        &ShipParameters,
        &ShipVitals,
        &mut CombatStatus,
        &ShipClass,
        &Team,
    )>() {
        if vitals.is_dead() {
            continue;
        }

        let percent = ship::health_percent(params, vitals);

        if percent < CRITICAL_HEALTH_THRESHOLD {
            if !status.critical_announced {
                status.critical_announced = true;
                events.push(CommEvent::ShipCriticalHealth {
                    class: *class,
                    team: *team,
                });
            }
        } else {
            status.critical_announced = false;
        }

        if percent < LOW_HEALTH_THRESHOLD {
            if !status.low_announced {
                status.low_announced = true;
                events.push(CommEvent::ShipLowHealth {
                    class: *class,
                    team: *team,
                });
            }
        } else {
            status.low_announced = false;
        }
    }
}
