//! Torpedoes and torpedo launchers.
//!
//! Loaded torpedoes ride their ship's launch points until the whole rack is
//! full and a target comes into range, then the volley releases with an
//! outward impulse. Released torpedoes coast for a guidance delay, then
//! chase their target until impact or expiry. Impact detection itself lives
//! in the collision system.

use std::collections::HashMap;

use glam::DVec2;
use hecs::{Entity, World};
use tracing::debug;

use armada_core::components::{Body, ShipParameters, ShipVitals};
use armada_core::constants::{
    TORP_DAMAGE_PER_LEVEL, TORP_EXPIRE_TICKS, TORP_GUIDANCE_DELAY_TICKS, TORP_LAUNCH_IMPULSE,
    TORP_MASS, TORP_MIN_CAPACITOR, TORP_RANGE, TORP_RELOAD_TICKS,
};
use armada_core::enums::Team;
use armada_core::events::CommEvent;
use armada_core::types::Rgb;

use crate::forces;
use crate::systems::ship_ai::TargetingState;

/// Collision radius of a torpedo.
pub const TORP_COLLISION_RADIUS: f64 = 4.0;

/// An in-flight (or still-racked) torpedo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Torpedo {
    /// Ship that launched this torpedo.
    pub origin: Entity,
    /// Team of the origin ship; impacts only trigger on other teams.
    pub team: Team,
    pub damage: f64,
    pub color: Rgb,
    /// Guidance target; cleared if the target dies mid-flight.
    pub target: Option<Entity>,
    /// False while racked on a launch point.
    pub released: bool,
    /// Ticks since release.
    pub release_counter: u32,
    /// Launch-point offset from the origin ship's center.
    pub mount_offset: DVec2,
    /// Flagged for removal (impact or expiry).
    pub delete_me: bool,
}

/// Torpedo rack state for a ship.
#[derive(Debug, Clone, PartialEq)]
pub struct TorpedoLauncher {
    pub tubes: u32,
    /// Torpedo entities currently riding launch points.
    pub loaded: Vec<Entity>,
    /// Earliest tick the next tube may reload.
    pub next_reload_tick: u64,
    pub level: u32,
}

impl TorpedoLauncher {
    /// A launcher with all tubes empty.
    pub fn new(tubes: u32, level: u32) -> Self {
        Self {
            tubes,
            loaded: Vec::with_capacity(tubes as usize),
            next_reload_tick: 0,
            level,
        }
    }
}

/// Launch-point offsets, evenly spaced around the ship's shield ring.
pub fn launch_offsets(tubes: u32, radius: f64) -> Vec<DVec2> {
    (0..tubes)
        .map(|i| {
            let theta = 2.0 * std::f64::consts::PI * i as f64 / tubes as f64;
            DVec2::new(radius * theta.cos(), radius * theta.sin())
        })
        .collect()
}

struct Reload {
    ship: Entity,
    team: Team,
    level: u32,
    color: Rgb,
    position: DVec2,
    offset: DVec2,
}

struct Volley {
    team: Team,
    target: Entity,
    torps: Vec<Entity>,
}

/// Reload tubes, carry racked torpedoes along with their ship, and release
/// full volleys at targets within torpedo range.
pub fn update_launchers(world: &mut World, events: &mut Vec<CommEvent>, current_tick: u64) {
    // Live ship positions, for the range check on volley release.
    let ship_positions: HashMap<Entity, DVec2> = world
        .query::<(&Body, &ShipVitals)>()
        .iter()
        .filter(|(_, (_, vitals))| !vitals.is_dead())
        .map(|(entity, (body, _))| (entity, body.position))
        .collect();

    let mut reloads: Vec<Reload> = Vec::new();
    let mut volleys: Vec<Volley> = Vec::new();
    let mut carried: Vec<(Entity, DVec2)> = Vec::new();

    {
        let mut query = world.query::<(
            &Body,
            &ShipParameters,
            &mut ShipVitals,
            &mut TorpedoLauncher,
            &TargetingState,
            &Team,
        )>();
        for (ship, (body, params, vitals, launcher, targeting, team)) in query.iter() {
            if vitals.is_dead() || launcher.tubes == 0 {
                continue;
            }

            let offsets = launch_offsets(launcher.tubes, params.shield_radius);

            // Reload one tube at a time, gated on the reload clock and a
            // capacitor floor.
            if current_tick >= launcher.next_reload_tick
                && vitals.capacitor > TORP_MIN_CAPACITOR
                && (launcher.loaded.len() as u32) < launcher.tubes
            {
                reloads.push(Reload {
                    ship,
                    team: *team,
                    level: launcher.level,
                    color: params.color,
                    position: body.position,
                    offset: offsets[launcher.loaded.len()],
                });
                vitals.capacitor -= 1.0;
                launcher.next_reload_tick = current_tick + TORP_RELOAD_TICKS;
            }

            // Racked torpedoes follow their ship.
            for &torp in &launcher.loaded {
                carried.push((torp, body.position));
            }

            // A full rack releases as one volley once the target closes to
            // torpedo range.
            if let Some(target) = targeting.target {
                let in_range = ship_positions
                    .get(&target)
                    .is_some_and(|pos| body.position.distance(*pos) < TORP_RANGE);
                if in_range && launcher.loaded.len() as u32 == launcher.tubes {
                    volleys.push(Volley {
                        team: *team,
                        target,
                        torps: std::mem::take(&mut launcher.loaded),
                    });
                }
            }
        }
    }

    // Carry racked torpedoes.
    for (torp, ship_pos) in carried {
        let offset = world
            .get::<&Torpedo>(torp)
            .map(|t| t.mount_offset)
            .unwrap_or(DVec2::ZERO);
        if let Ok(body) = world.query_one_mut::<&mut Body>(torp) {
            body.position = ship_pos + offset;
        }
    }

    // Spawn freshly reloaded torpedoes onto their launch points.
    for reload in reloads {
        let mut body = Body::at(
            reload.position + reload.offset,
            TORP_MASS,
            TORP_COLLISION_RADIUS,
        );
        // Torps don't slow down
        body.force_damp = 1.0;
        let torp = world.spawn((
            Torpedo {
                origin: reload.ship,
                team: reload.team,
                damage: reload.level as f64 * TORP_DAMAGE_PER_LEVEL,
                color: reload.color,
                target: None,
                released: false,
                release_counter: 0,
                mount_offset: reload.offset,
                delete_me: false,
            },
            body,
        ));
        if let Ok(launcher) = world.query_one_mut::<&mut TorpedoLauncher>(reload.ship) {
            launcher.loaded.push(torp);
        }
    }

    // Release volleys.
    for volley in volleys {
        let count = volley.torps.len() as u32;
        for torp in volley.torps {
            if let Ok((t, body)) = world.query_one_mut::<(&mut Torpedo, &mut Body)>(torp) {
                t.target = Some(volley.target);
                t.released = true;
                body.apply_force(t.mount_offset * TORP_LAUNCH_IMPULSE);
            }
        }
        debug!(team = %volley.team, count, "torpedo volley released");
        events.push(CommEvent::TorpedoVolley {
            team: volley.team,
            count,
        });
    }
}

/// Advance released torpedoes: expiry countdown, then guided pursuit once
/// the guidance delay has elapsed. A torpedo whose target dies keeps
/// coasting until it expires.
pub fn update_flight(world: &mut World) {
    let ship_positions: HashMap<Entity, DVec2> = world
        .query::<(&Body, &ShipVitals)>()
        .iter()
        .filter(|(_, (_, vitals))| !vitals.is_dead())
        .map(|(entity, (body, _))| (entity, body.position))
        .collect();

    for (_torp, (torpedo, body)) in world.query_mut::<(&mut Torpedo, &mut Body)>() {
        if !torpedo.released || torpedo.delete_me {
            continue;
        }

        torpedo.release_counter += 1;
        if torpedo.release_counter > TORP_EXPIRE_TICKS {
            torpedo.delete_me = true;
            continue;
        }

        if let Some(target) = torpedo.target {
            match ship_positions.get(&target) {
                Some(target_pos) if torpedo.release_counter > TORP_GUIDANCE_DELAY_TICKS => {
                    body.apply_force(forces::pursuit(body.position, *target_pos));
                }
                Some(_) => {}
                None => torpedo.target = None,
            }
        }
    }
}
