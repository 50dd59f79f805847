//! Per-ship AI: target acquisition, attack/avoidance forces, and role
//! behaviors (healing, mining, emergency shields).
//!
//! Runs once per squad. Reads are snapshotted first, decisions are made
//! against the snapshot, then all mutations are applied — the usual
//! collect-then-apply shape that keeps hecs borrows simple.

use glam::DVec2;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use tracing::warn;

use armada_core::buffs::BuffCatalog;
use armada_core::components::{Asteroid, Body, ShipParameters, ShipVitals, SquadMember};
use armada_core::constants::{
    ATTACK_RANGE_FACTOR, HEAL_CUTOFF, LOW_HEALTH_THRESHOLD, MINING_RATE,
    OUT_OF_COMBAT_HEAL_MULTIPLIER, SHIELD_DUMP_THRESHOLD,
};
use armada_core::enums::{BuffId, ShipClass, ShipRole};
use armada_core::events::DrawOp;
use armada_core::types::Rgb;

use armada_tactics::profiles::profile_for;

use crate::battle_info::{self, ShipInfo};
use crate::buff_manager::BuffManager;
use crate::forces;
use crate::ship;
use crate::squad::Squad;

/// Current target and avoidance set, recomputed every tick. Never persisted
/// across ship deaths — targets are re-resolved from the adversary list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetingState {
    pub target: Option<Entity>,
    /// Adversaries other than the current target.
    pub non_targets: Vec<Entity>,
}

/// Per-ship role bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RoleState {
    /// The tank's shield dump fires once per engagement.
    pub shield_thrown: bool,
}

struct ShipSnapshot {
    entity: Entity,
    class: ShipClass,
    position: DVec2,
    laser_range: f64,
    laser_damage: f64,
    laser_width: u32,
    color: Rgb,
    keep_range: f64,
    shield_thrown: bool,
}

/// Run the per-ship AI for one squad.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    squad: &mut Squad,
    buffs: &mut BuffManager,
    buff_catalog: &BuffCatalog,
    rng: &mut ChaCha8Rng,
    beam_ops: &mut Vec<DrawOp>,
    current_tick: u64,
) {
    // --- Snapshot phase ---
    let ships: Vec<ShipSnapshot> = {
        let mut query = world.query::<(
            &Body,
            &ShipParameters,
            &ShipVitals,
            &ShipClass,
            &SquadMember,
            &RoleState,
        )>();
        let mut ships: Vec<ShipSnapshot> = query
            .iter()
            .filter(|(_, (_, _, vitals, _, member, _))| {
                member.squad == squad.id && !vitals.is_dead()
            })
            .map(|(entity, (body, params, _, class, _, role))| ShipSnapshot {
                entity,
                class: *class,
                position: body.position,
                laser_range: params.laser_range,
                laser_damage: params.laser_damage,
                laser_width: params.laser_width,
                color: params.color,
                keep_range: params.keep_range,
                shield_thrown: role.shield_thrown,
            })
            .collect();
        ships.sort_by_key(|s| s.entity);
        ships
    };

    let teammates = battle_info::team_ships(world, squad.team);
    let lowest_teammate = teammates
        .iter()
        .min_by(|a, b| a.health_percent.total_cmp(&b.health_percent))
        .copied();

    let asteroids: Vec<(Entity, DVec2)> = {
        let mut query = world.query::<(&Body, &Asteroid)>();
        query
            .iter()
            .filter(|(_, (_, asteroid))| !asteroid.is_depleted())
            .map(|(entity, (body, _))| (entity, body.position))
            .collect()
    };
    // The protection asset as a mining site: its position, plus its entity
    // when it is something extractable.
    let asset_site: Option<(Option<Entity>, DVec2)> = squad.protection_asset.and_then(|asset| {
        let pos = world.get::<&Body>(asset).map(|body| body.position).ok()?;
        let extractable = world.get::<&Asteroid>(asset).is_ok();
        Some((extractable.then_some(asset), pos))
    });

    // --- Decision phase ---
    let mut pending_forces: Vec<(Entity, DVec2)> = Vec::new();
    let mut pending_targeting: Vec<(Entity, Option<Entity>, Vec<Entity>)> = Vec::new();
    let mut pending_heals: Vec<(Entity, f64)> = Vec::new();
    let mut pending_extracts: Vec<(Entity, f64)> = Vec::new();
    let mut pending_buffs: Vec<Entity> = Vec::new();
    let mut pending_shield_thrown: Vec<(Entity, bool)> = Vec::new();

    for ship in &ships {
        let profile = profile_for(ship.class);
        let mut force = DVec2::ZERO;

        // (b) Target acquisition: adopt the squad's main target while it is
        // inside this ship's weapon envelope, otherwise fall back to a
        // secondary pick. Support roles don't take combat targets.
        let combat_role = matches!(profile.role, ShipRole::Combat | ShipRole::Tank);
        let target = if combat_role {
            let main_in_range = squad.main_target.and_then(|main| {
                adversary_position(squad.adversaries(), main)
                    .filter(|pos| ship.position.distance(*pos) < ship.laser_range)
                    .map(|_| main)
            });
            main_in_range.or_else(|| squad.secondary_target(ship.entity, ship.position, rng))
        } else {
            None
        };

        let non_targets: Vec<Entity> = squad
            .adversaries()
            .iter()
            .map(|info| info.entity)
            .filter(|&adv| Some(adv) != target)
            .collect();

        // (c) Attack run: orbit just inside the weapon envelope.
        if let Some(target) = target {
            if let Some(target_pos) = adversary_position(squad.adversaries(), target) {
                let (on_ship, _) = forces::attraction(
                    ship.position,
                    target_pos,
                    ship.laser_range / ATTACK_RANGE_FACTOR,
                );
                force += on_ship * profile.aggressiveness;
            }
        }

        // (d) Avoidance: keep-range repulsion from every adversary.
        if profile.avoidance > 0.0 {
            for adversary in squad.adversaries() {
                let (on_ship, _) = forces::repulsion(
                    ship.position,
                    0.0,
                    adversary.position,
                    0.0,
                    Some(ship.keep_range),
                );
                force += on_ship * profile.avoidance;
            }
        }

        // Role behaviors.
        match profile.role {
            ShipRole::Healer => {
                heal_behavior(
                    squad,
                    ship,
                    lowest_teammate.as_ref(),
                    &mut force,
                    &mut pending_heals,
                    beam_ops,
                );
            }
            ShipRole::Miner => {
                mine_behavior(
                    ship,
                    asset_site,
                    &asteroids,
                    &mut force,
                    &mut pending_extracts,
                    beam_ops,
                );
            }
            ShipRole::Tank => {
                if !squad.in_combat {
                    if ship.shield_thrown {
                        pending_shield_thrown.push((ship.entity, false));
                    }
                } else if !ship.shield_thrown {
                    if let Some(weakest) = lowest_teammate.as_ref() {
                        if weakest.health_percent < SHIELD_DUMP_THRESHOLD {
                            pending_buffs.push(weakest.entity);
                            pending_shield_thrown.push((ship.entity, true));
                        }
                    }
                }
            }
            ShipRole::Combat => {}
        }

        pending_forces.push((ship.entity, force));
        pending_targeting.push((ship.entity, target, non_targets));
    }

    // --- Apply phase ---
    for (entity, target, non_targets) in pending_targeting {
        if let Ok(targeting) = world.query_one_mut::<&mut TargetingState>(entity) {
            targeting.target = target;
            targeting.non_targets = non_targets;
        }
    }
    for (entity, force) in pending_forces {
        if let Ok(body) = world.query_one_mut::<&mut Body>(entity) {
            body.apply_force(force);
        }
    }
    for (target, amount) in pending_heals {
        if let Ok((params, vitals)) =
            world.query_one_mut::<(&ShipParameters, &mut ShipVitals)>(target)
        {
            ship::heal(params, vitals, amount);
        }
    }
    for (asteroid, amount) in pending_extracts {
        if let Ok(asteroid) = world.query_one_mut::<&mut Asteroid>(asteroid) {
            asteroid.extract(amount);
        }
    }
    for (entity, thrown) in pending_shield_thrown {
        if let Ok(role) = world.query_one_mut::<&mut RoleState>(entity) {
            role.shield_thrown = thrown;
        }
    }
    for target in pending_buffs {
        if let Err(error) =
            buffs.apply(buff_catalog, world, target, BuffId::TakeThePain, current_tick)
        {
            warn!(%error, "emergency shield buff missing from catalog");
        }
    }
}

fn adversary_position(adversaries: &[ShipInfo], entity: Entity) -> Option<DVec2> {
    adversaries
        .iter()
        .find(|info| info.entity == entity)
        .map(|info| info.position)
}

fn heal_behavior(
    squad: &Squad,
    ship: &ShipSnapshot,
    lowest_teammate: Option<&ShipInfo>,
    force: &mut DVec2,
    pending_heals: &mut Vec<(Entity, f64)>,
    beam_ops: &mut Vec<DrawOp>,
) {
    let Some(patient) = lowest_teammate else {
        return;
    };

    // Close on the patient; hurry when they are actually hurting.
    if patient.entity != ship.entity {
        let rush = if patient.health_percent < LOW_HEALTH_THRESHOLD {
            3.0
        } else {
            1.0
        };
        let (on_ship, _) =
            forces::attraction(ship.position, patient.position, ship.laser_range - 10.0);
        *force += on_ship * rush;
    }

    if patient.health_percent < HEAL_CUTOFF
        && ship.position.distance(patient.position) < ship.laser_range
    {
        let healing_power = if squad.in_combat {
            1.0
        } else {
            OUT_OF_COMBAT_HEAL_MULTIPLIER
        };
        pending_heals.push((patient.entity, ship.laser_damage * healing_power));
        beam_ops.push(DrawOp::Line {
            color: ship.color,
            start: ship.position,
            end: patient.position,
            width: ship.laser_width,
        });
    }
}

fn mine_behavior(
    ship: &ShipSnapshot,
    asset_site: Option<(Option<Entity>, DVec2)>,
    asteroids: &[(Entity, DVec2)],
    force: &mut DVec2,
    pending_extracts: &mut Vec<(Entity, f64)>,
    beam_ops: &mut Vec<DrawOp>,
) {
    // Work the squad's asset if it has one, otherwise the nearest seam.
    let claim = asteroids
        .iter()
        .min_by(|a, b| {
            a.1.distance(ship.position).total_cmp(&b.1.distance(ship.position))
        })
        .map(|&(entity, pos)| (Some(entity), pos));

    let Some((claimed_asteroid, site_pos)) = asset_site.or(claim) else {
        return;
    };

    let (on_ship, _) = forces::attraction(ship.position, site_pos, ship.laser_range - 10.0);
    *force += on_ship * 2.0;

    if ship.position.distance(site_pos) < ship.laser_range {
        // Mining beam; extraction only happens over an actual asteroid.
        if let Some(asteroid) = claimed_asteroid {
            pending_extracts.push((asteroid, MINING_RATE));
        }
        beam_ops.push(DrawOp::Line {
            color: ship.color,
            start: ship.position,
            end: site_pos,
            width: ship.laser_width,
        });
    }
}
