//! Read-only battle-state queries over the ECS world.
//!
//! Everything here is recomputed on demand from the current world — no
//! caching across ticks. That recompute-from-scratch policy is the
//! concurrency strategy: the tick loop is the only writer and fully owns
//! the world for the duration of the tick.

use glam::DVec2;
use hecs::{Entity, World};

use armada_core::components::{Asteroid, Body, Planet, ShipParameters, ShipVitals};
use armada_core::enums::{ShipClass, Team};

use crate::ship;

/// One live ship with the metrics targeting and support roles care about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipInfo {
    pub entity: Entity,
    pub class: ShipClass,
    pub team: Team,
    pub position: DVec2,
    pub collision_radius: f64,
    pub mass: f64,
    /// Current hp + shield.
    pub health: f64,
    /// Health fraction in [0, 1].
    pub health_percent: f64,
    /// Catalog threat rating.
    pub threat: f64,
}

/// All live ships, in stable entity order.
pub fn all_ships(world: &World) -> Vec<ShipInfo> {
    let mut ships: Vec<ShipInfo> = world
        .query::<(&Body, &ShipVitals, &ShipParameters, &ShipClass, &Team)>()
        .iter()
        .filter(|(_, (_, vitals, ..))| !vitals.is_dead())
        .map(|(entity, (body, vitals, params, class, team))| ShipInfo {
            entity,
            class: *class,
            team: *team,
            position: body.position,
            collision_radius: body.collision_radius,
            mass: body.mass,
            health: vitals.health(),
            health_percent: ship::health_percent(params, vitals),
            threat: params.threat,
        })
        .collect();
    ships.sort_by_key(|info| info.entity);
    ships
}

/// Live ships NOT on the given team.
pub fn adversary_ships(world: &World, team: Team) -> Vec<ShipInfo> {
    all_ships(world)
        .into_iter()
        .filter(|info| info.team != team)
        .collect()
}

/// Live ships on the given team.
pub fn team_ships(world: &World, team: Team) -> Vec<ShipInfo> {
    all_ships(world)
        .into_iter()
        .filter(|info| info.team == team)
        .collect()
}

/// The teammate with the lowest health fraction, if any.
pub fn lowest_health_teammate(world: &World, team: Team) -> Option<ShipInfo> {
    team_ships(world, team)
        .into_iter()
        .min_by(|a, b| a.health_percent.total_cmp(&b.health_percent))
}

/// The planet closest to `pos`, if any.
pub fn closest_planet(world: &World, pos: DVec2) -> Option<(Entity, DVec2)> {
    world
        .query::<(&Body, &Planet)>()
        .iter()
        .map(|(entity, (body, _))| (entity, body.position))
        .min_by(|a, b| a.1.distance(pos).total_cmp(&b.1.distance(pos)))
}

/// The asteroid with minerals remaining closest to `pos`, if any.
pub fn closest_asteroid(world: &World, pos: DVec2) -> Option<(Entity, DVec2)> {
    world
        .query::<(&Body, &Asteroid)>()
        .iter()
        .filter(|(_, (_, asteroid))| !asteroid.is_depleted())
        .map(|(entity, (body, _))| (entity, body.position))
        .min_by(|a, b| a.1.distance(pos).total_cmp(&b.1.distance(pos)))
}
