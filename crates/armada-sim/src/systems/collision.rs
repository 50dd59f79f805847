//! Pairwise collision resolution.
//!
//! O(n²) over ships and passive bodies, which is fine at the expected scale
//! of tens to low hundreds of ships per match. Ship–ship contacts exchange
//! mass-weighted repulsion; planets and asteroids push back one-sidedly;
//! torpedoes detonate on contact with enemy hulls (damage, no force).

use std::collections::HashMap;

use glam::DVec2;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use armada_core::components::{Asteroid, Body, CombatStatus, Planet, ShipParameters, ShipVitals};
use armada_core::enums::Team;

use crate::forces;
use crate::ship;
use crate::torpedo::Torpedo;

struct ShipBody {
    entity: Entity,
    position: DVec2,
    collision_radius: f64,
    mass: f64,
    team: Team,
}

/// Run the collision pass for one tick.
pub fn run(world: &mut World, rng: &mut ChaCha8Rng) {
    jitter_coincident_ships(world, rng);

    let ships: Vec<ShipBody> = {
        let mut query = world.query::<(&Body, &ShipVitals, &Team)>();
        let mut ships: Vec<ShipBody> = query
            .iter()
            .filter(|(_, (_, vitals, _))| !vitals.is_dead())
            .map(|(entity, (body, _, team))| ShipBody {
                entity,
                position: body.position,
                collision_radius: body.collision_radius,
                mass: body.mass,
                team: *team,
            })
            .collect();
        ships.sort_by_key(|s| s.entity);
        ships
    };

    let mut pushes: HashMap<Entity, DVec2> = HashMap::new();

    // Ship–ship: heavier ships push lighter ones more than the reverse.
    for i in 0..ships.len() {
        for j in (i + 1)..ships.len() {
            let (a, b) = (&ships[i], &ships[j]);
            let (on_a, on_b) = forces::repulsion_mass_weighted(
                a.position,
                a.collision_radius,
                a.mass,
                b.position,
                b.collision_radius,
                b.mass,
                None,
            );
            if on_a != DVec2::ZERO {
                *pushes.entry(a.entity).or_insert(DVec2::ZERO) += on_a;
                *pushes.entry(b.entity).or_insert(DVec2::ZERO) += on_b;
            }
        }
    }

    // Ship–stationary body: one-sided push onto the moving ship.
    {
        let mut stationary: Vec<(DVec2, f64)> = Vec::new();
        for (_entity, (body, _)) in world.query::<(&Body, &Planet)>().iter() {
            stationary.push((body.position, body.collision_radius));
        }
        for (_entity, (body, _)) in world.query::<(&Body, &Asteroid)>().iter() {
            stationary.push((body.position, body.collision_radius));
        }
        for ship in &ships {
            for &(pos, radius) in &stationary {
                let (on_ship, _) =
                    forces::repulsion(ship.position, ship.collision_radius, pos, radius, None);
                if on_ship != DVec2::ZERO {
                    *pushes.entry(ship.entity).or_insert(DVec2::ZERO) += on_ship;
                }
            }
        }
    }

    for (entity, push) in pushes {
        if let Ok(body) = world.query_one_mut::<&mut Body>(entity) {
            body.apply_force(push);
        }
    }

    // Torpedo impacts: direct radius check, damage, no force exchange.
    let mut impacts: Vec<(Entity, f64)> = Vec::new();
    for (_torp, (torpedo, body)) in world.query_mut::<(&mut Torpedo, &Body)>() {
        if !torpedo.released || torpedo.delete_me {
            continue;
        }
        for target in &ships {
            if target.team == torpedo.team {
                continue;
            }
            if body.position.distance(target.position) < target.collision_radius {
                impacts.push((target.entity, torpedo.damage));
                torpedo.delete_me = true;
                break;
            }
        }
    }
    for (target, damage) in impacts {
        if let Ok((params, vitals, status)) =
            world.query_one_mut::<(&ShipParameters, &mut ShipVitals, &mut CombatStatus)>(target)
        {
            ship::take_damage(params, vitals, status, damage);
        }
    }
}

/// Break up coincident ship pairs before any direction math runs.
fn jitter_coincident_ships(world: &mut World, rng: &mut ChaCha8Rng) {
    let entities: Vec<Entity> = {
        let mut query = world.query::<(&Body, &ShipVitals)>();
        let mut entities: Vec<Entity> = query.iter().map(|(entity, _)| entity).collect();
        entities.sort();
        entities
    };

    let mut positions: Vec<DVec2> = entities
        .iter()
        .map(|&entity| {
            world
                .get::<&Body>(entity)
                .map(|body| body.position)
                .unwrap_or(DVec2::ZERO)
        })
        .collect();

    let before = positions.clone();
    forces::resolve_coincident(&mut positions, rng);

    for (i, &entity) in entities.iter().enumerate() {
        if positions[i] != before[i] {
            if let Ok(body) = world.query_one_mut::<&mut Body>(entity) {
                body.position = positions[i];
            }
        }
    }
}
