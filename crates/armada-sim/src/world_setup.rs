//! Entity spawn factories and battlefield layout helpers.
//!
//! Ships are built from the catalog plus their class behavior profile;
//! the profile's permanent adjustments (damage modifier, damping, collision
//! padding) are folded in exactly once, here.

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use armada_core::catalog::ShipCatalog;
use armada_core::components::{
    Asteroid, Body, CombatStatus, LaserGun, Planet, ShipParameters, ShipVitals, SquadMember,
};
use armada_core::constants::{PLANET_MIN_SPACING, SPACING_ITERATIONS, SPAWN_MIN_SPACING};
use armada_core::enums::{ShipClass, Team};
use armada_core::error::CatalogError;
use armada_core::types::{Arena, Rgb, SquadId};

use armada_tactics::profiles::profile_for;

use crate::systems::ship_ai::{RoleState, TargetingState};
use crate::torpedo::TorpedoLauncher;

/// Mineral tints an asteroid can carry.
const MINERALS: [Rgb; 4] = [
    (140, 140, 255),
    (120, 220, 120),
    (210, 240, 100),
    (255, 200, 80),
];

/// Spawn a ship of the given class into a squad.
///
/// Fails fast if the catalog has no entry for the class — a configuration
/// error, not a combat one.
pub fn spawn_ship(
    world: &mut World,
    catalog: &ShipCatalog,
    class: ShipClass,
    team: Team,
    squad: SquadId,
    position: DVec2,
    level: u32,
) -> Result<Entity, CatalogError> {
    let spec = catalog.spec(class)?;
    let profile = profile_for(class);

    let mut params = ShipParameters::from_spec(spec, level);
    params.incoming_damage_modifier *= profile.incoming_damage_modifier;

    let mut body = Body::at(
        position,
        params.mass,
        params.collision_radius * profile.collision_radius_factor,
    );
    body.speed_limit = Some(params.speed);
    if let Some(damp) = profile.force_damp {
        body.force_damp = damp;
    }

    let vitals = ShipVitals::full(&params);
    let tubes = spec.torpedo_tubes;

    let entity = world.spawn((
        body,
        params,
        vitals,
        CombatStatus::default(),
        class,
        team,
        SquadMember { squad },
        LaserGun::default(),
        TargetingState::default(),
        RoleState::default(),
    ));
    if tubes > 0 {
        let _ = world.insert_one(entity, TorpedoLauncher::new(tubes, level));
    }
    Ok(entity)
}

/// Spawn a stationary planet.
pub fn spawn_planet(world: &mut World, position: DVec2, radius: f64, color: Rgb) -> Entity {
    let mut body = Body::at(position, 10_000.0, radius + 10.0);
    body.force_damp = 0.0;
    world.spawn((body, Planet { radius, color }))
}

/// Spawn a slowly drifting asteroid with a random mineral seam.
pub fn spawn_asteroid(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    position: DVec2,
    max_concentration: f64,
) -> Entity {
    let radius = 35.0;
    let mut body = Body::at(position, 1000.0, radius + 10.0);
    // Asteroids drift forever
    body.force_damp = 1.0;
    body.apply_force(DVec2::new(
        rng.gen_range(-200.0..200.0),
        rng.gen_range(-200.0..200.0),
    ));
    let mineral = MINERALS[rng.gen_range(0..MINERALS.len())];
    let concentration = rng.gen_range(10.0..max_concentration.max(10.5));
    world.spawn((
        body,
        Asteroid {
            radius,
            concentration,
            mineral,
        },
    ))
}

/// Relax planets apart so none start overlapping.
pub fn space_out_planets(world: &mut World, arena: &Arena) {
    let entities: Vec<Entity> = world
        .query::<(&Body, &Planet)>()
        .iter()
        .map(|(entity, _)| entity)
        .collect();
    let mut positions: Vec<DVec2> = entities
        .iter()
        .filter_map(|&entity| world.get::<&Body>(entity).map(|body| body.position).ok())
        .collect();

    for _ in 0..SPACING_ITERATIONS {
        for i in 0..positions.len() {
            for j in 0..positions.len() {
                if i == j {
                    continue;
                }
                if positions[i].distance(positions[j]) < PLANET_MIN_SPACING {
                    let delta = positions[j] - positions[i];
                    positions[i] -= delta / 10.0;
                }
                positions[i] = arena.clamp(positions[i]);
            }
        }
    }

    for (&entity, &position) in entities.iter().zip(positions.iter()) {
        if let Ok(body) = world.query_one_mut::<&mut Body>(entity) {
            body.position = position;
        }
    }
}

/// Jitter ships apart so no pair starts stacked on the same point.
pub fn space_out_ships(world: &mut World, arena: &Arena, rng: &mut ChaCha8Rng) {
    let entities: Vec<Entity> = {
        let mut query = world.query::<(&Body, &ShipVitals)>();
        let mut entities: Vec<Entity> = query.iter().map(|(entity, _)| entity).collect();
        entities.sort();
        entities
    };
    let mut positions: Vec<DVec2> = entities
        .iter()
        .filter_map(|&entity| world.get::<&Body>(entity).map(|body| body.position).ok())
        .collect();

    for _ in 0..SPACING_ITERATIONS {
        for i in 0..positions.len() {
            for j in 0..positions.len() {
                if i == j {
                    continue;
                }
                if positions[i].distance(positions[j]) < SPAWN_MIN_SPACING {
                    positions[i] += DVec2::new(
                        rng.gen_range(-5.0..5.0),
                        rng.gen_range(-5.0..5.0),
                    );
                    let delta = positions[j] - positions[i];
                    positions[i] -= delta;
                }
                positions[i] = arena.clamp(positions[i]);
            }
        }
    }

    for (&entity, &position) in entities.iter().zip(positions.iter()) {
        if let Ok(body) = world.query_one_mut::<&mut Body>(entity) {
            body.position = position;
        }
    }
}
