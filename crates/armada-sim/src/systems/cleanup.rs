//! Cleanup system: sweeps spent torpedoes and mined-out asteroids.
//!
//! Dead ships are NOT swept here — their owning squad removes them at the
//! start of the next tick so the pre-removal hook (destruction events,
//! rack teardown) runs under the squad's control.

use hecs::{Entity, World};

use armada_core::components::Asteroid;
use armada_core::events::CommEvent;

use crate::torpedo::Torpedo;

/// Despawn entities in terminal states. Uses a pre-allocated buffer to
/// avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>, events: &mut Vec<CommEvent>) {
    despawn_buffer.clear();

    // Torpedoes that detonated or expired, plus unreleased torpedoes whose
    // origin ship no longer exists.
    let mut orphans: Vec<Entity> = Vec::new();
    for (entity, torpedo) in world.query::<&Torpedo>().iter() {
        if torpedo.delete_me {
            despawn_buffer.push(entity);
        } else if !torpedo.released {
            orphans.push(entity);
        }
    }
    for entity in orphans {
        let origin = world
            .get::<&Torpedo>(entity)
            .map(|torpedo| torpedo.origin)
            .ok();
        if let Some(origin) = origin {
            if !world.contains(origin) {
                despawn_buffer.push(entity);
            }
        }
    }

    // Mined-out asteroids.
    for (entity, asteroid) in world.query::<&Asteroid>().iter() {
        if asteroid.is_depleted() {
            despawn_buffer.push(entity);
            events.push(CommEvent::AsteroidDepleted);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
