//! Force integration — the commit point of each tick.
//!
//! Every force-contributing pass (targeting, avoidance, cohesion, escort,
//! collision) must run before this system; a force applied afterward is
//! carried (damped) into the next tick instead of moving anything now.

use hecs::World;

use armada_core::components::{Body, ShipVitals};
use armada_core::types::Arena;

use crate::forces;

/// Integrate accumulated force into position for every body, exactly once
/// per tick, then damp the force buffer.
pub fn run(world: &mut World) {
    for (_entity, body) in world.query_mut::<&mut Body>() {
        let displacement = forces::displacement(body.force, body.mass, body.speed_limit);
        body.position += displacement;
        body.force *= body.force_damp;
    }
}

/// Hard-clamp ship positions to the arena rectangle.
///
/// A final non-physical override, applied after integration — not an
/// accumulated force.
pub fn clamp_ships(world: &mut World, arena: &Arena) {
    for (_entity, (body, _vitals)) in world.query_mut::<(&mut Body, &ShipVitals)>() {
        body.position = arena.clamp(body.position);
    }
}
