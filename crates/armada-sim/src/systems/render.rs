//! Draw pass and frame snapshot assembly.
//!
//! Emits renderer-agnostic primitives: passive bodies first, then the
//! weapon/heal/mining beams accumulated during the update phase, then hulls
//! and shields on top. The snapshot is the engine's complete per-tick
//! output.

use std::collections::BTreeMap;

use hecs::World;

use armada_core::components::{
    Asteroid, Body, CombatStatus, Planet, ShipParameters, ShipVitals, SquadMember,
};
use armada_core::constants::{CRITICAL_HEALTH_THRESHOLD, LOW_HEALTH_THRESHOLD};
use armada_core::enums::{ShipClass, Team};
use armada_core::events::{CommEvent, DrawOp};
use armada_core::state::{
    AsteroidView, FrameSnapshot, PlanetView, ShipView, SquadView, TorpedoView,
};
use armada_core::types::{Rgb, SimTime, SquadId};

use crate::buff_manager::BuffManager;
use crate::ship;
use crate::squad::Squad;
use crate::systems::ship_ai::TargetingState;
use crate::torpedo::Torpedo;

/// Scale a color by a brightness fraction.
fn shade(color: Rgb, brightness: f64) -> Rgb {
    (
        (color.0 as f64 * brightness) as u8,
        (color.1 as f64 * brightness) as u8,
        (color.2 as f64 * brightness) as u8,
    )
}

/// Emit this frame's draw primitives.
pub fn draw_world(world: &World, buffs: &BuffManager, beam_ops: Vec<DrawOp>) -> Vec<DrawOp> {
    let mut ops: Vec<DrawOp> = Vec::new();

    // Passive bodies underneath everything else.
    for (_entity, (body, planet)) in world.query::<(&Body, &Planet)>().iter() {
        ops.push(DrawOp::Circle {
            color: planet.color,
            center: body.position,
            radius: planet.radius,
            width: 0,
        });
        ops.push(DrawOp::Circle {
            color: (255, 255, 255),
            center: body.position,
            radius: planet.radius + 10.0,
            width: 1,
        });
    }
    for (_entity, (body, asteroid)) in world.query::<(&Body, &Asteroid)>().iter() {
        ops.push(DrawOp::Circle {
            color: (110, 90, 70),
            center: body.position,
            radius: asteroid.radius,
            width: 0,
        });
        if !asteroid.is_depleted() {
            ops.push(DrawOp::Circle {
                color: asteroid.mineral,
                center: body.position,
                radius: asteroid.radius / 1.4,
                width: 2,
            });
        }
    }

    // Beams fire underneath the hulls that emitted them.
    ops.extend(beam_ops);

    let mut ships: Vec<_> = world
        .query::<(&Body, &ShipParameters, &ShipVitals, &Team)>()
        .iter()
        .map(|(entity, (body, params, vitals, team))| {
            (entity, body.position, params.clone(), *vitals, *team)
        })
        .collect();
    ships.sort_by_key(|(entity, ..)| *entity);

    for (entity, position, params, vitals, team) in ships {
        if vitals.is_dead() {
            // Dead husk.
            ops.push(DrawOp::Circle {
                color: (0, 0, 0),
                center: position,
                radius: params.radius,
                width: 0,
            });
            continue;
        }

        // Hull backdrop and health-shaded ring.
        let hull_brightness = (vitals.hp / params.hp + 0.6).min(1.0);
        ops.push(DrawOp::Circle {
            color: (30, 30, 30),
            center: position,
            radius: params.radius,
            width: 0,
        });
        ops.push(DrawOp::Circle {
            color: shade(params.color, hull_brightness),
            center: position,
            radius: params.radius,
            width: params.ship_width,
        });

        // Health pips.
        let percent = ship::health_percent(&params, &vitals);
        if percent < LOW_HEALTH_THRESHOLD {
            ops.push(DrawOp::Circle {
                color: (200, 200, 0),
                center: position,
                radius: 5.0,
                width: 0,
            });
        }
        if percent < CRITICAL_HEALTH_THRESHOLD {
            ops.push(DrawOp::Circle {
                color: (240, 0, 0),
                center: position,
                radius: 5.0,
                width: 0,
            });
        }

        // Shield ring, brightness tracking remaining shield. Pirate shields
        // read dimmer on the field.
        let mut shield_brightness = 220.0 * vitals.shield / params.shield + 35.0;
        if team == Team::Pirate {
            shield_brightness /= 1.5;
        }
        let sb = shield_brightness as u8;
        ops.push(DrawOp::Circle {
            color: (sb, sb, sb),
            center: position,
            radius: params.shield_radius,
            width: params.shield_width,
        });

        // Visible buff rings.
        for (i, buff) in buffs.visible_buffs(entity).iter().enumerate() {
            ops.push(DrawOp::Circle {
                color: buff.color,
                center: position,
                radius: params.shield_radius + 4.0 + i as f64 * 3.0,
                width: 1,
            });
        }
    }

    // Torpedoes on top.
    for (_entity, (body, torpedo)) in world.query::<(&Body, &Torpedo)>().iter() {
        ops.push(DrawOp::Circle {
            color: torpedo.color,
            center: body.position,
            radius: 3.0,
            width: 0,
        });
        ops.push(DrawOp::Circle {
            color: (220, 220, 220),
            center: body.position,
            radius: 4.0,
            width: 1,
        });
    }

    ops
}

/// Assemble the complete frame snapshot for this tick.
pub fn build_snapshot(
    world: &World,
    time: SimTime,
    squads: &BTreeMap<SquadId, Squad>,
    draw_ops: Vec<DrawOp>,
    events: Vec<CommEvent>,
) -> FrameSnapshot {
    let mut ships: Vec<ShipView> = world
        .query::<(
            &Body,
            &ShipParameters,
            &ShipVitals,
            &CombatStatus,
            &ShipClass,
            &Team,
            &SquadMember,
            &TargetingState,
        )>()
        .iter()
        .map(
            |(entity, (body, params, vitals, status, class, team, member, targeting))| ShipView {
                id: entity.to_bits().get(),
                class: *class,
                team: *team,
                squad: Some(member.squad),
                position: body.position,
                hp: vitals.hp,
                shield: vitals.shield,
                capacitor: vitals.capacitor,
                health_percent: ship::health_percent(params, vitals),
                in_combat: status.in_combat,
                dead: vitals.is_dead(),
                target: targeting.target.map(|t| t.to_bits().get()),
            },
        )
        .collect();
    ships.sort_by_key(|view| view.id);

    let squads: Vec<SquadView> = squads
        .values()
        .map(|squad| SquadView {
            id: squad.id,
            team: squad.team,
            strategy: squad.strategy,
            stance: squad.stance,
            centroid: squad.centroid,
            roster_size: squad.roster.len() as u32,
            in_combat: squad.in_combat,
            main_target: squad.main_target.map(|t| t.to_bits().get()),
        })
        .collect();

    let mut torpedoes: Vec<TorpedoView> = world
        .query::<(&Body, &Torpedo)>()
        .iter()
        .map(|(entity, (body, torpedo))| TorpedoView {
            id: entity.to_bits().get(),
            position: body.position,
            team: torpedo.team,
            released: torpedo.released,
        })
        .collect();
    torpedoes.sort_by_key(|view| view.id);

    let planets: Vec<PlanetView> = world
        .query::<(&Body, &Planet)>()
        .iter()
        .map(|(_entity, (body, planet))| PlanetView {
            position: body.position,
            radius: planet.radius,
            color: planet.color,
        })
        .collect();

    let asteroids: Vec<AsteroidView> = world
        .query::<(&Body, &Asteroid)>()
        .iter()
        .map(|(_entity, (body, asteroid))| AsteroidView {
            position: body.position,
            radius: asteroid.radius,
            concentration: asteroid.concentration,
            mineral: asteroid.mineral,
        })
        .collect();

    FrameSnapshot {
        time,
        ships,
        squads,
        torpedoes,
        planets,
        asteroids,
        draw_ops,
        events,
    }
}
