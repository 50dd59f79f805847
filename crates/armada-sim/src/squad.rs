//! Squad — a roster of ships sharing a team, targeting strategy, and
//! cohesion behavior.
//!
//! Squads live in the engine's squad table, NOT as ECS entities; the roster
//! holds entity handles into the world. Everything except the sticky-target
//! cache is recomputed from scratch each tick.

use std::collections::HashMap;

use glam::DVec2;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use armada_core::components::{Body, CombatStatus, ShipVitals};
use armada_core::constants::{
    COHESION_BASE_RADIUS, COHESION_GAIN, COHESION_INNER_FRACTION, COHESION_PER_MEMBER,
    DEFAULT_PROTECTION_DISTANCE,
};
use armada_core::enums::{ShipClass, SquadStance, TargetStrategy, Team};
use armada_core::events::CommEvent;
use armada_core::types::SquadId;

use armada_tactics::strategy::{self, Candidate};

use crate::battle_info::{self, ShipInfo};
use crate::forces;

/// A roster of ships fighting as one unit.
#[derive(Debug)]
pub struct Squad {
    pub id: SquadId,
    pub team: Team,
    pub strategy: TargetStrategy,
    pub stance: SquadStance,
    /// Roster in insertion order (which is also draw order).
    pub roster: Vec<Entity>,
    /// Mass-weighted centroid; (0, 0) while the roster is empty.
    pub centroid: DVec2,
    /// Squad-wide primary target chosen by the strategy.
    pub main_target: Option<Entity>,
    /// Scripted target override from `attack_target`; cleared on death.
    pub ordered_target: Option<Entity>,
    /// Asset this squad escorts while in the protect stance. Never owned —
    /// the asset living or dying is someone else's business.
    pub protection_asset: Option<Entity>,
    pub protection_distance: f64,
    /// Debounced combat flag; transitions emit one event each.
    pub in_combat: bool,
    /// Set once the roster has emptied after at least one ship was added.
    pub marked_for_deletion: bool,

    adversaries: Vec<ShipInfo>,
    sticky_targets: HashMap<Entity, Entity>,
    had_ships: bool,
}

impl Squad {
    /// Create an empty squad.
    pub fn new(id: SquadId, team: Team, strategy: TargetStrategy, stance: SquadStance) -> Self {
        Self {
            id,
            team,
            strategy,
            stance,
            roster: Vec::new(),
            centroid: DVec2::ZERO,
            main_target: None,
            ordered_target: None,
            protection_asset: None,
            protection_distance: DEFAULT_PROTECTION_DISTANCE,
            in_combat: false,
            marked_for_deletion: false,
            adversaries: Vec::new(),
            sticky_targets: HashMap::new(),
            had_ships: false,
        }
    }

    /// Add a ship to the roster.
    pub fn add_ship(&mut self, ship: Entity) {
        self.roster.push(ship);
        self.had_ships = true;
    }

    /// Escort an asset (planet, asteroid, or ship), hovering just outside
    /// the given distance.
    pub fn protect(&mut self, asset: Entity, distance: f64) {
        self.stance = SquadStance::Protect;
        self.protection_asset = Some(asset);
        self.protection_distance = distance;
    }

    /// Order the squad onto a specific target, overriding the strategy
    /// until that target dies.
    pub fn attack_target(&mut self, target: Entity) {
        self.ordered_target = Some(target);
    }

    /// This tick's adversary list (valid after [`Squad::refresh`]).
    pub fn adversaries(&self) -> &[ShipInfo] {
        &self.adversaries
    }

    /// Remove dead ships from the roster, emitting their destruction events
    /// (the pre-removal hook). Returns the removed entities so the engine
    /// can despawn them. An emptied roster marks the squad for deletion.
    pub fn sweep_dead(&mut self, world: &World, events: &mut Vec<CommEvent>) -> Vec<Entity> {
        let mut removed = Vec::new();

        self.roster.retain(|&ship| {
            let dead = match world.get::<&ShipVitals>(ship) {
                Ok(vitals) => vitals.is_dead(),
                Err(_) => true,
            };
            if dead {
                if let Ok(class) = world.get::<&ShipClass>(ship) {
                    events.push(CommEvent::ShipDestroyed {
                        class: *class,
                        team: self.team,
                    });
                }
                removed.push(ship);
            }
            !dead
        });

        for ship in &removed {
            self.sticky_targets.remove(ship);
        }

        if self.roster.is_empty() && self.had_ships && !self.marked_for_deletion {
            debug!(squad = ?self.id, "squad wiped out, marking for deletion");
            self.marked_for_deletion = true;
        }

        removed
    }

    /// Per-tick recompute: adversary list, centroid, main target, and the
    /// combat-status edge. No state is carried across ticks here except the
    /// sticky-target cache (maintained in `secondary_target`).
    pub fn refresh(&mut self, world: &World, events: &mut Vec<CommEvent>) {
        self.adversaries = battle_info::adversary_ships(world, self.team);
        self.centroid = self.compute_centroid(world);

        // Scripted orders win while their target is still an adversary.
        if let Some(ordered) = self.ordered_target {
            if !self.adversaries.iter().any(|a| a.entity == ordered) {
                self.ordered_target = None;
            }
        }
        self.main_target = self.ordered_target.or_else(|| {
            let candidates = self.candidates(self.centroid);
            strategy::select_main_target(self.strategy, &candidates)
        });

        // Combat hysteresis: the per-ship debounce timers decide when a
        // ship drops out of combat; the squad flag is their union, and each
        // flip is reported exactly once.
        let engaged = self.roster.iter().any(|&ship| {
            world
                .get::<&CombatStatus>(ship)
                .map(|status| status.in_combat)
                .unwrap_or(false)
        });
        if engaged != self.in_combat {
            self.in_combat = engaged;
            events.push(if engaged {
                CommEvent::SquadEngaged {
                    squad: self.id,
                    team: self.team,
                }
            } else {
                CommEvent::SquadDisengaged {
                    squad: self.id,
                    team: self.team,
                }
            });
        }
    }

    /// Per-ship fallback target, with sticky caching keyed by the asking
    /// ship's entity. The cache is invalidated implicitly: a cached pick
    /// that is no longer among the adversaries is replaced.
    pub fn secondary_target(
        &mut self,
        ship: Entity,
        ship_pos: DVec2,
        rng: &mut ChaCha8Rng,
    ) -> Option<Entity> {
        let candidates = self.candidates(ship_pos);
        let sticky = self.sticky_targets.get(&ship).copied();
        let pick = strategy::select_secondary_target(self.strategy, &candidates, sticky, rng);

        match pick {
            Some(target) => {
                self.sticky_targets.insert(ship, target);
            }
            None => {
                self.sticky_targets.remove(&ship);
            }
        }
        pick
    }

    /// Cohesion and escort forces, applied to every roster ship.
    ///
    /// The grouping radius grows with squad size so big squads cluster
    /// loosely instead of collapsing to a point; ships well inside the
    /// radius get pushed back out.
    pub fn apply_group_forces(&self, world: &mut World) {
        if self.roster.is_empty() {
            return;
        }

        let grouping = matches!(self.stance, SquadStance::Defensive | SquadStance::Protect);
        let outer_radius =
            COHESION_BASE_RADIUS + self.roster.len() as f64 * COHESION_PER_MEMBER;
        let inner_radius = outer_radius * COHESION_INNER_FRACTION;

        let asset_pos = self.protection_asset.and_then(|asset| {
            world.get::<&Body>(asset).map(|body| body.position).ok()
        });

        for &ship in &self.roster {
            let Ok(body) = world.query_one_mut::<&mut Body>(ship) else {
                continue;
            };

            if grouping {
                let distance = body.position.distance(self.centroid);
                let delta = (self.centroid - body.position) * COHESION_GAIN;
                if distance > outer_radius {
                    body.apply_force(delta);
                } else if distance < inner_radius {
                    body.apply_force(-delta);
                }
            }

            if self.stance == SquadStance::Protect {
                if let Some(asset_pos) = asset_pos {
                    let (on_ship, _) =
                        forces::attraction(body.position, asset_pos, self.protection_distance);
                    body.apply_force(on_ship);
                }
            }
        }
    }

    /// Build targeting candidates with distances measured from `origin`
    /// (the centroid for main targeting, the asking ship for secondary).
    fn candidates(&self, origin: DVec2) -> Vec<Candidate<Entity>> {
        self.adversaries
            .iter()
            .map(|info| Candidate {
                id: info.entity,
                health: info.health,
                distance_from_squad: self.centroid.distance(info.position),
                distance_from_ship: origin.distance(info.position),
                threat: info.threat,
            })
            .collect()
    }

    fn compute_centroid(&self, world: &World) -> DVec2 {
        let mut weighted = DVec2::ZERO;
        let mut total_mass = 0.0;
        for &ship in &self.roster {
            if let Ok(body) = world.get::<&Body>(ship) {
                weighted += body.position * body.mass;
                total_mass += body.mass;
            }
        }
        if total_mass > 0.0 {
            weighted / total_mass
        } else {
            DVec2::ZERO
        }
    }
}
