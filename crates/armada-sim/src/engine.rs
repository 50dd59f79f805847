//! Simulation engine — the core of the battle.
//!
//! `Engine` owns the hecs ECS world, the squad table, the buff manager, and
//! the catalogs. Each `tick()` runs the fixed-order pipeline
//! (communicate → update → draw) and returns a [`FrameSnapshot`].
//! Single-threaded by design: the tick loop is the only writer and owns all
//! state for the duration of the tick, so the per-tick recompute needs no
//! synchronization.

use std::collections::BTreeMap;

use glam::DVec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::debug;

use armada_core::buffs::BuffCatalog;
use armada_core::catalog::ShipCatalog;
use armada_core::enums::{BuffId, ShipClass, SquadStance, TargetStrategy, Team};
use armada_core::error::CatalogError;
use armada_core::events::{CommEvent, DrawOp};
use armada_core::state::FrameSnapshot;
use armada_core::types::{Arena, Rgb, SimTime, SquadId};

use crate::buff_manager::BuffManager;
use crate::squad::Squad;
use crate::systems;
use crate::torpedo::{self, TorpedoLauncher};
use crate::world_setup;

/// Errors from scenario setup calls. Setup is configuration — it fails
/// fast; nothing inside the tick loop returns these.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Catalog lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// A setup call referenced a squad that does not exist.
    #[error("unknown squad id {0:?}")]
    UnknownSquad(SquadId),
}

/// Configuration for starting a new battle.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// RNG seed for determinism. Same seed = same battle.
    pub seed: u64,
    /// Arena bounds ships are clamped to.
    pub arena: Arena,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            arena: Arena::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all battle state.
pub struct Engine {
    world: World,
    time: SimTime,
    arena: Arena,
    catalog: ShipCatalog,
    buff_catalog: BuffCatalog,
    buffs: BuffManager,
    squads: BTreeMap<SquadId, Squad>,
    next_squad_id: u32,
    rng: ChaCha8Rng,
    events: Vec<CommEvent>,
    beam_ops: Vec<DrawOp>,
    despawn_buffer: Vec<Entity>,
    finalized: bool,
}

impl Engine {
    /// Create an engine with the built-in catalogs.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_catalogs(config, ShipCatalog::standard(), BuffCatalog::standard())
    }

    /// Create an engine with externally loaded catalogs.
    pub fn with_catalogs(
        config: EngineConfig,
        catalog: ShipCatalog,
        buff_catalog: BuffCatalog,
    ) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            arena: config.arena,
            catalog,
            buff_catalog,
            buffs: BuffManager::default(),
            squads: BTreeMap::new(),
            next_squad_id: 0,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            events: Vec::new(),
            beam_ops: Vec::new(),
            despawn_buffer: Vec::new(),
            finalized: false,
        }
    }

    // --- Scenario setup (not part of the hot loop) ---

    /// Add an empty squad.
    pub fn add_squad(
        &mut self,
        team: Team,
        strategy: TargetStrategy,
        stance: SquadStance,
    ) -> SquadId {
        let id = SquadId(self.next_squad_id);
        self.next_squad_id += 1;
        self.squads
            .insert(id, Squad::new(id, team, strategy, stance));
        id
    }

    /// Spawn a ship into a squad.
    pub fn add_ship(
        &mut self,
        squad: SquadId,
        class: ShipClass,
        position: DVec2,
        level: u32,
    ) -> Result<Entity, SetupError> {
        let squad_ref = self
            .squads
            .get_mut(&squad)
            .ok_or(SetupError::UnknownSquad(squad))?;
        let entity = world_setup::spawn_ship(
            &mut self.world,
            &self.catalog,
            class,
            squad_ref.team,
            squad,
            position,
            level,
        )?;
        squad_ref.add_ship(entity);
        Ok(entity)
    }

    /// Add a planet.
    pub fn add_planet(&mut self, position: DVec2, radius: f64, color: Rgb) -> Entity {
        world_setup::spawn_planet(&mut self.world, position, radius, color)
    }

    /// Add an asteroid with a randomized mineral seam.
    pub fn add_asteroid(&mut self, position: DVec2, max_concentration: f64) -> Entity {
        world_setup::spawn_asteroid(&mut self.world, &mut self.rng, position, max_concentration)
    }

    /// Order a squad to escort an asset, hovering outside `distance`.
    pub fn protect(
        &mut self,
        squad: SquadId,
        asset: Entity,
        distance: f64,
    ) -> Result<(), SetupError> {
        let squad = self
            .squads
            .get_mut(&squad)
            .ok_or(SetupError::UnknownSquad(squad))?;
        squad.protect(asset, distance);
        Ok(())
    }

    /// Order a squad onto a specific target.
    pub fn attack_target(&mut self, squad: SquadId, target: Entity) -> Result<(), SetupError> {
        let squad = self
            .squads
            .get_mut(&squad)
            .ok_or(SetupError::UnknownSquad(squad))?;
        squad.attack_target(target);
        Ok(())
    }

    /// Apply a cataloged buff to a ship.
    pub fn apply_buff(&mut self, ship: Entity, buff: BuffId) -> Result<(), CatalogError> {
        self.buffs.apply(
            &self.buff_catalog,
            &mut self.world,
            ship,
            buff,
            self.time.tick,
        )?;
        self.events.push(CommEvent::BuffApplied { buff });
        Ok(())
    }

    /// Space out planets and ships so nothing starts overlapping. Runs
    /// lazily on the first tick for anyone who forgets.
    pub fn finalize(&mut self) {
        world_setup::space_out_planets(&mut self.world, &self.arena);
        world_setup::space_out_ships(&mut self.world, &self.arena, &mut self.rng);
        self.finalized = true;
    }

    // --- Accessors ---

    /// Read-only view of the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for scenario setup and tests. Avoid mutating
    /// mid-battle — use setup calls and the tick pipeline instead.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Look up a squad.
    pub fn squad(&self, id: SquadId) -> Option<&Squad> {
        self.squads.get(&id)
    }

    /// Ids of all live squads.
    pub fn squad_ids(&self) -> Vec<SquadId> {
        self.squads.keys().copied().collect()
    }

    /// The buff manager (for inspecting active buffs).
    pub fn buffs(&self) -> &BuffManager {
        &self.buffs
    }

    // --- The tick loop ---

    /// Advance the battle by one tick and return the frame snapshot.
    ///
    /// Pipeline order is load-bearing: every force-contributing pass runs
    /// before integration (the commit point), and the boundary clamp runs
    /// after it.
    pub fn tick(&mut self) -> FrameSnapshot {
        if !self.finalized {
            self.finalize();
        }

        // COMMUNICATE: health-band announcements.
        systems::announcer::run(&mut self.world, &mut self.events);

        // UPDATE
        // 1. Roster maintenance: sweep dead ships (pre-removal events),
        //    tear down their racks, drop wiped-out squads.
        let squad_ids: Vec<SquadId> = self.squads.keys().copied().collect();
        for id in &squad_ids {
            let Some(squad) = self.squads.get_mut(id) else {
                continue;
            };
            let removed = squad.sweep_dead(&self.world, &mut self.events);
            for ship in removed {
                self.buffs.forget(ship);
                let racked: Vec<Entity> = self
                    .world
                    .get::<&TorpedoLauncher>(ship)
                    .map(|launcher| launcher.loaded.clone())
                    .unwrap_or_default();
                for torp in racked {
                    let _ = self.world.despawn(torp);
                }
                let _ = self.world.despawn(ship);
            }
        }
        self.squads.retain(|id, squad| {
            if squad.marked_for_deletion {
                debug!(squad = ?id, "removing deleted squad");
            }
            !squad.marked_for_deletion
        });

        // 2. Passive recharge and combat-timer decay.
        systems::recharge::run(&mut self.world);

        // 3. Squad recompute, group forces, and per-ship AI.
        let squad_ids: Vec<SquadId> = self.squads.keys().copied().collect();
        for id in &squad_ids {
            let Some(squad) = self.squads.get_mut(id) else {
                continue;
            };
            squad.refresh(&self.world, &mut self.events);
            squad.apply_group_forces(&mut self.world);
            systems::ship_ai::run(
                &mut self.world,
                squad,
                &mut self.buffs,
                &self.buff_catalog,
                &mut self.rng,
                &mut self.beam_ops,
                self.time.tick,
            );
        }

        // 4. Weapons.
        systems::weapons::run(&mut self.world, &mut self.beam_ops);
        torpedo::update_launchers(&mut self.world, &mut self.events, self.time.tick);
        torpedo::update_flight(&mut self.world);

        // 5. Collision resolution.
        systems::collision::run(&mut self.world, &mut self.rng);

        // 6. Integration — the commit point — then the boundary clamp.
        systems::movement::run(&mut self.world);
        systems::movement::clamp_ships(&mut self.world, &self.arena);

        // 7. Timers and terminal-state sweeps.
        self.buffs.update(self.time.tick);
        systems::cleanup::run(
            &mut self.world,
            &mut self.despawn_buffer,
            &mut self.events,
        );

        // DRAW
        let beams = std::mem::take(&mut self.beam_ops);
        let draw_ops = systems::render::draw_world(&self.world, &self.buffs, beams);
        let events = std::mem::take(&mut self.events);
        let snapshot =
            systems::render::build_snapshot(&self.world, self.time, &self.squads, draw_ops, events);

        self.time.advance();
        snapshot
    }
}
