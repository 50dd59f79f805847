//! Tests for the force primitives, ship combat operations, squads, buffs,
//! and the full engine pipeline.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use armada_core::buffs::BuffCatalog;
use armada_core::catalog::ShipCatalog;
use armada_core::components::{CombatStatus, ShipParameters, ShipVitals};
use armada_core::constants::{ATTRACTION_MAX_EXCESS, ATTRACTION_SLOPE, TICK_RATE};
use armada_core::enums::*;
use armada_core::events::CommEvent;

use crate::engine::{Engine, EngineConfig};
use crate::forces;
use crate::ship;
use crate::torpedo::TorpedoLauncher;

fn params_for(class: ShipClass) -> ShipParameters {
    let catalog = ShipCatalog::standard();
    ShipParameters::from_spec(catalog.spec(class).unwrap(), 1)
}

// ---- Force primitives ----

#[test]
fn test_repulsion_zero_at_rest_distance() {
    let a = DVec2::new(0.0, 0.0);
    let b = DVec2::new(100.0, 0.0);
    // Radii sum to 40, well under the 100 separation.
    let (on_a, on_b) = forces::repulsion(a, 20.0, b, 20.0, None);
    assert_eq!(on_a, DVec2::ZERO);
    assert_eq!(on_b, DVec2::ZERO);
}

#[test]
fn test_repulsion_opposite_inside_rest_distance() {
    let a = DVec2::new(0.0, 0.0);
    let b = DVec2::new(10.0, 0.0);
    let (on_a, on_b) = forces::repulsion(a, 20.0, b, 20.0, None);
    assert!(on_a.length() > 0.0);
    assert_eq!(on_a, -on_b, "forces must be mutually opposite");
    // a is pushed away from b (negative x direction).
    assert!(on_a.x < 0.0);
}

#[test]
fn test_repulsion_grows_as_pair_closes() {
    let a = DVec2::ZERO;
    let far = forces::repulsion(a, 20.0, DVec2::new(30.0, 0.0), 20.0, None).0;
    let near = forces::repulsion(a, 20.0, DVec2::new(5.0, 0.0), 20.0, None).0;
    assert!(near.length() > far.length());
}

#[test]
fn test_repulsion_mass_weighting_pushes_lighter_harder() {
    let a = DVec2::ZERO;
    let b = DVec2::new(10.0, 0.0);
    // a is light, b is heavy: a takes the bigger push.
    let (on_a, on_b) = forces::repulsion_mass_weighted(a, 20.0, 10.0, b, 20.0, 90.0, None);
    assert!(on_a.length() > on_b.length());
}

#[test]
fn test_attraction_zero_inside_range() {
    let (on_a, on_b) = forces::attraction(DVec2::ZERO, DVec2::new(5.0, 5.0), 10.0);
    assert_eq!(on_a, DVec2::ZERO);
    assert_eq!(on_b, DVec2::ZERO);
}

#[test]
fn test_attraction_monotone_up_to_cap() {
    let range = 10.0;
    let mut last = 0.0;
    for d in [11.0, 50.0, 200.0, 400.0, 10.0 + ATTRACTION_MAX_EXCESS] {
        let (on_a, _) = forces::attraction(DVec2::ZERO, DVec2::new(d, 0.0), range);
        assert!(
            on_a.length() >= last,
            "attraction must be non-decreasing in excess distance"
        );
        last = on_a.length();
    }
    // Beyond the cap the force stops growing.
    let capped = forces::attraction(DVec2::ZERO, DVec2::new(5000.0, 0.0), range).0;
    assert!((capped.length() - ATTRACTION_MAX_EXCESS * ATTRACTION_SLOPE).abs() < 1e-9);
}

#[test]
fn test_attraction_pair_is_opposite() {
    let (on_a, on_b) = forces::attraction(DVec2::ZERO, DVec2::new(100.0, 50.0), 10.0);
    assert_eq!(on_a, -on_b);
}

#[test]
fn test_displacement_respects_speed_limit() {
    let d = forces::displacement(DVec2::new(1000.0, -1000.0), 10.0, Some(0.5));
    assert_eq!(d, DVec2::new(0.5, -0.5));

    let unclamped = forces::displacement(DVec2::new(100.0, 0.0), 10.0, None);
    assert_eq!(unclamped, DVec2::new(10.0, 0.0));
}

#[test]
fn test_resolve_coincident_separates_stacked_pairs() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut positions = vec![DVec2::new(100.0, 100.0), DVec2::new(100.0, 100.0)];
    forces::resolve_coincident(&mut positions, &mut rng);
    assert!(positions[0].distance(positions[1]) > 0.0);
}

// ---- Ship combat operations ----

#[test]
fn test_damage_drains_shield_before_hull() {
    let params = params_for(ShipClass::Fighter);
    let mut vitals = ShipVitals::full(&params);
    let mut status = CombatStatus::default();

    ship::take_damage(&params, &mut vitals, &mut status, 100.0);
    assert_eq!(vitals.shield, 50.0);
    assert_eq!(vitals.hp, params.hp, "hull untouched while shield holds");
    assert!(status.in_combat);
}

#[test]
fn test_overkill_damage_clamps_at_zero() {
    let params = params_for(ShipClass::Fighter);
    let mut vitals = ShipVitals::full(&params);
    let mut status = CombatStatus::default();

    let outcome = ship::take_damage(&params, &mut vitals, &mut status, 10_000.0);
    assert!(outcome.died);
    assert_eq!(vitals.hp, 0.0);
    assert!(vitals.is_dead());

    // Idempotent-safe after death: no negative hp, no new death report.
    let again = ship::take_damage(&params, &mut vitals, &mut status, 500.0);
    assert!(!again.died);
    assert_eq!(vitals.hp, 0.0);
}

#[test]
fn test_tank_soak_scenario() {
    // 300 hull / 500 shield / 0.75 incoming modifier takes 1000 raw in one
    // hit: 750 effective, shield absorbs 500, hull absorbs 250.
    let catalog = ShipCatalog::standard();
    let mut params = ShipParameters::from_spec(catalog.spec(ShipClass::Tank).unwrap(), 1);
    params.incoming_damage_modifier *= 0.75;
    let mut vitals = ShipVitals::full(&params);
    let mut status = CombatStatus::default();

    let outcome = ship::take_damage(&params, &mut vitals, &mut status, 1000.0);
    assert!(!outcome.died);
    assert_eq!(vitals.shield, 0.0);
    assert!((vitals.hp - 50.0).abs() < 1e-9);
}

#[test]
fn test_heal_restores_hull_then_shield() {
    let params = params_for(ShipClass::Fighter);
    let mut vitals = ShipVitals::full(&params);
    let mut status = CombatStatus::default();

    ship::take_damage(&params, &mut vitals, &mut status, 250.0); // 150 shield + 100 hull
    assert_eq!(vitals.hp, 100.0);
    assert_eq!(vitals.shield, 0.0);

    ship::heal(&params, &mut vitals, 120.0);
    assert_eq!(vitals.hp, params.hp, "hull tops up first");
    assert_eq!(vitals.shield, 20.0, "remainder spills to shield");

    // Healing never exceeds the caps.
    ship::heal(&params, &mut vitals, 10_000.0);
    assert_eq!(vitals.hp, params.hp);
    assert_eq!(vitals.shield, params.shield);
}

#[test]
fn test_health_percent_stays_in_unit_interval() {
    let params = params_for(ShipClass::Zergling);
    let mut vitals = ShipVitals::full(&params);
    let mut status = CombatStatus::default();

    assert_eq!(ship::health_percent(&params, &vitals), 1.0);

    let mut rng = ChaCha8Rng::seed_from_u64(9);
    for _ in 0..200 {
        if rng.gen_bool(0.6) {
            ship::take_damage(&params, &mut vitals, &mut status, rng.gen_range(0.0..60.0));
        } else {
            ship::heal(&params, &mut vitals, rng.gen_range(0.0..60.0));
        }
        let percent = ship::health_percent(&params, &vitals);
        assert!((0.0..=1.0).contains(&percent));
    }
}

// ---- Engine: determinism ----

fn two_squad_engine(seed: u64, strategy: TargetStrategy) -> Engine {
    let mut engine = Engine::new(EngineConfig {
        seed,
        ..Default::default()
    });

    let blue = engine.add_squad(Team::Terran, strategy, SquadStance::Defensive);
    let red = engine.add_squad(Team::Swarm, strategy, SquadStance::Defensive);

    for (i, class) in [ShipClass::Fighter, ShipClass::Healer, ShipClass::Tank]
        .into_iter()
        .enumerate()
    {
        engine
            .add_ship(blue, class, DVec2::new(400.0, 400.0 + i as f64 * 60.0), 1)
            .unwrap();
    }
    for i in 0..4 {
        engine
            .add_ship(red, ShipClass::Zergling, DVec2::new(900.0, 400.0 + i as f64 * 40.0), 1)
            .unwrap();
    }
    engine
}

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = two_squad_engine(12345, TargetStrategy::Random);
    let mut engine_b = two_squad_engine(12345, TargetStrategy::Random);

    for tick in 0..300 {
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();
        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "snapshots diverged at tick {tick}");
    }
}

#[test]
fn test_determinism_different_seeds_diverge() {
    let mut engine_a = two_squad_engine(111, TargetStrategy::Random);
    let mut engine_b = two_squad_engine(222, TargetStrategy::Random);

    let mut diverged = false;
    for _ in 0..300 {
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();
        if serde_json::to_string(&snap_a).unwrap() != serde_json::to_string(&snap_b).unwrap() {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "different seeds should produce divergent battles");
}

// ---- Engine: targeting ----

#[test]
fn test_low_health_strategy_targets_weakest_adversary() {
    let mut engine = Engine::new(EngineConfig::default());
    let blue = engine.add_squad(Team::Terran, TargetStrategy::LowHealth, SquadStance::Defensive);
    let red = engine.add_squad(Team::Swarm, TargetStrategy::NoTarget, SquadStance::Defensive);

    engine
        .add_ship(blue, ShipClass::Fighter, DVec2::new(400.0, 500.0), 1)
        .unwrap();
    let mut adversaries = Vec::new();
    for i in 0..3 {
        let ship = engine
            .add_ship(red, ShipClass::Spitter, DVec2::new(900.0, 400.0 + i as f64 * 80.0), 1)
            .unwrap();
        adversaries.push(ship);
    }

    // Hand-set adversary healths to 50 / 10 / 80 (hp only, shield zeroed).
    for (ship, hp) in adversaries.iter().zip([50.0, 10.0, 80.0]) {
        let vitals = engine
            .world_mut()
            .query_one_mut::<&mut ShipVitals>(*ship)
            .unwrap();
        vitals.hp = hp;
        vitals.shield = 0.0;
    }

    engine.tick();
    let squad = engine.squad(blue).unwrap();
    assert_eq!(
        squad.main_target,
        Some(adversaries[1]),
        "low_health must pick the 10-health ship"
    );
}

#[test]
fn test_empty_adversary_list_yields_no_target() {
    for strategy in [
        TargetStrategy::Nearest,
        TargetStrategy::LowHealth,
        TargetStrategy::Threat,
        TargetStrategy::Random,
        TargetStrategy::NoTarget,
    ] {
        let mut engine = Engine::new(EngineConfig::default());
        let lonely = engine.add_squad(Team::Terran, strategy, SquadStance::Defensive);
        engine
            .add_ship(lonely, ShipClass::Fighter, DVec2::new(400.0, 400.0), 1)
            .unwrap();

        engine.tick();
        let squad = engine.squad(lonely).unwrap();
        assert_eq!(squad.main_target, None);
    }
}

#[test]
fn test_attack_order_overrides_strategy() {
    let mut engine = Engine::new(EngineConfig::default());
    let blue = engine.add_squad(Team::Terran, TargetStrategy::Nearest, SquadStance::Defensive);
    let red = engine.add_squad(Team::Swarm, TargetStrategy::NoTarget, SquadStance::Defensive);

    engine
        .add_ship(blue, ShipClass::Fighter, DVec2::new(400.0, 400.0), 1)
        .unwrap();
    let near = engine
        .add_ship(red, ShipClass::Zergling, DVec2::new(500.0, 400.0), 1)
        .unwrap();
    let far = engine
        .add_ship(red, ShipClass::Zergling, DVec2::new(1200.0, 800.0), 1)
        .unwrap();

    engine.attack_target(blue, far).unwrap();
    engine.tick();
    assert_eq!(engine.squad(blue).unwrap().main_target, Some(far));

    // Nearest strategy would have picked the closer ship.
    let _ = near;
}

// ---- Engine: combat lifecycle ----

#[test]
fn test_battle_produces_casualties_and_events() {
    let mut engine = two_squad_engine(7, TargetStrategy::Nearest);

    let mut saw_engaged = false;
    let mut saw_destroyed = false;
    for _ in 0..6000 {
        let snapshot = engine.tick();
        for event in &snapshot.events {
            match event {
                CommEvent::SquadEngaged { .. } => saw_engaged = true,
                CommEvent::ShipDestroyed { .. } => saw_destroyed = true,
                _ => {}
            }
        }
        if saw_destroyed {
            break;
        }
    }
    assert!(saw_engaged, "squads should have engaged");
    assert!(saw_destroyed, "the battle should produce at least one kill");
}

#[test]
fn test_wiped_squad_is_deleted() {
    let mut engine = Engine::new(EngineConfig::default());
    let blue = engine.add_squad(Team::Terran, TargetStrategy::Nearest, SquadStance::Defensive);
    let ship = engine
        .add_ship(blue, ShipClass::Zergling, DVec2::new(400.0, 400.0), 1)
        .unwrap();

    engine.tick();
    assert!(engine.squad(blue).is_some());

    // Kill the only roster member.
    engine
        .world_mut()
        .query_one_mut::<&mut ShipVitals>(ship)
        .unwrap()
        .hp = 0.0;

    // Sweep runs at the start of the next tick; the squad goes with it.
    let snapshot = engine.tick();
    assert!(engine.squad(blue).is_none(), "empty squad must be deleted");
    assert!(!engine.world().contains(ship), "dead ship must be despawned");
    assert!(snapshot
        .events
        .iter()
        .any(|e| matches!(e, CommEvent::ShipDestroyed { .. })));
}

#[test]
fn test_squad_combat_flag_emits_single_edge() {
    // Two squads practically on top of each other so combat starts fast.
    let mut engine = Engine::new(EngineConfig {
        seed: 3,
        ..Default::default()
    });
    let blue = engine.add_squad(Team::Terran, TargetStrategy::Nearest, SquadStance::Offensive);
    let red = engine.add_squad(Team::Swarm, TargetStrategy::Nearest, SquadStance::Offensive);
    engine
        .add_ship(blue, ShipClass::Fighter, DVec2::new(500.0, 500.0), 1)
        .unwrap();
    engine
        .add_ship(red, ShipClass::Spitter, DVec2::new(560.0, 500.0), 1)
        .unwrap();

    let mut engaged_events = 0;
    let mut ticks_in_combat = 0;
    for _ in 0..2000 {
        let snapshot = engine.tick();
        engaged_events += snapshot
            .events
            .iter()
            .filter(|e| matches!(e, CommEvent::SquadEngaged { .. }))
            .count();
        if snapshot.squads.iter().any(|s| s.in_combat) {
            ticks_in_combat += 1;
        }
    }
    // Edges, not per-tick spam: far fewer engaged events than combat ticks.
    assert!(engaged_events >= 1, "squads never engaged");
    assert!(ticks_in_combat > 100);
    assert!(
        engaged_events <= 8,
        "engaged must be an edge event, got {engaged_events}"
    );
}

// ---- Engine: announcer ----

#[test]
fn test_health_announcements_fire_once_per_excursion() {
    let mut engine = Engine::new(EngineConfig::default());
    let blue = engine.add_squad(Team::Terran, TargetStrategy::Nearest, SquadStance::Defensive);
    let ship = engine
        .add_ship(blue, ShipClass::Fighter, DVec2::new(400.0, 400.0), 1)
        .unwrap();
    engine.tick();

    // Drop to 40% health (low band, above critical).
    {
        let vitals = engine
            .world_mut()
            .query_one_mut::<&mut ShipVitals>(ship)
            .unwrap();
        vitals.hp = 140.0;
        vitals.shield = 0.0;
    }

    let mut low_events = 0;
    for _ in 0..10 {
        let snapshot = engine.tick();
        low_events += snapshot
            .events
            .iter()
            .filter(|e| matches!(e, CommEvent::ShipLowHealth { .. }))
            .count();
    }
    assert_eq!(low_events, 1, "one announcement per excursion");
}

// ---- Buffs ----

#[test]
fn test_buff_expires_after_duration() {
    let mut engine = Engine::new(EngineConfig::default());
    let blue = engine.add_squad(Team::Terran, TargetStrategy::Nearest, SquadStance::Defensive);
    let ship = engine
        .add_ship(blue, ShipClass::Fighter, DVec2::new(400.0, 400.0), 1)
        .unwrap();
    engine.tick();

    engine.apply_buff(ship, BuffId::FirstStrike).unwrap();
    assert!(engine.buffs().is_active(ship, BuffId::FirstStrike));
    assert_eq!(engine.buffs().visible_buffs(ship).len(), 1);

    // FirstStrike lasts 5 seconds of simulated time.
    for _ in 0..(5 * TICK_RATE as usize + 2) {
        engine.tick();
    }
    assert!(!engine.buffs().is_active(ship, BuffId::FirstStrike));
    assert!(engine.buffs().visible_buffs(ship).is_empty());
}

#[test]
fn test_buff_reapply_refreshes_without_stacking() {
    let mut engine = Engine::new(EngineConfig::default());
    let blue = engine.add_squad(Team::Terran, TargetStrategy::Nearest, SquadStance::Defensive);
    let ship = engine
        .add_ship(blue, ShipClass::Fighter, DVec2::new(400.0, 400.0), 1)
        .unwrap();
    engine.tick();

    let base_range = params_of(&engine, ship).laser_range;
    engine.apply_buff(ship, BuffId::FirstStrike).unwrap();
    let buffed_range = params_of(&engine, ship).laser_range;
    assert!((buffed_range - base_range * 2.0).abs() < 1e-9);

    // Re-apply before expiry: timer refreshes, the multiplier does NOT
    // compound, and there is still exactly one instance.
    engine.apply_buff(ship, BuffId::FirstStrike).unwrap();
    assert_eq!(engine.buffs().visible_buffs(ship).len(), 1);
    assert!((params_of(&engine, ship).laser_range - buffed_range).abs() < 1e-9);
}

fn params_of(engine: &Engine, ship: hecs::Entity) -> ShipParameters {
    engine
        .world()
        .get::<&ShipParameters>(ship)
        .map(|p| (*p).clone())
        .unwrap()
}

#[test]
fn test_unknown_buff_fails_fast() {
    use std::collections::HashMap;

    let mut engine = Engine::with_catalogs(
        EngineConfig::default(),
        ShipCatalog::standard(),
        BuffCatalog::from_specs(HashMap::new()),
    );
    let blue = engine.add_squad(Team::Terran, TargetStrategy::Nearest, SquadStance::Defensive);
    let ship = engine
        .add_ship(blue, ShipClass::Fighter, DVec2::new(400.0, 400.0), 1)
        .unwrap();

    assert!(engine.apply_buff(ship, BuffId::Salvation).is_err());
}

// ---- Roles ----

#[test]
fn test_healer_repairs_wounded_teammate() {
    let mut engine = Engine::new(EngineConfig::default());
    let blue = engine.add_squad(Team::Terran, TargetStrategy::Nearest, SquadStance::Defensive);
    let fighter = engine
        .add_ship(blue, ShipClass::Fighter, DVec2::new(400.0, 400.0), 1)
        .unwrap();
    engine
        .add_ship(blue, ShipClass::Healer, DVec2::new(420.0, 400.0), 1)
        .unwrap();
    engine.tick();

    {
        let vitals = engine
            .world_mut()
            .query_one_mut::<&mut ShipVitals>(fighter)
            .unwrap();
        vitals.hp = 100.0;
        vitals.shield = 0.0;
    }

    for _ in 0..120 {
        engine.tick();
    }

    let healed = engine
        .world()
        .get::<&ShipVitals>(fighter)
        .map(|v| v.hp)
        .unwrap();
    // Out-of-combat healing is fast; the fighter should be well on the mend.
    assert!(healed > 150.0, "expected hull repair, hp = {healed}");
}

#[test]
fn test_tank_throws_emergency_shield() {
    let mut engine = Engine::new(EngineConfig::default());
    let blue = engine.add_squad(Team::Terran, TargetStrategy::Nearest, SquadStance::Defensive);
    let tank = engine
        .add_ship(blue, ShipClass::Tank, DVec2::new(400.0, 400.0), 1)
        .unwrap();
    let fighter = engine
        .add_ship(blue, ShipClass::Fighter, DVec2::new(450.0, 400.0), 1)
        .unwrap();
    engine.tick();

    // Fighter is nearly dead and the squad is under fire.
    {
        let (vitals, status) = engine
            .world_mut()
            .query_one_mut::<(&mut ShipVitals, &mut CombatStatus)>(fighter)
            .unwrap();
        vitals.hp = 10.0;
        vitals.shield = 0.0;
        status.mark_active();
    }
    let _ = tank;

    engine.tick();
    assert!(engine.buffs().is_active(fighter, BuffId::TakeThePain));
    let shield = engine
        .world()
        .get::<&ShipVitals>(fighter)
        .map(|v| v.shield)
        .unwrap();
    assert!(shield > 0.0, "emergency shield should be up");
}

#[test]
fn test_miner_depletes_asteroid() {
    let mut engine = Engine::new(EngineConfig::default());
    let blue = engine.add_squad(Team::Terran, TargetStrategy::Nearest, SquadStance::Defensive);
    engine
        .add_ship(blue, ShipClass::Miner, DVec2::new(500.0, 500.0), 1)
        .unwrap();
    let asteroid = engine.add_asteroid(DVec2::new(540.0, 500.0), 12.0);

    // Nearly mined out already.
    engine
        .world_mut()
        .query_one_mut::<&mut armada_core::components::Asteroid>(asteroid)
        .unwrap()
        .concentration = 0.5;

    let mut depleted = false;
    for _ in 0..200 {
        let snapshot = engine.tick();
        if snapshot
            .events
            .iter()
            .any(|e| matches!(e, CommEvent::AsteroidDepleted))
        {
            depleted = true;
            break;
        }
    }
    assert!(depleted, "miner should deplete the asteroid");
    assert!(!engine.world().contains(asteroid));
}

// ---- Torpedoes ----

#[test]
fn test_tank_fires_torpedo_volley() {
    let mut engine = Engine::new(EngineConfig::default());
    let blue = engine.add_squad(Team::Terran, TargetStrategy::Nearest, SquadStance::Offensive);
    let red = engine.add_squad(Team::Swarm, TargetStrategy::NoTarget, SquadStance::Offensive);

    let tank = engine
        .add_ship(blue, ShipClass::Tank, DVec2::new(400.0, 500.0), 1)
        .unwrap();
    engine
        .add_ship(red, ShipClass::MegaBug, DVec2::new(580.0, 500.0), 1)
        .unwrap();

    let mut saw_volley = false;
    for _ in 0..1200 {
        let snapshot = engine.tick();
        if snapshot
            .events
            .iter()
            .any(|e| matches!(e, CommEvent::TorpedoVolley { team: Team::Terran, .. }))
        {
            saw_volley = true;
            break;
        }
    }
    assert!(saw_volley, "tank should fire a full torpedo volley");

    // Tubes emptied at release.
    let loaded = engine
        .world()
        .get::<&TorpedoLauncher>(tank)
        .map(|l| l.loaded.len())
        .unwrap();
    assert_eq!(loaded, 0);
}

// ---- Protection stance ----

#[test]
fn test_protect_stance_keeps_squad_near_asset() {
    let mut engine = Engine::new(EngineConfig::default());
    let blue = engine.add_squad(Team::Terran, TargetStrategy::Nearest, SquadStance::Defensive);
    for i in 0..3 {
        engine
            .add_ship(
                blue,
                ShipClass::Fighter,
                DVec2::new(300.0, 300.0 + i as f64 * 50.0),
                1,
            )
            .unwrap();
    }
    let planet = engine.add_planet(DVec2::new(800.0, 600.0), 25.0, (100, 220, 200));
    engine.protect(blue, planet, 150.0).unwrap();

    for _ in 0..4000 {
        engine.tick();
    }

    let centroid = engine.squad(blue).unwrap().centroid;
    let planet_pos = engine
        .world()
        .get::<&armada_core::components::Body>(planet)
        .map(|b| b.position)
        .unwrap();
    assert!(
        centroid.distance(planet_pos) < 400.0,
        "squad should gather near the protected planet, distance = {}",
        centroid.distance(planet_pos)
    );
}

// ---- Snapshot ----

#[test]
fn test_snapshot_serde_roundtrip() {
    let mut engine = two_squad_engine(5, TargetStrategy::Threat);
    let snapshot = engine.tick();

    let json = serde_json::to_string(&snapshot).unwrap();
    let back: armada_core::state::FrameSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(snapshot, back);
}

#[test]
fn test_snapshot_reflects_world() {
    let mut engine = two_squad_engine(5, TargetStrategy::Nearest);
    let snapshot = engine.tick();

    assert_eq!(snapshot.ships.len(), 7);
    assert_eq!(snapshot.squads.len(), 2);
    assert!(!snapshot.draw_ops.is_empty());
    assert_eq!(snapshot.time.tick, 0);

    let second = engine.tick();
    assert_eq!(second.time.tick, 1);
}
