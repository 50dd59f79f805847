#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use armada_core::enums::{ShipClass, ShipRole, TargetStrategy};

    use crate::profiles::profile_for;
    use crate::strategy::{select_main_target, select_secondary_target, Candidate};

    fn candidate(id: u32, health: f64, dist_squad: f64, dist_ship: f64, threat: f64) -> Candidate<u32> {
        Candidate {
            id,
            health,
            distance_from_squad: dist_squad,
            distance_from_ship: dist_ship,
            threat,
        }
    }

    // ---- Main target selection ----

    #[test]
    fn test_low_health_picks_weakest() {
        let candidates = vec![
            candidate(1, 50.0, 100.0, 100.0, 10.0),
            candidate(2, 10.0, 200.0, 200.0, 10.0),
            candidate(3, 80.0, 50.0, 50.0, 10.0),
        ];
        let target = select_main_target(TargetStrategy::LowHealth, &candidates);
        assert_eq!(target, Some(2));
    }

    #[test]
    fn test_nearest_picks_closest_to_centroid() {
        let candidates = vec![
            candidate(1, 50.0, 300.0, 10.0, 10.0),
            candidate(2, 50.0, 120.0, 500.0, 10.0),
        ];
        let target = select_main_target(TargetStrategy::Nearest, &candidates);
        assert_eq!(target, Some(2));
    }

    #[test]
    fn test_threat_prefers_closer_of_equal_threat() {
        // Equal threat ratings; the inverse-distance blend breaks the tie
        // toward the closer adversary.
        let candidates = vec![
            candidate(1, 100.0, 400.0, 400.0, 200.0),
            candidate(2, 100.0, 80.0, 80.0, 200.0),
        ];
        let target = select_main_target(TargetStrategy::Threat, &candidates);
        assert_eq!(target, Some(2));
    }

    #[test]
    fn test_threat_rating_dominates_at_equal_distance() {
        let candidates = vec![
            candidate(1, 100.0, 100.0, 100.0, 20.0),
            candidate(2, 100.0, 100.0, 100.0, 400.0),
        ];
        let target = select_main_target(TargetStrategy::Threat, &candidates);
        assert_eq!(target, Some(2));
    }

    #[test]
    fn test_random_and_no_target_have_no_squad_pick() {
        let candidates = vec![candidate(1, 50.0, 100.0, 100.0, 10.0)];
        assert_eq!(select_main_target(TargetStrategy::Random, &candidates), None);
        assert_eq!(
            select_main_target(TargetStrategy::NoTarget, &candidates),
            None
        );
    }

    #[test]
    fn test_empty_candidates_never_panic() {
        let empty: Vec<Candidate<u32>> = Vec::new();
        let strategies = [
            TargetStrategy::Nearest,
            TargetStrategy::LowHealth,
            TargetStrategy::Threat,
            TargetStrategy::Random,
            TargetStrategy::NoTarget,
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for strategy in strategies {
            assert_eq!(select_main_target(strategy, &empty), None);
            assert_eq!(
                select_secondary_target(strategy, &empty, None, &mut rng),
                None
            );
        }
    }

    // ---- Secondary target selection ----

    #[test]
    fn test_secondary_nearest_uses_ship_distance() {
        // Candidate 1 is nearest the centroid, candidate 2 nearest the ship.
        let candidates = vec![
            candidate(1, 50.0, 10.0, 400.0, 10.0),
            candidate(2, 50.0, 300.0, 20.0, 10.0),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let target =
            select_secondary_target(TargetStrategy::Nearest, &candidates, None, &mut rng);
        assert_eq!(target, Some(2));
    }

    #[test]
    fn test_sticky_target_is_stable_while_alive() {
        let candidates = vec![
            candidate(1, 50.0, 100.0, 100.0, 10.0),
            candidate(2, 60.0, 100.0, 100.0, 10.0),
            candidate(3, 70.0, 100.0, 100.0, 10.0),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let first =
            select_secondary_target(TargetStrategy::Random, &candidates, None, &mut rng);
        assert!(first.is_some());

        // The cached pick survives repeated queries.
        for _ in 0..20 {
            let again =
                select_secondary_target(TargetStrategy::Random, &candidates, first, &mut rng);
            assert_eq!(again, first);
        }
    }

    #[test]
    fn test_sticky_target_refreshes_when_gone() {
        let mut candidates = vec![
            candidate(1, 50.0, 100.0, 100.0, 10.0),
            candidate(2, 60.0, 100.0, 100.0, 10.0),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let sticky = Some(1);
        // Candidate 1 dies; the cache must re-resolve to a live adversary.
        candidates.retain(|c| c.id != 1);
        let next =
            select_secondary_target(TargetStrategy::Random, &candidates, sticky, &mut rng);
        assert_eq!(next, Some(2));
    }

    #[test]
    fn test_secondary_low_health_skips_main_pick() {
        let candidates = vec![
            candidate(1, 10.0, 100.0, 100.0, 10.0),
            candidate(2, 20.0, 100.0, 100.0, 10.0),
            candidate(3, 30.0, 100.0, 100.0, 10.0),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..20 {
            let target =
                select_secondary_target(TargetStrategy::LowHealth, &candidates, None, &mut rng);
            // Never the lowest-health ship (id 1) — that's the squad's pick.
            assert!(matches!(target, Some(2) | Some(3)));
        }
    }

    #[test]
    fn test_secondary_low_health_single_candidate_falls_back() {
        let candidates = vec![candidate(1, 10.0, 100.0, 100.0, 10.0)];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let target =
            select_secondary_target(TargetStrategy::LowHealth, &candidates, None, &mut rng);
        assert_eq!(target, Some(1));
    }

    // ---- Behavior profiles ----

    #[test]
    fn test_tank_profile() {
        let profile = profile_for(ShipClass::Tank);
        assert_eq!(profile.role, ShipRole::Tank);
        assert_eq!(profile.avoidance, 0.0);
        assert!((profile.incoming_damage_modifier - 0.75).abs() < 1e-12);
        assert!((profile.collision_radius_factor - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_zergling_profile() {
        let profile = profile_for(ShipClass::Zergling);
        assert!((profile.incoming_damage_modifier - 0.5).abs() < 1e-12);
        assert_eq!(profile.force_damp, Some(0.998));
        assert_eq!(profile.avoidance, 0.0);
    }

    #[test]
    fn test_support_roles() {
        assert_eq!(profile_for(ShipClass::Healer).role, ShipRole::Healer);
        assert_eq!(profile_for(ShipClass::Miner).role, ShipRole::Miner);
        assert_eq!(profile_for(ShipClass::Fighter).role, ShipRole::Combat);
    }

    #[test]
    fn test_drone_is_cautious() {
        let profile = profile_for(ShipClass::Drone);
        assert!(profile.aggressiveness < 1.0);
        assert!(profile.avoidance > 1.0);
    }
}
