//! Target selection strategies.
//!
//! Squad-level main-target selection and per-ship secondary targeting.
//! Both operate on candidate slices prepared by the caller; an empty slice
//! is an ordinary no-target condition, never an error.
//!
//! Candidates are generic over the id type so the engine can pass its
//! entity handles straight through.

use rand::seq::SliceRandom;
use rand::Rng;

use armada_core::constants::THREAT_DISTANCE_BASELINE;
use armada_core::enums::TargetStrategy;

/// A targeting candidate: one adversary ship and the metrics the
/// strategies discriminate on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<Id> {
    pub id: Id,
    /// Current hp + shield.
    pub health: f64,
    /// Distance from the asking squad's centroid.
    pub distance_from_squad: f64,
    /// Distance from the asking ship (used by secondary targeting).
    pub distance_from_ship: f64,
    /// Catalog threat rating.
    pub threat: f64,
}

/// Threat score: raw threat rating blended with inverse distance.
///
/// The baseline keeps the score finite at zero range; the blend (not threat
/// alone) is the tie-break rule — of two equal-threat adversaries, the
/// closer one wins.
fn threat_score<Id>(candidate: &Candidate<Id>) -> f64 {
    candidate.threat / (candidate.distance_from_squad + THREAT_DISTANCE_BASELINE)
}

/// Select the squad-wide main target.
///
/// `Random` and `NoTarget` never produce a squad-level pick; each ship
/// resolves independently through [`select_secondary_target`].
pub fn select_main_target<Id: Copy>(
    strategy: TargetStrategy,
    candidates: &[Candidate<Id>],
) -> Option<Id> {
    match strategy {
        TargetStrategy::Nearest => candidates
            .iter()
            .min_by(|a, b| a.distance_from_squad.total_cmp(&b.distance_from_squad))
            .map(|c| c.id),
        TargetStrategy::LowHealth => candidates
            .iter()
            .min_by(|a, b| a.health.total_cmp(&b.health))
            .map(|c| c.id),
        TargetStrategy::Threat => candidates
            .iter()
            .max_by(|a, b| threat_score(a).total_cmp(&threat_score(b)))
            .map(|c| c.id),
        TargetStrategy::Random | TargetStrategy::NoTarget => None,
    }
}

/// Select a per-ship fallback target.
///
/// `sticky` is the ship's cached previous pick; it is kept as long as it is
/// still among the candidates (preventing target flicker between
/// similar-health adversaries) and replaced otherwise. The caller stores
/// the returned id back into its sticky cache.
///
/// Note the deliberate metric change from the squad-level pick: `Nearest`
/// and `Threat` fall back to the adversary nearest *this ship*, not the
/// squad centroid.
pub fn select_secondary_target<Id, R>(
    strategy: TargetStrategy,
    candidates: &[Candidate<Id>],
    sticky: Option<Id>,
    rng: &mut R,
) -> Option<Id>
where
    Id: Copy + PartialEq,
    R: Rng,
{
    if candidates.is_empty() {
        return None;
    }

    match strategy {
        TargetStrategy::LowHealth => {
            sticky_pick(candidates, sticky, rng, |candidates, rng| {
                // Spread secondary fire over the 2nd..4th lowest-health
                // adversaries; the lowest is the squad's main pick.
                let mut by_health: Vec<&Candidate<Id>> = candidates.iter().collect();
                by_health.sort_by(|a, b| a.health.total_cmp(&b.health));
                let pool: Vec<Id> = by_health
                    .iter()
                    .skip(1)
                    .take(3)
                    .map(|c| c.id)
                    .collect();
                if pool.is_empty() {
                    candidates.choose(rng).map(|c| c.id)
                } else {
                    pool.choose(rng).copied()
                }
            })
        }
        TargetStrategy::Nearest | TargetStrategy::Threat => candidates
            .iter()
            .min_by(|a, b| a.distance_from_ship.total_cmp(&b.distance_from_ship))
            .map(|c| c.id),
        TargetStrategy::Random => sticky_pick(candidates, sticky, rng, |candidates, rng| {
            candidates.choose(rng).map(|c| c.id)
        }),
        TargetStrategy::NoTarget => None,
    }
}

/// Keep the sticky pick while it remains a live candidate; otherwise draw a
/// fresh one with `pick`.
fn sticky_pick<Id, R, F>(
    candidates: &[Candidate<Id>],
    sticky: Option<Id>,
    rng: &mut R,
    pick: F,
) -> Option<Id>
where
    Id: Copy + PartialEq,
    R: Rng,
    F: Fn(&[Candidate<Id>], &mut R) -> Option<Id>,
{
    if let Some(current) = sticky {
        if candidates.iter().any(|c| c.id == current) {
            return Some(current);
        }
    }
    pick(candidates, rng)
}
