//! Force utilities — the simulation's sole physics primitives.
//!
//! Every higher-level movement behavior (attack runs, avoidance, cohesion,
//! escort, torpedo guidance) is a weighted sum of these two-body
//! attraction/repulsion calls. All functions are pure; the movement system
//! owns the actual integration.

use glam::DVec2;
use rand::Rng;

use armada_core::constants::{
    ATTRACTION_FLOOR, ATTRACTION_MAX_EXCESS, ATTRACTION_SLOPE, COINCIDENT_EPSILON,
    COINCIDENT_JITTER, REPULSION_SCALE,
};

/// Euclidean distance between two points.
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    a.distance(b)
}

/// Unit vector from `a` toward `b`, or zero when the points coincide.
pub fn direction(a: DVec2, b: DVec2) -> DVec2 {
    (b - a).normalize_or_zero()
}

/// Two-body repulsion. Returns `(force_on_a, force_on_b)`.
///
/// Zero once the pair is at or beyond `rest_distance` (defaulting to the
/// sum of the collision radii); inside it, an inverse-square push apart,
/// symmetric and opposite. Coincident pairs produce zero force — callers
/// break those up with [`resolve_coincident`] before force passes run.
pub fn repulsion(
    a: DVec2,
    a_radius: f64,
    b: DVec2,
    b_radius: f64,
    rest_distance: Option<f64>,
) -> (DVec2, DVec2) {
    let rest = rest_distance.unwrap_or(a_radius + b_radius);
    let d = a.distance(b);
    if d <= COINCIDENT_EPSILON || d >= rest {
        return (DVec2::ZERO, DVec2::ZERO);
    }

    let factor = REPULSION_SCALE / (d * d);
    let toward_b = direction(a, b);
    let on_a = -toward_b * factor;
    (on_a, -on_a)
}

/// Ship–ship repulsion weighted by the *other* body's share of the pair's
/// mass, so heavier ships push lighter ones more than the reverse.
#[allow(clippy::too_many_arguments)]
pub fn repulsion_mass_weighted(
    a: DVec2,
    a_radius: f64,
    a_mass: f64,
    b: DVec2,
    b_radius: f64,
    b_mass: f64,
    rest_distance: Option<f64>,
) -> (DVec2, DVec2) {
    let (on_a, on_b) = repulsion(a, a_radius, b, b_radius, rest_distance);
    let total = a_mass + b_mass;
    (
        on_a * (2.0 * b_mass / total),
        on_b * (2.0 * a_mass / total),
    )
}

/// Two-body attraction that rests inside `within_range`.
/// Returns `(force_on_a, force_on_b)`.
///
/// Zero while the pair is closer than `within_range`; outside it, the pull
/// grows with the excess distance up to a cap, with a small floor so ships
/// settle into an orbit just outside the range boundary instead of snapping
/// onto it.
pub fn attraction(a: DVec2, b: DVec2, within_range: f64) -> (DVec2, DVec2) {
    let d = a.distance(b);
    if d < within_range {
        return (DVec2::ZERO, DVec2::ZERO);
    }

    let excess = (d - within_range).min(ATTRACTION_MAX_EXCESS);
    let factor = (excess * ATTRACTION_SLOPE).max(ATTRACTION_FLOOR);
    let toward_b = direction(a, b);
    let on_a = toward_b * factor;
    (on_a, -on_a)
}

/// Unit-strength chase force from `a` toward `b` (torpedo guidance).
pub fn pursuit(a: DVec2, b: DVec2) -> DVec2 {
    direction(a, b)
}

/// Displacement for one tick of integration: force / mass, with each axis
/// clamped to the speed limit when one is set.
pub fn displacement(force: DVec2, mass: f64, limit: Option<f64>) -> DVec2 {
    let mut d = force / mass;
    if let Some(limit) = limit {
        d.x = d.x.clamp(-limit, limit);
        d.y = d.y.clamp(-limit, limit);
    }
    d
}

/// Jitter apart any near-coincident positions so later direction
/// normalization never sees a zero-length vector.
pub fn resolve_coincident<R: Rng>(positions: &mut [DVec2], rng: &mut R) {
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            if positions[i].distance(positions[j]) < COINCIDENT_EPSILON {
                positions[i] += DVec2::new(
                    rng.gen_range(-COINCIDENT_JITTER..COINCIDENT_JITTER),
                    rng.gen_range(-COINCIDENT_JITTER..COINCIDENT_JITTER),
                );
            }
        }
    }
}
