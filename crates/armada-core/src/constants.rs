//! Simulation constants and tuning parameters.
//!
//! The force falloff and cohesion numbers are tuning, not invariants; they
//! are centralized here so scenarios can be rebalanced in one place.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

// --- Arena ---

/// Arena width in world units.
pub const ARENA_WIDTH: f64 = 1600.0;

/// Arena height in world units.
pub const ARENA_HEIGHT: f64 = 1000.0;

/// Inset from the arena edge that ships are clamped to.
pub const ARENA_PAD: f64 = 150.0;

// --- Forces ---

/// Numerator of the inverse-square repulsion falloff.
pub const REPULSION_SCALE: f64 = 1000.0;

/// Excess distance beyond which attraction stops growing.
pub const ATTRACTION_MAX_EXCESS: f64 = 500.0;

/// Attraction force per unit of excess distance.
pub const ATTRACTION_SLOPE: f64 = 0.01;

/// Minimum attraction force once outside the rest range.
pub const ATTRACTION_FLOOR: f64 = 1.0;

/// Distance below which two entities count as coincident.
pub const COINCIDENT_EPSILON: f64 = 1e-3;

/// Half-width of the random jitter applied to break up coincident pairs.
pub const COINCIDENT_JITTER: f64 = 50.0;

/// Default force damping factor (fraction of force carried to the next tick).
pub const DEFAULT_FORCE_DAMP: f64 = 0.99;

// --- Squad behavior ---

/// Cohesion radius for a squad with zero members.
pub const COHESION_BASE_RADIUS: f64 = 60.0;

/// Cohesion radius growth per squad member.
pub const COHESION_PER_MEMBER: f64 = 20.0;

/// Fraction of the cohesion radius below which ships push back out.
pub const COHESION_INNER_FRACTION: f64 = 0.3;

/// Scale applied to the centroid-attraction delta.
pub const COHESION_GAIN: f64 = 0.05;

/// Default stand-off distance from a protection asset.
pub const DEFAULT_PROTECTION_DISTANCE: f64 = 150.0;

/// Ticks of zero combat activity before a ship drops out of combat.
pub const COMBAT_DEBOUNCE_TICKS: u32 = 100;

/// Distance baseline added to the threat denominator so threat scoring has
/// no singularity at zero range.
pub const THREAT_DISTANCE_BASELINE: f64 = 10.0;

/// Attack attraction rests at laser_range / this factor, so ships orbit
/// comfortably inside their own weapon envelope.
pub const ATTACK_RANGE_FACTOR: f64 = 1.5;

// --- Health bands ---

/// Below this health fraction a ship reports "low health".
pub const LOW_HEALTH_THRESHOLD: f64 = 0.5;

/// Below this health fraction a ship reports "critical".
pub const CRITICAL_HEALTH_THRESHOLD: f64 = 0.2;

/// Teammate health fraction that triggers the tank's shield dump.
pub const SHIELD_DUMP_THRESHOLD: f64 = 0.1;

// --- Weapons ---

/// Capacitor cost per laser shot.
pub const LASER_CAP_COST: f64 = 0.05;

/// Ticks a drained laser takes to recharge before it can fire again.
pub const LASER_FULL_CHARGE_TICKS: u32 = 400;

/// Healers stop repairing above this health fraction.
pub const HEAL_CUTOFF: f64 = 0.95;

/// Heal-rate multiplier while the squad is out of combat.
pub const OUT_OF_COMBAT_HEAL_MULTIPLIER: f64 = 10.0;

/// Minerals extracted per tick by a mining laser.
pub const MINING_RATE: f64 = 0.05;

// --- Torpedoes ---

/// Maximum firing range for a torpedo volley.
pub const TORP_RANGE: f64 = 250.0;

/// Ticks between tube reloads.
pub const TORP_RELOAD_TICKS: u64 = 6;

/// Capacitor floor below which tubes will not reload.
pub const TORP_MIN_CAPACITOR: f64 = 1.0;

/// Ticks after release before guidance engages.
pub const TORP_GUIDANCE_DELAY_TICKS: u32 = 50;

/// Ticks after release before an un-detonated torpedo expires.
pub const TORP_EXPIRE_TICKS: u32 = 300;

/// Torpedo damage per launcher level.
pub const TORP_DAMAGE_PER_LEVEL: f64 = 10.0;

/// Torpedo mass.
pub const TORP_MASS: f64 = 10.0;

/// Scale of the outward impulse applied at volley release.
pub const TORP_LAUNCH_IMPULSE: f64 = 0.1;

// --- Spawning ---

/// Minimum spacing enforced between ships at setup.
pub const SPAWN_MIN_SPACING: f64 = 20.0;

/// Minimum spacing enforced between planets at setup.
pub const PLANET_MIN_SPACING: f64 = 350.0;

/// Relaxation iterations used when spacing out spawned bodies.
pub const SPACING_ITERATIONS: u32 = 50;
