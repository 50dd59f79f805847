//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Team affiliation. Adversary lists are "every ship not on my team".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// Player-aligned forces.
    #[default]
    Terran,
    /// Hostile raiders.
    Pirate,
    /// The bug swarm.
    Swarm,
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Terran => write!(f, "terran"),
            Self::Pirate => write!(f, "pirate"),
            Self::Swarm => write!(f, "swarm"),
        }
    }
}

/// Ship class — the key into the ship catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipClass {
    /// Line combatant with a torpedo-less laser loadout.
    Fighter,
    /// Heavy bruiser: soaks damage, dumps emergency shields on teammates.
    Tank,
    /// Support ship that chases and repairs the lowest-health teammate.
    Healer,
    /// Resource ship that works the closest asteroid field.
    Miner,
    /// Small escort with cautious, stand-off combat behavior.
    Drone,
    /// Stationary-ish anchor with long-range lasers and a big torpedo rack.
    Starbase,
    /// Tiny fast swarm melee unit.
    Zergling,
    /// Mid-weight swarm ranged unit.
    Spitter,
    /// Aggressive line combatant that never disengages.
    Berserker,
    /// Swarm boss unit.
    MegaBug,
}

impl ShipClass {
    /// All classes, in catalog order.
    pub const ALL: [ShipClass; 10] = [
        ShipClass::Fighter,
        ShipClass::Tank,
        ShipClass::Healer,
        ShipClass::Miner,
        ShipClass::Drone,
        ShipClass::Starbase,
        ShipClass::Zergling,
        ShipClass::Spitter,
        ShipClass::Berserker,
        ShipClass::MegaBug,
    ];
}

impl fmt::Display for ShipClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fighter => "fighter",
            Self::Tank => "tank",
            Self::Healer => "healer",
            Self::Miner => "miner",
            Self::Drone => "drone",
            Self::Starbase => "starbase",
            Self::Zergling => "zergling",
            Self::Spitter => "spitter",
            Self::Berserker => "berserker",
            Self::MegaBug => "mega_bug",
        };
        write!(f, "{name}")
    }
}

/// Squad-level target selection strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetStrategy {
    /// Closest adversary to the squad centroid.
    #[default]
    Nearest,
    /// Adversary with the lowest current hp + shield.
    LowHealth,
    /// Highest threat rating blended with inverse distance.
    Threat,
    /// No squad-wide pick; each ship keeps a sticky random target.
    Random,
    /// Squad does not engage on its own.
    NoTarget,
}

/// Squad positioning stance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SquadStance {
    /// Group up around the squad centroid.
    #[default]
    Defensive,
    /// No grouping force; ships roam to their targets.
    Offensive,
    /// Group up and escort the protection asset.
    Protect,
}

/// Behavior role for a ship — replaces per-class update overrides with a
/// single dispatch point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipRole {
    /// Standard targeting + avoidance combat loop.
    #[default]
    Combat,
    /// Chases the lowest-health teammate and repairs it.
    Healer,
    /// Works the protection asset / nearest asteroid.
    Miner,
    /// Combat loop plus emergency shield dumps on critical teammates.
    Tank,
}

/// Outbound event channel, consumed by an external audio/HUD layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    /// Voice lines ("squad engaged", "hull critical", ...).
    Announcements,
    /// Sound effects (torpedo volleys, explosions, buffs).
    Sounds,
    /// HUD text.
    Display,
}

/// Buff identifier — the key into the buff catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuffId {
    /// Permanent incoming-damage reduction.
    Protection,
    /// Emergency flat shield dump (the tank's panic button).
    TakeThePain,
    /// Permanent hull multiplier.
    Fortitude,
    /// Timed burst heal.
    Salvation,
    /// Timed laser-range doubling.
    FirstStrike,
}
