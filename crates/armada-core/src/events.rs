//! Outbound events and draw primitives.
//!
//! The simulation core never renders or plays audio itself; it emits
//! renderer-agnostic draw primitives and channel-tagged comm events that an
//! exterior layer consumes. The core never blocks on their delivery.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::{BuffId, Channel, ShipClass, Team};
use crate::types::{Rgb, SquadId};

/// Comm events for the exterior audio/HUD layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CommEvent {
    /// A squad entered combat. Emitted once per transition, not per tick.
    SquadEngaged { squad: SquadId, team: Team },
    /// A squad's last ship dropped out of combat (after the debounce).
    SquadDisengaged { squad: SquadId, team: Team },
    /// A ship dropped below the low-health band.
    ShipLowHealth { class: ShipClass, team: Team },
    /// A ship dropped below the critical-health band.
    ShipCriticalHealth { class: ShipClass, team: Team },
    /// A ship was destroyed (emitted by the squad's pre-removal sweep).
    ShipDestroyed { class: ShipClass, team: Team },
    /// A torpedo volley left its tubes.
    TorpedoVolley { team: Team, count: u32 },
    /// A buff was applied to a ship.
    BuffApplied { buff: BuffId },
    /// An asteroid was mined out.
    AsteroidDepleted,
}

impl CommEvent {
    /// The channel this event is posted to.
    pub fn channel(&self) -> Channel {
        match self {
            Self::SquadEngaged { .. }
            | Self::SquadDisengaged { .. }
            | Self::ShipLowHealth { .. }
            | Self::ShipCriticalHealth { .. }
            | Self::ShipDestroyed { .. } => Channel::Announcements,
            Self::TorpedoVolley { .. } | Self::BuffApplied { .. } | Self::AsteroidDepleted => {
                Channel::Sounds
            }
        }
    }
}

/// A renderer-agnostic draw primitive in world coordinates.
///
/// `width = 0` means filled, matching the usual immediate-mode convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum DrawOp {
    Circle {
        color: Rgb,
        center: DVec2,
        radius: f64,
        width: u32,
    },
    Line {
        color: Rgb,
        start: DVec2,
        end: DVec2,
        width: u32,
    },
}
