//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// RGB color triple used by draw primitives and ship liveries.
pub type Rgb = (u8, u8, u8);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        1.0 / crate::constants::TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Stable identifier for a squad.
///
/// Squads live outside the ECS world (they own rosters of entities, not
/// component data), so they get their own id space.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SquadId(pub u32);

/// Rectangular arena the battle takes place in.
///
/// Ship positions are hard-clamped to the rectangle inset by `pad` after
/// force integration each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
    pub pad: f64,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: crate::constants::ARENA_WIDTH,
            height: crate::constants::ARENA_HEIGHT,
            pad: crate::constants::ARENA_PAD,
        }
    }
}

impl Arena {
    /// Clamp a position to the padded interior of the arena.
    pub fn clamp(&self, pos: DVec2) -> DVec2 {
        DVec2::new(
            pos.x.clamp(self.pad, self.width - self.pad),
            pos.y.clamp(self.pad, self.height - self.pad),
        )
    }

    /// Center of the arena.
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }
}
