//! Buff catalog — named, possibly time-limited stat modifiers.
//!
//! The catalog is static configuration; the sim crate's buff manager owns
//! the per-ship active instances and their timers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::TICK_RATE;
use crate::enums::BuffId;
use crate::error::CatalogError;
use crate::types::Rgb;

/// A single stat delta carried by a buff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", content = "value")]
pub enum BuffEffect {
    /// Multiply laser range.
    LaserRangeMultiplier(f64),
    /// Multiply maximum hull.
    HpMultiplier(f64),
    /// Multiply incoming damage (< 1.0 = protection).
    IncomingDamageMultiplier(f64),
    /// Flat shield bump, clamped to the shield maximum.
    ShieldBonus(f64),
    /// Flat burst heal (hull first, spill to shield).
    Heal(f64),
}

/// Definition of a named buff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuffSpec {
    pub effects: Vec<BuffEffect>,
    /// Lifetime in ticks; `None` = permanent / until cleared.
    pub duration_ticks: Option<u64>,
    /// Whether the renderer shows an indicator ring for this buff.
    pub display: bool,
    /// Indicator color when displayed.
    pub color: Rgb,
}

/// Immutable buff-id → spec table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuffCatalog {
    specs: HashMap<BuffId, BuffSpec>,
}

impl BuffCatalog {
    /// Build a catalog from externally loaded specs.
    pub fn from_specs(specs: HashMap<BuffId, BuffSpec>) -> Self {
        Self { specs }
    }

    /// Look up the spec for a buff.
    pub fn spec(&self, buff: BuffId) -> Result<&BuffSpec, CatalogError> {
        self.specs.get(&buff).ok_or(CatalogError::UnknownBuff(buff))
    }

    /// The built-in buff table.
    pub fn standard() -> Self {
        let secs = |s: f64| Some((s * TICK_RATE as f64) as u64);
        let mut specs = HashMap::new();

        specs.insert(
            BuffId::Protection,
            BuffSpec {
                effects: vec![BuffEffect::IncomingDamageMultiplier(0.9)],
                duration_ticks: None,
                display: false,
                color: (0, 0, 0),
            },
        );
        specs.insert(
            BuffId::TakeThePain,
            BuffSpec {
                effects: vec![BuffEffect::ShieldBonus(800.0)],
                duration_ticks: None,
                display: true,
                color: (60, 60, 200),
            },
        );
        specs.insert(
            BuffId::Fortitude,
            BuffSpec {
                effects: vec![BuffEffect::HpMultiplier(1.2)],
                duration_ticks: None,
                display: false,
                color: (0, 0, 0),
            },
        );
        specs.insert(
            BuffId::Salvation,
            BuffSpec {
                effects: vec![BuffEffect::Heal(500.0)],
                duration_ticks: secs(5.0),
                display: false,
                color: (0, 0, 0),
            },
        );
        specs.insert(
            BuffId::FirstStrike,
            BuffSpec {
                effects: vec![BuffEffect::LaserRangeMultiplier(2.0)],
                duration_ticks: secs(5.0),
                display: true,
                color: (180, 60, 200),
            },
        );

        Self { specs }
    }
}

impl Default for BuffCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
