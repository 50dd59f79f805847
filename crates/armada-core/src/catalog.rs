//! Ship catalog — the static type → spec table.
//!
//! Catalogs are explicit immutable configuration: built once at startup
//! (either the built-in [`ShipCatalog::standard`] table or an externally
//! loaded one via [`ShipCatalog::from_specs`]) and passed by reference into
//! the engine. Lookups against a user-supplied table fail fast at ship
//! construction time; nothing re-validates per tick.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::enums::ShipClass;
use crate::error::CatalogError;
use crate::types::Rgb;

/// Immutable per-class stat block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipSpec {
    pub color: Rgb,
    pub mass: f64,
    pub speed: f64,
    pub radius: f64,
    pub hp: f64,
    pub shield: f64,
    pub laser_range: f64,
    pub laser_damage: f64,
    pub laser_width: u32,
    pub capacitor: f64,
    pub ship_width: u32,
    pub shield_width: u32,
    pub shield_recharge: f64,
    pub hull_recharge: f64,
    pub cap_recharge: f64,
    pub keep_range: f64,
    pub threat: f64,
    /// Torpedo tubes mounted on this class (0 = no launcher).
    pub torpedo_tubes: u32,
}

/// Validated, immutable ship-class → spec table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipCatalog {
    specs: HashMap<ShipClass, ShipSpec>,
}

impl ShipCatalog {
    /// Build a catalog from externally loaded specs, validating each entry.
    pub fn from_specs(specs: HashMap<ShipClass, ShipSpec>) -> Result<Self, CatalogError> {
        for (class, spec) in &specs {
            validate_spec(*class, spec)?;
        }
        Ok(Self { specs })
    }

    /// Look up the spec for a class.
    pub fn spec(&self, class: ShipClass) -> Result<&ShipSpec, CatalogError> {
        self.specs
            .get(&class)
            .ok_or(CatalogError::UnknownShipClass(class))
    }

    /// Number of classes in the catalog.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// True when the catalog carries no classes.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// The built-in stat table.
    pub fn standard() -> Self {
        let mut specs = HashMap::new();

        specs.insert(
            ShipClass::Fighter,
            ShipSpec {
                color: (180, 60, 200),
                mass: 400.0,
                speed: 0.2,
                radius: 16.0,
                hp: 200.0,
                shield: 150.0,
                laser_range: 160.0,
                laser_damage: 0.25,
                laser_width: 4,
                capacitor: 30.0,
                ship_width: 5,
                shield_width: 2,
                shield_recharge: 0.005,
                hull_recharge: 0.005,
                cap_recharge: 0.05,
                keep_range: 140.0,
                threat: 50.0,
                torpedo_tubes: 0,
            },
        );
        specs.insert(
            ShipClass::Tank,
            ShipSpec {
                color: (100, 100, 220),
                mass: 600.0,
                speed: 0.3,
                radius: 20.0,
                hp: 300.0,
                shield: 500.0,
                laser_range: 100.0,
                laser_damage: 0.1,
                laser_width: 5,
                capacitor: 100.0,
                ship_width: 6,
                shield_width: 2,
                shield_recharge: 0.05,
                hull_recharge: 0.05,
                cap_recharge: 0.025,
                keep_range: 0.0,
                threat: 200.0,
                torpedo_tubes: 8,
            },
        );
        specs.insert(
            ShipClass::Healer,
            ShipSpec {
                color: (100, 200, 100),
                mass: 300.0,
                speed: 0.25,
                radius: 14.0,
                hp: 150.0,
                shield: 100.0,
                laser_range: 140.0,
                laser_damage: 0.2,
                laser_width: 4,
                capacitor: 20.0,
                ship_width: 5,
                shield_width: 2,
                shield_recharge: 0.0025,
                hull_recharge: 0.0025,
                cap_recharge: 0.05,
                keep_range: 300.0,
                threat: 100.0,
                torpedo_tubes: 0,
            },
        );
        specs.insert(
            ShipClass::Miner,
            ShipSpec {
                color: (180, 160, 60),
                mass: 500.0,
                speed: 0.25,
                radius: 12.0,
                hp: 200.0,
                shield: 150.0,
                laser_range: 100.0,
                laser_damage: 0.15,
                laser_width: 8,
                capacitor: 30.0,
                ship_width: 5,
                shield_width: 2,
                shield_recharge: 0.005,
                hull_recharge: 0.005,
                cap_recharge: 0.05,
                keep_range: 400.0,
                threat: 30.0,
                torpedo_tubes: 0,
            },
        );
        specs.insert(
            ShipClass::Drone,
            ShipSpec {
                color: (180, 200, 100),
                mass: 150.0,
                speed: 0.6,
                radius: 7.0,
                hp: 60.0,
                shield: 40.0,
                laser_range: 80.0,
                laser_damage: 0.25,
                laser_width: 2,
                capacitor: 10.0,
                ship_width: 3,
                shield_width: 1,
                // Drones can't be healed, so nanobot repairs
                shield_recharge: 0.1,
                hull_recharge: 0.1,
                cap_recharge: 0.05,
                keep_range: 60.0,
                threat: 20.0,
                torpedo_tubes: 0,
            },
        );
        specs.insert(
            ShipClass::Starbase,
            ShipSpec {
                color: (100, 100, 200),
                mass: 2000.0,
                speed: 0.05,
                radius: 20.0,
                hp: 800.0,
                shield: 500.0,
                laser_range: 250.0,
                laser_damage: 0.7,
                laser_width: 7,
                capacitor: 100.0,
                ship_width: 7,
                shield_width: 3,
                shield_recharge: 0.05,
                hull_recharge: 0.05,
                cap_recharge: 0.05,
                keep_range: 200.0,
                threat: 400.0,
                torpedo_tubes: 20,
            },
        );
        specs.insert(
            ShipClass::Zergling,
            ShipSpec {
                color: (180, 130, 80),
                mass: 20.0,
                speed: 0.7,
                radius: 6.0,
                hp: 50.0,
                shield: 30.0,
                laser_range: 60.0,
                laser_damage: 0.03,
                laser_width: 2,
                capacitor: 10.0,
                ship_width: 2,
                shield_width: 1,
                shield_recharge: 0.001,
                hull_recharge: 0.001,
                cap_recharge: 0.05,
                keep_range: 20.0,
                threat: 20.0,
                torpedo_tubes: 0,
            },
        );
        specs.insert(
            ShipClass::Spitter,
            ShipSpec {
                color: (180, 100, 80),
                mass: 300.0,
                speed: 0.25,
                radius: 14.0,
                hp: 150.0,
                shield: 100.0,
                laser_range: 140.0,
                laser_damage: 0.15,
                laser_width: 4,
                capacitor: 20.0,
                ship_width: 5,
                shield_width: 2,
                shield_recharge: 0.0025,
                hull_recharge: 0.0025,
                cap_recharge: 0.05,
                keep_range: 100.0,
                threat: 80.0,
                torpedo_tubes: 0,
            },
        );
        specs.insert(
            ShipClass::Berserker,
            ShipSpec {
                color: (160, 60, 60),
                mass: 400.0,
                speed: 0.2,
                radius: 16.0,
                hp: 200.0,
                shield: 150.0,
                laser_range: 160.0,
                laser_damage: 0.25,
                laser_width: 4,
                capacitor: 30.0,
                ship_width: 5,
                shield_width: 2,
                shield_recharge: 0.005,
                hull_recharge: 0.005,
                cap_recharge: 0.05,
                keep_range: 100.0,
                threat: 50.0,
                torpedo_tubes: 0,
            },
        );
        specs.insert(
            ShipClass::MegaBug,
            ShipSpec {
                color: (140, 60, 80),
                mass: 800.0,
                speed: 1.0,
                radius: 20.0,
                hp: 800.0,
                shield: 500.0,
                laser_range: 120.0,
                laser_damage: 0.35,
                laser_width: 5,
                capacitor: 100.0,
                ship_width: 7,
                shield_width: 2,
                shield_recharge: 0.005,
                hull_recharge: 0.005,
                cap_recharge: 0.05,
                keep_range: 100.0,
                threat: 400.0,
                torpedo_tubes: 0,
            },
        );

        Self { specs }
    }
}

impl Default for ShipCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn validate_spec(class: ShipClass, spec: &ShipSpec) -> Result<(), CatalogError> {
    let invalid = |reason: &str| CatalogError::InvalidSpec {
        class,
        reason: reason.to_string(),
    };
    if spec.mass <= 0.0 {
        return Err(invalid("mass must be > 0"));
    }
    if spec.hp <= 0.0 {
        return Err(invalid("hp must be > 0"));
    }
    if spec.shield < 0.0 {
        return Err(invalid("shield must be >= 0"));
    }
    if spec.radius <= 0.0 {
        return Err(invalid("radius must be > 0"));
    }
    if spec.laser_range < 0.0 {
        return Err(invalid("laser_range must be >= 0"));
    }
    Ok(())
}
