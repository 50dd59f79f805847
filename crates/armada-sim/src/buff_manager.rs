//! Buff manager — tracks per-ship buff instances and expires their timers.
//!
//! Buff *definitions* live in the core catalog; this module owns the active
//! (ship, buff) instances. Re-applying an active buff refreshes its timer
//! instead of stacking a duplicate — and deliberately does not re-apply the
//! stat deltas. Expiry only removes the bookkeeping/visual indicator:
//! permanent multipliers applied at apply-time stay applied (see DESIGN.md).

use std::collections::HashMap;

use hecs::{Entity, World};
use tracing::debug;

use armada_core::buffs::{BuffCatalog, BuffEffect};
use armada_core::components::{ShipParameters, ShipVitals};
use armada_core::enums::BuffId;
use armada_core::error::CatalogError;
use armada_core::types::Rgb;

use crate::ship;

/// An active buff on a ship.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuffInstance {
    pub buff: BuffId,
    /// Tick the buff was (last) applied at.
    pub applied_tick: u64,
    /// Tick the buff expires at; `None` = permanent.
    pub expires_tick: Option<u64>,
    /// Whether the renderer shows this buff.
    pub display: bool,
    /// Indicator color when displayed.
    pub color: Rgb,
}

/// Registry of active buffs, keyed by ship entity.
#[derive(Debug, Default)]
pub struct BuffManager {
    active: HashMap<Entity, HashMap<BuffId, BuffInstance>>,
}

impl BuffManager {
    /// Apply a cataloged buff to a ship at the given tick.
    ///
    /// Unknown buffs are configuration errors and fail fast. Applying to a
    /// despawned or dead ship is a silent no-op. Re-applying an active buff
    /// refreshes its expiry without re-running the stat deltas.
    pub fn apply(
        &mut self,
        catalog: &BuffCatalog,
        world: &mut World,
        target: Entity,
        buff: BuffId,
        tick: u64,
    ) -> Result<(), CatalogError> {
        let spec = catalog.spec(buff)?;

        let Ok((params, vitals)) =
            world.query_one_mut::<(&mut ShipParameters, &mut ShipVitals)>(target)
        else {
            return Ok(());
        };
        if vitals.is_dead() {
            return Ok(());
        }

        let expires_tick = spec.duration_ticks.map(|d| tick + d);
        let ship_buffs = self.active.entry(target).or_default();

        if let Some(instance) = ship_buffs.get_mut(&buff) {
            // Refresh, don't stack.
            instance.applied_tick = tick;
            instance.expires_tick = expires_tick;
            return Ok(());
        }

        for effect in &spec.effects {
            match *effect {
                BuffEffect::LaserRangeMultiplier(m) => params.laser_range *= m,
                BuffEffect::HpMultiplier(m) => {
                    params.hp *= m;
                    params.total_health = params.hp + params.shield;
                }
                BuffEffect::IncomingDamageMultiplier(m) => {
                    params.incoming_damage_modifier *= m;
                }
                BuffEffect::ShieldBonus(v) => {
                    vitals.shield = (vitals.shield + v).min(params.shield);
                }
                BuffEffect::Heal(v) => ship::heal(params, vitals, v),
            }
        }

        debug!(?buff, ship = ?target, ?expires_tick, "buff applied");
        ship_buffs.insert(
            buff,
            BuffInstance {
                buff,
                applied_tick: tick,
                expires_tick,
                display: spec.display,
                color: spec.color,
            },
        );
        Ok(())
    }

    /// Expire timed buffs whose tick has passed. Called once per tick.
    pub fn update(&mut self, tick: u64) {
        for ship_buffs in self.active.values_mut() {
            ship_buffs.retain(|buff, instance| {
                let keep = instance.expires_tick.is_none_or(|t| tick < t);
                if !keep {
                    debug!(?buff, "buff expired");
                }
                keep
            });
        }
        self.active.retain(|_, ship_buffs| !ship_buffs.is_empty());
    }

    /// Drop bookkeeping for a despawned ship.
    pub fn forget(&mut self, ship: Entity) {
        self.active.remove(&ship);
    }

    /// Buffs flagged for display on a ship, for the renderer only.
    pub fn visible_buffs(&self, ship: Entity) -> Vec<BuffInstance> {
        self.active
            .get(&ship)
            .map(|buffs| {
                let mut visible: Vec<BuffInstance> =
                    buffs.values().filter(|b| b.display).copied().collect();
                visible.sort_by_key(|b| b.buff as u32);
                visible
            })
            .unwrap_or_default()
    }

    /// True while the named buff is active on the ship.
    pub fn is_active(&self, ship: Entity, buff: BuffId) -> bool {
        self.active
            .get(&ship)
            .is_some_and(|buffs| buffs.contains_key(&buff))
    }

    /// Clear all buff bookkeeping.
    pub fn clear(&mut self) {
        self.active.clear();
    }
}
