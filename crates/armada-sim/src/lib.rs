//! Simulation engine for ARMADA.
//!
//! Owns the hecs ECS world and the squad table, runs the fixed-order tick
//! pipeline (communicate → update → draw), and produces a
//! [`armada_core::state::FrameSnapshot`] each tick. Completely headless —
//! rendering and audio consume the snapshot, the engine never blocks on
//! them.

pub mod battle_info;
pub mod buff_manager;
pub mod engine;
pub mod forces;
pub mod ship;
pub mod squad;
pub mod systems;
pub mod torpedo;
pub mod world_setup;

pub use armada_core as core;
pub use engine::{Engine, EngineConfig};

#[cfg(test)]
mod tests;
