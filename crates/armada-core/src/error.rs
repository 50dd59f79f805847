//! Construction-time validation errors.
//!
//! Catalog problems are configuration errors and fail fast when the tables
//! are built or first used. Nothing in the per-tick hot loop returns a
//! `Result`; empty targets, drained capacitors, and dead ships are ordinary
//! states, not errors.

use thiserror::Error;

use crate::enums::{BuffId, ShipClass};

/// Errors raised while building or querying the static catalogs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// A ship was requested for a class the catalog does not carry.
    #[error("ship catalog has no entry for class `{0}`")]
    UnknownShipClass(ShipClass),

    /// A buff was applied that the buff catalog does not carry.
    #[error("buff catalog has no entry for `{0:?}`")]
    UnknownBuff(BuffId),

    /// A supplied spec violates a catalog invariant (mass > 0, hp > 0, ...).
    #[error("invalid spec for `{class}`: {reason}")]
    InvalidSpec {
        /// Class whose spec failed validation.
        class: ShipClass,
        /// Human-readable description of the violated invariant.
        reason: String,
    },
}
