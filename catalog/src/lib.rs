#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Static lookup data for the EXVS2 team-cost calculator.
//!
//! The catalog owns the closed set of valid (cost, health) combinations and
//! the standard respawn health table. Calculation systems never read this data
//! directly: they receive it through the [`exvs_cost_core::RespawnLookup`]
//! seam, which keeps the rules testable against alternative tables.

mod respawn;
mod units;

pub use respawn::{RespawnEntry, RespawnTable, STANDARD_RESPAWN_ENTRIES};
pub use units::{combinations, health_options, is_valid_combination, unit};

use exvs_cost_core::{CostTier, UnknownCostTier};
use thiserror::Error;

/// Errors raised when caller input falls outside the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The nominal cost does not name a cost tier.
    #[error(transparent)]
    UnknownCost(#[from] UnknownCostTier),
    /// The health value is not offered for the cost tier.
    #[error("health {health} is not available for cost {cost}")]
    InvalidHealth {
        /// Tier the unit was requested for.
        cost: CostTier,
        /// Rejected nominal health.
        health: u32,
    },
}
