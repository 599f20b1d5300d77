//! creature_core - Creature types, stats and the creature factory
//!
//! This library provides:
//! - CreatureType: the twelve playable types and their stat bias tables
//! - CreatureStats: the five 1-20 attributes every creature carries
//! - Creature: HP, per-round resources and the derived combat chances
//!
//! ```rust
//! use creature_core::{Creature, CreatureType, Stat, StatAllocation};
//!
//! let mut allocation = StatAllocation::new();
//! allocation.insert(Stat::Strength, 3);
//! let dragon =
//!     Creature::create_with_biases("Smaug", CreatureType::Dragon, Some(&allocation), false)?;
//! assert_eq!(dragon.current_hp, dragon.max_hp);
//! # Ok::<(), creature_core::CreatureError>(())
//! ```

pub mod creature;
pub mod stats;
pub mod types;

pub use creature::{Creature, CreatureId, DEFEND_USES_PER_ROUND, SPECIAL_USES_PER_ROUND};
pub use stats::{parse_allocation, CreatureStats, StatAllocation, LEVEL_UP_POINTS};
pub use types::{CreatureType, Stat};

use thiserror::Error;

/// Error creating or modifying a creature
#[derive(Debug, Error, PartialEq)]
pub enum CreatureError {
    #[error("Creature name must be 1-{max} characters (got {len})")]
    InvalidName { len: usize, max: usize },
    #[error("Cannot allocate more than {max} stat points (you used {total})")]
    AllocationOverBudget { total: i64, max: i32 },
    #[error("Must allocate exactly {expected} stat points (got {total})")]
    LevelUpTotal { total: i64, expected: i32 },
    #[error("Cannot decrease stats ({stat}: {points})")]
    NegativeAllocation { stat: Stat, points: i32 },
    #[error("Invalid stat: {0}")]
    UnknownStat(String),
    #[error("Unknown creature type: {0}")]
    UnknownCreatureType(String),
}
