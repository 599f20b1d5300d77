//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Moves
pub use crate::moves::{Move, MoveResult, MoveType};

// Combat
pub use crate::combat::CombatEngine;

// Config
pub use crate::config::{CombatConstants, ConfigError, HitProfile};

// Damage math (for previews and tooling)
pub use crate::damage::{calculate_hit_damage, HitInput};
