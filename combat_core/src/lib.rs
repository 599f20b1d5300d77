//! combat_core - Move resolution for arena battles
//!
//! This library provides:
//! - Move / MoveResult: the three actions and their outcome records
//! - CombatConstants: tunable damage, dodge and crit numbers (TOML loadable)
//! - Damage calculation: base rolls, crits and mitigation
//! - CombatEngine: resolving a pair of simultaneous moves
//!
//! # Quick Start
//!
//! ```rust
//! use combat_core::prelude::*;
//! use creature_core::{Creature, CreatureType};
//!
//! let mut dragon =
//!     Creature::create_with_biases("Smaug", CreatureType::Dragon, None, false).unwrap();
//! let mut robot =
//!     Creature::create_with_biases("Unit 7", CreatureType::Robot, None, true).unwrap();
//! let engine = CombatEngine::default();
//!
//! let attack = Move::attack(dragon.id);
//! let defend = Move::defend(robot.id);
//! let (dragon_result, robot_result) =
//!     engine.execute_moves(&mut dragon, &attack, &mut robot, &defend);
//! println!("{}", dragon_result.message);
//! println!("{}", robot_result.message);
//! ```

pub mod combat;
pub mod config;
pub mod damage;
pub mod moves;
pub mod prelude;

// Core API - what most users need
pub use combat::CombatEngine;
pub use moves::{Move, MoveResult, MoveType, ParseMoveTypeError};

// Configuration
pub use config::{CombatConstants, ConfigError};
