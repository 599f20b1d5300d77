//! Combat resolution - turning a pair of moves into two results

mod resolution;

pub use resolution::CombatEngine;
