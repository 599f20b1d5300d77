//! AI opponents: creature generation and move selection

mod generator;
mod policy;

pub use generator::{
    generate_ai_creature, generate_ai_creature_with_rng, generate_ai_name,
    generate_stat_allocations, Difficulty,
};
pub use policy::{decide_move, decide_move_with_rng, move_weights};
