//! Damage calculation - base rolls, crits and mitigation

mod calculation;

pub use calculation::{calculate_hit_damage, roll_base_damage, HitInput};
