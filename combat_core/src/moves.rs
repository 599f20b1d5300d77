//! Moves and move results

use creature_core::CreatureId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Types of moves available in battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveType {
    /// Standard attack
    Attack,
    /// Defensive stance (3 uses per bracket round)
    Defend,
    /// Empowered attack (1 use per bracket round)
    Special,
    /// Any tag the engine does not recognise; resolves as a failed move
    #[serde(other)]
    Unknown,
}

impl MoveType {
    /// Moves a creature can actually choose
    pub fn playable() -> &'static [MoveType] {
        &[MoveType::Attack, MoveType::Defend, MoveType::Special]
    }

    /// Map an external tag to a move type, tolerating unknown tags
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or(MoveType::Unknown)
    }
}

impl fmt::Display for MoveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveType::Attack => write!(f, "attack"),
            MoveType::Defend => write!(f, "defend"),
            MoveType::Special => write!(f, "special"),
            MoveType::Unknown => write!(f, "unknown"),
        }
    }
}

/// Error parsing a move tag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid move type: {0}")]
pub struct ParseMoveTypeError(pub String);

impl FromStr for MoveType {
    type Err = ParseMoveTypeError;

    /// Case-insensitive; never yields `Unknown`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "attack" => Ok(MoveType::Attack),
            "defend" => Ok(MoveType::Defend),
            "special" => Ok(MoveType::Special),
            _ => Err(ParseMoveTypeError(s.to_string())),
        }
    }
}

/// A move chosen by a creature for one combat round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    move_type: MoveType,
    user_id: CreatureId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_id: Option<CreatureId>,
}

impl Move {
    pub fn new(move_type: MoveType, user_id: CreatureId) -> Self {
        Move {
            move_type,
            user_id,
            target_id: None,
        }
    }

    pub fn attack(user_id: CreatureId) -> Self {
        Self::new(MoveType::Attack, user_id)
    }

    pub fn defend(user_id: CreatureId) -> Self {
        Self::new(MoveType::Defend, user_id)
    }

    pub fn special(user_id: CreatureId) -> Self {
        Self::new(MoveType::Special, user_id)
    }

    pub fn with_target(mut self, target_id: CreatureId) -> Self {
        self.target_id = Some(target_id);
        self
    }

    pub fn move_type(&self) -> MoveType {
        self.move_type
    }

    pub fn user_id(&self) -> CreatureId {
        self.user_id
    }

    pub fn target_id(&self) -> Option<CreatureId> {
        self.target_id
    }
}

/// Outcome of executing one move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveResult {
    /// The move that was executed
    #[serde(rename = "move")]
    pub mv: Move,
    /// False when the move could not be performed
    pub success: bool,
    #[serde(default)]
    pub damage_dealt: u32,
    #[serde(default)]
    pub was_critical: bool,
    #[serde(default)]
    pub was_dodged: bool,
    #[serde(default)]
    pub was_defended: bool,
    /// Human-readable summary
    pub message: String,
}

impl MoveResult {
    /// A successful move with no damage attached
    pub fn succeeded(mv: Move, message: impl Into<String>) -> Self {
        MoveResult {
            mv,
            success: true,
            damage_dealt: 0,
            was_critical: false,
            was_dodged: false,
            was_defended: false,
            message: message.into(),
        }
    }

    /// A move that could not be performed
    pub fn failed(mv: Move, message: impl Into<String>) -> Self {
        MoveResult {
            success: false,
            ..Self::succeeded(mv, message)
        }
    }

    /// A move that missed because the defender dodged
    pub fn dodged(mv: Move, message: impl Into<String>) -> Self {
        MoveResult {
            was_dodged: true,
            ..Self::succeeded(mv, message)
        }
    }
}
