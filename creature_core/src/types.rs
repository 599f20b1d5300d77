use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CreatureError;

/// The five core attributes every creature carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Speed,
    Health,
    Defense,
    Strength,
    Luck,
}

impl Stat {
    /// All stats, in allocation order
    pub fn all() -> &'static [Stat] {
        &[
            Stat::Speed,
            Stat::Health,
            Stat::Defense,
            Stat::Strength,
            Stat::Luck,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stat::Speed => "speed",
            Stat::Health => "health",
            Stat::Defense => "defense",
            Stat::Strength => "strength",
            Stat::Luck => "luck",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stat {
    type Err = CreatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stat::all()
            .iter()
            .copied()
            .find(|stat| stat.as_str() == s)
            .ok_or_else(|| CreatureError::UnknownStat(s.to_string()))
    }
}

/// Playable creature types, each with its own stat biases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatureType {
    Dragon,
    Owlbear,
    Gnome,
    Kraken,
    Cthulu,
    Minotaur,
    Cerberus,
    Medusa,
    Robot,
    #[serde(rename = "python-python")]
    Python,
    Jacob,
    Beyblade,
}

impl CreatureType {
    /// Get all creature type variants
    pub fn all() -> &'static [CreatureType] {
        &[
            CreatureType::Dragon,
            CreatureType::Owlbear,
            CreatureType::Gnome,
            CreatureType::Kraken,
            CreatureType::Cthulu,
            CreatureType::Minotaur,
            CreatureType::Cerberus,
            CreatureType::Medusa,
            CreatureType::Robot,
            CreatureType::Python,
            CreatureType::Jacob,
            CreatureType::Beyblade,
        ]
    }

    /// Wire name of this type
    pub fn as_str(&self) -> &'static str {
        match self {
            CreatureType::Dragon => "dragon",
            CreatureType::Owlbear => "owlbear",
            CreatureType::Gnome => "gnome",
            CreatureType::Kraken => "kraken",
            CreatureType::Cthulu => "cthulu",
            CreatureType::Minotaur => "minotaur",
            CreatureType::Cerberus => "cerberus",
            CreatureType::Medusa => "medusa",
            CreatureType::Robot => "robot",
            CreatureType::Python => "python-python",
            CreatureType::Jacob => "jacob",
            CreatureType::Beyblade => "beyblade",
        }
    }

    /// Stat modifiers applied on top of the baseline at creation
    pub fn stat_biases(&self) -> &'static [(Stat, i32)] {
        use Stat::*;
        match self {
            CreatureType::Dragon => &[(Health, 5), (Speed, -3), (Strength, 2)],
            CreatureType::Owlbear => &[(Strength, 3), (Defense, 3), (Speed, -2)],
            CreatureType::Gnome => &[(Luck, 4), (Speed, 3), (Strength, -3)],
            CreatureType::Kraken => &[(Health, 4), (Strength, 3), (Speed, -2)],
            CreatureType::Cthulu => &[(Luck, 5), (Speed, -3), (Defense, 2)],
            CreatureType::Minotaur => &[(Strength, 5), (Luck, -3), (Health, 2)],
            CreatureType::Cerberus => &[(Speed, 4), (Defense, 2), (Luck, -1)],
            CreatureType::Medusa => &[(Luck, 4), (Strength, -2), (Defense, 2)],
            CreatureType::Robot => &[(Defense, 5), (Luck, -3), (Health, 2)],
            CreatureType::Python => &[(Speed, 4), (Luck, 3), (Defense, -2)],
            CreatureType::Jacob => &[(Health, 2), (Strength, 2), (Speed, 2)],
            CreatureType::Beyblade => &[(Speed, 6), (Defense, -4), (Strength, 2)],
        }
    }

    /// Themed prefixes used when naming AI creatures of this type
    pub fn name_prefixes(&self) -> &'static [&'static str] {
        match self {
            CreatureType::Dragon => &["Flame", "Ember", "Scorch", "Inferno", "Blaze"],
            CreatureType::Owlbear => &["Talon", "Hoot", "Claw", "Feather", "Wing"],
            CreatureType::Gnome => &["Tink", "Gizmo", "Spark", "Widget", "Bolt"],
            CreatureType::Kraken => &["Tentacle", "Deep", "Squid", "Ocean", "Abyss"],
            CreatureType::Cthulu => &["Eldritch", "Void", "Cosmic", "Ancient", "Madness"],
            CreatureType::Minotaur => &["Bull", "Maze", "Horn", "Labyrinth", "Charge"],
            CreatureType::Cerberus => &["Triple", "Hades", "Guard", "Snarl", "Howl"],
            CreatureType::Medusa => &["Stone", "Serpent", "Gaze", "Viper", "Gorgon"],
            CreatureType::Robot => &["Mecha", "Cyber", "Circuit", "Binary", "Steel"],
            CreatureType::Python => &["Coil", "Hiss", "Scale", "Venom", "Fang"],
            CreatureType::Jacob => &["Cool", "Awesome", "Epic", "Legendary", "Supreme"],
            CreatureType::Beyblade => &["Spin", "Burst", "Tornado", "Vortex", "Whirl"],
        }
    }

    /// Short flavor description for type pickers
    pub fn description(&self) -> &'static str {
        match self {
            CreatureType::Dragon => "High health and strength, but slower. Breathes fire!",
            CreatureType::Owlbear => "Strong and defensive, balanced fighter.",
            CreatureType::Gnome => "Lucky and fast, but physically weak.",
            CreatureType::Kraken => "High health and strength, controls the seas.",
            CreatureType::Cthulu => "Extremely lucky with cosmic powers.",
            CreatureType::Minotaur => "Pure strength, charges into battle.",
            CreatureType::Cerberus => "Fast with good defense, triple threat.",
            CreatureType::Medusa => "Lucky with stone gaze, moderate stats.",
            CreatureType::Robot => "Heavily armored but predictable.",
            CreatureType::Python => "Fast and lucky, constricts enemies.",
            CreatureType::Jacob => "Mysterious and balanced.",
            CreatureType::Beyblade => "Extremely fast but fragile, let it rip!",
        }
    }
}

impl fmt::Display for CreatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CreatureType {
    type Err = CreatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CreatureType::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CreatureError::UnknownCreatureType(s.to_string()))
    }
}
