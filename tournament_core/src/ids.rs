//! Identifiers for tournament entities

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                $name(Uuid::new_v4())
            }

            /// Draw the id from the supplied RNG (reproducible under a seed)
            pub fn from_rng(rng: &mut impl Rng) -> Self {
                $name(uuid::Builder::from_random_bytes(rng.gen()).into_uuid())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

uuid_id!(
    /// Identity of a single match
    MatchId
);
uuid_id!(
    /// Identity of a tournament bracket
    BracketId
);
uuid_id!(
    /// Identity of a game session
    GameId
);
