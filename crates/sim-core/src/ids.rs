//! Stable string identifiers for every entity kind.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            /// Wrap an existing identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(
    /// Identifier of a software (game) project.
    GameId
);
string_id!(
    /// Identifier of a development or research team.
    TeamId
);
string_id!(
    /// Identifier of an employee.
    EmployeeId
);
string_id!(
    /// Identifier of a game or hardware feature.
    FeatureId
);
string_id!(
    /// Identifier of a hardware platform.
    PlatformId
);
string_id!(
    /// Identifier of a publisher.
    PublisherId
);
string_id!(
    /// Identifier of a company (player studio or competitor).
    CompanyId
);
string_id!(
    /// Identifier of a hardware project.
    HardwareId
);
string_id!(
    /// Identifier of a building.
    BuildingId
);
string_id!(
    /// Identifier of a news item.
    NewsId
);

/// Developer id used for projects owned by the player's studio.
pub const PLAYER_COMPANY: &str = "MYCOMPANY";
