// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use strum_macros::{Display, EnumString};

use super::RoomError;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum RoomAffiliation {
    /// The user who created the room, or who got appointed by its creator
    /// to be their equal.
    Owner,

    /// A user who has been empowered by an owner to do administrative
    /// operations.
    Admin,

    /// A user who is whitelisted to speak in moderated rooms, or to join a
    /// member-only room.
    Member,

    /// A user who has been banned from this room.
    Outcast,

    /// A normal participant.
    #[default]
    None,
}

impl RoomAffiliation {
    /// Parses the affiliation attribute of a `muc#user` item. A missing attribute means `None`.
    pub fn parse(value: Option<&str>) -> Result<Self, RoomError> {
        let Some(value) = value else {
            return Ok(Self::None);
        };
        value
            .parse()
            .map_err(|_| RoomError::InvalidRoleOrAffiliation {
                value: value.to_string(),
            })
    }
}
