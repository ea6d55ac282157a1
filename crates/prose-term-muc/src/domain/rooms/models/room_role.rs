// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use strum_macros::{Display, EnumString};

use super::RoomError;

/// The temporary, per-session position of an occupant (XEP-0045 §5.1).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum RoomRole {
    Moderator,
    Participant,
    Visitor,
    #[default]
    None,
}

impl RoomRole {
    /// Parses the role attribute of a `muc#user` item. A missing attribute means `None`.
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rooms::models::RoomAffiliation;

    #[test]
    fn test_parse_role_and_affiliation() {
        assert_eq!(RoomRole::parse(Some("moderator")).unwrap(), RoomRole::Moderator);
        assert_eq!(RoomRole::parse(None).unwrap(), RoomRole::None);
        assert_eq!(
            RoomAffiliation::parse(Some("outcast")).unwrap(),
            RoomAffiliation::Outcast
        );
        assert_eq!(RoomAffiliation::to_string(&RoomAffiliation::Admin), "admin");
    }

    #[test]
    fn test_rejects_unknown_values() {
        assert!(matches!(
            RoomRole::parse(Some("overlord")),
            Err(RoomError::InvalidRoleOrAffiliation { value }) if value == "overlord"
        ));
        assert!(RoomAffiliation::parse(Some("Owner")).is_err());
    }
}
