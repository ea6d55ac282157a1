// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use prose_term_xmpp::stanza::StatusCode;

use super::{MucPresence, MucPresenceType, RoomRoster};

/// What a presence means for a room we are joined to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEventKind {
    /// An error presence. Only produces a notice.
    Error(String),
    /// An unknown nickname became available.
    Join,
    /// The presence contradicts the roster and is ignored.
    Inconsistent(&'static str),
    NickChange { new_nick: String },
    Ban,
    Kick,
    /// We were removed because the MUC service is shutting down.
    Shutdown,
    /// We were removed because the room became members-only.
    NonMemberKick,
    /// The occupant left. `server_initiated` is set for removals caused by a service error.
    Leave { server_initiated: bool },
    StatusChange,
}

impl RoomEventKind {
    /// Classifies `presence` against `roster`. The first matching rule wins.
    pub fn classify(presence: &MucPresence, roster: &RoomRoster) -> Self {
        if let MucPresenceType::Error(text) = &presence.r#type {
            return Self::Error(text.clone());
        }

        let unavailable = presence.is_unavailable();
        let has = |code: StatusCode| presence.has_status_code(code);

        if !roster.contains(presence.nick()) {
            return if unavailable {
                Self::Inconsistent("unavailable presence for unknown occupant")
            } else {
                Self::Join
            };
        }

        if has(StatusCode::NEW_NICK) {
            return match &presence.new_nick {
                Some(new_nick) => Self::NickChange {
                    new_nick: new_nick.clone(),
                },
                None => Self::Inconsistent("nickname change without new nickname"),
            };
        }

        if !unavailable {
            return Self::StatusChange;
        }

        let server_initiated = has(StatusCode::SERVICE_ERROR_KICK);

        if has(StatusCode::BANNED) {
            Self::Ban
        } else if has(StatusCode::KICKED) && !server_initiated {
            Self::Kick
        } else if has(StatusCode::SERVICE_SHUTDOWN) {
            Self::Shutdown
        } else if has(StatusCode::CONFIG_MEMBERS_ONLY) {
            Self::NonMemberKick
        } else {
            Self::Leave { server_initiated }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::rooms::models::{NickColor, RoomAffiliation, RoomRole, User};
    use crate::domain::shared::models::{Availability, OccupantId};

    use super::*;

    fn occupant(nick: &str) -> OccupantId {
        format!("room@conference.prose.org/{nick}").parse().unwrap()
    }

    fn roster() -> RoomRoster {
        let mut roster = RoomRoster::default();
        roster.add(User::new(
            "bob",
            RoomAffiliation::None,
            RoomRole::Participant,
            Availability::Available,
            None,
            None,
            NickColor(20),
        ));
        roster
    }

    #[test]
    fn test_unknown_nicks() {
        let roster = roster();
        assert_eq!(
            RoomEventKind::classify(&MucPresence::available(occupant("alice")), &roster),
            RoomEventKind::Join
        );
        assert!(matches!(
            RoomEventKind::classify(&MucPresence::unavailable(occupant("alice")), &roster),
            RoomEventKind::Inconsistent(_)
        ));
    }

    #[test]
    fn test_error_wins() {
        let presence = MucPresence::error(occupant("bob"), "conflict")
            .with_status_codes([StatusCode::BANNED]);
        assert_eq!(
            RoomEventKind::classify(&presence, &roster()),
            RoomEventKind::Error("conflict".to_string())
        );
    }

    #[test]
    fn test_status_code_priority() {
        let roster = roster();
        let classify = |codes: &[u16]| {
            let presence = MucPresence::unavailable(occupant("bob"))
                .with_status_codes(codes.iter().copied().map(StatusCode));
            RoomEventKind::classify(&presence, &roster)
        };

        assert_eq!(classify(&[301, 307]), RoomEventKind::Ban);
        assert_eq!(classify(&[307]), RoomEventKind::Kick);
        assert_eq!(
            classify(&[307, 333]),
            RoomEventKind::Leave {
                server_initiated: true
            }
        );
        assert_eq!(classify(&[332, 322]), RoomEventKind::Shutdown);
        assert_eq!(classify(&[322]), RoomEventKind::NonMemberKick);
        assert_eq!(
            classify(&[]),
            RoomEventKind::Leave {
                server_initiated: false
            }
        );
    }

    #[test]
    fn test_nick_change() {
        let roster = roster();
        let presence = MucPresence::unavailable(occupant("bob"))
            .with_status_codes([StatusCode::NEW_NICK])
            .with_new_nick("robert");
        assert_eq!(
            RoomEventKind::classify(&presence, &roster),
            RoomEventKind::NickChange {
                new_nick: "robert".to_string()
            }
        );

        let presence =
            MucPresence::unavailable(occupant("bob")).with_status_codes([StatusCode::NEW_NICK]);
        assert!(matches!(
            RoomEventKind::classify(&presence, &roster),
            RoomEventKind::Inconsistent(_)
        ));
    }

    #[test]
    fn test_kick_codes_on_available_presence_are_status_changes() {
        let presence =
            MucPresence::available(occupant("bob")).with_status_codes([StatusCode::KICKED]);
        assert_eq!(
            RoomEventKind::classify(&presence, &roster()),
            RoomEventKind::StatusChange
        );
    }
}
