// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use jid::Jid;

use prose_term_xmpp::stanza::StatusCode;

use crate::domain::shared::models::{Availability, OccupantId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MucPresenceType {
    Available,
    Unavailable,
    /// An error presence. The payload is the human readable error.
    Error(String),
}

/// A presence sent by a room on behalf of one of its occupants, reduced to the values the
/// roster cares about.
#[derive(Debug, Clone, PartialEq)]
pub struct MucPresence {
    pub occupant_id: OccupantId,
    pub r#type: MucPresenceType,
    pub status_codes: Vec<StatusCode>,
    /// The affiliation as sent by the room. Validated when applied to the roster.
    pub affiliation: Option<String>,
    pub role: Option<String>,
    pub show: Availability,
    pub status: Option<String>,
    /// The real JID of the occupant. Only available in non-anonymous rooms.
    pub real_jid: Option<Jid>,
    /// The new nickname announced together with status code 303.
    pub new_nick: Option<String>,
    /// Nickname (or JID) of whoever kicked or banned the occupant.
    pub actor: Option<String>,
    pub reason: Option<String>,
}

impl MucPresence {
    pub fn available(occupant_id: OccupantId) -> Self {
        Self::new(occupant_id, MucPresenceType::Available)
    }

    pub fn unavailable(occupant_id: OccupantId) -> Self {
        Self::new(occupant_id, MucPresenceType::Unavailable)
    }

    pub fn error(occupant_id: OccupantId, text: impl Into<String>) -> Self {
        Self::new(occupant_id, MucPresenceType::Error(text.into()))
    }

    fn new(occupant_id: OccupantId, r#type: MucPresenceType) -> Self {
        Self {
            occupant_id,
            r#type,
            status_codes: vec![],
            affiliation: None,
            role: None,
            show: Availability::Available,
            status: None,
            real_jid: None,
            new_nick: None,
            actor: None,
            reason: None,
        }
    }

    pub fn with_status_codes(mut self, codes: impl IntoIterator<Item = StatusCode>) -> Self {
        self.status_codes.extend(codes);
        self
    }

    pub fn with_affiliation(mut self, affiliation: impl Into<String>) -> Self {
        self.affiliation = Some(affiliation.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_show(mut self, show: Availability) -> Self {
        self.show = show;
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_real_jid(mut self, jid: Jid) -> Self {
        self.real_jid = Some(jid);
        self
    }

    pub fn with_new_nick(mut self, nick: impl Into<String>) -> Self {
        self.new_nick = Some(nick.into());
        self
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

impl MucPresence {
    pub fn nick(&self) -> &str {
        self.occupant_id.nickname()
    }

    pub fn has_status_code(&self, code: StatusCode) -> bool {
        self.status_codes.contains(&code)
    }

    pub fn is_unavailable(&self) -> bool {
        self.r#type == MucPresenceType::Unavailable
    }

    pub fn is_self_presence(&self) -> bool {
        self.has_status_code(StatusCode::SELF_PRESENCE)
    }
}
