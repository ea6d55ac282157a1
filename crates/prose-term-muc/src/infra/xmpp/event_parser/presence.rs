// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use jid::Jid;
use minidom::Element;
use tracing::{debug, info};
use xmpp_parsers::presence::{Presence, Type as PresenceType};

use prose_term_xmpp::stanza::{Actor, MucUser};
use prose_term_xmpp::{ns, ElementExt, ParseError};

use crate::domain::rooms::models::{MucPresence, MucPresenceType};
use crate::domain::shared::models::{Availability, OccupantId};

const UNKNOWN_ERROR: &str = "Unknown error";

/// Reduces an occupant presence to a `MucPresence`. Presences that don't come from an
/// occupant (e.g. from the bare room JID) or that are subscription related yield `None`.
pub fn parse_presence(presence: Presence) -> Result<Option<MucPresence>, ParseError> {
    let Some(Jid::Full(from)) = presence.from else {
        debug!("Ignoring presence without occupant sender.");
        return Ok(None);
    };
    let occupant_id = OccupantId::from(from);

    let r#type = match presence.type_ {
        PresenceType::None => MucPresenceType::Available,
        PresenceType::Unavailable => MucPresenceType::Unavailable,
        PresenceType::Error => MucPresenceType::Error(
            presence
                .payloads
                .iter()
                .find(|payload| payload.is("error", ns::JABBER_CLIENT))
                .map(error_text)
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
        ),
        PresenceType::Probe
        | PresenceType::Subscribe
        | PresenceType::Subscribed
        | PresenceType::Unsubscribe
        | PresenceType::Unsubscribed => return Ok(None),
    };

    let muc_user = presence
        .payloads
        .into_iter()
        .find(|payload| payload.is("x", ns::MUC_USER))
        .map(MucUser::try_from)
        .transpose()?
        .unwrap_or_default();

    let mut muc_presence = MucPresence {
        occupant_id,
        r#type,
        status_codes: muc_user.status,
        affiliation: None,
        role: None,
        show: Availability::from(presence.show),
        status: presence
            .statuses
            .into_values()
            .find(|status| !status.is_empty()),
        real_jid: None,
        new_nick: None,
        actor: None,
        reason: None,
    };

    if let Some(item) = muc_user.items.into_iter().next() {
        muc_presence.affiliation = item.affiliation;
        muc_presence.role = item.role;
        muc_presence.real_jid = item.jid;
        muc_presence.new_nick = item.nick;
        muc_presence.actor = item.actor.as_ref().and_then(Actor::display_name);
        muc_presence.reason = item.reason;
    }

    if let Some(destroy) = muc_user.destroy {
        info!(
            "Room {} was destroyed{}",
            muc_presence.occupant_id.room_id(),
            destroy
                .jid
                .map(|jid| format!(", it moved to {}", jid))
                .unwrap_or_default()
        );
        if destroy.reason.is_some() {
            muc_presence.reason = destroy.reason;
        }
    }

    Ok(Some(muc_presence))
}

/// The text of a stanza error, or its condition if the error has no text.
fn error_text(error: &Element) -> String {
    error
        .get_child("text", ns::XMPP_STANZAS)
        .and_then(ElementExt::non_empty_text)
        .or_else(|| {
            error
                .children()
                .find(|child| child.ns() == ns::XMPP_STANZAS && child.name() != "text")
                .map(|condition| condition.name().replace('-', " "))
        })
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}
