// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use chrono::{DateTime, Utc};
use minidom::Element;
use tracing::debug;
use xmpp_parsers::message::Message;
use xmpp_parsers::presence::Presence;

use prose_term_xmpp::ns;

pub use message::parse_message;
pub use presence::parse_presence;

use crate::app::event_handlers::MucEvent;

mod message;
mod presence;

/// Turns an inbound stanza into the events the room loop cares about. `received_at` stamps
/// live messages.
pub fn parse_stanza(stanza: Element, received_at: DateTime<Utc>) -> Result<Vec<MucEvent>> {
    let mut events = vec![];

    if stanza.is("presence", ns::JABBER_CLIENT) {
        if let Some(presence) = parse_presence(Presence::try_from(stanza)?)? {
            events.push(MucEvent::Presence(presence));
        }
    } else if stanza.is("message", ns::JABBER_CLIENT) {
        if let Some(activity) = parse_message(Message::try_from(stanza)?, received_at) {
            events.push(MucEvent::Message(activity));
        }
    } else {
        debug!("Ignoring {} stanza.", stanza.name());
    }

    Ok(events)
}
