// prose-term/prose-term-xmpp
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

//! Builders for the stanzas a client sends to a MUC room.

use jid::{FullJid, Jid};
use xmpp_parsers::iq::Iq;
use xmpp_parsers::muc::Muc;
use xmpp_parsers::ping::Ping;
use xmpp_parsers::presence::{Presence, Show, Type as PresenceType};

/// Builds the presence that enters the room `to` (`room@service/nick`).
pub fn join_presence(
    to: FullJid,
    password: Option<String>,
    show: Option<Show>,
    status: Option<String>,
) -> Presence {
    let mut muc = Muc::new();
    if let Some(password) = password {
        muc = muc.with_password(password);
    }

    let mut presence = Presence::new(PresenceType::None).with_to(Jid::Full(to));
    presence.show = show;
    if let Some(status) = status.filter(|status| !status.is_empty()) {
        presence.statuses.insert(String::new(), status);
    }
    presence.add_payload(muc);
    presence
}

/// Builds the presence that exits the room. XEP-0045 allows an optional status message.
pub fn leave_presence(to: FullJid, status: Option<String>) -> Presence {
    let mut presence = Presence::new(PresenceType::Unavailable).with_to(Jid::Full(to));
    if let Some(status) = status.filter(|status| !status.is_empty()) {
        presence.statuses.insert(String::new(), status);
    }
    presence
}

/// Builds the presence that requests a nickname change (XEP-0045 §7.6). Unlike the join
/// presence it carries no `<x xmlns='http://jabber.org/protocol/muc'/>` payload.
pub fn nick_change_presence(to: FullJid, show: Option<Show>, status: Option<String>) -> Presence {
    let mut presence = Presence::new(PresenceType::None).with_to(Jid::Full(to));
    presence.show = show;
    if let Some(status) = status.filter(|status| !status.is_empty()) {
        presence.statuses.insert(String::new(), status);
    }
    presence
}

/// Builds a XEP-0410 self-ping, i.e. a XEP-0199 ping addressed to our own occupant JID.
pub fn self_ping_iq(id: impl Into<String>, to: FullJid) -> Iq {
    Iq::from_get(id.into(), Ping).with_to(Jid::Full(to))
}
