// prose-term/prose-term-xmpp
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

// See all at: https://xmpp.org/registrar/namespaces.html

/// RFC 6120: XMPP Core, client namespace
pub const JABBER_CLIENT: &str = "jabber:client";

/// RFC 6120: Stanza error conditions
pub const XMPP_STANZAS: &str = "urn:ietf:params:xml:ns:xmpp-stanzas";

/// XEP-0045: Multi-User Chat
pub const MUC: &str = "http://jabber.org/protocol/muc";

/// XEP-0045: Multi-User Chat, occupant payloads
pub const MUC_USER: &str = "http://jabber.org/protocol/muc#user";

/// XEP-0199: XMPP Ping
pub const PING: &str = "urn:xmpp:ping";

/// XEP-0203: Delayed Delivery
pub const DELAY: &str = "urn:xmpp:delay";
