// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

pub use event_parser::parse_stanza;
pub use xmpp_muc_transport::{XmppConnection, XmppMucTransport};

pub mod event_parser;
mod type_conversions;
mod xmpp_muc_transport;

pub type DynXmppConnection = Arc<dyn XmppConnection>;
