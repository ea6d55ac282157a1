// prose-term/prose-term-xmpp
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Display, Formatter};

use jid::{BareJid, Jid};
use minidom::Element;
use tracing::debug;

use crate::{ns, ElementExt, ParseError};

/// The `<x xmlns='http://jabber.org/protocol/muc#user'/>` payload of a room presence.
///
/// Unlike `xmpp_parsers::muc::user::MucUser` this keeps the status codes numeric and the
/// affiliation and role as received, so that unknown codes survive and invalid values can be
/// reported by the caller instead of failing the whole stanza.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct MucUser {
    /// List of statuses applying to this item.
    pub status: Vec<StatusCode>,

    /// List of items.
    pub items: Vec<Item>,

    /// Has the room been destroyed?
    pub destroy: Option<Destroy>,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Inform user that any occupant is allowed to see the user's full JID.
    pub const NON_ANONYMOUS_ROOM: StatusCode = StatusCode(100);
    /// Inform user that presence refers to itself.
    pub const SELF_PRESENCE: StatusCode = StatusCode(110);
    /// Inform occupants that room logging is now enabled.
    pub const ROOM_LOGGING_ENABLED: StatusCode = StatusCode(170);
    /// Inform occupants that the room is now non-anonymous.
    pub const ROOM_NON_ANONYMOUS: StatusCode = StatusCode(172);
    /// Inform user that a new room has been created.
    pub const ROOM_HAS_BEEN_CREATED: StatusCode = StatusCode(201);
    /// Inform user that service has assigned or modified occupant's roomnick.
    pub const ASSIGNED_NICK: StatusCode = StatusCode(210);
    /// Inform user that they have been banned from the room.
    pub const BANNED: StatusCode = StatusCode(301);
    /// Inform all occupants of new room nickname.
    pub const NEW_NICK: StatusCode = StatusCode(303);
    /// Inform user that they have been kicked from the room.
    pub const KICKED: StatusCode = StatusCode(307);
    /// Inform user that they are being removed because of an affiliation change.
    pub const REMOVAL_FROM_ROOM: StatusCode = StatusCode(321);
    /// Inform user that they are being removed because the room is now members-only.
    pub const CONFIG_MEMBERS_ONLY: StatusCode = StatusCode(322);
    /// Inform user that they are being removed because the MUC service is shutting down.
    pub const SERVICE_SHUTDOWN: StatusCode = StatusCode(332);
    /// Inform user that they are being removed because of a technical problem.
    pub const SERVICE_ERROR_KICK: StatusCode = StatusCode(333);
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Item {
    /// The affiliation as sent by the room, e.g. "owner".
    pub affiliation: Option<String>,
    /// The role as sent by the room, e.g. "moderator".
    pub role: Option<String>,
    /// The real JID of the occupant. Only available in non-anonymous rooms.
    pub jid: Option<Jid>,
    /// The new nickname of an occupant when used together with status code 303.
    pub nick: Option<String>,
    pub actor: Option<Actor>,
    pub reason: Option<String>,
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Actor {
    pub jid: Option<Jid>,
    pub nick: Option<String>,
}

impl Actor {
    /// The actor's nickname if the room disclosed it, their JID otherwise.
    pub fn display_name(&self) -> Option<String> {
        self.nick
            .clone()
            .or_else(|| self.jid.as_ref().map(ToString::to_string))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Destroy {
    pub jid: Option<BareJid>,
    pub reason: Option<String>,
}

impl MucUser {
    pub fn contains(&self, code: StatusCode) -> bool {
        self.status.contains(&code)
    }
}

impl TryFrom<Element> for MucUser {
    type Error = ParseError;

    fn try_from(root: Element) -> Result<Self, Self::Error> {
        root.expect_is("x", ns::MUC_USER)?;

        let mut user = MucUser::default();

        for child in root.children() {
            match child {
                _ if child.is("item", ns::MUC_USER) => {
                    user.items.push(Item::try_from(child.clone())?);
                }
                _ if child.is("status", ns::MUC_USER) => {
                    let Some(code) = child.parse_attr::<u16>("code")? else {
                        return Err(ParseError::Generic {
                            msg: "Missing code attribute in muc#user status.".to_string(),
                        });
                    };
                    user.status.push(StatusCode(code));
                }
                _ if child.is("destroy", ns::MUC_USER) => {
                    user.destroy = Some(Destroy::try_from(child.clone())?);
                }
                _ => {
                    debug!("Ignoring {} element in muc#user payload.", child.name());
                }
            }
        }

        Ok(user)
    }
}

impl TryFrom<Element> for Item {
    type Error = ParseError;

    fn try_from(root: Element) -> Result<Self, Self::Error> {
        root.expect_is("item", ns::MUC_USER)?;

        let actor = root
            .get_child("actor", ns::MUC_USER)
            .map(|actor| -> Result<Actor, ParseError> {
                Ok(Actor {
                    jid: actor.parse_attr::<Jid>("jid")?,
                    nick: actor.non_empty_attr("nick"),
                })
            })
            .transpose()?;

        Ok(Item {
            affiliation: root.non_empty_attr("affiliation"),
            role: root.non_empty_attr("role"),
            jid: root.parse_attr::<Jid>("jid")?,
            nick: root.non_empty_attr("nick"),
            actor,
            reason: root
                .get_child("reason", ns::MUC_USER)
                .and_then(ElementExt::non_empty_text),
        })
    }
}

impl TryFrom<Element> for Destroy {
    type Error = ParseError;

    fn try_from(root: Element) -> Result<Self, Self::Error> {
        root.expect_is("destroy", ns::MUC_USER)?;

        Ok(Destroy {
            jid: root.parse_attr::<BareJid>("jid")?,
            reason: root
                .get_child("reason", ns::MUC_USER)
                .and_then(ElementExt::non_empty_text),
        })
    }
}
