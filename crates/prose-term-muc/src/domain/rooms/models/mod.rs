// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use muc_presence::{MucPresence, MucPresenceType};
pub use nick_color::NickColor;
pub use presence_buffer::PresenceBuffer;
pub use room_affiliation::RoomAffiliation;
pub use room_context::RoomContext;
pub use room_effect::{PrivateConversationEvent, RejoinDecision, RoomEffect, RoomPresenceRequest};
pub use room_error::RoomError;
pub use room_event::RoomEventKind;
pub use room_notification::{MucNotice, NotificationKind, RoomNotification, StatusChange};
pub use room_role::RoomRole;
pub use room_roster::RoomRoster;
pub use self_ping_outcome::SelfPingOutcome;
pub use user::User;

mod muc_presence;
mod nick_color;
mod presence_buffer;
mod room_affiliation;
mod room_context;
mod room_effect;
mod room_error;
mod room_event;
mod room_notification;
mod room_role;
mod room_roster;
mod self_ping_outcome;
mod user;
