// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use crate::app::deps::OwnPresence;
pub use crate::app::event_handlers::{MessageActivity, MucEvent};
pub use crate::app::services::MucRoom;
pub use crate::domain::private_conversations::models::{
    PrivateConversation, PrivateConversationRef,
};
pub use crate::domain::rooms::models::{
    MucNotice, NickColor, NotificationKind, RoomAffiliation, RoomContext, RoomError,
    RoomNotification, RoomRole, RoomRoster, StatusChange, User,
};
pub use crate::domain::settings::models::{MucConfig, MucSettings};
pub use crate::domain::shared::models::{Availability, OccupantId, RoomId};
