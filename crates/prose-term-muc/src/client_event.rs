// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::rooms::models::RoomNotification;
use crate::domain::shared::models::RoomId;

#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// A line for the message log of a room.
    RoomNotification {
        room_id: RoomId,
        notification: RoomNotification,
    },

    /// The roster, our membership or the timers of a room changed.
    RoomChanged { room_id: RoomId },
}
