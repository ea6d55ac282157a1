// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::time::Duration;

use crate::domain::shared::models::{Availability, OccupantId};

use super::RoomNotification;

/// Side effects requested by a room transition. They are carried out by the app layer in the
/// order they were returned.
#[derive(Debug, Clone, PartialEq)]
pub enum RoomEffect {
    Notify(RoomNotification),
    Private(PrivateConversationEvent),
    SendPresence(RoomPresenceRequest),
    /// (Re)schedules the next self-ping.
    ArmSelfPing,
    DisarmSelfPing,
    Rejoin(RejoinDecision),
    CancelRejoin,
}

/// Changes that private conversations with occupants of the room need to reflect.
#[derive(Debug, Clone, PartialEq)]
pub enum PrivateConversationEvent {
    UserLeft {
        nick: String,
        message: String,
    },
    UserRejoined {
        nick: String,
    },
    UserRenamed {
        old_nick: String,
        new_nick: String,
    },
    StatusChanged {
        nick: String,
        show: Availability,
        status: Option<String>,
    },
    OwnNickChanged {
        nick: String,
    },
    /// We are in the room again. Applies to all conversations of the room.
    RoomJoined {
        message: String,
    },
    /// We are no longer in the room. Applies to all conversations of the room.
    RoomLeft {
        message: String,
    },
}

/// Presences we send to the room. Show and status are added by the sender.
#[derive(Debug, Clone, PartialEq)]
pub enum RoomPresenceRequest {
    Join {
        occupant_id: OccupantId,
        password: Option<String>,
    },
    ChangeNick {
        occupant_id: OccupantId,
    },
    /// Broadcasts our changed show or status to the room.
    UpdateStatus {
        occupant_id: OccupantId,
    },
    Leave {
        occupant_id: OccupantId,
        status: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejoinDecision {
    Never,
    Immediately,
    After(Duration),
}
