// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};

use prose_term_xmpp::RequestError;

use crate::app::deps::ScheduledEvent;
use crate::domain::rooms::models::MucPresence;
use crate::domain::shared::models::{OccupantId, RoomId};

/// Everything that drives the rooms, delivered through a single channel.
#[derive(Debug)]
pub enum MucEvent {
    /// A presence from an occupant of a room.
    Presence(MucPresence),
    /// A live groupchat message was received.
    Message(MessageActivity),
    /// A delay requested through the `Scheduler` elapsed.
    Scheduled(ScheduledEvent),
    /// The response (or lack thereof) to a self-ping.
    SelfPingResult {
        occupant_id: OccupantId,
        ping_id: u64,
        result: Result<(), RequestError>,
    },
    /// A kick, ban, role or affiliation change we requested was rejected.
    AdminActionFailed {
        room_id: RoomId,
        action: String,
        reason: String,
    },
    /// The connection to the server is gone.
    ConnectionLost,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageActivity {
    pub occupant_id: OccupantId,
    pub timestamp: DateTime<Utc>,
}
