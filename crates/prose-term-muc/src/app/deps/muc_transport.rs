// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::time::Duration;

use prose_term_xmpp::RequestError;

use crate::domain::rooms::models::RoomPresenceRequest;
use crate::domain::shared::models::{Availability, OccupantId};

/// Our own availability, sent along with join and nickname change presences.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OwnPresence {
    pub show: Availability,
    pub status: Option<String>,
}

/// The outgoing side of the XMPP connection as far as rooms are concerned.
pub trait MucTransport: Send + Sync {
    fn send_presence(
        &self,
        request: &RoomPresenceRequest,
        own_presence: &OwnPresence,
    ) -> Result<(), RequestError>;

    /// Sends a XEP-0410 self-ping to `occupant_id`. The result arrives later as a
    /// `MucEvent::SelfPingResult` carrying `ping_id`.
    fn send_self_ping(
        &self,
        occupant_id: &OccupantId,
        ping_id: u64,
        timeout: Duration,
    ) -> Result<(), RequestError>;
}
