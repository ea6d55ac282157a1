// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

use crate::app::deps::{DynClientEventDispatcher, SharedMucRoomsService};
use crate::app::event_handlers::{MucEvent, MucEventHandler};

/// Handles presences and room level failures.
pub struct RoomsEventHandler {
    rooms: SharedMucRoomsService,
    client_event_dispatcher: DynClientEventDispatcher,
}

impl RoomsEventHandler {
    pub fn new(
        rooms: SharedMucRoomsService,
        client_event_dispatcher: DynClientEventDispatcher,
    ) -> Self {
        Self {
            rooms,
            client_event_dispatcher,
        }
    }
}

#[async_trait]
impl MucEventHandler for RoomsEventHandler {
    fn name(&self) -> &'static str {
        "rooms"
    }

    async fn handle_event(&self, event: MucEvent) -> Result<Option<MucEvent>> {
        let events = {
            let mut rooms = self.rooms.lock();
            match event {
                MucEvent::Presence(presence) => rooms.handle_presence(presence),
                MucEvent::AdminActionFailed {
                    room_id,
                    action,
                    reason,
                } => rooms.handle_admin_action_failed(&room_id, &action, &reason),
                MucEvent::ConnectionLost => rooms.handle_connection_lost(),
                _ => return Ok(Some(event)),
            }
            rooms.take_client_events()
        };

        self.client_event_dispatcher.dispatch_events(events);
        Ok(None)
    }
}
