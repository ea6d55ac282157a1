// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

use crate::app::deps::{DynClientEventDispatcher, SharedMucRoomsService};
use crate::app::event_handlers::{MucEvent, MucEventHandler};

/// Tracks who talked when, which drives the notice suppression windows.
pub struct MessagesEventHandler {
    rooms: SharedMucRoomsService,
    client_event_dispatcher: DynClientEventDispatcher,
}

impl MessagesEventHandler {
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
impl MucEventHandler for MessagesEventHandler {
    fn name(&self) -> &'static str {
        "messages"
    }

    async fn handle_event(&self, event: MucEvent) -> Result<Option<MucEvent>> {
        let MucEvent::Message(activity) = event else {
            return Ok(Some(event));
        };

        let events = {
            let mut rooms = self.rooms.lock();
            rooms.handle_message_activity(&activity.occupant_id, activity.timestamp);
            rooms.take_client_events()
        };

        self.client_event_dispatcher.dispatch_events(events);
        Ok(None)
    }
}
