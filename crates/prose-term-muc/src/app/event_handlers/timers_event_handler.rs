// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

use crate::app::deps::{DynClientEventDispatcher, SharedMucRoomsService};
use crate::app::event_handlers::{MucEvent, MucEventHandler};

/// Handles elapsed delays and the self-pings they trigger.
pub struct TimersEventHandler {
    rooms: SharedMucRoomsService,
    client_event_dispatcher: DynClientEventDispatcher,
}

impl TimersEventHandler {
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
impl MucEventHandler for TimersEventHandler {
    fn name(&self) -> &'static str {
        "timers"
    }

    async fn handle_event(&self, event: MucEvent) -> Result<Option<MucEvent>> {
        let events = {
            let mut rooms = self.rooms.lock();
            match event {
                MucEvent::Scheduled(event) => rooms.handle_scheduled_event(event),
                MucEvent::SelfPingResult {
                    occupant_id,
                    ping_id,
                    result,
                } => rooms.handle_self_ping_result(&occupant_id, ping_id, result),
                _ => return Ok(Some(event)),
            }
            rooms.take_client_events()
        };

        self.client_event_dispatcher.dispatch_events(events);
        Ok(None)
    }
}
