// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashSet;

use crate::app::event_handlers::ClientEventDispatcherTrait;
use crate::domain::shared::models::RoomId;
use crate::{ClientDelegate, ClientEvent};

/// Forwards client events to the delegate.
///
/// A batch often reports the same room as changed several times, once per applied transition.
/// Only the last of these is delivered so that the UI redraws each room once per batch.
pub struct ClientEventDispatcher {
    delegate: Option<Box<dyn ClientDelegate>>,
}

impl ClientEventDispatcher {
    pub fn new(delegate: Option<Box<dyn ClientDelegate>>) -> Self {
        Self { delegate }
    }
}

impl ClientEventDispatcherTrait for ClientEventDispatcher {
    fn dispatch_events(&self, events: Vec<ClientEvent>) {
        let Some(delegate) = &self.delegate else {
            return;
        };
        for event in coalesce_room_changes(events) {
            delegate.handle_event(event)
        }
    }
}

fn coalesce_room_changes(events: Vec<ClientEvent>) -> Vec<ClientEvent> {
    let mut changed_later = HashSet::<RoomId>::new();
    let mut coalesced = events
        .into_iter()
        .rev()
        .filter(|event| match event {
            ClientEvent::RoomChanged { room_id } => changed_later.insert(room_id.clone()),
            ClientEvent::RoomNotification { .. } => true,
        })
        .collect::<Vec<_>>();
    coalesced.reverse();
    coalesced
}
