// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::ops::Deref;
use std::sync::Arc;

use anyhow::{bail, format_err, Result};
use minidom::Element;
use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::Notify;
use tracing::info;

use prose_term_xmpp::TimeProvider;

use crate::app::deps::{
    DynClientEventDispatcher, DynTimeProvider, MucEventSender, OwnPresence,
    SharedMucRoomsService,
};
use crate::app::event_handlers::{MucEvent, MucEventHandlerQueue};
use crate::app::services::{MucRoom, MucRoomsService};
use crate::client_builder::{MucClientBuilder, UndefinedConnection};
use crate::domain::private_conversations::models::PrivateConversationRef;
use crate::domain::rooms::models::RoomError;
use crate::domain::shared::models::{Availability, RoomId};
use crate::infra::xmpp::parse_stanza;
use crate::ClientEvent;

#[derive(Clone)]
pub struct MucClient {
    inner: Arc<MucClientInner>,
}

pub trait ClientDelegate: Send + Sync {
    fn handle_event(&self, event: ClientEvent);
}

impl MucClient {
    pub fn builder() -> MucClientBuilder<UndefinedConnection> {
        MucClientBuilder::new()
    }
}

pub struct MucClientInner {
    pub(crate) rooms: SharedMucRoomsService,
    pub(crate) handlers: MucEventHandlerQueue,
    pub(crate) client_event_dispatcher: DynClientEventDispatcher,
    pub(crate) time_provider: DynTimeProvider,
    pub(crate) events: MucEventSender,
    pub(crate) receiver: Mutex<Option<UnboundedReceiver<MucEvent>>>,
    pub(crate) shutdown: Notify,
}

impl From<Arc<MucClientInner>> for MucClient {
    fn from(inner: Arc<MucClientInner>) -> Self {
        MucClient { inner }
    }
}

impl Deref for MucClient {
    type Target = MucClientInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl MucClient {
    /// Processes queued events until `shutdown` is called. Only one loop can run at a time.
    pub async fn run(&self) -> Result<()> {
        let receiver = self.receiver.lock().take();
        let Some(mut receiver) = receiver else {
            bail!("The event loop is already running.")
        };

        info!("Starting MUC event loop.");
        loop {
            tokio::select! {
                _ = self.shutdown.notified() => break,
                event = receiver.recv() => {
                    let Some(event) = event else {
                        break;
                    };
                    self.handlers.handle_event(event).await;
                }
            }
        }
        info!("Stopped MUC event loop.");

        *self.receiver.lock() = Some(receiver);
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.receiver.lock().is_none()
    }

    pub fn shutdown(&self) {
        self.shutdown.notify_one()
    }

    /// Handles `event` right away, bypassing the queue. Returns false if no handler took it.
    pub async fn handle_event(&self, event: MucEvent) -> bool {
        self.handlers.handle_event(event).await.is_some()
    }

    /// Queues `event` for the event loop.
    pub fn send_event(&self, event: MucEvent) -> Result<()> {
        self.events
            .send(event)
            .map_err(|_| format_err!("The MUC event loop is gone."))
    }

    /// Parses an inbound stanza and queues the events it yields.
    pub fn receive_stanza(&self, stanza: Element) -> Result<()> {
        for event in parse_stanza(stanza, self.time_provider.now())? {
            self.send_event(event)?;
        }
        Ok(())
    }
}

impl MucClient {
    pub fn join_room(
        &self,
        room_id: &RoomId,
        nick: &str,
        password: Option<String>,
    ) -> Result<(), RoomError> {
        self.with_rooms(|rooms| rooms.join_room(room_id, nick, password))
    }

    pub fn leave_room(&self, room_id: &RoomId, reason: Option<String>) -> Result<(), RoomError> {
        self.with_rooms(|rooms| rooms.leave_room(room_id, reason))
    }

    pub fn close_room(&self, room_id: &RoomId, reason: Option<String>) -> Result<(), RoomError> {
        self.with_rooms(|rooms| rooms.close_room(room_id, reason))
    }

    pub fn cycle_room(&self, room_id: &RoomId, reason: Option<String>) -> Result<(), RoomError> {
        self.with_rooms(|rooms| rooms.cycle_room(room_id, reason))
    }

    pub fn change_nick(&self, room_id: &RoomId, nick: &str) -> Result<(), RoomError> {
        self.with_rooms(|rooms| rooms.change_nick(room_id, nick))
    }

    pub fn set_availability(&self, show: Availability, status: Option<String>) {
        self.with_rooms(|rooms| rooms.set_own_presence(OwnPresence { show, status }))
    }

    pub fn register_private_conversation(
        &self,
        conversation: &PrivateConversationRef,
    ) -> Result<(), RoomError> {
        self.with_rooms(|rooms| rooms.register_private_conversation(conversation))
    }

    /// Runs `f` with the room if we know about it.
    pub fn read_room<T>(&self, room_id: &RoomId, f: impl FnOnce(&MucRoom) -> T) -> Option<T> {
        self.rooms.lock().room(room_id).map(f)
    }

    pub fn joined_rooms(&self) -> Vec<RoomId> {
        self.rooms
            .lock()
            .rooms()
            .filter(|room| room.context().joined())
            .map(|room| room.room_id().clone())
            .collect()
    }

    fn with_rooms<T>(&self, f: impl FnOnce(&mut MucRoomsService) -> T) -> T {
        let (result, events) = {
            let mut rooms = self.rooms.lock();
            let result = f(&mut rooms);
            (result, rooms.take_client_events())
        };

        self.client_event_dispatcher.dispatch_events(events);
        result
    }
}
