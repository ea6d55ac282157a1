// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use async_trait::async_trait;

pub use client_event_dispatcher::ClientEventDispatcher;
pub(crate) use event_handler_queue::MucEventHandlerQueue;
pub use messages_event_handler::MessagesEventHandler;
pub use muc_event::{MessageActivity, MucEvent};
pub use rooms_event_handler::RoomsEventHandler;
pub use timers_event_handler::TimersEventHandler;

use crate::ClientEvent;

mod client_event_dispatcher;
mod event_handler_queue;
mod messages_event_handler;
mod muc_event;
mod rooms_event_handler;
mod timers_event_handler;

/// `MucEventHandler` is a trait representing a handler for events of the room event loop.
///
/// If the handler returns `None`, the event has been consumed. If it returns `Some(event)`,
/// the event is passed on to the next handler.
#[async_trait]
pub trait MucEventHandler: Send + Sync {
    fn name(&self) -> &'static str;
    async fn handle_event(&self, event: MucEvent) -> Result<Option<MucEvent>>;
}

/// Hands the events produced while handling a single `MucEvent` or API call to the delegate.
pub trait ClientEventDispatcherTrait: Send + Sync {
    fn dispatch_events(&self, events: Vec<ClientEvent>);
}
