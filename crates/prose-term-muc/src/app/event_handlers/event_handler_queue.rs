// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use tracing::{debug, error, warn};

use crate::app::event_handlers::{MucEvent, MucEventHandler};

/// Offers each event to the handlers in order until one of them consumes it.
pub(crate) struct MucEventHandlerQueue {
    handlers: Vec<Box<dyn MucEventHandler>>,
}

impl MucEventHandlerQueue {
    pub fn new(handlers: Vec<Box<dyn MucEventHandler>>) -> Self {
        Self { handlers }
    }

    /// Returns the name of the handler that consumed `event`. A failing handler consumes the
    /// event as well, it is not offered to the remaining handlers.
    pub async fn handle_event(&self, event: MucEvent) -> Option<&'static str> {
        let mut pending = event;

        for handler in &self.handlers {
            pending = match handler.handle_event(pending).await {
                Ok(Some(event)) => event,
                Ok(None) => {
                    debug!("MUC event handled by '{}'.", handler.name());
                    return Some(handler.name());
                }
                Err(err) => {
                    error!("MUC event handler '{}' failed: {:#}", handler.name(), err);
                    return Some(handler.name());
                }
            };
        }

        warn!("No handler for MUC event {:?}.", pending);
        None
    }
}
