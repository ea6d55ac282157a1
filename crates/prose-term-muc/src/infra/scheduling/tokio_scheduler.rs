// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::time::Duration;

use tracing::debug;

use crate::app::deps::{MucEventSender, ScheduledEvent, ScheduledTask, Scheduler};
use crate::app::event_handlers::MucEvent;

/// Posts scheduled events into the event loop from a sleeping tokio task.
pub struct TokioScheduler {
    events: MucEventSender,
}

impl TokioScheduler {
    pub fn new(events: MucEventSender) -> Self {
        Self { events }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, event: ScheduledEvent) -> ScheduledTask {
        let events = self.events.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if events.send(MucEvent::Scheduled(event)).is_err() {
                debug!("Dropping scheduled event, the event loop is gone.");
            }
        });
        ScheduledTask::new(move || handle.abort())
    }
}
