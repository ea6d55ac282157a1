// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Debug, Formatter};
use std::time::Duration;

use crate::domain::shared::models::RoomId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduledEventKind {
    SelfPing,
    Rejoin,
}

/// Posted back into the event loop once a scheduled delay has elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledEvent {
    pub room_id: RoomId,
    pub kind: ScheduledEventKind,
    /// Identifies the scheduling request, so that events of replaced tasks can be told apart.
    pub id: u64,
}

pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, event: ScheduledEvent) -> ScheduledTask;
}

/// Handle to a scheduled event. Cancelling is idempotent, dropping the handle cancels the task.
pub struct ScheduledTask {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl ScheduledTask {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel()
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_none()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel()
    }
}

impl Debug for ScheduledTask {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduledTask")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// At most one outstanding task of a given kind for a room.
#[derive(Debug)]
pub struct PendingTask {
    kind: ScheduledEventKind,
    task: Option<(u64, ScheduledTask)>,
    next_id: u64,
}

impl PendingTask {
    pub fn new(kind: ScheduledEventKind) -> Self {
        Self {
            kind,
            task: None,
            next_id: 0,
        }
    }

    /// Schedules the task, replacing an outstanding one.
    pub fn schedule(&mut self, scheduler: &dyn Scheduler, room_id: &RoomId, delay: Duration) {
        self.cancel();
        self.next_id += 1;
        let id = self.next_id;
        let task = scheduler.schedule(
            delay,
            ScheduledEvent {
                room_id: room_id.clone(),
                kind: self.kind,
                id,
            },
        );
        self.task = Some((id, task));
    }

    pub fn cancel(&mut self) {
        if let Some((_, mut task)) = self.task.take() {
            task.cancel()
        }
    }

    pub fn is_pending(&self) -> bool {
        self.task.is_some()
    }

    /// Marks the task identified by `id` as fired. Returns false for events of cancelled or
    /// replaced tasks.
    pub fn complete(&mut self, id: u64) -> bool {
        let is_current = matches!(&self.task, Some((current_id, _)) if *current_id == id);
        if is_current {
            self.task = None;
        }
        is_current
    }
}
