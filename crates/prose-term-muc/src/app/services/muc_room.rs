// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::vec_deque;
use std::collections::VecDeque;

use crate::app::deps::{PendingTask, ScheduledEventKind};
use crate::domain::rooms::models::{RoomContext, RoomNotification};
use crate::domain::settings::models::MucSettings;
use crate::domain::shared::models::RoomId;

use super::SelfPingMonitor;

/// The number of notifications a room keeps. Older ones are dropped first.
pub const MAX_NOTIFICATIONS: usize = 1000;

/// A room we joined or are joining, together with its timers and message log.
#[derive(Debug)]
pub struct MucRoom {
    pub(crate) context: RoomContext,
    pub(crate) settings: MucSettings,
    pub(crate) self_ping: SelfPingMonitor,
    pub(crate) rejoin: PendingTask,
    notifications: VecDeque<RoomNotification>,
}

impl MucRoom {
    pub(crate) fn new(
        room_id: RoomId,
        nick: impl Into<String>,
        password: Option<String>,
        settings: MucSettings,
    ) -> Self {
        Self {
            context: RoomContext::new(room_id, nick, password),
            self_ping: SelfPingMonitor::new(&settings),
            settings,
            rejoin: PendingTask::new(ScheduledEventKind::Rejoin),
            notifications: VecDeque::new(),
        }
    }

    pub fn room_id(&self) -> &RoomId {
        self.context.room_id()
    }

    pub fn context(&self) -> &RoomContext {
        &self.context
    }

    pub fn settings(&self) -> &MucSettings {
        &self.settings
    }

    /// The latest notifications of the room, oldest first.
    pub fn notifications(&self) -> vec_deque::Iter<'_, RoomNotification> {
        self.notifications.iter()
    }

    pub(crate) fn push_notification(&mut self, notification: RoomNotification) {
        if self.notifications.len() == MAX_NOTIFICATIONS {
            self.notifications.pop_front();
        }
        self.notifications.push_back(notification);
    }

    pub fn is_self_ping_armed(&self) -> bool {
        self.self_ping.is_armed()
    }

    pub fn is_rejoin_pending(&self) -> bool {
        self.rejoin.is_pending()
    }
}
