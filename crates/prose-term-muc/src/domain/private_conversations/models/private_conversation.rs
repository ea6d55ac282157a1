// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::rooms::models::RoomError;
use crate::domain::shared::models::{Availability, OccupantId};

pub type PrivateConversationRef = Arc<RwLock<PrivateConversation>>;

/// A one-to-one conversation with an occupant of a room, addressed through the room.
#[derive(Debug, Clone, PartialEq)]
pub struct PrivateConversation {
    occupant_id: OccupantId,
    own_nick: String,
    active: bool,
    show: Availability,
    status: Option<String>,
    info_messages: Vec<String>,
}

impl PrivateConversation {
    pub fn new(occupant_id: OccupantId, own_nick: impl Into<String>) -> Self {
        Self {
            occupant_id,
            own_nick: own_nick.into(),
            active: true,
            show: Availability::Available,
            status: None,
            info_messages: vec![],
        }
    }

    pub fn into_ref(self) -> PrivateConversationRef {
        Arc::new(RwLock::new(self))
    }

    pub fn occupant_id(&self) -> &OccupantId {
        &self.occupant_id
    }

    pub fn nickname(&self) -> &str {
        self.occupant_id.nickname()
    }

    /// Our nickname in the room the conversation goes through.
    pub fn own_nick(&self) -> &str {
        &self.own_nick
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn show(&self) -> Availability {
        self.show
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// The informational lines shown in the conversation, oldest first.
    pub fn info_messages(&self) -> &[String] {
        &self.info_messages
    }

    /// Messages can only be sent while both we and the peer are in the room.
    pub fn check_can_send(&self) -> Result<(), RoomError> {
        if !self.active {
            return Err(RoomError::ConversationInactive(self.occupant_id.clone()));
        }
        Ok(())
    }

    pub fn activate(&mut self, reason: Option<String>) {
        self.active = true;
        self.push_info(reason);
    }

    pub fn deactivate(&mut self, reason: Option<String>) {
        self.active = false;
        self.push_info(reason);
    }

    /// The peer left the room.
    pub fn user_left(&mut self, message: impl Into<String>) {
        self.deactivate(Some(message.into()));
    }

    /// Somebody with the peer's nickname joined the room.
    pub fn user_rejoined(&mut self) {
        let message = format!("{} joined the room", self.nickname());
        self.activate(Some(message));
    }

    /// The peer changed their nickname. The conversation follows the new occupant id.
    pub fn rename(&mut self, new_nick: &str) -> Result<(), RoomError> {
        let occupant_id = self.occupant_id.with_nickname(new_nick)?;
        let message = format!("{} is now known as {}", self.nickname(), new_nick);
        self.occupant_id = occupant_id;
        self.push_info(Some(message));
        Ok(())
    }

    pub fn set_own_nick(&mut self, nick: impl Into<String>) {
        self.own_nick = nick.into();
    }

    pub fn update_status(&mut self, show: Availability, status: Option<String>) {
        let message = match &status {
            Some(status) => format!("{} is now {} ({})", self.nickname(), show, status),
            None => format!("{} is now {}", self.nickname(), show),
        };
        self.show = show;
        self.status = status;
        self.push_info(Some(message));
    }

    fn push_info(&mut self, message: Option<String>) {
        if let Some(message) = message.filter(|message| !message.is_empty()) {
            self.info_messages.push(message);
        }
    }
}
