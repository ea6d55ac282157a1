// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::domain::private_conversations::models::{
    PrivateConversation, PrivateConversationRef,
};
use crate::domain::rooms::models::PrivateConversationEvent;
use crate::domain::shared::models::{Availability, OccupantId, RoomId};

/// Forwards room events to the private conversations that are open with its occupants.
///
/// The bridge only holds weak references. Conversations are owned by whoever displays them
/// and disappear from the bridge once they are dropped.
#[derive(Debug, Default)]
pub struct PrivateConversationBridge {
    conversations: HashMap<OccupantId, Weak<RwLock<PrivateConversation>>>,
}

impl PrivateConversationBridge {
    pub fn register(&mut self, conversation: &PrivateConversationRef) {
        let occupant_id = conversation.read().occupant_id().clone();
        self.conversations
            .insert(occupant_id, Arc::downgrade(conversation));
    }

    pub fn conversation(&mut self, occupant_id: &OccupantId) -> Option<PrivateConversationRef> {
        let conversation = self.conversations.get(occupant_id)?.upgrade();
        if conversation.is_none() {
            self.conversations.remove(occupant_id);
        }
        conversation
    }

    /// Number of live conversations.
    pub fn len(&mut self) -> usize {
        self.prune();
        self.conversations.len()
    }

    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    pub fn handle_event(&mut self, room_id: &RoomId, event: PrivateConversationEvent) {
        match event {
            PrivateConversationEvent::UserLeft { nick, message } => {
                self.user_left(room_id, &nick, message)
            }
            PrivateConversationEvent::UserRejoined { nick } => self.user_rejoined(room_id, &nick),
            PrivateConversationEvent::UserRenamed { old_nick, new_nick } => {
                self.rename_user(room_id, &old_nick, &new_nick)
            }
            PrivateConversationEvent::StatusChanged { nick, show, status } => {
                self.status_changed(room_id, &nick, show, status)
            }
            PrivateConversationEvent::OwnNickChanged { nick } => {
                self.own_nick_changed(room_id, &nick)
            }
            PrivateConversationEvent::RoomJoined { message } => self.enable_room(room_id, &message),
            PrivateConversationEvent::RoomLeft { message } => self.disable_room(room_id, &message),
        }
    }

    pub fn user_left(&mut self, room_id: &RoomId, nick: &str, message: String) {
        if let Some(conversation) = self.lookup(room_id, nick) {
            conversation.write().user_left(message);
        }
    }

    pub fn user_rejoined(&mut self, room_id: &RoomId, nick: &str) {
        if let Some(conversation) = self.lookup(room_id, nick) {
            conversation.write().user_rejoined();
        }
    }

    pub fn rename_user(&mut self, room_id: &RoomId, old_nick: &str, new_nick: &str) {
        let Ok(old_id) = room_id.occupant_id_with_nickname(old_nick) else {
            return;
        };
        let Some(conversation) = self.conversation(&old_id) else {
            return;
        };

        if let Err(err) = conversation.write().rename(new_nick) {
            warn!("Could not rename conversation with {}: {}", old_id, err);
            return;
        }

        self.conversations.remove(&old_id);
        self.register(&conversation);
    }

    pub fn status_changed(
        &mut self,
        room_id: &RoomId,
        nick: &str,
        show: Availability,
        status: Option<String>,
    ) {
        if let Some(conversation) = self.lookup(room_id, nick) {
            conversation.write().update_status(show, status);
        }
    }

    pub fn own_nick_changed(&mut self, room_id: &RoomId, nick: &str) {
        for conversation in self.conversations_in_room(room_id) {
            conversation.write().set_own_nick(nick);
        }
    }

    /// Re-enables all conversations of a room we (re)joined.
    pub fn enable_room(&mut self, room_id: &RoomId, message: &str) {
        for conversation in self.conversations_in_room(room_id) {
            conversation.write().activate(Some(message.to_string()));
        }
    }

    /// Disables all conversations of a room we are no longer in.
    pub fn disable_room(&mut self, room_id: &RoomId, message: &str) {
        for conversation in self.conversations_in_room(room_id) {
            conversation.write().deactivate(Some(message.to_string()));
        }
    }

    fn lookup(&mut self, room_id: &RoomId, nick: &str) -> Option<PrivateConversationRef> {
        let occupant_id = room_id.occupant_id_with_nickname(nick).ok()?;
        self.conversation(&occupant_id)
    }

    fn conversations_in_room(&mut self, room_id: &RoomId) -> Vec<PrivateConversationRef> {
        self.prune();
        self.conversations
            .iter()
            .filter(|(occupant_id, _)| room_id.contains(occupant_id))
            .filter_map(|(_, conversation)| conversation.upgrade())
            .collect()
    }

    fn prune(&mut self) {
        let count = self.conversations.len();
        self.conversations
            .retain(|_, conversation| conversation.strong_count() > 0);
        if count != self.conversations.len() {
            debug!(
                "Dropped {} closed private conversations.",
                count - self.conversations.len()
            );
        }
    }
}
