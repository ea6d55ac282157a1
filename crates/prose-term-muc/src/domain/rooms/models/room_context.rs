// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};

use crate::domain::shared::models::{OccupantId, RoomId};

use super::{PresenceBuffer, RoomError, RoomRoster, User};

/// The membership state of a single room.
///
/// `joined` is true exactly when the roster contains a user named `own_nick`.
#[derive(Debug, Clone)]
pub struct RoomContext {
    room_id: RoomId,
    pub(crate) own_nick: String,
    pub(crate) password: Option<String>,
    pub(crate) joined: bool,
    pub(crate) roster: RoomRoster,
    pub(crate) presence_buffer: PresenceBuffer,
    pub(crate) lagged: bool,
    pub(crate) last_connection: Option<DateTime<Utc>>,
}

impl RoomContext {
    pub fn new(room_id: RoomId, own_nick: impl Into<String>, password: Option<String>) -> Self {
        Self {
            room_id,
            own_nick: own_nick.into(),
            password,
            joined: false,
            roster: Default::default(),
            presence_buffer: Default::default(),
            lagged: false,
            last_connection: None,
        }
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn own_nick(&self) -> &str {
        &self.own_nick
    }

    pub fn own_occupant_id(&self) -> Result<OccupantId, RoomError> {
        Ok(self.room_id.occupant_id_with_nickname(&self.own_nick)?)
    }

    /// Our own entry in the roster. Only available while joined.
    pub fn own_user(&self) -> Option<&User> {
        if !self.joined {
            return None;
        }
        self.roster.find(&self.own_nick)
    }

    pub fn joined(&self) -> bool {
        self.joined
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    pub fn roster(&self) -> &RoomRoster {
        &self.roster
    }

    pub fn presence_buffer(&self) -> &PresenceBuffer {
        &self.presence_buffer
    }

    /// True while the room does not answer our self-pings.
    pub fn lagged(&self) -> bool {
        self.lagged
    }

    /// When we last completed a join.
    pub fn last_connection(&self) -> Option<DateTime<Utc>> {
        self.last_connection
    }

    pub fn is_own_nick(&self, nick: &str) -> bool {
        self.own_nick == nick
    }

    /// Leaves the room locally. Clears the roster and the presence buffer.
    pub(crate) fn disconnect(&mut self) {
        self.roster.clear();
        self.presence_buffer.clear();
        self.joined = false;
    }

    pub(crate) fn is_consistent(&self) -> bool {
        self.joined == self.roster.contains(&self.own_nick)
    }
}
