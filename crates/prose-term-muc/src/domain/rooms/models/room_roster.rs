// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};

use crate::domain::shared::models::Availability;

use super::{NickColor, RoomAffiliation, RoomError, RoomRole, User};

/// The occupants of a room, kept sorted by nickname and unique by nickname.
#[derive(Debug, Default, Clone)]
pub struct RoomRoster {
    users: Vec<User>,
}

impl RoomRoster {
    /// Inserts `user` at its sorted position. Returns false and leaves the roster untouched if a
    /// user with the same nickname exists.
    pub fn add(&mut self, user: User) -> bool {
        match self.position(user.nick()) {
            Ok(_) => false,
            Err(idx) => {
                self.users.insert(idx, user);
                true
            }
        }
    }

    pub fn remove(&mut self, nick: &str) -> Result<User, RoomError> {
        let idx = self.index_of(nick)?;
        Ok(self.users.remove(idx))
    }

    /// Changes the nickname of `old_nick` to `new_nick` and moves the user to its new position.
    pub fn rename(&mut self, old_nick: &str, new_nick: &str) -> Result<&User, RoomError> {
        let idx = self.index_of(old_nick)?;
        if old_nick != new_nick && self.find(new_nick).is_some() {
            return Err(RoomError::InvalidRename {
                old_nick: old_nick.to_string(),
                new_nick: new_nick.to_string(),
            });
        }

        let mut user = self.users.remove(idx);
        user.change_nick(new_nick);
        let idx = self.position(user.nick()).unwrap_or_else(|idx| idx);
        self.users.insert(idx, user);
        Ok(&self.users[idx])
    }

    pub fn find(&self, nick: &str) -> Option<&User> {
        self.position(nick).ok().map(|idx| &self.users[idx])
    }

    pub fn contains(&self, nick: &str) -> bool {
        self.position(nick).is_ok()
    }

    /// Replaces the presence derived attributes of `nick`.
    pub fn update(
        &mut self,
        nick: &str,
        affiliation: RoomAffiliation,
        role: RoomRole,
        show: Availability,
        status: Option<String>,
    ) -> Result<&User, RoomError> {
        let idx = self.index_of(nick)?;
        let user = &mut self.users[idx];
        user.update(affiliation, role, show, status);
        Ok(user)
    }

    pub fn change_color(
        &mut self,
        nick: &str,
        color: Option<NickColor>,
        deterministic: bool,
    ) -> Result<(), RoomError> {
        let idx = self.index_of(nick)?;
        self.users[idx].change_color(color, deterministic);
        Ok(())
    }

    pub fn set_last_talked(&mut self, nick: &str, time: DateTime<Utc>) -> Result<(), RoomError> {
        let idx = self.index_of(nick)?;
        self.users[idx].set_last_talked(time);
        Ok(())
    }

    /// The users in order. The roster cannot change while the iterator is alive.
    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn clear(&mut self) {
        self.users.clear()
    }

    fn index_of(&self, nick: &str) -> Result<usize, RoomError> {
        self.position(nick).map_err(|_| RoomError::UserNotFound {
            nick: nick.to_string(),
        })
    }

    fn position(&self, nick: &str) -> Result<usize, usize> {
        let key = (nick.to_lowercase(), nick);
        self.users
            .binary_search_by(|user| user.sort_key().cmp(&(key.0.as_str(), key.1)))
    }
}
