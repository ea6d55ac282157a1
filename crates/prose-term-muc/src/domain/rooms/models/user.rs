// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::cmp::Ordering;

use chrono::{DateTime, Duration, Utc};
use jid::Jid;

use crate::domain::shared::models::Availability;

use super::{NickColor, RoomAffiliation, RoomRole};

/// An occupant of a room as seen through its presences.
///
/// Two users are equal if their nicknames are equal. Users order by their case-folded
/// nickname, falling back to the raw nickname so that the order stays total.
#[derive(Debug, Clone)]
pub struct User {
    nick: String,
    sort_key: String,
    affiliation: RoomAffiliation,
    role: RoomRole,
    show: Availability,
    status: Option<String>,
    /// The real JID of the occupant. Only available in non-anonymous rooms.
    jid: Option<Jid>,
    color: NickColor,
    last_talked: DateTime<Utc>,
}

impl User {
    pub fn new(
        nick: impl Into<String>,
        affiliation: RoomAffiliation,
        role: RoomRole,
        show: Availability,
        status: Option<String>,
        jid: Option<Jid>,
        color: NickColor,
    ) -> Self {
        let nick = nick.into();
        Self {
            sort_key: nick.to_lowercase(),
            nick,
            affiliation,
            role,
            show,
            status,
            jid,
            color,
            last_talked: DateTime::<Utc>::MIN_UTC,
        }
    }

    pub fn nick(&self) -> &str {
        &self.nick
    }

    pub fn affiliation(&self) -> RoomAffiliation {
        self.affiliation
    }

    pub fn role(&self) -> RoomRole {
        self.role
    }

    pub fn show(&self) -> Availability {
        self.show
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn jid(&self) -> Option<&Jid> {
        self.jid.as_ref()
    }

    pub fn color(&self) -> NickColor {
        self.color
    }

    pub fn last_talked(&self) -> DateTime<Utc> {
        self.last_talked
    }

    pub(crate) fn sort_key(&self) -> (&str, &str) {
        (&self.sort_key, &self.nick)
    }

    /// Replaces the presence derived attributes. Nickname, JID and color are left untouched.
    pub(crate) fn update(
        &mut self,
        affiliation: RoomAffiliation,
        role: RoomRole,
        show: Availability,
        status: Option<String>,
    ) {
        self.affiliation = affiliation;
        self.role = role;
        self.show = show;
        self.status = status;
    }

    /// Changes the nickname. Callers holding the user in a sorted collection must re-sort.
    pub(crate) fn change_nick(&mut self, nick: impl Into<String>) {
        self.nick = nick.into();
        self.sort_key = self.nick.to_lowercase();
    }

    /// Sets the color. With `deterministic` the color is derived from the nickname and the
    /// argument is ignored; without a color a random one is picked.
    pub fn change_color(&mut self, color: Option<NickColor>, deterministic: bool) {
        self.color = match (deterministic, color) {
            (true, _) => NickColor::deterministic(&self.nick),
            (false, Some(color)) => color,
            (false, None) => NickColor::random(),
        }
    }

    /// Moves `last_talked` forward. Older timestamps are ignored.
    pub(crate) fn set_last_talked(&mut self, time: DateTime<Utc>) {
        if time > self.last_talked {
            self.last_talked = time;
        }
    }

    /// Returns true if the user sent a message within the last `seconds` before `now`.
    /// Negative values mean "always".
    pub fn has_talked_since(&self, seconds: i64, now: DateTime<Utc>) -> bool {
        if seconds < 0 {
            return true;
        }
        // Windows too large for a `Duration` cover every possible timestamp.
        match Duration::try_seconds(seconds) {
            Some(window) => now.signed_duration_since(self.last_talked) <= window,
            None => true,
        }
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.nick == other.nick
    }
}

impl Eq for User {}

impl PartialOrd for User {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for User {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key
            .cmp(&other.sort_key)
            .then_with(|| self.nick.cmp(&other.nick))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn user(nick: &str) -> User {
        User::new(
            nick,
            RoomAffiliation::None,
            RoomRole::Participant,
            Availability::Available,
            None,
            None,
            NickColor::deterministic(nick),
        )
    }

    fn time(sec: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, sec).unwrap()
    }

    #[test]
    fn test_new_user_has_never_talked() {
        let user = user("alice");
        assert_eq!(user.last_talked(), DateTime::<Utc>::MIN_UTC);
        assert!(!user.has_talked_since(120, time(0)));
        assert!(user.has_talked_since(-1, time(0)));
    }

    #[test]
    fn test_last_talked_only_moves_forward() {
        let mut user = user("alice");
        user.set_last_talked(time(30));
        user.set_last_talked(time(10));
        assert_eq!(user.last_talked(), time(30));

        assert!(user.has_talked_since(5, time(35)));
        assert!(!user.has_talked_since(4, time(35)));
        assert!(user.has_talked_since(0, time(30)));
    }

    #[test]
    fn test_huge_window_always_matches() {
        let mut user = user("alice");
        assert!(user.has_talked_since(i64::MAX, time(0)));

        user.set_last_talked(time(0));
        assert!(user.has_talked_since(10_000_000_000_000_000, time(30)));
    }

    #[test]
    fn test_ordering_is_case_insensitive_and_total() {
        let mut users = vec![user("bob"), user("Alice"), user("alice"), user("Carol")];
        users.sort();
        let nicks = users.iter().map(User::nick).collect::<Vec<_>>();
        assert_eq!(nicks, vec!["Alice", "alice", "bob", "Carol"]);

        assert_ne!(user("Alice"), user("alice"));
        assert_eq!(user("alice"), user("alice"));
    }

    #[test]
    fn test_update_keeps_identity() {
        let mut user = user("alice");
        let color = user.color();
        user.update(
            RoomAffiliation::Member,
            RoomRole::Moderator,
            Availability::Away,
            Some("lunch".to_string()),
        );

        assert_eq!(user.nick(), "alice");
        assert_eq!(user.color(), color);
        assert_eq!(user.role(), RoomRole::Moderator);
        assert_eq!(user.status(), Some("lunch"));
    }

    #[test]
    fn test_change_color() {
        let mut user = user("alice");
        user.change_color(Some(NickColor(42)), false);
        assert_eq!(user.color(), NickColor(42));

        user.change_color(Some(NickColor(42)), true);
        assert_eq!(user.color(), NickColor::deterministic("alice"));
    }
}
