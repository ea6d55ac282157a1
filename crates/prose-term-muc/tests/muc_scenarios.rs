// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;

use prose_term_muc::app::deps::{OwnPresence, ScheduledEventKind};
use prose_term_muc::app::services::{MucRoom, MucRoomsService};
use prose_term_muc::domain::private_conversations::models::{
    PrivateConversation, PrivateConversationRef,
};
use prose_term_muc::domain::rooms::models::{
    MucPresence, NotificationKind, RoomAffiliation, RoomError, RoomPresenceRequest, RoomRole,
};
use prose_term_muc::domain::settings::models::{MucConfig, MucSettings};
use prose_term_muc::domain::shared::models::{Availability, OccupantId, RoomId};
use prose_term_muc::room_id;
use prose_term_muc::test::{ManualScheduler, RecordingTransport};
use prose_term_xmpp::stanza::StatusCode;
use prose_term_xmpp::test::ConstantTimeProvider;
use prose_term_xmpp::RequestError;

struct Fixture {
    service: MucRoomsService,
    transport: Arc<RecordingTransport>,
    scheduler: Arc<ManualScheduler>,
    time: Arc<ConstantTimeProvider>,
    room_id: RoomId,
    seen_notifications: usize,
}

impl Fixture {
    fn new(settings: MucSettings) -> Self {
        let transport = Arc::new(RecordingTransport::default());
        let scheduler = Arc::new(ManualScheduler::default());
        let time = Arc::new(ConstantTimeProvider::ymd_hms(2023, 6, 1, 12, 0, 0));

        Self {
            service: MucRoomsService::new(
                MucConfig::new(settings),
                transport.clone(),
                scheduler.clone(),
                time.clone(),
            ),
            transport,
            scheduler,
            time,
            room_id: room_id!("room@conference.prose.org"),
            seen_notifications: 0,
        }
    }

    fn occupant(&self, nick: &str) -> OccupantId {
        self.room_id.occupant_id_with_nickname(nick).unwrap()
    }

    fn available(&self, nick: &str) -> MucPresence {
        MucPresence::available(self.occupant(nick))
            .with_affiliation("member")
            .with_role("participant")
    }

    fn unavailable(&self, nick: &str) -> MucPresence {
        MucPresence::unavailable(self.occupant(nick))
            .with_affiliation("member")
            .with_role("none")
    }

    fn self_presence(&self, nick: &str) -> MucPresence {
        self.available(nick)
            .with_status_codes([StatusCode::SELF_PRESENCE])
    }

    /// Joins as "me" with "alice" already in the room.
    fn joined(settings: MucSettings) -> Self {
        let mut fixture = Self::new(settings);
        fixture.join("me");
        fixture.presence(fixture.available("alice"));
        fixture.presence(fixture.self_presence("me"));
        fixture.new_notifications();
        fixture.transport.take_presences();
        fixture
    }

    fn join(&mut self, nick: &str) {
        let room_id = self.room_id.clone();
        self.service.join_room(&room_id, nick, None).unwrap();
    }

    fn presence(&mut self, presence: MucPresence) {
        self.service.handle_presence(presence)
    }

    fn room(&self) -> &MucRoom {
        self.service.room(&self.room_id).expect("Room does not exist")
    }

    fn nicks(&self) -> Vec<String> {
        self.room()
            .context()
            .roster()
            .iter()
            .map(|user| user.nick().to_string())
            .collect()
    }

    /// The notification texts added since the last call.
    fn new_notifications(&mut self) -> Vec<String> {
        let notifications = self
            .room()
            .notifications()
            .skip(self.seen_notifications)
            .map(|notification| notification.text.clone())
            .collect::<Vec<_>>();
        self.seen_notifications += notifications.len();
        notifications
    }

    fn conversation(&mut self, nick: &str) -> PrivateConversationRef {
        let conversation = PrivateConversation::new(self.occupant(nick), "me").into_ref();
        self.service
            .register_private_conversation(&conversation)
            .unwrap();
        conversation
    }

    fn is_pending(&self, kind: ScheduledEventKind) -> bool {
        self.scheduler.is_pending(&self.room_id, kind)
    }

    /// Sends the scheduled self-ping and returns its id.
    fn fire_self_ping(&mut self) -> u64 {
        let (_, event) = self
            .scheduler
            .pending(&self.room_id, ScheduledEventKind::SelfPing)
            .expect("Expected a scheduled self-ping");
        let ping_id = event.id;
        self.service.handle_scheduled_event(event);
        ping_id
    }
}

fn autorejoin_settings(delay: i64) -> MucSettings {
    MucSettings {
        autorejoin: true,
        autorejoin_delay: delay,
        self_ping_interval: 60,
        ..Default::default()
    }
}

#[test]
fn test_presences_before_own_join_are_buffered() {
    let mut fixture = Fixture::new(MucSettings::default());
    fixture.join("me");

    assert_eq!(
        fixture.transport.take_presences(),
        vec![RoomPresenceRequest::Join {
            occupant_id: fixture.occupant("me"),
            password: None,
        }]
    );

    fixture.presence(fixture.available("bob"));
    fixture.presence(fixture.available("alice"));
    fixture.presence(fixture.available("carol"));
    fixture.presence(fixture.unavailable("carol"));

    assert!(!fixture.room().context().joined());
    assert_eq!(fixture.room().context().presence_buffer().len(), 4);
    assert!(fixture.nicks().is_empty());

    fixture.presence(
        fixture
            .self_presence("me")
            .with_status_codes([StatusCode::ROOM_HAS_BEEN_CREATED]),
    );

    assert!(fixture.room().context().joined());
    assert!(fixture.room().context().presence_buffer().is_empty());
    assert_eq!(fixture.nicks(), vec!["alice", "bob", "me"]);
    assert_eq!(
        fixture.room().context().own_user().map(|user| user.nick()),
        Some("me")
    );
    assert_eq!(
        fixture.new_notifications(),
        vec![
            "You (me) joined the room".to_string(),
            "Info: The room has been created".to_string()
        ]
    );
    assert_eq!(
        fixture.room().context().last_connection(),
        Some(*fixture.time.time.lock())
    );
}

#[test]
fn test_server_assigned_nickname() {
    let mut fixture = Fixture::new(MucSettings::default());
    fixture.join("me");
    let conversation = fixture.conversation("alice");
    assert!(!conversation.read().is_active());
    fixture.presence(
        fixture
            .self_presence("me_")
            .with_status_codes([StatusCode::ASSIGNED_NICK]),
    );

    assert!(fixture.room().context().joined());
    assert_eq!(fixture.room().context().own_nick(), "me_");
    assert_eq!(conversation.read().own_nick(), "me_");
    assert!(conversation.read().is_active());
}

#[test]
fn test_kicked_with_autorejoin_delay() {
    let mut fixture = Fixture::joined(autorejoin_settings(5));
    let alice = fixture.conversation("alice");
    assert!(fixture.is_pending(ScheduledEventKind::SelfPing));

    fixture.presence(
        fixture
            .unavailable("me")
            .with_status_codes([StatusCode::KICKED, StatusCode::SELF_PRESENCE])
            .with_actor("dave")
            .with_reason("spam"),
    );

    assert!(!fixture.room().context().joined());
    assert!(fixture.nicks().is_empty());
    assert_eq!(
        fixture.new_notifications(),
        vec!["You have been kicked by dave Reason: spam".to_string()]
    );
    assert!(!fixture.is_pending(ScheduledEventKind::SelfPing));
    assert!(!alice.read().is_active());

    let (delay, event) = fixture
        .scheduler
        .pending(&fixture.room_id, ScheduledEventKind::Rejoin)
        .expect("Expected a scheduled rejoin");
    assert_eq!(delay, Duration::from_secs(5));
    assert!(fixture.transport.take_presences().is_empty());

    fixture.service.handle_scheduled_event(event.clone());
    assert_eq!(
        fixture.transport.take_presences(),
        vec![RoomPresenceRequest::Join {
            occupant_id: fixture.occupant("me"),
            password: None,
        }]
    );

    // A second delivery of the same event is ignored.
    fixture.service.handle_scheduled_event(event);
    assert!(fixture.transport.take_presences().is_empty());
}

#[test]
fn test_kicked_with_zero_delay_rejoins_immediately() {
    let mut fixture = Fixture::joined(autorejoin_settings(0));

    fixture.presence(
        fixture
            .unavailable("me")
            .with_status_codes([StatusCode::BANNED, StatusCode::SELF_PRESENCE]),
    );

    assert_eq!(
        fixture.new_notifications(),
        vec!["You have been banned.".to_string()]
    );
    assert!(!fixture.is_pending(ScheduledEventKind::Rejoin));
    assert_eq!(
        fixture.transport.take_presences(),
        vec![RoomPresenceRequest::Join {
            occupant_id: fixture.occupant("me"),
            password: None,
        }]
    );
}

#[test]
fn test_manual_leave_cancels_pending_rejoin() {
    let mut fixture = Fixture::joined(autorejoin_settings(30));
    fixture.presence(
        fixture
            .unavailable("me")
            .with_status_codes([StatusCode::KICKED, StatusCode::SELF_PRESENCE]),
    );
    assert!(fixture.room().is_rejoin_pending());

    let room_id = fixture.room_id.clone();
    fixture.service.leave_room(&room_id, None).unwrap();

    assert!(!fixture.room().is_rejoin_pending());
    assert!(!fixture.is_pending(ScheduledEventKind::Rejoin));
}

#[test]
fn test_nick_change_of_other_occupant() {
    let mut fixture = Fixture::joined(MucSettings::default());
    let alice = fixture.conversation("alice");

    fixture.presence(
        fixture
            .unavailable("alice")
            .with_status_codes([StatusCode::NEW_NICK])
            .with_new_nick("alicia"),
    );
    fixture.presence(fixture.available("alicia"));

    assert_eq!(fixture.nicks(), vec!["alicia", "me"]);
    assert_eq!(
        fixture.new_notifications(),
        vec!["alice is now known as alicia".to_string()]
    );
    assert_eq!(alice.read().nickname(), "alicia");
    assert!(fixture
        .service
        .private_conversation(&fixture.occupant("alicia"))
        .is_some());
}

#[test]
fn test_own_nick_change_waits_for_confirmation() {
    let mut fixture = Fixture::joined(MucSettings::default());
    let room_id = fixture.room_id.clone();

    fixture.service.change_nick(&room_id, "myself").unwrap();
    assert_eq!(
        fixture.transport.take_presences(),
        vec![RoomPresenceRequest::ChangeNick {
            occupant_id: fixture.occupant("myself"),
        }]
    );
    assert_eq!(fixture.room().context().own_nick(), "me");

    fixture.presence(
        fixture
            .unavailable("me")
            .with_status_codes([StatusCode::NEW_NICK, StatusCode::SELF_PRESENCE])
            .with_new_nick("myself"),
    );

    assert_eq!(fixture.room().context().own_nick(), "myself");
    assert!(fixture.room().context().joined());
    assert_eq!(fixture.nicks(), vec!["alice", "myself"]);
}

#[test]
fn test_self_ping_timeout_cycles_room() {
    let mut fixture = Fixture::joined(MucSettings {
        self_ping_interval: 60,
        self_ping_timeout: 10,
        ..Default::default()
    });

    let (delay, event) = fixture
        .scheduler
        .pending(&fixture.room_id, ScheduledEventKind::SelfPing)
        .expect("Expected a scheduled self-ping");
    assert_eq!(delay, Duration::from_secs(60));

    let ping_id = event.id;
    fixture.service.handle_scheduled_event(event);
    assert_eq!(
        fixture.transport.pings(),
        vec![(fixture.occupant("me"), ping_id, Duration::from_secs(10))]
    );

    fixture.service.handle_self_ping_result(
        &fixture.occupant("me"),
        ping_id,
        Err(RequestError::TimedOut),
    );

    assert!(fixture.room().context().lagged());
    assert!(!fixture.room().context().joined());
    assert_eq!(
        fixture.new_notifications(),
        vec![
            "MUC service not responding.".to_string(),
            "You (me) left the room (the MUC server is not responding)".to_string()
        ]
    );
    assert_eq!(
        fixture.transport.take_presences(),
        vec![
            RoomPresenceRequest::Leave {
                occupant_id: fixture.occupant("me"),
                status: Some("the MUC server is not responding".to_string()),
            },
            RoomPresenceRequest::Join {
                occupant_id: fixture.occupant("me"),
                password: None,
            }
        ]
    );

    fixture.presence(fixture.self_presence("me"));
    assert!(!fixture.room().context().lagged());
    assert!(fixture.room().context().joined());
    assert_eq!(
        fixture.new_notifications(),
        vec![
            "MUC service is responding again.".to_string(),
            "You (me) joined the room".to_string()
        ]
    );
}

#[test]
fn test_self_ping_answered_by_room_rearms() {
    let mut fixture = Fixture::joined(MucSettings {
        self_ping_interval: 60,
        ..Default::default()
    });
    let ping_id = fixture.fire_self_ping();
    let scheduled = fixture.scheduler.scheduled_count();

    fixture
        .service
        .handle_self_ping_result(&fixture.occupant("me"), ping_id, Ok(()));

    assert!(fixture.room().context().joined());
    assert!(fixture.is_pending(ScheduledEventKind::SelfPing));
    assert_eq!(fixture.scheduler.scheduled_count(), scheduled + 1);
    assert!(fixture.new_notifications().is_empty());
}

#[test]
fn test_outdated_self_ping_result_is_ignored_after_rejoin() {
    let mut fixture = Fixture::joined(autorejoin_settings(0));
    let ping_id = fixture.fire_self_ping();

    fixture.presence(
        fixture
            .unavailable("me")
            .with_status_codes([StatusCode::KICKED, StatusCode::SELF_PRESENCE]),
    );
    assert_eq!(
        fixture.transport.take_presences(),
        vec![RoomPresenceRequest::Join {
            occupant_id: fixture.occupant("me"),
            password: None,
        }]
    );
    fixture.presence(fixture.self_presence("me"));
    assert!(fixture.room().context().joined());
    fixture.new_notifications();

    fixture.service.handle_self_ping_result(
        &fixture.occupant("me"),
        ping_id,
        Err(RequestError::TimedOut),
    );

    assert!(fixture.room().context().joined());
    assert!(!fixture.room().context().lagged());
    assert!(fixture.transport.take_presences().is_empty());
    assert!(fixture.new_notifications().is_empty());
    assert!(fixture.is_pending(ScheduledEventKind::SelfPing));
}

#[test]
fn test_service_shutdown_does_not_rejoin() {
    let mut fixture = Fixture::joined(autorejoin_settings(5));
    let alice = fixture.conversation("alice");

    fixture.presence(
        fixture
            .unavailable("me")
            .with_status_codes([StatusCode::SERVICE_SHUTDOWN, StatusCode::SELF_PRESENCE]),
    );

    assert!(!fixture.room().context().joined());
    assert_eq!(
        fixture.new_notifications(),
        vec!["You have been kicked because the MUC service is shutting down.".to_string()]
    );
    assert!(!fixture.is_pending(ScheduledEventKind::Rejoin));
    assert!(!fixture.is_pending(ScheduledEventKind::SelfPing));
    assert!(fixture.transport.take_presences().is_empty());
    assert!(!alice.read().is_active());
}

#[test]
fn test_kick_of_other_occupant_deactivates_private_conversation() {
    let mut fixture = Fixture::joined(MucSettings::default());
    fixture.presence(fixture.available("carol"));
    fixture.new_notifications();
    let carol = fixture.conversation("carol");
    assert!(carol.read().check_can_send().is_ok());

    fixture.presence(
        fixture
            .unavailable("carol")
            .with_status_codes([StatusCode::KICKED])
            .with_actor("dave"),
    );

    assert_eq!(fixture.nicks(), vec!["alice", "me"]);
    assert_eq!(
        fixture.new_notifications(),
        vec!["carol has been kicked by dave".to_string()]
    );
    assert!(matches!(
        carol.read().check_can_send(),
        Err(RoomError::ConversationInactive(_))
    ));
    assert_eq!(
        carol.read().info_messages().last().map(String::as_str),
        Some("carol has been kicked by dave")
    );

    fixture.presence(fixture.available("carol"));
    assert!(carol.read().is_active());
    assert_eq!(
        fixture.new_notifications(),
        vec!["carol joined the room".to_string()]
    );
}

#[test]
fn test_ban_of_other_occupant_deactivates_private_conversation() {
    let mut fixture = Fixture::joined(MucSettings::default());
    fixture.presence(fixture.available("carol"));
    fixture.new_notifications();
    let carol = fixture.conversation("carol");

    fixture.presence(
        fixture
            .unavailable("carol")
            .with_affiliation("outcast")
            .with_status_codes([StatusCode::BANNED])
            .with_actor("dave"),
    );

    assert_eq!(fixture.nicks(), vec!["alice", "me"]);
    assert_eq!(
        fixture.new_notifications(),
        vec!["carol has been banned by dave".to_string()]
    );
    assert!(!carol.read().is_active());
    assert!(fixture.room().context().joined());
}

#[test]
fn test_members_only_removal_does_not_rejoin() {
    let mut fixture = Fixture::joined(autorejoin_settings(0));
    let alice = fixture.conversation("alice");

    fixture.presence(
        fixture
            .unavailable("me")
            .with_status_codes([StatusCode::CONFIG_MEMBERS_ONLY, StatusCode::SELF_PRESENCE]),
    );

    assert!(!fixture.room().context().joined());
    assert!(fixture.nicks().is_empty());
    assert_eq!(
        fixture.new_notifications(),
        vec![
            "You have been kicked because you are not a member and the room is now members-only."
                .to_string()
        ]
    );
    assert!(!fixture.room().is_rejoin_pending());
    assert!(!fixture.is_pending(ScheduledEventKind::Rejoin));
    assert!(!fixture.is_pending(ScheduledEventKind::SelfPing));
    assert!(fixture.transport.take_presences().is_empty());
    assert!(!alice.read().is_active());
}

#[test]
fn test_room_configuration_notices_on_own_join() {
    let mut fixture = Fixture::new(MucSettings::default());
    fixture.join("me");

    fixture.presence(fixture.self_presence("me").with_status_codes([
        StatusCode::ROOM_HAS_BEEN_CREATED,
        StatusCode::ROOM_LOGGING_ENABLED,
        StatusCode::NON_ANONYMOUS_ROOM,
    ]));

    assert!(fixture.room().context().joined());
    assert_eq!(
        fixture.new_notifications(),
        vec![
            "You (me) joined the room".to_string(),
            "Info: The room has been created".to_string(),
            "Warning: This room is publicly logged".to_string(),
            "Warning: This room is not anonymous.".to_string()
        ]
    );
}

#[test]
fn test_duplicate_presence_is_idempotent() {
    let mut fixture = Fixture::joined(MucSettings::default());

    fixture.presence(fixture.available("alice"));
    fixture.presence(fixture.available("alice"));

    assert_eq!(fixture.nicks(), vec!["alice", "me"]);
    assert!(fixture.new_notifications().is_empty());
}

#[test]
fn test_unavailable_presence_for_unknown_nick_is_ignored() {
    let mut fixture = Fixture::joined(MucSettings::default());

    fixture.presence(fixture.unavailable("zoe"));

    assert_eq!(fixture.nicks(), vec!["alice", "me"]);
    assert!(fixture.new_notifications().is_empty());
    assert!(fixture.room().context().joined());
}

#[test]
fn test_leave_notices_respect_activity_window() {
    let mut fixture = Fixture::joined(MucSettings {
        hide_exit_join: 120,
        ..Default::default()
    });
    fixture.presence(fixture.available("bob"));
    fixture.new_notifications();

    let now = *fixture.time.time.lock();
    fixture
        .service
        .handle_message_activity(&fixture.occupant("bob"), now);
    fixture.time.advance(60);

    fixture.presence(fixture.unavailable("alice"));
    fixture.presence(fixture.unavailable("bob").with_status("Bye"));

    assert_eq!(fixture.nicks(), vec!["me"]);
    assert_eq!(
        fixture.new_notifications(),
        vec!["bob has left the room (Bye)".to_string()]
    );
}

#[test]
fn test_leave_notices_are_always_shown_with_negative_window() {
    let mut fixture = Fixture::joined(MucSettings::default());

    fixture.presence(
        fixture
            .unavailable("alice")
            .with_status_codes([StatusCode::SERVICE_ERROR_KICK]),
    );

    assert_eq!(
        fixture.new_notifications(),
        vec!["alice has left the room due to an error".to_string()]
    );
}

#[test]
fn test_status_changes() {
    let mut fixture = Fixture::joined(MucSettings::default());
    let alice = fixture.conversation("alice");

    // Alice never talked, so her show change is not announced.
    fixture.presence(fixture.available("alice").with_show(Availability::Away));
    assert!(fixture.new_notifications().is_empty());
    assert_eq!(alice.read().show(), Availability::Away);

    // Role changes are always announced.
    fixture.presence(
        fixture
            .available("alice")
            .with_show(Availability::Away)
            .with_role("moderator"),
    );
    assert_eq!(
        fixture.new_notifications(),
        vec!["alice changed: role: moderator".to_string()]
    );

    let alice_user = fixture
        .room()
        .context()
        .roster()
        .find("alice")
        .cloned()
        .expect("Missing alice");
    assert_eq!(alice_user.role(), RoomRole::Moderator);
    assert_eq!(alice_user.affiliation(), RoomAffiliation::Member);
    assert_eq!(alice_user.show(), Availability::Away);

    // Our own changes are always announced.
    fixture.presence(
        fixture
            .self_presence("me")
            .with_status("Writing code"),
    );
    assert_eq!(
        fixture.new_notifications(),
        vec!["You changed: status: Writing code".to_string()]
    );
}

#[test]
fn test_status_changes_respect_activity_window() {
    let mut fixture = Fixture::joined(MucSettings {
        hide_status_change: 60,
        ..Default::default()
    });

    let now = *fixture.time.time.lock();
    fixture
        .service
        .handle_message_activity(&fixture.occupant("alice"), now);

    fixture.time.advance(10);
    fixture.presence(fixture.available("alice").with_show(Availability::Away));
    assert_eq!(
        fixture.new_notifications(),
        vec!["alice changed: show: Away".to_string()]
    );

    fixture.time.advance(590);
    fixture.presence(fixture.available("alice").with_show(Availability::DoNotDisturb));
    assert!(fixture.new_notifications().is_empty());
    assert_eq!(
        fixture
            .room()
            .context()
            .roster()
            .find("alice")
            .map(|user| user.show()),
        Some(Availability::DoNotDisturb)
    );
}

#[test]
fn test_repeated_status_change_is_announced_once() {
    let mut fixture = Fixture::joined(MucSettings {
        hide_status_change: -1,
        ..Default::default()
    });

    let away = fixture
        .available("alice")
        .with_show(Availability::Away)
        .with_status("Lunch");
    fixture.presence(away.clone());
    fixture.presence(away);

    assert_eq!(
        fixture.new_notifications(),
        vec!["alice changed: show: Away, status: Lunch".to_string()]
    );
}

#[test]
fn test_huge_activity_windows_always_announce() {
    let mut fixture = Fixture::joined(MucSettings {
        hide_exit_join: i64::MAX,
        hide_status_change: 10_000_000_000_000_000,
        ..Default::default()
    });

    fixture.presence(fixture.available("alice").with_show(Availability::Away));
    fixture.presence(fixture.unavailable("alice"));

    assert_eq!(
        fixture.new_notifications(),
        vec![
            "alice changed: show: Away".to_string(),
            "alice has left the room".to_string()
        ]
    );
}

#[test]
fn test_unknown_affiliation_or_role_is_ignored() {
    let mut fixture = Fixture::joined(MucSettings::default());

    fixture.presence(
        MucPresence::available(fixture.occupant("bob"))
            .with_affiliation("emperor")
            .with_role("participant"),
    );
    fixture.presence(fixture.available("alice").with_role("overlord"));
    fixture.presence(fixture.unavailable("alice").with_role("ghost"));

    assert_eq!(fixture.nicks(), vec!["alice", "me"]);
    let alice = fixture
        .room()
        .context()
        .roster()
        .find("alice")
        .cloned()
        .expect("Missing alice");
    assert_eq!(alice.affiliation(), RoomAffiliation::Member);
    assert_eq!(alice.role(), RoomRole::Participant);
    assert!(fixture.new_notifications().is_empty());
    assert!(fixture.transport.take_presences().is_empty());
}

#[test]
fn test_error_presence_is_reported() {
    let mut fixture = Fixture::new(MucSettings::default());
    fixture.join("me");

    fixture.presence(MucPresence::error(fixture.occupant("me"), "conflict"));

    assert!(!fixture.room().context().joined());
    let notification = fixture
        .room()
        .notifications()
        .last()
        .cloned()
        .expect("Missing notification");
    assert_eq!(notification.kind, NotificationKind::Error);
    assert_eq!(notification.text, "Error: conflict");
}

#[test]
fn test_join_twice_fails() {
    let mut fixture = Fixture::joined(MucSettings::default());
    let room_id = fixture.room_id.clone();

    assert!(matches!(
        fixture.service.join_room(&room_id, "me", None),
        Err(RoomError::RoomIsAlreadyConnected(_))
    ));
}

#[test]
fn test_connection_loss_and_close() {
    let mut fixture = Fixture::joined(MucSettings {
        self_ping_interval: 60,
        ..Default::default()
    });
    let alice = fixture.conversation("alice");

    fixture.service.handle_connection_lost();

    assert!(!fixture.room().context().joined());
    assert!(fixture.nicks().is_empty());
    assert!(!fixture.is_pending(ScheduledEventKind::SelfPing));
    assert!(!alice.read().is_active());

    let room_id = fixture.room_id.clone();
    fixture.service.close_room(&room_id, None).unwrap();
    assert!(fixture.service.room(&room_id).is_none());
    assert!(matches!(
        fixture.service.leave_room(&room_id, None),
        Err(RoomError::RoomNotFound(_))
    ));
}

#[test]
fn test_own_presence_is_sent_to_joined_rooms() {
    let mut fixture = Fixture::joined(MucSettings::default());
    let presence = OwnPresence {
        show: Availability::DoNotDisturb,
        status: Some("Focus".to_string()),
    };

    fixture.service.set_own_presence(presence.clone());

    assert_eq!(
        fixture.transport.presences_with_own_presence(),
        vec![(
            RoomPresenceRequest::UpdateStatus {
                occupant_id: fixture.occupant("me"),
            },
            presence
        )]
    );
}

#[test]
fn test_failed_presence_is_reported() {
    let mut fixture = Fixture::new(MucSettings::default());
    fixture.transport.set_failing(true);
    fixture.join("me");

    let notification = fixture
        .room()
        .notifications()
        .last()
        .cloned()
        .expect("Missing notification");
    assert_eq!(notification.kind, NotificationKind::Error);
}
