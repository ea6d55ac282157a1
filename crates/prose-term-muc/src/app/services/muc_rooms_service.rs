// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use prose_term_xmpp::{RequestError, TimeProvider};

use crate::app::deps::{
    DynMucTransport, DynScheduler, DynTimeProvider, OwnPresence, ScheduledEvent,
    ScheduledEventKind,
};
use crate::domain::private_conversations::models::PrivateConversationRef;
use crate::domain::rooms::models::{
    MucNotice, MucPresence, RejoinDecision, RoomEffect, RoomError, RoomNotification,
    RoomPresenceRequest, SelfPingOutcome,
};
use crate::domain::rooms::services::MucStateMachine;
use crate::domain::settings::models::MucConfig;
use crate::domain::shared::models::{OccupantId, RoomId};
use crate::ClientEvent;

use super::{MucRoom, PrivateConversationBridge, SelfPingMonitor};

/// Owns all rooms and carries out the effects of their transitions.
pub struct MucRoomsService {
    config: MucConfig,
    rooms: HashMap<RoomId, MucRoom>,
    private_conversations: PrivateConversationBridge,
    transport: DynMucTransport,
    scheduler: DynScheduler,
    time_provider: DynTimeProvider,
    own_presence: OwnPresence,
    client_events: Vec<ClientEvent>,
}

impl MucRoomsService {
    pub fn new(
        config: MucConfig,
        transport: DynMucTransport,
        scheduler: DynScheduler,
        time_provider: DynTimeProvider,
    ) -> Self {
        Self {
            config,
            rooms: Default::default(),
            private_conversations: Default::default(),
            transport,
            scheduler,
            time_provider,
            own_presence: Default::default(),
            client_events: vec![],
        }
    }

    pub fn room(&self, room_id: &RoomId) -> Option<&MucRoom> {
        self.rooms.get(room_id)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &MucRoom> {
        self.rooms.values()
    }

    pub fn own_presence(&self) -> &OwnPresence {
        &self.own_presence
    }

    /// Returns the events collected since the last call.
    pub fn take_client_events(&mut self) -> Vec<ClientEvent> {
        std::mem::take(&mut self.client_events)
    }
}

impl MucRoomsService {
    /// Enters `room_id` as `nick`. Rooms we are not joined to yet (or anymore) are reused with
    /// the new nickname and password.
    #[tracing::instrument(skip(self, password))]
    pub fn join_room(
        &mut self,
        room_id: &RoomId,
        nick: &str,
        password: Option<String>,
    ) -> Result<(), RoomError> {
        room_id.occupant_id_with_nickname(nick)?;

        match self.rooms.get_mut(room_id) {
            Some(room) if room.context.joined() => {
                return Err(RoomError::RoomIsAlreadyConnected(room_id.clone()))
            }
            Some(room) => {
                room.context.own_nick = nick.to_string();
                room.context.password = password;
            }
            None => {
                let settings = self.config.settings_for(room_id);
                self.rooms.insert(
                    room_id.clone(),
                    MucRoom::new(room_id.clone(), nick, password, settings),
                );
            }
        }

        self.with_room(room_id, |machine, room| machine.join(&mut room.context))
    }

    /// Leaves the room but keeps its state around, so that it can be rejoined.
    pub fn leave_room(&mut self, room_id: &RoomId, reason: Option<String>) -> Result<(), RoomError> {
        self.with_room(room_id, |machine, room| {
            machine.leave(&mut room.context, reason)
        })
    }

    /// Leaves the room and forgets about it.
    pub fn close_room(&mut self, room_id: &RoomId, reason: Option<String>) -> Result<(), RoomError> {
        self.leave_room(room_id, reason)?;
        if self.rooms.remove(room_id).is_some() {
            info!("Closed room {}.", room_id);
        }
        Ok(())
    }

    pub fn cycle_room(&mut self, room_id: &RoomId, reason: Option<String>) -> Result<(), RoomError> {
        self.with_room(room_id, |machine, room| {
            machine.cycle(&mut room.context, reason)
        })
    }

    pub fn change_nick(&mut self, room_id: &RoomId, nick: &str) -> Result<(), RoomError> {
        room_id.occupant_id_with_nickname(nick)?;
        self.with_room(room_id, |machine, room| {
            machine.change_nick(&mut room.context, nick)
        })
    }

    /// Changes the show and status we announce. Joined rooms are informed right away.
    pub fn set_own_presence(&mut self, presence: OwnPresence) {
        self.own_presence = presence;

        let room_ids = self
            .rooms
            .values()
            .filter(|room| room.context.joined())
            .map(|room| room.room_id().clone())
            .collect::<Vec<_>>();

        for room_id in room_ids {
            let Some(occupant_id) = self
                .rooms
                .get(&room_id)
                .and_then(|room| room.context.own_occupant_id().ok())
            else {
                continue;
            };
            self.apply_effects(
                &room_id,
                vec![RoomEffect::SendPresence(RoomPresenceRequest::UpdateStatus {
                    occupant_id,
                })],
            );
        }
    }

    /// Makes `conversation` follow the occupant it was opened with.
    pub fn register_private_conversation(
        &mut self,
        conversation: &PrivateConversationRef,
    ) -> Result<(), RoomError> {
        let room_id = conversation.read().occupant_id().room_id();
        let room = self
            .rooms
            .get(&room_id)
            .ok_or_else(|| RoomError::RoomNotFound(room_id.clone()))?;

        {
            let mut conversation = conversation.write();
            conversation.set_own_nick(room.context.own_nick());
            let nick = conversation.nickname().to_string();
            if !room.context.joined() {
                conversation.deactivate(None);
            } else if !room.context.roster().contains(&nick) {
                conversation.user_left(format!("{} is not in the room", nick));
            }
        }

        self.private_conversations.register(conversation);
        Ok(())
    }

    pub fn private_conversation(
        &mut self,
        occupant_id: &OccupantId,
    ) -> Option<PrivateConversationRef> {
        self.private_conversations.conversation(occupant_id)
    }
}

impl MucRoomsService {
    pub fn handle_presence(&mut self, presence: MucPresence) {
        let room_id = presence.occupant_id.room_id();
        let now = self.time_provider.now();
        if !self.rooms.contains_key(&room_id) {
            debug!("Ignoring presence for unknown room {}.", room_id);
            return;
        }
        _ = self.with_room(&room_id, |machine, room| {
            machine.handle_presence(&mut room.context, presence, now)
        });
    }

    /// A live groupchat message from `occupant_id` arrived.
    pub fn handle_message_activity(&mut self, occupant_id: &OccupantId, timestamp: DateTime<Utc>) {
        let room_id = occupant_id.room_id();
        if !self.rooms.contains_key(&room_id) {
            return;
        }
        _ = self.with_room(&room_id, |machine, room| {
            machine.handle_message_activity(&mut room.context, occupant_id.nickname(), timestamp)
        });
    }

    pub fn handle_scheduled_event(&mut self, event: ScheduledEvent) {
        let Some(room) = self.rooms.get_mut(&event.room_id) else {
            debug!("Dropping {:?} for closed room {}.", event.kind, event.room_id);
            return;
        };

        match event.kind {
            ScheduledEventKind::SelfPing => {
                if !room.self_ping.fire(event.id) || !room.context.joined() {
                    return;
                }
                let occupant_id = match room.context.own_occupant_id() {
                    Ok(occupant_id) => occupant_id,
                    Err(err) => {
                        warn!("Cannot self-ping {}: {}", event.room_id, err);
                        return;
                    }
                };
                debug!("Sending self-ping to {}.", occupant_id);
                if let Err(err) =
                    self.transport
                        .send_self_ping(&occupant_id, event.id, room.self_ping.timeout())
                {
                    self.handle_self_ping_result(&occupant_id, event.id, Err(err));
                }
            }
            ScheduledEventKind::Rejoin => {
                if !room.rejoin.complete(event.id) || room.context.joined() {
                    return;
                }
                info!("Rejoining {}.", event.room_id);
                _ = self.with_room(&event.room_id, |machine, room| {
                    machine.join(&mut room.context)
                });
            }
        }
    }

    pub fn handle_self_ping_result(
        &mut self,
        occupant_id: &OccupantId,
        ping_id: u64,
        result: Result<(), RequestError>,
    ) {
        let room_id = occupant_id.room_id();
        let Some(room) = self.rooms.get_mut(&room_id) else {
            return;
        };
        if !room.self_ping.settle(ping_id) {
            debug!("Ignoring result of outdated self-ping {} to {}.", ping_id, occupant_id);
            return;
        }
        if !room.context.is_own_nick(occupant_id.nickname()) {
            debug!("Ignoring self-ping result for previous nickname {}.", occupant_id);
            return;
        }

        let outcome = SelfPingMonitor::evaluate(&result);
        match &outcome {
            SelfPingOutcome::Alive => (),
            SelfPingOutcome::TimedOut => {
                warn!("{}", RoomError::SelfPingTimeout(occupant_id.clone()))
            }
            SelfPingOutcome::Failed { reason } => warn!(
                "{}",
                RoomError::SelfPingError {
                    occupant_id: occupant_id.clone(),
                    reason: reason.clone(),
                }
            ),
        }
        _ = self.with_room(&room_id, |machine, room| {
            machine.handle_self_ping_outcome(&mut room.context, outcome)
        });
    }

    pub fn handle_admin_action_failed(&mut self, room_id: &RoomId, action: &str, reason: &str) {
        let err = RoomError::AdminActionFailed {
            action: action.to_string(),
            reason: reason.to_string(),
        };
        warn!("{} in {}", err, room_id);
        _ = self.with_room(room_id, |machine, _| {
            machine.admin_action_failed(action, reason)
        });
    }

    /// The connection dropped. All rooms are marked as not joined.
    pub fn handle_connection_lost(&mut self) {
        let room_ids = self.rooms.keys().cloned().collect::<Vec<_>>();
        for room_id in room_ids {
            _ = self.with_room(&room_id, |machine, room| {
                machine.disconnect(&mut room.context)
            });
        }
    }
}

impl MucRoomsService {
    fn with_room(
        &mut self,
        room_id: &RoomId,
        transition: impl FnOnce(&MucStateMachine, &mut MucRoom) -> Vec<RoomEffect>,
    ) -> Result<(), RoomError> {
        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| RoomError::RoomNotFound(room_id.clone()))?;
        let settings = room.settings.clone();
        let effects = transition(&MucStateMachine::new(&settings), room);
        self.apply_effects(room_id, effects);
        Ok(())
    }

    fn apply_effects(&mut self, room_id: &RoomId, effects: Vec<RoomEffect>) {
        if effects.is_empty() {
            return;
        }

        let mut queue = VecDeque::from(effects);
        while let Some(effect) = queue.pop_front() {
            let Some(room) = self.rooms.get_mut(room_id) else {
                warn!("Dropping effects for unknown room {}.", room_id);
                return;
            };

            match effect {
                RoomEffect::Notify(notification) => {
                    room.push_notification(notification.clone());
                    self.client_events.push(ClientEvent::RoomNotification {
                        room_id: room_id.clone(),
                        notification,
                    });
                }
                RoomEffect::Private(event) => {
                    self.private_conversations.handle_event(room_id, event)
                }
                RoomEffect::SendPresence(request) => {
                    if let Err(err) = self.transport.send_presence(&request, &self.own_presence) {
                        warn!("Failed to send presence to {}: {}", room_id, err);
                        let notification = RoomNotification::error(MucNotice::PresenceError {
                            text: err.to_string(),
                        });
                        room.push_notification(notification.clone());
                        self.client_events.push(ClientEvent::RoomNotification {
                            room_id: room_id.clone(),
                            notification,
                        });
                    }
                }
                RoomEffect::ArmSelfPing => {
                    if room.context.joined() {
                        room.self_ping.arm(self.scheduler.as_ref(), room_id)
                    }
                }
                RoomEffect::DisarmSelfPing => room.self_ping.disarm(),
                RoomEffect::Rejoin(RejoinDecision::Never) => (),
                RoomEffect::Rejoin(RejoinDecision::Immediately) => {
                    info!("Rejoining {}.", room_id);
                    let settings = room.settings.clone();
                    queue.extend(MucStateMachine::new(&settings).join(&mut room.context));
                }
                RoomEffect::Rejoin(RejoinDecision::After(delay)) => {
                    info!("Rejoining {} in {:?}.", room_id, delay);
                    room.rejoin
                        .schedule(self.scheduler.as_ref(), room_id, delay)
                }
                RoomEffect::CancelRejoin => room.rejoin.cancel(),
            }
        }

        self.client_events.push(ClientEvent::RoomChanged {
            room_id: room_id.clone(),
        });
    }
}
