// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use prose_term_xmpp::stanza::StatusCode;

use crate::domain::rooms::models::{
    MucNotice, MucPresence, MucPresenceType, NickColor, PrivateConversationEvent, RejoinDecision,
    RoomAffiliation, RoomContext, RoomEffect, RoomError, RoomEventKind, RoomNotification,
    RoomPresenceRequest, RoomRole, SelfPingOutcome, StatusChange, User,
};
use crate::domain::settings::models::MucSettings;

use super::{AutoRejoinPolicy, RemovalCause};

const NOT_RESPONDING_REASON: &str = "the MUC server is not responding";
const DISCONNECTED_MESSAGE: &str = "Disconnected from the server";

/// Applies presences and our own actions to a [`RoomContext`].
///
/// Transitions never fail and never perform I/O. Everything that has to happen outside of the
/// context is returned as a list of [`RoomEffect`]s.
pub struct MucStateMachine<'a> {
    settings: &'a MucSettings,
}

impl<'a> MucStateMachine<'a> {
    pub fn new(settings: &'a MucSettings) -> Self {
        Self { settings }
    }

    pub fn handle_presence(
        &self,
        ctx: &mut RoomContext,
        presence: MucPresence,
        now: DateTime<Utc>,
    ) -> Vec<RoomEffect> {
        let mut effects = vec![];

        if !ctx.room_id().contains(&presence.occupant_id) {
            warn!(
                "Ignoring presence from {} in room {}.",
                presence.occupant_id,
                ctx.room_id()
            );
            return effects;
        }

        if !matches!(presence.r#type, MucPresenceType::Error(_))
            && self.affiliation_and_role(&presence).is_none()
        {
            return effects;
        }

        if ctx.lagged {
            ctx.lagged = false;
            effects.push(notify(RoomNotification::info(
                MucNotice::ServiceRespondingAgain,
            )));
        }

        if ctx.joined {
            self.handle_joined_presence(ctx, presence, now, &mut effects);
            if ctx.joined {
                effects.push(RoomEffect::ArmSelfPing);
            }
        } else if let MucPresenceType::Error(text) = &presence.r#type {
            effects.push(notify(RoomNotification::error(MucNotice::PresenceError {
                text: text.clone(),
            })));
        } else if presence.is_self_presence() && presence.is_unavailable() {
            info!("Room {} did not let us in.", ctx.room_id());
            ctx.presence_buffer.clear();
        } else if presence.is_self_presence() {
            self.handle_own_join(ctx, presence, now, &mut effects);
        } else {
            ctx.presence_buffer.enqueue(presence);
        }

        debug_assert!(ctx.is_consistent());
        effects
    }

    /// Requests to enter the room with the nickname and password stored in the context.
    pub fn join(&self, ctx: &mut RoomContext) -> Vec<RoomEffect> {
        let mut effects = vec![RoomEffect::CancelRejoin];
        ctx.presence_buffer.clear();

        match ctx.own_occupant_id() {
            Ok(occupant_id) => effects.push(RoomEffect::SendPresence(RoomPresenceRequest::Join {
                occupant_id,
                password: ctx.password.clone(),
            })),
            Err(err) => warn!("Cannot join {}: {}", ctx.room_id(), err),
        }
        effects
    }

    /// Leaves the room. The unavailable presence is sent even if we are not joined, so that a
    /// pending join is cancelled on the server as well.
    pub fn leave(&self, ctx: &mut RoomContext, reason: Option<String>) -> Vec<RoomEffect> {
        let mut effects = vec![RoomEffect::CancelRejoin];

        if ctx.joined {
            let notice = MucNotice::OwnLeft {
                nick: ctx.own_nick.clone(),
                reason: reason.clone(),
            };
            let message = notice.to_string();
            info!("Leaving room {}.", ctx.room_id());

            effects.push(notify(RoomNotification::info(notice)));
            ctx.disconnect();
            effects.push(RoomEffect::DisarmSelfPing);
            effects.push(RoomEffect::Private(PrivateConversationEvent::RoomLeft {
                message,
            }));
        }

        match ctx.own_occupant_id() {
            Ok(occupant_id) => {
                effects.push(RoomEffect::SendPresence(RoomPresenceRequest::Leave {
                    occupant_id,
                    status: reason,
                }))
            }
            Err(err) => warn!("Cannot leave {}: {}", ctx.room_id(), err),
        }

        debug_assert!(ctx.is_consistent());
        effects
    }

    /// Leaves and immediately rejoins the room.
    pub fn cycle(&self, ctx: &mut RoomContext, reason: Option<String>) -> Vec<RoomEffect> {
        let mut effects = self.leave(ctx, reason);
        effects.extend(self.join(ctx));
        effects
    }

    /// Asks the room to change our nickname. The roster only changes once the room confirms
    /// the change. Outside of the room the nickname is just remembered for the next join.
    pub fn change_nick(&self, ctx: &mut RoomContext, new_nick: &str) -> Vec<RoomEffect> {
        if !ctx.joined {
            ctx.own_nick = new_nick.to_string();
            return vec![];
        }

        match ctx.room_id().occupant_id_with_nickname(new_nick) {
            Ok(occupant_id) => vec![RoomEffect::SendPresence(
                RoomPresenceRequest::ChangeNick { occupant_id },
            )],
            Err(err) => {
                warn!("Invalid nickname '{}': {}", new_nick, err);
                vec![]
            }
        }
    }

    /// Records that `nick` sent a live (non-history) message at `timestamp`.
    pub fn handle_message_activity(
        &self,
        ctx: &mut RoomContext,
        nick: &str,
        timestamp: DateTime<Utc>,
    ) -> Vec<RoomEffect> {
        if !ctx.joined {
            return vec![];
        }
        if let Err(err) = ctx.roster.set_last_talked(nick, timestamp) {
            debug!("Not tracking activity in {}: {}", ctx.room_id(), err);
        }
        vec![RoomEffect::ArmSelfPing]
    }

    pub fn handle_self_ping_outcome(
        &self,
        ctx: &mut RoomContext,
        outcome: SelfPingOutcome,
    ) -> Vec<RoomEffect> {
        if !ctx.joined {
            debug!("Ignoring self-ping result for {}.", ctx.room_id());
            return vec![];
        }

        match outcome {
            SelfPingOutcome::Alive => {
                let mut effects = vec![];
                if ctx.lagged {
                    ctx.lagged = false;
                    effects.push(notify(RoomNotification::info(
                        MucNotice::ServiceRespondingAgain,
                    )));
                }
                effects.push(RoomEffect::ArmSelfPing);
                effects
            }
            SelfPingOutcome::TimedOut => {
                debug!("Cycling {} after self-ping timeout.", ctx.room_id());
                ctx.lagged = true;
                let mut effects = vec![notify(RoomNotification::warning(
                    MucNotice::ServiceNotResponding,
                ))];
                effects.extend(self.cycle(ctx, Some(NOT_RESPONDING_REASON.to_string())));
                effects
            }
            SelfPingOutcome::Failed { reason } => {
                debug!("Cycling {} after failed self-ping.", ctx.room_id());
                self.cycle(ctx, Some(reason))
            }
        }
    }

    /// Reports a failed moderation request (kick, ban, role or affiliation change).
    pub fn admin_action_failed(&self, action: &str, reason: &str) -> Vec<RoomEffect> {
        vec![notify(RoomNotification::error(
            MucNotice::AdminActionFailed {
                action: action.to_string(),
                reason: reason.to_string(),
            },
        ))]
    }

    /// The connection to the server is gone. The room is rejoined by the user or by the
    /// connection owner once we're back online.
    pub fn disconnect(&self, ctx: &mut RoomContext) -> Vec<RoomEffect> {
        let was_joined = ctx.joined;
        ctx.disconnect();

        let mut effects = vec![RoomEffect::DisarmSelfPing, RoomEffect::CancelRejoin];
        if was_joined {
            info!("Lost connection to {}.", ctx.room_id());
            effects.push(RoomEffect::Private(PrivateConversationEvent::RoomLeft {
                message: DISCONNECTED_MESSAGE.to_string(),
            }));
        }
        effects
    }
}

impl<'a> MucStateMachine<'a> {
    fn handle_own_join(
        &self,
        ctx: &mut RoomContext,
        presence: MucPresence,
        now: DateTime<Utc>,
        effects: &mut Vec<RoomEffect>,
    ) {
        let buffered = ctx.presence_buffer.drain_ordered();
        debug!(
            "Replaying {} buffered presences in {}.",
            buffered.len(),
            ctx.room_id()
        );
        for presence in buffered {
            self.replay_buffered_presence(ctx, presence);
        }

        let nick = presence.nick().to_string();
        if nick != ctx.own_nick {
            info!(
                "Room {} assigned nickname '{}' instead of '{}'.",
                ctx.room_id(),
                nick,
                ctx.own_nick
            );
            effects.push(RoomEffect::Private(
                PrivateConversationEvent::OwnNickChanged { nick: nick.clone() },
            ));
        }

        self.upsert_user(ctx, &presence);
        ctx.own_nick = nick.clone();
        ctx.joined = true;
        ctx.last_connection = Some(now);
        info!("Joined room {} as '{}'.", ctx.room_id(), nick);

        let notice = MucNotice::OwnJoined { nick };
        let message = notice.to_string();
        effects.push(notify(RoomNotification::info(notice)));
        effects.push(RoomEffect::Private(PrivateConversationEvent::RoomJoined {
            message,
        }));

        if presence.has_status_code(StatusCode::ROOM_HAS_BEEN_CREATED) {
            effects.push(notify(RoomNotification::info(MucNotice::RoomCreated)));
        }
        if presence.has_status_code(StatusCode::ROOM_LOGGING_ENABLED) {
            effects.push(notify(RoomNotification::warning(MucNotice::RoomIsLogged)));
        }
        if presence.has_status_code(StatusCode::NON_ANONYMOUS_ROOM) {
            effects.push(notify(RoomNotification::warning(
                MucNotice::RoomIsNonAnonymous,
            )));
        }
        effects.push(RoomEffect::ArmSelfPing);
    }

    /// Applies a presence that arrived before our own join. Joins are not announced.
    fn replay_buffered_presence(&self, ctx: &mut RoomContext, presence: MucPresence) {
        match presence.r#type {
            MucPresenceType::Available => self.upsert_user(ctx, &presence),
            MucPresenceType::Unavailable => {
                _ = ctx.roster.remove(presence.nick());
            }
            MucPresenceType::Error(_) => (),
        }
    }

    fn handle_joined_presence(
        &self,
        ctx: &mut RoomContext,
        presence: MucPresence,
        now: DateTime<Utc>,
        effects: &mut Vec<RoomEffect>,
    ) {
        match RoomEventKind::classify(&presence, &ctx.roster) {
            RoomEventKind::Error(text) => {
                effects.push(notify(RoomNotification::error(MucNotice::PresenceError {
                    text,
                })))
            }
            RoomEventKind::Join => self.on_user_join(ctx, &presence, effects),
            RoomEventKind::Inconsistent(reason) => {
                let err = RoomError::ProtocolInconsistency {
                    occupant_id: presence.occupant_id.clone(),
                    reason: reason.to_string(),
                };
                warn!("Ignoring presence. {}", err);
            }
            RoomEventKind::NickChange { new_nick } => {
                self.on_nick_change(ctx, &presence, &new_nick, effects)
            }
            RoomEventKind::Ban => self.on_removal(ctx, &presence, RemovalCause::Banned, effects),
            RoomEventKind::Kick => self.on_removal(ctx, &presence, RemovalCause::Kicked, effects),
            RoomEventKind::Shutdown => self.on_service_removal(
                ctx,
                MucNotice::ServiceShutdown,
                RemovalCause::ServiceShutdown,
                effects,
            ),
            RoomEventKind::NonMemberKick => self.on_service_removal(
                ctx,
                MucNotice::NonMemberKicked,
                RemovalCause::NonMemberKick,
                effects,
            ),
            RoomEventKind::Leave { server_initiated } => {
                self.on_user_leave(ctx, &presence, server_initiated, now, effects)
            }
            RoomEventKind::StatusChange => self.on_status_change(ctx, &presence, now, effects),
        }
    }

    fn on_user_join(
        &self,
        ctx: &mut RoomContext,
        presence: &MucPresence,
        effects: &mut Vec<RoomEffect>,
    ) {
        let Some(user) = self.make_user(presence) else {
            return;
        };
        let nick = presence.nick().to_string();
        ctx.roster.add(user);

        if self.settings.hide_exit_join != 0 {
            effects.push(notify(RoomNotification::info(MucNotice::UserJoined {
                nick: nick.clone(),
                jid: presence.real_jid.clone(),
            })));
        }
        effects.push(RoomEffect::Private(
            PrivateConversationEvent::UserRejoined { nick },
        ));
    }

    fn on_nick_change(
        &self,
        ctx: &mut RoomContext,
        presence: &MucPresence,
        new_nick: &str,
        effects: &mut Vec<RoomEffect>,
    ) {
        let old_nick = presence.nick().to_string();
        let is_self = ctx.is_own_nick(&old_nick);

        if let Err(err) = ctx.roster.rename(&old_nick, new_nick) {
            warn!("Ignoring nickname change in {}: {}", ctx.room_id(), err);
            return;
        }

        if is_self {
            ctx.own_nick = new_nick.to_string();
            effects.push(RoomEffect::Private(
                PrivateConversationEvent::OwnNickChanged {
                    nick: new_nick.to_string(),
                },
            ));
        } else if self.settings.deterministic_nick_colors {
            _ = ctx.roster.change_color(new_nick, None, true);
        }

        effects.push(notify(RoomNotification::info(MucNotice::NickChanged {
            old_nick: old_nick.clone(),
            new_nick: new_nick.to_string(),
        })));
        effects.push(RoomEffect::Private(PrivateConversationEvent::UserRenamed {
            old_nick,
            new_nick: new_nick.to_string(),
        }));
    }

    fn on_removal(
        &self,
        ctx: &mut RoomContext,
        presence: &MucPresence,
        cause: RemovalCause,
        effects: &mut Vec<RoomEffect>,
    ) {
        let nick = presence.nick().to_string();
        let is_self = ctx.is_own_nick(&nick);
        _ = ctx.roster.remove(&nick);

        let actor = presence.actor.clone();
        let reason = presence.reason.clone();
        let notice = match cause {
            RemovalCause::Banned => MucNotice::Banned {
                nick: nick.clone(),
                is_self,
                actor,
                reason,
            },
            _ => MucNotice::Kicked {
                nick: nick.clone(),
                is_self,
                actor,
                reason,
            },
        };
        let message = notice.to_string();

        if !is_self {
            effects.push(RoomEffect::Private(PrivateConversationEvent::UserLeft {
                nick,
                message,
            }));
            effects.push(notify(RoomNotification::info(notice)));
            return;
        }

        info!("{}", message);
        effects.push(RoomEffect::Private(PrivateConversationEvent::RoomLeft {
            message,
        }));
        ctx.disconnect();
        effects.push(RoomEffect::DisarmSelfPing);
        effects.push(notify(RoomNotification::info(notice)));
        self.push_rejoin(cause, effects);
    }

    fn on_service_removal(
        &self,
        ctx: &mut RoomContext,
        notice: MucNotice,
        cause: RemovalCause,
        effects: &mut Vec<RoomEffect>,
    ) {
        let message = notice.to_string();
        info!("Removed from {}: {}", ctx.room_id(), message);

        effects.push(notify(RoomNotification::info(notice)));
        ctx.disconnect();
        effects.push(RoomEffect::DisarmSelfPing);
        effects.push(RoomEffect::Private(PrivateConversationEvent::RoomLeft {
            message,
        }));
        self.push_rejoin(cause, effects);
    }

    fn on_user_leave(
        &self,
        ctx: &mut RoomContext,
        presence: &MucPresence,
        server_initiated: bool,
        now: DateTime<Utc>,
        effects: &mut Vec<RoomEffect>,
    ) {
        let nick = presence.nick().to_string();
        let Ok(user) = ctx.roster.remove(&nick) else {
            return;
        };
        let is_self = ctx.is_own_nick(&nick);

        let notice = MucNotice::UserLeft {
            nick: nick.clone(),
            jid: presence.real_jid.clone().or_else(|| user.jid().cloned()),
            status: presence.status.clone(),
            due_to_error: server_initiated,
        };
        let message = notice.to_string();

        if is_self {
            // Some servers remove us without any status code.
            info!("Room {} removed us.", ctx.room_id());
            ctx.disconnect();
            effects.push(RoomEffect::DisarmSelfPing);
            effects.push(RoomEffect::Private(PrivateConversationEvent::RoomLeft {
                message: message.clone(),
            }));
            self.push_rejoin(RemovalCause::Left, effects);
        }

        let hide_exit_join = self.settings.hide_exit_join;
        if hide_exit_join <= -1 || user.has_talked_since(hide_exit_join, now) {
            effects.push(notify(RoomNotification::info(notice)));
        }

        if !is_self {
            effects.push(RoomEffect::Private(PrivateConversationEvent::UserLeft {
                nick,
                message,
            }));
        }
    }

    fn on_status_change(
        &self,
        ctx: &mut RoomContext,
        presence: &MucPresence,
        now: DateTime<Utc>,
        effects: &mut Vec<RoomEffect>,
    ) {
        let nick = presence.nick();
        let Some(user) = ctx.roster.find(nick) else {
            return;
        };
        let Some((affiliation, role)) = self.affiliation_and_role(presence) else {
            return;
        };
        let show = presence.show;
        let status = presence.status.clone();

        let mut changes = vec![];
        let affiliation_changed = affiliation != user.affiliation();
        let role_changed = role != user.role();

        if affiliation_changed {
            changes.push(StatusChange::Affiliation(affiliation));
        }
        if role_changed {
            changes.push(StatusChange::Role(role));
        }
        if show != user.show() {
            changes.push(StatusChange::Show(show));
        }
        if status.as_deref() != user.status() {
            match &status {
                Some(status) => changes.push(StatusChange::Status(status.clone())),
                // The status was cleared. Announce the (unchanged) show instead.
                None if show == user.show() => changes.push(StatusChange::Show(show)),
                None => (),
            }
        }

        if changes.is_empty() {
            return;
        }

        let is_self = ctx.is_own_nick(nick);
        let hide_status_change = self.settings.hide_status_change.max(-1);
        if affiliation_changed
            || role_changed
            || is_self
            || user.has_talked_since(hide_status_change, now)
        {
            effects.push(notify(RoomNotification::info(MucNotice::StatusChanged {
                nick: nick.to_string(),
                is_self,
                changes,
            })));
        }

        effects.push(RoomEffect::Private(
            PrivateConversationEvent::StatusChanged {
                nick: nick.to_string(),
                show,
                status: status.clone(),
            },
        ));
        _ = ctx.roster.update(nick, affiliation, role, show, status);
    }

    fn push_rejoin(&self, cause: RemovalCause, effects: &mut Vec<RoomEffect>) {
        let decision = AutoRejoinPolicy::from_settings(self.settings).decide(cause);
        if decision != RejoinDecision::Never {
            effects.push(RoomEffect::Rejoin(decision));
        }
    }

    /// Adds the occupant of `presence` or refreshes its attributes if it is already known.
    fn upsert_user(&self, ctx: &mut RoomContext, presence: &MucPresence) {
        let Some((affiliation, role)) = self.affiliation_and_role(presence) else {
            return;
        };
        if ctx.roster.contains(presence.nick()) {
            _ = ctx.roster.update(
                presence.nick(),
                affiliation,
                role,
                presence.show,
                presence.status.clone(),
            );
            return;
        }
        ctx.roster.add(self.user(presence, affiliation, role));
    }

    fn make_user(&self, presence: &MucPresence) -> Option<User> {
        let (affiliation, role) = self.affiliation_and_role(presence)?;
        Some(self.user(presence, affiliation, role))
    }

    fn user(&self, presence: &MucPresence, affiliation: RoomAffiliation, role: RoomRole) -> User {
        let nick = presence.nick();
        User::new(
            nick,
            affiliation,
            role,
            presence.show,
            presence.status.clone(),
            presence.real_jid.clone(),
            NickColor::for_nick(nick, self.settings.deterministic_nick_colors),
        )
    }

    /// Rooms may only send the affiliations and roles defined by XEP-0045. Presences carrying
    /// anything else are logged and must be dropped without touching the roster.
    fn affiliation_and_role(&self, presence: &MucPresence) -> Option<(RoomAffiliation, RoomRole)> {
        let parsed = RoomAffiliation::parse(presence.affiliation.as_deref()).and_then(
            |affiliation| Ok((affiliation, RoomRole::parse(presence.role.as_deref())?)),
        );

        match parsed {
            Ok(values) => Some(values),
            Err(err) => {
                let err = RoomError::ProtocolInconsistency {
                    occupant_id: presence.occupant_id.clone(),
                    reason: err.to_string(),
                };
                warn!("Ignoring presence. {}", err);
                None
            }
        }
    }
}

fn notify(notification: RoomNotification) -> RoomEffect {
    RoomEffect::Notify(notification)
}
