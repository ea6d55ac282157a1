// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Display, Formatter};

use jid::Jid;

use crate::domain::shared::models::Availability;

use super::{RoomAffiliation, RoomRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Warning,
    Error,
}

/// A line for the room's message log.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomNotification {
    pub kind: NotificationKind,
    pub notice: MucNotice,
    pub text: String,
}

impl RoomNotification {
    pub fn new(kind: NotificationKind, notice: MucNotice) -> Self {
        Self {
            kind,
            text: notice.to_string(),
            notice,
        }
    }

    pub fn info(notice: MucNotice) -> Self {
        Self::new(NotificationKind::Info, notice)
    }

    pub fn warning(notice: MucNotice) -> Self {
        Self::new(NotificationKind::Warning, notice)
    }

    pub fn error(notice: MucNotice) -> Self {
        Self::new(NotificationKind::Error, notice)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MucNotice {
    OwnJoined {
        nick: String,
    },
    RoomCreated,
    RoomIsLogged,
    RoomIsNonAnonymous,
    UserJoined {
        nick: String,
        jid: Option<Jid>,
    },
    UserLeft {
        nick: String,
        jid: Option<Jid>,
        status: Option<String>,
        due_to_error: bool,
    },
    OwnLeft {
        nick: String,
        reason: Option<String>,
    },
    NickChanged {
        old_nick: String,
        new_nick: String,
    },
    Kicked {
        nick: String,
        is_self: bool,
        actor: Option<String>,
        reason: Option<String>,
    },
    Banned {
        nick: String,
        is_self: bool,
        actor: Option<String>,
        reason: Option<String>,
    },
    ServiceShutdown,
    NonMemberKicked,
    StatusChanged {
        nick: String,
        is_self: bool,
        changes: Vec<StatusChange>,
    },
    PresenceError {
        text: String,
    },
    AdminActionFailed {
        action: String,
        reason: String,
    },
    ServiceNotResponding,
    ServiceRespondingAgain,
}

/// One changed attribute in a status change summary.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusChange {
    Affiliation(RoomAffiliation),
    Role(RoomRole),
    Show(Availability),
    Status(String),
}

impl Display for StatusChange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusChange::Affiliation(affiliation) => write!(f, "affiliation: {}", affiliation),
            StatusChange::Role(role) => write!(f, "role: {}", role),
            StatusChange::Show(show) => write!(f, "show: {}", show),
            StatusChange::Status(status) => write!(f, "status: {}", status),
        }
    }
}

fn write_removal(
    f: &mut Formatter<'_>,
    verb: &str,
    nick: &str,
    is_self: bool,
    actor: &Option<String>,
    reason: &Option<String>,
) -> std::fmt::Result {
    match (is_self, actor) {
        (true, Some(actor)) => write!(f, "You have been {} by {}", verb, actor)?,
        (true, None) => write!(f, "You have been {}.", verb)?,
        (false, Some(actor)) => write!(f, "{} has been {} by {}", nick, verb, actor)?,
        (false, None) => write!(f, "{} has been {}", nick, verb)?,
    }
    if let Some(reason) = reason {
        write!(f, " Reason: {}", reason)?;
    }
    Ok(())
}

impl Display for MucNotice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MucNotice::OwnJoined { nick } => write!(f, "You ({}) joined the room", nick),
            MucNotice::RoomCreated => write!(f, "Info: The room has been created"),
            MucNotice::RoomIsLogged => write!(f, "Warning: This room is publicly logged"),
            MucNotice::RoomIsNonAnonymous => write!(f, "Warning: This room is not anonymous."),
            MucNotice::UserJoined { nick, jid: None } => write!(f, "{} joined the room", nick),
            MucNotice::UserJoined {
                nick,
                jid: Some(jid),
            } => write!(f, "{} ({}) joined the room", nick, jid),
            MucNotice::UserLeft {
                nick,
                jid,
                status,
                due_to_error,
            } => {
                write!(f, "{}", nick)?;
                if let Some(jid) = jid {
                    write!(f, " ({})", jid)?;
                }
                write!(f, " has left the room")?;
                if *due_to_error {
                    write!(f, " due to an error")?;
                }
                if let Some(status) = status {
                    write!(f, " ({})", status)?;
                }
                Ok(())
            }
            MucNotice::OwnLeft { nick, reason: None } => {
                write!(f, "You ({}) left the room", nick)
            }
            MucNotice::OwnLeft {
                nick,
                reason: Some(reason),
            } => write!(f, "You ({}) left the room ({})", nick, reason),
            MucNotice::NickChanged { old_nick, new_nick } => {
                write!(f, "{} is now known as {}", old_nick, new_nick)
            }
            MucNotice::Kicked {
                nick,
                is_self,
                actor,
                reason,
            } => write_removal(f, "kicked", nick, *is_self, actor, reason),
            MucNotice::Banned {
                nick,
                is_self,
                actor,
                reason,
            } => write_removal(f, "banned", nick, *is_self, actor, reason),
            MucNotice::ServiceShutdown => write!(
                f,
                "You have been kicked because the MUC service is shutting down."
            ),
            MucNotice::NonMemberKicked => write!(
                f,
                "You have been kicked because you are not a member and the room is now members-only."
            ),
            MucNotice::StatusChanged {
                nick,
                is_self,
                changes,
            } => {
                if *is_self {
                    write!(f, "You changed: ")?;
                } else {
                    write!(f, "{} changed: ", nick)?;
                }
                let changes = changes
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{}", changes)
            }
            MucNotice::PresenceError { text } => write!(f, "Error: {}", text),
            MucNotice::AdminActionFailed { action, reason } => {
                write!(f, "Error: {} failed: {}", action, reason)
            }
            MucNotice::ServiceNotResponding => write!(f, "MUC service not responding."),
            MucNotice::ServiceRespondingAgain => write!(f, "MUC service is responding again."),
        }
    }
}
