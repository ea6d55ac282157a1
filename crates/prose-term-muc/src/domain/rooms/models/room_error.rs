// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use prose_term_xmpp::RequestError;

use crate::domain::shared::models::{OccupantId, RoomId};

#[derive(thiserror::Error, Debug)]
pub enum RoomError {
    #[error("Invalid role or affiliation '{value}'.")]
    InvalidRoleOrAffiliation { value: String },
    #[error("No user with nickname '{nick}' in room.")]
    UserNotFound { nick: String },
    #[error("Cannot rename '{old_nick}' to '{new_nick}', the nickname is taken.")]
    InvalidRename { old_nick: String, new_nick: String },
    #[error("Inconsistent presence from {occupant_id}: {reason}")]
    ProtocolInconsistency {
        occupant_id: OccupantId,
        reason: String,
    },
    #[error("Conversation with {0} is inactive.")]
    ConversationInactive(OccupantId),
    #[error("Room {0} does not exist.")]
    RoomNotFound(RoomId),
    #[error("Room {0} is already connected.")]
    RoomIsAlreadyConnected(RoomId),
    #[error("{action} failed: {reason}")]
    AdminActionFailed { action: String, reason: String },
    #[error("Self-ping to {0} timed out.")]
    SelfPingTimeout(OccupantId),
    #[error("Self-ping to {occupant_id} failed: {reason}")]
    SelfPingError {
        occupant_id: OccupantId,
        reason: String,
    },
    #[error(transparent)]
    RequestError(#[from] RequestError),
    #[error(transparent)]
    JidError(#[from] jid::Error),
}
