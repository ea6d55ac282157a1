// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use muc_room::{MucRoom, MAX_NOTIFICATIONS};
pub use muc_rooms_service::MucRoomsService;
pub use private_conversation_bridge::PrivateConversationBridge;
pub use self_ping_monitor::SelfPingMonitor;

mod muc_room;
mod muc_rooms_service;
mod private_conversation_bridge;
mod self_ping_monitor;
