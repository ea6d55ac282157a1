// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use manual_scheduler::ManualScheduler;
pub use recording_transport::RecordingTransport;


#[macro_export]
macro_rules! room_id {
    ($jid:expr) => {
        RoomId::from($jid.parse::<jid::BareJid>().unwrap())
    };
}
