// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use availability::Availability;
pub use occupant_id::OccupantId;
pub use room_id::RoomId;

mod availability;
mod occupant_id;
mod room_id;
