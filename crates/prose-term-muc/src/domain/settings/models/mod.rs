// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use duration_secs::parse_duration_secs;
pub use muc_settings::{MucConfig, MucSettings};

mod duration_secs;
mod muc_settings;
