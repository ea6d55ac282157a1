// prose-term/prose-term-xmpp
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use muc_user::{Actor, Destroy, Item, MucUser, StatusCode};

pub mod muc;
pub mod muc_user;
pub mod ns;
