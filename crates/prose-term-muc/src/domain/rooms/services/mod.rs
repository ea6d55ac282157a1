// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use auto_rejoin_policy::{AutoRejoinPolicy, RemovalCause};
pub use muc_state_machine::MucStateMachine;

mod auto_rejoin_policy;
mod muc_state_machine;
