// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use private_conversation::{PrivateConversation, PrivateConversationRef};

mod private_conversation;
