// prose-term/prose-term-xmpp
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use uuid::Uuid;

/// Source of the `id` attribute of outgoing IQs. Replies are matched against it.
pub trait IDProvider: Send + Sync {
    fn new_id(&self) -> String;
}

/// Random ids, unique across reconnects.
#[derive(Default)]
pub struct UUIDProvider;

impl IDProvider for UUIDProvider {
    fn new_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}
