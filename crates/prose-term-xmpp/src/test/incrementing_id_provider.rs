// prose-term/prose-term-xmpp
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::atomic::{AtomicU64, Ordering};

use crate::IDProvider;

/// Hands out `{prefix}-1`, `{prefix}-2`, … so that tests can predict stanza ids.
pub struct IncrementingIDProvider {
    prefix: String,
    last_id: AtomicU64,
}

impl IncrementingIDProvider {
    pub fn new(prefix: &str) -> Self {
        IncrementingIDProvider {
            prefix: prefix.to_string(),
            last_id: AtomicU64::new(0),
        }
    }
}

impl IDProvider for IncrementingIDProvider {
    fn new_id(&self) -> String {
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}-{}", self.prefix, id)
    }
}
