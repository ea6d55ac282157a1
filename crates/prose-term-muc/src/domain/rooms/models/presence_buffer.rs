// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::VecDeque;

use super::MucPresence;

/// Presences received before the room confirmed our own join.
#[derive(Debug, Default, Clone)]
pub struct PresenceBuffer {
    presences: VecDeque<MucPresence>,
}

impl PresenceBuffer {
    pub fn enqueue(&mut self, presence: MucPresence) {
        self.presences.push_back(presence)
    }

    /// Returns all buffered presences in the order they were received and empties the buffer.
    pub fn drain_ordered(&mut self) -> Vec<MucPresence> {
        self.presences.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.presences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presences.is_empty()
    }

    pub fn clear(&mut self) {
        self.presences.clear()
    }
}
