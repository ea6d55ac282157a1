// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use rand::Rng;
use sha1::{Digest, Sha1};

/// An xterm-256 color index used to render a nickname.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NickColor(pub u8);

impl NickColor {
    /// The first color of the 6x6x6 xterm cube after black.
    const PALETTE_START: u8 = 17;
    /// Number of colors from `PALETTE_START` through the last cube color (231).
    const PALETTE_LEN: u64 = 215;

    /// Returns a color derived from `nick` that is the same across sessions and clients.
    pub fn deterministic(nick: &str) -> Self {
        let digest = Sha1::digest(nick.as_bytes());
        let hash = digest
            .iter()
            .take(8)
            .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte));
        Self::from_palette_index(hash % Self::PALETTE_LEN)
    }

    pub fn random() -> Self {
        Self::from_palette_index(rand::thread_rng().gen_range(0..Self::PALETTE_LEN))
    }

    /// Picks the color for a new user.
    pub fn for_nick(nick: &str, deterministic: bool) -> Self {
        if deterministic {
            Self::deterministic(nick)
        } else {
            Self::random()
        }
    }

    fn from_palette_index(index: u64) -> Self {
        // index < PALETTE_LEN, so the sum stays within 17..=231.
        NickColor(Self::PALETTE_START + index as u8)
    }
}
