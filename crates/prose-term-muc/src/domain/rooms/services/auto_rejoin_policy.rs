// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::time::Duration;

use crate::domain::rooms::models::RejoinDecision;
use crate::domain::settings::models::MucSettings;

/// Why we are no longer in a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalCause {
    Kicked,
    Banned,
    ServiceShutdown,
    NonMemberKick,
    Left,
}

/// Decides whether we rejoin a room we were removed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoRejoinPolicy {
    enabled: bool,
    delay_secs: i64,
}

impl AutoRejoinPolicy {
    pub fn new(enabled: bool, delay_secs: i64) -> Self {
        Self {
            enabled,
            delay_secs,
        }
    }

    pub fn from_settings(settings: &MucSettings) -> Self {
        Self::new(settings.autorejoin, settings.autorejoin_delay)
    }

    pub fn decide(&self, cause: RemovalCause) -> RejoinDecision {
        match cause {
            RemovalCause::Kicked | RemovalCause::Banned if self.enabled => {
                if self.delay_secs <= 0 {
                    RejoinDecision::Immediately
                } else {
                    RejoinDecision::After(Duration::from_secs(self.delay_secs.unsigned_abs()))
                }
            }
            RemovalCause::Kicked
            | RemovalCause::Banned
            | RemovalCause::ServiceShutdown
            | RemovalCause::NonMemberKick
            | RemovalCause::Left => RejoinDecision::Never,
        }
    }
}
