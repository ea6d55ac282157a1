// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::shared::models::RoomId;

use super::duration_secs;

/// Behaviour of a room. Durations are in seconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MucSettings {
    /// Join and leave notices are shown for users who talked within this many seconds.
    /// -1 always shows them, 0 hides joins.
    pub hide_exit_join: i64,
    /// Status change notices are shown for users who talked within this many seconds.
    /// -1 always shows them.
    pub hide_status_change: i64,
    /// Rejoin automatically after being kicked or banned.
    pub autorejoin: bool,
    #[serde(deserialize_with = "duration_secs::deserialize")]
    pub autorejoin_delay: i64,
    /// 0 or negative disables the self-ping.
    #[serde(deserialize_with = "duration_secs::deserialize")]
    pub self_ping_interval: i64,
    #[serde(deserialize_with = "duration_secs::deserialize")]
    pub self_ping_timeout: i64,
    pub deterministic_nick_colors: bool,
}

impl Default for MucSettings {
    fn default() -> Self {
        Self {
            hide_exit_join: -1,
            hide_status_change: 120,
            autorejoin: false,
            autorejoin_delay: 5,
            self_ping_interval: 0,
            self_ping_timeout: 60,
            deterministic_nick_colors: true,
        }
    }
}

/// Per-room overrides. Missing keys fall back to the global settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
struct MucSettingsOverride {
    hide_exit_join: Option<i64>,
    hide_status_change: Option<i64>,
    autorejoin: Option<bool>,
    #[serde(deserialize_with = "deserialize_optional_duration")]
    autorejoin_delay: Option<i64>,
    #[serde(deserialize_with = "deserialize_optional_duration")]
    self_ping_interval: Option<i64>,
    #[serde(deserialize_with = "deserialize_optional_duration")]
    self_ping_timeout: Option<i64>,
    deterministic_nick_colors: Option<bool>,
}

fn deserialize_optional_duration<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    duration_secs::deserialize(deserializer).map(Some)
}

impl MucSettingsOverride {
    fn apply_to(&self, settings: &mut MucSettings) {
        if let Some(value) = self.hide_exit_join {
            settings.hide_exit_join = value;
        }
        if let Some(value) = self.hide_status_change {
            settings.hide_status_change = value;
        }
        if let Some(value) = self.autorejoin {
            settings.autorejoin = value;
        }
        if let Some(value) = self.autorejoin_delay {
            settings.autorejoin_delay = value;
        }
        if let Some(value) = self.self_ping_interval {
            settings.self_ping_interval = value;
        }
        if let Some(value) = self.self_ping_timeout {
            settings.self_ping_timeout = value;
        }
        if let Some(value) = self.deterministic_nick_colors {
            settings.deterministic_nick_colors = value;
        }
    }
}

/// Global MUC settings plus overrides keyed by room JID.
///
/// ```json
/// { "autorejoin": true, "rooms": { "room@conference.prose.org": { "autorejoin_delay": "1m" } } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MucConfig {
    #[serde(flatten)]
    defaults: MucSettings,
    #[serde(default)]
    rooms: HashMap<String, MucSettingsOverride>,
}

impl MucConfig {
    pub fn new(defaults: MucSettings) -> Self {
        Self {
            defaults,
            rooms: Default::default(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn defaults(&self) -> &MucSettings {
        &self.defaults
    }

    /// The settings for `room_id` with its overrides applied.
    pub fn settings_for(&self, room_id: &RoomId) -> MucSettings {
        let mut settings = self.defaults.clone();
        if let Some(overrides) = self.rooms.get(&room_id.to_string()) {
            overrides.apply_to(&mut settings);
        }
        settings
    }
}
