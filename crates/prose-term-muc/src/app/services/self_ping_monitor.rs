// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::time::Duration;

use xmpp_parsers::stanza_error::DefinedCondition;

use prose_term_xmpp::RequestError;

use crate::app::deps::{PendingTask, ScheduledEventKind, Scheduler};
use crate::domain::rooms::models::SelfPingOutcome;
use crate::domain::settings::models::MucSettings;
use crate::domain::shared::models::RoomId;

const NOT_IN_ROOM_REASON: &str = "not in this room";

/// Periodically checks that the room still considers us an occupant (XEP-0410).
#[derive(Debug)]
pub struct SelfPingMonitor {
    interval_secs: i64,
    timeout_secs: i64,
    task: PendingTask,
    in_flight: Option<u64>,
}

impl SelfPingMonitor {
    pub fn new(settings: &MucSettings) -> Self {
        Self {
            interval_secs: settings.self_ping_interval,
            timeout_secs: settings.self_ping_timeout,
            task: PendingTask::new(ScheduledEventKind::SelfPing),
            in_flight: None,
        }
    }

    /// An interval of zero or less disables the monitor.
    pub fn is_enabled(&self) -> bool {
        self.interval_secs > 0
    }

    pub fn is_armed(&self) -> bool {
        self.task.is_pending()
    }

    /// Schedules the next ping, replacing an outstanding one.
    pub fn arm(&mut self, scheduler: &dyn Scheduler, room_id: &RoomId) {
        if !self.is_enabled() {
            return;
        }
        self.task.schedule(
            scheduler,
            room_id,
            Duration::from_secs(self.interval_secs.unsigned_abs()),
        );
    }

    /// Cancels the next ping and forgets the one awaiting its result.
    pub fn disarm(&mut self) {
        self.task.cancel();
        self.in_flight = None;
    }

    /// Returns true if the ping identified by `id` is due. It is then awaiting its result.
    pub fn fire(&mut self, id: u64) -> bool {
        if !self.task.complete(id) {
            return false;
        }
        self.in_flight = Some(id);
        true
    }

    /// Returns true if `id` is the ping we are waiting for. Results of pings sent before the
    /// monitor was disarmed do not match.
    pub fn settle(&mut self, id: u64) -> bool {
        if self.in_flight != Some(id) {
            return false;
        }
        self.in_flight = None;
        true
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1).unsigned_abs())
    }

    pub fn evaluate(result: &Result<(), RequestError>) -> SelfPingOutcome {
        let Err(err) = result else {
            return SelfPingOutcome::Alive;
        };

        if err.is_timeout_err() {
            return SelfPingOutcome::TimedOut;
        }

        match err.defined_condition() {
            // The room forwarded the ping to one of our resources, which did not understand it.
            Some(
                DefinedCondition::FeatureNotImplemented
                | DefinedCondition::ServiceUnavailable
                | DefinedCondition::ItemNotFound,
            ) => SelfPingOutcome::Alive,
            Some(_) => SelfPingOutcome::Failed {
                reason: err
                    .error_text()
                    .unwrap_or_else(|| NOT_IN_ROOM_REASON.to_string()),
            },
            None => SelfPingOutcome::Failed {
                reason: err.to_string(),
            },
        }
    }
}
