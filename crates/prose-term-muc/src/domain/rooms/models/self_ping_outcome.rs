// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

/// The verdict on a self-ping round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelfPingOutcome {
    /// The room answered on behalf of our occupant, so we are still joined.
    Alive,
    /// No answer within the timeout.
    TimedOut,
    /// The room answered with an error that means we are no longer an occupant.
    Failed { reason: String },
}
