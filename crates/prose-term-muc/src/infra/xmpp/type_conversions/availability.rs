// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use xmpp_parsers::presence;

use crate::domain::shared::models::Availability;

impl From<Option<presence::Show>> for Availability {
    fn from(value: Option<presence::Show>) -> Self {
        // https://datatracker.ietf.org/doc/html/rfc6121#section-4.7.2.1
        match value {
            None => Availability::Available,
            Some(presence::Show::Chat) => Availability::Chat,
            Some(presence::Show::Away) => Availability::Away,
            Some(presence::Show::Dnd) => Availability::DoNotDisturb,
            Some(presence::Show::Xa) => Availability::ExtendedAway,
        }
    }
}

impl From<Availability> for Option<presence::Show> {
    fn from(value: Availability) -> Self {
        match value {
            Availability::Available => None,
            Availability::Chat => Some(presence::Show::Chat),
            Availability::Away => Some(presence::Show::Away),
            Availability::DoNotDisturb => Some(presence::Show::Dnd),
            Availability::ExtendedAway => Some(presence::Show::Xa),
        }
    }
}
