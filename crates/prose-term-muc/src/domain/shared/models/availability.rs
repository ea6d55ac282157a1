// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Display, Formatter};

use strum_macros::EnumString;

/// The `<show/>` value of an occupant. A presence without `<show/>` means `Available`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Availability {
    #[default]
    Available,
    Chat,
    Away,
    #[strum(serialize = "dnd")]
    DoNotDisturb,
    #[strum(serialize = "xa")]
    ExtendedAway,
}

impl Availability {
    /// The human readable label used in notices.
    pub fn label(&self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::Chat => "Chatty",
            Availability::Away => "Away",
            Availability::DoNotDisturb => "Busy",
            Availability::ExtendedAway => "Not available",
        }
    }
}

impl Display for Availability {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_parses_show_values() {
        assert_eq!(Availability::from_str("dnd"), Ok(Availability::DoNotDisturb));
        assert_eq!(Availability::from_str("xa"), Ok(Availability::ExtendedAway));
        assert_eq!(Availability::from_str("chat"), Ok(Availability::Chat));
        assert!(Availability::from_str("busy").is_err());
    }
}
