// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt;

use serde::{de, Deserializer};

/// Parses a duration such as `"1d3m1h"` into seconds. Units are `d`, `h`, `m` and `s`;
/// trailing digits without a unit are seconds. Any other character yields 0.
pub fn parse_duration_secs(value: &str) -> i64 {
    let mut result: i64 = 0;
    let mut pending: i64 = 0;

    for c in value.chars() {
        if let Some(digit) = c.to_digit(10) {
            pending = pending.saturating_mul(10).saturating_add(i64::from(digit));
            continue;
        }

        let unit = match c {
            's' => 1,
            'm' => 60,
            'h' => 3600,
            'd' => 86400,
            _ => return 0,
        };
        result = result.saturating_add(pending.saturating_mul(unit));
        pending = 0;
    }

    result.saturating_add(pending)
}

/// Deserializes a number of seconds given either as an integer or as a duration string.
pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor;

    impl<'de> de::Visitor<'de> for Visitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number of seconds or a duration like \"1h30m\"")
        }

        fn visit_i64<E>(self, value: i64) -> Result<i64, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<i64, E>
        where
            E: de::Error,
        {
            i64::try_from(value).map_err(|e| E::custom(format!("{}", e)))
        }

        fn visit_str<E>(self, value: &str) -> Result<i64, E>
        where
            E: de::Error,
        {
            Ok(parse_duration_secs(value.trim()))
        }
    }

    deserializer.deserialize_any(Visitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_secs() {
        assert_eq!(parse_duration_secs("1d3m1h"), 90180);
        assert_eq!(parse_duration_secs("5"), 5);
        assert_eq!(parse_duration_secs("1m30"), 90);
        assert_eq!(parse_duration_secs("2h"), 7200);
        assert_eq!(parse_duration_secs(""), 0);
        assert_eq!(parse_duration_secs("-5"), 0);
        assert_eq!(parse_duration_secs("5 minutes"), 0);
    }
}
