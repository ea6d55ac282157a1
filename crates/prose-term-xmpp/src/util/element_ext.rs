// prose-term/prose-term-xmpp
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::str::FromStr;

use minidom::Element;

use crate::util::ParseError;

pub trait ElementExt {
    fn expect_is(&self, name: &str, ns: &str) -> Result<(), ParseError>;

    /// Parses the attribute `name` if it is present. Empty attributes are treated as absent.
    fn parse_attr<T>(&self, name: &str) -> Result<Option<T>, ParseError>
    where
        T: FromStr,
        ParseError: From<T::Err>;

    fn non_empty_attr(&self, name: &str) -> Option<String>;

    fn non_empty_text(&self) -> Option<String>;
}

impl ElementExt for Element {
    fn expect_is(&self, name: &str, ns: &str) -> Result<(), ParseError> {
        if !self.is(name, ns) {
            return Err(ParseError::Generic {
                msg: format!(
                    "Expected element with name {} and namespace {}. Got {} and {} instead.",
                    name,
                    ns,
                    self.name(),
                    self.ns()
                ),
            });
        }
        Ok(())
    }

    fn parse_attr<T>(&self, name: &str) -> Result<Option<T>, ParseError>
    where
        T: FromStr,
        ParseError: From<T::Err>,
    {
        let Some(value) = self.non_empty_attr(name) else {
            return Ok(None);
        };
        Ok(Some(value.parse::<T>()?))
    }

    fn non_empty_attr(&self, name: &str) -> Option<String> {
        self.attr(name)
            .filter(|value| !value.is_empty())
            .map(ToString::to_string)
    }

    fn non_empty_text(&self) -> Option<String> {
        let text = self.text();
        (!text.is_empty()).then_some(text)
    }
}
