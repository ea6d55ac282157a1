// prose-term/prose-term-xmpp
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use xmpp_parsers::stanza_error::{DefinedCondition, StanzaError};

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Request Timeout")]
    TimedOut,
    #[error("Request Error: Unexpected server response")]
    UnexpectedResponse,
    #[error("XMPP Error: {err:?}")]
    XMPP { err: StanzaError },
    #[error("Request Error: Not connected")]
    Disconnected,
    #[error(transparent)]
    JidError(#[from] jid::Error),
    #[error("Request error: {msg}")]
    Generic { msg: String },
    #[error(transparent)]
    ParseError(#[from] ParseError),
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Parse error: {msg}")]
    Generic { msg: String },
    #[error(transparent)]
    XMPPParseError(#[from] xmpp_parsers::Error),
    #[error(transparent)]
    ParseIntError(#[from] std::num::ParseIntError),
    #[error(transparent)]
    JidError(#[from] jid::Error),
}

impl From<xmpp_parsers::Error> for RequestError {
    fn from(value: xmpp_parsers::Error) -> Self {
        Self::ParseError(value.into())
    }
}

impl From<StanzaError> for RequestError {
    fn from(value: StanzaError) -> Self {
        Self::XMPP { err: value }
    }
}

impl RequestError {
    pub fn is_timeout_err(&self) -> bool {
        matches!(self, Self::TimedOut)
    }

    pub fn defined_condition(&self) -> Option<DefinedCondition> {
        let RequestError::XMPP {
            err: StanzaError {
                defined_condition, ..
            },
        } = self
        else {
            return None;
        };
        Some(defined_condition.clone())
    }

    /// Returns the first human-readable text attached to the stanza error, if any.
    pub fn error_text(&self) -> Option<String> {
        let RequestError::XMPP { err } = self else {
            return None;
        };
        err.texts
            .values()
            .find(|text| !text.is_empty())
            .cloned()
    }
}
