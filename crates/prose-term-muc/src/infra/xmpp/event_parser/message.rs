// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use chrono::{DateTime, Utc};
use jid::Jid;
use xmpp_parsers::message::{Message, MessageType};

use prose_term_xmpp::ns;

use crate::app::event_handlers::MessageActivity;

/// Returns the activity of the sender for live groupchat messages. Subject changes, history
/// (delayed) messages and messages without a body don't count.
pub fn parse_message(message: Message, received_at: DateTime<Utc>) -> Option<MessageActivity> {
    if message.type_ != MessageType::Groupchat {
        return None;
    }
    let Some(Jid::Full(from)) = message.from else {
        return None;
    };
    if !message.subjects.is_empty() || message.bodies.is_empty() {
        return None;
    }
    if message
        .payloads
        .iter()
        .any(|payload| payload.is("delay", ns::DELAY))
    {
        return None;
    }

    Some(MessageActivity {
        occupant_id: from.into(),
        timestamp: received_at,
    })
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::TimeZone;
    use minidom::Element;

    use super::*;

    fn parse(xml: &str) -> Result<Option<MessageActivity>> {
        let message = Message::try_from(xml.parse::<Element>()?)?;
        Ok(parse_message(
            message,
            Utc.with_ymd_and_hms(2023, 6, 1, 12, 0, 0).unwrap(),
        ))
    }

    #[test]
    fn test_live_groupchat_message() -> Result<()> {
        let activity = parse(
            r#"<message xmlns='jabber:client' type='groupchat' from='room@conference.prose.org/alice'>
                <body>Hi</body>
            </message>"#,
        )?
        .expect("Expected activity");

        assert_eq!(activity.occupant_id.nickname(), "alice");
        Ok(())
    }

    #[test]
    fn test_ignores_history_and_subjects() -> Result<()> {
        assert!(parse(
            r#"<message xmlns='jabber:client' type='groupchat' from='room@conference.prose.org/alice'>
                <body>Hi</body>
                <delay xmlns='urn:xmpp:delay' stamp='2023-05-01T10:00:00Z'/>
            </message>"#,
        )?
        .is_none());

        assert!(parse(
            r#"<message xmlns='jabber:client' type='groupchat' from='room@conference.prose.org/alice'>
                <subject>New topic</subject>
            </message>"#,
        )?
        .is_none());

        assert!(parse(
            r#"<message xmlns='jabber:client' type='chat' from='room@conference.prose.org/alice'>
                <body>Hi</body>
            </message>"#,
        )?
        .is_none());

        Ok(())
    }
}
