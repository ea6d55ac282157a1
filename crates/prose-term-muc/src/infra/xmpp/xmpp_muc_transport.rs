// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::time::Duration;

use async_trait::async_trait;
use minidom::Element;
use tracing::debug;
use xmpp_parsers::iq::Iq;
use xmpp_parsers::presence::Show;

use prose_term_xmpp::stanza::muc;
use prose_term_xmpp::{IDProvider, RequestError};

use crate::app::deps::{DynIDProvider, MucEventSender, MucTransport, OwnPresence};
use crate::app::event_handlers::MucEvent;
use crate::domain::rooms::models::RoomPresenceRequest;
use crate::domain::shared::models::OccupantId;

use super::DynXmppConnection;

/// The parts of an XMPP connection the rooms need.
#[async_trait]
pub trait XmppConnection: Send + Sync {
    fn send_stanza(&self, stanza: Element) -> Result<(), RequestError>;
    /// Sends `iq` and waits for the matching response. Error responses are returned as
    /// `RequestError::XMPP`.
    async fn send_iq(&self, iq: Iq) -> Result<Option<Element>, RequestError>;
}

pub struct XmppMucTransport {
    connection: DynXmppConnection,
    id_provider: DynIDProvider,
    events: MucEventSender,
}

impl XmppMucTransport {
    pub fn new(
        connection: DynXmppConnection,
        id_provider: DynIDProvider,
        events: MucEventSender,
    ) -> Self {
        Self {
            connection,
            id_provider,
            events,
        }
    }
}

impl MucTransport for XmppMucTransport {
    fn send_presence(
        &self,
        request: &RoomPresenceRequest,
        own_presence: &OwnPresence,
    ) -> Result<(), RequestError> {
        let show: Option<Show> = own_presence.show.into();
        let status = own_presence.status.clone();

        let presence = match request {
            RoomPresenceRequest::Join {
                occupant_id,
                password,
            } => muc::join_presence(
                occupant_id.clone().into_inner(),
                password.clone(),
                show,
                status,
            ),
            RoomPresenceRequest::ChangeNick { occupant_id }
            | RoomPresenceRequest::UpdateStatus { occupant_id } => {
                muc::nick_change_presence(occupant_id.clone().into_inner(), show, status)
            }
            RoomPresenceRequest::Leave {
                occupant_id,
                status,
            } => muc::leave_presence(occupant_id.clone().into_inner(), status.clone()),
        };

        self.connection.send_stanza(presence.into())
    }

    fn send_self_ping(
        &self,
        occupant_id: &OccupantId,
        ping_id: u64,
        timeout: Duration,
    ) -> Result<(), RequestError> {
        let iq = muc::self_ping_iq(self.id_provider.new_id(), occupant_id.clone().into_inner());
        let connection = self.connection.clone();
        let events = self.events.clone();
        let occupant_id = occupant_id.clone();

        tokio::spawn(async move {
            let result = match tokio::time::timeout(timeout, connection.send_iq(iq)).await {
                Ok(result) => result.map(|_| ()),
                Err(_) => Err(RequestError::TimedOut),
            };
            if events
                .send(MucEvent::SelfPingResult {
                    occupant_id,
                    ping_id,
                    result,
                })
                .is_err()
            {
                debug!("Dropping self-ping result, the event loop is gone.");
            }
        });

        Ok(())
    }
}
