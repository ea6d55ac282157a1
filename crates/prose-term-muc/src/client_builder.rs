// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{mpsc, Notify};

use prose_term_xmpp::{IDProvider, SystemTimeProvider, TimeProvider, UUIDProvider};

use crate::app::deps::{
    DynClientEventDispatcher, DynIDProvider, DynMucTransport, DynScheduler, DynTimeProvider,
};
use crate::app::event_handlers::{
    ClientEventDispatcher, MessagesEventHandler, MucEventHandlerQueue, RoomsEventHandler,
    TimersEventHandler,
};
use crate::app::services::MucRoomsService;
use crate::client::MucClientInner;
use crate::domain::settings::models::MucConfig;
use crate::infra::scheduling::TokioScheduler;
use crate::infra::xmpp::{DynXmppConnection, XmppMucTransport};
use crate::{ClientDelegate, MucClient};

pub struct UndefinedConnection;

pub struct MucClientBuilder<C> {
    config: MucConfig,
    connection: C,
    delegate: Option<Box<dyn ClientDelegate>>,
    id_provider: DynIDProvider,
    time_provider: DynTimeProvider,
}

impl MucClientBuilder<UndefinedConnection> {
    pub(crate) fn new() -> Self {
        MucClientBuilder {
            config: Default::default(),
            connection: UndefinedConnection,
            delegate: None,
            id_provider: Arc::new(UUIDProvider),
            time_provider: Arc::new(SystemTimeProvider::default()),
        }
    }

    pub fn set_connection(
        self,
        connection: DynXmppConnection,
    ) -> MucClientBuilder<DynXmppConnection> {
        MucClientBuilder {
            config: self.config,
            connection,
            delegate: self.delegate,
            id_provider: self.id_provider,
            time_provider: self.time_provider,
        }
    }
}

impl<C> MucClientBuilder<C> {
    pub fn set_config(mut self, config: MucConfig) -> Self {
        self.config = config;
        self
    }

    pub fn set_delegate(mut self, delegate: Option<Box<dyn ClientDelegate>>) -> Self {
        self.delegate = delegate;
        self
    }

    pub fn set_id_provider<P: IDProvider + 'static>(mut self, id_provider: P) -> Self {
        self.id_provider = Arc::new(id_provider);
        self
    }

    pub fn set_time_provider<T: TimeProvider + 'static>(mut self, time_provider: T) -> Self {
        self.time_provider = Arc::new(time_provider);
        self
    }
}

impl MucClientBuilder<DynXmppConnection> {
    /// Builds the client. Must be called from within a tokio runtime, since pings and delays
    /// run as tokio tasks.
    pub fn build(self) -> MucClient {
        let (sender, receiver) = mpsc::unbounded_channel();

        let transport: DynMucTransport = Arc::new(XmppMucTransport::new(
            self.connection,
            self.id_provider,
            sender.clone(),
        ));
        let scheduler: DynScheduler = Arc::new(TokioScheduler::new(sender.clone()));
        let rooms = Arc::new(Mutex::new(MucRoomsService::new(
            self.config,
            transport,
            scheduler,
            self.time_provider.clone(),
        )));
        let client_event_dispatcher: DynClientEventDispatcher =
            Arc::new(ClientEventDispatcher::new(self.delegate));

        let handlers = MucEventHandlerQueue::new(vec![
            Box::new(RoomsEventHandler::new(
                rooms.clone(),
                client_event_dispatcher.clone(),
            )),
            Box::new(MessagesEventHandler::new(
                rooms.clone(),
                client_event_dispatcher.clone(),
            )),
            Box::new(TimersEventHandler::new(
                rooms.clone(),
                client_event_dispatcher.clone(),
            )),
        ]);

        MucClient::from(Arc::new(MucClientInner {
            rooms,
            handlers,
            client_event_dispatcher,
            time_provider: self.time_provider,
            events: sender,
            receiver: Mutex::new(Some(receiver)),
            shutdown: Notify::new(),
        }))
    }
}
