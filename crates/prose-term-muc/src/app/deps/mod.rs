// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedSender;

use prose_term_xmpp::{IDProvider, TimeProvider};

pub use muc_transport::{MucTransport, OwnPresence};
pub use scheduler::{PendingTask, ScheduledEvent, ScheduledEventKind, ScheduledTask, Scheduler};

use crate::app::event_handlers::{ClientEventDispatcherTrait, MucEvent};
use crate::app::services::MucRoomsService;

mod muc_transport;
mod scheduler;

pub type DynClientEventDispatcher = Arc<dyn ClientEventDispatcherTrait>;
pub type DynIDProvider = Arc<dyn IDProvider>;
pub type DynMucTransport = Arc<dyn MucTransport>;
pub type DynScheduler = Arc<dyn Scheduler>;
pub type DynTimeProvider = Arc<dyn TimeProvider>;
pub type MucEventSender = UnboundedSender<MucEvent>;
pub type SharedMucRoomsService = Arc<Mutex<MucRoomsService>>;
