// prose-term/prose-term-muc
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use client::{ClientDelegate, MucClient};
pub use client_builder::{MucClientBuilder, UndefinedConnection};
pub use client_event::ClientEvent;
pub use infra::xmpp::{DynXmppConnection, XmppConnection};

#[cfg(any(test, feature = "test"))]
pub mod test;

pub mod app;
mod client;
mod client_builder;
mod client_event;

#[cfg(feature = "test")]
pub mod domain;
#[cfg(not(feature = "test"))]
pub(crate) mod domain;

#[cfg(feature = "test")]
pub mod infra;
#[cfg(not(feature = "test"))]
pub(crate) mod infra;
