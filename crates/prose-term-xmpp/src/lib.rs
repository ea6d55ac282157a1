// prose-term/prose-term-xmpp
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use deps::{IDProvider, SystemTimeProvider, TimeProvider, UUIDProvider};
pub use stanza::ns;
pub use util::{ElementExt, ParseError, RequestError};

mod deps;
pub mod stanza;
mod util;

#[cfg(any(test, feature = "test"))]
pub mod test;
