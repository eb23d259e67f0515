//-
// Copyright (c) 2026, the mailcove authors
//
// This file is part of mailcove.
//
// Mailcove is free software: you can  redistribute it and/or modify it under
// the terms of  the GNU General Public  License as published  by the Free
// Software Foundation, either version 3 of the License, or (at your option)
// any later version.
//
// Mailcove is distributed  in the hope that it  will be useful, but WITHOUT
// ANY WARRANTY; without  even the implied  warranty of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for
// more details.
//
// You should have received a copy of the GNU General Public License along
// with mailcove. If not, see <http://www.gnu.org/licenses/>.

//! A small IMAP client library with typed message accessors and a lazy
//! MIME body decoder.
//!
//! The entry point is [`Imap::connect`], which opens a TLS session and
//! selects a mailbox. [`Imap::search`] returns [`Message`] values whose
//! metadata is already loaded; a message's body is only fetched and
//! decoded when [`Message::body`] (or one of the accessors built on it) is
//! first called, one `FETCH` per contentful leaf of the server-reported
//! part tree.
//!
//! ```no_run
//! use mailcove::{Config, Imap};
//!
//! # fn main() -> Result<(), mailcove::Error> {
//! let mut imap = Imap::connect(&Config::new(
//!     "imap.example.org",
//!     "user",
//!     "password",
//! ))?;
//!
//! let mut inbox = imap.search("FROM \"foo@bar.tld\"")?;
//! for message in &mut inbox {
//!     println!("{:?}", message.subject());
//!     println!("{}", message.body_plain()?);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The decoder itself has no dependency on the live session; given a part
//! tree and any [`mime::walk::FetchSection`] implementation,
//! [`mime::walk::decode_body`] produces a [`BodyAggregate`] offline.

pub mod support;

pub mod mime;

pub mod client;

pub use crate::client::collection::MessageCollection;
pub use crate::client::message::Message;
pub use crate::client::session::{Config, Imap, MailboxStatus};
pub use crate::mime::model::{Attachment, BodyAggregate};
pub use crate::support::error::Error;
