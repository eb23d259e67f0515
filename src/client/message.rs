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

//! Typed access to one message in the selected mailbox.

use std::rc::Rc;

use chrono::{DateTime, FixedOffset};
use imap::types::Fetch;
use imap_proto::{MessageSection, SectionPath as WireSection};
use log::{debug, warn};

use crate::client::session::SharedSession;
use crate::client::structure::to_message_part;
use crate::mime::encoded_word::ew_decode_unstructured;
use crate::mime::model::{Attachment, BodyAggregate, MessagePart};
use crate::mime::section::SectionPath;
use crate::mime::walk::{decode_body, FetchSection};
use crate::support::error::Error;

/// One message in the selected mailbox.
///
/// Flags, the internal date, and the subject are captured when the message
/// is listed. The body is decoded on first access and cached; nothing is
/// fetched for messages whose body is never asked for.
pub struct Message {
    session: SharedSession,
    uid: u32,
    seq: u32,
    flags: Vec<String>,
    internal_date: Option<DateTime<FixedOffset>>,
    subject: Option<String>,
    body: Option<BodyAggregate>,
}

impl Message {
    /// Builds a `Message` from one `FETCH` response, or `None` for
    /// responses that don't carry a UID (unsolicited server chatter).
    pub(crate) fn from_fetch(
        session: SharedSession,
        fetch: &Fetch,
    ) -> Option<Message> {
        let uid = match fetch.uid {
            Some(uid) => uid,
            None => {
                warn!("ignoring FETCH response without UID");
                return None;
            },
        };

        let subject = fetch
            .envelope()
            .and_then(|envelope| envelope.subject.as_ref())
            .map(|raw| String::from_utf8_lossy(raw).into_owned());

        Some(Message {
            session,
            uid,
            seq: fetch.message,
            flags: fetch.flags().iter().map(|f| f.to_string()).collect(),
            internal_date: fetch.internal_date(),
            subject,
            body: None,
        })
    }

    pub fn uid(&self) -> u32 {
        self.uid
    }

    /// The message's sequence number at the time it was listed.
    pub fn seq(&self) -> u32 {
        self.seq
    }

    /// The server's `INTERNALDATE`, roughly when the message arrived.
    pub fn date(&self) -> Option<DateTime<FixedOffset>> {
        self.internal_date
    }

    /// The subject line, with RFC 2047 encoded words decoded.
    pub fn subject(&self) -> Option<String> {
        self.subject.as_deref().map(ew_decode_unstructured)
    }

    fn has_flag(&self, name: &str) -> bool {
        self.flags.iter().any(|f| f.eq_ignore_ascii_case(name))
    }

    pub fn is_seen(&self) -> bool {
        self.has_flag("\\Seen")
    }

    pub fn is_answered(&self) -> bool {
        self.has_flag("\\Answered")
    }

    pub fn is_flagged(&self) -> bool {
        self.has_flag("\\Flagged")
    }

    pub fn is_deleted(&self) -> bool {
        self.has_flag("\\Deleted")
    }

    pub fn is_draft(&self) -> bool {
        self.has_flag("\\Draft")
    }

    pub fn is_recent(&self) -> bool {
        self.has_flag("\\Recent")
    }

    /// Adds the given flags (e.g. `\\Seen`) to the message.
    pub fn set_flags(&mut self, flags: &[&str]) -> Result<(), Error> {
        self.store(&format!("+FLAGS ({})", flags.join(" ")))
    }

    /// Removes the given flags from the message.
    pub fn clear_flags(&mut self, flags: &[&str]) -> Result<(), Error> {
        self.store(&format!("-FLAGS ({})", flags.join(" ")))
    }

    pub fn mark_as_read(&mut self) -> Result<(), Error> {
        self.set_flags(&["\\Seen"])
    }

    pub fn mark_as_unread(&mut self) -> Result<(), Error> {
        self.clear_flags(&["\\Seen"])
    }

    pub fn mark_as_answered(&mut self) -> Result<(), Error> {
        self.set_flags(&["\\Answered"])
    }

    pub fn mark_as_unanswered(&mut self) -> Result<(), Error> {
        self.clear_flags(&["\\Answered"])
    }

    pub fn mark_as_deleted(&mut self) -> Result<(), Error> {
        self.set_flags(&["\\Deleted"])
    }

    pub fn mark_as_undeleted(&mut self) -> Result<(), Error> {
        self.clear_flags(&["\\Deleted"])
    }

    pub fn mark_as_important(&mut self) -> Result<(), Error> {
        self.set_flags(&["\\Flagged"])
    }

    pub fn mark_as_normal(&mut self) -> Result<(), Error> {
        self.clear_flags(&["\\Flagged"])
    }

    fn store(&mut self, query: &str) -> Result<(), Error> {
        debug!("message {}: STORE {}", self.uid, query);
        self.session
            .borrow_mut()
            .uid_store(self.uid.to_string(), query)?;
        // The server may normalize or reject flags; re-read rather than
        // guessing what it did.
        self.refresh_flags()
    }

    fn refresh_flags(&mut self) -> Result<(), Error> {
        let fetches = self
            .session
            .borrow_mut()
            .uid_fetch(self.uid.to_string(), "(FLAGS)")?;
        if let Some(fetch) = fetches.iter().next() {
            self.flags = fetch.flags().iter().map(|f| f.to_string()).collect();
        }
        Ok(())
    }

    /// Moves the message to another mailbox. The message's UID is stale
    /// afterwards; discard the handle.
    pub fn move_to(&mut self, mailbox: &str) -> Result<(), Error> {
        self.session
            .borrow_mut()
            .uid_mv(self.uid.to_string(), mailbox)?;
        Ok(())
    }

    /// Copies the message to another mailbox.
    pub fn copy_to(&mut self, mailbox: &str) -> Result<(), Error> {
        self.session
            .borrow_mut()
            .uid_copy(self.uid.to_string(), mailbox)?;
        Ok(())
    }

    /// The complete RFC822 source of the message, fetched without marking
    /// it read.
    pub fn source(&mut self) -> Result<Vec<u8>, Error> {
        let fetches = self
            .session
            .borrow_mut()
            .uid_fetch(self.uid.to_string(), "(BODY.PEEK[])")?;
        let fetch = fetches.iter().next().ok_or_else(|| {
            Error::Fetch("message vanished before its source was read".to_owned())
        })?;
        Ok(fetch.body().map(<[u8]>::to_vec).unwrap_or_default())
    }

    /// The decoded body, fetching and decoding it on first call.
    pub fn body(&mut self) -> Result<&BodyAggregate, Error> {
        if self.body.is_none() {
            let root = self.fetch_structure()?;
            let mut fetcher = SessionFetcher {
                session: &self.session,
                uid: self.uid,
            };
            self.body = Some(decode_body(&root, &mut fetcher)?);
        }
        Ok(self.body.as_ref().expect("body populated above"))
    }

    pub fn body_plain(&mut self) -> Result<&str, Error> {
        Ok(&self.body()?.plain)
    }

    pub fn body_html(&mut self) -> Result<&str, Error> {
        Ok(&self.body()?.html)
    }

    /// Decoded text of `TEXT` parts that are neither plain nor HTML.
    pub fn body_other(&mut self) -> Result<&str, Error> {
        Ok(&self.body()?.other)
    }

    pub fn attachments(&mut self) -> Result<&[Attachment], Error> {
        Ok(&self.body()?.attachments)
    }

    fn fetch_structure(&mut self) -> Result<MessagePart, Error> {
        let fetches = self
            .session
            .borrow_mut()
            .uid_fetch(self.uid.to_string(), "(BODYSTRUCTURE)")?;
        let structure = fetches
            .iter()
            .next()
            .and_then(|fetch| fetch.bodystructure().map(to_message_part))
            .ok_or_else(|| {
                Error::Structure(
                    "server returned no BODYSTRUCTURE".to_owned(),
                )
            })?;
        Ok(structure)
    }
}

/// Fetches leaf sections over the live session, one `BODY.PEEK` round trip
/// per leaf.
struct SessionFetcher<'a> {
    session: &'a SharedSession,
    uid: u32,
}

impl FetchSection for SessionFetcher<'_> {
    fn fetch(&mut self, section: &SectionPath) -> Result<Vec<u8>, Error> {
        // The empty address means the whole body, which IMAP spells TEXT.
        let query = if section.is_root() {
            "(BODY.PEEK[TEXT])".to_owned()
        } else {
            format!("(BODY.PEEK[{}])", section)
        };
        debug!("message {}: fetching {}", self.uid, query);

        let fetches = self
            .session
            .borrow_mut()
            .uid_fetch(self.uid.to_string(), &query)?;
        let fetch = fetches.iter().next().ok_or_else(|| {
            Error::Fetch(format!("no data for section [{}]", section))
        })?;

        let wire = if section.is_root() {
            WireSection::Full(MessageSection::Text)
        } else {
            WireSection::Part(section.segments().to_vec(), None)
        };
        fetch
            .section(&wire)
            .map(<[u8]>::to_vec)
            .ok_or_else(|| {
                Error::Fetch(format!("no data for section [{}]", section))
            })
    }
}
