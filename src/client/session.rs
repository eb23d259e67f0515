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

//! Connection handling and whole-mailbox commands.

use std::cell::RefCell;
use std::net::TcpStream;
use std::rc::Rc;

use log::{debug, info};
use native_tls::{TlsConnector, TlsStream};

use crate::client::collection::MessageCollection;
use crate::client::message::Message;
use crate::support::error::Error;

/// The concrete session type used throughout the client layer.
pub type ImapSession = imap::Session<TlsStream<TcpStream>>;

/// One IMAP session is a single stateful stream, but both the `Imap`
/// handle and every `Message` it produced need it (messages fetch their
/// bodies lazily). The shared cell hands it around through simple
/// delegation; borrows last for one command round trip at a time.
pub type SharedSession = Rc<RefCell<ImapSession>>;

/// Connection settings for one mailbox.
#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Mailbox selected after login.
    pub folder: String,
    pub user: String,
    pub password: String,
}

impl Config {
    /// Settings for the standard implicit-TLS port and `INBOX`.
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Config {
            host: host.into(),
            port: 993,
            folder: "INBOX".to_owned(),
            user: user.into(),
            password: password.into(),
        }
    }
}

/// Counters the server reports when a mailbox is selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MailboxStatus {
    pub exists: u32,
    pub recent: u32,
    pub unseen: Option<u32>,
}

/// A live, authenticated connection with one mailbox selected.
pub struct Imap {
    session: SharedSession,
    folder: String,
}

impl Imap {
    /// Connects over TLS, authenticates, and selects the configured
    /// folder.
    pub fn connect(config: &Config) -> Result<Self, Error> {
        let tls = TlsConnector::builder().build()?;
        let client = imap::connect(
            (config.host.as_str(), config.port),
            &config.host,
            &tls,
        )?;
        // `login` hands the client back on failure so callers can retry;
        // we don't.
        let mut session = client
            .login(&config.user, &config.password)
            .map_err(|(e, _)| e)?;
        session.select(&config.folder)?;
        info!(
            "connected to {}:{}, selected {}",
            config.host, config.port, config.folder
        );

        Ok(Imap {
            session: Rc::new(RefCell::new(session)),
            folder: config.folder.clone(),
        })
    }

    /// Runs an IMAP `SEARCH` program (e.g. `UNSEEN SINCE 1-Jan-2026`,
    /// `FROM "foo@bar.tld"`) against the selected mailbox and returns the
    /// matching messages, metadata pre-fetched, in ascending UID order.
    pub fn search(&mut self, criteria: &str) -> Result<MessageCollection, Error> {
        let uids = self.session.borrow_mut().uid_search(criteria)?;
        let mut uids: Vec<u32> = uids.into_iter().collect();
        uids.sort_unstable();
        debug!("search [{}] matched {} messages", criteria, uids.len());

        let mut collection = MessageCollection::new();
        if uids.is_empty() {
            return Ok(collection);
        }

        let uid_set = uids
            .iter()
            .map(|uid| uid.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let fetches = self
            .session
            .borrow_mut()
            .uid_fetch(uid_set, "(FLAGS INTERNALDATE ENVELOPE)")?;
        for fetch in fetches.iter() {
            if let Some(message) =
                Message::from_fetch(Rc::clone(&self.session), fetch)
            {
                collection.add(message);
            }
        }
        Ok(collection)
    }

    /// Appends a raw RFC822 message to `folder`, or to the selected
    /// folder if none is given.
    pub fn append(
        &mut self,
        message: &[u8],
        folder: Option<&str>,
    ) -> Result<(), Error> {
        let folder = folder.unwrap_or(&self.folder);
        self.session.borrow_mut().append(folder, message)?;
        debug!("appended {} bytes to {}", message.len(), folder);
        Ok(())
    }

    /// Reports the current counters of the selected mailbox.
    pub fn check(&mut self) -> Result<MailboxStatus, Error> {
        // Re-selecting makes the server restate the counters.
        let mailbox = self.session.borrow_mut().select(&self.folder)?;
        Ok(MailboxStatus {
            exists: mailbox.exists,
            recent: mailbox.recent,
            unseen: mailbox.unseen,
        })
    }

    /// Lists mailbox names matching `pattern` (`*` for everything).
    pub fn list_mailboxes(&mut self, pattern: &str) -> Result<Vec<String>, Error> {
        let names = self.session.borrow_mut().list(None, Some(pattern))?;
        Ok(names.iter().map(|name| name.name().to_owned()).collect())
    }

    /// Selects a different mailbox for subsequent commands.
    pub fn switch_mailbox(
        &mut self,
        mailbox: &str,
    ) -> Result<MailboxStatus, Error> {
        let selected = self.session.borrow_mut().select(mailbox)?;
        self.folder = mailbox.to_owned();
        info!("selected {}", mailbox);
        Ok(MailboxStatus {
            exists: selected.exists,
            recent: selected.recent,
            unseen: selected.unseen,
        })
    }

    /// Permanently removes messages flagged `\Deleted` from the selected
    /// mailbox.
    pub fn expunge(&mut self) -> Result<(), Error> {
        self.session.borrow_mut().expunge()?;
        Ok(())
    }

    /// Ends the session. Dropping `Imap` without calling this closes the
    /// stream without the courtesy `LOGOUT`.
    pub fn logout(self) -> Result<(), Error> {
        self.session.borrow_mut().logout()?;
        Ok(())
    }
}
