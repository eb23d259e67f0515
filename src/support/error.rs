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

use std::io;

use thiserror::Error;

/// The unified error type.
///
/// The first four variants are the decoder's own failure modes. Each is
/// terminal for the body decode that hit it: the walker propagates
/// immediately and the caller gets no partial aggregate.
#[derive(Error, Debug)]
pub enum Error {
    /// Raw bytes for a body section could not be retrieved.
    #[error("failed to fetch body section: {0}")]
    Fetch(String),
    /// A transfer encoding could not be reversed.
    #[error("malformed transfer encoding: {0}")]
    Decode(String),
    /// A declared charset is not recognized by the conversion engine.
    ///
    /// Unmappable characters under a recognized charset are never an error;
    /// only an unknown label is.
    #[error("unrecognized charset: {0}")]
    Charset(String),
    /// The server-reported body structure was missing or unusable.
    #[error("unusable message structure: {0}")]
    Structure(String),
    #[error(transparent)]
    Imap(#[from] imap::error::Error),
    #[error("TLS error: {0}")]
    Tls(#[from] native_tls::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}
