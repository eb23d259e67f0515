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

//! Decoding of MIME message bodies.
//!
//! The server has already parsed the message into a part tree; this module
//! only walks that tree and undoes the layers of encoding standing between
//! the wire and usable content.

pub mod charset;
pub mod classify;
pub mod content_encoding;
pub mod encoded_word;
pub mod model;
pub mod quoted_printable;
pub mod section;
pub mod walk;
