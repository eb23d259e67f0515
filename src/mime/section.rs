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

//! Body section addresses.
//!
//! IMAP addresses leaf parts with dotted 1-based indices: `1.2.3` is the
//! third child of the second child of the first part. The empty address
//! stands for the whole message body, which is how a single-part message is
//! fetched. Embedded `MESSAGE/RFC822` parts that are not attachments are
//! transparent: their children are addressed as if they were children of
//! the embedding part itself.

use std::fmt;

/// Address of a body part, as an ordered list of 1-based indices.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionPath(Vec<u32>);

impl SectionPath {
    /// The address of the whole message body.
    pub fn root() -> Self {
        SectionPath(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[u32] {
        &self.0
    }

    /// The address of the `index`th (0-based) child of the part at `self`.
    ///
    /// A `transparent` parent contributes no segment of its own; its
    /// children inherit the parent's address unchanged.
    pub fn child(&self, index: usize, transparent: bool) -> SectionPath {
        if transparent {
            self.clone()
        } else {
            let mut segments = self.0.clone();
            segments.push(index as u32 + 1);
            SectionPath(segments)
        }
    }
}

impl fmt::Display for SectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.0 {
            if !first {
                write!(f, ".")?;
            }
            first = false;
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
