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

//! The decoder's view of a message.
//!
//! `MessagePart` is the already-parsed part tree the server reports via
//! `BODYSTRUCTURE`; the decoder never parses raw MIME itself.
//! `BodyAggregate` is the fully decoded result.

use std::collections::HashMap;

/// The top-level media type of a body part.
///
/// RFC 3501 defines `BODYSTRUCTURE` over a closed set of types, so unknown
/// types collapse into `Other` instead of carrying a string around.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartType {
    Text,
    Multipart,
    Message,
    Application,
    Audio,
    Image,
    Video,
    Model,
    Other,
}

impl PartType {
    /// Whether parts of this type exist to hold children rather than
    /// content of their own.
    pub fn is_structural(self) -> bool {
        match self {
            PartType::Multipart | PartType::Message => true,
            _ => false,
        }
    }
}

/// The content transfer encoding of a body part, as reported by the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferEncoding {
    SevenBit,
    EightBit,
    Binary,
    Base64,
    QuotedPrintable,
    /// Any encoding the server reported that we don't model. Content passes
    /// through as opaque octets.
    Other,
}

/// One node of the server-reported part tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessagePart {
    pub part_type: PartType,
    /// Subtype exactly as reported; compared case-insensitively.
    pub subtype: String,
    pub encoding: TransferEncoding,
    /// The disposition token (e.g. `attachment`, `inline`) if the part
    /// carried a `Content-Disposition` at all.
    pub disposition: Option<String>,
    /// Content-type and disposition parameters merged into one map, keys
    /// lower-cased. Disposition parameters are merged second and overwrite
    /// content-type parameters of the same name.
    pub parameters: HashMap<String, String>,
    /// Child parts, in server-reported order. Non-empty only for
    /// `Multipart` and `Message` parts.
    pub children: Vec<MessagePart>,
}

impl MessagePart {
    /// A childless part with no disposition and no parameters.
    pub fn leaf(
        part_type: PartType,
        subtype: impl Into<String>,
        encoding: TransferEncoding,
    ) -> Self {
        MessagePart {
            part_type,
            subtype: subtype.into(),
            encoding,
            disposition: None,
            parameters: HashMap::new(),
            children: Vec::new(),
        }
    }

    /// A container part holding `children`.
    pub fn container(
        part_type: PartType,
        subtype: impl Into<String>,
        children: Vec<MessagePart>,
    ) -> Self {
        MessagePart {
            part_type,
            subtype: subtype.into(),
            encoding: TransferEncoding::SevenBit,
            disposition: None,
            parameters: HashMap::new(),
            children,
        }
    }

    pub fn with_disposition(mut self, disposition: impl Into<String>) -> Self {
        self.disposition = Some(disposition.into());
        self
    }

    pub fn with_param(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    pub fn is_subtype(&self, subtype: &str) -> bool {
        self.subtype.eq_ignore_ascii_case(subtype)
    }

    /// Whether this part is an embedded `MESSAGE/RFC822` forwarded inline,
    /// i.e. not explicitly disposed as an attachment. Such containers are
    /// transparent to section addressing.
    pub fn is_inline_rfc822(&self) -> bool {
        PartType::Message == self.part_type
            && self.is_subtype("rfc822")
            && self
                .disposition
                .as_deref()
                .map_or(true, |d| !d.eq_ignore_ascii_case("attachment"))
    }
}

/// One non-body part of a decoded message, in its final binary form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    /// Display name: the part's declared `filename`/`name` (MIME-word
    /// decoded) or a generated placeholder.
    pub filename: String,
    /// Fully transfer-decoded content.
    pub content: Vec<u8>,
}

/// The decoded body of a whole message.
///
/// Text from multiple leaves of the same category is concatenated in
/// traversal order; attachments keep traversal order too.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BodyAggregate {
    /// Concatenated `TEXT/PLAIN` content.
    pub plain: String,
    /// Concatenated `TEXT/HTML` content.
    pub html: String,
    /// Concatenated text of any other `TEXT` subtype.
    pub other: String,
    pub attachments: Vec<Attachment>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rfc822_transparency_requires_type_and_subtype() {
        let part = MessagePart::leaf(
            PartType::Message,
            "rfc822",
            TransferEncoding::SevenBit,
        );
        assert!(part.is_inline_rfc822());

        let part = MessagePart::leaf(
            PartType::Message,
            "RFC822",
            TransferEncoding::SevenBit,
        );
        assert!(part.is_inline_rfc822());

        let part = MessagePart::leaf(
            PartType::Message,
            "global",
            TransferEncoding::SevenBit,
        );
        assert!(!part.is_inline_rfc822());

        let part = MessagePart::leaf(
            PartType::Application,
            "rfc822",
            TransferEncoding::SevenBit,
        );
        assert!(!part.is_inline_rfc822());
    }

    #[test]
    fn attachment_disposition_suppresses_transparency() {
        let part = MessagePart::leaf(
            PartType::Message,
            "rfc822",
            TransferEncoding::SevenBit,
        )
        .with_disposition("ATTACHMENT");
        assert!(!part.is_inline_rfc822());

        // Any other disposition keeps the container transparent.
        let part = MessagePart::leaf(
            PartType::Message,
            "rfc822",
            TransferEncoding::SevenBit,
        )
        .with_disposition("inline");
        assert!(part.is_inline_rfc822());
    }
}
