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

//! Routing of decoded leaves into the body aggregate.

use std::collections::HashMap;

use crate::mime::encoded_word::ew_decode_unstructured;
use crate::mime::model::{Attachment, MessagePart, PartType};
use crate::mime::section::SectionPath;

/// Fully decoded content of one leaf part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodedContent {
    /// Transfer-decoded and charset-normalized text (`TEXT` leaves).
    Text(String),
    /// Transfer-decoded octets (everything else).
    Binary(Vec<u8>),
}

impl DecodedContent {
    fn into_bytes(self) -> Vec<u8> {
        match self {
            DecodedContent::Text(text) => text.into_bytes(),
            DecodedContent::Binary(bytes) => bytes,
        }
    }
}

/// Where one decoded leaf belongs in the final aggregate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BodyContribution {
    Plain(String),
    Html(String),
    OtherText(String),
    Attachment(Attachment),
}

/// Allocates placeholder names for attachments that declare neither
/// `filename` nor `name`.
///
/// Names are seeded from the section address, so repeated decodes of the
/// same message produce the same names. A counter disambiguates collisions
/// within one decode (transparent descent can put several leaves at the
/// same address).
#[derive(Debug, Default)]
pub struct NameAllocator {
    used: HashMap<String, u32>,
}

impl NameAllocator {
    fn next(&mut self, section: &SectionPath) -> String {
        let base = if section.is_root() {
            "part".to_owned()
        } else {
            format!("part-{}", section)
        };

        let count = self.used.entry(base.clone()).or_insert(0);
        *count += 1;
        if 1 == *count {
            base
        } else {
            format!("{}-{}", base, count)
        }
    }
}

fn display_filename(
    part: &MessagePart,
    section: &SectionPath,
    names: &mut NameAllocator,
) -> String {
    part.parameters
        .get("filename")
        .or_else(|| part.parameters.get("name"))
        .map(|raw| ew_decode_unstructured(raw))
        .unwrap_or_else(|| names.next(section))
}

/// Decides where the decoded content of `part` belongs.
///
/// A `TEXT` leaf contributes to the body, routed by subtype, unless its
/// disposition is literally `attachment`; any other disposition, including
/// none, keeps it in the body. (An explicit `inline` text attachment thus
/// lands in the body text. Mail in the wild depends on this treatment, so
/// it is deliberate.) Every other concrete type is an attachment.
/// Structural types contribute nothing; the walker never fetches them as
/// leaves.
pub fn classify(
    part: &MessagePart,
    content: DecodedContent,
    section: &SectionPath,
    names: &mut NameAllocator,
) -> Option<BodyContribution> {
    match part.part_type {
        PartType::Multipart | PartType::Message => None,

        PartType::Text => {
            let disposed_as_attachment = part
                .disposition
                .as_deref()
                .map_or(false, |d| d.eq_ignore_ascii_case("attachment"));
            if disposed_as_attachment {
                Some(BodyContribution::Attachment(Attachment {
                    filename: display_filename(part, section, names),
                    content: content.into_bytes(),
                }))
            } else {
                let text = match content {
                    DecodedContent::Text(text) => text,
                    DecodedContent::Binary(bytes) => {
                        String::from_utf8_lossy(&bytes).into_owned()
                    },
                };
                Some(if part.is_subtype("plain") {
                    BodyContribution::Plain(text)
                } else if part.is_subtype("html") {
                    BodyContribution::Html(text)
                } else {
                    BodyContribution::OtherText(text)
                })
            }
        },

        PartType::Application
        | PartType::Audio
        | PartType::Image
        | PartType::Video
        | PartType::Model
        | PartType::Other => {
            Some(BodyContribution::Attachment(Attachment {
                filename: display_filename(part, section, names),
                content: content.into_bytes(),
            }))
        },
    }
}
