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

//! Conversion of the parsed `BODYSTRUCTURE` response into the decoder's
//! part tree.

use std::collections::HashMap;

use imap_proto::{
    BodyContentCommon, BodyContentSinglePart, BodyStructure, ContentEncoding,
};

use crate::mime::model::{MessagePart, PartType, TransferEncoding};

pub fn to_message_part(body: &BodyStructure<'_>) -> MessagePart {
    match body {
        BodyStructure::Basic { common, other, .. }
        | BodyStructure::Text { common, other, .. } => {
            leaf_part(common, other)
        },

        BodyStructure::Message {
            common, other, body, ..
        } => {
            // The server reports the embedded message's own structure
            // in-line; it becomes the sole child of the rfc822 part.
            let mut part = leaf_part(common, other);
            part.children.push(to_message_part(body));
            part
        },

        BodyStructure::Multipart { common, bodies, .. } => MessagePart {
            part_type: PartType::Multipart,
            subtype: common.ty.subtype.to_string(),
            encoding: TransferEncoding::SevenBit,
            disposition: disposition_of(common),
            parameters: merged_parameters(common),
            children: bodies.iter().map(to_message_part).collect(),
        },
    }
}

fn leaf_part(
    common: &BodyContentCommon<'_>,
    other: &BodyContentSinglePart<'_>,
) -> MessagePart {
    MessagePart {
        part_type: part_type_of(&common.ty.ty),
        subtype: common.ty.subtype.to_string(),
        encoding: transfer_encoding_of(&other.transfer_encoding),
        disposition: disposition_of(common),
        parameters: merged_parameters(common),
        children: Vec::new(),
    }
}

fn part_type_of(ty: &str) -> PartType {
    if ty.eq_ignore_ascii_case("text") {
        PartType::Text
    } else if ty.eq_ignore_ascii_case("multipart") {
        PartType::Multipart
    } else if ty.eq_ignore_ascii_case("message") {
        PartType::Message
    } else if ty.eq_ignore_ascii_case("application") {
        PartType::Application
    } else if ty.eq_ignore_ascii_case("audio") {
        PartType::Audio
    } else if ty.eq_ignore_ascii_case("image") {
        PartType::Image
    } else if ty.eq_ignore_ascii_case("video") {
        PartType::Video
    } else if ty.eq_ignore_ascii_case("model") {
        PartType::Model
    } else {
        PartType::Other
    }
}

fn transfer_encoding_of(encoding: &ContentEncoding<'_>) -> TransferEncoding {
    match encoding {
        ContentEncoding::SevenBit => TransferEncoding::SevenBit,
        ContentEncoding::EightBit => TransferEncoding::EightBit,
        ContentEncoding::Binary => TransferEncoding::Binary,
        ContentEncoding::Base64 => TransferEncoding::Base64,
        ContentEncoding::QuotedPrintable => TransferEncoding::QuotedPrintable,
        ContentEncoding::Other(_) => TransferEncoding::Other,
    }
}

fn disposition_of(common: &BodyContentCommon<'_>) -> Option<String> {
    common.disposition.as_ref().map(|d| d.ty.to_string())
}

/// Content-type parameters and disposition parameters flattened into one
/// map. Keys are lower-cased; disposition parameters are merged second and
/// win on collision.
fn merged_parameters(common: &BodyContentCommon<'_>) -> HashMap<String, String> {
    let mut merged = HashMap::new();
    if let Some(params) = &common.ty.params {
        for (name, value) in params {
            merged.insert(name.to_ascii_lowercase(), value.to_string());
        }
    }
    if let Some(disposition) = &common.disposition {
        if let Some(params) = &disposition.params {
            for (name, value) in params {
                merged.insert(name.to_ascii_lowercase(), value.to_string());
            }
        }
    }
    merged
}
