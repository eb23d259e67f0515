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

//! The body structure walker.
//!
//! `decode_body` traverses the server-reported part tree depth-first,
//! left-to-right, maintaining the section address of each part as it
//! descends. Leaves are processed through a fixed pipeline: fetch the raw
//! section bytes, reverse the transfer encoding, normalize text to UTF-8,
//! then classify the result into the aggregate. Container parts are only
//! descended into, never fetched, so a decode costs exactly one fetch per
//! contentful leaf.
//!
//! An embedded `MESSAGE/RFC822` that is not disposed as an attachment (a
//! message forwarded inline) is transparent: the walker descends into it
//! without extending the section address, since the server numbers the
//! inner message's parts as if they belonged to the embedding part.

use log::trace;

use crate::mime::charset;
use crate::mime::classify::{
    classify, BodyContribution, DecodedContent, NameAllocator,
};
use crate::mime::content_encoding::decode_transfer;
use crate::mime::model::{BodyAggregate, MessagePart, PartType};
use crate::mime::section::SectionPath;
use crate::support::error::Error;

/// Retrieves the raw, still transfer-encoded bytes of one body section.
///
/// The root section address stands for the whole message body, used when
/// the message is not multipart. Implementations are called strictly
/// sequentially; the walker does not retry, and the first failure aborts
/// the decode.
pub trait FetchSection {
    fn fetch(&mut self, section: &SectionPath) -> Result<Vec<u8>, Error>;
}

/// Decodes the body of the message whose part tree is `root`, fetching leaf
/// sections through `fetcher` as they are encountered.
pub fn decode_body(
    root: &MessagePart,
    fetcher: &mut dyn FetchSection,
) -> Result<BodyAggregate, Error> {
    let mut walker = Walker {
        fetcher,
        aggregate: BodyAggregate::default(),
        names: NameAllocator::default(),
    };
    walker.walk(root, &SectionPath::root())?;
    Ok(walker.aggregate)
}

struct Walker<'a> {
    fetcher: &'a mut dyn FetchSection,
    aggregate: BodyAggregate,
    names: NameAllocator,
}

impl Walker<'_> {
    fn walk(
        &mut self,
        part: &MessagePart,
        section: &SectionPath,
    ) -> Result<(), Error> {
        if part.children.is_empty() {
            return self.leaf(part, section);
        }

        let transparent = part.is_inline_rfc822();
        for (index, child) in part.children.iter().enumerate() {
            self.walk(child, &section.child(index, transparent))?;
        }
        Ok(())
    }

    fn leaf(
        &mut self,
        part: &MessagePart,
        section: &SectionPath,
    ) -> Result<(), Error> {
        if part.part_type.is_structural() {
            // A childless multipart or message part has no content of its
            // own to fetch.
            trace!("skipping empty structural section [{}]", section);
            return Ok(());
        }

        trace!("fetching section [{}]", section);
        let raw = self.fetcher.fetch(section)?;
        let decoded = decode_transfer(&raw, part.encoding)?;

        let content = if PartType::Text == part.part_type {
            // Charset conversion comes strictly after transfer decoding.
            DecodedContent::Text(
                charset::normalize(
                    &decoded,
                    part.parameters.get("charset").map(String::as_str),
                )?
                .into_owned(),
            )
        } else {
            DecodedContent::Binary(decoded.into_owned())
        };

        match classify(part, content, section, &mut self.names) {
            Some(BodyContribution::Plain(text)) => {
                self.aggregate.plain.push_str(&text)
            },
            Some(BodyContribution::Html(text)) => {
                self.aggregate.html.push_str(&text)
            },
            Some(BodyContribution::OtherText(text)) => {
                self.aggregate.other.push_str(&text)
            },
            Some(BodyContribution::Attachment(attachment)) => {
                self.aggregate.attachments.push(attachment)
            },
            None => (),
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use super::*;
    use crate::mime::model::TransferEncoding;

    /// In-memory fetcher which records every section it is asked for.
    #[derive(Default)]
    struct MapFetcher {
        sections: HashMap<String, Vec<u8>>,
        fetched: Vec<String>,
    }

    impl MapFetcher {
        fn with(mut self, section: &str, data: &[u8]) -> Self {
            self.sections.insert(section.to_owned(), data.to_vec());
            self
        }
    }

    impl FetchSection for MapFetcher {
        fn fetch(&mut self, section: &SectionPath) -> Result<Vec<u8>, Error> {
            let key = section.to_string();
            self.fetched.push(key.clone());
            self.sections.get(&key).cloned().ok_or_else(|| {
                Error::Fetch(format!("no such section [{}]", section))
            })
        }
    }

    fn text_leaf(subtype: &str, encoding: TransferEncoding) -> MessagePart {
        MessagePart::leaf(PartType::Text, subtype, encoding)
    }

    #[test]
    fn single_part_message_fetches_root() {
        let root = text_leaf("plain", TransferEncoding::SevenBit);
        let mut fetcher = MapFetcher::default().with("", b"hello world");

        let body = decode_body(&root, &mut fetcher).unwrap();
        assert_eq!("hello world", body.plain);
        assert_eq!("", body.html);
        assert_eq!("", body.other);
        assert!(body.attachments.is_empty());
        assert_eq!(vec![""], fetcher.fetched);
    }

    #[test]
    fn mixed_multipart_end_to_end() {
        let root = MessagePart::container(
            PartType::Multipart,
            "mixed",
            vec![
                text_leaf("plain", TransferEncoding::SevenBit),
                MessagePart::leaf(
                    PartType::Application,
                    "octet-stream",
                    TransferEncoding::Base64,
                )
                .with_param("name", "f.bin"),
            ],
        );
        let mut fetcher = MapFetcher::default()
            .with("1", b"hello\r\n")
            .with("2", base64::encode(&[1u8, 2, 3]).as_bytes());

        let body = decode_body(&root, &mut fetcher).unwrap();
        assert_eq!("hello\r\n", body.plain);
        assert_eq!(1, body.attachments.len());
        assert_eq!("f.bin", body.attachments[0].filename);
        assert_eq!(vec![1, 2, 3], body.attachments[0].content);
        assert_eq!(vec!["1", "2"], fetcher.fetched);
    }

    #[test]
    fn alternative_multipart_fills_both_texts() {
        let root = MessagePart::container(
            PartType::Multipart,
            "alternative",
            vec![
                text_leaf("plain", TransferEncoding::SevenBit),
                text_leaf("html", TransferEncoding::SevenBit),
            ],
        );
        let mut fetcher = MapFetcher::default()
            .with("1", b"plain version")
            .with("2", b"<p>html version</p>");

        let body = decode_body(&root, &mut fetcher).unwrap();
        assert_eq!("plain version", body.plain);
        assert_eq!("<p>html version</p>", body.html);
        assert!(body.attachments.is_empty());
    }

    #[test]
    fn sibling_texts_concatenate_in_order() {
        let root = MessagePart::container(
            PartType::Multipart,
            "mixed",
            vec![
                text_leaf("plain", TransferEncoding::SevenBit),
                text_leaf("plain", TransferEncoding::SevenBit),
            ],
        );
        let mut fetcher =
            MapFetcher::default().with("1", b"first ").with("2", b"second");

        let body = decode_body(&root, &mut fetcher).unwrap();
        assert_eq!("first second", body.plain);
    }

    #[test]
    fn inline_rfc822_is_transparent_to_addressing() {
        // A forwarded message as the sole part: its text child is fetched
        // at the forwarding container's own address, not one level deeper.
        let root = MessagePart::container(
            PartType::Multipart,
            "mixed",
            vec![MessagePart {
                children: vec![text_leaf(
                    "plain",
                    TransferEncoding::SevenBit,
                )],
                ..MessagePart::leaf(
                    PartType::Message,
                    "rfc822",
                    TransferEncoding::SevenBit,
                )
            }],
        );
        let mut fetcher = MapFetcher::default().with("1", b"forwarded text");

        let body = decode_body(&root, &mut fetcher).unwrap();
        assert_eq!("forwarded text", body.plain);
        assert_eq!(vec!["1"], fetcher.fetched);
    }

    #[test]
    fn attached_rfc822_is_not_transparent() {
        let root = MessagePart::container(
            PartType::Multipart,
            "mixed",
            vec![MessagePart {
                children: vec![text_leaf(
                    "plain",
                    TransferEncoding::SevenBit,
                )],
                ..MessagePart::leaf(
                    PartType::Message,
                    "rfc822",
                    TransferEncoding::SevenBit,
                )
                .with_disposition("attachment")
            }],
        );
        let mut fetcher = MapFetcher::default().with("1.1", b"inner text");

        let body = decode_body(&root, &mut fetcher).unwrap();
        assert_eq!("inner text", body.plain);
        assert_eq!(vec!["1.1"], fetcher.fetched);
    }

    #[test]
    fn structural_leaves_are_not_fetched() {
        let root = MessagePart::container(
            PartType::Multipart,
            "mixed",
            vec![
                MessagePart::container(PartType::Multipart, "mixed", vec![]),
                text_leaf("plain", TransferEncoding::SevenBit),
            ],
        );
        let mut fetcher = MapFetcher::default().with("2", b"body");

        let body = decode_body(&root, &mut fetcher).unwrap();
        assert_eq!("body", body.plain);
        assert_eq!(vec!["2"], fetcher.fetched);
    }

    #[test]
    fn charset_is_normalized_after_transfer_decoding() {
        let root = text_leaf("plain", TransferEncoding::QuotedPrintable)
            .with_param("charset", "iso-8859-1");
        let mut fetcher = MapFetcher::default().with("", b"caf=E9");

        let body = decode_body(&root, &mut fetcher).unwrap();
        assert_eq!("café", body.plain);
    }

    #[test]
    fn fetch_failure_aborts_decode() {
        let root = MessagePart::container(
            PartType::Multipart,
            "mixed",
            vec![
                text_leaf("plain", TransferEncoding::SevenBit),
                text_leaf("plain", TransferEncoding::SevenBit),
            ],
        );
        let mut fetcher = MapFetcher::default().with("1", b"present");

        match decode_body(&root, &mut fetcher) {
            Err(Error::Fetch(_)) => (),
            r => panic!("unexpected result: {:?}", r),
        }
    }

    #[test]
    fn malformed_base64_aborts_decode() {
        let root = MessagePart::container(
            PartType::Multipart,
            "mixed",
            vec![
                MessagePart::leaf(
                    PartType::Application,
                    "octet-stream",
                    TransferEncoding::Base64,
                ),
                text_leaf("plain", TransferEncoding::SevenBit),
            ],
        );
        let mut fetcher = MapFetcher::default()
            .with("1", b"!!not base64!!")
            .with("2", b"never reached");

        match decode_body(&root, &mut fetcher) {
            Err(Error::Decode(_)) => (),
            r => panic!("unexpected result: {:?}", r),
        }
    }

    #[test]
    fn unknown_charset_aborts_decode() {
        let root = text_leaf("plain", TransferEncoding::SevenBit)
            .with_param("charset", "x-bogus");
        let mut fetcher = MapFetcher::default().with("", b"text");

        match decode_body(&root, &mut fetcher) {
            Err(Error::Charset(_)) => (),
            r => panic!("unexpected result: {:?}", r),
        }
    }

    #[test]
    fn text_attachments_are_routed_to_attachments() {
        let root = text_leaf("plain", TransferEncoding::SevenBit)
            .with_disposition("attachment")
            .with_param("filename", "log.txt");
        let mut fetcher = MapFetcher::default().with("", b"log line\n");

        let body = decode_body(&root, &mut fetcher).unwrap();
        assert_eq!("", body.plain);
        assert_eq!(1, body.attachments.len());
        assert_eq!("log.txt", body.attachments[0].filename);
        assert_eq!(b"log line\n", &body.attachments[0].content[..]);
    }

    #[test]
    fn nameless_attachments_get_distinct_placeholder_names() {
        let image =
            MessagePart::leaf(PartType::Image, "png", TransferEncoding::Binary);
        let root = MessagePart::container(
            PartType::Multipart,
            "mixed",
            vec![image.clone(), image],
        );
        let mut fetcher =
            MapFetcher::default().with("1", b"a").with("2", b"b");

        let body = decode_body(&root, &mut fetcher).unwrap();
        assert_eq!(2, body.attachments.len());
        assert_eq!("part-1", body.attachments[0].filename);
        assert_eq!("part-2", body.attachments[1].filename);
        assert_ne!(
            body.attachments[0].filename,
            body.attachments[1].filename
        );
    }

    #[test]
    fn decode_is_idempotent() {
        let root = MessagePart::container(
            PartType::Multipart,
            "mixed",
            vec![
                text_leaf("plain", TransferEncoding::SevenBit),
                MessagePart::leaf(
                    PartType::Image,
                    "png",
                    TransferEncoding::Binary,
                ),
            ],
        );
        let mut fetcher =
            MapFetcher::default().with("1", b"text").with("2", b"img");

        let first = decode_body(&root, &mut fetcher).unwrap();
        let second = decode_body(&root, &mut fetcher).unwrap();
        assert_eq!(first, second);
    }
}
