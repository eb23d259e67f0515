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

use encoding_rs::Encoding;
use lazy_static::lazy_static;
use regex::Regex;

use crate::mime::quoted_printable::qp_decode;

lazy_static! {
    static ref ENCODED_WORD: Regex =
        Regex::new(r"^=\?([!->@-~]*)\?([!->@-~]*)\?([!->@-~]*)\?=$").unwrap();
}

/// Decodes `word` as an RFC 2047 "encoded word" if it is one in its
/// entirety.
///
/// Returns `None` if `word` is not an encoded word or is not decodable,
/// i.e. the caller should use the raw text as-is. Failures here are never
/// hard errors; a garbled display name is better than no message.
pub fn ew_decode(word: &str) -> Option<String> {
    let captures = ENCODED_WORD.captures(word)?;
    let charset = captures.get(1).unwrap().as_str();
    let transfer = captures.get(2).unwrap().as_str();

    let mut content = captures.get(3).unwrap().as_str().as_bytes().to_vec();
    // RFC 2047 underscore-as-space. This is decoded before the transfer
    // encoding regardless of charset. It is incorrect for charsets where
    // 0x5F is not an underscore, but those don't occur in practice.
    for b in &mut content {
        if b'_' == *b {
            *b = b' ';
        }
    }

    let content = match transfer {
        "q" | "Q" => qp_decode(&content).ok()?,
        "b" | "B" => base64::decode(&content).ok()?,
        _ => return None,
    };

    let (text, _) = Encoding::for_label_no_replacement(charset.as_bytes())?
        .decode_with_bom_removal(&content);
    Some(text.into_owned())
}

/// Decodes encoded words embedded in unstructured text, such as a subject
/// line or a filename parameter.
///
/// Words that are not (valid) encoded words pass through untouched.
/// Whitespace between two adjacent encoded words is deleted, as RFC 2047
/// requires; all other whitespace is preserved.
pub fn ew_decode_unstructured(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_was_encoded = false;

    let mut rest = s;
    while !rest.is_empty() {
        let ws_end = rest
            .find(|c: char| !c.is_ascii_whitespace())
            .unwrap_or(rest.len());
        let (ws, tail) = rest.split_at(ws_end);
        let word_end = tail
            .find(|c: char| c.is_ascii_whitespace())
            .unwrap_or(tail.len());
        let (word, tail) = tail.split_at(word_end);
        rest = tail;

        if word.is_empty() {
            // Trailing whitespace
            out.push_str(ws);
            break;
        }

        match ew_decode(word) {
            Some(decoded) => {
                if !prev_was_encoded {
                    out.push_str(ws);
                }
                out.push_str(&decoded);
                prev_was_encoded = true;
            },
            None => {
                out.push_str(ws);
                out.push_str(word);
                prev_was_encoded = false;
            },
        }
    }

    out
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode_rfc_2047_examples() {
        assert_eq!(Some("a".to_owned()), ew_decode("=?ISO-8859-1?Q?a?="));
        assert_eq!(
            Some("a b".to_owned()),
            ew_decode("=?ISO-8859-1?Q?a_b?=")
        );
        assert_eq!(
            Some("Keith Moore".to_owned()),
            ew_decode("=?US-ASCII?Q?Keith_Moore?=")
        );
        assert_eq!(
            Some("Keld Jørn Simonsen".to_owned()),
            ew_decode("=?ISO-8859-1?Q?Keld_J=F8rn_Simonsen?=")
        );
        assert_eq!(
            Some("If you can read this yo".to_owned()),
            ew_decode("=?ISO-8859-1?B?SWYgeW91IGNhbiByZWFkIHRoaXMgeW8=?=")
        );
        assert_eq!(
            Some("Hello".to_owned()),
            ew_decode("=?utf-8?b?SGVsbG8=?=")
        );
    }

    #[test]
    fn reject_non_encoded_words() {
        assert_eq!(None, ew_decode("plain"));
        assert_eq!(None, ew_decode("=?utf-8?Q?unterminated"));
        assert_eq!(None, ew_decode("=?utf-8?X?Zm9v?="));
        assert_eq!(None, ew_decode("=?no-such-charset?B?Zm9v?="));
        assert_eq!(None, ew_decode("=?utf-8?B?not!base64?="));
    }

    #[test]
    fn unstructured_mixes_raw_and_encoded() {
        assert_eq!("plain text", ew_decode_unstructured("plain text"));
        assert_eq!(
            "Re: café",
            ew_decode_unstructured("Re: =?utf-8?Q?caf=C3=A9?=")
        );
        assert_eq!(
            "  padded  ",
            ew_decode_unstructured("  padded  ")
        );
    }

    #[test]
    fn whitespace_between_encoded_words_is_deleted() {
        assert_eq!(
            "ab",
            ew_decode_unstructured("=?utf-8?Q?a?= =?utf-8?Q?b?=")
        );
        assert_eq!(
            "ab",
            ew_decode_unstructured("=?utf-8?Q?a?=  \t =?utf-8?Q?b?=")
        );
        // ... but not between an encoded word and a raw word.
        assert_eq!(
            "a b",
            ew_decode_unstructured("=?utf-8?Q?a?= b")
        );
    }
}
