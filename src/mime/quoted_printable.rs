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

use std::str;

use crate::support::error::Error;

/// Decodes quoted-printable content, as described by RFC 2045.
///
/// `=XX` escapes are reversed and soft line breaks are discarded. UNIX line
/// endings are accepted as well as DOS line endings.
///
/// A truncated or non-hexadecimal escape is a `Decode` error. Bytes outside
/// an escape are passed through untouched even where RFC 2045 would have
/// required them to be encoded.
pub fn qp_decode(data: &[u8]) -> Result<Vec<u8>, Error> {
    let mut out = Vec::with_capacity(data.len());

    let mut split = data.split(|&b| b'=' == b);
    if let Some(prefix) = split.next() {
        out.extend_from_slice(prefix);
    }

    for element in split {
        // Each element begins immediately after an `=`.
        if element.first() == Some(&b'\n') {
            // Soft line break with UNIX ending
            out.extend_from_slice(&element[1..]);
        } else if element.len() >= 2 && b"\r\n" == &element[..2] {
            // Soft line break with DOS ending
            out.extend_from_slice(&element[2..]);
        } else if element.len() < 2 {
            return Err(Error::Decode(
                "truncated quoted-printable escape".to_owned(),
            ));
        } else {
            let byte = str::from_utf8(&element[..2])
                .ok()
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .ok_or_else(|| {
                    Error::Decode(format!(
                        "invalid quoted-printable escape ={}",
                        String::from_utf8_lossy(&element[..2])
                    ))
                })?;
            out.push(byte);
            out.extend_from_slice(&element[2..]);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;

    use super::*;

    fn assert_qp(expected: &str, input: &str) {
        assert_eq!(
            expected.as_bytes(),
            &qp_decode(input.as_bytes()).unwrap()[..]
        );
    }

    fn assert_malformed(input: &str) {
        match qp_decode(input.as_bytes()) {
            Err(Error::Decode(_)) => (),
            r => panic!("unexpected result: {:?}", r),
        }
    }

    #[test]
    fn decode_simple_escapes() {
        assert_qp("", "");
        assert_qp("foo bar", "foo bar");
        assert_qp("foo=bar", "foo=3Dbar");
        assert_qp("foo=bar", "foo=3dbar");
        assert_qp("café", "caf=C3=A9");
        assert_qp("=", "=3D");
    }

    #[test]
    fn decode_soft_line_breaks() {
        assert_qp("foobar", "foo=\r\nbar");
        assert_qp("foobar", "foo=\nbar");
        assert_qp("foo\r\nbar", "foo\r\nbar");
        assert_qp("foobarbaz", "foo=\nbar=\r\nbaz");
        assert_qp("foo", "foo=\n");
    }

    #[test]
    fn malformed_escapes_are_errors() {
        assert_malformed("foo=");
        assert_malformed("foo=A");
        assert_malformed("foo=XYbar");
        assert_malformed("foo=\rbar");
        assert_malformed("foo= bar");
    }

    // Reference encoder for the round-trip property. Encodes every byte
    // that is not a printable ASCII character, plus `=` itself.
    fn qp_encode(data: &[u8]) -> String {
        let mut out = String::new();
        for &b in data {
            if b'=' == b || b < b' ' || b > b'~' {
                out.push_str(&format!("={:02X}", b));
            } else {
                out.push(b as char);
            }
        }
        out
    }

    proptest! {
        #[test]
        fn decoding_reverses_encoding(
            data in prop::collection::vec(prop::num::u8::ANY, 0..64)
        ) {
            let encoded = qp_encode(&data);
            prop_assert_eq!(data, qp_decode(encoded.as_bytes()).unwrap());
        }

        #[test]
        fn escape_free_input_passes_through(
            s in "[!-<>-~ ]{0,64}"
        ) {
            prop_assert_eq!(
                s.as_bytes(),
                &qp_decode(s.as_bytes()).unwrap()[..]
            );
        }
    }
}
