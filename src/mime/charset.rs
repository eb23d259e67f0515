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

use std::borrow::Cow;

use encoding_rs::Encoding;

use crate::support::error::Error;

/// Converts the transfer-decoded bytes of a text part to UTF-8, given the
/// charset its headers declared.
///
/// With no declared charset, or a declared charset of UTF-8, the bytes are
/// reinterpreted as UTF-8 directly (invalid sequences become replacement
/// characters). ISO-8859-1 is mapped byte-for-byte to the first 256 code
/// points; the WHATWG machinery cannot do this, as it aliases the latin1
/// label to windows-1252. Everything else goes through `encoding_rs` label
/// lookup; an unknown label is a `Charset` error, while characters the
/// charset cannot map are silently dropped.
pub fn normalize<'a>(
    data: &'a [u8],
    charset: Option<&str>,
) -> Result<Cow<'a, str>, Error> {
    let charset = match charset {
        None => return Ok(String::from_utf8_lossy(data)),
        Some(cs) => cs,
    };

    if charset.eq_ignore_ascii_case("utf-8") {
        return Ok(String::from_utf8_lossy(data));
    }

    if charset.eq_ignore_ascii_case("iso-8859-1") {
        return Ok(Cow::Owned(data.iter().map(|&b| char::from(b)).collect()));
    }

    let encoding = Encoding::for_label_no_replacement(charset.as_bytes())
        .ok_or_else(|| Error::Charset(charset.to_owned()))?;
    let (text, had_errors) = encoding.decode_with_bom_removal(data);
    if had_errors {
        Ok(Cow::Owned(
            text.chars().filter(|&c| '\u{FFFD}' != c).collect(),
        ))
    } else {
        Ok(text)
    }
}
