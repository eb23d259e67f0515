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

use crate::mime::model::TransferEncoding;
use crate::mime::quoted_printable::qp_decode;
use crate::support::error::Error;

/// Reverses the content transfer encoding of one body section.
///
/// 7bit, 8bit, and binary content is already in its final octet form and is
/// returned unchanged, as is content under an encoding we don't model.
/// Base64 input may contain interleaved whitespace (transports wrap encoded
/// lines; the breaks are not part of the payload); any other byte outside
/// the base64 alphabet is a `Decode` error.
pub fn decode_transfer(
    data: &[u8],
    encoding: TransferEncoding,
) -> Result<Cow<'_, [u8]>, Error> {
    match encoding {
        TransferEncoding::SevenBit
        | TransferEncoding::EightBit
        | TransferEncoding::Binary
        | TransferEncoding::Other => Ok(Cow::Borrowed(data)),

        TransferEncoding::Base64 => {
            let compact: Vec<u8> = data
                .iter()
                .copied()
                .filter(|&b| !matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
                .collect();
            base64::decode(&compact).map(Cow::Owned).map_err(|e| {
                Error::Decode(format!("invalid base64 content: {}", e))
            })
        }

        TransferEncoding::QuotedPrintable => {
            qp_decode(data).map(Cow::Owned)
        }
    }
}
