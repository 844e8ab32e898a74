//! URI component coding with `encodeURI`/`decodeURI` semantics.
//!
//! Encoding leaves unreserved and reserved URI characters alone and
//! percent-encodes everything else as UTF-8. Decoding undoes every escape
//! except those of reserved characters, which stay escaped.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use thiserror::Error;

/// ASCII characters outside the reserved and unreserved URI sets.
const URI_ESCAPED: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Reserved characters whose escapes decoding keeps intact.
const RESERVED: &[u8] = b";/?:@&=+$,#";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UriError {
    #[error("malformed escape at byte {position}")]
    MalformedEscape { position: usize },

    #[error("escapes decode to invalid UTF-8")]
    InvalidUtf8,
}

/// Percent-encode a string, leaving URI syntax characters untouched.
pub fn encode_uri(input: &str) -> String {
    utf8_percent_encode(input, URI_ESCAPED).to_string()
}

/// Decode the escapes produced by [`encode_uri`].
pub fn decode_uri(input: &str) -> Result<String, UriError> {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut position = 0;

    while position < bytes.len() {
        if bytes[position] != b'%' {
            decoded.push(bytes[position]);
            position += 1;
            continue;
        }

        let byte = match (bytes.get(position + 1), bytes.get(position + 2)) {
            (Some(&high), Some(&low)) => hex_digit(high)
                .zip(hex_digit(low))
                .map(|(high, low)| high << 4 | low),
            _ => None,
        }
        .ok_or(UriError::MalformedEscape { position })?;

        if RESERVED.contains(&byte) {
            decoded.extend_from_slice(&bytes[position..position + 3]);
        } else {
            decoded.push(byte);
        }
        position += 3;
    }

    String::from_utf8(decoded).map_err(|_| UriError::InvalidUtf8)
}

fn hex_digit(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|digit| digit as u8)
}
