//! Transfer encoding helpers.
//!
//! Attachment bodies use standard padded Base64 (RFC 4648 §4), folded into
//! lines of at most 76 characters as RFC 2045 §6.8 requires. Non-ASCII
//! header text uses RFC 2047 encoded words.

use crate::error::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::Rng;
use rand::distributions::Alphanumeric;

/// Maximum encoded line length for Base64 bodies.
pub const MAX_LINE_LENGTH: usize = 76;

/// Fixed prefix of generated boundary tokens.
pub const BOUNDARY_PREFIX: &str = "easymail-";

/// Number of random characters following [`BOUNDARY_PREFIX`].
const BOUNDARY_RANDOM_LEN: usize = 28;

/// Maximum length of one encoded word (RFC 2047 §2).
pub const MAX_ENCODED_WORD_LENGTH: usize = 75;

/// Input bytes per encoded word. 45 bytes become 60 Base64 characters, which
/// fits [`MAX_ENCODED_WORD_LENGTH`] together with `=?utf-8?B?` and `?=`.
const ENCODED_WORD_CHUNK: usize = 45;

/// Encodes data as Base64 on a single line.
#[must_use]
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Encodes data as Base64 folded into CRLF-separated lines.
///
/// The result never ends with a line break. Empty input yields an empty
/// string.
#[must_use]
pub fn encode_base64_wrapped(data: &[u8]) -> String {
    let encoded = encode_base64(data);
    let mut result = String::with_capacity(encoded.len() + encoded.len() / MAX_LINE_LENGTH * 2);

    // Base64 output is pure ASCII, so every byte offset is a char boundary.
    for start in (0..encoded.len()).step_by(MAX_LINE_LENGTH) {
        if start > 0 {
            result.push_str("\r\n");
        }
        let end = (start + MAX_LINE_LENGTH).min(encoded.len());
        result.push_str(&encoded[start..end]);
    }

    result
}

/// Decodes Base64 data.
///
/// Whitespace (including folded line breaks) is ignored.
///
/// # Errors
///
/// Returns an error if the input is not valid Base64.
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    let cleaned: String = data.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD.decode(cleaned).map_err(Into::into)
}

/// Encodes header text as RFC 2047 `B` encoded words when needed.
///
/// ASCII text is returned unchanged unless it contains `=?`, which a reader
/// would mistake for the start of an encoded word. Otherwise the UTF-8 text
/// is split on character boundaries into space-separated words of at most
/// [`MAX_ENCODED_WORD_LENGTH`] characters, so the header can be folded
/// between them.
#[must_use]
pub fn encode_rfc2047(text: &str) -> String {
    if text.is_ascii() && !text.contains("=?") {
        return text.to_string();
    }

    let mut words = Vec::new();
    let mut start = 0;
    let mut end = 0;
    for (idx, ch) in text.char_indices() {
        let next = idx + ch.len_utf8();
        if next - start > ENCODED_WORD_CHUNK {
            words.push(encoded_word(&text[start..end]));
            start = end;
        }
        end = next;
    }
    words.push(encoded_word(&text[start..]));

    words.join(" ")
}

fn encoded_word(text: &str) -> String {
    format!("=?utf-8?B?{}?=", encode_base64(text.as_bytes()))
}

/// Decodes RFC 2047 encoded words in a header value.
///
/// Both `B` and `Q` encodings are understood for the `utf-8` and
/// `us-ascii` charsets. Whitespace between adjacent encoded words is
/// dropped (RFC 2047 §6.2). Anything that is not an encoded word, including
/// words in other charsets, is kept as is.
///
/// # Errors
///
/// Returns an error if an encoded word has a malformed payload or does not
/// decode to UTF-8.
pub fn decode_rfc2047(text: &str) -> Result<String> {
    let mut out = String::with_capacity(text.len());
    let mut previous_encoded = false;

    for (i, token) in text.split(' ').enumerate() {
        match decode_encoded_word(token)? {
            Some(decoded) => {
                if i > 0 && !previous_encoded {
                    out.push(' ');
                }
                out.push_str(&decoded);
                previous_encoded = true;
            }
            None => {
                if i > 0 {
                    out.push(' ');
                }
                out.push_str(token);
                previous_encoded = false;
            }
        }
    }

    Ok(out)
}

fn decode_encoded_word(token: &str) -> Result<Option<String>> {
    let Some(inner) = token
        .strip_prefix("=?")
        .and_then(|rest| rest.strip_suffix("?="))
    else {
        return Ok(None);
    };

    let mut fields = inner.splitn(3, '?');
    let (Some(charset), Some(encoding), Some(payload)) =
        (fields.next(), fields.next(), fields.next())
    else {
        return Ok(None);
    };

    // RFC 2231 language suffix: `utf-8*en`.
    let charset = charset.split('*').next().unwrap_or_default();
    if !charset.eq_ignore_ascii_case("utf-8") && !charset.eq_ignore_ascii_case("us-ascii") {
        return Ok(None);
    }

    let bytes = match encoding {
        "B" | "b" => decode_base64(payload)?,
        "Q" | "q" => decode_q(payload)?,
        _ => return Ok(None),
    };

    String::from_utf8(bytes)
        .map(Some)
        .map_err(|e| Error::Parse(format!("Encoded word is not UTF-8: {e}")))
}

/// Decodes the `Q` encoding: `_` is a space and `=XX` a hex byte.
fn decode_q(payload: &str) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(payload.len());
    let mut bytes = payload.bytes();

    while let Some(byte) = bytes.next() {
        match byte {
            b'_' => out.push(b' '),
            b'=' => {
                let hex = [bytes.next(), bytes.next()];
                let [Some(hi), Some(lo)] = hex else {
                    return Err(Error::Parse("Truncated Q escape".to_string()));
                };
                let value = std::str::from_utf8(&[hi, lo])
                    .ok()
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
                    .ok_or_else(|| Error::Parse("Invalid Q escape".to_string()))?;
                out.push(value);
            }
            _ => out.push(byte),
        }
    }

    Ok(out)
}

/// Generates a fresh multipart boundary token.
///
/// Tokens are [`BOUNDARY_PREFIX`] followed by 28 random alphanumeric
/// characters. The alphabet never produces a line that Base64 output or a
/// `--` delimiter could be confused with.
#[must_use]
pub fn generate_boundary() -> String {
    let random: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(BOUNDARY_RANDOM_LEN)
        .map(char::from)
        .collect();
    format!("{BOUNDARY_PREFIX}{random}")
}
