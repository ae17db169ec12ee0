use crate::error::{ExtractError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static ESCAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\u(.{4})").unwrap());

/// Replaces every `\uXXXX` escape in `text` with the character it encodes.
///
/// The escapes are UTF-16 code units, so a surrogate pair spelled as two
/// escapes yields one character. Text produced by an escape is never decoded again.
pub fn decode_unicode_escapes(text: &str) -> Result<String> {
    let mut units: Vec<u16> = Vec::with_capacity(text.len());
    let mut last = 0;

    for captures in ESCAPE.captures_iter(text) {
        let (Some(whole), Some(payload)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        units.extend(text[last..whole.start()].encode_utf16());

        let hex = payload.as_str();
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ExtractError::Decode(format!(
                "`\\u{}` at byte {} is not a hexadecimal escape",
                hex,
                whole.start()
            )));
        }
        let unit = u16::from_str_radix(hex, 16).map_err(|e| {
            ExtractError::Decode(format!("`\\u{}` at byte {}: {}", hex, whole.start(), e))
        })?;
        units.push(unit);

        last = whole.end();
    }
    units.extend(text[last..].encode_utf16());

    String::from_utf16(&units)
        .map_err(|_| ExtractError::Decode(String::from("escape encodes an unpaired surrogate")))
}
