//! Encoding of one-shot notices into a cookie value.
//!
//! Notices contain spaces and punctuation that cookie values cannot carry,
//! so they travel as unpadded URL-safe base64.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Encodes a notice for storage in a cookie.
pub fn encode(message: &str) -> String {
    URL_SAFE_NO_PAD.encode(message.as_bytes())
}

/// Decodes a cookie value back into a notice.
///
/// Returns `None` for values that are not ours (bad base64 or not UTF-8).
pub fn decode(value: &str) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
    String::from_utf8(bytes).ok()
}
