/*
[INPUT]:  Base64 API secret and a canonical message
[OUTPUT]: Base64 HMAC-SHA256 signatures and request timestamps
[POS]:    Auth layer - cryptographic signing for request authentication
[UPDATE]: When changing signing algorithm or key format
*/

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::http::Result;

type HmacSha256 = Hmac<Sha256>;

/// Sign `message` with the base64 encoded `secret`
///
/// Returns the base64 encoded HMAC-SHA256 digest. Fails with
/// [`CoinbaseError::Encoding`](crate::CoinbaseError::Encoding) when the
/// secret does not decode.
pub fn signature(secret: &str, message: &str) -> Result<String> {
    let key = BASE64.decode(secret)?;
    // HMAC takes keys of any length
    let mut mac = HmacSha256::new_from_slice(&key).expect("hmac accepts any key length");
    mac.update(message.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// Current wall-clock time as decimal seconds since the Unix epoch
pub fn timestamp() -> String {
    let now = Utc::now();
    format!("{}.{:03}", now.timestamp(), now.timestamp_subsec_millis())
}
