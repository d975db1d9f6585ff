use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Verifies the webhook signature header: a hex HMAC-SHA1 digest of the raw
/// request body keyed by the bot API key. Comparison happens on the decoded
/// bytes via the Mac so it stays constant-time.
pub fn verify(api_key: &str, signature: Option<&str>, body: &[u8]) -> bool {
    let Some(signature) = signature else {
        return false;
    };
    let Some(claimed) = decode_hex(signature.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha1::new_from_slice(api_key.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&claimed).is_ok()
}

/// Hex HMAC-SHA1 digest of `body`, as the platform computes it. Used by tests
/// and local webhook simulation.
pub fn sign(api_key: &str, body: &[u8]) -> String {
    let mut mac = HmacSha1::new_from_slice(api_key.as_bytes()).expect("hmac accepts any key length");
    mac.update(body);
    let digest = mac.finalize().into_bytes();
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

fn decode_hex(s: &str) -> Option<Vec<u8>> {
    if s.is_empty() || s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(s.get(i..i + 2)?, 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signs_rfc2202_test_vector() {
        // RFC 2202 case 2: key "Jefe", data "what do ya want for nothing?".
        let sig = sign("Jefe", b"what do ya want for nothing?");
        assert_eq!(sig, "effcdf6ae5eb2fa2d27416d5f184df9c259a7c79");
    }

    #[test]
    fn accepts_matching_signature() {
        let body = br#"{"messages":[]}"#;
        let sig = sign("secret-key", body);
        assert!(verify("secret-key", Some(&sig), body));
        // Hex case must not matter.
        assert!(verify("secret-key", Some(&sig.to_uppercase()), body));
    }

    #[test]
    fn rejects_tampered_body() {
        let sig = sign("secret-key", b"original body");
        assert!(!verify("secret-key", Some(&sig), b"tampered body"));
    }

    #[test]
    fn rejects_wrong_key() {
        let body = b"payload";
        let sig = sign("secret-key", body);
        assert!(!verify("other-key", Some(&sig), body));
    }

    #[test]
    fn rejects_missing_or_malformed_header() {
        assert!(!verify("secret-key", None, b"payload"));
        assert!(!verify("secret-key", Some(""), b"payload"));
        assert!(!verify("secret-key", Some("not hex"), b"payload"));
        assert!(!verify("secret-key", Some("abc"), b"payload"));
    }
}
