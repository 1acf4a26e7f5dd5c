//! Transform: the forward and reverse text transforms
//!
//! Encoding maps every character of the input to one integer: the code
//! point is multiplied by its matrix coefficient, then XORed with the
//! code point of the matching key character. The integers are rendered
//! in decimal, joined with commas, and the joined string is base64
//! encoded. Decoding runs the same pipeline backwards.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::DecodeError;
use crate::matrix::KeyMatrix;

/// Obfuscate `text` with `key`.
///
/// Returns the base64 cipher text. An empty key yields an empty string
/// rather than an error, and an empty text encodes to an empty string.
/// The result is a pure function of `(text, key)`.
pub fn encode(text: &str, key: &str) -> String {
    if key.is_empty() {
        return String::new();
    }

    let matrix = KeyMatrix::from_key(key);
    let key_points: Vec<i64> = key.chars().map(|c| i64::from(c as u32)).collect();

    let tokens: Vec<String> = text
        .chars()
        .enumerate()
        .map(|(i, ch)| {
            let scaled = i64::from(ch as u32) * matrix.coefficient(i);
            let masked = scaled ^ key_points[i % key_points.len()];
            masked.to_string()
        })
        .collect();

    STANDARD.encode(tokens.join(","))
}

/// Recover the text hidden in `cipher` with `key`.
///
/// Mirrors [`encode`]: an empty key yields `Ok("")`. Anything malformed
/// in the cipher text, whether broken base64, a payload that is not
/// UTF-8, a token that is not a decimal integer, or a recovered value
/// outside the Unicode scalar range, is reported as a [`DecodeError`].
///
/// A wrong key is only caught when it trips one of those failures. A
/// wrong key that divides cleanly into valid code points returns wrong
/// text with no error, which is inherent to the scheme.
pub fn decode(cipher: &str, key: &str) -> Result<String, DecodeError> {
    if key.is_empty() {
        return Ok(String::new());
    }

    let matrix = KeyMatrix::from_key(key);
    let key_points: Vec<i64> = key.chars().map(|c| i64::from(c as u32)).collect();

    let joined = String::from_utf8(STANDARD.decode(cipher)?)?;

    let mut text = String::new();
    for (i, token) in joined.split(',').enumerate() {
        let masked: i64 = token.parse()?;
        let scaled = masked ^ key_points[i % key_points.len()];
        // Truncating division; negative intermediates fail the range check
        let point = scaled / matrix.coefficient(i);
        let ch = u32::try_from(point)
            .ok()
            .and_then(char::from_u32)
            .ok_or(DecodeError::CodePoint(point))?;
        text.push(ch);
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known_vector() {
        // 'A' = 65, coefficient 11, key point 107: 715 ^ 107 = 672
        assert_eq!(encode("A", "key"), "Njcy");
    }

    #[test]
    fn test_decode_known_vector() {
        assert_eq!(decode("Njcy", "key").unwrap(), "A");
    }

    #[test]
    fn test_roundtrip_ascii() {
        let text = "Hello, World! 123";
        assert_eq!(decode(&encode(text, "key"), "key").unwrap(), text);
    }

    #[test]
    fn test_roundtrip_unicode() {
        let text = "héllo wörld 日本語 🚀";
        assert_eq!(decode(&encode(text, "clé"), "clé").unwrap(), text);
    }

    #[test]
    fn test_roundtrip_key_longer_than_text() {
        let key = "a much longer key than the text itself";
        assert_eq!(decode(&encode("hi", key), key).unwrap(), "hi");
    }

    #[test]
    fn test_empty_key_conventions() {
        assert_eq!(encode("secret", ""), "");
        assert_eq!(decode("Njcy", "").unwrap(), "");
    }

    #[test]
    fn test_empty_text_encodes_to_empty() {
        assert_eq!(encode("", "key"), "");
    }

    #[test]
    fn test_encode_deterministic() {
        assert_eq!(encode("same", "key"), encode("same", "key"));
    }

    #[test]
    fn test_decode_rejects_invalid_base64() {
        let err = decode("not base64 at all!!", "key").unwrap_err();
        assert!(matches!(err, DecodeError::Base64(_)));
    }

    #[test]
    fn test_decode_rejects_non_utf8_payload() {
        let cipher = STANDARD.encode([0xFF, 0xFE]);
        let err = decode(&cipher, "key").unwrap_err();
        assert!(matches!(err, DecodeError::Utf8(_)));
    }

    #[test]
    fn test_decode_rejects_bad_token() {
        let cipher = STANDARD.encode("12,abc");
        let err = decode(&cipher, "key").unwrap_err();
        assert!(matches!(err, DecodeError::Token(_)));
    }

    #[test]
    fn test_decode_rejects_empty_cipher() {
        // Empty payload splits into one empty token
        let err = decode("", "key").unwrap_err();
        assert!(matches!(err, DecodeError::Token(_)));
    }

    #[test]
    fn test_decode_rejects_negative_result() {
        // -9 ^ 107 = -100, and -100 / 11 truncates to -9
        let cipher = STANDARD.encode("-9");
        let err = decode(&cipher, "k").unwrap_err();
        assert!(matches!(err, DecodeError::CodePoint(-9)));
    }

    #[test]
    fn test_decode_rejects_surrogate_range() {
        let masked = (0xD800_i64 * 11) ^ 107;
        let cipher = STANDARD.encode(masked.to_string());
        let err = decode(&cipher, "k").unwrap_err();
        assert!(matches!(err, DecodeError::CodePoint(0xD800)));
    }

    #[test]
    fn test_wrong_key_yields_wrong_text_without_error() {
        let cipher = encode("Hello", "key");
        let decoded = decode(&cipher, "KEY").unwrap();
        assert_ne!(decoded, "Hello");
    }
}
