//! Error: failure modes of the reverse transform
//!
//! Every way a cipher text can refuse to decode is collected in
//! [`DecodeError`]. Callers that only want a yes/no answer can treat
//! any variant as "invalid cipher text or key".

use std::fmt;
use std::num::ParseIntError;
use std::string::FromUtf8Error;

/// Failure while turning a cipher text back into plain text.
///
/// A wrong key only shows up here when it happens to break one of the
/// parse stages. A wrong key that parses cleanly produces wrong text
/// with no error at all.
#[derive(Debug)]
pub enum DecodeError {
    /// The cipher text is not valid standard base64.
    Base64(base64::DecodeError),
    /// The base64 payload is not valid UTF-8.
    Utf8(FromUtf8Error),
    /// A comma-separated token is not a decimal integer.
    Token(ParseIntError),
    /// A recovered value is outside the Unicode scalar range.
    CodePoint(i64),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base64(e) => write!(f, "invalid base64 cipher text: {}", e),
            Self::Utf8(_) => write!(f, "cipher payload is not valid UTF-8"),
            Self::Token(_) => write!(f, "cipher token is not a decimal integer"),
            Self::CodePoint(value) => {
                write!(f, "recovered value {} is not a valid code point", value)
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Base64(e) => Some(e),
            Self::Utf8(e) => Some(e),
            Self::Token(e) => Some(e),
            Self::CodePoint(_) => None,
        }
    }
}

impl From<base64::DecodeError> for DecodeError {
    fn from(e: base64::DecodeError) -> Self {
        Self::Base64(e)
    }
}

impl From<FromUtf8Error> for DecodeError {
    fn from(e: FromUtf8Error) -> Self {
        Self::Utf8(e)
    }
}

impl From<ParseIntError> for DecodeError {
    fn from(e: ParseIntError) -> Self {
        Self::Token(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_base64() {
        let e = DecodeError::from(base64::DecodeError::InvalidPadding);
        assert!(e.to_string().starts_with("invalid base64 cipher text"));
        assert!(e.source().is_some());
    }

    #[test]
    fn test_display_utf8() {
        let inner = String::from_utf8(vec![0xFF]).unwrap_err();
        let e = DecodeError::from(inner);
        assert_eq!(e.to_string(), "cipher payload is not valid UTF-8");
        assert!(e.source().is_some());
    }

    #[test]
    fn test_display_token() {
        let inner = "axm".parse::<i64>().unwrap_err();
        let e = DecodeError::from(inner);
        assert_eq!(e.to_string(), "cipher token is not a decimal integer");
        assert!(e.source().is_some());
    }

    #[test]
    fn test_display_code_point() {
        let e = DecodeError::CodePoint(-42);
        assert_eq!(e.to_string(), "recovered value -42 is not a valid code point");
        assert!(e.source().is_none());
    }
}
