//! axm: key-driven text obfuscation
//!
//! A tool that transforms text into an unreadable envelope that:
//! - Hides the content from casual readers (scaled, masked, packed)
//! - Anyone holding the key can reverse exactly
//!
//! ## How it works
//!
//! 1. **Matrix**: Derive one coefficient in [3, 11] per key character
//! 2. **Scale**: Multiply each code point by its cycled coefficient
//! 3. **Mask**: XOR the product with the matching key code point
//! 4. **Pack**: Join the values with commas and base64 the result
//!
//! Decoding runs the same steps backwards with the same key. A wrong
//! key either trips a parse failure or silently yields wrong text.
//!
//! This is NOT a cryptographically secure cipher. There is no
//! authentication and no resistance to standard cryptanalysis; it is
//! an obfuscation layer, not protection for secrets that matter.
//!
//! ```
//! let cipher = axm::encode("meet at dawn", "key");
//! assert_eq!(axm::decode(&cipher, "key").unwrap(), "meet at dawn");
//! ```

pub mod error;
pub mod matrix;
pub mod transform;

pub use error::DecodeError;
pub use matrix::KeyMatrix;
pub use transform::{decode, encode};
