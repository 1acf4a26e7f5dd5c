//! Matrix: per-character coefficients derived from the secret key
//!
//! Each key character contributes one coefficient in [3, 11], computed
//! from its code point. The coefficients scale code points during the
//! forward transform and divide them back out during the reverse one.

/// Coefficient table derived from a key.
///
/// Derived fresh for every transform call and never cached, so the key
/// string stays the single source of truth.
#[derive(Debug, Clone)]
pub struct KeyMatrix {
    coefficients: Vec<i64>,
}

impl KeyMatrix {
    /// Derive one coefficient per key character: `(code_point % 9) + 3`.
    ///
    /// Coefficients are always in [3, 11], so they are never zero and
    /// division by a coefficient is always defined.
    pub fn from_key(key: &str) -> Self {
        let coefficients = key
            .chars()
            .map(|c| (i64::from(c as u32) % 9) + 3)
            .collect();
        Self { coefficients }
    }

    /// Coefficient for a text position, reusing the key cyclically.
    ///
    /// Panics if the matrix is empty. Callers handle the empty-key case
    /// before deriving a matrix.
    pub fn coefficient(&self, position: usize) -> i64 {
        self.coefficients[position % self.coefficients.len()]
    }

    /// Number of coefficients, equal to the key's character count.
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// True when the key contributed no characters.
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// All coefficients in key order.
    pub fn coefficients(&self) -> &[i64] {
        &self.coefficients
    }
}
