//! JAN lookup code validation
//!
//! A lookup code is whatever the caller sent with every non-digit stripped.
//! Only 8-digit (short JAN / EAN-8) and 13-digit (standard JAN / EAN-13)
//! results are accepted. Check digits are not verified.

use std::fmt;
use thiserror::Error;

/// Lookup code validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JanCodeError {
    #[error("JAN code is required")]
    Missing,

    #[error("JAN code must be 8 or 13 digits, got {digits} digit(s) from '{raw}'")]
    InvalidLength { raw: String, digits: usize },
}

/// Validated lookup code (digits only, length 8 or 13)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupCode(String);

impl LookupCode {
    /// Strip non-digits from `raw` and validate the length
    pub fn parse(raw: &str) -> Result<Self, JanCodeError> {
        if raw.is_empty() {
            return Err(JanCodeError::Missing);
        }

        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        match digits.len() {
            8 | 13 => Ok(Self(digits)),
            n => Err(JanCodeError::InvalidLength {
                raw: raw.to_string(),
                digits: n,
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of each digit, in order
    pub fn digits(&self) -> Vec<u8> {
        self.0.bytes().map(|b| b - b'0').collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a validated code
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LookupCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LookupCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
