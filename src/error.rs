//! Harness error kinds and error value helpers.
//!
//! ```rust
//! use fcontract::{HarnessError, HarnessErrorKind};
//!
//! let decode = HarnessError::decode("malformed success body: trailing junk");
//! assert_eq!(decode.kind, HarnessErrorKind::Decode);
//!
//! let mismatch = HarnessError::assertion("expected 401, got 200");
//! assert_eq!(mismatch.kind, HarnessErrorKind::Assertion);
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessErrorKind {
    /// Observed response diverged from the scenario's declared expectation.
    Assertion,
    /// An expected-success body could not be decoded as structured data.
    Decode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessError {
    pub kind: HarnessErrorKind,
    pub message: String,
}

impl HarnessError {
    pub fn new(kind: HarnessErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn assertion(message: impl Into<String>) -> Self {
        Self::new(HarnessErrorKind::Assertion, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(HarnessErrorKind::Decode, message)
    }
}

impl Display for HarnessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for HarnessError {}
