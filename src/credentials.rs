//! Secret handling and the credential-state matrix for authentication checks.

pub const LIVE_TOKEN_VAR: &str = "FCONTRACT_API_TOKEN";

#[derive(PartialEq, Eq)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn expose(&self) -> &str {
        self.value.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        unsafe {
            self.value.as_mut_vec().fill(0);
        }
    }
}

/// Reads the live bearer token supplied by the environment, if any.
///
/// The token is never stored in the repository; when it is absent every
/// scenario that depends on authenticated success is skipped rather than
/// failed.
pub fn live_token() -> Option<SecretString> {
    std::env::var(LIVE_TOKEN_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(SecretString::new)
}

/// Credential states exercised against the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialCase {
    /// Real token from the environment; the only case expected to authenticate.
    Valid,
    /// Empty `Authorization` header value.
    Empty,
    /// Syntactically bearer-shaped but unknown token.
    Malformed,
    /// A rotated-out token that the service must no longer accept.
    Stale,
}

impl CredentialCase {
    pub fn expects_success(self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Maps the case to a concrete `Authorization` header value.
    ///
    /// Returns `None` only for `Valid` without a live token, which callers
    /// must report as skipped, not failed.
    pub fn resolve(self, live: Option<&SecretString>) -> Option<ResolvedCredential> {
        let (header_value, expect_success) = match self {
            Self::Valid => {
                let token = live?;
                (format!("Bearer {}", token.expose()), true)
            }
            Self::Empty => (String::new(), false),
            Self::Malformed => ("Bearer INVALID_TOKEN".to_string(), false),
            Self::Stale => ("Bearer OLD_TOKEN".to_string(), false),
        };

        Some(ResolvedCredential {
            header_value,
            expect_success,
        })
    }
}

impl std::fmt::Display for CredentialCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let id = match self {
            Self::Valid => "valid_token",
            Self::Empty => "empty_token",
            Self::Malformed => "invalid_token",
            Self::Stale => "old_token",
        };

        f.write_str(id)
    }
}

#[derive(PartialEq, Eq)]
pub struct ResolvedCredential {
    pub header_value: String,
    pub expect_success: bool,
}

impl std::fmt::Debug for ResolvedCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedCredential")
            .field("header_value", &"[REDACTED]")
            .field("expect_success", &self.expect_success)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_failure_cases_resolve_without_a_live_token() {
        let empty = CredentialCase::Empty.resolve(None).expect("empty resolves");
        assert_eq!(empty.header_value, "");
        assert!(!empty.expect_success);

        let malformed = CredentialCase::Malformed
            .resolve(None)
            .expect("malformed resolves");
        assert_eq!(malformed.header_value, "Bearer INVALID_TOKEN");
        assert!(!malformed.expect_success);

        let stale = CredentialCase::Stale.resolve(None).expect("stale resolves");
        assert_eq!(stale.header_value, "Bearer OLD_TOKEN");
        assert!(!stale.expect_success);
    }

    #[test]
    fn valid_case_requires_the_live_token() {
        assert!(CredentialCase::Valid.resolve(None).is_none());

        let token = SecretString::new("live-abc");
        let resolved = CredentialCase::Valid
            .resolve(Some(&token))
            .expect("valid resolves with a token");
        assert_eq!(resolved.header_value, "Bearer live-abc");
        assert!(resolved.expect_success);
    }

    #[test]
    fn only_the_valid_case_expects_success() {
        assert!(CredentialCase::Valid.expects_success());
        assert!(!CredentialCase::Empty.expects_success());
        assert!(!CredentialCase::Malformed.expects_success());
        assert!(!CredentialCase::Stale.expects_success());
    }

    #[test]
    fn secrets_never_render_in_debug_output() {
        let secret = SecretString::new("live-abc");
        assert_eq!(format!("{secret:?}"), "[REDACTED]");

        let resolved = CredentialCase::Valid
            .resolve(Some(&secret))
            .expect("valid resolves");
        let rendered = format!("{resolved:?}");
        assert!(!rendered.contains("live-abc"), "rendered: {rendered}");
    }

    #[test]
    fn case_ids_are_stable() {
        assert_eq!(CredentialCase::Valid.to_string(), "valid_token");
        assert_eq!(CredentialCase::Empty.to_string(), "empty_token");
        assert_eq!(CredentialCase::Malformed.to_string(), "invalid_token");
        assert_eq!(CredentialCase::Stale.to_string(), "old_token");
    }
}
