//! The opaque access token used to talk to the reporting backend.

use std::fmt;

/// An opaque access token.
///
/// The token is kept in memory only. Its `Debug` output is redacted so it
/// never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Build a credential from user input.
    ///
    /// Surrounding whitespace is trimmed; returns `None` if nothing is left.
    pub fn new(candidate: &str) -> Option<Self> {
        let token = candidate.trim();
        if token.is_empty() {
            None
        } else {
            Some(Self(token.to_string()))
        }
    }

    /// The raw token, for building request headers.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_input() {
        let credential = Credential::new("  abc123\n").unwrap();
        assert_eq!(credential.expose(), "abc123");
    }

    #[test]
    fn test_blank_is_rejected() {
        assert!(Credential::new("").is_none());
        assert!(Credential::new("   ").is_none());
    }

    #[test]
    fn test_debug_is_redacted() {
        let credential = Credential::new("secret-token").unwrap();
        let debug = format!("{:?}", credential);
        assert!(!debug.contains("secret-token"));
    }
}
