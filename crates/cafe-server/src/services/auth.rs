//! Shared-secret verification for destructive requests

use subtle::ConstantTimeEq;

pub struct ApiKeyVerifier {
    api_key: Option<String>,
}

impl ApiKeyVerifier {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }

    /// Check a presented key against the configured one.
    ///
    /// Nothing verifies when no key is configured, including a request that
    /// omits the key entirely.
    pub fn verify(&self, presented: Option<&str>) -> bool {
        match (self.api_key.as_deref(), presented) {
            (Some(expected), Some(presented)) => {
                expected.as_bytes().ct_eq(presented.as_bytes()).into()
            }
            _ => false,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify() {
        let verifier = ApiKeyVerifier::new(Some("TopSecretAPIKey".to_string()));

        assert!(verifier.is_configured());
        assert!(verifier.verify(Some("TopSecretAPIKey")));
        assert!(!verifier.verify(Some("topsecretapikey")));
        assert!(!verifier.verify(Some("TopSecretAPIKey ")));
        assert!(!verifier.verify(Some("")));
        assert!(!verifier.verify(None));
    }

    #[test]
    fn test_unconfigured_refuses_everything() {
        let verifier = ApiKeyVerifier::new(None);

        assert!(!verifier.is_configured());
        assert!(!verifier.verify(None));
        assert!(!verifier.verify(Some("")));
        assert!(!verifier.verify(Some("anything")));
    }
}
