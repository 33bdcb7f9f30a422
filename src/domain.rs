//! Domain pair derivation
//!
//! Every run works on two forms of one domain: the `www.`-prefixed form and
//! the bare form. Both are derived from whatever the operator typed, so
//! entering `www.example.com` or `example.com` yields the same pair.

/// The `www.` and bare forms of one input domain, treated as a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainPair {
    /// Domain with the `www.` prefix (e.g., "www.example.com")
    pub with_www: String,
    /// Domain without the `www.` prefix (e.g., "example.com")
    pub without_www: String,
}

impl DomainPair {
    /// Derive both forms from an operator-supplied domain string.
    ///
    /// The input is not validated; a malformed domain is carried through
    /// verbatim into every artifact that references it.
    pub fn derive(input: &str) -> Self {
        let without_www = input.strip_prefix("www.").unwrap_or(input).to_string();
        let with_www = if input.starts_with("www.") {
            input.to_string()
        } else {
            format!("www.{}", input)
        };

        Self {
            with_www,
            without_www,
        }
    }

    /// Filename of the certificate produced for this pair
    pub fn cert_file_name(&self) -> String {
        format!("{}.pem", self.with_www)
    }

    /// Filename of the private key produced for this pair
    pub fn key_file_name(&self) -> String {
        format!("{}-key.pem", self.with_www)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_from_bare_domain() {
        let pair = DomainPair::derive("smartseraina.ch");
        assert_eq!(pair.with_www, "www.smartseraina.ch");
        assert_eq!(pair.without_www, "smartseraina.ch");
    }

    #[test]
    fn test_derive_from_www_domain() {
        let pair = DomainPair::derive("www.smartseraina.ch");
        assert_eq!(pair.with_www, "www.smartseraina.ch");
        assert_eq!(pair.without_www, "smartseraina.ch");
    }

    #[test]
    fn test_derive_is_idempotent_over_both_forms() {
        let pair = DomainPair::derive("example.com");
        assert_eq!(DomainPair::derive(&pair.with_www), pair);
        assert_eq!(DomainPair::derive(&pair.without_www), pair);
    }

    #[test]
    fn test_cert_file_names_use_www_form() {
        let pair = DomainPair::derive("example.com");
        assert_eq!(pair.cert_file_name(), "www.example.com.pem");
        assert_eq!(pair.key_file_name(), "www.example.com-key.pem");
    }

    #[test]
    fn test_malformed_input_is_passed_through() {
        // No validation by design; whatever was typed flows through.
        let pair = DomainPair::derive("not a domain");
        assert_eq!(pair.with_www, "www.not a domain");
        assert_eq!(pair.without_www, "not a domain");
    }
}
