//! Domain Feature Extraction
//!
//! Subdomain depth, hyphenation, IP-literal hosts and low-trust TLDs.

use once_cell::sync::Lazy;
use regex::Regex;

use super::lexical::count_char;
use super::vector::{FeatureExtractor, FeatureRecord, UrlContext};

/// Exactly four dot-separated groups of 1-3 ASCII digits
static IPV4_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[0-9]{1,3}\.){3}[0-9]{1,3}$").expect("IPv4 pattern is valid")
});

/// TLDs handed out free or cheaply and overrepresented in phishing feeds
pub const SUSPICIOUS_TLDS: &[&str] = &[
    "tk", "ml", "ga", "cf", "gq", "xyz", "top", "club", "info", "bid", "win",
];

/// Domain structure features
#[derive(Debug, Clone, Copy, Default)]
pub struct DomainFeatures;

impl DomainFeatures {
    pub fn new() -> Self {
        Self
    }
}

/// Substring after the final '.', empty when there is none
pub fn top_level_domain(domain: &str) -> &str {
    domain.rsplit_once('.').map_or("", |(_, tld)| tld)
}

/// Full-string dotted-quad match (no range check on the octets)
pub fn is_ipv4_literal(domain: &str) -> bool {
    IPV4_LITERAL.is_match(domain)
}

/// Bracket-presence check, looser than a full IPv6 literal match
pub fn has_ipv6_brackets(domain: &str) -> bool {
    domain.contains('[') && domain.contains(']')
}

pub fn is_suspicious_tld(domain: &str) -> bool {
    SUSPICIOUS_TLDS.contains(&top_level_domain(domain))
}

impl FeatureExtractor for DomainFeatures {
    fn extract(&self, url: &UrlContext<'_>, record: &mut FeatureRecord) {
        let domain = url.parsed.domain.as_str();

        record.set_by_name("num_subdomains", count_char(domain, '.').saturating_sub(1));
        record.set_flag("multiple_hyphens", count_char(domain, '-') > 1);

        record.set_flag("has_ipv4", is_ipv4_literal(domain));
        record.set_flag("has_ipv6", has_ipv6_brackets(domain));

        record.set_flag("suspicious_tld", is_suspicious_tld(domain));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(url: &str) -> FeatureRecord {
        let mut record = FeatureRecord::new();
        DomainFeatures::new().extract(&UrlContext::new(url), &mut record);
        record
    }

    #[test]
    fn test_ipv4_literal() {
        assert!(is_ipv4_literal("192.168.1.1"));
        assert!(is_ipv4_literal("999.0.0.1"));
        assert!(!is_ipv4_literal("192.168.1.1.5"));
        assert!(!is_ipv4_literal("example.com"));
        assert!(!is_ipv4_literal("1234.1.1.1"));
        assert!(!is_ipv4_literal("192.168.1.1:8080"));
        assert!(!is_ipv4_literal("x192.168.1.1"));
    }

    #[test]
    fn test_ipv4_from_url() {
        assert_eq!(run("http://192.168.1.1/login").get_by_name("has_ipv4"), Some(1));
        assert_eq!(run("192.168.1.1").get_by_name("has_ipv4"), Some(1));
        assert_eq!(run("http://192.168.1.1:8080/").get_by_name("has_ipv4"), Some(0));
    }

    #[test]
    fn test_ipv6_brackets() {
        assert_eq!(run("http://[2001:db8::1]/").get_by_name("has_ipv6"), Some(1));
        assert_eq!(run("http://example.com/").get_by_name("has_ipv6"), Some(0));
        // Unbalanced brackets degrade the parse; domain becomes the raw URL
        assert_eq!(run("http://[::1/x").get_by_name("has_ipv6"), Some(0));
    }

    #[test]
    fn test_suspicious_tld() {
        assert!(is_suspicious_tld("foo.tk"));
        assert!(is_suspicious_tld("a.b.xyz"));
        assert!(!is_suspicious_tld("foo.com"));
        assert!(!is_suspicious_tld("tk"));
        assert!(!is_suspicious_tld(""));
        assert_eq!(top_level_domain("foo.com"), "com");
        assert_eq!(top_level_domain("localhost"), "");
        assert_eq!(top_level_domain("trailing."), "");
    }

    #[test]
    fn test_subdomains_and_hyphens() {
        let record = run("http://a.b.example.com");
        assert_eq!(record.get_by_name("num_subdomains"), Some(2));
        assert_eq!(record.get_by_name("multiple_hyphens"), Some(0));

        let record = run("http://secure-login-verify.com");
        assert_eq!(record.get_by_name("num_subdomains"), Some(0));
        assert_eq!(record.get_by_name("multiple_hyphens"), Some(1));

        let record = run("http://localhost/");
        assert_eq!(record.get_by_name("num_subdomains"), Some(0));
    }
}
