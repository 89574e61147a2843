//! Integration Tests for URL Feature Extraction
//!
//! Runs the full extractor set over representative and hostile inputs.

#[cfg(test)]
mod integration_tests {
    use crate::logic::features::{extract_url_features, FEATURE_COUNT, FEATURE_LAYOUT};

    fn feature(url: &str, name: &str) -> u64 {
        extract_url_features(url)
            .get_by_name(name)
            .unwrap_or_else(|| panic!("missing feature {}", name))
    }

    /// Every canonical name present for every input
    #[test]
    fn test_fixed_width_for_any_input() {
        let long = "a".repeat(200_000);
        let inputs = [
            "",
            "   ",
            "\t\n\r",
            "\u{0}\u{1}\u{7f}\u{fffd}",
            "::::////????####",
            "http://",
            "https://[",
            "]]]]@@@@%%%%",
            long.as_str(),
        ];

        for input in inputs {
            let record = extract_url_features(input);
            assert_eq!(record.values.len(), FEATURE_COUNT);
            for name in FEATURE_LAYOUT {
                assert!(record.get_by_name(name).is_some(), "{} missing for {:?}", name, input);
            }
            for (name, value) in record.iter() {
                if !name.starts_with("url_") && !name.ends_with("_length") && !name.starts_with("num_") {
                    assert!(value <= 1, "flag {} = {} for {:?}", name, value, input);
                }
            }
        }
    }

    #[test]
    fn test_extraction_is_idempotent() {
        for url in ["https://www.google.com", "http://[::1/x", "", "bit.ly/x%20y"] {
            assert_eq!(extract_url_features(url), extract_url_features(url));
        }
    }

    #[test]
    fn test_long_url_lengths() {
        let url = format!("http://example.com/{}", "x".repeat(100_000));
        let record = extract_url_features(&url);
        assert_eq!(record.get_by_name("url_length"), Some(100_019));
        assert_eq!(record.get_by_name("path_length"), Some(100_001));
    }

    #[test]
    fn test_empty_url() {
        let record = extract_url_features("");
        assert!(record.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_legitimate_url() {
        let record = extract_url_features("https://www.google.com");
        assert_eq!(record.get_by_name("url_length"), Some(22));
        assert_eq!(record.get_by_name("domain_length"), Some(14));
        assert_eq!(record.get_by_name("path_length"), Some(0));
        assert_eq!(record.get_by_name("num_dots"), Some(2));
        assert_eq!(record.get_by_name("num_slashes"), Some(2));
        assert_eq!(record.get_by_name("num_subdomains"), Some(1));
        assert_eq!(record.get_by_name("is_https"), Some(1));
        assert_eq!(record.get_by_name("phishing_keyword"), Some(0));
        assert_eq!(record.get_by_name("suspicious_tld"), Some(0));
        assert_eq!(record.get_by_name("has_ipv4"), Some(0));
    }

    #[test]
    fn test_hyphenated_lure() {
        let url = "http://secure-login-verify-facebook.com";
        assert_eq!(feature(url, "multiple_hyphens"), 1);
        assert_eq!(feature(url, "num_hyphens"), 3);
        assert_eq!(feature(url, "phishing_keyword"), 1);
        assert_eq!(feature(url, "is_https"), 0);
        assert_eq!(feature(url, "brand_in_path"), 0);
    }

    #[test]
    fn test_ip_host_lure() {
        let url = "http://192.168.1.1/login";
        assert_eq!(feature(url, "has_ipv4"), 1);
        assert_eq!(feature(url, "phishing_keyword"), 1);
        assert_eq!(feature(url, "is_https"), 0);
        assert_eq!(feature(url, "num_digits"), 8);
        assert_eq!(feature(url, "path_length"), 6);
    }

    #[test]
    fn test_suspicious_tld_from_domain() {
        assert_eq!(feature("http://foo.tk", "suspicious_tld"), 1);
        assert_eq!(feature("https://phishing-site.xyz", "suspicious_tld"), 1);
        assert_eq!(feature("http://foo.com", "suspicious_tld"), 0);
        assert_eq!(feature("http://localhost", "suspicious_tld"), 0);
    }

    #[test]
    fn test_is_https_variants() {
        assert_eq!(feature("http://x.com", "is_https"), 0);
        assert_eq!(feature("https://x.com", "is_https"), 1);
        assert_eq!(feature("ftp://x.com", "is_https"), 0);
        assert_eq!(feature("https://[bad", "is_https"), 0);
    }

    #[test]
    fn test_degraded_parse_uses_raw_url_as_domain() {
        let url = "https://[bad/login";
        assert_eq!(feature(url, "domain_length"), url.chars().count() as u64);
        assert_eq!(feature(url, "path_length"), 0);
    }
}
