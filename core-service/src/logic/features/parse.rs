//! Best-effort URL splitting
//!
//! Splits a raw URL into scheme / authority / path the way the training
//! pipeline's parser does, so serve-time features line up with the
//! features the model was fitted on. Never fails: an unsplittable URL
//! yields a degraded `ParsedUrl` with `ok == false`.

use std::net::Ipv6Addr;

use once_cell::sync::Lazy;
use regex::Regex;

/// Generic URI split: `scheme:` `//authority` `path` `?query` `#fragment`.
/// Every group is optional, so the pattern matches any string.
static URL_SPLIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(?:([A-Za-z][A-Za-z0-9+.\-]*):)?(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$")
        .expect("URL split pattern is valid")
});

/// Schemes whose last path segment may carry `;params`
const USES_PARAMS: &[&str] = &[
    "", "ftp", "hdl", "prospero", "http", "imap", "https", "shttp", "rtsp",
    "rtsps", "rtspu", "sip", "sips", "mms", "sftp", "tel",
];

/// Result of a best-effort URL split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    /// `false` when the URL was rejected and the fields below are fallbacks
    pub ok: bool,
    /// Lowercased scheme, if one was present
    pub scheme: Option<String>,
    /// Raw authority component, if a non-empty one was present
    pub authority: Option<String>,
    /// Authority, or the whole raw URL when no authority was parsed
    pub domain: String,
    /// Path without query, fragment or `;params`
    pub path: String,
}

impl ParsedUrl {
    /// Split `url`. Degrades instead of failing.
    pub fn parse(url: &str) -> Self {
        match split(url) {
            Some((scheme, authority, path)) => {
                let domain = authority.clone().unwrap_or_else(|| url.to_string());
                Self {
                    ok: true,
                    scheme,
                    authority,
                    domain,
                    path,
                }
            }
            None => Self::degraded(url),
        }
    }

    /// Fallback used when the URL cannot be split
    pub fn degraded(url: &str) -> Self {
        Self {
            ok: false,
            scheme: None,
            authority: None,
            domain: url.to_string(),
            path: String::new(),
        }
    }

    /// True iff a scheme was parsed and it is `https`
    pub fn is_https(&self) -> bool {
        self.scheme.as_deref() == Some("https")
    }
}

fn split(url: &str) -> Option<(Option<String>, Option<String>, String)> {
    // Leading controls/spaces are dropped and tabs/newlines removed before splitting
    let cleaned: String = url
        .trim_start_matches(|c: char| c <= ' ')
        .chars()
        .filter(|c| !matches!(c, '\t' | '\r' | '\n'))
        .collect();

    let caps = URL_SPLIT.captures(&cleaned)?;

    let scheme = caps.get(1).map(|m| m.as_str().to_ascii_lowercase());
    let authority = caps.get(2).map(|m| m.as_str());

    if let Some(netloc) = authority {
        if !valid_brackets(netloc) {
            return None;
        }
    }

    let mut path = caps.get(3).map_or("", |m| m.as_str());
    if USES_PARAMS.contains(&scheme.as_deref().unwrap_or("")) {
        path = strip_params(path);
    }

    let authority = authority.filter(|a| !a.is_empty()).map(str::to_string);

    Some((scheme, authority, path.to_string()))
}

/// Rejects unbalanced brackets and bracketed hosts that are not IPv6
fn valid_brackets(netloc: &str) -> bool {
    let open = netloc.contains('[');
    let close = netloc.contains(']');
    if open != close {
        return false;
    }
    if !open {
        return true;
    }

    let host = netloc.rsplit_once('@').map_or(netloc, |(_, h)| h);
    let inner = match (host.find('['), host.find(']')) {
        (Some(start), Some(end)) if start < end => &host[start + 1..end],
        _ => return true,
    };

    // IPvFuture literals (`[v1.fe80::a]`) are passed through unchecked
    inner.starts_with('v') || inner.starts_with('V') || inner.parse::<Ipv6Addr>().is_ok()
}

/// Cut `;params` from the last path segment
fn strip_params(path: &str) -> &str {
    let last_segment = path.rfind('/').unwrap_or(0);
    match path[last_segment..].find(';') {
        Some(offset) => &path[..last_segment + offset],
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_url() {
        let parsed = ParsedUrl::parse("https://www.example.com/a/b?q=1#frag");
        assert!(parsed.ok);
        assert_eq!(parsed.scheme.as_deref(), Some("https"));
        assert_eq!(parsed.authority.as_deref(), Some("www.example.com"));
        assert_eq!(parsed.domain, "www.example.com");
        assert_eq!(parsed.path, "/a/b");
    }

    #[test]
    fn test_parse_without_scheme_falls_back_to_url() {
        let parsed = ParsedUrl::parse("example.com/login");
        assert!(parsed.ok);
        assert_eq!(parsed.scheme, None);
        assert_eq!(parsed.authority, None);
        assert_eq!(parsed.domain, "example.com/login");
        assert_eq!(parsed.path, "example.com/login");
    }

    #[test]
    fn test_scheme_is_lowercased() {
        let parsed = ParsedUrl::parse("HTTPS://Example.com");
        assert_eq!(parsed.scheme.as_deref(), Some("https"));
        assert_eq!(parsed.domain, "Example.com");
        assert!(parsed.is_https());
    }

    #[test]
    fn test_invalid_scheme_chars() {
        let parsed = ParsedUrl::parse("1http://x.com");
        assert_eq!(parsed.scheme, None);
        assert_eq!(parsed.domain, "1http://x.com");
    }

    #[test]
    fn test_unbalanced_brackets_degrade() {
        let parsed = ParsedUrl::parse("http://[::1/login");
        assert!(!parsed.ok);
        assert_eq!(parsed.scheme, None);
        assert_eq!(parsed.domain, "http://[::1/login");
        assert_eq!(parsed.path, "");
    }

    #[test]
    fn test_bracketed_ipv6() {
        let parsed = ParsedUrl::parse("http://[2001:db8::1]:8080/x");
        assert!(parsed.ok);
        assert_eq!(parsed.domain, "[2001:db8::1]:8080");

        let bogus = ParsedUrl::parse("http://[not-an-ip]/x");
        assert!(!bogus.ok);
    }

    #[test]
    fn test_params_stripped_from_last_segment() {
        let parsed = ParsedUrl::parse("http://x.com/a;b/c;d?e");
        assert_eq!(parsed.path, "/a;b/c");

        let other = ParsedUrl::parse("git://x.com/c;d");
        assert_eq!(other.path, "/c;d");
    }

    #[test]
    fn test_empty_and_garbage() {
        let empty = ParsedUrl::parse("");
        assert!(empty.ok);
        assert_eq!(empty.domain, "");
        assert_eq!(empty.path, "");

        let garbage = ParsedUrl::parse("\u{0}\u{fffd}::??##\n//");
        assert!(garbage.ok);
        assert_eq!(garbage.path, "\u{fffd}::");
        assert!(!garbage.is_https());
    }

    #[test]
    fn test_empty_authority_falls_back() {
        let parsed = ParsedUrl::parse("file:///etc/passwd");
        assert_eq!(parsed.authority, None);
        assert_eq!(parsed.domain, "file:///etc/passwd");
        assert_eq!(parsed.path, "/etc/passwd");
    }
}
