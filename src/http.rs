//! HTTP client utilities
//!
//! Provides a reqwest::Client configured with timeouts and system proxy support

use crate::error::AppError;
use reqwest::{Client, Proxy};
use std::time::Duration;
use url::Url;

/// Build a reqwest Client with the given timeout and honoring system proxy env vars
///
/// Recognized env vars:
/// - HTTP_PROXY / http_proxy
/// - HTTPS_PROXY / https_proxy
/// - ALL_PROXY / all_proxy
/// - NO_PROXY / no_proxy
pub fn client_with_timeout(timeout: Duration) -> Result<Client, AppError> {
    let mut builder = Client::builder().timeout(timeout);

    let https_proxy = getenv_first(&["HTTPS_PROXY", "https_proxy"])
        .or_else(|| getenv_first(&["ALL_PROXY", "all_proxy"]));
    let http_proxy = getenv_first(&["HTTP_PROXY", "http_proxy"])
        .or_else(|| getenv_first(&["ALL_PROXY", "all_proxy"]));
    let no_proxy = getenv_first(&["NO_PROXY", "no_proxy"]).unwrap_or_default();
    let no_proxy_rules = parse_no_proxy(&no_proxy);

    if https_proxy.is_some() || http_proxy.is_some() {
        // Custom selector so NO_PROXY and per-scheme proxies are both honored
        let proxy = Proxy::custom(move |url: &Url| {
            let host = url.host_str().unwrap_or("");
            if should_bypass_proxy(host, &no_proxy_rules) {
                return None;
            }
            select_proxy(url.scheme(), https_proxy.as_deref(), http_proxy.as_deref())
        });
        builder = builder.proxy(proxy);
    }

    builder
        .user_agent(concat!("hugeicons-mcp/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))
}

fn select_proxy(scheme: &str, https_proxy: Option<&str>, http_proxy: Option<&str>) -> Option<String> {
    match scheme {
        "https" => https_proxy.or(http_proxy).map(str::to_string),
        "http" => http_proxy.or(https_proxy).map(str::to_string),
        _ => None,
    }
}

fn getenv_first(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| std::env::var(k).ok())
        .find(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq)]
enum NoProxyRule {
    Wildcard,
    /// Matches the domain itself and any subdomain
    Domain(String),
    Exact(String),
}

fn parse_no_proxy(val: &str) -> Vec<NoProxyRule> {
    val.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|token| {
            if token == "*" {
                return NoProxyRule::Wildcard;
            }

            if let Some(domain) = token.strip_prefix('.') {
                return NoProxyRule::Domain(domain.to_ascii_lowercase());
            }

            // IPs and localhost match exactly, anything else as a domain suffix
            let t = token.to_ascii_lowercase();
            if t == "localhost" || t.parse::<std::net::IpAddr>().is_ok() {
                NoProxyRule::Exact(t)
            } else {
                NoProxyRule::Domain(t)
            }
        })
        .collect()
}

fn should_bypass_proxy(host: &str, rules: &[NoProxyRule]) -> bool {
    if host.is_empty() {
        return false;
    }
    let host_lc = host.to_ascii_lowercase();
    if is_loopback(&host_lc) {
        return true;
    }
    rules.iter().any(|rule| match rule {
        NoProxyRule::Wildcard => true,
        NoProxyRule::Exact(ex) => host_lc == *ex,
        NoProxyRule::Domain(suf) => {
            host_lc == *suf || host_lc.ends_with(&format!(".{}", suf))
        }
    })
}

/// Loopback hosts never go through a proxy
fn is_loopback(host: &str) -> bool {
    let host = host.trim_start_matches('[').trim_end_matches(']');
    host == "localhost"
        || host
            .parse::<std::net::IpAddr>()
            .map(|ip| ip.is_loopback())
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_proxy_rules() {
        let rules = parse_no_proxy(" localhost, .hugeicons.com ,10.0.0.1,example.org,, *");
        assert_eq!(
            rules,
            vec![
                NoProxyRule::Exact("localhost".into()),
                NoProxyRule::Domain("hugeicons.com".into()),
                NoProxyRule::Exact("10.0.0.1".into()),
                NoProxyRule::Domain("example.org".into()),
                NoProxyRule::Wildcard,
            ]
        );
    }

    #[test]
    fn test_domain_rules_match_subdomains() {
        let rules = parse_no_proxy("hugeicons.com");
        assert!(should_bypass_proxy("hugeicons.com", &rules));
        assert!(should_bypass_proxy("API.Hugeicons.com", &rules));
        assert!(!should_bypass_proxy("nothugeicons.com", &rules));
        assert!(!should_bypass_proxy("", &rules));
    }

    #[test]
    fn test_loopback_always_bypasses() {
        assert!(should_bypass_proxy("127.0.0.1", &[]));
        assert!(should_bypass_proxy("[::1]", &[]));
        assert!(should_bypass_proxy("LOCALHOST", &[]));
        assert!(!should_bypass_proxy("10.0.0.1", &[]));
    }

    #[test]
    fn test_exact_and_wildcard_rules() {
        let rules = parse_no_proxy("10.0.0.1");
        assert!(should_bypass_proxy("10.0.0.1", &rules));
        assert!(!should_bypass_proxy("10.0.0.2", &rules));
        assert!(should_bypass_proxy("anything", &parse_no_proxy("*")));
    }

    #[test]
    fn test_select_proxy_falls_back_across_schemes() {
        assert_eq!(
            select_proxy("https", None, Some("http://proxy:8080")),
            Some("http://proxy:8080".to_string())
        );
        assert_eq!(
            select_proxy("http", Some("http://secure:8443"), Some("http://plain:8080")),
            Some("http://plain:8080".to_string())
        );
        assert_eq!(select_proxy("ftp", Some("http://p"), None), None);
    }

    #[test]
    fn test_client_builds() {
        assert!(client_with_timeout(Duration::from_secs(5)).is_ok());
    }
}
