//! Security response header assembly.

use rand::RngCore;

use crate::tenant::{HeaderCategory, SecurityPolicy};

/// Server-identifying headers stripped from every response.
pub const STRIPPED_HEADERS: &[&str] = &["server", "x-powered-by"];

/// Generates a per-request CSP nonce (128 bits, base64-url).
#[must_use]
pub fn nonce() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    base64_url::encode(&bytes)
}

/// Builds the Content-Security-Policy value from the external-domain
/// allow-list and the per-request nonce.
#[must_use]
pub fn build_csp(allowed_domains: &[String], nonce: &str) -> String {
    let extra = allowed_domains.join(" ");
    let extra = if extra.is_empty() {
        String::new()
    } else {
        format!(" {extra}")
    };

    format!(
        "default-src 'self'; \
         script-src 'self' 'nonce-{nonce}'{extra}; \
         style-src 'self' 'unsafe-inline'{extra}; \
         img-src 'self' data:{extra}; \
         font-src 'self' data:{extra}; \
         connect-src 'self'{extra}"
    )
}

/// Assembles the response headers enabled by a security policy.
///
/// CSP is omitted entirely in debug mode so local tooling keeps working;
/// the other categories are debug-independent.
#[must_use]
pub fn assemble_headers(
    policy: &SecurityPolicy,
    nonce: &str,
    debug: bool,
) -> Vec<(&'static str, String)> {
    let mut headers = Vec::new();

    for category in &policy.header_categories {
        match category {
            HeaderCategory::ContentSecurityPolicy => {
                if !debug {
                    headers.push((
                        "content-security-policy",
                        build_csp(&policy.allowed_domains, nonce),
                    ));
                }
            }
            HeaderCategory::ContentTypeOptions => {
                headers.push(("x-content-type-options", "nosniff".to_string()));
            }
            HeaderCategory::FrameOptions => {
                headers.push(("x-frame-options", "SAMEORIGIN".to_string()));
            }
            HeaderCategory::ReferrerPolicy => {
                headers.push((
                    "referrer-policy",
                    "strict-origin-when-cross-origin".to_string(),
                ));
            }
            HeaderCategory::StrictTransportSecurity => {
                headers.push((
                    "strict-transport-security",
                    "max-age=31536000; includeSubDomains".to_string(),
                ));
            }
        }
    }

    headers
}

#[cfg(test)]
mod tests {
    use vitrine_shared::types::WebsiteId;

    use super::*;

    #[test]
    fn test_nonce_is_unique_per_request() {
        assert_ne!(nonce(), nonce());
    }

    #[test]
    fn test_csp_carries_nonce_and_allowlist() {
        let csp = build_csp(
            &["https://cdn.example.org".to_string()],
            "abc123",
        );
        assert!(csp.contains("'nonce-abc123'"));
        assert!(csp.contains("https://cdn.example.org"));
        assert!(csp.starts_with("default-src 'self'"));
    }

    #[test]
    fn test_debug_mode_omits_csp_only() {
        let policy = SecurityPolicy::new(WebsiteId::new());

        let debug = assemble_headers(&policy, "n", true);
        assert!(debug.iter().all(|(k, _)| *k != "content-security-policy"));
        assert!(debug.iter().any(|(k, _)| *k == "x-content-type-options"));

        let prod = assemble_headers(&policy, "n", false);
        assert!(prod.iter().any(|(k, _)| *k == "content-security-policy"));
    }

    #[test]
    fn test_only_enabled_categories_emit() {
        let mut policy = SecurityPolicy::new(WebsiteId::new());
        policy.header_categories = vec![crate::tenant::HeaderCategory::FrameOptions];

        let headers = assemble_headers(&policy, "n", false);
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].0, "x-frame-options");
    }
}
