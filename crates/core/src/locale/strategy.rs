//! Named locale negotiation strategies.

use vitrine_shared::Locale;

use crate::tenant::Configuration;

use super::accept::parse_accept_language;

/// Locale-relevant facts about the inbound request.
#[derive(Debug, Clone, Default)]
pub struct LocaleRequest<'a> {
    /// Explicit locale from the route path, already parsed.
    pub route_locale: Option<Locale>,
    /// Locale previously stored in the visitor session.
    pub session_locale: Option<Locale>,
    /// Raw `Accept-Language` header.
    pub accept_language: Option<&'a str>,
    /// Operator profile locale (admin office only).
    pub profile_locale: Option<Locale>,
    /// Sub-resource request (assets, fragments): front office skips
    /// browser re-negotiation for these.
    pub subresource: bool,
}

/// The outcome of negotiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Negotiation {
    /// The active locale for this request.
    pub locale: Locale,
    /// When true the caller must write the locale back into the session.
    /// False only when the session itself supplied the value.
    pub persist_to_session: bool,
}

/// A named negotiation chain.
pub trait LocaleStrategy {
    /// Resolves the active locale for a request against a tenant
    /// configuration. Always yields a locale the configuration supports.
    fn negotiate(&self, request: &LocaleRequest<'_>, configuration: &Configuration) -> Negotiation;
}

/// Front-office chain: route, then fresh browser negotiation on every
/// non-sub-resource request, then session, then tenant default.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrontStrategy;

impl LocaleStrategy for FrontStrategy {
    fn negotiate(&self, request: &LocaleRequest<'_>, configuration: &Configuration) -> Negotiation {
        if let Some(locale) = supported(request.route_locale.as_ref(), configuration) {
            return Negotiation {
                locale,
                persist_to_session: true,
            };
        }

        if !request.subresource {
            if let Some(header) = request.accept_language {
                if let Some(locale) = match_header(header, configuration) {
                    return Negotiation {
                        locale,
                        persist_to_session: true,
                    };
                }
            }
        }

        if let Some(locale) = supported(request.session_locale.as_ref(), configuration) {
            return Negotiation {
                locale,
                persist_to_session: false,
            };
        }

        Negotiation {
            locale: configuration.default_locale.clone(),
            persist_to_session: true,
        }
    }
}

/// Admin-office chain: route, then session, then operator profile, then
/// tenant default. Browser headers are never consulted.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdminStrategy;

impl LocaleStrategy for AdminStrategy {
    fn negotiate(&self, request: &LocaleRequest<'_>, configuration: &Configuration) -> Negotiation {
        if let Some(locale) = supported(request.route_locale.as_ref(), configuration) {
            return Negotiation {
                locale,
                persist_to_session: true,
            };
        }

        if let Some(locale) = supported(request.session_locale.as_ref(), configuration) {
            return Negotiation {
                locale,
                persist_to_session: false,
            };
        }

        if let Some(locale) = supported(request.profile_locale.as_ref(), configuration) {
            return Negotiation {
                locale,
                persist_to_session: true,
            };
        }

        Negotiation {
            locale: configuration.default_locale.clone(),
            persist_to_session: true,
        }
    }
}

/// Returns the candidate when the configuration supports it.
fn supported(candidate: Option<&Locale>, configuration: &Configuration) -> Option<Locale> {
    candidate.filter(|l| configuration.supports(l)).cloned()
}

/// Matches browser preferences against the configured locale set: exact
/// tag first, then the first configured locale sharing the language.
fn match_header(header: &str, configuration: &Configuration) -> Option<Locale> {
    for range in parse_accept_language(header) {
        if configuration.supports(&range.locale) {
            return Some(range.locale);
        }
        if let Some(by_language) = configuration
            .locales
            .iter()
            .find(|l| l.same_language(&range.locale))
        {
            return Some(by_language.clone());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use vitrine_shared::types::WebsiteId;

    use super::*;

    fn locale(tag: &str) -> Locale {
        Locale::parse(tag).unwrap()
    }

    fn config() -> Configuration {
        let mut config = Configuration::new(WebsiteId::new(), locale("fr"));
        config.locales = vec![locale("fr"), locale("en")];
        config.online_locales = config.locales.clone();
        config
    }

    #[test]
    fn test_front_route_locale_wins() {
        let negotiation = FrontStrategy.negotiate(
            &LocaleRequest {
                route_locale: Some(locale("en")),
                session_locale: Some(locale("fr")),
                accept_language: Some("fr"),
                ..LocaleRequest::default()
            },
            &config(),
        );
        assert_eq!(negotiation.locale, locale("en"));
        assert!(negotiation.persist_to_session);
    }

    #[test]
    fn test_front_header_beats_default_and_session() {
        // Supported Accept-Language entry must win over the tenant default.
        let negotiation = FrontStrategy.negotiate(
            &LocaleRequest {
                session_locale: Some(locale("fr")),
                accept_language: Some("en;q=0.9, de;q=1.0"),
                ..LocaleRequest::default()
            },
            &config(),
        );
        assert_eq!(negotiation.locale, locale("en"));
        assert!(negotiation.persist_to_session);
    }

    #[test]
    fn test_front_header_language_fallback() {
        // en-GB is not configured but shares a language with en.
        let negotiation = FrontStrategy.negotiate(
            &LocaleRequest {
                accept_language: Some("en-GB"),
                ..LocaleRequest::default()
            },
            &config(),
        );
        assert_eq!(negotiation.locale, locale("en"));
    }

    #[test]
    fn test_front_subresource_trusts_session() {
        let negotiation = FrontStrategy.negotiate(
            &LocaleRequest {
                session_locale: Some(locale("en")),
                accept_language: Some("fr"),
                subresource: true,
                ..LocaleRequest::default()
            },
            &config(),
        );
        assert_eq!(negotiation.locale, locale("en"));
        assert!(!negotiation.persist_to_session);
    }

    #[test]
    fn test_front_falls_back_to_default() {
        let negotiation = FrontStrategy.negotiate(
            &LocaleRequest {
                accept_language: Some("ja, zh"),
                ..LocaleRequest::default()
            },
            &config(),
        );
        assert_eq!(negotiation.locale, locale("fr"));
        assert!(negotiation.persist_to_session);
    }

    #[test]
    fn test_front_unsupported_route_locale_renegotiates() {
        let negotiation = FrontStrategy.negotiate(
            &LocaleRequest {
                route_locale: Some(locale("de")),
                accept_language: Some("en"),
                ..LocaleRequest::default()
            },
            &config(),
        );
        assert_eq!(negotiation.locale, locale("en"));
    }

    #[test]
    fn test_admin_ignores_browser_headers() {
        let negotiation = AdminStrategy.negotiate(
            &LocaleRequest {
                accept_language: Some("en"),
                ..LocaleRequest::default()
            },
            &config(),
        );
        assert_eq!(negotiation.locale, locale("fr"));
    }

    #[test]
    fn test_admin_session_then_profile() {
        let negotiation = AdminStrategy.negotiate(
            &LocaleRequest {
                session_locale: Some(locale("en")),
                profile_locale: Some(locale("fr")),
                ..LocaleRequest::default()
            },
            &config(),
        );
        assert_eq!(negotiation.locale, locale("en"));
        assert!(!negotiation.persist_to_session);

        let negotiation = AdminStrategy.negotiate(
            &LocaleRequest {
                profile_locale: Some(locale("en")),
                ..LocaleRequest::default()
            },
            &config(),
        );
        assert_eq!(negotiation.locale, locale("en"));
        assert!(negotiation.persist_to_session);
    }
}
