//! Locale to IANA timezone heuristic.
//!
//! The region subtag decides first, then the bare language, then UTC. The
//! resolved timezone travels with the per-request site context; nothing is
//! ever applied process-wide.

use chrono_tz::Tz;
use vitrine_shared::Locale;

/// Resolves the timezone for a locale.
#[must_use]
pub fn timezone_for(locale: &Locale) -> Tz {
    if let Some(tz) = locale.region().and_then(by_region) {
        return tz;
    }
    by_language(locale.language()).unwrap_or(chrono_tz::UTC)
}

fn by_region(region: &str) -> Option<Tz> {
    Some(match region {
        "FR" => chrono_tz::Europe::Paris,
        "BE" => chrono_tz::Europe::Brussels,
        "CH" => chrono_tz::Europe::Zurich,
        "LU" => chrono_tz::Europe::Luxembourg,
        "GB" => chrono_tz::Europe::London,
        "IE" => chrono_tz::Europe::Dublin,
        "DE" => chrono_tz::Europe::Berlin,
        "AT" => chrono_tz::Europe::Vienna,
        "ES" => chrono_tz::Europe::Madrid,
        "IT" => chrono_tz::Europe::Rome,
        "PT" => chrono_tz::Europe::Lisbon,
        "NL" => chrono_tz::Europe::Amsterdam,
        "PL" => chrono_tz::Europe::Warsaw,
        "US" => chrono_tz::America::New_York,
        "CA" => chrono_tz::America::Toronto,
        "BR" => chrono_tz::America::Sao_Paulo,
        "MX" => chrono_tz::America::Mexico_City,
        "MA" => chrono_tz::Africa::Casablanca,
        "TN" => chrono_tz::Africa::Tunis,
        "SN" => chrono_tz::Africa::Dakar,
        "JP" => chrono_tz::Asia::Tokyo,
        "CN" => chrono_tz::Asia::Shanghai,
        "AU" => chrono_tz::Australia::Sydney,
        "NZ" => chrono_tz::Pacific::Auckland,
        _ => return None,
    })
}

fn by_language(language: &str) -> Option<Tz> {
    Some(match language {
        "fr" => chrono_tz::Europe::Paris,
        "en" => chrono_tz::Europe::London,
        "de" => chrono_tz::Europe::Berlin,
        "es" => chrono_tz::Europe::Madrid,
        "it" => chrono_tz::Europe::Rome,
        "pt" => chrono_tz::Europe::Lisbon,
        "nl" => chrono_tz::Europe::Amsterdam,
        "pl" => chrono_tz::Europe::Warsaw,
        "ar" => chrono_tz::Africa::Casablanca,
        "ja" => chrono_tz::Asia::Tokyo,
        "zh" => chrono_tz::Asia::Shanghai,
        _ => return None,
    })
}
