//! Referrer classification.

use url::Url;

/// Traffic sources recognized by substring match before any URL parsing.
const KNOWN_SOURCES: &[(&str, &str)] = &[
    ("google", "Google"),
    ("facebook", "Facebook"),
    ("linkedin", "LinkedIn"),
    ("twitter", "Twitter"),
];

/// Classifies a raw referrer string into a traffic-source bucket.
///
/// Empty referrers are direct traffic. A small fixed set of sources is
/// matched by substring; anything else is bucketed by hostname.
/// Unparsable non-empty referrers fall into "Other" rather than failing
/// the report.
pub fn classify_referrer(referrer: &str) -> String {
    let trimmed = referrer.trim();
    if trimmed.is_empty() {
        return "Direct".to_string();
    }

    let lower = trimmed.to_lowercase();
    for (needle, label) in KNOWN_SOURCES {
        if lower.contains(needle) {
            return (*label).to_string();
        }
    }

    match Url::parse(trimmed) {
        Ok(url) => match url.host_str() {
            Some(host) => host.trim_start_matches("www.").to_string(),
            None => "Other".to_string(),
        },
        Err(_) => "Other".to_string(),
    }
}
