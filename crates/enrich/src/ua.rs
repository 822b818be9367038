//! User-agent parsing.
//!
//! Uses the woothee library for fast UA parsing to extract browser, OS
//! and device category for view breakdowns.

use woothee::parser::Parser;

/// Device/browser/os profile for one view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UaProfile {
    pub device_type: String,
    pub browser: String,
    pub os: String,
}

impl UaProfile {
    fn unknown() -> Self {
        Self {
            device_type: "unknown".to_string(),
            browser: "unknown".to_string(),
            os: "unknown".to_string(),
        }
    }
}

/// User-agent enricher wrapping a woothee parser.
pub struct UaEnricher {
    parser: Parser,
}

impl UaEnricher {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }

    /// Parses a user-agent string into a profile. Empty or
    /// unparsable strings produce "unknown" fields.
    pub fn profile(&self, user_agent: &str) -> UaProfile {
        if user_agent.is_empty() {
            return UaProfile::unknown();
        }

        let mut profile = UaProfile::unknown();

        if let Some(result) = self.parser.parse(user_agent) {
            if !result.name.is_empty() && result.name != "UNKNOWN" {
                profile.browser = result.name.to_string();
            }
            if !result.os.is_empty() && result.os != "UNKNOWN" {
                profile.os = result.os.to_string();
            }

            // woothee categories: pc, smartphone, mobilephone, crawler,
            // appliance, misc
            profile.device_type = match result.category {
                "pc" => "desktop",
                "smartphone" | "mobilephone" => "mobile",
                "crawler" => "bot",
                "appliance" => "other",
                _ => "unknown",
            }
            .to_string();
        }

        profile
    }
}

impl Default for UaEnricher {
    fn default() -> Self {
        Self::new()
    }
}
