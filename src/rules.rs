use once_cell::sync::Lazy;
use regex::Regex;

use crate::evaluator::Finding;

pub const SECURE_PREFIX: &str = "https://";
pub const INSECURE_PREFIX: &str = "http://";

pub const MAX_URL_LENGTH: usize = 75;

pub const SHORTENERS: [&str; 3] = ["bit.ly", "t.co", "tinyurl.com"];

// Prefix match only: octets are not range checked and trailing text is allowed.
static DOTTED_QUAD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}").unwrap());

/// One heuristic check: a predicate over the raw URL, the weight it adds to
/// the score when it fires, and the text reported to the user.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub weight: u32,
    pub triggered: fn(&str) -> bool,
    pub finding: Finding,
    /// Reported when the rule does not fire. Only the scheme rule has one.
    pub pass_finding: Option<Finding>,
}

impl Rule {
    /// Returns the weight and text to record for `url`, or `None` when the
    /// rule passes silently.
    pub fn apply(&self, url: &str) -> Option<(u32, Finding)> {
        if (self.triggered)(url) {
            Some((self.weight, self.finding))
        } else {
            self.pass_finding.map(|text| (0, text))
        }
    }
}

/// Evaluation order is display order.
pub const RULES: [Rule; 4] = [
    Rule {
        name: "insecure_scheme",
        weight: 30,
        triggered: is_insecure,
        finding: "Connection is not secure (no HTTPS).",
        pass_finding: Some("Uses a secure HTTPS connection."),
    },
    Rule {
        name: "long_url",
        weight: 15,
        triggered: is_long,
        finding: "URL is unusually long.",
        pass_finding: None,
    },
    Rule {
        name: "url_shortener",
        weight: 25,
        triggered: uses_shortener,
        finding: "Uses a URL shortener, which can hide the final destination.",
        pass_finding: None,
    },
    Rule {
        name: "ip_host",
        weight: 40,
        triggered: has_ip_host,
        finding: "URL is a direct IP address, which is highly suspicious.",
        pass_finding: None,
    },
];

pub fn is_insecure(url: &str) -> bool {
    !url.starts_with(SECURE_PREFIX)
}

pub fn is_long(url: &str) -> bool {
    url.chars().count() > MAX_URL_LENGTH
}

pub fn uses_shortener(url: &str) -> bool {
    SHORTENERS.iter().any(|s| url.contains(s))
}

pub fn has_ip_host(url: &str) -> bool {
    let rest = url
        .strip_prefix(SECURE_PREFIX)
        .or_else(|| url.strip_prefix(INSECURE_PREFIX))
        .unwrap_or(url);
    DOTTED_QUAD.is_match(rest)
}
