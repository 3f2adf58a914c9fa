use crate::telemetry::LogLevel;
use url::Url;

const DEFAULT_NAV_OFFSET_PX: f64 = 100.0;
const DEFAULT_HEADER_THRESHOLD_PX: f64 = 50.0;
const DEFAULT_SMOOTHING: f32 = 0.1;
const DEFAULT_FORM_MESSAGE_MS: u32 = 5_000;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const NAV_OFFSET_PX_BOUNDS: (f64, f64) = (0.0, 400.0);
const HEADER_THRESHOLD_PX_BOUNDS: (f64, f64) = (0.0, 400.0);
const SMOOTHING_BOUNDS: (f32, f32) = (0.01, 1.0);
const FORM_MESSAGE_MS_BOUNDS: (u32, u32) = (500, 60_000);

/// Page behaviour knobs, fixed at build time.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    /// Distance above a section's top at which its nav link lights up.
    pub nav_offset_px: f64,
    pub header_threshold_px: f64,
    /// Per-frame approach factor for room objects.
    pub smoothing: f32,
    pub form_message_ms: u32,
    pub contact_endpoint: Option<String>,
    pub log_level: LogLevel,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            nav_offset_px: DEFAULT_NAV_OFFSET_PX,
            header_threshold_px: DEFAULT_HEADER_THRESHOLD_PX,
            smoothing: DEFAULT_SMOOTHING,
            form_message_ms: DEFAULT_FORM_MESSAGE_MS,
            contact_endpoint: None,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl SiteConfig {
    /// Reads overrides baked in by the bundler (`PORTFOLIO_*` at compile time).
    pub fn from_build_env() -> Self {
        Self::from_values(BuildValues {
            nav_offset_px: option_env!("PORTFOLIO_NAV_OFFSET_PX"),
            header_threshold_px: option_env!("PORTFOLIO_HEADER_THRESHOLD_PX"),
            smoothing: option_env!("PORTFOLIO_SMOOTHING"),
            form_message_ms: option_env!("PORTFOLIO_FORM_MESSAGE_MS"),
            contact_endpoint: option_env!("PORTFOLIO_CONTACT_ENDPOINT"),
            log_level: option_env!("PORTFOLIO_LOG_LEVEL"),
        })
    }

    fn from_values(values: BuildValues<'_>) -> Self {
        Self {
            nav_offset_px: parse_f64_with_bounds(
                values.nav_offset_px,
                DEFAULT_NAV_OFFSET_PX,
                NAV_OFFSET_PX_BOUNDS,
            ),
            header_threshold_px: parse_f64_with_bounds(
                values.header_threshold_px,
                DEFAULT_HEADER_THRESHOLD_PX,
                HEADER_THRESHOLD_PX_BOUNDS,
            ),
            smoothing: parse_f32_with_bounds(values.smoothing, DEFAULT_SMOOTHING, SMOOTHING_BOUNDS),
            form_message_ms: parse_u32_with_bounds(
                values.form_message_ms,
                DEFAULT_FORM_MESSAGE_MS,
                FORM_MESSAGE_MS_BOUNDS,
            ),
            contact_endpoint: parse_http_url(values.contact_endpoint),
            log_level: parse_log_level(values.log_level, DEFAULT_LOG_LEVEL),
        }
    }
}

#[derive(Default)]
struct BuildValues<'a> {
    nav_offset_px: Option<&'a str>,
    header_threshold_px: Option<&'a str>,
    smoothing: Option<&'a str>,
    form_message_ms: Option<&'a str>,
    contact_endpoint: Option<&'a str>,
    log_level: Option<&'a str>,
}

pub(crate) fn parse_f64_with_bounds(value: Option<&str>, default: f64, bounds: (f64, f64)) -> f64 {
    value
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

pub(crate) fn parse_f32_with_bounds(value: Option<&str>, default: f32, bounds: (f32, f32)) -> f32 {
    value
        .and_then(|value| value.trim().parse::<f32>().ok())
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

pub(crate) fn parse_u32_with_bounds(value: Option<&str>, default: u32, bounds: (u32, u32)) -> u32 {
    value
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

pub(crate) fn parse_non_empty_string(value: Option<&str>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_http_url(value: Option<&str>) -> Option<String> {
    let value = parse_non_empty_string(value)?;

    // same-origin path such as `/api/contact`
    if value.starts_with('/') {
        return (!value.starts_with("//") && !value.chars().any(char::is_whitespace)).then_some(value);
    }

    let parsed = Url::parse(&value).ok()?;
    if parsed.scheme() == "http" || parsed.scheme() == "https" {
        Some(parsed.to_string())
    } else {
        None
    }
}

fn parse_log_level(value: Option<&str>, default: LogLevel) -> LogLevel {
    parse_non_empty_string(value)
        .and_then(|value| LogLevel::from_str(&value.to_ascii_lowercase()))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_use_defaults() {
        let config = SiteConfig::from_values(BuildValues::default());
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn out_of_bounds_values_fall_back_to_defaults() {
        let config = SiteConfig::from_values(BuildValues {
            nav_offset_px: Some("9000"),
            smoothing: Some("0"),
            form_message_ms: Some("-3"),
            log_level: Some("trace"),
            ..BuildValues::default()
        });

        assert_eq!(config.nav_offset_px, DEFAULT_NAV_OFFSET_PX);
        assert_eq!(config.smoothing, DEFAULT_SMOOTHING);
        assert_eq!(config.form_message_ms, DEFAULT_FORM_MESSAGE_MS);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn valid_values_are_trimmed_and_applied() {
        let config = SiteConfig::from_values(BuildValues {
            header_threshold_px: Some(" 80 "),
            smoothing: Some("0.25"),
            contact_endpoint: Some("https://forms.example.com/contact"),
            log_level: Some("DEBUG"),
            ..BuildValues::default()
        });

        assert_eq!(config.header_threshold_px, 80.0);
        assert_eq!(config.smoothing, 0.25);
        assert_eq!(
            config.contact_endpoint.as_deref(),
            Some("https://forms.example.com/contact")
        );
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn non_http_contact_endpoint_is_ignored() {
        assert_eq!(parse_http_url(Some("mailto:someone@example.com")), None);
        assert_eq!(parse_http_url(Some("   ")), None);
        assert_eq!(parse_http_url(Some("/api/contact")).as_deref(), Some("/api/contact"));
    }

    #[test]
    fn malformed_contact_endpoint_is_ignored() {
        assert_eq!(parse_http_url(Some("https://")), None);
        assert_eq!(parse_http_url(Some("http://exa mple.com/contact")), None);
        assert_eq!(parse_http_url(Some("https//forms.example.com")), None);
        assert_eq!(parse_http_url(Some("//forms.example.com/contact")), None);
        assert_eq!(parse_http_url(Some("ftp://forms.example.com/contact")), None);
        assert_eq!(
            parse_http_url(Some("http://localhost:8080/api/contact")).as_deref(),
            Some("http://localhost:8080/api/contact")
        );
    }
}
