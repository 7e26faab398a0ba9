//! Configuration validation.
//!
//! Reports settings that load fine but would make the client misbehave.

use std::fmt;

use url::Url;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No service base URL is configured.
    MissingBaseUrl,
    /// A URL setting does not parse as an http(s) URL.
    InvalidUrl {
        /// Setting name, e.g. `service.base_url`.
        key: &'static str,
        /// The configured value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
    /// Labels would be wrapped after every word.
    ZeroWrapWidth,
    /// Every share link would be sent to the shortener.
    ZeroShareThreshold,
    /// Requests would time out immediately.
    ZeroTimeout,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBaseUrl => write!(f, "service.base_url is not set"),
            Self::InvalidUrl { key, value, reason } => {
                write!(f, "{key} '{value}' is not a valid URL: {reason}")
            }
            Self::ZeroWrapWidth => {
                write!(f, "graph.wrap_width is 0; every label word gets its own line")
            }
            Self::ZeroShareThreshold => {
                write!(f, "share.threshold is 0; every share link will be shortened")
            }
            Self::ZeroTimeout => write!(f, "service.timeout_secs is 0"),
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.service.base_url.trim().is_empty() {
        warnings.push(ConfigWarning::MissingBaseUrl);
    } else if let Some(warning) = check_url("service.base_url", &config.service.base_url) {
        warnings.push(warning);
    }
    if config.service.timeout_secs == 0 {
        warnings.push(ConfigWarning::ZeroTimeout);
    }
    if config.graph.wrap_width == 0 {
        warnings.push(ConfigWarning::ZeroWrapWidth);
    }
    if !config.share.page_url.is_empty()
        && let Some(warning) = check_url("share.page_url", &config.share.page_url)
    {
        warnings.push(warning);
    }
    if config.share.threshold == 0 {
        warnings.push(ConfigWarning::ZeroShareThreshold);
    }

    warnings
}

/// Checks that `value` is an absolute http or https URL.
fn check_url(key: &'static str, value: &str) -> Option<ConfigWarning> {
    let reason = match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => return None,
        Ok(url) => format!("unsupported scheme '{}'", url.scheme()),
        Err(err) => err.to_string(),
    };
    Some(ConfigWarning::InvalidUrl {
        key,
        value: value.to_string(),
        reason,
    })
}
