//! Shared reqwest setup for the speech providers.

use crate::{Error, ErrorContext, Result};
use reqwest::Proxy;
use std::time::Duration;

/// Browser-like agent; the Translate endpoint refuses some non-browser agents.
pub(crate) const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

pub(crate) fn build_client(timeout: Duration, proxy: Option<&str>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT);

    if let Some(proxy_url) = proxy {
        let proxy = Proxy::all(proxy_url).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid proxy URL '{}': {}", proxy_url, e),
                ErrorContext::new().with_field_path("proxy"),
            )
        })?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))
}

pub(crate) fn validate_base_url(base_url: &str) -> Result<String> {
    url::Url::parse(base_url).map_err(|e| {
        Error::configuration_with_context(
            format!("Invalid base URL '{}': {}", base_url, e),
            ErrorContext::new().with_field_path("base_url"),
        )
    })?;
    Ok(base_url.trim_end_matches('/').to_string())
}

/// Transport failures. Timeouts are tagged so they classify as `timeout`.
pub(crate) fn network_error(what: &str, source: &str, e: reqwest::Error) -> Error {
    let mut context = ErrorContext::new().with_source(source);
    if e.is_timeout() {
        context = context.with_details("timeout");
    }
    Error::network_with_context(format!("{}: {}", what, e.without_url()), context)
}
