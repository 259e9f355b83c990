//! 语音合成服务错误分类。
//!
//! Provider error classification.
//!
//! Both Google speech endpoints report failures either through a bare HTTP
//! status (Translate) or through a JSON body carrying a gRPC-style status
//! string (Cloud Text-to-Speech). This module folds both into one small set of
//! classes so per-entry failures read the same regardless of provider.
//!
//! | Category | Classes |
//! |----------|---------|
//! | client   | invalid_request, authentication, permission_denied, not_found, request_too_large |
//! | rate     | rate_limited, quota_exhausted |
//! | server   | server_error, overloaded, timeout |
//! | unknown  | unknown |
//!
//! ## Example
//!
//! ```rust
//! use kiosk_audio::error_code::ProviderErrorCode;
//!
//! let code = ProviderErrorCode::from_provider_status("RESOURCE_EXHAUSTED").unwrap();
//! assert_eq!(code.name(), "quota_exhausted");
//! assert_eq!(code.category(), "rate");
//! ```

use std::fmt;

/// Classified provider failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorCode {
    /// Malformed request, e.g. an unknown language code or voice
    InvalidRequest,
    /// Invalid, expired, or missing API key
    Authentication,
    /// Valid credentials but the API is not enabled for the project
    PermissionDenied,
    /// Endpoint or voice does not exist
    NotFound,
    /// Input text above the provider's size limit
    RequestTooLarge,
    /// Request rate limit exceeded
    RateLimited,
    /// Project quota or billing limit reached
    QuotaExhausted,
    /// Internal error on the provider side
    ServerError,
    /// Provider temporarily unavailable
    Overloaded,
    /// Request timed out before a response arrived
    Timeout,
    /// Could not be classified
    Unknown,
}

impl ProviderErrorCode {
    /// Returns the standard name (e.g., `"invalid_request"`).
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Authentication => "authentication",
            Self::PermissionDenied => "permission_denied",
            Self::NotFound => "not_found",
            Self::RequestTooLarge => "request_too_large",
            Self::RateLimited => "rate_limited",
            Self::QuotaExhausted => "quota_exhausted",
            Self::ServerError => "server_error",
            Self::Overloaded => "overloaded",
            Self::Timeout => "timeout",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the same request could succeed later. Informational only; the
    /// generator never retries.
    #[inline]
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServerError | Self::Overloaded | Self::Timeout
        )
    }

    /// Returns the category: `"client"`, `"rate"`, `"server"`, or `"unknown"`.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidRequest
            | Self::Authentication
            | Self::PermissionDenied
            | Self::NotFound
            | Self::RequestTooLarge => "client",
            Self::RateLimited | Self::QuotaExhausted => "rate",
            Self::ServerError | Self::Overloaded | Self::Timeout => "server",
            Self::Unknown => "unknown",
        }
    }

    /// Maps a Google API `error.status` string (e.g. `"INVALID_ARGUMENT"`).
    pub fn from_provider_status(status: &str) -> Option<Self> {
        let code = match status {
            "INVALID_ARGUMENT" | "FAILED_PRECONDITION" | "OUT_OF_RANGE" => Self::InvalidRequest,
            "UNAUTHENTICATED" => Self::Authentication,
            "PERMISSION_DENIED" => Self::PermissionDenied,
            "NOT_FOUND" => Self::NotFound,
            "RESOURCE_EXHAUSTED" => Self::QuotaExhausted,
            "INTERNAL" | "DATA_LOSS" => Self::ServerError,
            "UNAVAILABLE" => Self::Overloaded,
            "DEADLINE_EXCEEDED" => Self::Timeout,
            _ => return None,
        };
        Some(code)
    }

    /// Maps an HTTP status code to the most likely class.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => Self::InvalidRequest,
            401 => Self::Authentication,
            403 => Self::PermissionDenied,
            404 => Self::NotFound,
            408 => Self::Timeout,
            413 => Self::RequestTooLarge,
            429 => Self::RateLimited, // Translate answers 429 for both throttling and daily caps
            500 => Self::ServerError,
            502 | 503 => Self::Overloaded,
            504 => Self::Timeout,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
