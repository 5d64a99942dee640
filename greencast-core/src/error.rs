use thiserror::Error;

use crate::types::ParamKind;

/// Unified error type for the greencast workspace.
///
/// Covers rejected parameter edits, malformed series points, provider-tagged
/// fetch failures, timeouts, and an aggregate for multi-provider attempts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GreencastError {
    /// A user-entered query parameter was not an integer within its bounds.
    #[error("rejected {kind} value {raw:?}")]
    ParameterRejected {
        /// Parameter the edit targeted.
        kind: ParamKind,
        /// Input exactly as entered.
        raw: String,
    },

    /// A series point that cannot be placed on the date axis.
    #[error("malformed point dated {date:?}: {reason}")]
    MalformedPoint {
        /// Raw date string of the offending record.
        date: String,
        /// Why the point was dropped.
        reason: String,
    },

    /// The requested capability is not implemented by any eligible connector.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// Capability label (e.g. "forecast").
        capability: &'static str,
    },

    /// Issues with the returned data (shape, missing fields, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// An individual connector returned an error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),

    /// A resource could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "forecast for 4 weeks".
        what: String,
    },

    /// All selected providers failed; contains the individual failures.
    #[error("all providers failed: {0:?}")]
    AllProvidersFailed(Vec<GreencastError>),

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {capability} via {connector}")]
    ProviderTimeout {
        /// Connector name that timed out.
        connector: String,
        /// Capability label.
        capability: &'static str,
    },

    /// The overall request exceeded the configured deadline.
    #[error("request timed out: {capability}")]
    RequestTimeout {
        /// Capability label for which the request timed out.
        capability: &'static str,
    },

    /// All attempted providers timed out for the requested capability.
    #[error("all providers timed out: {capability}")]
    AllProvidersTimedOut {
        /// Capability label that timed out across all providers.
        capability: &'static str,
    },
}

impl GreencastError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub const fn unsupported(cap: &'static str) -> Self {
        Self::Unsupported { capability: cap }
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(connector: impl Into<String>, capability: &'static str) -> Self {
        Self::ProviderTimeout {
            connector: connector.into(),
            capability,
        }
    }

    /// Helper: build a `RequestTimeout` error.
    #[must_use]
    pub const fn request_timeout(capability: &'static str) -> Self {
        Self::RequestTimeout { capability }
    }

    /// Helper: build a `ParameterRejected` error.
    pub fn parameter_rejected(kind: ParamKind, raw: impl Into<String>) -> Self {
        Self::ParameterRejected {
            kind,
            raw: raw.into(),
        }
    }

    /// Helper: build a `MalformedPoint` error.
    pub fn malformed_point(date: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedPoint {
            date: date.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error came from fetching a series (as opposed to user
    /// input or a single dropped point).
    #[must_use]
    pub const fn is_fetch_failure(&self) -> bool {
        !matches!(
            self,
            Self::ParameterRejected { .. } | Self::MalformedPoint { .. } | Self::InvalidArg(_)
        )
    }
}
