//! Crate-level error types.

use crate::wizard::Step;

/// Message stored on a slice when a failure carries nothing more specific.
pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Message stored on a slice when a request was abandoned before it resolved.
pub const CANCELLED_MESSAGE: &str = "Request was cancelled.";

/// Failure of a single remote API call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GatewayError {
    /// The request never produced a response (DNS, connection, timeout).
    #[error("network request failed: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    ///
    /// `message` holds whatever human-readable text could be pulled out of
    /// the response body.
    #[error("server responded with status {status}")]
    Server { status: u16, message: Option<String> },

    /// The response body did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// Anything else.
    #[error("{0}")]
    Unknown(String),
}

impl GatewayError {
    /// Normalize the failure into the single string kept on a slice.
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Network(reason) => format!("Network error: {reason}"),
            GatewayError::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            GatewayError::Server { status, .. } => {
                format!("Request failed with status {status}")
            }
            GatewayError::Decode(_) | GatewayError::Unknown(_) => {
                DEFAULT_ERROR_MESSAGE.to_string()
            }
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            GatewayError::Server {
                status: status.as_u16(),
                message: None,
            }
        } else {
            GatewayError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Decode(err.to_string())
    }
}

/// Error raised while reading process configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    /// The API base URL could not be parsed or cannot carry paths.
    #[error("invalid API base URL {value:?}: {reason}")]
    InvalidUrl { value: String, reason: String },
}

/// Error raised by the store-registration wizard.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WizardError {
    /// Leaving the category step without ever providing a category selection.
    #[error("categories must be selected before continuing")]
    MissingCategories,

    /// `retreat` on the first step.
    #[error("already at the first step")]
    AtFirstStep,

    /// `advance` on the details step; the last step only submits.
    #[error("already at the final step; submit instead")]
    AtFinalStep,

    /// `submit` before reaching the details step.
    #[error("cannot submit from step {}", .0.number())]
    NotAtFinalStep(Step),

    /// The store-creation call failed.
    #[error("store submission failed: {0}")]
    Submission(#[from] GatewayError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_used_verbatim() {
        let err = GatewayError::Server {
            status: 400,
            message: Some("Name already taken".into()),
        };
        assert_eq!(err.user_message(), "Name already taken");
    }

    #[test]
    fn blank_server_message_falls_back_to_status() {
        let err = GatewayError::Server {
            status: 503,
            message: Some("   ".into()),
        };
        assert_eq!(err.user_message(), "Request failed with status 503");
    }

    #[test]
    fn unknown_and_decode_use_default_message() {
        assert_eq!(
            GatewayError::Unknown(String::new()).user_message(),
            DEFAULT_ERROR_MESSAGE
        );
        assert_eq!(
            GatewayError::Decode("expected array".into()).user_message(),
            DEFAULT_ERROR_MESSAGE
        );
    }

    #[test]
    fn network_message_names_reason() {
        let err = GatewayError::Network("connection refused".into());
        assert_eq!(err.user_message(), "Network error: connection refused");
        assert_eq!(err.to_string(), "network request failed: connection refused");
    }

    #[test]
    fn serde_errors_convert_to_decode() {
        let err = serde_json::from_str::<Vec<u32>>("{}").unwrap_err();
        assert!(matches!(GatewayError::from(err), GatewayError::Decode(_)));
    }

    #[test]
    fn wizard_error_display() {
        assert_eq!(
            WizardError::NotAtFinalStep(Step::Subcategories).to_string(),
            "cannot submit from step 2"
        );
        let err = WizardError::from(GatewayError::Server {
            status: 500,
            message: None,
        });
        assert_eq!(
            err.to_string(),
            "store submission failed: server responded with status 500"
        );
    }

    #[test]
    fn config_error_display() {
        assert_eq!(
            ConfigError::Missing("SOUK_API_BASE_URL").to_string(),
            "environment variable SOUK_API_BASE_URL is not set"
        );
    }

    // Errors travel through async gateway futures.
    const _: () = {
        #[allow(dead_code)]
        fn assert_send_sync<T: Send + Sync>() {}

        #[allow(dead_code)]
        fn check() {
            assert_send_sync::<GatewayError>();
            assert_send_sync::<WizardError>();
        }
    };
}
