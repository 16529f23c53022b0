use crate::core::records::ReverseRecord;
use thiserror::Error;

/*-------------------------------------------------------------------------------------------------
  Errors and Results
-------------------------------------------------------------------------------------------------*/

/// Error type used throughout the crate.
///
/// The variants separate failures of the network or the remote service ([Error::Transport],
/// [Error::Status]) from responses the service accepted but that do not match what was asked
/// for ([Error::Consistency]); the first are usually worth a retry, the second need a human.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced an HTTP response (DNS, connect, TLS, timeout...).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    /// The service answered with a status the operation does not accept.
    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body does not have the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// A request payload could not be serialized.
    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// The service confirmed a reverse-DNS write with data that differs from the request.
    #[error(
        "reverse confirmation does not match: expected `{} {}`, got `{} {}`",
        .expected.ip_reverse, .expected.reverse, .actual.ip_reverse, .actual.reverse
    )]
    Consistency {
        expected: ReverseRecord,
        actual: ReverseRecord,
    },

    /// The input is not a valid CIDR block.
    #[error("invalid CIDR block `{input}`: {source}")]
    InvalidFormat {
        input: String,
        #[source]
        source: ipnetwork::IpNetworkError,
    },

    /// An enumerated parameter is outside its allowed set.
    #[error("invalid {param} `{value}`; expected one of: {allowed}")]
    Validation {
        param: &'static str,
        value: String,
        allowed: String,
    },
}

impl Error {
    /// Wrap any error raised below the HTTP layer.
    pub fn transport<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Error::Transport(error.into())
    }

    /// Build a [Error::Validation] from the list of accepted values.
    pub(crate) fn validation(param: &'static str, value: &str, allowed: &[&str]) -> Self {
        Error::Validation {
            param,
            value: value.to_string(),
            allowed: allowed.join("|"),
        }
    }

    /// True when this is a [Error::Status] carrying `code`.
    pub fn is_status(&self, code: u16) -> bool {
        matches!(self, Error::Status { status, .. } if *status == code)
    }
}

// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/*--------------------------------------------------------------------------------------
  Log Error Function
--------------------------------------------------------------------------------------*/

#[cfg(test)]
pub(crate) fn log_error(error: &Error) {
    log::error!("{}", error);
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_status() {
        let error = Error::Status {
            status: 404,
            body: r#"{"message":"The requested object (ip = 10.0.0.0/8) does not exist"}"#.into(),
        };
        assert!(error.is_status(404));
        assert!(!error.is_status(460));
        assert!(!Error::transport("connection refused").is_status(404));
    }

    #[test]
    fn test_validation_message() {
        let error = Error::validation("state", "pending", &["ok", "creationPending"]);
        assert_eq!(
            error.to_string(),
            "invalid state `pending`; expected one of: ok|creationPending"
        );
    }

    #[test]
    fn test_consistency_message_carries_both_records() {
        let error = Error::Consistency {
            expected: ReverseRecord::new("203.0.113.5".parse().unwrap(), "host.example.com."),
            actual: ReverseRecord::new("203.0.113.5".parse().unwrap(), "host.example.com"),
        };
        let message = error.to_string();
        assert!(message.contains("203.0.113.5 host.example.com."));
        assert!(message.contains("got `203.0.113.5 host.example.com`"));
    }
}
