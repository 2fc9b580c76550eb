//! BART API client error types.

use std::fmt;

/// Errors from the BART API client.
#[derive(Debug)]
pub enum RequestError {
    /// The API answered with a non-success status
    Transport { status: u16, status_text: String },

    /// The API answered successfully but flagged an error in the payload
    ApiReported { message: String },

    /// The request never got a response (connection refused, timeout, etc.)
    Network(reqwest::Error),

    /// The response body could not be decoded
    Json {
        message: String,
        body: Option<String>,
    },
}

impl RequestError {
    /// HTTP status carried by a transport failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Transport {
                status,
                status_text,
            } => write!(f, "HTTP error! Status: {status} - {status_text}"),
            RequestError::ApiReported { message } => f.write_str(message),
            RequestError::Network(e) => write!(f, "network error: {e}"),
            RequestError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RequestError::Network(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        RequestError::Network(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RequestError::Transport {
            status: 500,
            status_text: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "HTTP error! Status: 500 - Internal Server Error");
        assert_eq!(err.status(), Some(500));

        let err = RequestError::ApiReported {
            message: "closed".into(),
        };
        assert_eq!(err.to_string(), "closed");
        assert_eq!(err.status(), None);

        let err = RequestError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("<html>"));
    }
}
