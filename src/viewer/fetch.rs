// Content fetch module
// One-shot HTTP GET against the file server

use std::fmt;

/// Failure of a single fetch attempt
///
/// Either the server answered with a non-success status, or the request
/// itself failed in transport or while reading the body.
#[derive(Debug)]
pub enum FetchError {
    /// Non-success HTTP status from the server
    Status { code: u16, reason: String },
    /// Network or body-read failure
    Request(reqwest::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status { code, reason } => write!(f, "{code} {reason}"),
            Self::Request(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Status { .. } => None,
            Self::Request(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err)
    }
}

/// Fetch the served content once.
///
/// No timeout, no retry: a failure is terminal for this attempt and is
/// reported to the caller as-is.
pub async fn fetch_content(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            code: status.as_u16(),
            reason: status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_string(),
        });
    }

    Ok(response.text().await?)
}
