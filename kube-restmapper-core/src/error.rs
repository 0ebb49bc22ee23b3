use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An error response from the API.
///
/// Discovery transports hand this back when the server answered with a `Status` object.
#[derive(Error, Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
#[error("{message}: {reason}")]
pub struct ErrorResponse {
    /// The status
    pub status: String,
    /// A message about the error
    #[serde(default)]
    pub message: String,
    /// The reason for the error
    #[serde(default)]
    pub reason: String,
    /// The error code
    pub code: u16,
}

impl ErrorResponse {
    /// Whether the server reported the requested path as missing
    ///
    /// This is how an unserved group version shows up during discovery.
    pub fn is_not_found(&self) -> bool {
        self.code == 404 || self.reason == "NotFound"
    }
}
