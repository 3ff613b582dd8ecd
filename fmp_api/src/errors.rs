//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request could not be built or sent, or the body could not be read.
    #[error("Request to financial data provider failed: {0}")]
    RequestFailed(String),
    /// The API returned a non-success status with a body snippet.
    #[error("Financial data provider returned status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response body was not valid JSON.
    #[error("Financial data provider returned invalid JSON: {0}")]
    InvalidJson(String),
    /// The response was JSON but not the list of records the endpoint promises.
    #[error("Unexpected response shape from financial data provider: expected a list, got {found}")]
    UnexpectedShape { found: String, body: String },
}
