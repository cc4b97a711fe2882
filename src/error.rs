use thiserror::Error;

/// Failure raised by an [`HttpTransport`](crate::transport::HttpTransport)
/// before a complete response was read.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The underlying HTTP client could not be constructed.
    #[error("unable to build http client: {0}")]
    Build(#[source] reqwest::Error),

    /// Connection, DNS, TLS, timeout or body read failure.
    #[error("http request failed: {0}")]
    Request(#[source] reqwest::Error),
}

/// Key material or signature decoding failure.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Secret or public key with the wrong byte length.
    #[error("key must be {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("invalid public key")]
    PublicKey,

    #[error("malformed signature")]
    Signature,
}

/// Canonical error type returned by [`LedgerClient`](crate::client::LedgerClient).
///
/// Application-level rejections are not errors: they come back as
/// [`Outcome::Rejected`](crate::outcome::Outcome::Rejected).
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A 200/400 body that is not the expected JSON.
    #[error("invalid json: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Key(#[from] KeyError),

    /// A path parameter that URL normalisation would drop (`.` or `..`).
    #[error("invalid path parameter {0:?}")]
    InvalidPathParameter(String),

    /// The endpoint base URL cannot carry path segments.
    #[error("invalid endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}
