//! Error types returned by the proxy queries.

use thiserror::Error;

/// Convenient type alias of Result type for sysproxy.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned when the platform proxy configuration cannot be read.
///
/// A missing or malformed entry for a single protocol is never an error; it
/// shows up as an absent record instead.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    /// The OS call handing out the proxy configuration failed or returned no handle.
    #[error("failed to acquire system proxy settings: {0}")]
    Acquisition(String),
}
