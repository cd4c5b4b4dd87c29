//! Result type alias for the Qualtrics client

use super::errors::QualtricsError;

/// Result type alias for client operations
///
/// # Examples
///
/// ```
/// use qualtrics_client::domain::result::Result;
/// use qualtrics_client::domain::errors::QualtricsError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(QualtricsError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, QualtricsError>;
