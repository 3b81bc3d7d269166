//! Result type alias for privsense

use super::errors::PrivsenseError;

/// Result type alias for privsense operations
///
/// # Examples
///
/// ```
/// use privsense::domain::result::Result;
/// use privsense::domain::errors::PrivsenseError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(PrivsenseError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, PrivsenseError>;
