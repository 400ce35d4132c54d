//! Result type alias for cfbackup

use super::errors::BackupError;

/// Result type alias for backup operations
///
/// # Examples
///
/// ```
/// use cfbackup::domain::result::Result;
/// use cfbackup::domain::errors::BackupError;
///
/// fn failing_function() -> Result<()> {
///     Err(BackupError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, BackupError>;
