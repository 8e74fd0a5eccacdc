#[derive(Debug, thiserror::Error)]
pub enum ResourceGuardError {
    #[error("Resource validation error: {0}")]
    Validation(String),
}

/// Utilities for safe resource handling and ID validation.
#[derive(Debug)]
pub struct ResourceGuard;

impl ResourceGuard {
    /// Validates a `SurrealDB` ID string against a specific table.
    ///
    /// Prevents "ID Spoofing" where a caller provides an ID from a different table
    /// (e.g., providing a 'user:xyz' ID to a 'customer' endpoint).
    ///
    /// # Arguments
    /// * `id` - The ID to verify (e.g., "customer:123" or just "123")
    /// * `expected_table` - The table the ID must belong to (e.g., "customer")
    ///
    /// # Errors
    /// Returns an error if the ID table does not match the expected table.
    pub fn verify<I, T>(id: I, expected_table: T) -> Result<String, ResourceGuardError>
    where
        I: AsRef<str>,
        T: AsRef<str>,
    {
        let id_ref = id.as_ref();
        let table_ref = expected_table.as_ref();

        if let Some((table, _)) = id_ref.split_once(':') {
            if table != table_ref {
                return Err(ResourceGuardError::Validation(format!(
                    "ID table mismatch: expected '{table_ref}', got '{table}'"
                )));
            }
            // Return the full validated ID
            Ok(id_ref.to_owned())
        } else {
            // Automatically prefix if only the random part was provided
            Ok(format!("{table_ref}:{id_ref}"))
        }
    }

    /// Strips the table prefix from a record ID, if present.
    #[must_use]
    pub fn key(id: &str) -> &str {
        id.split_once(':').map_or(id, |(_, key)| key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_verification() {
        // Correct table
        assert_eq!(ResourceGuard::verify("customer:123", "customer").unwrap(), "customer:123");

        // Auto-prefix
        assert_eq!(ResourceGuard::verify("123", "customer").unwrap(), "customer:123");

        // Malicious mismatch
        let err = ResourceGuard::verify("user:cfg", "customer");
        assert!(err.is_err());
    }

    #[test]
    fn test_key_extraction() {
        assert_eq!(ResourceGuard::key("customer:123"), "123");
        assert_eq!(ResourceGuard::key("123"), "123");
    }
}
