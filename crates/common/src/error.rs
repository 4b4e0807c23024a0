//! Common error types and handling for the HR portal

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type shared by the portal crates
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Configuration("HRPORTAL_API_URL is empty".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: HRPORTAL_API_URL is empty"
        );
    }
}
