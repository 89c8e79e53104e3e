use thiserror::Error;

/// Main error type for the TuneKit system
#[derive(Error, Debug)]
pub enum TkError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Space error: {0}")]
    Space(#[from] SpaceError),

    #[error("Log error: {0}")]
    Log(#[from] LogError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised while reading the tuning arguments of a trial
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required argument: gpus")]
    MissingGpus,

    #[error("Invalid GPU count {value:?}: expected a positive integer")]
    InvalidGpus { value: String },
}

/// Errors raised by the search space while symbols are created
#[derive(Error, Debug, PartialEq)]
pub enum SpaceError {
    #[error("Symbol already defined: {name}")]
    DuplicateSymbol { name: String },

    #[error("Symbol {name} has no candidates")]
    EmptyCandidates { name: String },
}

/// Errors raised while acquiring a trial log
#[derive(Error, Debug)]
pub enum LogError {
    #[error("Cannot read log {source_name}: {error}")]
    Unreadable {
        source_name: String,
        #[source]
        error: std::io::Error,
    },
}

/// Result type alias for TuneKit operations
pub type TkResult<T> = Result<T, TkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ConfigError::InvalidGpus {
            value: "eight".to_string(),
        };
        assert!(error.to_string().contains("eight"));
        assert!(error.to_string().contains("positive integer"));

        let error = SpaceError::DuplicateSymbol {
            name: "batch_size".to_string(),
        };
        assert_eq!(error.to_string(), "Symbol already defined: batch_size");
    }

    #[test]
    fn test_error_conversion() {
        let tk_error: TkError = ConfigError::MissingGpus.into();
        match tk_error {
            TkError::Config(ConfigError::MissingGpus) => (),
            _ => panic!("Expected Config error"),
        }

        let tk_error: TkError = SpaceError::EmptyCandidates {
            name: "ckpt_ratio".to_string(),
        }
        .into();
        assert!(matches!(tk_error, TkError::Space(_)));

        // I/O failures only reach callers wrapped in a LogError.
        let tk_error: TkError = LogError::Unreadable {
            source_name: "log.txt".to_string(),
            error: std::io::Error::from(std::io::ErrorKind::NotFound),
        }
        .into();
        assert!(matches!(tk_error, TkError::Log(_)));
        assert!(tk_error.to_string().contains("log.txt"));
    }
}
