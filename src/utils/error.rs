use thiserror::Error;

#[derive(Error, Debug)]
pub enum StormError {
    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Resource could not be resolved: {url}")]
    InvalidResource { url: String },

    #[error("Unknown event type '{value}', expected one of: tornado, hail, wind")]
    InvalidEventType { value: String },

    #[error("Invalid date '{value}', expected 8 digits (YYYYMMDD)")]
    InvalidDate { value: String },

    #[error("Parse error in {context}: {message}")]
    Parse { context: String, message: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Input,
    Data,
    Config,
    System,
}

impl StormError {
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        StormError::Parse {
            context: context.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            StormError::Fetch { .. } | StormError::InvalidResource { .. } | StormError::Http(_) => {
                ErrorCategory::Network
            }
            StormError::InvalidEventType { .. } | StormError::InvalidDate { .. } => {
                ErrorCategory::Input
            }
            StormError::Parse { .. } | StormError::Csv(_) | StormError::Serialization(_) => {
                ErrorCategory::Data
            }
            StormError::ConfigError { .. } | StormError::InvalidConfigValue { .. } => {
                ErrorCategory::Config
            }
            StormError::Io(_) => ErrorCategory::System,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            StormError::Fetch { url, .. } => format!("Could not download {}", url),
            StormError::InvalidResource { url } => {
                format!("No archive file found at {}", url)
            }
            StormError::Http(_) => "The archive server could not be reached".to_string(),
            StormError::Parse { context, .. } => {
                format!("The archive returned data that could not be read ({})", context)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check the network connection and that the storm/year combination exists"
            }
            ErrorCategory::Input => "Use tornado, hail or wind and a date formatted as YYYYMMDD",
            ErrorCategory::Data => "The upstream file format may have changed; report the URL",
            ErrorCategory::Config => "Fix the configuration file and try again",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }

    /// Process exit code used by the command-line front end.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Config => 2,
            ErrorCategory::Network => 3,
            ErrorCategory::Data => 4,
            ErrorCategory::System => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, StormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let err = StormError::InvalidEventType {
            value: "blizzard".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert!(err.to_string().contains("blizzard"));

        let err = StormError::InvalidResource {
            url: "https://example.com/bal011851.dat.gz".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Network);
        assert!(err.user_friendly_message().contains("bal011851.dat.gz"));
    }

    #[test]
    fn test_exit_codes_differ_by_category() {
        let input = StormError::InvalidDate {
            value: "2017".to_string(),
        };
        let data = StormError::parse("line 3", "bad latitude");
        assert_eq!(input.exit_code(), 2);
        assert_eq!(data.exit_code(), 4);
    }
}
