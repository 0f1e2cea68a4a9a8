use super::types::WardenError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub retryable: bool,
}

impl WardenError {
    /// Classify this error to determine its type and whether it can be retried.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            // Retryable errors
            WardenError::RateLimit(_) => ErrorClassification {
                error_type: "RateLimitError",
                retryable: true,
            },
            WardenError::Network(_) => ErrorClassification {
                error_type: "NetworkError",
                retryable: true,
            },
            WardenError::EngineApi(_) => ErrorClassification {
                error_type: "EngineApiError",
                retryable: true,
            },
            WardenError::Queue(_) => ErrorClassification {
                error_type: "QueueError",
                retryable: true,
            },

            // Non-retryable errors
            WardenError::Validation(_) => ErrorClassification {
                error_type: "ValidationError",
                retryable: false,
            },
            WardenError::NotFound(_) => ErrorClassification {
                error_type: "NotFoundError",
                retryable: false,
            },
            WardenError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                retryable: false,
            },
            WardenError::Authentication(_) => ErrorClassification {
                error_type: "AuthenticationError",
                retryable: false,
            },
            WardenError::Parse(_) => ErrorClassification {
                error_type: "ParseError",
                retryable: false,
            },
            WardenError::Inspection(_) => ErrorClassification {
                error_type: "InspectionError",
                retryable: false,
            },
            WardenError::Dispatch(_) => ErrorClassification {
                error_type: "DispatchError",
                retryable: false,
            },
            WardenError::Database(_) => ErrorClassification {
                error_type: "DatabaseError",
                retryable: false,
            },
            WardenError::Io(_) => ErrorClassification {
                error_type: "IoError",
                retryable: false,
            },
            WardenError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                retryable: false,
            },
            WardenError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                retryable: false,
            },
            WardenError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                retryable: false,
            },
        }
    }
}
