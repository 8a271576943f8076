use ranklog_core_types::RequestId;
use thiserror::Error;

/// Result type alias using RanklogError
pub type Result<T> = std::result::Result<T, RanklogError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers (the CLI, an embedding
/// UI) can match on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    InvalidInput,
    /// A collection document is not a JSON array of record objects
    InvalidCollection,
    /// A field needed to render or rank a record is absent
    MissingField,
    /// A rank has no tier in the list being partitioned
    NotFound,
    /// The original snapshot is empty, so there is nothing to diff against
    EmptyOriginal,

    // Configuration
    /// Tier table is empty, has a non-positive percent, or sums above 100
    InvalidTierTable,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    /// Failure outside the domain taxonomy, e.g. writing CLI output
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidCollection => "ERR_INVALID_COLLECTION",
            ExErrorKind::MissingField => "ERR_MISSING_FIELD",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::EmptyOriginal => "ERR_EMPTY_ORIGINAL",
            ExErrorKind::InvalidTierTable => "ERR_INVALID_TIER_TABLE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling plus free-form context
/// for humans.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    rank: Option<i64>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            rank: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity (achievement) ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add rank context
    pub fn with_rank(mut self, rank: i64) -> Self {
        self.rank = Some(rank);
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the rank context, if any
    pub fn rank(&self) -> Option<i64> {
        self.rank
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (achievement_id: {})", entity_id)?;
        }
        if let Some(rank) = self.rank {
            write!(f, " (rank: {})", rank)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for ranklog operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RanklogError {
    /// A record lacks a field the operation needs
    #[error("Achievement {achievement} is missing field `{field}`")]
    MissingField { achievement: String, field: String },

    /// Original snapshot has no records
    #[error("Original list is empty: nothing to diff against")]
    EmptyOriginal,

    /// Collection document could not be interpreted as a list of records
    #[error("Invalid collection: {reason}")]
    InvalidCollection { reason: String },

    /// Tier table failed validation
    #[error("Invalid tier table: {reason}")]
    InvalidTierTable { reason: String },

    /// Changelog mode string is not one of '', 'timeline', 'dev'
    #[error("Unknown changelog mode: {mode}")]
    UnknownMode { mode: String },

    /// Filesystem error while reading or writing a document
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// Serialization error (JSON/TOML encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Conversion from RanklogError to ExError
impl From<RanklogError> for ExError {
    fn from(err: RanklogError) -> Self {
        match err {
            RanklogError::MissingField { achievement, field } => {
                ExError::new(ExErrorKind::MissingField)
                    .with_entity_id(achievement)
                    .with_message(format!("Missing field `{}`", field))
            }

            RanklogError::EmptyOriginal => ExError::new(ExErrorKind::EmptyOriginal)
                .with_message("Original list is empty: nothing to diff against"),

            RanklogError::InvalidCollection { reason } => {
                ExError::new(ExErrorKind::InvalidCollection)
                    .with_message(format!("Invalid collection: {}", reason))
            }

            RanklogError::InvalidTierTable { reason } => {
                ExError::new(ExErrorKind::InvalidTierTable)
                    .with_message(format!("Invalid tier table: {}", reason))
            }

            RanklogError::UnknownMode { mode } => ExError::new(ExErrorKind::InvalidInput)
                .with_message(format!("Unknown changelog mode: {}", mode)),

            RanklogError::Io { path, message } => ExError::new(ExErrorKind::Io)
                .with_message(format!("{}: {}", path, message)),

            RanklogError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for RanklogError {
    fn from(err: serde_json::Error) -> Self {
        RanklogError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for RanklogError {
    fn from(err: toml::de::Error) -> Self {
        RanklogError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_op_and_entity() {
        let err = ExError::new(ExErrorKind::MissingField)
            .with_op("format_change")
            .with_entity_id("a1")
            .with_message("no rank");
        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_MISSING_FIELD]"));
        assert!(rendered.contains("format_change"));
        assert!(rendered.contains("a1"));
    }

    #[test]
    fn test_request_id_is_rendered() {
        let err = ExError::new(ExErrorKind::Io)
            .with_message("disk")
            .with_request_id(RequestId::from_string("req-9".to_string()));
        assert_eq!(err.request_id().map(RequestId::as_str), Some("req-9"));
        assert_eq!(err.to_string(), "[ERR_IO]: disk (request_id: req-9)");
    }

    #[test]
    fn test_json_error_converts_to_serialization() {
        let err: RanklogError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, RanklogError::Serialization { .. }));
    }
}
