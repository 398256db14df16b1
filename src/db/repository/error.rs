//! Error types for repository operations.

use std::fmt;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Classification of a repository failure.
///
/// The kind decides how callers react: `NotFound` and `Conflict` map to
/// client-visible statuses, `Connection` and `Timeout` are worth retrying,
/// everything else surfaces as an internal failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connection pool or database connection failure
    Connection,
    /// SQL query execution failure
    Query,
    /// Requested entity does not exist
    NotFound,
    /// A uniqueness rule was violated (e.g. duplicate program type name)
    Conflict,
    /// Data failed validation before or after a database operation
    Validation,
    /// Configuration or initialization problem
    Configuration,
    /// Unexpected internal failure
    Internal,
    /// Commit or rollback failure
    Transaction,
    /// Timed out waiting for a connection or query
    Timeout,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::Connection => "connection error",
            ErrorKind::Query => "query error",
            ErrorKind::NotFound => "not found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Validation => "validation error",
            ErrorKind::Configuration => "configuration error",
            ErrorKind::Internal => "internal error",
            ErrorKind::Transaction => "transaction error",
            ErrorKind::Timeout => "timeout",
        })
    }
}

/// Structured context attached to a repository error: the failing operation,
/// the entity involved, and whether a retry could help.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    pub operation: Option<String>,
    pub entity: Option<String>,
    pub entity_id: Option<String>,
    pub details: Option<String>,
    pub retryable: bool,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        ErrorContext {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn with_entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }

    fn is_empty(&self) -> bool {
        self.operation.is_none()
            && self.entity.is_none()
            && self.entity_id.is_none()
            && self.details.is_none()
            && !self.retryable
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        write!(f, " (")?;
        let mut sep = "";
        for (key, value) in [
            ("operation", &self.operation),
            ("entity", &self.entity),
            ("id", &self.entity_id),
            ("details", &self.details),
        ] {
            if let Some(value) = value {
                write!(f, "{}{}={}", sep, key, value)?;
                sep = ", ";
            }
        }
        if self.retryable {
            write!(f, "{}retryable", sep)?;
        }
        write!(f, ")")
    }
}

/// Error produced by repository operations.
///
/// Carries a [`ErrorKind`] classification, a human-readable message and an
/// optional [`ErrorContext`] for logs.
#[derive(Debug, thiserror::Error)]
#[error("{kind}: {message}{context}")]
pub struct RepositoryError {
    kind: ErrorKind,
    message: String,
    context: ErrorContext,
}

impl RepositoryError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        RepositoryError {
            kind,
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Attach structured context to this error.
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = context;
        self
    }

    /// Add or update the operation in the error context.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.context.operation = Some(operation.into());
        self
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Connection, message)
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Query, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    pub fn transaction(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transaction, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> &ErrorContext {
        &self.context
    }

    /// Whether retrying the operation could succeed.
    ///
    /// Connection and timeout failures are always transient; query and
    /// transaction failures only when the backend marked them so
    /// (deadlocks, serialization failures).
    pub fn is_retryable(&self) -> bool {
        match self.kind {
            ErrorKind::Connection | ErrorKind::Timeout => true,
            ErrorKind::Query | ErrorKind::Transaction => self.context.retryable,
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    pub fn is_conflict(&self) -> bool {
        self.kind == ErrorKind::Conflict
    }
}

impl From<String> for RepositoryError {
    fn from(message: String) -> Self {
        RepositoryError::internal(message)
    }
}

impl From<&str> for RepositoryError {
    fn from(message: &str) -> Self {
        RepositoryError::internal(message.to_string())
    }
}

#[cfg(feature = "postgres-repo")]
impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};

        match err {
            Error::NotFound => RepositoryError::not_found("Record not found"),
            Error::DatabaseError(kind, info) => {
                let message = info.message().to_string();
                let context =
                    ErrorContext::default().with_details(format!("db_error_kind={:?}", kind));
                match kind {
                    DatabaseErrorKind::UniqueViolation => {
                        RepositoryError::conflict(message).with_context(context)
                    }
                    DatabaseErrorKind::SerializationFailure => {
                        RepositoryError::query(message).with_context(context.retryable())
                    }
                    _ => RepositoryError::query(message).with_context(context),
                }
            }
            Error::QueryBuilderError(e) => {
                RepositoryError::query(format!("Query builder error: {}", e))
            }
            Error::DeserializationError(e) => {
                RepositoryError::internal(format!("Deserialization error: {}", e))
            }
            Error::SerializationError(e) => {
                RepositoryError::internal(format!("Serialization error: {}", e))
            }
            other => RepositoryError::query(other.to_string()),
        }
    }
}

#[cfg(feature = "postgres-repo")]
impl From<diesel::r2d2::PoolError> for RepositoryError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        RepositoryError::connection(err.to_string())
            .with_context(ErrorContext::default().with_details("pool_error"))
    }
}
