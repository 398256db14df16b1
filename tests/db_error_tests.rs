//! Tests for db::repository::error module.

use mentorhub_rust::db::repository::{ErrorContext, ErrorKind, RepositoryError};

#[test]
fn test_error_context_new() {
    let ctx = ErrorContext::new("test_operation");
    assert_eq!(ctx.operation, Some("test_operation".to_string()));
    assert!(ctx.entity.is_none());
    assert!(ctx.entity_id.is_none());
    assert!(ctx.details.is_none());
    assert!(!ctx.retryable);
}

#[test]
fn test_error_context_chaining() {
    let ctx = ErrorContext::new("create_program_type")
        .with_entity("program_type")
        .with_entity_id(42)
        .with_details("timeout occurred")
        .retryable();

    assert_eq!(ctx.operation, Some("create_program_type".to_string()));
    assert_eq!(ctx.entity, Some("program_type".to_string()));
    assert_eq!(ctx.entity_id, Some("42".to_string()));
    assert_eq!(ctx.details, Some("timeout occurred".to_string()));
    assert!(ctx.retryable);
}

#[test]
fn test_error_context_display() {
    let ctx = ErrorContext::new("get_user")
        .with_entity("user")
        .with_entity_id("7");

    let display = format!("{}", ctx);
    assert!(display.contains("operation=get_user"));
    assert!(display.contains("entity=user"));
    assert!(display.contains("id=7"));
}

#[test]
fn test_empty_context_displays_as_nothing() {
    assert_eq!(format!("{}", ErrorContext::default()), "");
}

#[test]
fn test_not_found_classification() {
    let err = RepositoryError::not_found("Program type 3 not found");
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.is_not_found());
    assert!(!err.is_conflict());
    assert!(!err.is_retryable());
}

#[test]
fn test_conflict_classification() {
    let err = RepositoryError::conflict("Program type 'Office Hours' already exists");
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert!(err.is_conflict());
    assert!(!err.is_not_found());
    assert!(!err.is_retryable());
}

#[test]
fn test_connection_and_timeout_are_retryable() {
    assert!(RepositoryError::connection("pool exhausted").is_retryable());
    assert!(RepositoryError::timeout("query timed out").is_retryable());
    assert!(!RepositoryError::query("syntax error").is_retryable());
    assert!(!RepositoryError::internal("boom").is_retryable());
}

#[test]
fn test_query_errors_retryable_only_when_marked() {
    let plain = RepositoryError::query("deadlock detected");
    assert!(!plain.is_retryable());

    let marked = RepositoryError::query("deadlock detected")
        .with_context(ErrorContext::default().retryable());
    assert!(marked.is_retryable());
}

#[test]
fn test_with_operation_updates_context() {
    let err = RepositoryError::internal("boom").with_operation("delete_program_type");
    assert_eq!(
        err.context().operation,
        Some("delete_program_type".to_string())
    );
}

#[test]
fn test_from_string() {
    let err: RepositoryError = "something broke".into();
    assert_eq!(err.kind(), ErrorKind::Internal);
    let display = err.to_string();
    assert!(display.contains("internal error"));
    assert!(display.contains("something broke"));
}

#[test]
fn test_display_includes_context() {
    let err = RepositoryError::not_found("Program type 9 not found").with_context(
        ErrorContext::new("get_program_type")
            .with_entity("program_type")
            .with_entity_id(9),
    );

    let display = err.to_string();
    assert!(display.contains("not found"));
    assert!(display.contains("operation=get_program_type"));
    assert!(display.contains("id=9"));
}
