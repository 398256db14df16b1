//! High-level business logic over the repository traits.
//!
//! These functions hold the endpoint-facing rules (duplicate-name check,
//! existence checks, the admin lookup) and work with any repository
//! implementation. HTTP handlers call these rather than the repositories
//! directly.

use log::debug;

use crate::api::{
    NewProgramType, NewUser, ProgramDetails, ProgramType, ProgramTypeChanges, ProgramTypeId, User,
    UserId,
};
use crate::db::repository::{
    ErrorContext, FullRepository, RepositoryError, RepositoryResult,
};

/// Check that the backing store is reachable.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// List all program types.
pub async fn list_program_types<R: FullRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Vec<ProgramType>> {
    repo.list_program_types().await
}

/// Fetch a single program type, failing with `NotFound` if it is missing.
pub async fn get_program_type<R: FullRepository + ?Sized>(
    repo: &R,
    id: ProgramTypeId,
) -> RepositoryResult<ProgramType> {
    repo.get_program_type(id).await
}

/// Create a program type.
///
/// The type name must be unique: an existing program type with the same name
/// fails with a conflict before anything is written.
pub async fn create_program_type<R: FullRepository + ?Sized>(
    repo: &R,
    new: &NewProgramType,
) -> RepositoryResult<ProgramType> {
    if repo.find_program_type_by_name(&new.type_name).await?.is_some() {
        return Err(RepositoryError::conflict(format!(
            "Program type '{}' already exists",
            new.type_name
        ))
        .with_context(ErrorContext::new("create_program_type").with_entity("program_type")));
    }

    let created = repo.create_program_type(new).await?;
    debug!("created program type {} ({})", created.id, created.type_name);
    Ok(created)
}

/// Apply a partial update to a program type.
pub async fn update_program_type<R: FullRepository + ?Sized>(
    repo: &R,
    id: ProgramTypeId,
    changes: &ProgramTypeChanges,
) -> RepositoryResult<ProgramType> {
    let updated = repo.update_program_type(id, changes).await?;
    debug!("updated program type {}", id);
    Ok(updated)
}

/// Delete a program type.
pub async fn delete_program_type<R: FullRepository + ?Sized>(
    repo: &R,
    id: ProgramTypeId,
) -> RepositoryResult<()> {
    repo.delete_program_type(id).await?;
    debug!("deleted program type {}", id);
    Ok(())
}

/// Overwrite the full detail set of a program type.
pub async fn set_program_details<R: FullRepository + ?Sized>(
    repo: &R,
    id: ProgramTypeId,
    details: &ProgramDetails,
) -> RepositoryResult<ProgramType> {
    let updated = repo.set_program_details(id, details).await?;
    debug!("set details for program type {}", id);
    Ok(updated)
}

/// Fetch a user record.
pub async fn get_user<R: FullRepository + ?Sized>(
    repo: &R,
    id: UserId,
) -> RepositoryResult<User> {
    repo.get_user(id).await
}

/// Create a user (provisioning and tests).
pub async fn create_user<R: FullRepository + ?Sized>(
    repo: &R,
    new: &NewUser,
) -> RepositoryResult<User> {
    repo.create_user(new).await
}

/// Resolve whether the given user holds the admin role.
///
/// The role is read from the stored account record on every call. A user id
/// that no longer resolves to an account is simply not an admin.
pub async fn is_admin<R: FullRepository + ?Sized>(
    repo: &R,
    user_id: UserId,
) -> RepositoryResult<bool> {
    match repo.get_user(user_id).await {
        Ok(user) => Ok(user.account_type.is_admin()),
        Err(e) if e.is_not_found() => Ok(false),
        Err(e) => Err(e),
    }
}
