//! Program type repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{NewProgramType, ProgramDetails, ProgramType, ProgramTypeChanges, ProgramTypeId};

/// Repository trait for program type storage.
///
/// Every operation maps to a single-table read or write. Mutations must be
/// atomic: a failed operation leaves no partial row behind.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ProgramTypeRepository: Send + Sync {
    /// Check that the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// List all program types.
    async fn list_program_types(&self) -> RepositoryResult<Vec<ProgramType>>;

    /// Fetch a program type by id.
    ///
    /// # Returns
    /// * `Ok(ProgramType)` - The record
    /// * `Err(RepositoryError::NotFound)` - If no record has this id
    async fn get_program_type(&self, id: ProgramTypeId) -> RepositoryResult<ProgramType>;

    /// Look up a program type by its type name.
    ///
    /// Returns `Ok(None)` when no record matches; reserved for the
    /// duplicate-name check on create.
    async fn find_program_type_by_name(
        &self,
        type_name: &str,
    ) -> RepositoryResult<Option<ProgramType>>;

    /// Insert a new program type and return the stored record.
    async fn create_program_type(&self, new: &NewProgramType) -> RepositoryResult<ProgramType>;

    /// Apply a partial update. `None` fields in `changes` are left unchanged.
    ///
    /// # Returns
    /// * `Ok(ProgramType)` - The updated record
    /// * `Err(RepositoryError::NotFound)` - If no record has this id
    async fn update_program_type(
        &self,
        id: ProgramTypeId,
        changes: &ProgramTypeChanges,
    ) -> RepositoryResult<ProgramType>;

    /// Delete a program type.
    ///
    /// # Returns
    /// * `Ok(())` - The record was deleted
    /// * `Err(RepositoryError::NotFound)` - If no record has this id
    async fn delete_program_type(&self, id: ProgramTypeId) -> RepositoryResult<()>;

    /// Overwrite the full detail set of a program type.
    ///
    /// Every detail column is written; `None` fields clear the stored value.
    ///
    /// # Returns
    /// * `Ok(ProgramType)` - The updated record
    /// * `Err(RepositoryError::NotFound)` - If no record has this id
    async fn set_program_details(
        &self,
        id: ProgramTypeId,
        details: &ProgramDetails,
    ) -> RepositoryResult<ProgramType>;
}
