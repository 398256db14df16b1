//! Storage layer for program types and users.
//!
//! The layer is split the usual way: `services` holds the business rules
//! (duplicate-name check, existence checks, admin lookup) and is what the
//! HTTP handlers call; `repository` defines the abstract storage traits; the
//! implementations live in `repositories` (`local` in-memory, `postgres`
//! with Diesel). `factory` and `repo_config` select and build a backend from
//! environment variables or a `repository.toml` file.
//!
//! ```ignore
//! use mentorhub_rust::db::{services, RepositoryFactory};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepositoryFactory::from_env().await?;
//!     let programs = services::list_program_types(repo.as_ref()).await?;
//!     Ok(())
//! }
//! ```

// With --all-features both backends compile; the singleton prefers postgres.
#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

#[cfg(feature = "postgres-repo")]
pub use repositories::postgres::{PoolStats, PostgresConfig};

pub use factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{
    ErrorContext, ErrorKind, FullRepository, ProgramTypeRepository, RepositoryError,
    RepositoryResult, UserRepository,
};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Process-wide repository shared by the HTTP binary.
static REPOSITORY: OnceLock<Arc<dyn FullRepository>> = OnceLock::new();

#[cfg(feature = "postgres-repo")]
fn default_backend() -> RepositoryResult<Arc<dyn FullRepository>> {
    let config = PostgresConfig::from_env().map_err(RepositoryError::configuration)?;
    let repo = PostgresRepository::new(config)?;
    Ok(Arc::new(repo) as Arc<dyn FullRepository>)
}

#[cfg(all(feature = "local-repo", not(feature = "postgres-repo")))]
fn default_backend() -> RepositoryResult<Arc<dyn FullRepository>> {
    Ok(RepositoryFactory::create_local())
}

/// Initialize the repository singleton. Safe to call more than once; later
/// calls are no-ops.
pub fn init_repository() -> Result<()> {
    if REPOSITORY.get().is_none() {
        let repo = default_backend().map_err(|e| anyhow::Error::msg(e.to_string()))?;
        let _ = REPOSITORY.set(repo);
    }
    Ok(())
}

/// The repository singleton, initializing it on first use.
pub fn get_repository() -> Result<&'static Arc<dyn FullRepository>> {
    if REPOSITORY.get().is_none() {
        let _ = init_repository();
    }

    REPOSITORY
        .get()
        .context("Database not initialized. Call init_repository() first.")
}
