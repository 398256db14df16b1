//! Repository trait definitions.
//!
//! These traits define the abstract storage interface for program types and
//! users. Implementations live in `db::repositories`.

pub mod error;
pub mod programs;
pub mod users;

pub use error::{ErrorContext, ErrorKind, RepositoryError, RepositoryResult};
pub use programs::ProgramTypeRepository;
pub use users::UserRepository;

/// Combined repository interface required by the application.
///
/// Implemented automatically for any type that provides both program type
/// and user storage.
pub trait FullRepository: ProgramTypeRepository + UserRepository {}

impl<T> FullRepository for T where T: ProgramTypeRepository + UserRepository {}
