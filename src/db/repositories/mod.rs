//! Storage backend implementations: `local` (in-memory, for tests and local
//! development) and `postgres` (Diesel ORM, feature-gated).

pub mod local;
#[cfg(feature = "postgres-repo")]
pub mod postgres;

pub use local::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use postgres::{PoolStats, PostgresConfig, PostgresRepository};
