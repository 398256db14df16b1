//! User repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{NewUser, User, UserId};

/// Repository trait for user lookups.
///
/// The CRUD surface only needs users to resolve bearer-token identities to
/// stored accounts and read their `account_type` for authorization.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by id.
    ///
    /// # Returns
    /// * `Ok(User)` - The account record
    /// * `Err(RepositoryError::NotFound)` - If no user has this id
    async fn get_user(&self, id: UserId) -> RepositoryResult<User>;

    /// Insert a new user and return the stored record.
    ///
    /// Used by provisioning and tests; usernames are unique.
    async fn create_user(&self, new: &NewUser) -> RepositoryResult<User>;
}
