//! Postgres repository implementation using Diesel.
//!
//! Connections come from an r2d2 pool; every operation runs on the blocking
//! thread pool via `tokio::task::spawn_blocking`, with automatic retry and
//! exponential backoff for transient failures. Pending migrations are applied
//! once at construction.
//!
//! Configuration is read from the environment:
//!
//! | Variable | Default | |
//! |---|---|---|
//! | `DATABASE_URL` / `PG_DATABASE_URL` | (required) | connection string |
//! | `PG_POOL_MAX` | 10 | maximum pool size |
//! | `PG_POOL_MIN` | 1 | minimum idle connections |
//! | `PG_CONN_TIMEOUT_SEC` | 30 | connection timeout |
//! | `PG_IDLE_TIMEOUT_SEC` | 600 | idle connection timeout |
//! | `PG_MAX_RETRIES` | 3 | retry attempts for transient failures |
//! | `PG_RETRY_DELAY_MS` | 100 | initial retry delay (doubles per retry) |

use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tokio::task;

use crate::api::{
    NewProgramType, NewUser, ProgramDetails, ProgramType, ProgramTypeChanges, ProgramTypeId, User,
    UserId,
};
use crate::db::repository::{
    ErrorContext, ProgramTypeRepository, RepositoryError, RepositoryResult, UserRepository,
};

mod models;
mod schema;

use models::*;
use schema::*;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Connection and retry settings for the Postgres backend.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub database_url: String,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connection_timeout_sec: u64,
    pub idle_timeout_sec: u64,
    pub max_retries: u32,
    /// Initial retry delay; doubles with each attempt.
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

impl PostgresConfig {
    /// Read the configuration from the environment (see module docs for the
    /// variable list).
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        Ok(Self {
            database_url,
            max_pool_size: env_or("PG_POOL_MAX", 10),
            min_pool_size: env_or("PG_POOL_MIN", 1),
            connection_timeout_sec: env_or("PG_CONN_TIMEOUT_SEC", 30),
            idle_timeout_sec: env_or("PG_IDLE_TIMEOUT_SEC", 600),
            max_retries: env_or("PG_MAX_RETRIES", 3),
            retry_delay_ms: env_or("PG_RETRY_DELAY_MS", 100),
        })
    }

    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Snapshot of pool state and query counters for monitoring.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    pub connections_in_use: u32,
    pub idle_connections: u32,
    pub total_connections: u32,
    pub max_size: u32,
    pub total_queries: u64,
    pub failed_queries: u64,
    pub retried_operations: u64,
}

/// Diesel-backed repository for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
    total_queries: Arc<AtomicU64>,
    failed_queries: Arc<AtomicU64>,
    retried_operations: Arc<AtomicU64>,
}

impl PostgresRepository {
    /// Build the connection pool and apply pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection(e.to_string()).with_context(
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        let mut conn = pool.get()?;
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal(format!("Migration failed: {}", e))
                .with_operation("run_migrations")
        })?;
        drop(conn);

        Ok(Self {
            pool,
            config,
            total_queries: Arc::new(AtomicU64::new(0)),
            failed_queries: Arc::new(AtomicU64::new(0)),
            retried_operations: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Run `op` on the blocking pool with a connection checked out of the
    /// r2d2 pool, retrying transient failures up to `max_retries` times.
    async fn run<T, F>(&self, op: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: Fn(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);
        let total_queries = Arc::clone(&self.total_queries);
        let failed_queries = Arc::clone(&self.failed_queries);
        let retried_operations = Arc::clone(&self.retried_operations);

        task::spawn_blocking(move || {
            let mut attempt = 0;
            loop {
                let result = pool.get().map_err(RepositoryError::from).and_then(|mut conn| {
                    total_queries.fetch_add(1, Ordering::Relaxed);
                    op(&mut conn)
                });

                match result {
                    Ok(value) => return Ok(value),
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        attempt += 1;
                        retried_operations.fetch_add(1, Ordering::Relaxed);
                        std::thread::sleep(delay);
                        delay *= 2;
                    }
                    Err(e) => {
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(e);
                    }
                }
            }
        })
        .await
        .map_err(|e| {
            RepositoryError::internal(format!("Task join error: {}", e))
                .with_operation("spawn_blocking")
        })?
    }

    /// Current pool state and query counters.
    pub fn get_pool_stats(&self) -> PoolStats {
        let state = self.pool.state();
        PoolStats {
            connections_in_use: state.connections - state.idle_connections,
            idle_connections: state.idle_connections,
            total_connections: state.connections,
            max_size: self.config.max_pool_size,
            total_queries: self.total_queries.load(Ordering::Relaxed),
            failed_queries: self.failed_queries.load(Ordering::Relaxed),
            retried_operations: self.retried_operations.load(Ordering::Relaxed),
        }
    }
}

fn missing_program(id: ProgramTypeId) -> RepositoryError {
    RepositoryError::not_found(format!("Program type {} not found", id)).with_context(
        ErrorContext::new("get_program_type")
            .with_entity("program_type")
            .with_entity_id(id),
    )
}

fn row_to_program(row: ProgramTypeRow) -> ProgramType {
    ProgramType {
        id: ProgramTypeId::new(row.program_type_id),
        course_id: row.course_id,
        type_name: row.type_name,
        description: row.description,
        duration: row.duration_minutes,
        physical_location: row.physical_location,
        virtual_link: row.virtual_link,
        auto_approve_appointments: row.auto_approve_appointments,
        max_daily_meetings: row.max_daily_meetings,
        max_weekly_meetings: row.max_weekly_meetings,
        max_monthly_meetings: row.max_monthly_meetings,
        created_at: row.created_at,
    }
}

fn row_to_user(row: UserRow) -> RepositoryResult<User> {
    let account_type = row.account_type.parse().map_err(|e: String| {
        RepositoryError::internal(e).with_context(
            ErrorContext::new("row_to_user")
                .with_entity("user")
                .with_entity_id(row.user_id),
        )
    })?;

    Ok(User {
        id: UserId::new(row.user_id),
        username: row.username,
        account_type,
        created_at: row.created_at,
    })
}

#[async_trait]
impl ProgramTypeRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.run(|conn| {
            sql_query("SELECT 1").execute(conn)?;
            Ok(true)
        })
        .await
    }

    async fn list_program_types(&self) -> RepositoryResult<Vec<ProgramType>> {
        self.run(|conn| {
            let rows = program_types::table
                .select(ProgramTypeRow::as_select())
                .order(program_types::program_type_id.asc())
                .load::<ProgramTypeRow>(conn)?;
            Ok(rows.into_iter().map(row_to_program).collect())
        })
        .await
    }

    async fn get_program_type(&self, id: ProgramTypeId) -> RepositoryResult<ProgramType> {
        self.run(move |conn| {
            program_types::table
                .find(id.value())
                .select(ProgramTypeRow::as_select())
                .first::<ProgramTypeRow>(conn)
                .optional()?
                .map(row_to_program)
                .ok_or_else(|| missing_program(id))
        })
        .await
    }

    async fn find_program_type_by_name(
        &self,
        type_name: &str,
    ) -> RepositoryResult<Option<ProgramType>> {
        let type_name = type_name.to_string();
        self.run(move |conn| {
            let row = program_types::table
                .filter(program_types::type_name.eq(&type_name))
                .select(ProgramTypeRow::as_select())
                .first::<ProgramTypeRow>(conn)
                .optional()?;
            Ok(row.map(row_to_program))
        })
        .await
    }

    async fn create_program_type(&self, new: &NewProgramType) -> RepositoryResult<ProgramType> {
        let new = new.clone();
        self.run(move |conn| {
            conn.transaction(|tx| {
                let taken = program_types::table
                    .filter(program_types::type_name.eq(&new.type_name))
                    .select(program_types::program_type_id)
                    .first::<i64>(tx)
                    .optional()?
                    .is_some();

                if taken {
                    return Err(RepositoryError::conflict(format!(
                        "Program type '{}' already exists",
                        new.type_name
                    ))
                    .with_operation("create_program_type"));
                }

                let row: ProgramTypeRow = diesel::insert_into(program_types::table)
                    .values(NewProgramTypeRow {
                        type_name: new.type_name.clone(),
                        description: new.description.clone(),
                        duration_minutes: new.duration,
                    })
                    .returning(ProgramTypeRow::as_returning())
                    .get_result(tx)?;

                Ok(row_to_program(row))
            })
        })
        .await
    }

    async fn update_program_type(
        &self,
        id: ProgramTypeId,
        changes: &ProgramTypeChanges,
    ) -> RepositoryResult<ProgramType> {
        let changes = changes.clone();
        self.run(move |conn| {
            conn.transaction(|tx| {
                // Diesel rejects an all-None changeset, and the endpoint
                // treats an empty body as a no-op update.
                if changes.is_empty() {
                    return program_types::table
                        .find(id.value())
                        .select(ProgramTypeRow::as_select())
                        .first::<ProgramTypeRow>(tx)
                        .optional()?
                        .map(row_to_program)
                        .ok_or_else(|| missing_program(id));
                }

                diesel::update(program_types::table.find(id.value()))
                    .set(ProgramTypeChangeset {
                        type_name: changes.type_name.clone(),
                        description: changes.description.clone(),
                        duration_minutes: changes.duration,
                    })
                    .returning(ProgramTypeRow::as_returning())
                    .get_result::<ProgramTypeRow>(tx)
                    .optional()?
                    .map(row_to_program)
                    .ok_or_else(|| missing_program(id))
            })
        })
        .await
    }

    async fn delete_program_type(&self, id: ProgramTypeId) -> RepositoryResult<()> {
        self.run(move |conn| {
            let deleted =
                diesel::delete(program_types::table.find(id.value())).execute(conn)?;
            if deleted == 0 {
                return Err(missing_program(id));
            }
            Ok(())
        })
        .await
    }

    async fn set_program_details(
        &self,
        id: ProgramTypeId,
        details: &ProgramDetails,
    ) -> RepositoryResult<ProgramType> {
        let details = details.clone();
        self.run(move |conn| {
            conn.transaction(|tx| {
                let existing = program_types::table
                    .find(id.value())
                    .select(ProgramTypeRow::as_select())
                    .first::<ProgramTypeRow>(tx)
                    .optional()?
                    .ok_or_else(|| missing_program(id))?;

                // Full overwrite of the detail columns; the type name column
                // is NOT NULL, so an absent name keeps the stored one.
                let type_name = details.type_name.clone().unwrap_or(existing.type_name);

                let row: ProgramTypeRow =
                    diesel::update(program_types::table.find(id.value()))
                        .set((
                            program_types::course_id.eq(details.course_id),
                            program_types::type_name.eq(type_name),
                            program_types::description.eq(details.description.clone()),
                            program_types::duration_minutes.eq(details.duration),
                            program_types::physical_location
                                .eq(details.physical_location.clone()),
                            program_types::virtual_link.eq(details.virtual_link.clone()),
                            program_types::auto_approve_appointments
                                .eq(details.auto_approve_appointments),
                            program_types::max_daily_meetings.eq(details.max_daily_meetings),
                            program_types::max_weekly_meetings.eq(details.max_weekly_meetings),
                            program_types::max_monthly_meetings
                                .eq(details.max_monthly_meetings),
                        ))
                        .returning(ProgramTypeRow::as_returning())
                        .get_result(tx)?;

                Ok(row_to_program(row))
            })
        })
        .await
    }
}

#[async_trait]
impl UserRepository for PostgresRepository {
    async fn get_user(&self, id: UserId) -> RepositoryResult<User> {
        self.run(move |conn| {
            let row = users::table
                .find(id.value())
                .select(UserRow::as_select())
                .first::<UserRow>(conn)
                .optional()?
                .ok_or_else(|| {
                    RepositoryError::not_found(format!("User {} not found", id)).with_context(
                        ErrorContext::new("get_user")
                            .with_entity("user")
                            .with_entity_id(id),
                    )
                })?;
            row_to_user(row)
        })
        .await
    }

    async fn create_user(&self, new: &NewUser) -> RepositoryResult<User> {
        let new = new.clone();
        self.run(move |conn| {
            let row: UserRow = diesel::insert_into(users::table)
                .values(NewUserRow {
                    username: new.username.clone(),
                    account_type: new.account_type.as_str().to_string(),
                })
                .returning(UserRow::as_returning())
                .get_result(conn)?;
            row_to_user(row)
        })
        .await
    }
}
