//! Startup orchestration: storage selection, migrations and user seeding.
//!
//! Everything here runs before the HTTP listener binds. Any failure aborts
//! startup.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::domain::ports::{SeedingResult, UserRepository};
use crate::domain::{DefaultUserSeeder, UserSeedOutcome, UserSeedingError};
use crate::outbound::memory::InMemoryStore;
use crate::outbound::persistence::{
    DbPool, DieselUserRepository, MigrationError, PoolConfig, PoolError, run_pending_migrations,
};
use crate::settings::{AppSettings, SettingsError};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("database migration failed: {0}")]
    Migration(#[from] MigrationError),
    #[error("database pool unavailable: {0}")]
    Pool(#[from] PoolError),
    #[error("user seeding failed: {0}")]
    Seeding(#[from] UserSeedingError),
}

/// Storage the process serves from.
#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL through the Diesel adapters.
    Postgres(DbPool),
    /// Process-local store; contents vanish on exit.
    InMemory(Arc<InMemoryStore>),
}

impl StorageBackend {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::InMemory(_) => "in-memory",
        }
    }
}

/// Select storage from settings, applying migrations for PostgreSQL.
///
/// # Errors
///
/// Returns [`StartupError`] when settings are invalid, migrations fail, or
/// the pool cannot be built.
pub async fn connect_storage(settings: &AppSettings) -> Result<StorageBackend, StartupError> {
    let Some(database_url) = settings.database_url()? else {
        warn!("PAINTAPP_DATABASE_URL is not set; serving from the in-memory store");
        return Ok(StorageBackend::InMemory(Arc::new(InMemoryStore::default())));
    };

    run_pending_migrations(database_url).await?;
    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
    )
    .await?;
    info!(max_connections = settings.db_max_connections(), "database pool ready");
    Ok(StorageBackend::Postgres(pool))
}

/// Seed the default users when enabled.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use paintapp::outbound::memory::InMemoryStore;
/// use paintapp::settings::AppSettings;
/// use paintapp::startup::{StorageBackend, seed_default_users_on_startup};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = AppSettings {
///     bind_addr: None,
///     database_url: None,
///     db_max_connections: None,
///     seed_users: true,
/// };
/// let storage = StorageBackend::InMemory(Arc::new(InMemoryStore::default()));
/// let outcome = seed_default_users_on_startup(&settings, &storage).await?;
/// assert!(outcome.is_some());
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`StartupError::Seeding`] when the store rejects the users.
pub async fn seed_default_users_on_startup(
    settings: &AppSettings,
    storage: &StorageBackend,
) -> Result<Option<UserSeedOutcome>, StartupError> {
    if !settings.seed_users {
        info!(reason = "disabled", "user seeding skipped");
        return Ok(None);
    }

    let outcome = match storage {
        StorageBackend::Postgres(pool) => {
            seed_with(Arc::new(DieselUserRepository::new(pool.clone()))).await?
        }
        StorageBackend::InMemory(store) => seed_with(store.clone()).await?,
    };

    match outcome.result {
        SeedingResult::Applied => {
            info!(user_count = outcome.user_count, "default users seeded");
        }
        SeedingResult::AlreadySeeded => {
            info!("users already present; seeding skipped");
        }
    }
    Ok(Some(outcome))
}

async fn seed_with<R>(repository: Arc<R>) -> Result<UserSeedOutcome, UserSeedingError>
where
    R: UserRepository,
{
    DefaultUserSeeder::new(repository).seed().await
}
