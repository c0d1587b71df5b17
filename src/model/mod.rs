//! The lead store.
//! `ModelManager` is the only handle to persisted state. It is built once at startup and
//! handed to the web layer through `AppState`.

mod lead;
mod memory;

pub use lead::{CaptureOutcome, Lead, LeadBmc};

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    Connection, PgConnection, PgPool,
};
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::config::{AppConfig, DbConfig};
use memory::MemoryStore;

#[derive(Clone, Debug)]
pub struct ModelManager {
    store: Store,
}

#[derive(Clone, Debug)]
enum Store {
    Postgres(PgPool),
    Memory(Arc<Mutex<MemoryStore>>),
}

impl ModelManager {
    pub async fn init(config: &AppConfig) -> Result<Self> {
        info!("{:<20} - Initializing the DB pool", "init_db");
        let db_pool = init_db(&config.db_config).await?;

        Ok(Self {
            store: Store::Postgres(db_pool),
        })
    }

    /// Creates a fresh, uniquely named database, runs the migrations on it and connects to it.
    pub async fn init_test(config: &AppConfig) -> Result<Self> {
        let mut db_config = config.db_config.clone();
        db_config.db_name = Uuid::new_v4().to_string();
        configure_test_db(&db_config).await?;

        let db_pool = init_db(&db_config).await?;
        Ok(Self {
            store: Store::Postgres(db_pool),
        })
    }

    /// A store that lives only as long as the process. Nothing is persisted.
    pub fn in_memory() -> Self {
        info!("{:<20} - Initializing the in-memory store", "init_memory");
        Self {
            store: Store::Memory(Arc::default()),
        }
    }

    /// A Postgres store pointed at a closed port. Every query fails once the acquire times out.
    #[doc(hidden)]
    pub fn unreachable() -> Self {
        let options = PgConnectOptions::new().host("127.0.0.1").port(1);
        let db_pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy_with(options);

        Self {
            store: Store::Postgres(db_pool),
        }
    }

    /// The current time as reported by the store.
    pub async fn server_time(&self) -> Result<DateTime<Utc>> {
        match &self.store {
            Store::Postgres(pool) => {
                let now = sqlx::query_scalar::<_, DateTime<Utc>>("SELECT now()")
                    .fetch_one(pool)
                    .await?;
                Ok(now)
            }
            Store::Memory(_) => Ok(Utc::now()),
        }
    }
}

async fn init_db(db_config: &DbConfig) -> Result<PgPool> {
    // NOTE: Tests sometimes fail if there is more than 1 max connection. This fixes it.
    let max_cons = if cfg!(test) { 1 } else { 5 };

    let db_pool = PgPoolOptions::new()
        .max_connections(max_cons)
        .acquire_timeout(Duration::from_millis(500))
        .connect_with(db_config.connection_options())
        .await
        .map_err(|ex| Error::FailToCreatePool(ex.to_string()))?;

    Ok(db_pool)
}

async fn configure_test_db(db_config: &DbConfig) -> Result<()> {
    let mut connection =
        PgConnection::connect_with(&db_config.connection_options_without_db()).await?;

    let sql = format!(r#"CREATE DATABASE "{}";"#, db_config.db_name);
    sqlx::query(&sql).execute(&mut connection).await?;

    // Create pool only used to migrate the DB
    let db_pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_millis(1000))
        .connect_with(db_config.connection_options())
        .await
        .map_err(|ex| Error::FailToCreatePool(format!("Test Config: {ex}")))?;
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    Ok(())
}

// ###################################
// ->   ERROR
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, strum_macros::AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("failed to create db pool: {0}")]
    FailToCreatePool(String),
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("sqlx migration error: {0}")]
    SqlxMigrate(#[from] sqlx::migrate::MigrateError),
}
