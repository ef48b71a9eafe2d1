use anyhow::Result;
use std::path::Path;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool, Transaction};
use tracing::info;

/// A storage handle scoped to one request.
///
/// Changes become visible only after `commit`. Dropping the session without
/// committing rolls back and hands the connection back to the pool, so every
/// exit path of a handler releases it.
pub type StorageSession = Transaction<'static, Sqlite>;

#[derive(Clone)]
pub struct DatabaseManager {
    pub pool: SqlitePool,
}

impl DatabaseManager {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_parent_dir(database_url)?;

        // Create database if it doesn't exist
        if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
            info!("Creating database {}", database_url);
            Sqlite::create_database(database_url).await?;
        }

        let pool = SqlitePool::connect(database_url).await?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Opens a storage session for a single command invocation.
    pub async fn session(&self) -> Result<StorageSession, sqlx::Error> {
        self.pool.begin().await
    }
}

/// Creates the directory holding a file-backed SQLite database.
fn ensure_parent_dir(database_url: &str) -> std::io::Result<()> {
    let Some(path) = sqlite_file_path(database_url) else {
        return Ok(());
    };
    match Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            info!("Creating directory {}", parent.display());
            std::fs::create_dir_all(parent)
        }
        _ => Ok(()),
    }
}

/// File path of a `sqlite:` URL, or `None` for in-memory databases.
pub fn sqlite_file_path(database_url: &str) -> Option<&str> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() || path == ":memory:" {
        None
    } else {
        Some(path)
    }
}
