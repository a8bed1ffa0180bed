//! Connection pool, startup liveness check and table bootstrap.
//!
//! # Design
//! The pool is an `AnyPool`: production talks to MySQL, tests talk to an
//! in-memory SQLite database, and both go through the same queries. All
//! statements therefore stick to `?` placeholders and SQL that both backends
//! accept. The only backend-specific text is the table DDL.

use std::time::Duration;

use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

const MYSQL_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS todos (
        id BIGINT NOT NULL AUTO_INCREMENT,
        title VARCHAR(255) NOT NULL,
        PRIMARY KEY (id)
    )
"#;

const SQLITE_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS todos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL
    )
"#;

/// Build a pool for `database_url` without opening a connection yet.
///
/// Connections are opened on first use, so a bad host surfaces in
/// [`check_connection`] rather than here. Only a malformed URL fails.
pub fn connect(database_url: &str) -> Result<AnyPool, sqlx::Error> {
    sqlx::any::install_default_drivers();

    AnyPoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_lazy(database_url)
}

/// Run `SELECT 1` on a pooled connection.
pub async fn check_connection(pool: &AnyPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Create the `todos` table if it does not exist yet.
pub async fn ensure_schema(pool: &AnyPool) -> Result<(), sqlx::Error> {
    let mut conn = pool.acquire().await?;
    let ddl = if conn.backend_name().eq_ignore_ascii_case("sqlite") {
        SQLITE_SCHEMA
    } else {
        MYSQL_SCHEMA
    };

    sqlx::query(ddl).execute(&mut *conn).await?;
    tracing::debug!(backend = conn.backend_name(), "todos table ready");
    Ok(())
}
