use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::Config;

const SCHEMA: &str = include_str!("../sql/schema.sql");

/// Serializes concurrent schema bootstraps (several test binaries, several replicas).
const SCHEMA_LOCK_KEY: i64 = 0x746f_646f;

pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
}

/// Applies `sql/schema.sql`. Every statement is `CREATE ... IF NOT EXISTS`, so this is
/// safe to run on every startup.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    for statement in SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        sqlx::query(statement).execute(&mut *tx).await?;
    }

    tx.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_declares_all_relations() {
        for table in ["users", "todo_lists", "todo_items", "users_lists", "lists_items"] {
            assert!(
                SCHEMA.contains(&format!("CREATE TABLE IF NOT EXISTS {} (", table)),
                "missing table {}",
                table
            );
        }
    }
}
