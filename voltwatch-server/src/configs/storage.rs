use std::path::Path;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Error, SqlitePool};

use crate::configs::schema::SchemaManager;
use crate::configs::settings::Database;

#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    pub async fn new(database: Database, schema_manager: SchemaManager) -> Result<Self, Error> {
        let pool = SqlitePoolOptions::new()
            .min_connections(1) // in memory db might drop connection when 0
            .max_connections(10)
            .connect(&database.url)
            .await?;

        Self::create_schema(&pool, &schema_manager, &database).await?;

        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn create_schema(
        pool: &SqlitePool,
        schema: &SchemaManager,
        database: &Database,
    ) -> Result<(), Error> {
        if database.clean_start {
            // Clean migration history
            sqlx::query("DROP TABLE IF EXISTS _sqlx_migrations")
                .execute(pool)
                .await?;

            sqlx::raw_sql(&schema.dispose_schema().join("\n"))
                .execute(pool)
                .await?;

            tracing::warn!("perform a clean boot: clean and recreate schema");
        }

        sqlx::raw_sql(&schema.create_schema().join("\n"))
            .execute(pool)
            .await?;

        match database.migration_path.as_deref().map(Path::new) {
            Some(migration_path) if migration_path.is_dir() => {
                let mut pool_connection = pool.acquire().await?;
                let migrator = Migrator::new(migration_path).await?;
                migrator.run(&mut pool_connection).await?;

                tracing::info!("database migration success");
            }
            Some(migration_path) => {
                tracing::warn!(
                    "migration path {} is not a directory, skipping migrations",
                    migration_path.display()
                );
            }
            None => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn database(migration_path: Option<&str>) -> Database {
        Database {
            migration_path: migration_path.map(String::from),
            clean_start: true,
            url: String::from("sqlite::memory:"),
        }
    }

    #[tokio::test]
    async fn test_missing_migration_path_is_skipped() {
        let storage = Storage::new(
            database(Some("does/not/exist/migrations")),
            SchemaManager::default(),
        )
        .await
        .unwrap();

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM facilities")
            .fetch_one(storage.get_pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_schema_is_created_without_migrations() {
        let storage = Storage::new(database(None), SchemaManager::default())
            .await
            .unwrap();

        for table in ["facilities", "api_keys", "energy_records"] {
            let (count,): (i64,) = sqlx::query_as(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = $1",
            )
            .bind(table)
            .fetch_one(storage.get_pool())
            .await
            .unwrap();
            assert_eq!(count, 1, "missing table {table}");
        }
    }
}
