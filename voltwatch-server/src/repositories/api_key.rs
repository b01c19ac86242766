use std::sync::Arc;

use sqlx::{Error, Sqlite, Transaction};

use crate::configs::Storage;
use crate::models::ApiKey;

#[derive(Clone)]
pub struct ApiKeyRepository {
    storage: Arc<Storage>,
}

impl ApiKeyRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}

impl ApiKeyRepository {
    pub async fn create(
        &self,
        item: &ApiKey,
        transaction: &mut Transaction<'_, Sqlite>,
    ) -> Result<i32, Error> {
        let id = sqlx::query(
            r#"
            INSERT INTO api_keys (key_hash, key_prefix, facility_id, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&item.key_hash)
        .bind(&item.key_prefix)
        .bind(item.facility_id)
        .bind(item.created_at)
        .execute(&mut **transaction)
        .await?
        .last_insert_rowid();

        Ok(id as i32)
    }

    pub async fn find_by_hash(&self, key_hash: &str) -> Result<Option<ApiKey>, Error> {
        let key: Option<ApiKey> = sqlx::query_as("SELECT * FROM api_keys WHERE key_hash = $1")
            .bind(key_hash)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(key)
    }
}
