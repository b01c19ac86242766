use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Table;

/// A device credential. Only the SHA-256 digest of the key is stored.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ApiKey {
    pub id: i32,
    pub key_hash: String,
    /// Leading characters of the plaintext key, safe to log
    pub key_prefix: String,
    /// `None` when the key is not assigned to a facility
    pub facility_id: Option<i32>,
    pub created_at: OffsetDateTime,
}

#[derive(Clone)]
pub struct ApiKeyTable;

impl Table for ApiKeyTable {
    fn name(&self) -> &'static str {
        "api_keys"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS api_keys (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                key_hash CHAR(64) NOT NULL UNIQUE,
                key_prefix VARCHAR(8) NOT NULL,
                facility_id INTEGER,
                created_at TIMESTAMP NOT NULL,
                FOREIGN KEY (facility_id) REFERENCES facilities (id) ON DELETE SET NULL
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS api_keys;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["facilities"]
    }
}
