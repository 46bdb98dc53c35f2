//! Database row types.

use sqlx::FromRow;

/// Value column of a `kv_store` row.
#[derive(FromRow)]
pub struct DbValue {
    pub value: String,
}
