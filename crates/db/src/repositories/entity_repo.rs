//! Policy-driven deletion shared by every entity.

use bizdesk_core::deletion::{DeletionOutcome, DeletionPolicy, Entity};
use bizdesk_core::types::DbId;
use sqlx::PgPool;

pub struct EntityRepo;

impl EntityRepo {
    /// Delete `id` from `E`'s table according to `E::DELETION`.
    ///
    /// Archiving an already archived row still reports `Archived`.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn delete<E: Entity>(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DeletionOutcome>, sqlx::Error> {
        let query = match E::DELETION {
            DeletionPolicy::Archive => {
                format!("UPDATE {} SET is_active = false WHERE id = $1", E::TABLE)
            }
            DeletionPolicy::Cascade => format!("DELETE FROM {} WHERE id = $1", E::TABLE),
        };
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        tracing::debug!(entity = E::NAME, id, policy = ?E::DELETION, "Entity deleted");
        Ok(Some(E::DELETION.outcome()))
    }

    /// Whether a row with `id` exists in `E`'s table, archived or not.
    pub async fn exists<E: Entity>(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", E::TABLE);
        let (exists,): (bool,) = sqlx::query_as(&query).bind(id).fetch_one(pool).await?;
        Ok(exists)
    }
}
