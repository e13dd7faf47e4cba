//! Repository for the `clients` table.

use bizdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::client::{Client, ClientWithUser, CreateClient, UpdateClient};
use crate::models::user::CreateUser;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, business_name, contact_name, phone, internal_notes, \
                       is_active, created_at, updated_at";

/// Client columns qualified with `c.` plus the linked account's name and email.
const JOINED_COLUMNS: &str = "c.id, c.user_id, c.business_name, c.contact_name, c.phone, \
                              c.internal_notes, c.is_active, c.created_at, c.updated_at, \
                              u.username, u.email";

pub struct ClientRepo;

impl ClientRepo {
    /// Create the linked account and the client in one transaction.
    ///
    /// A unique violation on the account (`uq_users_username`,
    /// `uq_users_email`) rolls back both inserts.
    pub async fn create_with_user(
        pool: &PgPool,
        user: &CreateUser,
        input: &CreateClient,
    ) -> Result<Client, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (user_id,): (DbId,) = sqlx::query_as(
            "INSERT INTO users (username, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.role)
        .fetch_one(&mut *tx)
        .await?;

        let query = format!(
            "INSERT INTO clients (user_id, business_name, contact_name, phone, internal_notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let client = sqlx::query_as::<_, Client>(&query)
            .bind(user_id)
            .bind(&input.business_name)
            .bind(&input.contact_name)
            .bind(&input.phone)
            .bind(&input.internal_notes)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(client)
    }

    /// Find a client by ID. Archived clients are included.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a client with its account. Archived clients are included.
    pub async fn find_with_user(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ClientWithUser>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM clients c JOIN users u ON u.id = c.user_id
             WHERE c.id = $1"
        );
        sqlx::query_as::<_, ClientWithUser>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List clients with their accounts, newest first. Archived clients are
    /// skipped unless `include_archived` is set.
    pub async fn list_with_user(
        pool: &PgPool,
        include_archived: bool,
    ) -> Result<Vec<ClientWithUser>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM clients c JOIN users u ON u.id = c.user_id
             WHERE ($1 OR c.is_active)
             ORDER BY c.created_at DESC, c.id DESC"
        );
        sqlx::query_as::<_, ClientWithUser>(&query)
            .bind(include_archived)
            .fetch_all(pool)
            .await
    }

    /// Update a client. Only non-`None` fields in `input` are applied and
    /// `Some(None)` clears `phone` or `internal_notes`. An `email` change is written to the linked account in the same
    /// transaction.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateClient,
    ) -> Result<Option<Client>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE clients SET
                business_name = COALESCE($2, business_name),
                contact_name = COALESCE($3, contact_name),
                phone = CASE WHEN $4 THEN $5 ELSE phone END,
                internal_notes = CASE WHEN $6 THEN $7 ELSE internal_notes END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let Some(client) = sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(&input.business_name)
            .bind(&input.contact_name)
            .bind(input.phone.is_some())
            .bind(input.phone.as_ref().and_then(Option::as_deref))
            .bind(input.internal_notes.is_some())
            .bind(input.internal_notes.as_ref().and_then(Option::as_deref))
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if let Some(email) = &input.email {
            sqlx::query("UPDATE users SET email = $2 WHERE id = $1")
                .bind(client.user_id)
                .bind(email)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(Some(client))
    }

    /// Set `is_active = true` on an archived client. Returns `true` if a
    /// row was restored.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE clients SET is_active = true WHERE id = $1 AND is_active = false")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
