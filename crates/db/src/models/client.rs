//! Client entity model and DTOs.

use bizdesk_core::costs::ClientSummary;
use bizdesk_core::deletion::{DeletionPolicy, Entity};
use bizdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::user::UserSummary;

/// A row from the `clients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: DbId,
    pub user_id: DbId,
    pub business_name: String,
    pub contact_name: String,
    pub phone: Option<String>,
    pub internal_notes: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Entity for Client {
    const NAME: &'static str = "Client";
    const TABLE: &'static str = "clients";
    const DELETION: DeletionPolicy = DeletionPolicy::Archive;
}

/// A client row joined with its linked account.
#[derive(Debug, Clone, FromRow)]
pub struct ClientWithUser {
    #[sqlx(flatten)]
    pub client: Client,
    pub username: String,
    pub email: String,
}

/// DTO for the client half of a create; the account is a separate
/// [`CreateUser`](crate::models::user::CreateUser).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClient {
    pub business_name: String,
    pub contact_name: String,
    pub phone: Option<String>,
    pub internal_notes: Option<String>,
}

/// DTO for updating a client. Absent fields are left unchanged;
/// `null` clears a nullable column.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClient {
    pub business_name: Option<String>,
    pub contact_name: Option<String>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub internal_notes: Option<Option<String>>,
    pub email: Option<String>,
}

/// Client as rendered by the API: nested account plus derived costs.
#[derive(Debug, Clone, Serialize)]
pub struct ClientResponse {
    pub id: DbId,
    pub user: UserSummary,
    pub business_name: String,
    pub contact_name: String,
    pub phone: Option<String>,
    pub internal_notes: Option<String>,
    pub is_active: bool,
    #[serde(flatten)]
    pub summary: ClientSummary,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ClientResponse {
    pub fn new(row: ClientWithUser, summary: ClientSummary) -> Self {
        let ClientWithUser {
            client,
            username,
            email,
        } = row;
        Self {
            id: client.id,
            user: UserSummary {
                id: client.user_id,
                username,
                email,
            },
            business_name: client.business_name,
            contact_name: client.contact_name,
            phone: client.phone,
            internal_notes: client.internal_notes,
            is_active: client.is_active,
            summary,
            created_at: client.created_at,
            updated_at: client.updated_at,
        }
    }
}
