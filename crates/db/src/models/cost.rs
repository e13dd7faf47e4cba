use bizdesk_core::types::{DbId, Money};
use sqlx::FromRow;

/// One nullable amount attributed to an owning row (client or project).
///
/// Cost queries return these flat rows; the roll-up itself happens in
/// `bizdesk_core::costs`.
#[derive(Debug, Clone, FromRow)]
pub struct CostRow {
    pub owner_id: DbId,
    pub amount: Option<Money>,
}
