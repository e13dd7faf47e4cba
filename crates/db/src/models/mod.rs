//! Row models and DTOs.
//!
//! Each entity module contains:
//! - A `FromRow` struct matching the table row
//! - A `FromRow` "with relations" struct used for list/detail queries
//! - `Deserialize` create and update DTOs (update fields all `Option`;
//!   nullable columns use `Option<Option<T>>` so `null` clears them)
//! - A `Serialize` response shape with nested relations and derived costs

pub mod app_config;
pub mod client;
pub mod cost;
pub mod metrics;
pub mod project;
pub mod task;
pub mod user;

use serde::{Deserialize, Deserializer};

/// `deserialize_with` for clearable update fields, paired with
/// `#[serde(default)]`: a missing key stays `None`, an explicit `null`
/// becomes `Some(None)`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
