//! Per-entity deletion policy.
//!
//! Clients are archived so their history stays queryable; projects and tasks
//! are removed outright, taking their children with them through the
//! `ON DELETE CASCADE` foreign keys.

use serde::Serialize;

/// How a `DELETE` on an entity is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionPolicy {
    /// Flip the row's `is_active` flag to false; the row and its children stay.
    Archive,
    /// Delete the row; the store cascades to dependent rows.
    Cascade,
}

/// A persisted entity addressable by id.
///
/// Implemented by the row models in the persistence layer; the generic
/// delete path reads [`Entity::DELETION`] to decide what a delete means.
pub trait Entity {
    /// Human-readable name used in `NotFound` errors and logs.
    const NAME: &'static str;
    /// Backing table.
    const TABLE: &'static str;
    const DELETION: DeletionPolicy;
}

/// What a delete actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletionOutcome {
    Archived,
    Deleted,
}

impl DeletionPolicy {
    pub fn outcome(self) -> DeletionOutcome {
        match self {
            DeletionPolicy::Archive => DeletionOutcome::Archived,
            DeletionPolicy::Cascade => DeletionOutcome::Deleted,
        }
    }
}
