//! Author model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Persisted author. `name` is unique across the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
}

impl Author {
    /// Unknown birth or death years do not exclude the author
    pub fn is_alive_in(&self, year: i32) -> bool {
        self.birth_year.map_or(true, |born| born <= year)
            && self.death_year.map_or(true, |died| died >= year)
    }
}

/// Author data as it arrives from the catalog, before reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateAuthor {
    pub name: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
}
