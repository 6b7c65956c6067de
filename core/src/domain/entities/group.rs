//! Group entity
//!
//! Users and groups relate many-to-many through the
//! `user_group_relations` table; membership is schema-level only and has
//! no HTTP surface yet.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
