//! User entity and its insert shape

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::post::Post;

/// A persisted user, optionally hydrated with their posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Posts authored by this user; loaded alongside the user on reads.
    #[serde(default)]
    pub posts: Vec<Post>,
}

/// The fields required to insert a new user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}
