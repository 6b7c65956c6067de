//! Domain entities
//!
//! All tables share the same base columns: an identity id plus
//! created_at/updated_at timestamps maintained by the database.

pub mod group;
pub mod post;
pub mod user;

pub use group::Group;
pub use post::Post;
pub use user::{NewUser, User};
