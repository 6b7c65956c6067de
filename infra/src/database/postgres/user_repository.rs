//! Postgres implementation of the UserRepository trait
//!
//! All operations execute against the transaction handle passed in by
//! the caller, so a command handler's writes either all commit or all
//! roll back together.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, Postgres, Transaction};

use account_core::domain::entities::{NewUser, Post, User};
use account_core::errors::{AppError, DomainError, UseCaseError};
use account_core::repositories::UserRepository;

use crate::database::error::map_sqlx_error;

pub struct PgUserRepository;

impl PgUserRepository {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PgUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    password: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self, posts: Vec<Post>) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            password: self.password,
            created_at: self.created_at,
            updated_at: self.updated_at,
            posts,
        }
    }
}

#[derive(FromRow)]
struct PostRow {
    id: i64,
    author_id: i64,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            author_id: row.author_id,
            title: row.title,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

async fn posts_for_author(
    conn: &mut Transaction<'static, Postgres>,
    author_id: i64,
) -> Result<Vec<Post>, AppError> {
    let rows: Vec<PostRow> = sqlx::query_as(
        r#"
        SELECT id, author_id, title, content, created_at, updated_at
        FROM posts
        WHERE author_id = $1
        ORDER BY id
        "#,
    )
    .bind(author_id)
    .fetch_all(&mut **conn)
    .await
    .map_err(map_sqlx_error)?;

    Ok(rows.into_iter().map(Post::from).collect())
}

#[async_trait]
impl UserRepository for PgUserRepository {
    type Conn = Transaction<'static, Postgres>;

    async fn create(&self, conn: &mut Self::Conn, user: NewUser) -> Result<User, AppError> {
        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password, created_at, updated_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .fetch_one(&mut **conn)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into_user(Vec::new()))
    }

    async fn find_by_id(&self, conn: &mut Self::Conn, id: i64) -> Result<Option<User>, AppError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, name, email, password, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut **conn)
        .await
        .map_err(map_sqlx_error)?;

        match row {
            Some(row) => {
                let posts = posts_for_author(conn, row.id).await?;
                Ok(Some(row.into_user(posts)))
            }
            None => Ok(None),
        }
    }

    async fn update(&self, conn: &mut Self::Conn, user: User) -> Result<User, AppError> {
        if user.id <= 0 {
            return Err(UseCaseError::internal_server_error(
                "user id is required for update",
            ));
        }

        let row: Option<UserRow> = sqlx::query_as(
            r#"
            UPDATE users
            SET name = $1, email = $2, password = $3, updated_at = now()
            WHERE id = $4
            RETURNING id, name, email, password, created_at, updated_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.id)
        .fetch_optional(&mut **conn)
        .await
        .map_err(map_sqlx_error)?;

        match row {
            Some(row) => Ok(row.into_user(Vec::new())),
            None => Err(DomainError::not_found("user not found")
                .with_info(serde_json::json!({"userId": user.id}))),
        }
    }

    async fn delete_by_id(&self, conn: &mut Self::Conn, id: i64) -> Result<(), AppError> {
        if id <= 0 {
            return Err(UseCaseError::internal_server_error(
                "user id is required for deletion",
            ));
        }

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut **conn)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }
}
