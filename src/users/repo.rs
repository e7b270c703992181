use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::dto::UserPayload;

/// Full user row as stored. Create, update and delete return this shape,
/// hashed password included; the list endpoint projects it away.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub fname: String,
    pub lname: String,
    pub username: String,
    pub password: String,
    pub age: i32,
    pub url: String,
    pub gender: String,
    pub is_active: bool,
    pub budget: f64,
    pub created_at: OffsetDateTime,
}

/// List projection: every column but the password.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserListItem {
    pub id: Uuid,
    pub fname: String,
    pub lname: String,
    pub username: String,
    pub age: i32,
    pub url: String,
    pub gender: String,
    pub is_active: bool,
    pub budget: f64,
    pub created_at: OffsetDateTime,
}

impl User {
    pub async fn find_by_username(db: &PgPool, username: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, fname, lname, username, password, age, url, gender,
                   is_active, budget, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await
    }

    /// Stored password hash for one user, if the row exists.
    pub async fn password_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<String>> {
        sqlx::query_scalar::<_, String>(r#"SELECT password FROM users WHERE id = $1"#)
            .bind(id)
            .fetch_optional(db)
            .await
    }

    pub async fn insert(db: &PgPool, payload: &UserPayload, password_hash: &str) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (fname, lname, username, password, age, url, gender, is_active, budget)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, fname, lname, username, password, age, url, gender,
                      is_active, budget, created_at
            "#,
        )
        .bind(&payload.fname)
        .bind(&payload.lname)
        .bind(&payload.username)
        .bind(password_hash)
        .bind(payload.age)
        .bind(&payload.url)
        .bind(&payload.gender)
        .bind(payload.is_active.unwrap_or(true))
        .bind(payload.budget)
        .fetch_one(db)
        .await
    }

    /// Full-row replace. Omitted optionals were already defaulted by
    /// validation; `is_active` falls back to the schema default here.
    pub async fn replace(
        db: &PgPool,
        id: Uuid,
        payload: &UserPayload,
        password_hash: &str,
    ) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET fname = $2, lname = $3, username = $4, password = $5, age = $6,
                url = $7, gender = $8, is_active = $9, budget = $10
            WHERE id = $1
            RETURNING id, fname, lname, username, password, age, url, gender,
                      is_active, budget, created_at
            "#,
        )
        .bind(id)
        .bind(&payload.fname)
        .bind(&payload.lname)
        .bind(&payload.username)
        .bind(password_hash)
        .bind(payload.age)
        .bind(&payload.url)
        .bind(&payload.gender)
        .bind(payload.is_active.unwrap_or(true))
        .bind(payload.budget)
        .fetch_optional(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            DELETE FROM users
            WHERE id = $1
            RETURNING id, fname, lname, username, password, age, url, gender,
                      is_active, budget, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// One page of users in the store's natural order; no explicit sort.
    pub async fn list(db: &PgPool, limit: i64, offset: i64) -> sqlx::Result<Vec<UserListItem>> {
        sqlx::query_as::<_, UserListItem>(
            r#"
            SELECT id, fname, lname, username, age, url, gender,
                   is_active, budget, created_at
            FROM users
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
    }

    /// Total user count, unfiltered by pagination.
    pub async fn count(db: &PgPool) -> sqlx::Result<i64> {
        sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM users"#)
            .fetch_one(db)
            .await
    }
}
