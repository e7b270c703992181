use serde::{Deserialize, Serialize};

use crate::users::repo::User;

/// Create/update body after validation, defaults filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct UserPayload {
    pub fname: String,
    pub lname: String,
    pub username: String,
    pub password: String,
    pub age: i32,
    pub url: String,
    pub gender: String,
    pub is_active: Option<bool>,
    pub budget: f64,
}

/// Query parameters for the list endpoint. `skip` is a 1-indexed page
/// number, not a row offset.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default = "default_skip")]
    pub skip: i64,
}

fn default_limit() -> i64 {
    10
}
fn default_skip() -> i64 {
    1
}

/// Payload returned by create: the stored document plus a signed token.
#[derive(Debug, Serialize)]
pub struct CreatedUser {
    pub user: User,
    pub token: String,
}
