//! User model.
//!
//! Authentication itself is an external collaborator; the table exists as
//! the ownership FK target and for principal lookup.

use annotator_core::types::UserId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
}

/// DTO for provisioning a user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
}
