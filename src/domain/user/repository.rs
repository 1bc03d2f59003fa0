//! User repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::User;
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user. Duplicate emails surface as a conflict.
    async fn save(&self, user: User) -> DomainResult<()>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// All users, newest first
    async fn find_all(&self) -> DomainResult<Vec<User>>;

    async fn update(&self, user: User) -> DomainResult<()>;

    async fn delete(&self, id: &str) -> DomainResult<()>;

    /// Record the time of a successful login
    async fn touch_last_login(&self, id: &str, at: DateTime<Utc>) -> DomainResult<()>;

    async fn count(&self) -> DomainResult<u64>;
}
