//! Feedback repository interface

use async_trait::async_trait;

use super::model::Feedback;
use crate::domain::DomainResult;

#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Persist a new entry, returning it with its assigned id
    async fn save(&self, name: &str, email: &str, message: &str) -> DomainResult<Feedback>;

    /// All entries, newest first
    async fn find_all(&self) -> DomainResult<Vec<Feedback>>;

    async fn delete(&self, id: i32) -> DomainResult<()>;
}
