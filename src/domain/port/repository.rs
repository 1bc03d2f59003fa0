//! Port repository interface

use async_trait::async_trait;

use super::model::Port;
use crate::domain::DomainResult;

#[async_trait]
pub trait PortRepository: Send + Sync {
    /// Persist a new port
    async fn save(&self, port: Port) -> DomainResult<()>;

    /// Find a port by its identifier
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Port>>;

    /// All registered ports
    async fn find_all(&self) -> DomainResult<Vec<Port>>;

    /// Update an existing port
    async fn update(&self, port: Port) -> DomainResult<()>;

    /// Delete a port by identifier
    async fn delete(&self, id: &str) -> DomainResult<()>;

    /// Number of registered ports
    async fn count(&self) -> DomainResult<u64>;
}
