//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{ContentEntry, ContentModel, Tenant};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Storage-backed uniqueness constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueConstraint {
    TenantSlug,
    ModelApiName,
    EntrySingleton,
}

/// Raised by repositories when a write loses a uniqueness race at commit time
///
/// Carried inside `anyhow::Error`; the service downcasts it back onto the
/// matching domain error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unique constraint violated: {constraint:?}")]
pub struct UniqueViolation {
    pub constraint: UniqueConstraint,
}

/// Repository for tenants
#[async_trait]
pub trait TenantRepository: Send + Sync {
    async fn insert(&self, tenant: &Tenant) -> Result<Tenant>;

    async fn update(&self, tenant: &Tenant) -> Result<Tenant>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tenant>>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tenant>>;

    /// All tenants ordered by slug
    async fn list_all(&self) -> Result<Vec<Tenant>>;

    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// Repository for content models
#[async_trait]
pub trait ContentModelRepository: Send + Sync {
    async fn insert(&self, model: &ContentModel) -> Result<ContentModel>;

    async fn update(&self, model: &ContentModel) -> Result<ContentModel>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ContentModel>>;

    async fn find_by_api_name(&self, api_name: &str) -> Result<Option<ContentModel>>;

    /// Newest first, optionally restricted to one tenant
    async fn list(&self, tenant_id: Option<Uuid>) -> Result<Vec<ContentModel>>;

    async fn count_by_tenant(&self, tenant_id: Uuid) -> Result<u64>;

    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// Repository for content entries
#[async_trait]
pub trait ContentEntryRepository: Send + Sync {
    /// `singleton` marks entries of singleton models so storage can reject a second one
    async fn insert(&self, entry: &ContentEntry, singleton: bool) -> Result<ContentEntry>;

    async fn update(&self, entry: &ContentEntry) -> Result<ContentEntry>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ContentEntry>>;

    /// Newest first
    async fn list_by_model(
        &self,
        model_id: Uuid,
        tenant_id: Option<Uuid>,
        locale: Option<&str>,
    ) -> Result<Vec<ContentEntry>>;

    async fn count_by_model(&self, model_id: Uuid) -> Result<u64>;

    async fn delete(&self, id: Uuid) -> Result<()>;

    async fn delete_by_model(&self, model_id: Uuid) -> Result<u64>;

    /// Arm (`singleton = true`) or clear the singleton guard on every entry of a model
    async fn set_singleton_guard(&self, model_id: Uuid, singleton: bool) -> Result<u64>;
}
