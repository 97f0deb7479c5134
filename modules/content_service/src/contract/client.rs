//! Native client trait for inter-module communication
//!
//! Other modules use this trait to talk to the content service in-process.

use super::error::ContentError;
use super::model::{
    ContentEntry, ContentEntryPatch, ContentModel, ContentModelPatch, FieldValues,
    NewContentModel, NewTenant, Tenant, TenantPatch,
};
use async_trait::async_trait;
use uuid::Uuid;

/// Content service API for inter-module communication
///
/// `model` arguments accept either a model id or its api name.
#[async_trait]
pub trait ContentApi: Send + Sync {
    // ===== Tenant Operations =====

    async fn create_tenant(&self, tenant: NewTenant) -> Result<Tenant, ContentError>;

    async fn get_tenant(&self, tenant_id: Uuid) -> Result<Tenant, ContentError>;

    async fn list_tenants(&self) -> Result<Vec<Tenant>, ContentError>;

    async fn update_tenant(&self, tenant_id: Uuid, patch: TenantPatch)
        -> Result<Tenant, ContentError>;

    async fn delete_tenant(&self, tenant_id: Uuid) -> Result<(), ContentError>;

    // ===== Content Model Operations =====

    async fn create_model(&self, model: NewContentModel) -> Result<ContentModel, ContentError>;

    async fn update_model(
        &self,
        model: &str,
        patch: ContentModelPatch,
    ) -> Result<ContentModel, ContentError>;

    async fn find_model(&self, model: &str) -> Result<ContentModel, ContentError>;

    /// Newest first, optionally restricted to one tenant
    async fn list_models(&self, tenant_id: Option<Uuid>) -> Result<Vec<ContentModel>, ContentError>;

    async fn delete_model(&self, model: &str) -> Result<(), ContentError>;

    // ===== Content Entry Operations =====

    /// Validate without persisting; returns the normalized values
    async fn validate_entry(
        &self,
        tenant_id: Uuid,
        model: &str,
        values: FieldValues,
        locale: Option<String>,
    ) -> Result<FieldValues, ContentError>;

    async fn create_entry(
        &self,
        tenant_id: Uuid,
        model: &str,
        values: FieldValues,
        locale: Option<String>,
    ) -> Result<ContentEntry, ContentError>;

    async fn update_entry(
        &self,
        tenant_id: Uuid,
        entry_id: Uuid,
        patch: ContentEntryPatch,
    ) -> Result<ContentEntry, ContentError>;

    async fn get_entry(&self, tenant_id: Uuid, entry_id: Uuid) -> Result<ContentEntry, ContentError>;

    async fn list_entries(
        &self,
        tenant_id: Uuid,
        model: &str,
        locale: Option<String>,
    ) -> Result<Vec<ContentEntry>, ContentError>;

    async fn delete_entry(&self, tenant_id: Uuid, entry_id: Uuid) -> Result<(), ContentError>;
}
