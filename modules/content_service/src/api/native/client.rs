//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{
    ContentApi, ContentEntry, ContentEntryPatch, ContentError, ContentModel, ContentModelPatch,
    FieldValues, NewContentModel, NewTenant, Tenant, TenantPatch,
};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Native client implementation that directly calls the domain service
///
/// Used for in-process communication without HTTP overhead.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ContentApi for NativeClient {
    async fn create_tenant(&self, tenant: NewTenant) -> Result<Tenant, ContentError> {
        self.service.create_tenant(tenant).await
    }

    async fn get_tenant(&self, tenant_id: Uuid) -> Result<Tenant, ContentError> {
        self.service.get_tenant(tenant_id).await
    }

    async fn list_tenants(&self) -> Result<Vec<Tenant>, ContentError> {
        self.service.list_tenants().await
    }

    async fn update_tenant(
        &self,
        tenant_id: Uuid,
        patch: TenantPatch,
    ) -> Result<Tenant, ContentError> {
        self.service.update_tenant(tenant_id, patch).await
    }

    async fn delete_tenant(&self, tenant_id: Uuid) -> Result<(), ContentError> {
        self.service.delete_tenant(tenant_id).await
    }

    async fn create_model(&self, model: NewContentModel) -> Result<ContentModel, ContentError> {
        self.service.create_model(model).await
    }

    async fn update_model(
        &self,
        model: &str,
        patch: ContentModelPatch,
    ) -> Result<ContentModel, ContentError> {
        self.service.update_model(model, patch).await
    }

    async fn find_model(&self, model: &str) -> Result<ContentModel, ContentError> {
        self.service.find_model(model).await
    }

    async fn list_models(&self, tenant_id: Option<Uuid>) -> Result<Vec<ContentModel>, ContentError> {
        self.service.list_models(tenant_id).await
    }

    async fn delete_model(&self, model: &str) -> Result<(), ContentError> {
        self.service.delete_model(model).await
    }

    async fn validate_entry(
        &self,
        tenant_id: Uuid,
        model: &str,
        values: FieldValues,
        locale: Option<String>,
    ) -> Result<FieldValues, ContentError> {
        self.service
            .validate_entry(tenant_id, model, &values, locale.as_deref())
            .await
    }

    async fn create_entry(
        &self,
        tenant_id: Uuid,
        model: &str,
        values: FieldValues,
        locale: Option<String>,
    ) -> Result<ContentEntry, ContentError> {
        self.service
            .create_entry(tenant_id, model, values, locale)
            .await
    }

    async fn update_entry(
        &self,
        tenant_id: Uuid,
        entry_id: Uuid,
        patch: ContentEntryPatch,
    ) -> Result<ContentEntry, ContentError> {
        self.service.update_entry(tenant_id, entry_id, patch).await
    }

    async fn get_entry(&self, tenant_id: Uuid, entry_id: Uuid) -> Result<ContentEntry, ContentError> {
        self.service.get_entry(tenant_id, entry_id).await
    }

    async fn list_entries(
        &self,
        tenant_id: Uuid,
        model: &str,
        locale: Option<String>,
    ) -> Result<Vec<ContentEntry>, ContentError> {
        self.service
            .list_entries(tenant_id, model, locale.as_deref())
            .await
    }

    async fn delete_entry(&self, tenant_id: Uuid, entry_id: Uuid) -> Result<(), ContentError> {
        self.service.delete_entry(tenant_id, entry_id).await
    }
}
