//! Domain service - business logic orchestration

use super::events::{ContentEvent, EventPublisher};
use super::repository::{
    ContentEntryRepository, ContentModelRepository, TenantRepository, UniqueConstraint,
    UniqueViolation,
};
use super::validation::{validate_slug, ValidationEngine};
use crate::contract::{
    ContentEntry, ContentEntryPatch, ContentError, ContentModel, ContentModelPatch, FieldValues,
    NewContentModel, NewTenant, Tenant, TenantPatch,
};
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// Domain service for tenants, content models and content entries
pub struct Service {
    tenant_repo: Arc<dyn TenantRepository>,
    model_repo: Arc<dyn ContentModelRepository>,
    entry_repo: Arc<dyn ContentEntryRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    engine: ValidationEngine,
}

impl Service {
    /// Create a new service instance with the standard field validators
    pub fn new(
        tenant_repo: Arc<dyn TenantRepository>,
        model_repo: Arc<dyn ContentModelRepository>,
        entry_repo: Arc<dyn ContentEntryRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            tenant_repo,
            model_repo,
            entry_repo,
            event_publisher,
            engine: ValidationEngine::default(),
        }
    }

    /// Replace the validation engine (e.g. with custom per-type checks)
    pub fn with_engine(mut self, engine: ValidationEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn engine(&self) -> &ValidationEngine {
        &self.engine
    }

    // ===== Tenant Operations =====

    /// Register a new, active tenant
    pub async fn create_tenant(&self, new: NewTenant) -> Result<Tenant, ContentError> {
        validate_slug(&new.slug)?;
        require_non_blank("tenant display name", &new.display_name)?;
        let metadata = new.metadata.unwrap_or_else(|| Value::Object(Default::default()));
        require_object_metadata(&metadata)?;

        if self
            .tenant_repo
            .find_by_slug(&new.slug)
            .await
            .map_err(internal)?
            .is_some()
        {
            return Err(slug_taken(&new.slug));
        }

        let now = Utc::now();
        let tenant = Tenant {
            id: Uuid::new_v4(),
            slug: new.slug,
            display_name: new.display_name,
            active: true,
            metadata,
            created_at: now,
            updated_at: now,
        };

        let created = self
            .tenant_repo
            .insert(&tenant)
            .await
            .map_err(|e| unique_or_internal(e, |_| slug_taken(&tenant.slug)))?;

        tracing::info!(tenant_id = %created.id, slug = %created.slug, "Tenant created");
        Ok(created)
    }

    pub async fn get_tenant(&self, tenant_id: Uuid) -> Result<Tenant, ContentError> {
        self.tenant_repo
            .find_by_id(tenant_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| ContentError::not_found("tenant", tenant_id))
    }

    pub async fn list_tenants(&self) -> Result<Vec<Tenant>, ContentError> {
        self.tenant_repo.list_all().await.map_err(internal)
    }

    /// Rename, enable/disable or replace metadata of a tenant
    pub async fn update_tenant(
        &self,
        tenant_id: Uuid,
        patch: TenantPatch,
    ) -> Result<Tenant, ContentError> {
        let mut tenant = self.get_tenant(tenant_id).await?;

        if let Some(display_name) = patch.display_name {
            require_non_blank("tenant display name", &display_name)?;
            tenant.display_name = display_name;
        }
        if let Some(metadata) = patch.metadata {
            require_object_metadata(&metadata)?;
            tenant.metadata = metadata;
        }
        if let Some(active) = patch.active {
            tenant.active = active;
        }
        tenant.updated_at = Utc::now();

        let updated = self.tenant_repo.update(&tenant).await.map_err(internal)?;
        tracing::info!(tenant_id = %updated.id, active = updated.active, "Tenant updated");
        Ok(updated)
    }

    /// Delete a tenant that no longer owns any content models
    pub async fn delete_tenant(&self, tenant_id: Uuid) -> Result<(), ContentError> {
        let tenant = self.get_tenant(tenant_id).await?;

        let models = self
            .model_repo
            .count_by_tenant(tenant.id)
            .await
            .map_err(internal)?;
        if models > 0 {
            return Err(ContentError::Conflict {
                reason: format!(
                    "tenant '{}' still owns {} content model(s)",
                    tenant.slug, models
                ),
            });
        }

        self.tenant_repo.delete(tenant.id).await.map_err(internal)?;
        tracing::info!(tenant_id = %tenant.id, "Tenant deleted");
        Ok(())
    }

    // ===== Content Model Operations =====

    /// Define a new content model for a tenant
    pub async fn create_model(&self, new: NewContentModel) -> Result<ContentModel, ContentError> {
        self.active_tenant(new.tenant_id).await?;
        self.engine
            .validate_definition(&new.api_name, &new.fields, &new.locales)?;
        require_non_blank("model display name", &new.display_name)?;

        if self
            .model_repo
            .find_by_api_name(&new.api_name)
            .await
            .map_err(internal)?
            .is_some()
        {
            return Err(api_name_taken(&new.api_name));
        }

        let now = Utc::now();
        let model = ContentModel {
            id: Uuid::new_v4(),
            tenant_id: new.tenant_id,
            api_name: new.api_name,
            display_name: new.display_name,
            description: new.description,
            fields: new.fields,
            locales: new.locales,
            singleton: new.singleton,
            created_at: now,
            updated_at: now,
        };

        let created = self
            .model_repo
            .insert(&model)
            .await
            .map_err(|e| unique_or_internal(e, |_| api_name_taken(&model.api_name)))?;

        tracing::info!(
            tenant_id = %created.tenant_id,
            model = %created.api_name,
            fields = created.fields.len(),
            "Content model created"
        );
        self.publish(ContentEvent::model_created(&created)).await;
        Ok(created)
    }

    /// Merge a patch onto an existing model and re-check the definition
    pub async fn update_model(
        &self,
        reference: &str,
        patch: ContentModelPatch,
    ) -> Result<ContentModel, ContentError> {
        let existing = self.find_model(reference).await?;
        self.active_tenant(existing.tenant_id).await?;

        let mut model = existing.clone();
        if let Some(api_name) = patch.api_name {
            model.api_name = api_name;
        }
        if let Some(display_name) = patch.display_name {
            require_non_blank("model display name", &display_name)?;
            model.display_name = display_name;
        }
        if let Some(description) = patch.description {
            model.description = description;
        }
        if let Some(fields) = patch.fields {
            model.fields = fields;
        }
        if let Some(locales) = patch.locales {
            model.locales = locales;
        }
        if let Some(singleton) = patch.singleton {
            model.singleton = singleton;
        }

        if model.api_name != existing.api_name
            || model.fields != existing.fields
            || model.locales != existing.locales
        {
            self.engine
                .validate_definition(&model.api_name, &model.fields, &model.locales)?;
        }

        if model.api_name != existing.api_name {
            let clash = self
                .model_repo
                .find_by_api_name(&model.api_name)
                .await
                .map_err(internal)?;
            if clash.is_some_and(|other| other.id != model.id) {
                return Err(api_name_taken(&model.api_name));
            }
        }

        if model.singleton && !existing.singleton {
            let entries = self
                .entry_repo
                .count_by_model(model.id)
                .await
                .map_err(internal)?;
            if entries > 1 {
                return Err(ContentError::schema(format!(
                    "model '{}' has {} entries and cannot become a singleton",
                    model.api_name, entries
                )));
            }
        }

        // Arm or release the storage guard on the surviving entry before the model flips
        if model.singleton != existing.singleton {
            let guarded = self
                .entry_repo
                .set_singleton_guard(model.id, model.singleton)
                .await
                .map_err(|e| {
                    unique_or_internal(e, |_| {
                        ContentError::schema(format!(
                            "model '{}' gained entries and cannot become a singleton",
                            model.api_name
                        ))
                    })
                })?;
            tracing::debug!(
                model = %model.api_name,
                singleton = model.singleton,
                entries = guarded,
                "Singleton guard updated"
            );
        }

        model.updated_at = Utc::now();
        let updated = self
            .model_repo
            .update(&model)
            .await
            .map_err(|e| unique_or_internal(e, |_| api_name_taken(&model.api_name)))?;

        tracing::info!(model_id = %updated.id, model = %updated.api_name, "Content model updated");
        self.publish(ContentEvent::model_updated(&updated)).await;
        Ok(updated)
    }

    /// Resolve a model by id first, then by api name
    pub async fn find_model(&self, reference: &str) -> Result<ContentModel, ContentError> {
        if let Ok(id) = Uuid::parse_str(reference) {
            if let Some(model) = self.model_repo.find_by_id(id).await.map_err(internal)? {
                return Ok(model);
            }
        }

        self.model_repo
            .find_by_api_name(reference)
            .await
            .map_err(internal)?
            .ok_or_else(|| ContentError::not_found("content model", reference))
    }

    /// All models, newest first, optionally restricted to one tenant
    pub async fn list_models(
        &self,
        tenant_id: Option<Uuid>,
    ) -> Result<Vec<ContentModel>, ContentError> {
        self.model_repo.list(tenant_id).await.map_err(internal)
    }

    /// Delete a model together with its entries
    pub async fn delete_model(&self, reference: &str) -> Result<(), ContentError> {
        let model = self.find_model(reference).await?;
        self.active_tenant(model.tenant_id).await?;

        let removed = self
            .entry_repo
            .delete_by_model(model.id)
            .await
            .map_err(internal)?;
        self.model_repo.delete(model.id).await.map_err(internal)?;

        tracing::info!(model_id = %model.id, model = %model.api_name, entries = removed, "Content model deleted");
        self.publish(ContentEvent::model_deleted(&model)).await;
        Ok(())
    }

    // ===== Content Entry Operations =====

    /// Validate candidate values without persisting them
    pub async fn validate_entry(
        &self,
        tenant_id: Uuid,
        model: &str,
        values: &FieldValues,
        locale: Option<&str>,
    ) -> Result<FieldValues, ContentError> {
        let model = self.tenant_model(tenant_id, model).await?;
        self.engine.validate(&model, values, locale)
    }

    /// Validate and persist a new entry
    pub async fn create_entry(
        &self,
        tenant_id: Uuid,
        model: &str,
        values: FieldValues,
        locale: Option<String>,
    ) -> Result<ContentEntry, ContentError> {
        self.active_tenant(tenant_id).await?;
        let model = self.tenant_model(tenant_id, model).await?;
        let normalized = self.engine.validate(&model, &values, locale.as_deref())?;

        // Check-then-act; a concurrent create is caught by the storage guard below.
        if model.singleton
            && self
                .entry_repo
                .count_by_model(model.id)
                .await
                .map_err(internal)?
                > 0
        {
            return Err(singleton_violation(&model));
        }

        self.check_unique_fields(&model, tenant_id, locale.as_deref(), &normalized, None)
            .await?;

        let now = Utc::now();
        let entry = ContentEntry {
            id: Uuid::new_v4(),
            tenant_id,
            model_id: model.id,
            locale,
            values: normalized,
            created_at: now,
            updated_at: now,
        };

        let created = self
            .entry_repo
            .insert(&entry, model.singleton)
            .await
            .map_err(|e| {
                unique_or_internal(e, |constraint| match constraint {
                    UniqueConstraint::EntrySingleton => singleton_violation(&model),
                    _ => ContentError::Conflict {
                        reason: format!("duplicate content entry {}", entry.id),
                    },
                })
            })?;

        tracing::info!(
            tenant_id = %tenant_id,
            model = %model.api_name,
            entry_id = %created.id,
            "Content entry created"
        );
        self.publish(ContentEvent::entry_created(&created, &model)).await;
        Ok(created)
    }

    /// Merge a patch over the stored values and re-validate the result
    pub async fn update_entry(
        &self,
        tenant_id: Uuid,
        entry_id: Uuid,
        patch: ContentEntryPatch,
    ) -> Result<ContentEntry, ContentError> {
        self.active_tenant(tenant_id).await?;
        let existing = self.get_entry(tenant_id, entry_id).await?;
        let model = self.entry_model(&existing).await?;

        // Stored keys the model no longer declares are dropped; stray patch keys still fail.
        let mut merged = existing.values.clone();
        merged.retain(|key, _| model.field(key).is_some());
        merged.extend(patch.values);
        let locale = patch.locale.or_else(|| existing.locale.clone());

        let normalized = self.engine.validate(&model, &merged, locale.as_deref())?;
        self.check_unique_fields(
            &model,
            tenant_id,
            locale.as_deref(),
            &normalized,
            Some(existing.id),
        )
        .await?;

        let entry = ContentEntry {
            locale,
            values: normalized,
            updated_at: Utc::now(),
            ..existing
        };
        let updated = self.entry_repo.update(&entry).await.map_err(internal)?;

        tracing::debug!(entry_id = %updated.id, model = %model.api_name, "Content entry updated");
        self.publish(ContentEvent::entry_updated(&updated, &model)).await;
        Ok(updated)
    }

    /// Get an entry; entries of other tenants are reported as not found
    pub async fn get_entry(
        &self,
        tenant_id: Uuid,
        entry_id: Uuid,
    ) -> Result<ContentEntry, ContentError> {
        self.entry_repo
            .find_by_id(entry_id)
            .await
            .map_err(internal)?
            .filter(|entry| entry.tenant_id == tenant_id)
            .ok_or_else(|| ContentError::not_found("content entry", entry_id))
    }

    /// Entries of a model, newest first, optionally restricted to one locale
    pub async fn list_entries(
        &self,
        tenant_id: Uuid,
        model: &str,
        locale: Option<&str>,
    ) -> Result<Vec<ContentEntry>, ContentError> {
        let model = self.tenant_model(tenant_id, model).await?;
        self.entry_repo
            .list_by_model(model.id, Some(tenant_id), locale)
            .await
            .map_err(internal)
    }

    pub async fn delete_entry(&self, tenant_id: Uuid, entry_id: Uuid) -> Result<(), ContentError> {
        self.active_tenant(tenant_id).await?;
        let entry = self.get_entry(tenant_id, entry_id).await?;
        let model = self.entry_model(&entry).await?;

        self.entry_repo.delete(entry.id).await.map_err(internal)?;

        tracing::debug!(entry_id = %entry.id, model = %model.api_name, "Content entry deleted");
        self.publish(ContentEvent::entry_deleted(&entry, &model)).await;
        Ok(())
    }

    // ===== Helper Methods =====

    /// Tenant that exists and accepts writes
    async fn active_tenant(&self, tenant_id: Uuid) -> Result<Tenant, ContentError> {
        let tenant = self.get_tenant(tenant_id).await?;
        if !tenant.active {
            return Err(ContentError::TenantDisabled { tenant_id });
        }
        Ok(tenant)
    }

    /// Model owned by the given tenant; foreign models are reported as not found
    async fn tenant_model(
        &self,
        tenant_id: Uuid,
        reference: &str,
    ) -> Result<ContentModel, ContentError> {
        let model = self.find_model(reference).await?;
        if model.tenant_id != tenant_id {
            return Err(ContentError::not_found("content model", reference));
        }
        Ok(model)
    }

    async fn entry_model(&self, entry: &ContentEntry) -> Result<ContentModel, ContentError> {
        self.model_repo
            .find_by_id(entry.model_id)
            .await
            .map_err(internal)?
            .ok_or_else(|| ContentError::not_found("content model", entry.model_id))
    }

    /// Reject values of unique fields already used by another entry of the
    /// same model, tenant and locale
    async fn check_unique_fields(
        &self,
        model: &ContentModel,
        tenant_id: Uuid,
        locale: Option<&str>,
        values: &FieldValues,
        exclude: Option<Uuid>,
    ) -> Result<(), ContentError> {
        let unique_fields: Vec<_> = model.fields.iter().filter(|f| f.unique).collect();
        if unique_fields.is_empty() {
            return Ok(());
        }

        let siblings = self
            .entry_repo
            .list_by_model(model.id, Some(tenant_id), locale)
            .await
            .map_err(internal)?;

        for field in unique_fields {
            let Some(value) = values.get(&field.key).filter(|v| !v.is_null()) else {
                continue;
            };
            let taken = siblings
                .iter()
                .filter(|e| Some(e.id) != exclude)
                .any(|e| e.values.get(&field.key) == Some(value));
            if taken {
                return Err(ContentError::UniqueField {
                    field: field.key.clone(),
                });
            }
        }
        Ok(())
    }

    async fn publish(&self, event: ContentEvent) {
        if let Err(e) = self.event_publisher.publish(event).await {
            tracing::warn!(error = %e, "Failed to publish content event");
        }
    }
}

fn internal(err: anyhow::Error) -> ContentError {
    tracing::error!(error = ?err, "Content storage failure");
    ContentError::Internal
}

/// Map a late uniqueness violation from storage onto the domain error
fn unique_or_internal(
    err: anyhow::Error,
    on_unique: impl FnOnce(UniqueConstraint) -> ContentError,
) -> ContentError {
    match err.downcast_ref::<UniqueViolation>() {
        Some(violation) => {
            tracing::debug!(constraint = ?violation.constraint, "Uniqueness race caught by storage");
            on_unique(violation.constraint)
        }
        None => internal(err),
    }
}

fn require_non_blank(what: &str, value: &str) -> Result<(), ContentError> {
    if value.trim().is_empty() {
        return Err(ContentError::schema(format!("{} cannot be empty", what)));
    }
    Ok(())
}

fn require_object_metadata(metadata: &Value) -> Result<(), ContentError> {
    if !metadata.is_object() {
        return Err(ContentError::schema("tenant metadata must be a JSON object"));
    }
    Ok(())
}

fn slug_taken(slug: &str) -> ContentError {
    ContentError::Conflict {
        reason: format!("tenant slug already exists: {}", slug),
    }
}

fn api_name_taken(api_name: &str) -> ContentError {
    ContentError::ApiNameTaken {
        api_name: api_name.to_string(),
    }
}

fn singleton_violation(model: &ContentModel) -> ContentError {
    ContentError::SingletonViolation {
        model: model.api_name.clone(),
    }
}
