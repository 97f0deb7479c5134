//! Common test utilities: in-memory repositories, event capture and fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use content_service::contract::*;
use content_service::domain::events::{ContentEvent, EventPublisher};
use content_service::domain::repository::{
    ContentEntryRepository, ContentModelRepository, TenantRepository, UniqueConstraint,
    UniqueViolation,
};
use content_service::domain::Service;
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}

pub fn print_json(label: &str, value: &Value) {
    println!(
        "   {}: {}",
        label,
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "N/A".to_string())
    );
}

/// Object literal to field values
pub fn values(v: Value) -> FieldValues {
    match v {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

// ===== In-memory repositories =====
//
// Rows are kept in insertion order; listing walks them backwards for newest first.

#[derive(Clone, Default)]
pub struct MockTenantRepo {
    data: Arc<RwLock<Vec<Tenant>>>,
}

impl MockTenantRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.data.read().len()
    }
}

#[async_trait]
impl TenantRepository for MockTenantRepo {
    async fn insert(&self, tenant: &Tenant) -> anyhow::Result<Tenant> {
        let mut data = self.data.write();
        if data.iter().any(|t| t.slug == tenant.slug) {
            return Err(UniqueViolation {
                constraint: UniqueConstraint::TenantSlug,
            }
            .into());
        }
        data.push(tenant.clone());
        Ok(tenant.clone())
    }

    async fn update(&self, tenant: &Tenant) -> anyhow::Result<Tenant> {
        let mut data = self.data.write();
        let slot = data
            .iter_mut()
            .find(|t| t.id == tenant.id)
            .ok_or_else(|| anyhow::anyhow!("tenant {} missing", tenant.id))?;
        *slot = tenant.clone();
        Ok(tenant.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Tenant>> {
        Ok(self.data.read().iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> anyhow::Result<Option<Tenant>> {
        Ok(self.data.read().iter().find(|t| t.slug == slug).cloned())
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Tenant>> {
        let mut tenants = self.data.read().clone();
        tenants.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(tenants)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        self.data.write().retain(|t| t.id != id);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockModelRepo {
    data: Arc<RwLock<Vec<ContentModel>>>,
    /// Next insert loses a uniqueness race even though the pre-check passed
    fail_next_insert: Arc<RwLock<Option<anyhow::Error>>>,
}

impl MockModelRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.data.read().len()
    }

    pub fn fail_next_insert(&self, err: anyhow::Error) {
        *self.fail_next_insert.write() = Some(err);
    }

    pub fn print_state(&self, context: &str) {
        let data = self.data.read();
        println!("\n========== ContentModelRepository State: {} ==========", context);
        println!("Total models: {}", data.len());
        for model in data.iter() {
            println!(
                "  {} ({}) tenant={} fields={} locales={:?} singleton={}",
                model.api_name,
                model.id,
                model.tenant_id,
                model.fields.len(),
                model.locales,
                model.singleton
            );
        }
        println!("======================================================\n");
    }
}

#[async_trait]
impl ContentModelRepository for MockModelRepo {
    async fn insert(&self, model: &ContentModel) -> anyhow::Result<ContentModel> {
        if let Some(err) = self.fail_next_insert.write().take() {
            return Err(err);
        }
        let mut data = self.data.write();
        if data.iter().any(|m| m.api_name == model.api_name) {
            return Err(UniqueViolation {
                constraint: UniqueConstraint::ModelApiName,
            }
            .into());
        }
        data.push(model.clone());
        Ok(model.clone())
    }

    async fn update(&self, model: &ContentModel) -> anyhow::Result<ContentModel> {
        let mut data = self.data.write();
        if data
            .iter()
            .any(|m| m.api_name == model.api_name && m.id != model.id)
        {
            return Err(UniqueViolation {
                constraint: UniqueConstraint::ModelApiName,
            }
            .into());
        }
        let slot = data
            .iter_mut()
            .find(|m| m.id == model.id)
            .ok_or_else(|| anyhow::anyhow!("model {} missing", model.id))?;
        *slot = model.clone();
        Ok(model.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<ContentModel>> {
        Ok(self.data.read().iter().find(|m| m.id == id).cloned())
    }

    async fn find_by_api_name(&self, api_name: &str) -> anyhow::Result<Option<ContentModel>> {
        Ok(self
            .data
            .read()
            .iter()
            .find(|m| m.api_name == api_name)
            .cloned())
    }

    async fn list(&self, tenant_id: Option<Uuid>) -> anyhow::Result<Vec<ContentModel>> {
        Ok(self
            .data
            .read()
            .iter()
            .rev()
            .filter(|m| tenant_id.is_none_or(|tid| m.tenant_id == tid))
            .cloned()
            .collect())
    }

    async fn count_by_tenant(&self, tenant_id: Uuid) -> anyhow::Result<u64> {
        Ok(self
            .data
            .read()
            .iter()
            .filter(|m| m.tenant_id == tenant_id)
            .count() as u64)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        self.data.write().retain(|m| m.id != id);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockEntryRepo {
    data: Arc<RwLock<Vec<(ContentEntry, bool)>>>,
    fail_next_insert: Arc<RwLock<Option<anyhow::Error>>>,
}

impl MockEntryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.data.read().len()
    }

    pub fn fail_next_insert(&self, err: anyhow::Error) {
        *self.fail_next_insert.write() = Some(err);
    }

    /// Entries of a model currently carrying the singleton guard
    pub fn guarded_count(&self, model_id: Uuid) -> usize {
        self.data
            .read()
            .iter()
            .filter(|(e, guarded)| *guarded && e.model_id == model_id)
            .count()
    }
}

#[async_trait]
impl ContentEntryRepository for MockEntryRepo {
    async fn insert(&self, entry: &ContentEntry, singleton: bool) -> anyhow::Result<ContentEntry> {
        if let Some(err) = self.fail_next_insert.write().take() {
            return Err(err);
        }
        let mut data = self.data.write();
        if singleton
            && data
                .iter()
                .any(|(e, guarded)| *guarded && e.model_id == entry.model_id)
        {
            return Err(UniqueViolation {
                constraint: UniqueConstraint::EntrySingleton,
            }
            .into());
        }
        data.push((entry.clone(), singleton));
        Ok(entry.clone())
    }

    async fn update(&self, entry: &ContentEntry) -> anyhow::Result<ContentEntry> {
        let mut data = self.data.write();
        let slot = data
            .iter_mut()
            .find(|(e, _)| e.id == entry.id)
            .ok_or_else(|| anyhow::anyhow!("entry {} missing", entry.id))?;
        slot.0 = entry.clone();
        Ok(entry.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<ContentEntry>> {
        Ok(self
            .data
            .read()
            .iter()
            .find(|(e, _)| e.id == id)
            .map(|(e, _)| e.clone()))
    }

    async fn list_by_model(
        &self,
        model_id: Uuid,
        tenant_id: Option<Uuid>,
        locale: Option<&str>,
    ) -> anyhow::Result<Vec<ContentEntry>> {
        Ok(self
            .data
            .read()
            .iter()
            .rev()
            .map(|(e, _)| e)
            .filter(|e| e.model_id == model_id)
            .filter(|e| tenant_id.is_none_or(|tid| e.tenant_id == tid))
            .filter(|e| locale.is_none_or(|l| e.locale.as_deref() == Some(l)))
            .cloned()
            .collect())
    }

    async fn count_by_model(&self, model_id: Uuid) -> anyhow::Result<u64> {
        Ok(self
            .data
            .read()
            .iter()
            .filter(|(e, _)| e.model_id == model_id)
            .count() as u64)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        self.data.write().retain(|(e, _)| e.id != id);
        Ok(())
    }

    async fn delete_by_model(&self, model_id: Uuid) -> anyhow::Result<u64> {
        let mut data = self.data.write();
        let before = data.len();
        data.retain(|(e, _)| e.model_id != model_id);
        Ok((before - data.len()) as u64)
    }

    async fn set_singleton_guard(&self, model_id: Uuid, singleton: bool) -> anyhow::Result<u64> {
        let mut data = self.data.write();
        let rows = data.iter().filter(|(e, _)| e.model_id == model_id).count();
        if singleton && rows > 1 {
            return Err(UniqueViolation {
                constraint: UniqueConstraint::EntrySingleton,
            }
            .into());
        }
        for (entry, guarded) in data.iter_mut() {
            if entry.model_id == model_id {
                *guarded = singleton;
            }
        }
        Ok(rows as u64)
    }
}

// ===== Event capture =====

#[derive(Clone, Default)]
pub struct RecordingPublisher {
    events: Arc<RwLock<Vec<ContentEvent>>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<ContentEvent> {
        self.events.read().clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: ContentEvent) -> anyhow::Result<()> {
        self.events.write().push(event);
        Ok(())
    }
}

/// Publisher whose sink is always down
pub struct FailingPublisher;

#[async_trait]
impl EventPublisher for FailingPublisher {
    async fn publish(&self, _event: ContentEvent) -> anyhow::Result<()> {
        anyhow::bail!("event sink unavailable")
    }
}

// ===== Fixtures =====

pub struct TestContext {
    pub service: Arc<Service>,
    pub tenants: MockTenantRepo,
    pub models: MockModelRepo,
    pub entries: MockEntryRepo,
    pub events: RecordingPublisher,
}

impl TestContext {
    pub fn new() -> Self {
        let tenants = MockTenantRepo::new();
        let models = MockModelRepo::new();
        let entries = MockEntryRepo::new();
        let events = RecordingPublisher::default();

        let service = Arc::new(Service::new(
            Arc::new(tenants.clone()),
            Arc::new(models.clone()),
            Arc::new(entries.clone()),
            Arc::new(events.clone()),
        ));

        Self {
            service,
            tenants,
            models,
            entries,
            events,
        }
    }

    pub async fn tenant(&self, slug: &str) -> Tenant {
        self.service
            .create_tenant(NewTenant {
                slug: slug.to_string(),
                display_name: slug.to_uppercase(),
                metadata: None,
            })
            .await
            .unwrap()
    }

    pub async fn model(&self, new: NewContentModel) -> ContentModel {
        self.service.create_model(new).await.unwrap()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// `post` with a single required TEXT `title`
pub fn post_model(tenant_id: Uuid) -> NewContentModel {
    NewContentModel::new(
        tenant_id,
        "post",
        "Post",
        vec![FieldSchema::new("title", FieldType::Text).required()],
    )
}

/// Localized `novel` model covering most field types
pub fn novel_model(tenant_id: Uuid) -> NewContentModel {
    NewContentModel::new(
        tenant_id,
        "novel",
        "Novel",
        vec![
            FieldSchema::new("title", FieldType::Text).required(),
            FieldSchema::new("isbn", FieldType::Text).unique(),
            FieldSchema::new("synopsis", FieldType::RichText),
            FieldSchema::new("chapters", FieldType::Number).with_default(Value::from(0)),
            FieldSchema::new("completed", FieldType::Boolean),
            FieldSchema::new("published_at", FieldType::Date),
            FieldSchema::new("cover", FieldType::Media),
            FieldSchema::new("author", FieldType::Relation),
            FieldSchema::new("meta", FieldType::Json).with_schema(serde_json::json!({
                "type": "object",
                "properties": { "rating": { "type": "integer", "minimum": 0, "maximum": 5 } },
                "required": ["rating"]
            })),
        ],
    )
    .with_locales(["en", "zh"])
}
