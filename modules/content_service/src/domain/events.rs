//! Domain events for content service
//!
//! Events are published after every successful model or entry mutation.
//! Publishers forward them to external automation (webhooks, queues);
//! a failed publish never fails the mutation.

use crate::contract::{ContentEntry, ContentModel, FieldValues};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain event types for content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum ContentEvent {
    ModelCreated(ModelChangedEvent),
    ModelUpdated(ModelChangedEvent),
    ModelDeleted(ModelChangedEvent),
    EntryCreated(EntryChangedEvent),
    EntryUpdated(EntryChangedEvent),
    EntryDeleted(EntryChangedEvent),
}

/// Event data for content model changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelChangedEvent {
    pub model_id: Uuid,
    pub tenant_id: Uuid,
    pub api_name: String,
    pub timestamp: DateTime<Utc>,
}

/// Event data for content entry changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryChangedEvent {
    pub entry_id: Uuid,
    pub tenant_id: Uuid,
    pub model_id: Uuid,
    /// Api name of the owning model
    pub model: String,
    pub locale: Option<String>,
    /// Entry values; empty for deletions
    pub values: FieldValues,
    pub timestamp: DateTime<Utc>,
}

impl ContentEvent {
    pub fn model_created(model: &ContentModel) -> Self {
        ContentEvent::ModelCreated(ModelChangedEvent::from(model))
    }

    pub fn model_updated(model: &ContentModel) -> Self {
        ContentEvent::ModelUpdated(ModelChangedEvent::from(model))
    }

    pub fn model_deleted(model: &ContentModel) -> Self {
        ContentEvent::ModelDeleted(ModelChangedEvent::from(model))
    }

    pub fn entry_created(entry: &ContentEntry, model: &ContentModel) -> Self {
        ContentEvent::EntryCreated(EntryChangedEvent::new(entry, model, true))
    }

    pub fn entry_updated(entry: &ContentEntry, model: &ContentModel) -> Self {
        ContentEvent::EntryUpdated(EntryChangedEvent::new(entry, model, true))
    }

    pub fn entry_deleted(entry: &ContentEntry, model: &ContentModel) -> Self {
        ContentEvent::EntryDeleted(EntryChangedEvent::new(entry, model, false))
    }

    pub fn tenant_id(&self) -> Uuid {
        match self {
            ContentEvent::ModelCreated(e)
            | ContentEvent::ModelUpdated(e)
            | ContentEvent::ModelDeleted(e) => e.tenant_id,
            ContentEvent::EntryCreated(e)
            | ContentEvent::EntryUpdated(e)
            | ContentEvent::EntryDeleted(e) => e.tenant_id,
        }
    }
}

impl From<&ContentModel> for ModelChangedEvent {
    fn from(model: &ContentModel) -> Self {
        Self {
            model_id: model.id,
            tenant_id: model.tenant_id,
            api_name: model.api_name.clone(),
            timestamp: Utc::now(),
        }
    }
}

impl EntryChangedEvent {
    fn new(entry: &ContentEntry, model: &ContentModel, with_values: bool) -> Self {
        Self {
            entry_id: entry.id,
            tenant_id: entry.tenant_id,
            model_id: model.id,
            model: model.api_name.clone(),
            locale: entry.locale.clone(),
            values: if with_values {
                entry.values.clone()
            } else {
                FieldValues::new()
            },
            timestamp: Utc::now(),
        }
    }
}

/// Event publisher trait for publishing domain events
#[async_trait::async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: ContentEvent) -> anyhow::Result<()>;
}

/// No-op event publisher for testing or when events are disabled
pub struct NoOpEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: ContentEvent) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Publisher that writes every event to the log as JSON
pub struct TracingEventPublisher;

#[async_trait::async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: ContentEvent) -> anyhow::Result<()> {
        let payload = serde_json::to_string(&event)?;
        tracing::info!(target: "content_events", tenant_id = %event.tenant_id(), %payload, "content event");
        Ok(())
    }
}
