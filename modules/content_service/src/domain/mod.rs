//! Domain layer - business logic and services

pub mod events;
pub mod repository;
pub mod service;
pub mod validation;

pub use events::{ContentEvent, EventPublisher, NoOpEventPublisher, TracingEventPublisher};
pub use repository::{
    ContentEntryRepository, ContentModelRepository, TenantRepository, UniqueConstraint,
    UniqueViolation,
};
pub use service::Service;
pub use validation::{FieldCheck, FieldValidators, ValidationEngine};
