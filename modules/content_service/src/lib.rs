//! Content Service Module
//!
//! Tenant-scoped content models (named, typed field schemas) and content entries
//! validated against them. Entries are normalized by the validation engine before
//! they reach storage.

// Public exports
pub mod contract;
pub use contract::{
    client::ContentApi, error::ContentError, ContentEntry, ContentEntryPatch, ContentModel,
    ContentModelPatch, FieldSchema, FieldType, FieldValues, NewContentModel, NewTenant, Tenant,
    TenantPatch,
};

pub mod config;
pub use config::Config;

pub mod module;
pub use module::ContentServiceModule;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
