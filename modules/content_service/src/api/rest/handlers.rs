//! HTTP request handlers - thin layer that delegates to domain service

use super::{
    dto::*,
    error::{map_domain_error, Problem},
};
use crate::domain::Service;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

// ===== Tenant Handlers =====

pub async fn list_tenants(service: Arc<Service>) -> Result<Json<TenantsListResponse>, Problem> {
    let tenants = service.list_tenants().await.map_err(map_domain_error)?;

    let items: Vec<TenantDto> = tenants.into_iter().map(Into::into).collect();
    let total = items.len();

    Ok(Json(TenantsListResponse { items, total }))
}

pub async fn create_tenant(
    service: Arc<Service>,
    Json(req): Json<CreateTenantRequest>,
) -> Result<(StatusCode, Json<TenantDto>), Problem> {
    let tenant = service
        .create_tenant(req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(tenant.into())))
}

pub async fn get_tenant(
    service: Arc<Service>,
    Path(tenant_id): Path<Uuid>,
) -> Result<Json<TenantDto>, Problem> {
    let tenant = service
        .get_tenant(tenant_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(tenant.into()))
}

pub async fn update_tenant(
    service: Arc<Service>,
    Path(tenant_id): Path<Uuid>,
    Json(req): Json<UpdateTenantRequest>,
) -> Result<Json<TenantDto>, Problem> {
    let tenant = service
        .update_tenant(tenant_id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(tenant.into()))
}

pub async fn delete_tenant(
    service: Arc<Service>,
    Path(tenant_id): Path<Uuid>,
) -> Result<StatusCode, Problem> {
    service
        .delete_tenant(tenant_id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Content Model Handlers =====

/// Query parameters for listing content models
#[derive(Debug, Deserialize)]
pub struct ListModelsQuery {
    /// Filter by tenant ID
    pub tenant_id: Option<Uuid>,
}

pub async fn list_models(
    service: Arc<Service>,
    Query(query): Query<ListModelsQuery>,
) -> Result<Json<ContentModelsListResponse>, Problem> {
    let models = service
        .list_models(query.tenant_id)
        .await
        .map_err(map_domain_error)?;

    let items: Vec<ContentModelDto> = models.into_iter().map(Into::into).collect();
    let total = items.len();

    Ok(Json(ContentModelsListResponse { items, total }))
}

pub async fn create_model(
    service: Arc<Service>,
    Json(req): Json<CreateContentModelRequest>,
) -> Result<(StatusCode, Json<ContentModelDto>), Problem> {
    let model = service
        .create_model(req.into())
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(model.into())))
}

/// `model` is either a model id or an api name
pub async fn get_model(
    service: Arc<Service>,
    Path(model): Path<String>,
) -> Result<Json<ContentModelDto>, Problem> {
    let model = service.find_model(&model).await.map_err(map_domain_error)?;

    Ok(Json(model.into()))
}

pub async fn update_model(
    service: Arc<Service>,
    Path(model): Path<String>,
    Json(req): Json<UpdateContentModelRequest>,
) -> Result<Json<ContentModelDto>, Problem> {
    let model = service
        .update_model(&model, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(model.into()))
}

pub async fn delete_model(
    service: Arc<Service>,
    Path(model): Path<String>,
) -> Result<StatusCode, Problem> {
    service
        .delete_model(&model)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Content Entry Handlers =====

/// Query parameters for listing entries
#[derive(Debug, Deserialize)]
pub struct ListEntriesQuery {
    pub locale: Option<String>,
}

pub async fn list_entries(
    service: Arc<Service>,
    Path((tenant_id, model)): Path<(Uuid, String)>,
    Query(query): Query<ListEntriesQuery>,
) -> Result<Json<ContentEntriesListResponse>, Problem> {
    let entries = service
        .list_entries(tenant_id, &model, query.locale.as_deref())
        .await
        .map_err(map_domain_error)?;

    let items: Vec<ContentEntryDto> = entries.into_iter().map(Into::into).collect();
    let total = items.len();

    Ok(Json(ContentEntriesListResponse { items, total }))
}

pub async fn create_entry(
    service: Arc<Service>,
    Path((tenant_id, model)): Path<(Uuid, String)>,
    Json(req): Json<EntryValuesRequest>,
) -> Result<(StatusCode, Json<ContentEntryDto>), Problem> {
    let entry = service
        .create_entry(tenant_id, &model, req.values, req.locale)
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(entry.into())))
}

/// Validate-only: returns the normalized values without storing anything
pub async fn validate_entry(
    service: Arc<Service>,
    Path((tenant_id, model)): Path<(Uuid, String)>,
    Json(req): Json<EntryValuesRequest>,
) -> Result<Json<ValidationResponse>, Problem> {
    let values = service
        .validate_entry(tenant_id, &model, &req.values, req.locale.as_deref())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(ValidationResponse { values }))
}

pub async fn get_entry(
    service: Arc<Service>,
    Path((tenant_id, entry_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ContentEntryDto>, Problem> {
    let entry = service
        .get_entry(tenant_id, entry_id)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(entry.into()))
}

pub async fn update_entry(
    service: Arc<Service>,
    Path((tenant_id, entry_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<EntryValuesRequest>,
) -> Result<Json<ContentEntryDto>, Problem> {
    let entry = service
        .update_entry(tenant_id, entry_id, req.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(entry.into()))
}

pub async fn delete_entry(
    service: Arc<Service>,
    Path((tenant_id, entry_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, Problem> {
    service
        .delete_entry(tenant_id, entry_id)
        .await
        .map_err(map_domain_error)?;

    Ok(StatusCode::NO_CONTENT)
}
