//! Route registration and OpenAPI document

use super::{dto::*, error::Problem, handlers};
use crate::domain::Service;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use uuid::Uuid;

/// OpenAPI components for the content service REST surface
#[derive(OpenApi)]
#[openapi(
    info(title = "Content Service", description = "Tenant-scoped content models and entries"),
    components(schemas(
        TenantDto,
        CreateTenantRequest,
        UpdateTenantRequest,
        TenantsListResponse,
        FieldTypeDto,
        FieldSchemaDto,
        ContentModelDto,
        CreateContentModelRequest,
        UpdateContentModelRequest,
        ContentModelsListResponse,
        ContentEntryDto,
        EntryValuesRequest,
        ValidationResponse,
        ContentEntriesListResponse,
    )),
    tags((name = "content", description = "Content models and entries"))
)]
pub struct ApiDoc;

/// Build the REST router for the given service
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        // Tenant endpoints
        .route("/tenants", get(list_tenants_handler).post(create_tenant_handler))
        .route(
            "/tenants/{tenant_id}",
            get(get_tenant_handler)
                .patch(update_tenant_handler)
                .delete(delete_tenant_handler),
        )
        // Content model endpoints
        .route("/content-models", get(list_models_handler).post(create_model_handler))
        .route(
            "/content-models/{model}",
            get(get_model_handler)
                .patch(update_model_handler)
                .delete(delete_model_handler),
        )
        // Content entry endpoints
        .route(
            "/tenants/{tenant_id}/models/{model}/entries",
            get(list_entries_handler).post(create_entry_handler),
        )
        .route(
            "/tenants/{tenant_id}/models/{model}/validate",
            axum::routing::post(validate_entry_handler),
        )
        .route(
            "/tenants/{tenant_id}/entries/{entry_id}",
            get(get_entry_handler)
                .patch(update_entry_handler)
                .delete(delete_entry_handler),
        )
        .route("/openapi.json", get(openapi_handler))
        .layer(Extension(service))
        .layer(TraceLayer::new_for_http())
}

async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

// ===== Handler wrappers that extract service from Extension =====

async fn list_tenants_handler(
    Extension(service): Extension<Arc<Service>>,
) -> Result<Json<TenantsListResponse>, Problem> {
    handlers::list_tenants(service).await
}

async fn create_tenant_handler(
    Extension(service): Extension<Arc<Service>>,
    json: Json<CreateTenantRequest>,
) -> Result<(StatusCode, Json<TenantDto>), Problem> {
    handlers::create_tenant(service, json).await
}

async fn get_tenant_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
) -> Result<Json<TenantDto>, Problem> {
    handlers::get_tenant(service, path).await
}

async fn update_tenant_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
    json: Json<UpdateTenantRequest>,
) -> Result<Json<TenantDto>, Problem> {
    handlers::update_tenant(service, path, json).await
}

async fn delete_tenant_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
) -> Result<StatusCode, Problem> {
    handlers::delete_tenant(service, path).await
}

async fn list_models_handler(
    Extension(service): Extension<Arc<Service>>,
    query: Query<handlers::ListModelsQuery>,
) -> Result<Json<ContentModelsListResponse>, Problem> {
    handlers::list_models(service, query).await
}

async fn create_model_handler(
    Extension(service): Extension<Arc<Service>>,
    json: Json<CreateContentModelRequest>,
) -> Result<(StatusCode, Json<ContentModelDto>), Problem> {
    handlers::create_model(service, json).await
}

async fn get_model_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<String>,
) -> Result<Json<ContentModelDto>, Problem> {
    handlers::get_model(service, path).await
}

async fn update_model_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<String>,
    json: Json<UpdateContentModelRequest>,
) -> Result<Json<ContentModelDto>, Problem> {
    handlers::update_model(service, path, json).await
}

async fn delete_model_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<String>,
) -> Result<StatusCode, Problem> {
    handlers::delete_model(service, path).await
}

async fn list_entries_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<(Uuid, String)>,
    query: Query<handlers::ListEntriesQuery>,
) -> Result<Json<ContentEntriesListResponse>, Problem> {
    handlers::list_entries(service, path, query).await
}

async fn create_entry_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<(Uuid, String)>,
    json: Json<EntryValuesRequest>,
) -> Result<(StatusCode, Json<ContentEntryDto>), Problem> {
    handlers::create_entry(service, path, json).await
}

async fn validate_entry_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<(Uuid, String)>,
    json: Json<EntryValuesRequest>,
) -> Result<Json<ValidationResponse>, Problem> {
    handlers::validate_entry(service, path, json).await
}

async fn get_entry_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<(Uuid, Uuid)>,
) -> Result<Json<ContentEntryDto>, Problem> {
    handlers::get_entry(service, path).await
}

async fn update_entry_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<(Uuid, Uuid)>,
    json: Json<EntryValuesRequest>,
) -> Result<Json<ContentEntryDto>, Problem> {
    handlers::update_entry(service, path, json).await
}

async fn delete_entry_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<(Uuid, Uuid)>,
) -> Result<StatusCode, Problem> {
    handlers::delete_entry(service, path).await
}
