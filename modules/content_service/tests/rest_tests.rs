//! REST surface: routing, DTO shapes and problem-details mapping

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use content_service::api::rest::router;
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;
use common::{print_json, print_test_header, TestContext};

fn app(ctx: &TestContext) -> Router {
    router(ctx.service.clone())
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_tenant(app: &Router, slug: &str) -> String {
    let (status, body) = call(
        app,
        Method::POST,
        "/tenants",
        Some(json!({ "slug": slug, "display_name": slug })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn create_post_model(app: &Router, tenant_id: &str) {
    let (status, body) = call(
        app,
        Method::POST,
        "/content-models",
        Some(json!({
            "tenant_id": tenant_id,
            "api_name": "post",
            "display_name": "Post",
            "fields": [
                { "key": "title", "type": "TEXT", "required": true },
                { "key": "views", "type": "NUMBER", "default_value": 0 }
            ],
            "locales": ["en", "zh"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
}

#[tokio::test]
async fn test_model_and_entry_flow() {
    print_test_header(
        "test_model_and_entry_flow",
        &["Tenants, models and entries round-trip through the HTTP surface"],
    );
    let ctx = TestContext::new();
    let app = app(&ctx);

    let tenant_id = create_tenant(&app, "acme").await;
    create_post_model(&app, &tenant_id).await;

    let (status, model) = call(&app, Method::GET, "/content-models/post", None).await;
    assert_eq!(status, StatusCode::OK);
    print_json("model", &model);
    assert_eq!(model["fields"][0]["type"], "TEXT");
    assert_eq!(model["fields"][0]["display_name"], "title");
    assert_eq!(model["locales"], json!(["en", "zh"]));

    let (status, validated) = call(
        &app,
        Method::POST,
        &format!("/tenants/{}/models/post/validate", tenant_id),
        Some(json!({ "values": { "title": "Hello" }, "locale": "en" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(validated["values"], json!({ "title": "Hello", "views": 0 }));

    let (status, entry) = call(
        &app,
        Method::POST,
        &format!("/tenants/{}/models/post/entries", tenant_id),
        Some(json!({ "values": { "title": "Hello" }, "locale": "en" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let entry_id = entry["id"].as_str().unwrap().to_string();

    let (status, patched) = call(
        &app,
        Method::PATCH,
        &format!("/tenants/{}/entries/{}", tenant_id, entry_id),
        Some(json!({ "values": { "views": 7 } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["values"], json!({ "title": "Hello", "views": 7 }));
    assert_eq!(patched["locale"], "en");

    let (status, listed) = call(
        &app,
        Method::GET,
        &format!("/tenants/{}/models/post/entries?locale=en", tenant_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["total"], 1);

    let (status, _) = call(
        &app,
        Method::DELETE,
        &format!("/tenants/{}/entries/{}", tenant_id, entry_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = call(&app, Method::DELETE, "/content-models/post", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_error_statuses_and_codes() {
    print_test_header(
        "test_error_statuses_and_codes",
        &["Domain errors become problem details with a stable code"],
    );
    let ctx = TestContext::new();
    let app = app(&ctx);
    let tenant_id = create_tenant(&app, "acme").await;
    create_post_model(&app, &tenant_id).await;
    let entries = format!("/tenants/{}/models/post/entries", tenant_id);

    let cases = [
        (
            json!({ "values": {}, "locale": "en" }),
            StatusCode::BAD_REQUEST,
            "required_field",
        ),
        (
            json!({ "values": { "title": 1 }, "locale": "en" }),
            StatusCode::BAD_REQUEST,
            "type_mismatch",
        ),
        (
            json!({ "values": { "title": "a", "extra": 1 }, "locale": "en" }),
            StatusCode::BAD_REQUEST,
            "unknown_field",
        ),
        (
            json!({ "values": { "title": "a" }, "locale": "fr" }),
            StatusCode::BAD_REQUEST,
            "invalid_locale",
        ),
    ];

    for (payload, status, code) in cases {
        let (actual, problem) = call(&app, Method::POST, &entries, Some(payload)).await;
        print_json("problem", &problem);
        assert_eq!(actual, status);
        assert_eq!(problem["code"], code);
        assert_eq!(problem["status"], status.as_u16());
    }

    let (status, problem) = call(
        &app,
        Method::POST,
        "/content-models",
        Some(json!({
            "tenant_id": tenant_id,
            "api_name": "post",
            "display_name": "Again",
            "fields": []
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(problem["code"], "api_name_taken");

    let (status, problem) = call(&app, Method::GET, "/content-models/nothing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(problem["code"], "not_found");

    let (status, _) = call(
        &app,
        Method::PATCH,
        &format!("/tenants/{}", tenant_id),
        Some(json!({ "active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, problem) = call(
        &app,
        Method::POST,
        &entries,
        Some(json!({ "values": { "title": "a" }, "locale": "en" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(problem["code"], "tenant_disabled");
}

#[tokio::test]
async fn test_unknown_field_type_is_rejected() {
    let ctx = TestContext::new();
    let app = app(&ctx);
    let tenant_id = create_tenant(&app, "acme").await;

    let (status, _) = call(
        &app,
        Method::POST,
        "/content-models",
        Some(json!({
            "tenant_id": tenant_id,
            "api_name": "post",
            "display_name": "Post",
            "fields": [{ "key": "title", "type": "STRING" }]
        })),
    )
    .await;
    assert!(status.is_client_error());
    assert_eq!(ctx.models.count(), 0);
}

#[tokio::test]
async fn test_openapi_document() {
    let ctx = TestContext::new();
    let (status, doc) = call(&app(&ctx), Method::GET, "/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["components"]["schemas"]["ContentModelDto"].is_object());
    assert!(doc["components"]["schemas"]["FieldTypeDto"].is_object());
}
