//! Product endpoints
//!
//! - `POST   /products`      create (201)
//! - `GET    /products`      paginated list
//! - `GET    /products/{id}` fetch one
//! - `PUT    /products/{id}` full replacement
//! - `DELETE /products/{id}` delete

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidProductId};
use crate::http::server::AppState;
use crate::models::{Pagination, PaginationParams, Product, ProductDraft, ProductPayload};

/// Paginated list response
#[derive(Debug, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub data: Vec<Product>,
    pub total_pages: u32,
    pub current_page: u32,
}

/// Confirmation body for deletes
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /products - list products with pagination
///
/// The query never rejects: repeated keys keep their first value and an
/// undecodable query string falls back to the defaults.
async fn list_products(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<ProductListResponse>, ApiError> {
    let params: PaginationParams = match query {
        Ok(Query(pairs)) => pairs.into_iter().collect(),
        Err(rejection) => {
            tracing::debug!(%rejection, "ignoring undecodable query string");
            PaginationParams::default()
        }
    };
    let pagination = Pagination::from(params);
    let page = state.products.find_all(pagination).await?;
    let total_pages = page.total_pages();

    Ok(Json(ProductListResponse {
        data: page.items,
        total_pages,
        current_page: pagination.page,
    }))
}

/// POST /products - create a new product
async fn create_product(
    State(state): State<Arc<AppState>>,
    ValidJson(payload): ValidJson<ProductPayload>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let draft = ProductDraft::try_from(payload)?;
    let product = state.products.save(draft).await?;

    tracing::info!(id = product.id, "Created product");
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /products/{id} - get a single product
async fn get_product(
    State(state): State<Arc<AppState>>,
    ValidProductId(id): ValidProductId,
) -> Result<Json<Product>, ApiError> {
    let product = state.products.find_by_id(id).await?;
    Ok(Json(product))
}

/// PUT /products/{id} - replace every field of a product
async fn update_product(
    State(state): State<Arc<AppState>>,
    ValidProductId(id): ValidProductId,
    ValidJson(payload): ValidJson<ProductPayload>,
) -> Result<Json<Product>, ApiError> {
    let draft = ProductDraft::try_from(payload)?;
    let product = state.products.update(id, draft).await?;

    tracing::info!(%id, "Updated product");
    Ok(Json(product))
}

/// DELETE /products/{id} - delete a product
async fn delete_product(
    State(state): State<Arc<AppState>>,
    ValidProductId(id): ValidProductId,
) -> Result<Json<MessageResponse>, ApiError> {
    state.products.delete(id).await?;

    tracing::info!(%id, "Deleted product");
    Ok(Json(MessageResponse {
        message: "Product deleted successfully".to_string(),
    }))
}

/// Product routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DbError, MemoryProductRepo, ProductRepository};
    use crate::models::{Page, ProductId};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    /// Repository whose every call fails like a dropped connection
    struct BrokenRepo;

    #[async_trait]
    impl ProductRepository for BrokenRepo {
        async fn save(&self, _: ProductDraft) -> Result<Product, DbError> {
            Err(DbError::Sqlx(sqlx::Error::PoolClosed))
        }
        async fn find_all(&self, _: Pagination) -> Result<Page<Product>, DbError> {
            Err(DbError::Sqlx(sqlx::Error::PoolClosed))
        }
        async fn find_by_id(&self, _: ProductId) -> Result<Product, DbError> {
            Err(DbError::Sqlx(sqlx::Error::PoolClosed))
        }
        async fn update(&self, _: ProductId, _: ProductDraft) -> Result<Product, DbError> {
            Err(DbError::Sqlx(sqlx::Error::PoolClosed))
        }
        async fn delete(&self, _: ProductId) -> Result<(), DbError> {
            Err(DbError::Sqlx(sqlx::Error::PoolClosed))
        }
    }

    fn app_with(repo: Arc<dyn ProductRepository>) -> Router {
        router().with_state(Arc::new(AppState::new(repo)))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn mouse() -> Value {
        json!({"name": "Mouse", "price": 150.75, "amount": 20, "description": "wired"})
    }

    #[tokio::test]
    async fn create_returns_201_with_id() {
        let app = app_with(Arc::new(MemoryProductRepo::new()));

        let (status, body) = send(&app, "POST", "/products", Some(mouse())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 1);
        assert_eq!(body["name"], "Mouse");
        assert_eq!(body["price"], json!(150.75));
        assert_eq!(body["amount"], 20);
        assert_eq!(body["description"], "wired");
    }

    #[tokio::test]
    async fn create_without_description() {
        let app = app_with(Arc::new(MemoryProductRepo::new()));

        let (status, body) = send(
            &app,
            "POST",
            "/products",
            Some(json!({"name": "Pad", "price": 5, "amount": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["description"], Value::Null);
    }

    #[tokio::test]
    async fn create_rejects_invalid_fields_without_saving() {
        let repo = Arc::new(MemoryProductRepo::new());
        let app = app_with(repo.clone());

        let cases = [
            json!({"name": "", "price": 1, "amount": 1}),
            json!({"name": "Mouse", "price": -1, "amount": 1}),
            json!({"name": "Mouse", "price": 1, "amount": -1}),
            json!({"price": 1, "amount": 1}),
            json!({"name": "Mouse", "price": "cheap", "amount": 1}),
            json!({"name": "Mouse", "price": 1, "amount": 3_000_000_000u64}),
        ];

        for case in cases {
            let (status, body) = send(&app, "POST", "/products", Some(case.clone())).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "payload {case}");
            assert_eq!(body["error"], "validation_error");
        }

        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn create_rejects_malformed_json() {
        let app = app_with(Arc::new(MemoryProductRepo::new()));

        let request = Request::builder()
            .method("POST")
            .uri("/products")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let request = Request::builder()
            .method("POST")
            .uri("/products")
            .body(Body::from(mouse().to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_paginates_by_id() {
        let app = app_with(Arc::new(MemoryProductRepo::new()));
        for name in ["first", "second", "third"] {
            let payload = json!({"name": name, "price": 1, "amount": 1});
            send(&app, "POST", "/products", Some(payload)).await;
        }

        let (status, body) = send(&app, "GET", "/products?limit=1&page=2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_pages"], 3);
        assert_eq!(body["current_page"], 2);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["name"], "second");
    }

    #[tokio::test]
    async fn list_defaults_and_clamps() {
        let app = app_with(Arc::new(MemoryProductRepo::new()));

        let (status, body) = send(&app, "GET", "/products", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!([]));
        assert_eq!(body["total_pages"], 0);
        assert_eq!(body["current_page"], 1);

        send(&app, "POST", "/products", Some(mouse())).await;

        let (status, body) = send(&app, "GET", "/products?page=abc&limit=500", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["current_page"], 1);
        assert_eq!(body["total_pages"], 1);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_keeps_first_of_repeated_keys() {
        let app = app_with(Arc::new(MemoryProductRepo::new()));
        for name in ["first", "second", "third"] {
            let payload = json!({"name": name, "price": 1, "amount": 1});
            send(&app, "POST", "/products", Some(payload)).await;
        }

        let (status, body) = send(&app, "GET", "/products?page=1&page=2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["current_page"], 1);
        assert_eq!(body["data"].as_array().unwrap().len(), 3);

        let (status, body) = send(&app, "GET", "/products?limit=1&limit=9&page=3", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_pages"], 3);
        assert_eq!(body["current_page"], 3);
        assert_eq!(body["data"][0]["name"], "third");

        let (status, body) = send(&app, "GET", "/products?page=%ZZ&limit=1.5", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["current_page"], 1);
        assert_eq!(body["data"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn get_update_delete_roundtrip() {
        let app = app_with(Arc::new(MemoryProductRepo::new()));
        let (_, created) = send(&app, "POST", "/products", Some(mouse())).await;
        let uri = format!("/products/{}", created["id"]);

        let (status, fetched) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let update = json!({"name": "Mouse v2", "price": 160, "amount": 15, "description": "wireless"});
        let (status, updated) = send(&app, "PUT", &uri, Some(update)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["id"], created["id"]);
        assert_eq!(updated["name"], "Mouse v2");
        assert_eq!(updated["amount"], 15);

        let (_, refetched) = send(&app, "GET", &uri, None).await;
        assert_eq!(refetched, updated);

        let (status, body) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Product deleted successfully");

        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn missing_product_is_404() {
        let app = app_with(Arc::new(MemoryProductRepo::new()));

        let (status, _) = send(&app, "GET", "/products/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "PUT", "/products/99", Some(mouse())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "DELETE", "/products/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_numeric_id_is_400() {
        let app = app_with(Arc::new(MemoryProductRepo::new()));

        for method in ["GET", "DELETE"] {
            let (status, body) = send(&app, method, "/products/abc", None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "validation_error");
        }

        let (status, _) = send(&app, "PUT", "/products/abc", Some(mouse())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_validates_before_storage() {
        let repo = Arc::new(MemoryProductRepo::new());
        let app = app_with(repo.clone());
        let (_, created) = send(&app, "POST", "/products", Some(mouse())).await;
        let uri = format!("/products/{}", created["id"]);

        let (status, _) = send(
            &app,
            "PUT",
            &uri,
            Some(json!({"name": "Mouse", "price": -5, "amount": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let stored = repo
            .find_by_id(ProductId::new(created["id"].as_i64().unwrap() as i32))
            .await
            .unwrap();
        assert_eq!(stored.price, Decimal::new(15075, 2));
    }

    #[tokio::test]
    async fn storage_failures_are_opaque_500s() {
        let app = app_with(Arc::new(BrokenRepo));

        let requests = [
            ("POST", "/products", Some(mouse())),
            ("GET", "/products", None),
            ("GET", "/products/1", None),
            ("PUT", "/products/1", Some(mouse())),
            ("DELETE", "/products/1", None),
        ];

        for (method, uri, body) in requests {
            let (status, body) = send(&app, method, uri, body).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
            assert_eq!(body["message"], "an internal error occurred");
        }
    }
}
