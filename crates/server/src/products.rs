//! JSON API routes for the product catalog.
//!
//! Endpoints:
//! - `GET /api/v1/products`      — list products, optionally filtered by
//!   `title` (case-insensitive substring), `slug` (exact), `minPrice` and
//!   `maxPrice` (inclusive bounds)
//! - `GET /api/v1/products/{id}` — fetch a single product by id

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use shopfront_core::{Catalog, CatalogError, FilterMode, Product, RawProductFilter};
use tracing::{info, warn};

#[derive(Clone)]
pub struct ApiState {
    pub catalog: Arc<Catalog>,
    pub filter_mode: FilterMode,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    pub title: Option<String>,
    pub slug: Option<String>,
    #[serde(rename = "minPrice")]
    pub min_price: Option<String>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct ProductDetailResponse {
    pub success: bool,
    pub data: Product,
}

#[derive(Debug, Serialize)]
pub struct ApiFault {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiFault {
    fn client(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into(), error: None }
    }

    fn server(detail: impl Into<String>) -> Self {
        Self { success: false, message: "Server error".to_string(), error: Some(detail.into()) }
    }
}

pub fn router(catalog: Arc<Catalog>, filter_mode: FilterMode) -> Router {
    Router::new()
        .route("/api/v1/products", get(list_products))
        .route("/api/v1/products/{id}", get(get_product))
        .with_state(ApiState { catalog, filter_mode })
}

async fn list_products(
    State(state): State<ApiState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<ProductListResponse>, (StatusCode, Json<ApiFault>)> {
    let raw = RawProductFilter {
        title: query.title,
        slug: query.slug,
        min_price: query.min_price,
        max_price: query.max_price,
    };

    let filter = raw.resolve(state.filter_mode).map_err(|error| {
        warn!(event_name = "catalog.list.rejected", error = %error, "filter parameters rejected");
        (StatusCode::BAD_REQUEST, Json(ApiFault::client(error.to_string())))
    })?;

    let data: Vec<Product> = state.catalog.search(&filter).into_iter().cloned().collect();
    info!(event_name = "catalog.list.served", count = data.len(), "list query served");

    Ok(Json(ProductListResponse { success: true, count: data.len(), data }))
}

async fn get_product(
    State(state): State<ApiState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ProductDetailResponse>, (StatusCode, Json<ApiFault>)> {
    match state.catalog.get(&raw_id) {
        Ok(product) => {
            info!(event_name = "catalog.detail.served", product_id = %product.id, "detail query served");
            Ok(Json(ProductDetailResponse { success: true, data: product.clone() }))
        }
        Err(CatalogError::InvalidId(_)) => {
            Err((StatusCode::BAD_REQUEST, Json(ApiFault::client("Invalid product ID"))))
        }
        Err(CatalogError::NotFound(id)) => {
            info!(event_name = "catalog.detail.missing", product_id = %id, "detail query missed");
            Err((StatusCode::NOT_FOUND, Json(ApiFault::client("Product not found"))))
        }
        Err(error) => {
            warn!(event_name = "catalog.detail.failed", error = %error, "detail query failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(ApiFault::server(error.to_string()))))
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use rust_decimal::Decimal;
    use serde_json::json;
    use tower::util::ServiceExt;

    use super::*;

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::from_embedded_seed().expect("embedded seed should load"))
    }

    fn state(filter_mode: FilterMode) -> State<ApiState> {
        State(ApiState { catalog: catalog(), filter_mode })
    }

    fn query(
        title: Option<&str>,
        slug: Option<&str>,
        min: Option<&str>,
        max: Option<&str>,
    ) -> Query<ListProductsQuery> {
        Query(ListProductsQuery {
            title: title.map(str::to_string),
            slug: slug.map(str::to_string),
            min_price: min.map(str::to_string),
            max_price: max.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn list_without_filters_returns_the_whole_catalog() {
        let Json(payload) = list_products(state(FilterMode::Permissive), query(None, None, None, None))
            .await
            .expect("should succeed");

        assert!(payload.success);
        assert_eq!(payload.count, 7);
        assert_eq!(payload.count, payload.data.len());
        let ids: Vec<i64> = payload.data.iter().map(|p| p.id.value()).collect();
        assert_eq!(ids, vec![3, 6, 18, 22, 28, 35, 45]);
    }

    #[tokio::test]
    async fn list_filters_by_title_case_insensitively() {
        let Json(payload) =
            list_products(state(FilterMode::Permissive), query(Some("WIRELESS"), None, None, None))
                .await
                .expect("should succeed");

        assert_eq!(payload.count, 2);
        assert!(payload.data.iter().all(|p| p.title.to_lowercase().contains("wireless")));
    }

    #[tokio::test]
    async fn list_filters_by_price_range_inclusively() {
        let Json(payload) =
            list_products(state(FilterMode::Permissive), query(None, None, Some("25"), Some("69")))
                .await
                .expect("should succeed");

        let ids: Vec<i64> = payload.data.iter().map(|p| p.id.value()).collect();
        assert_eq!(ids, vec![3, 6, 18, 28, 35]);
        assert!(payload.data.iter().any(|p| p.price == Decimal::from(25)));
        assert!(payload.data.iter().any(|p| p.price == Decimal::from(69)));
    }

    #[tokio::test]
    async fn list_ignores_malformed_bounds_in_permissive_mode() {
        let Json(payload) = list_products(
            state(FilterMode::Permissive),
            query(None, None, Some("cheap"), Some("$100")),
        )
        .await
        .expect("malformed bounds should be dropped, not rejected");

        assert_eq!(payload.count, 7);
    }

    #[tokio::test]
    async fn list_rejects_malformed_bounds_in_strict_mode() {
        let result =
            list_products(state(FilterMode::Strict), query(None, None, Some("cheap"), None)).await;

        let (status, Json(fault)) = result.expect_err("strict mode should reject");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!fault.success);
        assert!(fault.message.contains("minPrice"));
    }

    #[tokio::test]
    async fn get_returns_the_full_record_for_a_known_id() {
        let Json(payload) = get_product(state(FilterMode::Permissive), Path("3".to_string()))
            .await
            .expect("should succeed");

        assert!(payload.success);
        assert_eq!(payload.data.slug, "classic-heather-gray-hoodie");
        assert_eq!(payload.data.price, Decimal::from(69));
        assert_eq!(payload.data.category.slug, "clothes");
    }

    #[tokio::test]
    async fn get_maps_non_numeric_ids_to_bad_request() {
        let result = get_product(state(FilterMode::Permissive), Path("abc".to_string())).await;

        let (status, Json(fault)) = result.expect_err("should fail");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(fault.message, "Invalid product ID");
        assert!(fault.error.is_none());
    }

    #[tokio::test]
    async fn get_maps_unknown_ids_to_not_found() {
        let result = get_product(state(FilterMode::Permissive), Path("9999".to_string())).await;

        let (status, Json(fault)) = result.expect_err("should fail");
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(fault.message, "Product not found");
    }

    async fn fetch_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = router(catalog(), FilterMode::Permissive);
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        (status, serde_json::from_slice(&bytes).expect("json payload"))
    }

    #[tokio::test]
    async fn list_endpoint_speaks_the_documented_wire_contract() {
        let (status, payload) = fetch_json("/api/v1/products?slug=classic-heather-gray-hoodie").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["success"], json!(true));
        assert_eq!(payload["count"], json!(1));
        assert_eq!(payload["data"][0]["id"], json!(3));
        assert_eq!(payload["data"][0]["price"], json!(69.0));
        assert_eq!(payload["data"][0]["category"]["name"], json!("Clothes"));
    }

    #[tokio::test]
    async fn list_endpoint_returns_empty_data_and_zero_count_for_unknown_slug() {
        let (status, payload) = fetch_json("/api/v1/products?slug=no-such-slug").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["count"], json!(0));
        assert_eq!(payload["data"], json!([]));
    }

    #[tokio::test]
    async fn detail_endpoint_speaks_the_documented_wire_contract() {
        let (status, payload) = fetch_json("/api/v1/products/22").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["success"], json!(true));
        assert_eq!(payload["data"]["slug"], json!("sleek-wireless-computer-mouse"));
        assert_eq!(payload["data"]["category"]["id"], json!(2));
    }

    #[tokio::test]
    async fn detail_endpoint_maps_errors_to_the_documented_payloads() {
        let (status, payload) = fetch_json("/api/v1/products/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload, json!({ "success": false, "message": "Invalid product ID" }));

        let (status, payload) = fetch_json("/api/v1/products/9999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(payload, json!({ "success": false, "message": "Product not found" }));
    }
}
