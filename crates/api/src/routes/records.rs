//! Supporting records: documents, contacts, fixed assets and import jobs.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use barrkeh_core::contacts::{Customer, NewCustomer, NewSupplier, Supplier};
use barrkeh_core::documents::{Document, NewDocument};
use barrkeh_core::fixed_assets::{AssetItem, NewAsset};
use barrkeh_core::imports::{ImportJob, ImportType};
use barrkeh_shared::types::{AssetItemId, DocumentId, ImportJobId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiResult};

/// Creates the record routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/documents", get(list_documents).post(add_document))
        .route("/documents/{document_id}", delete(delete_document))
        .route("/suppliers", get(list_suppliers).post(add_supplier))
        .route("/customers", get(list_customers).post(add_customer))
        .route("/assets", get(list_assets).post(add_asset))
        .route("/assets/{asset_id}/dispose", post(dispose_asset))
        .route("/imports", get(list_imports).post(create_import))
        .route("/imports/{job_id}/complete", post(complete_import))
}

/// An asset with its depreciation as of today.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetView {
    /// The stored asset.
    #[serde(flatten)]
    pub asset: AssetItem,
    /// Straight-line depreciation per year.
    pub annual_depreciation: Decimal,
    /// Book value today.
    pub book_value: Decimal,
}

/// Request body for disposing of an asset.
#[derive(Debug, Deserialize)]
pub struct DisposeRequest {
    /// Disposal date.
    pub date: NaiveDate,
}

/// Request body for a new import job.
#[derive(Debug, Deserialize)]
pub struct CreateImportRequest {
    /// Statement format.
    #[serde(rename = "type")]
    pub job_type: ImportType,
    /// Human-readable description.
    #[serde(default)]
    pub summary: Option<String>,
}

/// Request body for completing an import job.
#[derive(Debug, Deserialize)]
pub struct CompleteImportRequest {
    /// Human-readable outcome.
    #[serde(default)]
    pub summary: Option<String>,
    /// Problems found; any entry fails the job.
    #[serde(default)]
    pub errors: Vec<String>,
}

async fn list_documents(State(state): State<AppState>) -> Json<Vec<Document>> {
    Json(state.book.snapshot().await.documents.clone())
}

async fn add_document(
    State(state): State<AppState>,
    Json(input): Json<NewDocument>,
) -> ApiResult<impl IntoResponse> {
    let now = state.book.clock().now();
    let document = state
        .book
        .write("add_document", |s| s.add_document(input, now))
        .await?;
    Ok((StatusCode::CREATED, Json(document)))
}

async fn delete_document(
    State(state): State<AppState>,
    Path(document_id): Path<DocumentId>,
) -> ApiResult<StatusCode> {
    state
        .book
        .write("delete_document", |s| s.delete_document(document_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_suppliers(State(state): State<AppState>) -> Json<Vec<Supplier>> {
    Json(state.book.snapshot().await.suppliers.clone())
}

async fn add_supplier(
    State(state): State<AppState>,
    Json(input): Json<NewSupplier>,
) -> ApiResult<impl IntoResponse> {
    let supplier = state
        .book
        .write("add_supplier", |s| s.add_supplier(input))
        .await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

async fn list_customers(State(state): State<AppState>) -> Json<Vec<Customer>> {
    Json(state.book.snapshot().await.customers.clone())
}

async fn add_customer(
    State(state): State<AppState>,
    Json(input): Json<NewCustomer>,
) -> ApiResult<impl IntoResponse> {
    let customer = state
        .book
        .write("add_customer", |s| s.add_customer(input))
        .await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// GET `/assets` - Assets with today's book value.
async fn list_assets(State(state): State<AppState>) -> Json<Vec<AssetView>> {
    let today = state.book.today();
    let snapshot = state.book.snapshot().await;
    Json(
        snapshot
            .assets
            .iter()
            .map(|asset| AssetView {
                annual_depreciation: asset.annual_depreciation(),
                book_value: asset.book_value(today),
                asset: asset.clone(),
            })
            .collect(),
    )
}

async fn add_asset(
    State(state): State<AppState>,
    Json(input): Json<NewAsset>,
) -> ApiResult<impl IntoResponse> {
    let asset = state
        .book
        .write("add_asset", |s| s.add_asset(input))
        .await?;
    Ok((StatusCode::CREATED, Json(asset)))
}

async fn dispose_asset(
    State(state): State<AppState>,
    Path(asset_id): Path<AssetItemId>,
    Json(body): Json<DisposeRequest>,
) -> ApiResult<Json<AssetItem>> {
    let asset = state
        .book
        .write("dispose_asset", |s| s.dispose_asset(asset_id, body.date))
        .await?;
    Ok(Json(asset))
}

async fn list_imports(State(state): State<AppState>) -> Json<Vec<ImportJob>> {
    Json(state.book.snapshot().await.import_jobs.clone())
}

/// POST `/imports` - Register a pending job.
async fn create_import(
    State(state): State<AppState>,
    Json(body): Json<CreateImportRequest>,
) -> ApiResult<impl IntoResponse> {
    let now = state.book.clock().now();
    let job = state
        .book
        .write("add_import_job", |s| {
            Ok(s.add_import_job(body.job_type, body.summary, now))
        })
        .await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// POST `/imports/{job_id}/complete` - Report the outcome of a job.
async fn complete_import(
    State(state): State<AppState>,
    Path(job_id): Path<ImportJobId>,
    Json(body): Json<CompleteImportRequest>,
) -> ApiResult<Json<ImportJob>> {
    let now = state.book.clock().now();
    let job = state
        .book
        .write("complete_import_job", |s| {
            s.complete_import_job(job_id, body.summary, body.errors, now)
        })
        .await?;
    Ok(Json(job))
}
