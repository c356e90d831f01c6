//! Invoice routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, patch, post},
};
use barrkeh_core::invoice::{Invoice, InvoiceStatus, NewInvoice, render_invoice_text};
use barrkeh_shared::types::InvoiceId;
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    error::{ApiError, ApiResult},
};

/// Creates the invoice routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/invoices", get(list_invoices).post(issue_invoice))
        .route("/invoices/mark-overdue", post(mark_overdue))
        .route("/invoices/{invoice_id}", get(get_invoice))
        .route("/invoices/{invoice_id}/status", patch(update_status))
        .route("/invoices/{invoice_id}/text", get(get_invoice_text))
}

/// Request body for a status change.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// Target status.
    pub status: InvoiceStatus,
}

/// Invoices moved to overdue.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkOverdueResponse {
    /// Affected invoices.
    pub invoice_ids: Vec<InvoiceId>,
}

/// GET `/invoices`.
async fn list_invoices(State(state): State<AppState>) -> Json<Vec<Invoice>> {
    Json(state.book.snapshot().await.invoices.clone())
}

/// POST `/invoices` - Issue an invoice with its posting, debtor row and
/// document.
async fn issue_invoice(
    State(state): State<AppState>,
    Json(input): Json<NewInvoice>,
) -> ApiResult<impl IntoResponse> {
    let invoice = state.book.issue_invoice(input).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

/// GET `/invoices/{invoice_id}`.
async fn get_invoice(
    State(state): State<AppState>,
    Path(invoice_id): Path<InvoiceId>,
) -> ApiResult<Json<Invoice>> {
    let snapshot = state.book.snapshot().await;
    let invoice = snapshot
        .invoice(invoice_id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("invoice", invoice_id))?;
    Ok(Json(invoice))
}

/// PATCH `/invoices/{invoice_id}/status`.
async fn update_status(
    State(state): State<AppState>,
    Path(invoice_id): Path<InvoiceId>,
    Json(body): Json<UpdateStatusRequest>,
) -> ApiResult<Json<Invoice>> {
    let (today, now) = (state.book.today(), state.book.clock().now());
    let invoice = state
        .book
        .write("update_invoice_status", |s| {
            s.update_invoice_status(invoice_id, body.status, today, now)
        })
        .await?;
    Ok(Json(invoice))
}

/// POST `/invoices/mark-overdue` - Sent invoices past their due date.
async fn mark_overdue(State(state): State<AppState>) -> ApiResult<Json<MarkOverdueResponse>> {
    let today = state.book.today();
    let invoice_ids = state
        .book
        .write("mark_overdue", |s| Ok(s.mark_overdue(today)))
        .await?;
    Ok(Json(MarkOverdueResponse { invoice_ids }))
}

/// GET `/invoices/{invoice_id}/text` - Plain-text export.
async fn get_invoice_text(
    State(state): State<AppState>,
    Path(invoice_id): Path<InvoiceId>,
) -> ApiResult<impl IntoResponse> {
    let snapshot = state.book.snapshot().await;
    let invoice = snapshot
        .invoice(invoice_id)
        .ok_or_else(|| ApiError::not_found("invoice", invoice_id))?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_invoice_text(invoice),
    ))
}
