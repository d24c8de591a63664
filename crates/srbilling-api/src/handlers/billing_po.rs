//! Billing record handlers
//!
//! HTTP handlers for the dropdown, submit, fetch, update and delete endpoints.

use crate::dto::{ApiResponse, BillingPoRecord, DropDownResponse, RowsAffected};
use actix_web::{web, HttpResponse};
use srbilling_core::models::BillingPo;
use srbilling_core::traits::BillingPoRepository;
use srbilling_core::AppError;
use tracing::{debug, info, instrument, warn};

/// Distinct dropdown values
///
/// GET /dropdown
#[instrument(skip(repo))]
pub async fn fetch_drop_down(
    repo: web::Data<dyn BillingPoRepository>,
) -> Result<HttpResponse, AppError> {
    debug!("Fetching dropdown values");

    let values = repo.fetch_drop_down().await?;
    let response_data: Vec<DropDownResponse> = values.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(response_data)))
}

/// Submit a new billing record
///
/// POST /submit
#[instrument(skip(repo, req), fields(bill_no = %req.bill_no))]
pub async fn submit(
    repo: web::Data<dyn BillingPoRepository>,
    req: web::Json<BillingPoRecord>,
) -> Result<HttpResponse, AppError> {
    let record = BillingPo::from(req.into_inner());
    let created = repo.submit(&record).await?;

    info!(id = created.id, "Billing record submitted successfully");

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        BillingPoRecord::from(created),
        "Billing record submitted successfully",
    )))
}

/// List every billing record
///
/// GET /fetch
#[instrument(skip(repo))]
pub async fn fetch(repo: web::Data<dyn BillingPoRepository>) -> Result<HttpResponse, AppError> {
    let records = repo.fetch_all().await?;
    let response_data: Vec<BillingPoRecord> = records.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(response_data)))
}

/// Overwrite a billing record by identifier
///
/// POST /update
#[instrument(skip(repo, req), fields(id = req.id))]
pub async fn update(
    repo: web::Data<dyn BillingPoRepository>,
    req: web::Json<BillingPoRecord>,
) -> Result<HttpResponse, AppError> {
    let record = BillingPo::from(req.into_inner());
    let rows_affected = repo.update(&record).await?;

    let message = if rows_affected == 0 {
        warn!(id = record.id, "Update matched no billing record");
        "No billing record matched"
    } else {
        info!(id = record.id, "Billing record updated successfully");
        "Billing record updated successfully"
    };

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        RowsAffected { rows_affected },
        message,
    )))
}

/// Delete a billing record by identifier
///
/// POST /delete/{id}
#[instrument(skip(repo))]
pub async fn delete(
    repo: web::Data<dyn BillingPoRepository>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    debug!(id, "Deleting billing record");

    let rows_affected = repo.delete(id).await?;

    let message = if rows_affected == 0 {
        "No billing record matched"
    } else {
        info!(id, "Billing record deleted successfully");
        "Billing record deleted successfully"
    };

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        RowsAffected { rows_affected },
        message,
    )))
}

/// Configure billing record routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    super::extractor_errors(cfg);
    cfg.route("/dropdown", web::get().to(fetch_drop_down))
        .route("/submit", web::post().to(submit))
        .route("/fetch", web::get().to(fetch))
        .route("/update", web::post().to(update))
        .route("/delete/{id}", web::post().to(delete));
}
