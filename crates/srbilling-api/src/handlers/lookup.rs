//! Lookup table handlers
//!
//! Customer names and units must be registered here before a billing record
//! can reference them.

use crate::dto::{ApiResponse, LookupValueAdded, LookupValueRequest, LookupValuesResponse};
use actix_web::{web, HttpResponse};
use srbilling_core::models::LookupTable;
use srbilling_core::traits::LookupRepository;
use srbilling_core::AppError;
use tracing::{info, instrument};

fn parse_table(name: &str) -> Result<LookupTable, AppError> {
    LookupTable::from_str(name)
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown lookup table: {}", name)))
}

/// List the values of one lookup table
///
/// GET /lookup/{table}
#[instrument(skip(repo))]
pub async fn list_values(
    repo: web::Data<dyn LookupRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let table = parse_table(&path.into_inner())?;
    let values = repo.list_lookup_values(table).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(LookupValuesResponse {
        table: table.to_string(),
        values,
    })))
}

/// Register a value in one lookup table
///
/// POST /lookup/{table}
#[instrument(skip(repo, req))]
pub async fn add_value(
    repo: web::Data<dyn LookupRepository>,
    path: web::Path<String>,
    req: web::Json<LookupValueRequest>,
) -> Result<HttpResponse, AppError> {
    let table = parse_table(&path.into_inner())?;
    let value = req.into_inner().value.trim().to_string();
    if value.is_empty() {
        return Err(AppError::InvalidInput("Lookup value is empty".to_string()));
    }

    let created = repo.add_lookup_value(table, &value).await?;
    let body = LookupValueAdded {
        table: table.to_string(),
        value,
        created,
    };

    if created {
        info!(%table, "Lookup value created");
        Ok(HttpResponse::Created().json(ApiResponse::success(body)))
    } else {
        Ok(HttpResponse::Ok().json(ApiResponse::with_message(body, "Value already registered")))
    }
}

/// Configure lookup routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    super::extractor_errors(cfg);
    cfg.service(
        web::scope("/lookup")
            .route("/{table}", web::get().to(list_values))
            .route("/{table}", web::post().to(add_value)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table() {
        assert_eq!(parse_table("unit").unwrap(), LookupTable::Unit);
        let err = parse_table("warehouse").unwrap_err();
        assert_eq!(err.error_code(), "invalid_input");
    }
}
