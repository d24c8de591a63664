//! HTTP request handlers

use actix_web::web;
use srbilling_core::AppError;

pub mod billing_po;
pub mod lookup;

pub use billing_po::configure as configure_billing_po;
pub use lookup::configure as configure_lookups;

/// Report malformed JSON bodies and path segments as `invalid_input`
pub(crate) fn extractor_errors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into()),
    );
}
