//! HTTP surface of the quote service: a single `GET /quote` endpoint.
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use quote_common::net::QUOTE_PATH;
use quote_common::{Deadline, QuoteError, QuoteReply};

use crate::service::QuoteService;

/// Build the router with the service as shared state.
pub fn create_router(service: Arc<QuoteService>) -> Router {
    Router::new()
        .route(QUOTE_PATH, get(quote_handler))
        .with_state(service)
}

async fn quote_handler(State(service): State<Arc<QuoteService>>) -> Result<Json<QuoteReply>, ApiError> {
    // Inbound requests carry no deadline; every hop below sets its own.
    let reply = service.handle(&Deadline::unbounded()).await?;
    Ok(Json(reply))
}

/// Fetch-path failure as seen by the HTTP caller.
///
/// The body never carries error details; those only go to the log.
#[derive(Debug)]
pub struct ApiError(QuoteError);

impl From<QuoteError> for ApiError {
    fn from(err: QuoteError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        if self.0.is_timeout() {
            StatusCode::GATEWAY_TIMEOUT
        } else {
            StatusCode::BAD_GATEWAY
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), "Failed to fetch upstream quote").into_response()
    }
}
