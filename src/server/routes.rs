//! Route handlers.
//!
//! Handlers never return `Err` to actix: every failure is rendered as the
//! `{ "error": ... }` envelope with the action headers attached.

use super::headers::ActionHeaders;
use super::StakeActionService;
use crate::action::{actions_manifest as manifest, stake_descriptor, ActionError};
use crate::error::StakeActionError;
use crate::keypair::EntropySource;
use crate::rpc::ChainRpc;
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct StakeQuery {
    pub amount: Option<String>,
}

/// GET /stake-action
pub async fn get_stake<R: ChainRpc + 'static, E: EntropySource + 'static>(
    req: HttpRequest,
    service: web::Data<StakeActionService<R, E>>,
) -> HttpResponse {
    let origin = request_origin(&req);
    let descriptor = stake_descriptor(&service.config().action, &origin);
    service.headers().json(StatusCode::OK, &descriptor)
}

/// POST /stake-action?amount=<sol>
pub async fn post_stake<R: ChainRpc + 'static, E: EntropySource + 'static>(
    query: web::Query<StakeQuery>,
    body: Result<web::Bytes, actix_web::Error>,
    service: web::Data<StakeActionService<R, E>>,
) -> HttpResponse {
    let body = match body {
        Ok(body) => body,
        Err(err) => return payload_error(service.headers(), err),
    };
    match service.stake(query.amount.as_deref(), &body).await {
        Ok(response) => service.headers().json(StatusCode::OK, &response),
        Err(err) => error_response(service.headers(), err),
    }
}

/// GET /actions.json
pub async fn actions_manifest<R: ChainRpc + 'static, E: EntropySource + 'static>(
    service: web::Data<StakeActionService<R, E>>,
) -> HttpResponse {
    service.headers().json(StatusCode::OK, &manifest())
}

/// OPTIONS on any action route
pub async fn preflight<R: ChainRpc + 'static, E: EntropySource + 'static>(
    service: web::Data<StakeActionService<R, E>>,
) -> HttpResponse {
    service.headers().response(StatusCode::OK).finish()
}

/// Any method a resource does not route.
pub async fn method_not_allowed<R: ChainRpc + 'static, E: EntropySource + 'static>(
    service: web::Data<StakeActionService<R, E>>,
) -> HttpResponse {
    service.headers().json(
        StatusCode::METHOD_NOT_ALLOWED,
        &ActionError::new("Method not allowed"),
    )
}

/// 400 with the error text for caller mistakes, opaque 500 otherwise.
pub(crate) fn error_response(headers: &ActionHeaders, err: StakeActionError) -> HttpResponse {
    if err.is_client_error() {
        tracing::warn!(error = %err, "rejected stake action request");
        headers.json(StatusCode::BAD_REQUEST, &ActionError::new(err.to_string()))
    } else {
        tracing::error!(error = %err, "failed to build stake transaction");
        headers.json(
            StatusCode::INTERNAL_SERVER_ERROR,
            &ActionError::new("Internal server error"),
        )
    }
}

/// Body extraction failures keep actix's status (413 for oversized bodies).
fn payload_error(headers: &ActionHeaders, err: actix_web::Error) -> HttpResponse {
    let status = err.as_response_error().status_code();
    let err = StakeActionError::InvalidRequestBody(err.to_string());
    tracing::warn!(error = %err, %status, "rejected stake action payload");
    headers.json(status, &ActionError::new(err.to_string()))
}

/// `scheme://host` as seen by the client, honouring `Forwarded` headers.
fn request_origin(req: &HttpRequest) -> String {
    let info = req.connection_info();
    format!("{}://{}", info.scheme(), info.host())
}
