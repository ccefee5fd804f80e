//! Response headers required by Actions clients.
//!
//! Every response, errors and preflight included, carries the same CORS and
//! protocol identification headers.

use actix_web::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_EXPOSE_HEADERS,
};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, HttpResponseBuilder};
use serde::Serialize;

pub const BLOCKCHAIN_IDS_HEADER: &str = "X-Blockchain-Ids";
pub const ACTION_VERSION_HEADER: &str = "X-Action-Version";

const ALLOW_METHODS: &str = "GET,POST,OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, Authorization, Content-Encoding, Accept-Encoding, \
                             X-Accept-Action-Version, X-Accept-Blockchain-Ids";
const EXPOSE_HEADERS: &str = "X-Action-Version, X-Blockchain-Ids";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionHeaders {
    chain_id: String,
    action_version: String,
}

impl ActionHeaders {
    pub fn new(chain_id: impl Into<String>, action_version: impl Into<String>) -> Self {
        Self {
            chain_id: chain_id.into(),
            action_version: action_version.into(),
        }
    }

    /// Response builder with all action headers set.
    pub fn response(&self, status: StatusCode) -> HttpResponseBuilder {
        let mut builder = HttpResponse::build(status);
        builder
            .insert_header((ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
            .insert_header((ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS))
            .insert_header((ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS))
            .insert_header((ACCESS_CONTROL_EXPOSE_HEADERS, EXPOSE_HEADERS))
            .insert_header((BLOCKCHAIN_IDS_HEADER, self.chain_id.clone()))
            .insert_header((ACTION_VERSION_HEADER, self.action_version.clone()));
        builder
    }

    pub fn json<T: Serialize>(&self, status: StatusCode, body: &T) -> HttpResponse {
        self.response(status).json(body)
    }
}
