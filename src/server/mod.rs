//! HTTP surface (actix-web).
//!
//! [`StakeActionService`] owns the builder and configuration; [`configure`]
//! mounts the action routes on an `App`:
//!
//! ```rust,no_run
//! use actix_web::{web, App, HttpServer};
//! use solana_stake_action::{server, ServiceConfig, StakeActionService};
//!
//! # async fn run() -> std::io::Result<()> {
//! let service = web::Data::new(StakeActionService::from_config(ServiceConfig::default()));
//! HttpServer::new(move || {
//!     let service = service.clone();
//!     App::new().configure(move |cfg| server::configure(cfg, service))
//! })
//! .bind(("127.0.0.1", 3000))?
//! .run()
//! .await
//! # }
//! ```

mod headers;
mod routes;

pub use headers::{ActionHeaders, ACTION_VERSION_HEADER, BLOCKCHAIN_IDS_HEADER};

use crate::action::{
    stake_message, ActionPostRequest, ActionPostResponse, LinkedActionType,
    ACTIONS_MANIFEST_PATH, STAKE_ACTION_PATH,
};
use crate::builder::{parse_sol_amount, StakeTransactionBuilder};
use crate::config::ServiceConfig;
use crate::error::StakeActionError;
use crate::keypair::{EntropySource, OsEntropy};
use crate::rpc::{ChainRpc, SolanaRpc};
use actix_web::http::Method;
use actix_web::web;

/// Amount used when the POST has no `amount` query parameter.
pub const DEFAULT_STAKE_AMOUNT: &str = "1";

/// Shared, read-only state behind every request.
pub struct StakeActionService<R, E = OsEntropy> {
    builder: StakeTransactionBuilder<R, E>,
    config: ServiceConfig,
    headers: ActionHeaders,
}

impl StakeActionService<SolanaRpc> {
    /// Service talking to `config.rpc_url`.
    pub fn from_config(config: ServiceConfig) -> Self {
        let rpc = SolanaRpc::new(config.rpc_url.clone(), config.rpc_timeout);
        let builder = StakeTransactionBuilder::new(rpc, config.stake_account.clone());
        Self::with_builder(builder, config)
    }
}

impl<R: ChainRpc, E: EntropySource> StakeActionService<R, E> {
    pub fn with_builder(builder: StakeTransactionBuilder<R, E>, config: ServiceConfig) -> Self {
        let headers = ActionHeaders::new(config.chain_id(), config.action_version.clone());
        Self {
            builder,
            config,
            headers,
        }
    }

    pub fn builder(&self) -> &StakeTransactionBuilder<R, E> {
        &self.builder
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn headers(&self) -> &ActionHeaders {
        &self.headers
    }

    /// Handle a POST: validate the amount, parse the body, build the transaction.
    ///
    /// The amount is checked first so a bad amount never reaches the network
    /// or the body parser.
    pub async fn stake(
        &self,
        amount: Option<&str>,
        body: &[u8],
    ) -> Result<ActionPostResponse, StakeActionError> {
        let sol_amount = parse_sol_amount(amount.unwrap_or(DEFAULT_STAKE_AMOUNT))?;

        let request: ActionPostRequest = serde_json::from_slice(body)
            .map_err(|e| StakeActionError::InvalidRequestBody(e.to_string()))?;
        let account = request
            .account
            .filter(|account| !account.trim().is_empty())
            .ok_or(StakeActionError::MissingAccount)?;

        let built = self
            .builder
            .build(&account, sol_amount, &self.config.vote_account)
            .await?;

        tracing::info!(
            staker = %account,
            stake_account = %built.stake_account,
            lamports = built.lamports,
            funded_lamports = built.funded_lamports(),
            "built stake transaction"
        );

        Ok(ActionPostResponse {
            kind: LinkedActionType::Transaction,
            transaction: built.to_base64()?,
            message: Some(stake_message(&self.config.action, sol_amount)),
        })
    }
}

/// Mount the action routes and their shared state.
pub fn configure<R, E>(cfg: &mut web::ServiceConfig, service: web::Data<StakeActionService<R, E>>)
where
    R: ChainRpc + 'static,
    E: EntropySource + 'static,
{
    let headers = service.headers().clone();
    let query_config = web::QueryConfig::default().error_handler(move |err, _req| {
        let response = routes::error_response(
            &headers,
            StakeActionError::InvalidRequestBody(err.to_string()),
        );
        actix_web::error::InternalError::from_response(err, response).into()
    });

    cfg.app_data(service)
        .app_data(query_config)
        .service(
            web::resource(ACTIONS_MANIFEST_PATH)
                .route(web::get().to(routes::actions_manifest::<R, E>))
                .route(web::method(Method::OPTIONS).to(routes::preflight::<R, E>))
                .default_service(web::to(routes::method_not_allowed::<R, E>)),
        )
        .service(
            web::resource(STAKE_ACTION_PATH)
                .route(web::get().to(routes::get_stake::<R, E>))
                .route(web::post().to(routes::post_stake::<R, E>))
                .route(web::method(Method::OPTIONS).to(routes::preflight::<R, E>))
                .default_service(web::to(routes::method_not_allowed::<R, E>)),
        );
}
