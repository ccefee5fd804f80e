use std::net::SocketAddr;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use clap::Parser;
use solana_stake_action::builder::DEFAULT_SEED_PREFIX;
use solana_stake_action::config::DEFAULT_VOTE_ACCOUNT;
use solana_stake_action::{
    server, ActionConfig, Pubkey, PubkeyExt, ServiceConfig, StakeAccountStrategy,
    StakeActionService,
};
use tracing_subscriber::EnvFilter;

mod cluster;

use cluster::{ClusterArg, StakeAccountArg};

/// Solana Actions endpoint that builds native stake transactions
#[derive(Parser)]
#[command(name = "stake-action-server", version)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "STAKE_ACTION_BIND", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,
    /// Cluster used for the chain id header and the default RPC endpoint
    #[arg(long, value_enum, env = "SOLANA_CLUSTER", default_value = "mainnet")]
    cluster: ClusterArg,
    /// JSON-RPC endpoint (defaults to the cluster's public endpoint)
    #[arg(long, env = "SOLANA_RPC_URL")]
    rpc_url: Option<String>,
    /// Timeout for each RPC call, in seconds
    #[arg(long, env = "SOLANA_RPC_TIMEOUT_SECS", default_value_t = 10)]
    rpc_timeout_secs: u64,
    /// Vote account every stake is delegated to
    #[arg(long, env = "STAKE_VOTE_ACCOUNT", default_value = DEFAULT_VOTE_ACCOUNT)]
    vote_account: String,
    /// How new stake accounts are addressed
    #[arg(long, value_enum, default_value = "seeded")]
    stake_account: StakeAccountArg,
    /// Prefix of derived stake account seeds
    #[arg(long, default_value = DEFAULT_SEED_PREFIX)]
    seed_prefix: String,
    /// Validator name shown in transaction messages
    #[arg(long)]
    validator_name: Option<String>,
    /// Icon path or absolute URL
    #[arg(long)]
    icon: Option<String>,
    /// Preset amounts in SOL, comma separated
    #[arg(long, value_delimiter = ',')]
    presets: Option<Vec<f64>>,
}

impl Cli {
    fn service_config(&self) -> Result<ServiceConfig> {
        let mut config = ServiceConfig::for_cluster(self.cluster.into());
        if let Some(url) = &self.rpc_url {
            config.rpc_url = url.clone();
        }
        config.rpc_timeout = Duration::from_secs(self.rpc_timeout_secs);
        config.vote_account =
            Pubkey::from_base58(&self.vote_account).context("invalid --vote-account")?;
        config.stake_account = match self.stake_account {
            StakeAccountArg::Seeded => StakeAccountStrategy::seeded(self.seed_prefix.clone())?,
            StakeAccountArg::Ephemeral => StakeAccountStrategy::Ephemeral,
        };

        let defaults = ActionConfig::default();
        config.action = ActionConfig {
            validator_name: self
                .validator_name
                .clone()
                .unwrap_or(defaults.validator_name.clone()),
            icon: self.icon.clone().unwrap_or(defaults.icon.clone()),
            preset_amounts: self
                .presets
                .clone()
                .unwrap_or(defaults.preset_amounts.clone()),
            ..defaults
        };
        if config
            .action
            .preset_amounts
            .iter()
            .any(|amount| !amount.is_finite() || *amount <= 0.0)
        {
            anyhow::bail!("--presets must be positive SOL amounts");
        }
        Ok(config)
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.service_config()?;

    tracing::info!(
        bind = %cli.bind,
        rpc_url = %config.rpc_url,
        chain_id = config.chain_id(),
        vote_account = %config.vote_account,
        stake_account = ?config.stake_account,
        "starting stake action server"
    );

    let service = web::Data::new(StakeActionService::from_config(config));
    HttpServer::new(move || {
        let service = service.clone();
        App::new().configure(move |cfg| server::configure(cfg, service))
    })
    .bind(cli.bind)
    .with_context(|| format!("failed to bind {}", cli.bind))?
    .run()
    .await?;

    Ok(())
}
