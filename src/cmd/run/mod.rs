use std::time::Duration;

use clap::Args;
use rama::{error::BoxError, graceful::ShutdownGuard, telemetry::tracing};

use crate::config::RunConfig;

mod client;
mod dispatcher;
mod pacer;

use self::dispatcher::DispatchConfig;

#[derive(Debug, Clone, Args)]
/// run the load dispatcher
pub struct RunCommand {
    #[clap(flatten)]
    config: RunConfig,

    /// trailing grace period for in-flight requests
    #[arg(long, value_name = "SECONDS", default_value_t = 5.)]
    grace: f64,
}

pub async fn exec(guard: ShutdownGuard, args: RunCommand) -> Result<(), BoxError> {
    let client = self::client::http_client();

    let cfg = DispatchConfig {
        url: args.config.url,
        amount: args.config.amount,
        per_second: args.config.per_second.max(1),
        grace: Duration::from_secs_f64(args.grace.max(0.)),
    };

    tracing::info!(
        url = %cfg.url,
        amount = %cfg.amount,
        per_second = %cfg.per_second,
        grace = ?cfg.grace,
        "dispatch parameters ready",
    );

    self::dispatcher::dispatch(client, cfg, guard).await;

    tracing::info!("dispatch run finished");
    Ok(())
}
