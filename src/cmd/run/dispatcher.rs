use std::time::Duration;

use rama::{
    error::extra::OpaqueError,
    graceful::ShutdownGuard,
    http::{Request, Response, Uri, service::client::HttpClientExt as _},
    rt::Executor,
    service::BoxService,
    telemetry::tracing,
};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use super::pacer::LaunchPacer;

/// Parameters of one dispatch run. Built once, immutable afterwards.
#[derive(Debug)]
pub(super) struct DispatchConfig {
    pub(super) url: Uri,
    pub(super) amount: u64,
    pub(super) per_second: u32,
    pub(super) grace: Duration,
}

/// JSON body carried by every probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct ProbePayload {
    pub(super) iteration: u64,
}

/// Issues `cfg.amount` fire-and-forget POST probes against `cfg.url`.
///
/// Launches are strictly sequential and paced: after every
/// `cfg.per_second`-th launch the loop sleeps one second. The guard is
/// checked between iterations; once it is cancelled no further probes are
/// launched, while probes already in flight keep running.
///
/// Returning does not mean every probe completed: after the loop the
/// dispatcher only waits the fixed `cfg.grace` period before handing
/// control back. Probes are spawned on the guard's executor, so the
/// process-level graceful shutdown drains any stragglers.
pub(super) async fn dispatch(
    client: BoxService<Request, Response, OpaqueError>,
    cfg: DispatchConfig,
    guard: ShutdownGuard,
) {
    let exec = Executor::graceful(guard.clone());
    let mut pacer = LaunchPacer::new(cfg.per_second);
    let mut cancelled = std::pin::pin!(guard.clone_weak().into_cancelled());

    for iteration in 1..=cfg.amount {
        // non-blocking cancellation probe, checked between iterations only
        let stop = tokio::select! {
            biased;
            _ = cancelled.as_mut() => true,
            _ = std::future::ready(()) => false,
        };
        if stop {
            tracing::debug!(%iteration, "dispatch cancelled: no further probes are launched");
            break;
        }

        exec.spawn_task(send_probe(client.clone(), cfg.url.clone(), iteration));
        pacer.launched_one().await;
    }

    // give in-flight probes a chance to finish; not a completion guarantee
    sleep(cfg.grace).await;
}

async fn send_probe(
    client: BoxService<Request, Response, OpaqueError>,
    url: Uri,
    iteration: u64,
) {
    let resp = match client
        .post(url)
        .json(&ProbePayload { iteration })
        .send()
        .await
    {
        Ok(resp) => resp,
        Err(err) => {
            tracing::error!(error = %err, %iteration, "failed to send probe");
            return;
        }
    };

    tracing::info!(status = %resp.status(), %iteration, "probe sent");
}
