use std::{convert::Infallible, sync::Arc, time::Duration};

use rama::{
    Layer as _, Service,
    error::{BoxError, ErrorContext as _},
    graceful::ShutdownGuard,
    http::{
        HeaderValue, Request, Response, StatusCode,
        layer::{required_header::AddRequiredResponseHeadersLayer, trace::TraceLayer},
        server::HttpServer,
        service::web::response::IntoResponse,
    },
    layer::TimeoutLayer,
    net::socket::Interface,
    rt::Executor,
    tcp::server::TcpListener,
    telemetry::tracing,
};

use clap::Args;

use crate::utils::env;

#[derive(Debug, Clone, Args)]
/// run the echo mock server
pub struct MockCommand {
    /// network interface to bind to
    #[arg(
        long,
        short = 'b',
        value_name = "INTERFACE",
        default_value = "127.0.0.1:8080"
    )]
    pub bind: Interface,
}

pub async fn exec(guard: ShutdownGuard, args: MockCommand) -> Result<(), BoxError> {
    let exec = Executor::graceful(guard);
    let tcp_listener = TcpListener::bind(args.bind.clone(), exec.clone())
        .await
        .context("bind echo mock http server")?;

    let bind_addr = tcp_listener
        .local_addr()
        .context("get bound address for echo mock http server")?;
    tracing::info!(%bind_addr, "echo mock server ready to answer");

    let http_svc = (
        TraceLayer::new_for_http(),
        AddRequiredResponseHeadersLayer::new()
            .with_server_header_value(HeaderValue::from_static(env::project_name())),
    )
        .into_layer(EchoService::default());

    let http_server = HttpServer::auto(exec).service(Arc::new(http_svc));

    let tcp_svc = TimeoutLayer::new(Duration::from_secs(60)).into_layer(http_server);

    tcp_listener.serve(tcp_svc).await;

    Ok(())
}

/// Fixed-response test fixture: answers any request with `200 OK` / `OK`.
///
/// Owned by whoever constructs it, so multiple instances can be
/// served next to each other (e.g. in tests).
#[derive(Debug, Clone, Default)]
pub(crate) struct EchoService;

impl Service<Request> for EchoService {
    type Output = Response;
    type Error = Infallible;

    async fn serve(&self, _req: Request) -> Result<Self::Output, Self::Error> {
        Ok((StatusCode::OK, "OK").into_response())
    }
}
