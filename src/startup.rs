use std::{sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    response::Response,
    routing::{get, post},
    serve::Serve,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{Span, info, info_span};
use uuid::Uuid;

use crate::{
    configuration::Settings,
    email_client::EmailClient,
    routes::{contact, health_check},
};

pub struct AppState {
    pub email_client: EmailClient,
}

pub async fn run(
    listener: TcpListener,
    email_client: EmailClient,
) -> anyhow::Result<Serve<TcpListener, Router, Router>> {
    // Shared behind an Arc so every handler clones a pointer, not the
    // underlying reqwest connection pool.
    let app_state = Arc::new(AppState { email_client });
    let app = Router::new()
        .route("/health_check", get(health_check))
        // messages have no length cap
        .route(
            "/api/contact",
            post(contact).layer(DefaultBodyLimit::disable()),
        )
        .with_state(app_state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let request_id = Uuid::new_v4();
                    info_span!(
                        "http_request",
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        request_id = ?request_id,
                        status = tracing::field::Empty,
                    )
                })
                .on_response(|response: &Response, latency: Duration, span: &Span| {
                    let status = response.status();
                    let headers = response.headers();
                    span.record("status", status.as_u16());
                    info!(parent: span, ?status, ?headers, ?latency, "Response sent");
                }),
        );

    Ok(axum::serve(listener, app))
}

pub struct Application {
    port: u16,
    server: Serve<TcpListener, Router, Router>,
}

impl Application {
    // build binds the listener and wires the state through `run()`,
    // `run_until_stopped` then drives the server
    pub async fn build(configuration: Settings) -> anyhow::Result<Self> {
        let recipient = configuration
            .email_client
            .recipient()
            .context("Invalid recipient email address.")?;
        let timeout = configuration.email_client.timeout();
        let email_client = EmailClient::new(
            recipient,
            configuration.email_client.base_url,
            configuration.email_client.access_key,
            timeout,
        )?;

        let listener = TcpListener::bind(format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        ))
        .await?;
        let port = listener.local_addr()?.port();

        let server = run(listener, email_client).await?;

        Ok(Self { server, port })
    }

    pub async fn run_until_stopped(self) -> anyhow::Result<()> {
        Ok(self.server.await?)
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}
