// ABOUTME: HTTP API exposing one deploy route per contract bundle.
// ABOUTME: Binds and validates request bodies, then hands params to the shared orchestrator.

mod auth;
mod requests;
mod response;

pub use auth::{Credentials, basic_auth};
pub use requests::{
    DeployRequest, IaoRequest, PaymentRequest, StakingRequest, TokenRequest, ValidationError,
};
pub use response::StandardResponse;

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router, middleware};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::deploy::{DeployError, Orchestrator};
use crate::error::Result;

/// Build the API router. Every route sits behind basic auth.
pub fn router(orchestrator: Orchestrator, credentials: Credentials) -> Router {
    Router::new()
        .route("/deploy/IAO", post(deploy::<IaoRequest>))
        .route("/deploy/iao", post(deploy::<IaoRequest>))
        .route("/deploy/staking", post(deploy::<StakingRequest>))
        .route("/deploy/token", post(deploy::<TokenRequest>))
        .route("/deploy/payment", post(deploy::<PaymentRequest>))
        .layer(middleware::from_fn_with_state(
            Arc::new(credentials),
            basic_auth,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(orchestrator)
}

/// Shared handler for every deploy route.
///
/// Always answers HTTP 200; the outcome is in the envelope's `code`.
async fn deploy<R: DeployRequest>(
    State(orchestrator): State<Orchestrator>,
    body: std::result::Result<Json<R>, JsonRejection>,
) -> Json<StandardResponse> {
    // Report a running deployment ahead of body problems. The orchestrator's
    // gate is still the authority; this only picks the message.
    if orchestrator.is_busy() {
        return Json(StandardResponse::pending());
    }

    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => return Json(StandardResponse::invalid_request(rejection.body_text())),
    };
    if let Err(e) = request.validate() {
        return Json(StandardResponse::invalid_request(e.to_string()));
    }

    match orchestrator.deploy(R::KIND, request.into_params()).await {
        Ok(address) => Json(StandardResponse::deployed(&address)),
        Err(DeployError::Busy(_)) => Json(StandardResponse::pending()),
        Err(e) => Json(StandardResponse::failed(e.to_string())),
    }
}

/// Serve the API until ctrl-c. An in-flight deployment is allowed to finish.
pub async fn serve(config: &Config) -> Result<()> {
    let orchestrator = Orchestrator::from_config(config);
    let credentials = Credentials::from_config(&config.auth)?;

    tracing::info!(
        contracts_dir = %config.contracts.dir.display(),
        env_file = %config.contracts.env_file.display(),
        secrets_file = %config.secrets_file.display(),
        "deployer configured"
    );

    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router(orchestrator, credentials))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
