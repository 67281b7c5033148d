use axum::{Router, routing::get};

use std::sync::Arc;

use crate::{accounts, budgets, transactions};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

pub fn router(engine: Engine) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
    };

    Router::new()
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/transactions/{id}",
            get(transactions::get)
                .patch(transactions::update)
                .delete(transactions::delete),
        )
        .route("/transactions/search/{pattern}", get(transactions::search))
        .route("/accounts", get(accounts::list))
        .route("/budgets", get(budgets::list))
        .with_state(state)
}

/// Serve the API on `listener` until ctrl-c is received.
pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(engine))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {err}");
        // Without a signal handler the server runs until killed.
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
