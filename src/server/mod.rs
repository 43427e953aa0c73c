//! HTTP resource layer over the note store.
//!
//! Routes (mounted at `/notes` and `/api/notes`):
//! - `GET    /notes`      list, back to front
//! - `POST   /notes`      create, echoes the note with its new id
//! - `GET    /notes/{id}` one note, 404 if absent
//! - `PATCH  /notes/{id}` partial update, 404 if absent
//! - `DELETE /notes/{id}` 204 if removed, 404 if absent

pub mod error;
mod handlers;

use std::future::Future;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::BoardConfig;
use crate::error::Result;
use crate::storage::NoteStore;

pub use error::HttpError;

/// Shared handler state.
#[derive(Clone, Default)]
pub struct AppState {
    pub store: Arc<NoteStore>,
}

impl AppState {
    pub fn new(store: Arc<NoteStore>) -> Self {
        Self { store }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let mut app = Router::new();
    for base in ["/notes", "/api/notes"] {
        app = app
            .route(base, get(handlers::list_notes).post(handlers::create_note))
            .route(
                &format!("{}/{{id}}", base),
                get(handlers::get_note)
                    .patch(handlers::patch_note)
                    .delete(handlers::delete_note),
            );
    }

    app.route("/health", get(handlers::health)).with_state(state)
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: &BoardConfig) -> Result<()> {
    let listener = TcpListener::bind(config.bind_addr()?).await?;
    serve_on(listener, AppState::default(), shutdown_signal()).await
}

/// Serve on an already-bound listener until `shutdown` resolves.
pub async fn serve_on<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!(addr = %listener.local_addr()?, "notes server listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("notes server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
