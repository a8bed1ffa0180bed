//! HTTP CRUD service for todo items backed by a SQL table.
//!
//! # Design
//! The storage pool is created once at startup and handed to the router as
//! state; handlers borrow it per request through [`store::TodoStore`]. No
//! other state is shared between requests.

pub mod config;
pub mod db;
pub mod error;
pub mod store;
pub mod telemetry;

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::{ApiError, StartupError};
pub use store::{Todo, TodoStore};

pub type Db = sqlx::AnyPool;

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Deleted {
    pub ok: bool,
}

pub fn app(db: Db) -> Router {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", put(update_todo).delete(delete_todo))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(db)
}

pub async fn run(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app(db))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn list_todos(State(db): State<Db>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = TodoStore::new(&db).list().await?;
    Ok(Json(todos))
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> Result<Json<Todo>, ApiError> {
    let todo = TodoStore::new(&db).create(input.title).await?;
    Ok(Json(todo))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, ApiError> {
    let todo = TodoStore::new(&db).update_title(id, input.title).await?;
    Ok(Json(todo))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Deleted>, ApiError> {
    TodoStore::new(&db).delete(id).await?;
    Ok(Json(Deleted { ok: true }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
