//! In-process stand-in for the Lexware public API.
//!
//! Serves the `/v1` endpoints the client talks to from in-memory JSON
//! records, checks the bearer token and journals every request so tests can
//! assert on what actually went over the wire.

use std::net::SocketAddr;

use axum::http::{StatusCode, Uri};
use axum::response::Response;
use axum::routing::{get, post, MethodRouter};
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

mod routes;
mod state;

pub use state::{AppState, JournalEntry, StoredFile, ORGANIZATION_ID};

/// Router over a fresh, empty store.
pub fn app() -> Router {
    router(AppState::new())
}

pub fn router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/v1/profile", get(routes::profile))
        .route("/v1/countries", get(routes::countries))
        .route("/v1/payment-conditions", get(routes::payment_conditions))
        .route("/v1/posting-categories", get(routes::posting_categories))
        .route("/v1/print-layouts", get(routes::print_layouts))
        .route("/v1/payments/{id}", get(routes::payment))
        .route("/v1/voucherlist", get(routes::voucher_list))
        .route("/v1/files", post(routes::upload_file))
        .route("/v1/files/{id}", get(routes::download_file))
        .route("/v1/vouchers/{id}/files", post(routes::upload_voucher_file));

    for collection in routes::COLLECTIONS {
        let base = format!("/v1/{}", collection.name);

        let mut items: MethodRouter<AppState> = get(routes::list);
        if collection.create {
            items = items.post(routes::create);
        }
        let mut item: MethodRouter<AppState> = get(routes::get_one);
        if collection.update {
            item = item.put(routes::update);
        }
        if collection.delete {
            item = item.delete(routes::delete);
        }

        router = router
            .route(&base, items)
            .route(&format!("{base}/{{id}}"), item);
        if collection.sales.is_some() {
            router = router.route(&format!("{base}/{{id}}/document"), get(routes::document));
        }
    }

    router
        .fallback(fallback)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::journal_and_authorize,
        ))
        .with_state(state)
}

async fn fallback(uri: Uri) -> Response {
    routes::error(StatusCode::NOT_FOUND, uri.path(), "No endpoint for this path")
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// A server on an ephemeral localhost port, stopped on drop.
#[derive(Debug)]
pub struct MockServer {
    addr: SocketAddr,
    state: AppState,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start() -> Result<Self, std::io::Error> {
        Self::start_with(AppState::new()).await
    }

    pub async fn start_with(state: AppState) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = router(state.clone());
        let handle = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                tracing::error!(%err, "mock server stopped");
            }
        });
        info!(%addr, "mock server started");
        Ok(Self {
            addr,
            state,
            handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
