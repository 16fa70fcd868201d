//! Async, typed client for the Lexware (lexoffice) public accounting API.
//!
//! # Overview
//! ```no_run
//! # async fn demo() -> lexware_core::Result<()> {
//! use lexware_core::types::{ArticleCreateRequest, ArticleType};
//! use lexware_core::LexwareClient;
//!
//! let client = LexwareClient::new("api-key")?;
//! let created = client
//!     .articles()
//!     .create(&ArticleCreateRequest::new("Widget", ArticleType::Product))
//!     .await?;
//! let article = client.articles().get(&created.id).await?;
//! # let _ = article;
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - `Config` is immutable and passed at construction; there is no global
//!   state.
//! - Requests are built as plain data (`HttpRequest`) and executed by one
//!   `Transport`, which attaches authentication and turns every status outside
//!   `200..300` into `Error::Api` with the status and raw body.
//! - Sales vouchers share one generic handle, `SalesVouchers<K>`; the kind
//!   marker decides which operations exist.
//! - Nothing is retried or cached. Errors are returned, never logged; request
//!   and response events are emitted through `tracing` at `debug`/`trace`.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod resources;
pub mod stream;
pub mod transport;
pub mod types;

pub use client::LexwareClient;
pub use config::Config;
pub use error::{ApiError, Error, Result};
pub use stream::ByteStream;
pub use types::{ActionResult, ListOptions, Page};
