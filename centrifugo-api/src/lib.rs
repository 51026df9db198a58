//! Client for the Centrifugo server HTTP API.
//!
//! Every endpoint is a `POST {base_url}/{method}` with a JSON body and the
//! `X-API-Key` header. Endpoints are grouped by concern on [`Client`].
//!
//! # Errors
//! - Non-2xx replies carrying the server's `{"error": {...}}` envelope
//!   become [`Error::Api`]; any other non-2xx reply becomes
//!   [`Error::Status`]. The decoding is pluggable via [`ErrorDecoder`].
//! - Centrifugo reports most command failures in-band with HTTP 200. Those
//!   arrive as an [`ApiResponse`] with `error` set; use
//!   [`ApiResponse::into_result`] to turn them into [`Error::Reply`].
//!
//! # Example
//! ```no_run
//! # async fn example() -> Result<(), centrifugo_api::Error> {
//! use centrifugo_api::{Client, Config, PublishRequest};
//! use serde_json::json;
//!
//! let client = Client::new(Config::new("api-key").with_base_url("http://localhost:8000/api"))?;
//!
//! let req = PublishRequest::new("news", json!({"text": "hello"}))?;
//! let published = client.publication().publish(&req).await?.into_result()?;
//! println!("offset: {:?}", published.offset);
//!
//! let channels = client.channels().all().await?.into_result()?;
//! for (name, info) in &channels.channels {
//!     println!("{name}: {} clients", info.num_clients);
//! }
//! # Ok(())
//! # }
//! ```

mod api;
mod client;
mod config;
mod decoder;
mod error;
mod http;
pub mod models;

pub use api::{
    BatchApi, ChannelsApi, ConnectionApi, HistoryApi, PresenceApi, PublicationApi, StatsApi,
    TokenApi, UserBlockApi, UserStatusApi,
};
pub use client::Client;
pub use config::{Config, DEFAULT_BASE_URL, RetryPolicy};
pub use decoder::{ApiErrorDecoder, ErrorDecoder};
pub use error::{ApiError, Error, Result, ServerError};
pub use models::*;
