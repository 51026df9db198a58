//! Endpoint groups. Each group is a borrowed handle on the [`Client`]
//! transport with one method per server endpoint.
//!
//! [`Client`]: crate::Client

mod batch;
mod channels;
mod connection;
mod history;
mod presence;
mod publication;
mod stats;
mod token;
mod user;

pub use batch::BatchApi;
pub use channels::ChannelsApi;
pub use connection::ConnectionApi;
pub use history::HistoryApi;
pub use presence::PresenceApi;
pub use publication::PublicationApi;
pub use stats::StatsApi;
pub use token::TokenApi;
pub use user::{UserBlockApi, UserStatusApi};
