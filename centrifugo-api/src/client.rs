use crate::api::{
    BatchApi, ChannelsApi, ConnectionApi, HistoryApi, PresenceApi, PublicationApi, StatsApi,
    TokenApi, UserBlockApi, UserStatusApi,
};
use crate::config::Config;
use crate::error::Result;
use crate::http::HttpClient;

/// Client for the Centrifugo server API.
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Clone)]
pub struct Client {
    http: HttpClient,
}

impl Client {
    /// Build a client. Fails with [`Error::Config`](crate::Error::Config)
    /// on an invalid base URL or header.
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    /// Normalized API root, without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    pub fn publication(&self) -> PublicationApi<'_> {
        PublicationApi::new(&self.http)
    }

    pub fn connection(&self) -> ConnectionApi<'_> {
        ConnectionApi::new(&self.http)
    }

    pub fn history(&self) -> HistoryApi<'_> {
        HistoryApi::new(&self.http)
    }

    pub fn presence(&self) -> PresenceApi<'_> {
        PresenceApi::new(&self.http)
    }

    pub fn stats(&self) -> StatsApi<'_> {
        StatsApi::new(&self.http)
    }

    pub fn channels(&self) -> ChannelsApi<'_> {
        ChannelsApi::new(&self.http)
    }

    pub fn user_block(&self) -> UserBlockApi<'_> {
        UserBlockApi::new(&self.http)
    }

    pub fn user_status(&self) -> UserStatusApi<'_> {
        UserStatusApi::new(&self.http)
    }

    pub fn token(&self) -> TokenApi<'_> {
        TokenApi::new(&self.http)
    }

    pub fn batch(&self) -> BatchApi<'_> {
        BatchApi::new(&self.http)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn base_url_is_normalized() {
        let config = Config::new("k").with_base_url("http://127.0.0.1:8000/api/");
        let client = Client::new(config).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8000/api");
        assert_eq!(client.clone().base_url(), client.base_url());
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        let err = Client::new(Config::new("k").with_base_url("::nope")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
