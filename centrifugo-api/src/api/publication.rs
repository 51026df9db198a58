use crate::error::Result;
use crate::http::HttpClient;
use crate::models::{ApiResponse, BroadcastRequest, BroadcastResult, PublishRequest, PublishResult};

/// Publishing into channels.
#[derive(Clone, Copy)]
pub struct PublicationApi<'a> {
    http: &'a HttpClient,
}

impl<'a> PublicationApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn publish(&self, req: &PublishRequest) -> Result<ApiResponse<PublishResult>> {
        self.http.post("publish", req).await
    }

    /// Publish into many channels at once. Per-channel failures are
    /// reported in [`BroadcastResult::responses`].
    pub async fn broadcast(&self, req: &BroadcastRequest) -> Result<ApiResponse<BroadcastResult>> {
        self.http.post("broadcast", req).await
    }
}
