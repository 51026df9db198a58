use crate::error::Result;
use crate::http::HttpClient;
use crate::models::{
    ApiResponse, PresenceRequest, PresenceResult, PresenceStatsRequest, PresenceStatsResult,
};

/// Channel presence. Requires presence to be enabled for the namespace.
#[derive(Clone, Copy)]
pub struct PresenceApi<'a> {
    http: &'a HttpClient,
}

impl<'a> PresenceApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn presence(&self, req: &PresenceRequest) -> Result<ApiResponse<PresenceResult>> {
        self.http.post("presence", req).await
    }

    pub async fn presence_stats(
        &self,
        req: &PresenceStatsRequest,
    ) -> Result<ApiResponse<PresenceStatsResult>> {
        self.http.post("presence_stats", req).await
    }

    pub async fn presence_of(&self, channel: &str) -> Result<ApiResponse<PresenceResult>> {
        self.presence(&PresenceRequest::new(channel)?).await
    }

    pub async fn stats_of(&self, channel: &str) -> Result<ApiResponse<PresenceStatsResult>> {
        self.presence_stats(&PresenceStatsRequest::new(channel)?)
            .await
    }
}
