use crate::error::Result;
use crate::http::HttpClient;
use crate::models::{ApiResponse, ChannelsRequest, ChannelsResult};

#[derive(Clone, Copy)]
pub struct ChannelsApi<'a> {
    http: &'a HttpClient,
}

impl<'a> ChannelsApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn channels(&self, req: &ChannelsRequest) -> Result<ApiResponse<ChannelsResult>> {
        self.http.post("channels", req).await
    }

    /// Every active channel in the cluster.
    pub async fn all(&self) -> Result<ApiResponse<ChannelsResult>> {
        self.channels(&ChannelsRequest::all()).await
    }

    /// Active channels matching a glob `pattern`, e.g. `chat:*`.
    pub async fn matching(&self, pattern: &str) -> Result<ApiResponse<ChannelsResult>> {
        self.channels(&ChannelsRequest::matching(pattern)).await
    }
}
