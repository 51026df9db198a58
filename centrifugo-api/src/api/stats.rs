use crate::error::Result;
use crate::http::HttpClient;
use crate::models::{ApiResponse, ConnectionsRequest, ConnectionsResult, InfoRequest, InfoResult};

/// Node and connection statistics.
#[derive(Clone, Copy)]
pub struct StatsApi<'a> {
    http: &'a HttpClient,
}

impl<'a> StatsApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn connections(
        &self,
        req: &ConnectionsRequest,
    ) -> Result<ApiResponse<ConnectionsResult>> {
        self.http.post("connections", req).await
    }

    pub async fn info(&self) -> Result<ApiResponse<InfoResult>> {
        self.http.post("info", &InfoRequest::default()).await
    }
}
