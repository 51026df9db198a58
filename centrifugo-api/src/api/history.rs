use crate::error::Result;
use crate::http::HttpClient;
use crate::models::{
    ApiResponse, HistoryRemoveRequest, HistoryRemoveResult, HistoryRequest, HistoryResult,
};

#[derive(Clone, Copy)]
pub struct HistoryApi<'a> {
    http: &'a HttpClient,
}

impl<'a> HistoryApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn history(&self, req: &HistoryRequest) -> Result<ApiResponse<HistoryResult>> {
        self.http.post("history", req).await
    }

    pub async fn history_remove(
        &self,
        req: &HistoryRemoveRequest,
    ) -> Result<ApiResponse<HistoryRemoveResult>> {
        self.http.post("history_remove", req).await
    }
}
