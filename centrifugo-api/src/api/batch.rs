use crate::error::Result;
use crate::http::HttpClient;
use crate::models::{BatchRequest, BatchResponse};

#[derive(Clone, Copy)]
pub struct BatchApi<'a> {
    http: &'a HttpClient,
}

impl<'a> BatchApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// Send several commands in one request. Replies come back in command
    /// order; each may carry its own in-band error.
    pub async fn batch(&self, req: &BatchRequest) -> Result<BatchResponse> {
        self.http.post("batch", req).await
    }
}
