use crate::error::Result;
use crate::http::HttpClient;
use crate::models::{
    ApiResponse, DisconnectRequest, DisconnectResult, RefreshRequest, RefreshResult,
    SubscribeRequest, SubscribeResult, UnsubscribeRequest, UnsubscribeResult,
};

/// Server-side management of user connections and subscriptions.
#[derive(Clone, Copy)]
pub struct ConnectionApi<'a> {
    http: &'a HttpClient,
}

impl<'a> ConnectionApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn subscribe(&self, req: &SubscribeRequest) -> Result<ApiResponse<SubscribeResult>> {
        self.http.post("subscribe", req).await
    }

    pub async fn unsubscribe(
        &self,
        req: &UnsubscribeRequest,
    ) -> Result<ApiResponse<UnsubscribeResult>> {
        self.http.post("unsubscribe", req).await
    }

    pub async fn disconnect(
        &self,
        req: &DisconnectRequest,
    ) -> Result<ApiResponse<DisconnectResult>> {
        self.http.post("disconnect", req).await
    }

    pub async fn refresh(&self, req: &RefreshRequest) -> Result<ApiResponse<RefreshResult>> {
        self.http.post("refresh", req).await
    }
}
