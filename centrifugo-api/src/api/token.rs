use crate::error::Result;
use crate::http::HttpClient;
use crate::models::{
    ApiResponse, InvalidateUserTokensRequest, InvalidateUserTokensResult, RevokeTokenRequest,
    RevokeTokenResult,
};

#[derive(Clone, Copy)]
pub struct TokenApi<'a> {
    http: &'a HttpClient,
}

impl<'a> TokenApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn revoke_token(
        &self,
        req: &RevokeTokenRequest,
    ) -> Result<ApiResponse<RevokeTokenResult>> {
        self.http.post("revoke_token", req).await
    }

    pub async fn invalidate_user_tokens(
        &self,
        req: &InvalidateUserTokensRequest,
    ) -> Result<ApiResponse<InvalidateUserTokensResult>> {
        self.http.post("invalidate_user_tokens", req).await
    }

    /// Revoke the token with the given uid without an expiry.
    pub async fn revoke(&self, uid: &str) -> Result<ApiResponse<RevokeTokenResult>> {
        self.revoke_token(&RevokeTokenRequest::new(uid)?).await
    }
}
