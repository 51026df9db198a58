use crate::error::Result;
use crate::http::HttpClient;
use crate::models::{
    ApiResponse, BlockUserRequest, BlockUserResult, DeleteUserStatusRequest,
    DeleteUserStatusResult, GetUserStatusRequest, GetUserStatusResult, UnblockUserRequest,
    UnblockUserResult, UpdateUserStatusRequest, UpdateUserStatusResult,
};

/// Blocking users from connecting.
#[derive(Clone, Copy)]
pub struct UserBlockApi<'a> {
    http: &'a HttpClient,
}

impl<'a> UserBlockApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn block_user(&self, req: &BlockUserRequest) -> Result<ApiResponse<BlockUserResult>> {
        self.http.post("block_user", req).await
    }

    pub async fn unblock_user(
        &self,
        req: &UnblockUserRequest,
    ) -> Result<ApiResponse<UnblockUserResult>> {
        self.http.post("unblock_user", req).await
    }

    pub async fn unblock(&self, user: &str) -> Result<ApiResponse<UnblockUserResult>> {
        self.unblock_user(&UnblockUserRequest::new(user)?).await
    }
}

/// User activity status.
#[derive(Clone, Copy)]
pub struct UserStatusApi<'a> {
    http: &'a HttpClient,
}

impl<'a> UserStatusApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn update_user_status(
        &self,
        req: &UpdateUserStatusRequest,
    ) -> Result<ApiResponse<UpdateUserStatusResult>> {
        self.http.post("update_user_status", req).await
    }

    pub async fn get_user_status(
        &self,
        req: &GetUserStatusRequest,
    ) -> Result<ApiResponse<GetUserStatusResult>> {
        self.http.post("get_user_status", req).await
    }

    pub async fn delete_user_status(
        &self,
        req: &DeleteUserStatusRequest,
    ) -> Result<ApiResponse<DeleteUserStatusResult>> {
        self.http.post("delete_user_status", req).await
    }

    pub async fn get<I, S>(&self, users: I) -> Result<ApiResponse<GetUserStatusResult>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.get_user_status(&GetUserStatusRequest::new(users)?)
            .await
    }

    pub async fn delete<I, S>(&self, users: I) -> Result<ApiResponse<DeleteUserStatusResult>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.delete_user_status(&DeleteUserStatusRequest::new(users)?)
            .await
    }
}
