//! Request and result records for the Centrifugo server API.
//!
//! Requests serialize with unset optional fields omitted. Results tolerate
//! missing fields so that partial replies from older servers still decode.

mod batch;
mod connection;
mod history;
mod presence;
mod publication;
mod stats;
mod token;
mod user;

use std::collections::HashMap;

use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Error, Result};

pub use batch::{BatchRequest, BatchResponse, Command, Reply};
pub use connection::{
    Disconnect, DisconnectRequest, DisconnectResult, RefreshRequest, RefreshResult,
    SubscribeOptionOverride, SubscribeRequest, SubscribeResult, UnsubscribeRequest,
    UnsubscribeResult,
};
pub use history::{HistoryRemoveRequest, HistoryRemoveResult, HistoryRequest, HistoryResult};
pub use presence::{PresenceRequest, PresenceResult, PresenceStatsRequest, PresenceStatsResult};
pub use publication::{BroadcastRequest, BroadcastResult, PublishRequest, PublishResult};
pub use stats::{
    ChannelContext, ChannelInfo, ChannelsRequest, ChannelsResult, ConnectionInfo,
    ConnectionState, ConnectionTokenInfo, ConnectionsRequest, ConnectionsResult, InfoRequest,
    InfoResult, Metrics, NodeResult, Process, SubscriptionTokenInfo,
};
pub use token::{
    InvalidateUserTokensRequest, InvalidateUserTokensResult, RevokeTokenRequest,
    RevokeTokenResult,
};
pub use user::{
    BlockUserRequest, BlockUserResult, DeleteUserStatusRequest, DeleteUserStatusResult,
    GetUserStatusRequest, GetUserStatusResult, UnblockUserRequest, UnblockUserResult,
    UpdateUserStatusRequest, UpdateUserStatusResult, UserStatus,
};

/// Reply envelope shared by every endpoint except `batch`.
///
/// Centrifugo reports most command failures in-band with HTTP 200, so a
/// successful call can still carry an `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

impl<T: Default> ApiResponse<T> {
    /// Convert an in-band error into [`Error::Reply`]. A reply with neither
    /// `error` nor `result` yields `T::default()`.
    pub fn into_result(self) -> Result<T> {
        match self.error {
            Some(error) => Err(Error::Reply(error)),
            None => Ok(self.result.unwrap_or_default()),
        }
    }
}

/// Position in a channel history stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamPosition {
    pub offset: u64,
    pub epoch: String,
}

impl StreamPosition {
    pub fn new(offset: u64, epoch: impl Into<String>) -> Self {
        Self {
            offset,
            epoch: epoch.into(),
        }
    }
}

/// Identity of a connected client as reported by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientInfo {
    pub user: String,
    pub client: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conn_info: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chan_info: Option<serde_json::Value>,
}

/// A message stored in channel history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Publication {
    pub data: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<ClientInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<HashMap<String, String>>,
}

/// Wrapped boolean, used where the server must tell "unset" from `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoolValue {
    pub value: bool,
}

impl From<bool> for BoolValue {
    fn from(value: bool) -> Self {
        Self { value }
    }
}

pub(crate) fn require_non_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid(format!(
            "'{field}' is required and cannot be empty"
        )));
    }
    Ok(())
}

pub(crate) fn require_non_empty<T>(field: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(Error::invalid(format!(
            "'{field}' is required and cannot be empty"
        )));
    }
    Ok(())
}

pub(crate) fn require_data(data: &serde_json::Value) -> Result<()> {
    if data.is_null() {
        return Err(Error::invalid("'data' is required and cannot be null"));
    }
    Ok(())
}

pub(crate) fn encode_b64(data: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(data)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn in_band_error_becomes_reply_error() {
        let resp: ApiResponse<PublishResult> = serde_json::from_value(json!({
            "error": {"code": 102, "message": "unknown channel"}
        }))
        .unwrap();
        assert!(resp.has_error());
        match resp.into_result() {
            Err(Error::Reply(e)) => {
                assert_eq!(e.code, 102);
                assert_eq!(e.message, "unknown channel");
            }
            other => panic!("expected reply error, got {other:?}"),
        }
    }

    #[test]
    fn missing_result_defaults() {
        let resp: ApiResponse<PresenceStatsResult> = serde_json::from_str("{}").unwrap();
        assert!(!resp.has_error());
        let stats = resp.into_result().unwrap();
        assert_eq!(stats.num_clients, 0);
    }

    #[test]
    fn publication_with_client_info() {
        let p: Publication = serde_json::from_value(json!({
            "data": {"text": "hi"},
            "info": {"user": "42", "client": "c1"},
            "offset": 7
        }))
        .unwrap();
        assert_eq!(p.data["text"], "hi");
        assert_eq!(p.offset, Some(7));
        assert_eq!(p.info.unwrap().user, "42");
        assert!(p.tags.is_none());
    }

    #[test]
    fn validation_helpers() {
        assert!(require_non_blank("channel", "news").is_ok());
        assert!(matches!(
            require_non_blank("channel", "  "),
            Err(Error::InvalidRequest(msg)) if msg.contains("channel")
        ));
        assert!(require_non_empty::<String>("users", &[]).is_err());
        assert!(require_data(&serde_json::Value::Null).is_err());
        assert!(require_data(&json!({})).is_ok());
    }

    #[test]
    fn base64_encoding() {
        assert_eq!(encode_b64(b"hello"), "aGVsbG8=");
    }
}
