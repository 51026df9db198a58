use serde::{Deserialize, Serialize};

use super::{BoolValue, StreamPosition, encode_b64, require_non_blank};
use crate::error::Result;

/// Subscribe all sessions of a user to a channel (server-side subscription).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscribeRequest {
    pub channel: String,
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b64info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b64data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recover_since: Option<StreamPosition>,
    #[serde(default, rename = "override", skip_serializing_if = "Option::is_none")]
    pub override_options: Option<SubscribeOptionOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
}

impl SubscribeRequest {
    pub fn new(user: impl Into<String>, channel: impl Into<String>) -> Result<Self> {
        let user = user.into();
        let channel = channel.into();
        require_non_blank("user", &user)?;
        require_non_blank("channel", &channel)?;
        Ok(Self {
            channel,
            user,
            expire_at: None,
            info: None,
            b64info: None,
            client: None,
            data: None,
            b64data: None,
            recover_since: None,
            override_options: None,
            session: None,
        })
    }

    /// Limit the subscription to one connection of the user.
    pub fn for_client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }

    pub fn for_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_b64data(mut self, payload: &[u8]) -> Self {
        self.b64data = Some(encode_b64(payload));
        self
    }

    pub fn with_info(mut self, info: serde_json::Value) -> Self {
        self.info = Some(info);
        self
    }

    pub fn expire_at(mut self, unix_secs: i64) -> Self {
        self.expire_at = Some(unix_secs);
        self
    }

    pub fn recover_since(mut self, position: StreamPosition) -> Self {
        self.recover_since = Some(position);
        self
    }

    pub fn with_override(mut self, options: SubscribeOptionOverride) -> Self {
        self.override_options = Some(options);
        self
    }
}

/// Per-subscription overrides of channel namespace options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscribeOptionOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence: Option<BoolValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_leave: Option<BoolValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_recovery: Option<BoolValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_positioning: Option<BoolValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_push_join_leave: Option<BoolValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeResult {}

/// Unsubscribe a user from a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsubscribeRequest {
    pub user: String,
    pub channel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
}

impl UnsubscribeRequest {
    pub fn new(user: impl Into<String>, channel: impl Into<String>) -> Result<Self> {
        let user = user.into();
        let channel = channel.into();
        require_non_blank("user", &user)?;
        require_non_blank("channel", &channel)?;
        Ok(Self {
            user,
            channel,
            client: None,
            session: None,
        })
    }

    pub fn for_client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }

    pub fn for_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsubscribeResult {}

/// Custom disconnect sent to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disconnect {
    pub code: u32,
    pub reason: String,
}

impl Disconnect {
    pub fn new(code: u32, reason: impl Into<String>) -> Result<Self> {
        let reason = reason.into();
        require_non_blank("reason", &reason)?;
        Ok(Self { code, reason })
    }
}

/// Disconnect a user (all sessions, or a single client/session).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisconnectRequest {
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
    /// Client IDs to keep connected.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub whitelist: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disconnect: Option<Disconnect>,
}

impl DisconnectRequest {
    pub fn new(user: impl Into<String>) -> Result<Self> {
        let user = user.into();
        require_non_blank("user", &user)?;
        Ok(Self {
            user,
            client: None,
            session: None,
            whitelist: Vec::new(),
            disconnect: None,
        })
    }

    pub fn for_client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }

    pub fn for_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }

    pub fn with_whitelist<I, S>(mut self, clients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist = clients.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_disconnect(mut self, disconnect: Disconnect) -> Self {
        self.disconnect = Some(disconnect);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisconnectResult {}

/// Refresh a user connection (mostly for unidirectional transports).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expired: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<serde_json::Value>,
}

impl RefreshRequest {
    pub fn new(user: impl Into<String>) -> Result<Self> {
        let user = user.into();
        require_non_blank("user", &user)?;
        Ok(Self {
            user,
            client: None,
            session: None,
            expired: None,
            expire_at: None,
            info: None,
        })
    }

    pub fn for_client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }

    pub fn for_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }

    pub fn expired(mut self, expired: bool) -> Self {
        self.expired = Some(expired);
        self
    }

    pub fn expire_at(mut self, unix_secs: i64) -> Self {
        self.expire_at = Some(unix_secs);
        self
    }

    pub fn with_info(mut self, info: serde_json::Value) -> Self {
        self.info = Some(info);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshResult {}
