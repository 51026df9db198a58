use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{ApiResponse, encode_b64, require_data, require_non_blank, require_non_empty};
use crate::error::Result;

/// Publish data into a single channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishRequest {
    pub channel: String,
    pub data: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b64data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_history: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<bool>,
}

impl PublishRequest {
    pub fn new(channel: impl Into<String>, data: serde_json::Value) -> Result<Self> {
        let channel = channel.into();
        require_non_blank("channel", &channel)?;
        require_data(&data)?;
        Ok(Self {
            channel,
            data,
            b64data: None,
            skip_history: None,
            tags: None,
            idempotency_key: None,
            delta: None,
        })
    }

    /// Publish a binary payload; `data` is sent as an empty object.
    pub fn binary(channel: impl Into<String>, payload: &[u8]) -> Result<Self> {
        let mut req = Self::new(channel, serde_json::json!({}))?;
        req.b64data = Some(encode_b64(payload));
        Ok(req)
    }

    pub fn skip_history(mut self, skip: bool) -> Self {
        self.skip_history = Some(skip);
        self
    }

    pub fn with_tags(mut self, tags: HashMap<String, String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    pub fn with_delta(mut self, delta: bool) -> Self {
        self.delta = Some(delta);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epoch: Option<String>,
}

/// Publish the same data into many channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastRequest {
    pub channels: Vec<String>,
    pub data: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b64data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_history: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<bool>,
}

impl BroadcastRequest {
    pub fn new<I, S>(channels: I, data: serde_json::Value) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let channels: Vec<String> = channels.into_iter().map(Into::into).collect();
        require_non_empty("channels", &channels)?;
        for channel in &channels {
            require_non_blank("channels", channel)?;
        }
        require_data(&data)?;
        Ok(Self {
            channels,
            data,
            b64data: None,
            skip_history: None,
            tags: None,
            idempotency_key: None,
            delta: None,
        })
    }

    pub fn binary<I, S>(channels: I, payload: &[u8]) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut req = Self::new(channels, serde_json::json!({}))?;
        req.b64data = Some(encode_b64(payload));
        Ok(req)
    }

    pub fn skip_history(mut self, skip: bool) -> Self {
        self.skip_history = Some(skip);
        self
    }

    pub fn with_tags(mut self, tags: HashMap<String, String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    pub fn with_delta(mut self, delta: bool) -> Self {
        self.delta = Some(delta);
        self
    }
}

/// One publish reply per requested channel, in request order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BroadcastResult {
    pub responses: Vec<ApiResponse<PublishResult>>,
}
