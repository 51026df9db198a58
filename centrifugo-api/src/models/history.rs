use serde::{Deserialize, Serialize};

use super::{Publication, StreamPosition, require_non_blank};
use crate::error::Result;

/// Read channel history.
///
/// Without `limit` the server returns only the current stream position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRequest {
    pub channel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<StreamPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse: Option<bool>,
}

impl HistoryRequest {
    pub fn new(channel: impl Into<String>) -> Result<Self> {
        let channel = channel.into();
        require_non_blank("channel", &channel)?;
        Ok(Self {
            channel,
            limit: None,
            since: None,
            reverse: None,
        })
    }

    /// `-1` asks for the whole stream.
    pub fn limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn since(mut self, position: StreamPosition) -> Self {
        self.since = Some(position);
        self
    }

    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = Some(reverse);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryResult {
    pub publications: Vec<Publication>,
    pub offset: u64,
    pub epoch: String,
}

impl HistoryResult {
    /// Current top position of the stream.
    pub fn position(&self) -> StreamPosition {
        StreamPosition::new(self.offset, self.epoch.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRemoveRequest {
    pub channel: String,
}

impl HistoryRemoveRequest {
    pub fn new(channel: impl Into<String>) -> Result<Self> {
        let channel = channel.into();
        require_non_blank("channel", &channel)?;
        Ok(Self { channel })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRemoveResult {}
