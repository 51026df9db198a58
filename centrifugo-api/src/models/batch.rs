use serde::{Deserialize, Serialize};

use super::{
    BroadcastRequest, BroadcastResult, ChannelsRequest, ChannelsResult, DisconnectRequest,
    DisconnectResult, HistoryRemoveRequest, HistoryRemoveResult, HistoryRequest, HistoryResult,
    InfoRequest, InfoResult, PresenceRequest, PresenceResult, PresenceStatsRequest,
    PresenceStatsResult, PublishRequest, PublishResult, RefreshRequest, RefreshResult,
    SubscribeRequest, SubscribeResult, UnsubscribeRequest, UnsubscribeResult,
};
use crate::error::ApiError;

/// A single command inside a batch.
///
/// Serialized as an object with one key naming the command, e.g.
/// `{"publish": {"channel": "news", "data": {}}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Publish(PublishRequest),
    Broadcast(BroadcastRequest),
    Subscribe(SubscribeRequest),
    Unsubscribe(UnsubscribeRequest),
    Disconnect(DisconnectRequest),
    Presence(PresenceRequest),
    PresenceStats(PresenceStatsRequest),
    History(HistoryRequest),
    HistoryRemove(HistoryRemoveRequest),
    Info(InfoRequest),
    Refresh(RefreshRequest),
    Channels(ChannelsRequest),
}

macro_rules! command_from {
    ($($request:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$request> for Command {
                fn from(req: $request) -> Self {
                    Command::$variant(req)
                }
            }
        )*
    };
}

command_from! {
    PublishRequest => Publish,
    BroadcastRequest => Broadcast,
    SubscribeRequest => Subscribe,
    UnsubscribeRequest => Unsubscribe,
    DisconnectRequest => Disconnect,
    PresenceRequest => Presence,
    PresenceStatsRequest => PresenceStats,
    HistoryRequest => History,
    HistoryRemoveRequest => HistoryRemove,
    InfoRequest => Info,
    RefreshRequest => Refresh,
    ChannelsRequest => Channels,
}

/// Reply to one batch command, in command order.
///
/// Exactly one result field is set on success; `error` is set instead when
/// that command failed. Other commands of the batch are unaffected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reply {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish: Option<PublishResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broadcast: Option<BroadcastResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribe: Option<SubscribeResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsubscribe: Option<UnsubscribeResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disconnect: Option<DisconnectResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence: Option<PresenceResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_stats: Option<PresenceStatsResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<HistoryResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_remove: Option<HistoryRemoveResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<InfoResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh: Option<RefreshResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<ChannelsResult>,
}

impl Reply {
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchRequest {
    pub commands: Vec<Command>,
    /// Ask the server to execute commands concurrently.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
}

impl BatchRequest {
    pub fn new<I, C>(commands: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Command>,
    {
        Self {
            commands: commands.into_iter().map(Into::into).collect(),
            parallel: None,
        }
    }

    pub fn push(mut self, command: impl Into<Command>) -> Self {
        self.commands.push(command.into());
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }
}

/// Batch replies are returned at the top level, without a `result` envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchResponse {
    pub replies: Vec<Reply>,
}

impl BatchResponse {
    /// Number of replies carrying a per-command error.
    pub fn error_count(&self) -> usize {
        self.replies.iter().filter(|r| r.has_error()).count()
    }
}
