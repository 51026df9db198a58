use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{ClientInfo, require_non_blank};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceRequest {
    pub channel: String,
}

impl PresenceRequest {
    pub fn new(channel: impl Into<String>) -> Result<Self> {
        let channel = channel.into();
        require_non_blank("channel", &channel)?;
        Ok(Self { channel })
    }
}

/// Connected clients keyed by client ID.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceResult {
    pub presence: HashMap<String, ClientInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceStatsRequest {
    pub channel: String,
}

impl PresenceStatsRequest {
    pub fn new(channel: impl Into<String>) -> Result<Self> {
        let channel = channel.into();
        require_non_blank("channel", &channel)?;
        Ok(Self { channel })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceStatsResult {
    pub num_clients: u32,
    pub num_users: u32,
}
