use serde::{Deserialize, Serialize};

use super::require_non_blank;
use crate::error::Result;

/// Revoke a single token by its `jti`/uid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokeTokenRequest {
    pub uid: String,
    /// Unix seconds after which the revocation record can be dropped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_at: Option<i64>,
}

impl RevokeTokenRequest {
    pub fn new(uid: impl Into<String>) -> Result<Self> {
        let uid = uid.into();
        require_non_blank("uid", &uid)?;
        Ok(Self {
            uid,
            expire_at: None,
        })
    }

    pub fn expire_at(mut self, unix_secs: i64) -> Self {
        self.expire_at = Some(unix_secs);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokeTokenResult {}

/// Invalidate every token of a user issued before a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidateUserTokensRequest {
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_before: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_at: Option<i64>,
    /// Restrict invalidation to subscription tokens of one channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl InvalidateUserTokensRequest {
    pub fn new(user: impl Into<String>) -> Result<Self> {
        let user = user.into();
        require_non_blank("user", &user)?;
        Ok(Self {
            user,
            issued_before: None,
            expire_at: None,
            channel: None,
        })
    }

    pub fn issued_before(mut self, unix_secs: i64) -> Self {
        self.issued_before = Some(unix_secs);
        self
    }

    pub fn expire_at(mut self, unix_secs: i64) -> Self {
        self.expire_at = Some(unix_secs);
        self
    }

    pub fn for_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidateUserTokensResult {}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn revoke_token() {
        assert!(RevokeTokenRequest::new("").is_err());
        let req = RevokeTokenRequest::new("jti-1").unwrap().expire_at(1800000000);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"uid": "jti-1", "expire_at": 1800000000})
        );
    }

    #[test]
    fn invalidate_user_tokens_for_channel() {
        let req = InvalidateUserTokensRequest::new("42")
            .unwrap()
            .issued_before(1700000000)
            .for_channel("news");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"user": "42", "issued_before": 1700000000, "channel": "news"})
        );
        assert!(InvalidateUserTokensRequest::new(" ").is_err());
    }
}
