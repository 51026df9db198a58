use serde::{Deserialize, Serialize};

use super::{require_non_blank, require_non_empty};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockUserRequest {
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_at: Option<i64>,
}

impl BlockUserRequest {
    pub fn new(user: impl Into<String>) -> Result<Self> {
        let user = user.into();
        require_non_blank("user", &user)?;
        Ok(Self {
            user,
            expire_at: None,
        })
    }

    pub fn expire_at(mut self, unix_secs: i64) -> Self {
        self.expire_at = Some(unix_secs);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockUserResult {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnblockUserRequest {
    pub user: String,
}

impl UnblockUserRequest {
    pub fn new(user: impl Into<String>) -> Result<Self> {
        let user = user.into();
        require_non_blank("user", &user)?;
        Ok(Self { user })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnblockUserResult {}

/// Activity status of a user. `active` and `online` are unix seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserStatus {
    pub user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub online: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl UserStatus {
    pub fn new(user: impl Into<String>) -> Result<Self> {
        let user = user.into();
        require_non_blank("user", &user)?;
        Ok(Self {
            user,
            ..Default::default()
        })
    }

    pub fn active(mut self, unix_secs: i64) -> Self {
        self.active = Some(unix_secs);
        self
    }

    pub fn online(mut self, unix_secs: i64) -> Self {
        self.online = Some(unix_secs);
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserStatusRequest {
    pub users: Vec<UserStatus>,
}

impl UpdateUserStatusRequest {
    pub fn new(users: Vec<UserStatus>) -> Result<Self> {
        require_non_empty("users", &users)?;
        Ok(Self { users })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserStatusResult {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetUserStatusRequest {
    pub users: Vec<String>,
}

impl GetUserStatusRequest {
    pub fn new<I, S>(users: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            users: user_list(users)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetUserStatusResult {
    pub statuses: Vec<UserStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteUserStatusRequest {
    pub users: Vec<String>,
}

impl DeleteUserStatusRequest {
    pub fn new<I, S>(users: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            users: user_list(users)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteUserStatusResult {}

fn user_list<I, S>(users: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let users: Vec<String> = users.into_iter().map(Into::into).collect();
    require_non_empty("users", &users)?;
    for user in &users {
        require_non_blank("users", user)?;
    }
    Ok(users)
}
