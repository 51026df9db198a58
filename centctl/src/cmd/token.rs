use std::process::ExitCode;

use centrifugo_api::{Client, InvalidateUserTokensRequest, RevokeTokenRequest};
use clap::Args;

use super::print_reply;
use crate::error::CliResult;

#[derive(Args, Debug)]
pub struct RevokeTokenArgs {
    /// Token uid (jti claim)
    pub uid: String,
    /// Keep the revocation until this unix time
    #[arg(long)]
    pub expire_at: Option<i64>,
}

#[derive(Args, Debug)]
pub struct InvalidateUserTokensArgs {
    pub user: String,
    /// Invalidate tokens issued before this unix time
    #[arg(long)]
    pub issued_before: Option<i64>,
    #[arg(long)]
    pub expire_at: Option<i64>,
    /// Only subscription tokens of this channel
    #[arg(long)]
    pub channel: Option<String>,
}

pub async fn revoke(client: &Client, args: RevokeTokenArgs) -> CliResult<ExitCode> {
    let mut req = RevokeTokenRequest::new(args.uid)?;
    if let Some(at) = args.expire_at {
        req = req.expire_at(at);
    }
    print_reply(&client.token().revoke_token(&req).await?)
}

pub async fn invalidate(client: &Client, args: InvalidateUserTokensArgs) -> CliResult<ExitCode> {
    let mut req = InvalidateUserTokensRequest::new(args.user)?;
    if let Some(at) = args.issued_before {
        req = req.issued_before(at);
    }
    if let Some(at) = args.expire_at {
        req = req.expire_at(at);
    }
    if let Some(channel) = args.channel {
        req = req.for_channel(channel);
    }
    print_reply(&client.token().invalidate_user_tokens(&req).await?)
}
