use std::process::ExitCode;

use centrifugo_api::{ChannelsRequest, Client, ConnectionsRequest};
use clap::Args;

use super::print_reply;
use crate::error::CliResult;

#[derive(Args, Debug)]
pub struct ChannelsArgs {
    /// Glob pattern, e.g. chat:*
    #[arg(long)]
    pub pattern: Option<String>,
}

#[derive(Args, Debug)]
pub struct ConnectionsArgs {
    /// Only connections of this user
    #[arg(long)]
    pub user: Option<String>,
    /// Filter expression evaluated by the server
    #[arg(long)]
    pub expression: Option<String>,
}

pub async fn channels(client: &Client, args: ChannelsArgs) -> CliResult<ExitCode> {
    let req = match args.pattern {
        Some(pattern) => ChannelsRequest::matching(pattern),
        None => ChannelsRequest::all(),
    };
    print_reply(&client.channels().channels(&req).await?)
}

pub async fn connections(client: &Client, args: ConnectionsArgs) -> CliResult<ExitCode> {
    let req = ConnectionsRequest {
        user: args.user,
        expression: args.expression,
    };
    print_reply(&client.stats().connections(&req).await?)
}

pub async fn info(client: &Client) -> CliResult<ExitCode> {
    print_reply(&client.stats().info().await?)
}
