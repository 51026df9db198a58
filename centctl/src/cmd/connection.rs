use std::process::ExitCode;

use centrifugo_api::{
    Client, Disconnect, DisconnectRequest, RefreshRequest, StreamPosition, SubscribeRequest,
    UnsubscribeRequest,
};
use clap::Args;

use super::{parse_json, print_reply};
use crate::error::CliResult;

#[derive(Args, Debug)]
pub struct SubscribeArgs {
    pub user: String,
    pub channel: String,
    /// Only subscribe this client connection
    #[arg(long)]
    pub client: Option<String>,
    #[arg(long)]
    pub session: Option<String>,
    /// JSON data sent to the client in the subscribe push
    #[arg(long, value_parser = parse_json)]
    pub data: Option<serde_json::Value>,
    /// JSON channel info attached to the subscription
    #[arg(long, value_parser = parse_json)]
    pub info: Option<serde_json::Value>,
    /// Subscription expiry as unix seconds
    #[arg(long)]
    pub expire_at: Option<i64>,
    /// Recover publications since this stream offset
    #[arg(long, requires = "recover_epoch")]
    pub recover_offset: Option<u64>,
    #[arg(long, requires = "recover_offset")]
    pub recover_epoch: Option<String>,
}

#[derive(Args, Debug)]
pub struct UnsubscribeArgs {
    pub user: String,
    pub channel: String,
    #[arg(long)]
    pub client: Option<String>,
    #[arg(long)]
    pub session: Option<String>,
}

#[derive(Args, Debug)]
pub struct DisconnectArgs {
    pub user: String,
    #[arg(long)]
    pub client: Option<String>,
    #[arg(long)]
    pub session: Option<String>,
    /// Client ID to keep connected (repeatable)
    #[arg(long)]
    pub whitelist: Vec<String>,
    /// Custom disconnect code
    #[arg(long, requires = "reason")]
    pub code: Option<u32>,
    #[arg(long, requires = "code")]
    pub reason: Option<String>,
}

#[derive(Args, Debug)]
pub struct RefreshArgs {
    pub user: String,
    #[arg(long)]
    pub client: Option<String>,
    #[arg(long)]
    pub session: Option<String>,
    /// Mark the connection as expired
    #[arg(long)]
    pub expired: bool,
    /// New connection expiry as unix seconds
    #[arg(long)]
    pub expire_at: Option<i64>,
    #[arg(long, value_parser = parse_json)]
    pub info: Option<serde_json::Value>,
}

pub async fn subscribe(client: &Client, args: SubscribeArgs) -> CliResult<ExitCode> {
    let mut req = SubscribeRequest::new(args.user, args.channel)?;
    if let Some(c) = args.client {
        req = req.for_client(c);
    }
    if let Some(s) = args.session {
        req = req.for_session(s);
    }
    if let Some(data) = args.data {
        req = req.with_data(data);
    }
    if let Some(info) = args.info {
        req = req.with_info(info);
    }
    if let Some(at) = args.expire_at {
        req = req.expire_at(at);
    }
    if let (Some(offset), Some(epoch)) = (args.recover_offset, args.recover_epoch) {
        req = req.recover_since(StreamPosition::new(offset, epoch));
    }
    let reply = client.connection().subscribe(&req).await?;
    print_reply(&reply)
}

pub async fn unsubscribe(client: &Client, args: UnsubscribeArgs) -> CliResult<ExitCode> {
    let mut req = UnsubscribeRequest::new(args.user, args.channel)?;
    if let Some(c) = args.client {
        req = req.for_client(c);
    }
    if let Some(s) = args.session {
        req = req.for_session(s);
    }
    let reply = client.connection().unsubscribe(&req).await?;
    print_reply(&reply)
}

pub async fn disconnect(client: &Client, args: DisconnectArgs) -> CliResult<ExitCode> {
    let mut req = DisconnectRequest::new(args.user)?.with_whitelist(args.whitelist);
    if let Some(c) = args.client {
        req = req.for_client(c);
    }
    if let Some(s) = args.session {
        req = req.for_session(s);
    }
    if let (Some(code), Some(reason)) = (args.code, args.reason) {
        req = req.with_disconnect(Disconnect::new(code, reason)?);
    }
    let reply = client.connection().disconnect(&req).await?;
    print_reply(&reply)
}

pub async fn refresh(client: &Client, args: RefreshArgs) -> CliResult<ExitCode> {
    let mut req = RefreshRequest::new(args.user)?;
    if let Some(c) = args.client {
        req = req.for_client(c);
    }
    if let Some(s) = args.session {
        req = req.for_session(s);
    }
    if args.expired {
        req = req.expired(true);
    }
    if let Some(at) = args.expire_at {
        req = req.expire_at(at);
    }
    if let Some(info) = args.info {
        req = req.with_info(info);
    }
    let reply = client.connection().refresh(&req).await?;
    print_reply(&reply)
}
