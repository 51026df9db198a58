use std::collections::HashMap;
use std::process::ExitCode;

use centrifugo_api::{BroadcastRequest, Client, PublishRequest};
use clap::Args;

use super::{parse_json, parse_key_val, print_reply};
use crate::error::CliResult;

/// Options shared by publish and broadcast.
#[derive(Args, Debug)]
pub struct PublishOptions {
    /// JSON payload
    #[arg(long, value_parser = parse_json)]
    pub data: serde_json::Value,
    /// Do not save the publication to history
    #[arg(long)]
    pub skip_history: bool,
    /// Publication tag as KEY=VALUE (repeatable)
    #[arg(long = "tag", value_parser = parse_key_val)]
    pub tags: Vec<(String, String)>,
    #[arg(long)]
    pub idempotency_key: Option<String>,
    /// Send as delta against the previous publication
    #[arg(long)]
    pub delta: bool,
}

#[derive(Args, Debug)]
pub struct PublishArgs {
    pub channel: String,
    #[command(flatten)]
    pub options: PublishOptions,
}

#[derive(Args, Debug)]
pub struct BroadcastArgs {
    #[arg(required = true)]
    pub channels: Vec<String>,
    #[command(flatten)]
    pub options: PublishOptions,
}

pub async fn publish(client: &Client, args: PublishArgs) -> CliResult<ExitCode> {
    let opts = args.options;
    let mut req = PublishRequest::new(args.channel, opts.data)?;
    if opts.skip_history {
        req = req.skip_history(true);
    }
    if !opts.tags.is_empty() {
        req = req.with_tags(opts.tags.into_iter().collect::<HashMap<_, _>>());
    }
    if let Some(key) = opts.idempotency_key {
        req = req.with_idempotency_key(key);
    }
    if opts.delta {
        req = req.with_delta(true);
    }
    let reply = client.publication().publish(&req).await?;
    print_reply(&reply)
}

pub async fn broadcast(client: &Client, args: BroadcastArgs) -> CliResult<ExitCode> {
    let opts = args.options;
    let mut req = BroadcastRequest::new(args.channels, opts.data)?;
    if opts.skip_history {
        req = req.skip_history(true);
    }
    if !opts.tags.is_empty() {
        req = req.with_tags(opts.tags.into_iter().collect::<HashMap<_, _>>());
    }
    if let Some(key) = opts.idempotency_key {
        req = req.with_idempotency_key(key);
    }
    if opts.delta {
        req = req.with_delta(true);
    }
    let reply = client.publication().broadcast(&req).await?;
    print_reply(&reply)
}
