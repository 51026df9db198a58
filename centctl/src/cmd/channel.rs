use std::process::ExitCode;

use centrifugo_api::{
    Client, HistoryRemoveRequest, HistoryRequest, PresenceRequest, PresenceStatsRequest,
    StreamPosition,
};
use clap::Args;

use super::print_reply;
use crate::error::CliResult;

#[derive(Args, Debug)]
pub struct ChannelArgs {
    pub channel: String,
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    pub channel: String,
    /// Maximum publications to return (-1 for the whole stream)
    #[arg(long, allow_negative_numbers = true)]
    pub limit: Option<i32>,
    /// Return publications after this stream offset
    #[arg(long, requires = "since_epoch")]
    pub since_offset: Option<u64>,
    #[arg(long, requires = "since_offset")]
    pub since_epoch: Option<String>,
    /// Newest publications first
    #[arg(long)]
    pub reverse: bool,
}

pub async fn presence(client: &Client, args: ChannelArgs) -> CliResult<ExitCode> {
    let req = PresenceRequest::new(args.channel)?;
    print_reply(&client.presence().presence(&req).await?)
}

pub async fn presence_stats(client: &Client, args: ChannelArgs) -> CliResult<ExitCode> {
    let req = PresenceStatsRequest::new(args.channel)?;
    print_reply(&client.presence().presence_stats(&req).await?)
}

pub async fn history(client: &Client, args: HistoryArgs) -> CliResult<ExitCode> {
    let mut req = HistoryRequest::new(args.channel)?;
    if let Some(limit) = args.limit {
        req = req.limit(limit);
    }
    if let (Some(offset), Some(epoch)) = (args.since_offset, args.since_epoch) {
        req = req.since(StreamPosition::new(offset, epoch));
    }
    if args.reverse {
        req = req.reverse(true);
    }
    print_reply(&client.history().history(&req).await?)
}

pub async fn history_remove(client: &Client, args: ChannelArgs) -> CliResult<ExitCode> {
    let req = HistoryRemoveRequest::new(args.channel)?;
    print_reply(&client.history().history_remove(&req).await?)
}
