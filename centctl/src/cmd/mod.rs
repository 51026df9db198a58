mod batch;
mod channel;
mod connection;
mod publication;
mod stats;
mod token;
mod user;

use std::process::ExitCode;

use centrifugo_api::{ApiResponse, Client};
use clap::Subcommand;
use serde::Serialize;
use tracing::warn;

use crate::error::CliResult;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Publish data into a channel
    Publish(publication::PublishArgs),
    /// Publish the same data into several channels
    Broadcast(publication::BroadcastArgs),
    /// Subscribe a user to a channel
    Subscribe(connection::SubscribeArgs),
    /// Unsubscribe a user from a channel
    Unsubscribe(connection::UnsubscribeArgs),
    /// Disconnect a user
    Disconnect(connection::DisconnectArgs),
    /// Refresh a user connection
    Refresh(connection::RefreshArgs),
    /// Show clients present in a channel
    Presence(channel::ChannelArgs),
    /// Show client and user counts of a channel
    PresenceStats(channel::ChannelArgs),
    /// Read channel history
    History(channel::HistoryArgs),
    /// Remove channel history
    HistoryRemove(channel::ChannelArgs),
    /// List active channels
    Channels(stats::ChannelsArgs),
    /// Inspect active connections
    Connections(stats::ConnectionsArgs),
    /// Show cluster node statistics
    Info,
    /// Block a user from connecting
    BlockUser(user::BlockUserArgs),
    /// Unblock a user
    UnblockUser(user::UserArgs),
    /// Get activity status of users
    GetUserStatus(user::UsersArgs),
    /// Delete activity status of users
    DeleteUserStatus(user::UsersArgs),
    /// Update activity status of users
    UpdateUserStatus(user::UpdateUserStatusArgs),
    /// Revoke a token by uid
    RevokeToken(token::RevokeTokenArgs),
    /// Invalidate tokens of a user
    InvalidateUserTokens(token::InvalidateUserTokensArgs),
    /// Send a batch of commands read from a JSON file
    Batch(batch::BatchArgs),
}

pub async fn run(client: &Client, command: Command) -> CliResult<ExitCode> {
    match command {
        Command::Publish(args) => publication::publish(client, args).await,
        Command::Broadcast(args) => publication::broadcast(client, args).await,
        Command::Subscribe(args) => connection::subscribe(client, args).await,
        Command::Unsubscribe(args) => connection::unsubscribe(client, args).await,
        Command::Disconnect(args) => connection::disconnect(client, args).await,
        Command::Refresh(args) => connection::refresh(client, args).await,
        Command::Presence(args) => channel::presence(client, args).await,
        Command::PresenceStats(args) => channel::presence_stats(client, args).await,
        Command::History(args) => channel::history(client, args).await,
        Command::HistoryRemove(args) => channel::history_remove(client, args).await,
        Command::Channels(args) => stats::channels(client, args).await,
        Command::Connections(args) => stats::connections(client, args).await,
        Command::Info => stats::info(client).await,
        Command::BlockUser(args) => user::block(client, args).await,
        Command::UnblockUser(args) => user::unblock(client, args).await,
        Command::GetUserStatus(args) => user::get_status(client, args).await,
        Command::DeleteUserStatus(args) => user::delete_status(client, args).await,
        Command::UpdateUserStatus(args) => user::update_status(client, args).await,
        Command::RevokeToken(args) => token::revoke(client, args).await,
        Command::InvalidateUserTokens(args) => token::invalidate(client, args).await,
        Command::Batch(args) => batch::run(client, args).await,
    }
}

/// Print the reply as pretty JSON. An in-band error fails the command.
pub(crate) fn print_reply<T: Serialize>(reply: &ApiResponse<T>) -> CliResult<ExitCode> {
    println!("{}", serde_json::to_string_pretty(reply)?);
    match &reply.error {
        Some(error) => {
            warn!(code = error.code, "server replied with error: {}", error.message);
            Ok(ExitCode::FAILURE)
        }
        None => Ok(ExitCode::SUCCESS),
    }
}

pub(crate) fn parse_json(s: &str) -> Result<serde_json::Value, String> {
    serde_json::from_str(s).map_err(|e| format!("invalid JSON: {e}"))
}

pub(crate) fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {s:?}"))?;
    if key.is_empty() {
        return Err(format!("empty key in {s:?}"));
    }
    Ok((key.to_string(), value.to_string()))
}
