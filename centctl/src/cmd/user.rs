use std::process::ExitCode;

use centrifugo_api::{BlockUserRequest, Client, UpdateUserStatusRequest, UserStatus};
use clap::Args;

use super::print_reply;
use crate::error::CliResult;

#[derive(Args, Debug)]
pub struct UserArgs {
    pub user: String,
}

#[derive(Args, Debug)]
pub struct BlockUserArgs {
    pub user: String,
    /// Block expiry as unix seconds
    #[arg(long)]
    pub expire_at: Option<i64>,
}

#[derive(Args, Debug)]
pub struct UsersArgs {
    #[arg(required = true)]
    pub users: Vec<String>,
}

#[derive(Args, Debug)]
pub struct UpdateUserStatusArgs {
    #[arg(required = true)]
    pub users: Vec<String>,
    /// Last activity time as unix seconds
    #[arg(long)]
    pub active: Option<i64>,
    /// Last online time as unix seconds
    #[arg(long)]
    pub online: Option<i64>,
    #[arg(long)]
    pub state: Option<String>,
}

pub async fn block(client: &Client, args: BlockUserArgs) -> CliResult<ExitCode> {
    let mut req = BlockUserRequest::new(args.user)?;
    if let Some(at) = args.expire_at {
        req = req.expire_at(at);
    }
    print_reply(&client.user_block().block_user(&req).await?)
}

pub async fn unblock(client: &Client, args: UserArgs) -> CliResult<ExitCode> {
    print_reply(&client.user_block().unblock(&args.user).await?)
}

pub async fn get_status(client: &Client, args: UsersArgs) -> CliResult<ExitCode> {
    print_reply(&client.user_status().get(args.users).await?)
}

pub async fn delete_status(client: &Client, args: UsersArgs) -> CliResult<ExitCode> {
    print_reply(&client.user_status().delete(args.users).await?)
}

pub async fn update_status(client: &Client, args: UpdateUserStatusArgs) -> CliResult<ExitCode> {
    let mut statuses = Vec::with_capacity(args.users.len());
    for user in args.users {
        let mut status = UserStatus::new(user)?;
        if let Some(at) = args.active {
            status = status.active(at);
        }
        if let Some(at) = args.online {
            status = status.online(at);
        }
        if let Some(state) = &args.state {
            status = status.with_state(state.clone());
        }
        statuses.push(status);
    }
    let req = UpdateUserStatusRequest::new(statuses)?;
    print_reply(&client.user_status().update_user_status(&req).await?)
}
