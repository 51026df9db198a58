use std::path::{Path, PathBuf};
use std::process::ExitCode;

use centrifugo_api::{BatchRequest, Client, Command};
use clap::Args;
use tracing::{debug, warn};

use crate::error::{CliError, CliResult};

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// JSON file holding an array of commands, e.g. [{"publish": {...}}]
    pub file: PathBuf,
    /// Let the server execute commands concurrently
    #[arg(long)]
    pub parallel: bool,
}

pub async fn run(client: &Client, args: BatchArgs) -> CliResult<ExitCode> {
    let commands = read_commands(&args.file).await?;
    debug!(commands = commands.len(), "sending batch");

    let mut req = BatchRequest::new(commands);
    if args.parallel {
        req = req.parallel(true);
    }
    let resp = client.batch().batch(&req).await?;
    println!("{}", serde_json::to_string_pretty(&resp)?);

    let failed = resp.error_count();
    if failed > 0 {
        warn!(failed, total = resp.replies.len(), "batch commands failed");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

async fn read_commands(path: &Path) -> CliResult<Vec<Command>> {
    let content = tokio::fs::read_to_string(path).await?;
    let commands: Vec<Command> = serde_json::from_str(&content)?;
    if commands.is_empty() {
        return Err(CliError::Config(format!(
            "{}: batch holds no commands",
            path.display()
        )));
    }
    Ok(commands)
}
