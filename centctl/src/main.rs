mod cmd;
mod config;
mod error;

use std::fmt;
use std::process::ExitCode;
use std::time::Instant;

use centrifugo_api::Client;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::fmt::time::FormatTime;

use crate::config::ClientArgs;
use crate::error::CliResult;

struct Elapsed(Instant);

impl FormatTime for Elapsed {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let d = self.0.elapsed();
        let total_secs = d.as_secs();
        let mins = total_secs / 60;
        let secs = total_secs % 60;
        let millis = d.subsec_millis();
        write!(w, "[{mins:02}:{secs:02}:{millis:03}]")
    }
}

#[derive(Parser, Debug)]
#[command(name = "centctl", version, about = "Centrifugo server API client")]
struct Cli {
    #[command(flatten)]
    client: ClientArgs,
    #[command(subcommand)]
    command: cmd::Command,
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_timer(Elapsed(Instant::now()))
        .with_max_level(log_level(cli.client.verbose))
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<ExitCode> {
    let config = config::resolve(&cli.client).await?;
    let client = Client::new(config)?;
    cmd::run(&client, cli.command).await
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::cmd::Command;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_publish_with_global_flags() {
        let cli = Cli::try_parse_from([
            "centctl",
            "--api-url",
            "http://centrifugo:8000/api",
            "--api-key",
            "k",
            "publish",
            "news",
            "--data",
            r#"{"text":"hi"}"#,
            "--tag",
            "source=cli",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.client.api_url.as_deref(), Some("http://centrifugo:8000/api"));
        assert_eq!(cli.client.verbose, 2);
        match cli.command {
            Command::Publish(args) => {
                assert_eq!(args.channel, "news");
                assert_eq!(args.options.data["text"], "hi");
                assert_eq!(
                    args.options.tags,
                    vec![("source".to_string(), "cli".to_string())]
                );
                assert!(!args.options.skip_history);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn publish_rejects_invalid_json() {
        let res = Cli::try_parse_from(["centctl", "publish", "news", "--data", "{nope"]);
        assert!(res.is_err());
    }

    #[test]
    fn parses_broadcast_channels() {
        let cli = Cli::try_parse_from([
            "centctl", "broadcast", "a", "b", "c", "--data", "{}",
        ])
        .unwrap();
        match cli.command {
            Command::Broadcast(args) => assert_eq!(args.channels, vec!["a", "b", "c"]),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["centctl", "broadcast", "--data", "{}"]).is_err());
    }

    #[test]
    fn parses_history_with_negative_limit() {
        let cli = Cli::try_parse_from([
            "centctl",
            "history",
            "news",
            "--limit",
            "-1",
            "--since-offset",
            "5",
            "--since-epoch",
            "abc",
        ])
        .unwrap();
        match cli.command {
            Command::History(args) => {
                assert_eq!(args.limit, Some(-1));
                assert_eq!(args.since_offset, Some(5));
                assert_eq!(args.since_epoch.as_deref(), Some("abc"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn since_offset_requires_epoch() {
        let res = Cli::try_parse_from(["centctl", "history", "news", "--since-offset", "5"]);
        assert!(res.is_err());
    }

    #[test]
    fn parses_disconnect_with_custom_code() {
        let cli = Cli::try_parse_from([
            "centctl",
            "disconnect",
            "42",
            "--code",
            "4000",
            "--reason",
            "maintenance",
            "--whitelist",
            "c1",
        ])
        .unwrap();
        match cli.command {
            Command::Disconnect(args) => {
                assert_eq!(args.code, Some(4000));
                assert_eq!(args.whitelist, vec!["c1"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_user_and_token_commands() {
        let cli = Cli::try_parse_from(["centctl", "get-user-status", "42", "43"]).unwrap();
        assert!(matches!(cli.command, Command::GetUserStatus(ref a) if a.users.len() == 2));

        let cli = Cli::try_parse_from([
            "centctl",
            "update-user-status",
            "42",
            "--state",
            "away",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::UpdateUserStatus(_)));

        let cli = Cli::try_parse_from([
            "centctl",
            "invalidate-user-tokens",
            "42",
            "--channel",
            "news",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::InvalidateUserTokens(_)));

        let cli = Cli::try_parse_from(["centctl", "revoke-token", "jti-1"]).unwrap();
        assert!(matches!(cli.command, Command::RevokeToken(_)));
    }

    #[test]
    fn parses_batch_and_info() {
        let cli = Cli::try_parse_from([
            "centctl", "-c", "centctl.yaml", "batch", "cmds.json", "--parallel",
        ])
        .unwrap();
        assert_eq!(
            cli.client.config.as_deref(),
            Some(std::path::Path::new("centctl.yaml"))
        );
        match cli.command {
            Command::Batch(args) => assert!(args.parallel),
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from(["centctl", "info"]).unwrap();
        assert!(matches!(cli.command, Command::Info));
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(log_level(0), Level::WARN);
        assert_eq!(log_level(1), Level::INFO);
        assert_eq!(log_level(2), Level::DEBUG);
        assert_eq!(log_level(7), Level::TRACE);
    }
}
