//! suiscope: classified transaction history for a Sui account.

mod render;
mod settings;

use clap::Parser;
use std::process::ExitCode;

use suiscope_history::{HistoryConfig, HistoryError, TransactionHistoryService};
use suiscope_types::AccountId;

use crate::settings::ConfigArgs;

#[derive(Parser)]
#[command(
    name = "suiscope",
    version,
    about = "Classified transaction history for Sui accounts"
)]
struct Cli {
    #[command(flatten)]
    settings: ConfigArgs,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Show the most recent transactions of an address.
    History {
        /// Account address, e.g. 0x5f3a...
        address: String,

        /// Print the classified records as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration as TOML.
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli.settings.load()?;
    suiscope_utils::init_logging(config.log_format, &config.log_level);

    match cli.command {
        Command::History { address, json } => run_history(&config, &address, json).await,
        Command::Config => {
            print!("{}", config.to_toml_string()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_history(
    config: &HistoryConfig,
    address: &str,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let account = AccountId::parse(address)?;
    let service = TransactionHistoryService::connect(config)?;
    tracing::info!(
        account = %account,
        endpoints = config.endpoints.len(),
        direction = %config.direction,
        limit = config.limit,
        "loading transaction history"
    );

    match service.get_history_report(&account).await {
        Ok(report) => {
            if json {
                println!("{}", render::json(&report.transactions)?);
            } else {
                print!("{}", render::table(&report.transactions));
                if report.omitted > 0 {
                    eprintln!(
                        "{} of {} transactions could not be loaded from {}",
                        report.omitted, report.requested, report.endpoint.url
                    );
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err @ HistoryError::EmptyHistory { .. }) => {
            if json {
                println!("[]");
            } else {
                println!("{}", err.user_message());
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::error!(error = %err, "history request failed");
            eprintln!("{}", err.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use suiscope_rpc::QueryDirection;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_history_with_global_flags() {
        let cli = Cli::try_parse_from([
            "suiscope",
            "--endpoint",
            "https://a.example,https://b.example",
            "history",
            "0xABC",
            "--limit",
            "5",
            "--direction",
            "recipient",
            "--json",
        ])
        .unwrap();

        let Command::History { address, json } = cli.command else {
            panic!("expected history subcommand");
        };
        assert_eq!(address, "0xABC");
        assert!(json);
        assert_eq!(
            cli.settings.endpoints,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(cli.settings.limit, Some(5));
        assert_eq!(cli.settings.direction, Some(QueryDirection::Recipient));
    }

    #[test]
    fn rejects_unknown_direction() {
        let result = Cli::try_parse_from(["suiscope", "--direction", "sideways", "config"]);
        assert!(result.is_err());
    }
}
