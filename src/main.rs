use clap::{CommandFactory, Parser};
use doc_titler::config::{Cli, Command, ConfigError, Settings};
use doc_titler::engine::Runner;
use doc_titler::ops::telemetry;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    telemetry::init_tracing(cli.loglevel, cli.log_json);

    let Some(command) = cli.command.clone() else {
        // * No mode selected: usage, not an error
        let _ = Cli::command().print_help();
        return ExitCode::SUCCESS;
    };

    match run(&cli, command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::from(1)
        }
    }
}

async fn run(cli: &Cli, command: Command) -> anyhow::Result<()> {
    let settings = Settings::from_cli(cli);
    settings.validate()?;

    // * Dropping the runner at the end of this scope releases the connection pool
    let runner = Runner::from_settings(&settings)?;

    match command {
        Command::Single { document_id } => {
            let doc_id = document_id.ok_or(ConfigError::Missing("DOCUMENT_ID"))?;
            let outcome = runner.run_single(doc_id).await;
            tracing::info!(success = outcome.is_success(), "Single document finished");
        }
        Command::All { exclude, filter } => {
            let report = runner.run_all(filter.as_deref(), &exclude).await;
            tracing::info!(
                processed = report.processed(),
                updated = report.updated,
                skipped = report.skipped,
                failed = report.failed,
                "Run summary"
            );
        }
    }

    Ok(())
}
