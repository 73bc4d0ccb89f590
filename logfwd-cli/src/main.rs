use clap::Parser;

use logfwd_cli::cli::{Cli, Commands};
use logfwd_cli::commands;
use logfwd_cli::error::CliError;
use logfwd_cli::logging;
use logfwd_cli::output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<(), CliError> {
    // config 명령은 자체적으로 설정 에러를 보고하므로 로깅은 기본값으로 시작
    let loaded = commands::load_config(&cli.config).await;
    let mut general = loaded
        .as_ref()
        .map(|c| c.general.clone())
        .unwrap_or_default();
    if let Some(level) = &cli.log_level {
        general.log_level = level.clone();
    }
    logging::init_tracing(&general).map_err(|e| CliError::Command(e.to_string()))?;
    logfwd_core::metrics::describe_all();

    tracing::debug!(config = %cli.config.display(), "logfwd starting");
    let writer = OutputWriter::new(cli.output);

    match cli.command {
        Commands::Normalize(args) => commands::normalize::execute(args, loaded?, &writer).await,
        Commands::Validate(args) => commands::validate::execute(args, loaded?, &writer).await,
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer).await,
    }
}
