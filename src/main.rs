//! VoicePath - voice-driven browser path replay and contribution recording.
//!
//! Main entry point for the VoicePath CLI.

mod cli;
mod cmd_classify;
mod cmd_record;
mod cmd_replay;
mod prompt;

use clap::Parser;
use tracing::{debug, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use voicepath_config::{ConfigLoader, ConfigValidator, LoggingConfig};

use cli::{Cli, Commands};
use cmd_classify::handle_classify_command;
use cmd_record::handle_record_command;
use cmd_replay::{PathSource, handle_replay_command};

fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = ConfigLoader::expand_path(&logging.dir);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("voicepath")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Flushes the file writer when the process exits.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = ConfigLoader::load_or_default(&cli.config)?;
    init_tracing(&config.logging)?;
    debug!("Loaded configuration from {}", cli.config.display());

    let warnings = ConfigValidator::validate(&config)?.into_result()?;
    for warning in warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }

    match cli.command {
        Commands::Replay { file, query, domain } => {
            let source = match (file, query) {
                (Some(file), _) => PathSource::File(file),
                (None, Some(query)) => PathSource::Query { query, domain },
                (None, None) => return Err("replay needs --file or --query".into()),
            };
            handle_replay_command(&config, source).await
        }
        Commands::Record { task, events } => {
            handle_record_command(&config, &task, events.as_deref()).await
        }
        Commands::Classify {
            message,
            context,
            json,
        } => handle_classify_command(&message, &context, json),
    }
}
