//! CLI entrypoint for toolchat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use toolchat_application::{RunChatInput, RunChatUseCase};
use toolchat_domain::ConversationHistory;
use toolchat_infrastructure::{
    ConfigLoader, FileConfig, GeminiConfig, GeminiGateway, JsonSchemaToolConverter,
    JsonlConversationLogger, LocalToolExecutor, WeatherClient,
};
use toolchat_presentation::{AppState, Cli, Command, router, serve};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        let config = load_config(&cli)?;
        println!();
        println!("{}", ConfigLoader::render(&config)?);
        return Ok(());
    }

    let config = load_config(&cli)?;
    let execution = config.agent.to_execution_params();

    info!("Starting toolchat (model: {})", config.gemini.model);

    // === Dependency Injection ===
    let run_chat = build_use_case(&config)?;

    match cli.resolved_command() {
        Command::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let app = router(
                AppState::new(run_chat, execution),
                &config.server.allowed_origins,
            )?;
            let listener = tokio::net::TcpListener::bind((host.as_str(), port))
                .await
                .with_context(|| format!("failed to bind {}:{}", host, port))?;

            serve(listener, app).await?;
        }
        Command::Ask { message } => {
            let output = run_chat
                .execute(RunChatInput::new(
                    ConversationHistory::new(),
                    message,
                    execution,
                ))
                .await?;
            println!("{}", output.reply);
        }
    }

    Ok(())
}

/// Initialize logging based on verbosity level; `RUST_LOG` wins when set.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match &cli.log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("invalid log file path: {}", path.display()))?;
            std::fs::create_dir_all(dir)?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            builder.with_writer(writer).with_ansi(false).init();
            Ok(Some(guard))
        }
        None => {
            builder.with_writer(std::io::stderr).init();
            Ok(None)
        }
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    if cli.no_config {
        return Ok(ConfigLoader::load_defaults());
    }
    Ok(ConfigLoader::load(cli.config.as_deref())?)
}

fn build_use_case(config: &FileConfig) -> Result<RunChatUseCase> {
    let gemini = GeminiConfig::new(config.gemini.resolve_api_key()?)
        .with_base_url(&config.gemini.base_url)
        .with_model(&config.gemini.model)
        .with_max_output_tokens(config.gemini.max_output_tokens)
        .with_temperature(config.gemini.temperature)
        .with_system_prompt(config.gemini.system_prompt.clone())
        .with_timeout(Duration::from_secs(config.gemini.timeout_seconds));
    let gateway = Arc::new(GeminiGateway::new(gemini)?);

    let weather = WeatherClient::new(
        config.weather.resolve_api_key()?,
        &config.weather.base_url,
        &config.weather.lang,
        Duration::from_secs(config.weather.timeout_seconds),
    )?;
    let tools = Arc::new(LocalToolExecutor::new(weather));

    let mut use_case = RunChatUseCase::new(gateway, tools, Arc::new(JsonSchemaToolConverter));

    if let Some(path) = &config.logging.conversation_log {
        let logger = JsonlConversationLogger::open(path)
            .with_context(|| format!("failed to open conversation log {}", path.display()))?;
        info!("Conversation log: {}", logger.path().display());
        use_case = use_case.with_conversation_logger(Arc::new(logger));
    }

    Ok(use_case)
}
