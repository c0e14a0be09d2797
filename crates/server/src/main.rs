use std::future::IntoFuture;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use hookrelay_core::{MessageBuilder, Notifier, sample_events};
use hookrelay_server::api::AppState;
use hookrelay_server::config::{EnvFile, RelayConfig, resolve_relative};
use hookrelay_server::oplog::OpLog;
use hookrelay_slack::SlackNotifier;

/// Property webhook to Slack relay.
#[derive(Parser, Debug)]
#[command(name = "hookrelay-server", about = "Relays property webhooks to Slack")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "hookrelay.toml")]
    config: String,

    /// Override the env file holding the bot token.
    #[arg(long)]
    env_file: Option<String>,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load the configuration and env file, print a redacted summary, and exit.
    CheckConfig,
    /// POST one sample delivery per property event to a running relay.
    SendSamples {
        /// Webhook URL of the relay under test.
        #[arg(long, default_value = "http://127.0.0.1:8080/webhook")]
        url: String,

        /// Pause between deliveries, in milliseconds.
        #[arg(long, default_value_t = 1000)]
        delay_ms: u64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = PathBuf::from(&cli.config);
    let config = RelayConfig::load(&config_path)?;

    hookrelay_server::telemetry::init(&config.telemetry);

    if !config_path.exists() {
        info!(path = %cli.config, "config file not found, using defaults");
    }

    if let Some(Commands::SendSamples { url, delay_ms }) = &cli.command {
        return run_send_samples(url, Duration::from_millis(*delay_ms)).await;
    }

    let env_path = cli.env_file.as_deref().map_or_else(
        || resolve_relative(&config_path, &config.env_file),
        PathBuf::from,
    );
    let env_file = EnvFile::load(&env_path)?;
    let token = env_file.resolve(&config.slack.token_var);

    if let Some(Commands::CheckConfig) = cli.command {
        print_summary(&config, &config_path, &env_path, token.is_some());
        return Ok(());
    }

    let notifier: Option<Arc<dyn Notifier>> = match token {
        Some(token) => {
            let notifier = SlackNotifier::new(config.slack.notifier_config(token))?;
            info!(
                api_base_url = %notifier.config().api_base_url,
                transport = ?notifier.config().transport,
                "slack notifier initialized"
            );
            let notifier: Arc<dyn Notifier> = Arc::new(notifier);
            Some(notifier)
        }
        None => {
            warn!(
                token_var = %config.slack.token_var,
                env_file = %env_path.display(),
                "bot token not set, known events will be answered with a configuration error"
            );
            None
        }
    };

    let oplog_path = resolve_relative(&config_path, &config.oplog.path);
    let state = AppState {
        builder: Arc::new(MessageBuilder::new(config.messages.settings())),
        channels: Arc::new(config.slack.channel_router()),
        notifier,
        oplog: Arc::new(OpLog::new(oplog_path, config.oplog.max_bytes)),
        token_var: config.slack.token_var.as_str().into(),
    };
    let app = hookrelay_server::api::router(state);

    // Resolve the bind address (CLI overrides take precedence).
    let host = cli.host.unwrap_or(config.server.host);
    let port = cli.port.unwrap_or(config.server.port);
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "hookrelay-server listening");

    // Serve with graceful shutdown on SIGINT / SIGTERM, bounded by the
    // configured drain timeout.
    let (signalled_tx, mut signalled_rx) = tokio::sync::watch::channel(false);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = signalled_tx.send(true);
        })
        .into_future();

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_seconds);
    let drain_deadline = async move {
        let _ = signalled_rx.changed().await;
        tokio::time::sleep(shutdown_timeout).await;
    };

    tokio::select! {
        result = server => result?,
        () = drain_deadline => {
            warn!(
                timeout_secs = config.server.shutdown_timeout_seconds,
                "shutdown timeout exceeded, in-flight deliveries may be lost"
            );
        }
    }

    info!("hookrelay-server shut down");
    Ok(())
}

/// Print the effective configuration with the token redacted.
fn print_summary(config: &RelayConfig, config_path: &Path, env_path: &Path, has_token: bool) {
    println!("config file:      {}", config_path.display());
    println!("env file:         {}", env_path.display());
    println!(
        "listen:           {}:{}",
        config.server.host, config.server.port
    );
    println!("slack api:        {}", config.slack.api_base_url);
    println!("slack transport:  {:?}", config.slack.transport);
    println!("slack timeout:    {}s", config.slack.timeout_seconds);
    let token_label = format!("{}:", config.slack.token_var);
    let token_state = if has_token { "[REDACTED]" } else { "<missing>" };
    println!("{token_label:<17} {token_state}");
    println!("default channel:  {}", config.slack.default_channel);
    println!("changed channel:  {}", config.slack.changed_channel);
    println!(
        "oplog:            {} (max {} bytes)",
        resolve_relative(config_path, &config.oplog.path).display(),
        config.oplog.max_bytes
    );
}

/// Run the `send-samples` subcommand: POST each sample event to `url` and
/// print the relay's answer.
async fn run_send_samples(url: &str, delay: Duration) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;

    info!(target_url = %url, "sending sample property events");

    let samples = sample_events();
    let total = samples.len();
    for (index, (kind, payload)) in samples.into_iter().enumerate() {
        let response = client.post(url).json(&payload).send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        println!("{kind}: {status} {body}");

        if index + 1 < total {
            tokio::time::sleep(delay).await;
        }
    }

    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM, then return to trigger graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("received SIGINT"); }
        () = terminate => { info!("received SIGTERM"); }
    }
}
