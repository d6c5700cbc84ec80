/*
[INPUT]:  CLI arguments, YAML settings file, OS shutdown signals
[OUTPUT]: REST query results and feed frames on stdout
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, subcommands, or shutdown handling
*/

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use coinbase_pro_adapter::http::ApiEndpoint;
use coinbase_pro_adapter::ws::SubscriptionAction;
use coinbase_pro_adapter::{ClientConfig, CoinbaseClient, Stream, SubscribeMessage};
use serde_json::Value;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use coinbase_pro_cli::{Settings, commands};

#[derive(Parser, Debug)]
#[command(name = "coinbase-pro", version, about = "Coinbase Pro REST and feed client")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info", global = true)]
    log_level: String,
    /// Use the sandbox authorities
    #[arg(long, global = true)]
    sandbox: bool,
    /// Validate settings and exit
    #[arg(long = "dry-run")]
    dry_run: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the exchange server time
    Time,
    /// Send one GET request
    Get {
        path: String,
        /// Query parameter as key=value, repeatable
        #[arg(long = "query", value_name = "KEY=VALUE")]
        query: Vec<String>,
    },
    /// Follow CB-AFTER cursors and print every page
    Page {
        path: String,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long = "query", value_name = "KEY=VALUE")]
        query: Vec<String>,
    },
    /// Subscribe to feed channels and print frames
    Stream {
        #[arg(long = "product", required = true)]
        products: Vec<String>,
        #[arg(long = "channel", required = true)]
        channels: Vec<String>,
        /// Stop after this many frames
        #[arg(long)]
        count: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let settings = load_settings(args.config_path.as_ref())?;
    let client = CoinbaseClient::with_credentials(
        ClientConfig::default(),
        settings.rest_api(args.sandbox),
        settings.credentials(args.sandbox),
    )
    .context("build REST client")?;
    info!(
        rest = client.api().url(),
        stream = settings.stream_url(args.sandbox),
        authenticated = client.is_authenticated(),
        sandbox = args.sandbox,
        "settings loaded"
    );

    if args.dry_run {
        info!("dry-run requested; settings validated");
        return Ok(());
    }

    let Some(command) = args.command else {
        bail!("no command given, see --help");
    };

    match command {
        Command::Time => {
            let time = commands::server_time(&client).await?;
            println!("{} ({})", time.iso, time.epoch);
        }
        Command::Get { path, query } => {
            let query = commands::parse_query(&query)?;
            let (status, body) = commands::fetch(&client, &path, query).await?;
            println!("{status}");
            print_json(&body)?;
        }
        Command::Page { path, limit, query } => {
            let query = commands::parse_query(&query)?;
            let pages = commands::fetch_pages(&client, &path, query, limit).await?;
            for page in &pages {
                print_json(page)?;
            }
            info!(pages = pages.len(), "done");
        }
        Command::Stream {
            products,
            channels,
            count,
        } => {
            let shutdown = CancellationToken::new();
            setup_signal_handlers(shutdown.clone());

            let mut stream = Stream::with_credentials(
                settings.stream_url(args.sandbox),
                settings.credentials(args.sandbox),
            );
            let subscribe = SubscribeMessage {
                action: SubscriptionAction::Subscribe,
                product_ids: products,
                channels,
            };
            let delivered = commands::stream_messages(&mut stream, &subscribe, count, shutdown, |frame| {
                if let Err(err) = print_json(frame) {
                    warn!(error = %err, "failed to print frame");
                }
            })
            .await?;
            info!(frames = delivered, "stream finished");
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let path_str = path.to_str().context("config path must be valid utf-8")?;
    Settings::from_file(path_str).context("load settings")
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
