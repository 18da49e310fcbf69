use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qisports_core::AppConfig;

mod commands;

use commands::simulate::SimulateOptions;

#[derive(Parser)]
#[command(name = "qisports")]
#[command(author, version, about = "QI Sports site preview and motion simulator")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the terminal preview
    Preview {
        /// Location to open first
        #[arg(short, long, default_value = "/")]
        route: String,
    },
    /// Print the word fragments of a heading
    Split {
        text: String,
        /// Print JSON instead of one fragment per line
        #[arg(long)]
        json: bool,
    },
    /// Run the site headless and print a timeline of state changes
    Simulate {
        /// Navigate to these hrefs in order
        #[arg(short, long = "route")]
        routes: Vec<String>,
        /// Scroll to this offset after the first render
        #[arg(short, long)]
        scroll: Option<f64>,
        /// Time to run after each navigation
        #[arg(short, long, default_value_t = 12_000)]
        duration_ms: u64,
        /// Clock step
        #[arg(long, default_value_t = 100)]
        step_ms: u64,
        #[arg(long)]
        json: bool,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    let preview = matches!(cli.command, None | Some(Commands::Preview { .. }));
    init_logging(&config, preview)?;

    match cli.command {
        None => commands::preview::run(config, "/").await,
        Some(Commands::Preview { route }) => commands::preview::run(config, &route).await,
        Some(Commands::Split { text, json }) => commands::split::run(&text, json),
        Some(Commands::Simulate {
            routes,
            scroll,
            duration_ms,
            step_ms,
            json,
        }) => {
            let options = SimulateOptions {
                routes,
                scroll,
                duration_ms,
                step_ms,
            };
            commands::simulate::run(config, &options, json)
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Path => commands::config::path(),
            ConfigAction::Init { force } => commands::config::init(force),
        },
    }
}

/// Logs go to stderr, or to a file under the data dir while the preview owns the terminal
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    if to_file {
        std::fs::create_dir_all(config.data_dir())?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(config.log_path())?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}
