use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use update_feed::config::{FeedConfig, CONFIG_FILE};
use update_feed::models::ComponentKind;
use update_feed::Result;

#[derive(Parser)]
#[command(name = "update-feed")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Self-hosted plugin and theme update feed", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve update checks and detail lookups over HTTP
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the detail record for an endpoint document as JSON
    Parse {
        /// Endpoint document
        file: PathBuf,

        /// Requesting site URL (affects pending-update gating)
        #[arg(long)]
        site_url: Option<String>,

        /// Screenshot URL, in order (repeatable)
        #[arg(long = "screenshot")]
        screenshots: Vec<String>,
    },

    /// Check an endpoint document for missing essentials
    Check {
        /// Endpoint document
        file: PathBuf,
    },

    /// Create a draft endpoint document
    New {
        /// Plugin identifier (folder/file.php) or theme slug
        identifier: String,

        /// Component kind (plugin, theme)
        #[arg(short, long, default_value = "plugin")]
        kind: ComponentKind,

        /// Endpoint directory (defaults to the configured one)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// List endpoints
    List {
        /// Endpoint directory (defaults to the configured one)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing(config: &FeedConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create tokio runtime");

    if let Err(e) = runtime.block_on(run_async(cli)) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

async fn run_async(cli: Cli) -> Result<()> {
    let config = FeedConfig::load(&cli.config)?;
    init_tracing(&config);

    match cli.command {
        Commands::Serve { port } => {
            println!("{}", "🚀 Starting update feed...".cyan());
            update_feed::cli::serve::run(config, port).await?;
        }

        Commands::Parse {
            file,
            site_url,
            screenshots,
        } => {
            update_feed::cli::parse::run(&file, site_url.as_deref(), &screenshots, &config)?;
        }

        Commands::Check { file } => {
            update_feed::cli::check::run(&file)?;
        }

        Commands::New {
            identifier,
            kind,
            dir,
        } => {
            let dir = dir.unwrap_or_else(|| config.endpoints_dir.clone());
            update_feed::cli::new::run(&identifier, kind, &dir)?;
        }

        Commands::List { dir } => {
            let dir = dir.unwrap_or_else(|| config.endpoints_dir.clone());
            update_feed::cli::list::run(&dir)?;
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "update-feed", &mut io::stdout());
        }
    }

    Ok(())
}
