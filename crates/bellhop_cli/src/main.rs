//! Bellhop CLI - mirror a Tumblr blog, its likes and subscriptions locally.

mod commands;
mod config;
mod progress;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::Term;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bellhop")]
#[command(version)]
#[command(about = "Mirror Tumblr posts, likes and subscriptions into a local database")]
#[command(
    long_about = "Bellhop copies your Tumblr blog's posts and your liked posts into a local \
database, downloads their photos and videos, and then clears them from Tumblr. It can also \
mirror the blogs you follow and replay them onto another account."
)]
#[command(after_long_help = r#"EXAMPLES
    Mirror your blog and likes:
        $ bellhop sync

    Replace local subscriptions with the blogs you follow:
        $ bellhop subs import

    Follow every stored subscription (e.g. from a new account):
        $ bellhop subs export

    Generate shell completions:
        $ bellhop completions bash > ~/.local/share/bash-completion/completions/bellhop

CONFIGURATION
    Bellhop reads configuration from:
      1. ~/.config/bellhop/config.toml (or $XDG_CONFIG_HOME/bellhop/config.toml)
      2. ./bellhop.toml
      3. Environment variables (BELLHOP_ prefix, `__` between section and key)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    BELLHOP_DATABASE__URL             Database connection string (default: ~/.local/state/bellhop/bellhop.db)
    BELLHOP_MEDIA__ROOT               Media directory (default: ~/.local/share/bellhop/media)
    BELLHOP_TUMBLR__BLOG              Blog to mirror
    BELLHOP_TUMBLR__CONSUMER_KEY      OAuth consumer key
    BELLHOP_TUMBLR__CONSUMER_SECRET   OAuth consumer secret
    BELLHOP_TUMBLR__OAUTH_TOKEN       OAuth access token
    BELLHOP_TUMBLR__OAUTH_SECRET      OAuth access token secret
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Mirror the blog's posts and your likes, then remove them from Tumblr
    Sync,
    /// Subscription mirroring
    Subs {
        #[command(subcommand)]
        action: SubsAction,
    },
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
    /// Generate man page(s)
    Man {
        /// Output directory for man pages (prints to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum SubsAction {
    /// Replace local subscriptions with the blogs you follow
    Import,
    /// Follow every stored subscription, oldest first
    Export,
}

#[derive(Subcommand)]
enum MigrateAction {
    /// Apply all pending migrations
    Up,
    /// Rollback the last migration
    Down,
    /// Show migration status
    Status,
    /// Fresh install - drop all tables and reapply migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    shutdown::setup_shutdown_handler();

    // Progress bars replace log output on a TTY.
    if !Term::stdout().is_term() {
        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new("bellhop=info,bellhop_cli=info"),
        };

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    }

    let config = config::Config::load();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Completions { shell } => {
            commands::meta::handle_completions(*shell)?;
            return Ok(());
        }
        Commands::Man { output } => {
            commands::meta::handle_man(output.clone())?;
            return Ok(());
        }
        _ => {}
    }

    let database_url = config
        .database_url()
        .ok_or("could not determine a database location; set database.url")?;

    if database_url.starts_with("sqlite://") {
        let db_path = database_url.trim_start_matches("sqlite://");
        // Strip query parameters (e.g., ?mode=rwc) before path operations
        let db_path = db_path.split('?').next().unwrap_or(db_path);
        let db_path = std::path::Path::new(db_path);

        if db_path.is_relative() && !db_path.as_os_str().is_empty() {
            tracing::warn!(
                "Database path '{}' is relative - behavior depends on current directory. \
                 Consider using an absolute path.",
                db_path.display()
            );
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
    }

    match cli.command {
        Commands::Sync => {
            commands::sync::handle_sync(&config, &database_url).await?;
        }
        Commands::Subs { action } => {
            commands::subs::handle_subs(action, &config, &database_url).await?;
        }
        Commands::Migrate { action } => {
            commands::migrate::handle_migrate(action, &database_url).await?;
        }
        Commands::Completions { .. } | Commands::Man { .. } => {}
    }

    Ok(())
}
