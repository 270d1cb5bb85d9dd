//! Loftbook - terminal client for a shared aerial-skills table
//!
//! - Browse and filter the table without logging in
//! - Unlock editing with the shared admin passcode
//! - `loftbook serve` runs the API server from the same binary

use anyhow::Result;
use clap::{Parser, Subcommand};

mod client;
mod serve;
mod tui;

/// Loftbook - aerial skills tracker
#[derive(Parser)]
#[command(name = "loftbook")]
#[command(about = "Track aerial-arts skills in a shared table", long_about = None)]
struct Cli {
    /// Server to connect to
    #[arg(long, default_value = "http://localhost:3000")]
    server: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Loftbook API server
    ///
    /// Reads ADMIN_PASSWORD from the environment; without it the table
    /// stays read-only for every client.
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
}

/// Restore terminal state - called on panic or unexpected exit
fn restore_terminal() {
    use crossterm::{
        execute,
        terminal::{disable_raw_mode, LeaveAlternateScreen},
    };
    let _ = disable_raw_mode();
    let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Serve mode has its own logging (stdout), skip TUI logging setup
    if let Some(Commands::Serve { port }) = cli.command {
        return serve::run(port).await;
    }

    // Set up panic hook to restore terminal state
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));

    // Log to a file, never stdout/stderr, which would corrupt the TUI.
    let log_dir = loftbook_core::paths::logs_dir();
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Failed to create log directory: {}", e);
    }
    match std::fs::File::create(log_dir.join("loftbook.log")) {
        Ok(log_file) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::INFO.into()),
                )
                .with_writer(std::sync::Mutex::new(log_file))
                .with_ansi(false)
                .init();
        }
        Err(e) => {
            eprintln!("Failed to create log file, logging disabled: {}", e);
        }
    }

    tui::run(&cli.server).await
}
