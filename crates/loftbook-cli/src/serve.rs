//! `loftbook serve` - run the API server from the client binary.

use anyhow::Result;

/// Run the serve command.
pub async fn run(port: u16) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    println!();
    println!("  \x1b[1;35mLoftbook\x1b[0m server starting");
    println!("  ─────────────────────────────────────");
    println!("  Local:  http://localhost:{}", port);
    println!();

    let config = loftbook_server::ServerConfig {
        port,
        ..Default::default()
    };

    let server = loftbook_server::start_server(config);
    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for ctrl+c");
    };

    tokio::select! {
        result = server => result?,
        _ = shutdown_signal => {
            println!("\n  Shutting down...");
        }
    }

    Ok(())
}
