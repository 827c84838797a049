//! Mimic CLI and HTTP adapter entry point.
//!
//! Binary name: `mimic`
//!
//! Parses CLI arguments, loads configuration and memory, then dispatches to
//! the requested command or starts the HTTP adapter.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,mimic=debug",
        _ => "trace",
    };

    mimic_observe::tracing_setup::init_tracing(filter, cli.json_logs, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "mimic", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.data_dir.clone()).await?;

    let result = match cli.command {
        Commands::Serve { port, host } => serve(state, &host, port).await,
        Commands::Chat { channel } => cli::chat::run_console(&state, &channel).await,
        Commands::Ask { question } => cli::ask::ask(&state, &question.join(" "), cli.json).await,
        Commands::Model => cli::model::show_model(&state, cli.json).await,
        Commands::Train => cli::train::train(&state, cli.json).await,
        Commands::Completions { .. } => unreachable!("handled above"),
    };

    mimic_observe::tracing_setup::shutdown_tracing();
    result
}

async fn serve(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    state.start_training().await;

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    println!(
        "  {} {} listening on {}",
        console::style("⚡").bold(),
        console::style(&state.config.model_name).bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
pub(crate) async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
