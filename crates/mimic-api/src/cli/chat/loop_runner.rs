//! Line-oriented chat loop over stdin.

use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use mimic_types::message::InboundMessage;

use crate::state::AppState;

use super::renderer::render;

/// Author id used for everything typed at the console.
const CONSOLE_AUTHOR: &str = "console";

/// Run the console adapter until EOF or Ctrl+C.
pub async fn run_console(state: &AppState, channel: &str) -> anyhow::Result<()> {
    if !state.config.allowed_channel_ids.iter().any(|id| id == channel) {
        println!(
            "  {} channel '{}' is not in allowed_channel_ids, messages will be ignored",
            style("!").yellow().bold(),
            channel
        );
    }

    state.start_training().await;

    println!(
        "  {} {} on #{} ({})",
        style("💬").bold(),
        style(&state.config.model_name).bold(),
        style(channel).cyan(),
        style("Ctrl+D to quit").dim()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let message = InboundMessage::from_user(CONSOLE_AUTHOR, channel, line);
        let reply = state.pipeline.lock().await.handle(&message).await;
        if let Some(reply) = reply {
            println!("{}", render(&reply, tracing::enabled!(tracing::Level::DEBUG)));
        }
    }

    info!(channel, "console session ended");
    Ok(())
}
