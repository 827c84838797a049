//! One-shot question to the active responder.

use console::style;
use tracing::debug;

use crate::state::AppState;

/// Fit the model from memory (when it learns locally), then answer `question`.
pub async fn ask(state: &AppState, question: &str, json: bool) -> anyhow::Result<()> {
    let answer = {
        let mut pipeline = state.pipeline.lock().await;
        let outcome = pipeline.train_now().await?;
        debug!(?outcome, "model prepared for one-shot question");
        pipeline.ask(question).await
    };

    if json {
        let output = serde_json::json!({
            "question": question,
            "answer": answer,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!();
        println!("  {} {}", style("?").cyan().bold(), question);
        println!("  {} {}", style("›").green().bold(), answer);
        println!();
    }
    Ok(())
}
