//! Synchronous retrain from the memory file.

use console::style;

use mimic_types::model::TrainOutcome;

use crate::state::AppState;

pub async fn train(state: &AppState, json: bool) -> anyhow::Result<()> {
    let outcome = state.pipeline.lock().await.train_now().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!();
    match outcome {
        TrainOutcome::Trained(report) => {
            println!(
                "  {} Trained {} on {} exchanges",
                style("✓").green().bold(),
                style(&state.config.model_name).bold(),
                report.samples
            );
            if report.skipped > 0 {
                println!("  {:<12} {}", style("Skipped").dim(), report.skipped);
            }
            println!("  {:<12} {}", style("Epochs").dim(), report.epochs);
            println!("  {:<12} {:.6}", style("Final loss").dim(), report.final_loss);
            println!("  {:<12} {}", style("Trained at").dim(), report.trained_at.to_rfc3339());
        }
        TrainOutcome::NoData => {
            println!(
                "  {} Nothing to train on yet, the memory file has no usable exchanges",
                style("!").yellow().bold()
            );
        }
        TrainOutcome::AlreadyRunning => {
            println!("  {} A training pass is already running", style("!").yellow().bold());
        }
        TrainOutcome::NotSupported => {
            println!(
                "  {} The {:?} responder does not train locally",
                style("!").yellow().bold(),
                state.config.responder
            );
        }
    }
    println!();
    Ok(())
}
