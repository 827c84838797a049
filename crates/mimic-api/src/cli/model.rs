//! Informational query about the running model.

use console::style;
use serde::Serialize;

use mimic_infra::filesystem::memory_path;
use mimic_types::config::ResponderKind;
use mimic_types::model::Readiness;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ModelSummary {
    pub model_name: String,
    pub info: String,
    pub responder: ResponderKind,
    pub readiness: Readiness,
    pub exchanges: usize,
    pub memory_file: String,
}

pub async fn summarize(state: &AppState) -> ModelSummary {
    let pipeline = state.pipeline.lock().await;
    ModelSummary {
        model_name: state.config.model_name.clone(),
        info: pipeline.model_info(),
        responder: state.config.responder,
        readiness: pipeline.readiness().await,
        exchanges: pipeline.memory().len(),
        memory_file: memory_path(&state.data_dir, &state.config.memory_file)
            .display()
            .to_string(),
    }
}

pub async fn show_model(state: &AppState, json: bool) -> anyhow::Result<()> {
    let summary = summarize(state).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!();
    println!("  {}", summary.info);
    println!();
    println!("  {:<12} {:?}", style("Responder").dim(), summary.responder);
    println!("  {:<12} {}", style("Readiness").dim(), summary.readiness);
    println!("  {:<12} {}", style("Exchanges").dim(), summary.exchanges);
    println!("  {:<12} {}", style("Memory").dim(), summary.memory_file);
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mimic_types::config::BotConfig;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_summary_reports_readiness() {
        let tmp = TempDir::new().unwrap();
        let state = AppState::from_config(tmp.path().to_path_buf(), BotConfig::default())
            .await
            .unwrap();

        let summary = summarize(&state).await;
        assert_eq!(summary.readiness, Readiness::Untrained);
        assert_eq!(summary.exchanges, 0);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["readiness"], "untrained");
        assert_eq!(json["responder"], "trained");
    }

    #[tokio::test]
    async fn test_summary_after_training_is_ready() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("exchanges.json"),
            r#"[{ "input": "hello", "output": "hi" }]"#,
        )
        .unwrap();
        let mut config = BotConfig::default();
        config.training.epochs = 2;
        let state = AppState::from_config(tmp.path().to_path_buf(), config).await.unwrap();

        state.pipeline.lock().await.train_now().await.unwrap();
        assert_eq!(summarize(&state).await.readiness, Readiness::Ready);
    }
}
