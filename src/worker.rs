use crate::{
    api::{ApiError, ClientOptions, GeminiClient},
    messages::{UiMessage, WorkerMessage},
    parser::SongSheet,
};
use anyhow::Result;
use tokio::sync::mpsc;

/// Serve generation requests from the TUI, one at a time, until Quit
pub async fn run(
    options: ClientOptions,
    tx: mpsc::UnboundedSender<WorkerMessage>,
    mut ui_rx: mpsc::UnboundedReceiver<UiMessage>,
) -> Result<()> {
    tracing::info!("Worker started (model: {})", options.model);

    while let Some(msg) = ui_rx.recv().await {
        match msg {
            UiMessage::Generate { api_key, topic } => {
                tx.send(WorkerMessage::Generating {
                    topic: topic.clone(),
                })?;

                let client = GeminiClient::new(api_key, options.clone());
                match generate_sheet(&client, &topic).await {
                    Ok(sheet) => {
                        tracing::info!(
                            "Generated sheet ({} style chars, {} lyrics chars)",
                            sheet.style.chars().count(),
                            sheet.lyrics.chars().count()
                        );
                        tx.send(WorkerMessage::Generated { sheet })?;
                    }
                    Err(e) => {
                        tracing::error!("Lyrics generation failed: {}", e);
                        tx.send(WorkerMessage::Failed {
                            error: e.to_string(),
                        })?;
                    }
                }
            }
            UiMessage::Quit => {
                tracing::info!("Worker received quit signal");
                break;
            }
        }
    }

    tracing::debug!("Worker shutting down");
    Ok(())
}

/// Request lyrics for `topic` and split the reply into a [`SongSheet`]
pub async fn generate_sheet(client: &GeminiClient, topic: &str) -> Result<SongSheet, ApiError> {
    tracing::info!("Generating lyrics for topic ({} chars)", topic.chars().count());
    let response = client.generate_lyrics(topic).await?;
    Ok(SongSheet::parse(&response))
}
