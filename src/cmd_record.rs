//! `voicepath record` handler.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use voicepath_client::WsTransport;
use voicepath_config::Config;
use voicepath_protocols::RecordedStep;
use voicepath_recorder::{ContributionRecorder, RecorderError};
use voicepath_recovery::{ExceptionHandler, RecoveryOutcome, recovery_action};

use crate::prompt::{Prompt, resolve_dialog};

#[derive(Debug, Default, PartialEq, Eq)]
struct FeedSummary {
    accepted: usize,
    rejected: usize,
}

pub(crate) async fn handle_record_command(
    config: &Config,
    task: &str,
    events: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let timeout = Duration::from_secs(config.api.timeout_secs);
    let transport =
        Arc::new(WsTransport::new(config.api.ws_url.clone()).with_timeouts(timeout, timeout));
    let recorder = Arc::new(ContributionRecorder::new(transport, config.recorder.clone()));

    let mut states = recorder.subscribe();
    tokio::spawn(async move {
        while states.changed().await.is_ok() {
            let state = *states.borrow_and_update();
            info!("Recorder state: {}", state);
        }
    });

    let session_id = recorder.start_session(task)?;
    println!("Recording session {}", session_id);

    let summary = match events {
        Some(file) => {
            let file = tokio::fs::File::open(file)
                .await
                .map_err(|e| format!("Failed to open {}: {}", file.display(), e))?;
            feed_events(&recorder, BufReader::new(file)).await?
        }
        None => feed_events(&recorder, BufReader::new(tokio::io::stdin())).await?,
    };
    info!(
        "Fed {} event(s), rejected {}",
        summary.accepted, summary.rejected
    );

    if !recorder.is_recording() {
        println!("Session already ended: {}", recorder.state());
        return Ok(());
    }

    match recorder.end_session().await {
        Ok(()) => {
            println!("Contribution sent ({} events)", summary.accepted);
            Ok(())
        }
        Err(e @ RecorderError::Transmission { .. }) => recover_transmission(&recorder, e).await,
        Err(e) => Err(e.into()),
    }
}

/// Feed JSON-lines events into the recorder until EOF or the session ends.
async fn feed_events<R>(
    recorder: &ContributionRecorder,
    reader: R,
) -> Result<FeedSummary, Box<dyn std::error::Error>>
where
    R: AsyncBufRead + Unpin,
{
    let mut summary = FeedSummary::default();
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let step: RecordedStep = match serde_json::from_str(line) {
            Ok(step) => step,
            Err(e) => {
                warn!("Skipping malformed event: {}", e);
                summary.rejected += 1;
                continue;
            }
        };

        match recorder.record_step(step) {
            Ok(_) => summary.accepted += 1,
            Err(RecorderError::InvalidStep(reason)) => {
                warn!("Skipping invalid event: {}", reason);
                summary.rejected += 1;
            }
            Err(RecorderError::NotActive) => {
                warn!("Session ended while events were still arriving");
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(summary)
}

async fn recover_transmission(
    recorder: &Arc<ContributionRecorder>,
    error: RecorderError,
) -> Result<(), Box<dyn std::error::Error>> {
    let handler = ExceptionHandler::new();
    let action = {
        let recorder = Arc::clone(recorder);
        recovery_action(move || {
            let recorder = Arc::clone(&recorder);
            async move { recorder.retry_transmission().await.map_err(Into::into) }
        })
    };

    match handler.handle(&error, "contribution upload", Some(action)).await {
        RecoveryOutcome::Recovered { attempts, .. } => {
            println!("Contribution sent after {} retry attempt(s)", attempts);
            Ok(())
        }
        RecoveryOutcome::DialogRequested(dialog) => {
            if resolve_dialog(&Prompt::new(), &dialog).await? {
                println!("Contribution sent");
                return Ok(());
            }
            println!(
                "{} step(s) kept unsent for session {}",
                recorder.buffered_steps(),
                recorder.snapshot().map(|s| s.id).unwrap_or_default()
            );
            Err(error.into())
        }
        RecoveryOutcome::Failed { record, .. } => Err(record.to_string().into()),
    }
}
