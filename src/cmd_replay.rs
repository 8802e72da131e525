//! `voicepath replay` handler.

use std::path::Path as FsPath;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{info, warn};
use voicepath_browser::PlaywrightBrowser;
use voicepath_client::PathApiClient;
use voicepath_config::Config;
use voicepath_executor::{ExecutionHooks, ExecutionResult, InputValueProvider, PathExecutor};
use voicepath_protocols::{BrowserControl, Path, Step, TransportError, WirePath};
use voicepath_recovery::{ExceptionHandler, RecoveryOutcome, recovery_action};

use crate::prompt::{Prompt, print_dialog, resolve_dialog};

/// Where the path to replay comes from.
pub(crate) enum PathSource {
    File(std::path::PathBuf),
    Query { query: String, domain: Option<String> },
}

/// Asks the user on the terminal for values the profile cannot supply.
struct PromptValueProvider {
    prompt: Arc<Prompt>,
}

#[async_trait]
impl InputValueProvider for PromptValueProvider {
    async fn value_for(&self, step: &Step) -> Option<String> {
        let label = match step.input_placeholder() {
            Some(placeholder) => placeholder.to_string(),
            None => step.display_label().to_string(),
        };
        self.prompt.ask(&format!("Value for \"{}\":", label)).await
    }
}

pub(crate) async fn handle_replay_command(
    config: &Config,
    source: PathSource,
) -> Result<(), Box<dyn std::error::Error>> {
    let prompt = Arc::new(Prompt::new());
    let handler = ExceptionHandler::new();

    let path = match source {
        PathSource::File(file) => load_path_file(&file)?,
        PathSource::Query { query, domain } => {
            search_best(config, &handler, &prompt, &query, domain.as_deref()).await?
        }
    };
    info!(
        "Replaying '{}' on {} ({} steps)",
        path.task_intent(),
        if path.domain().is_empty() { "-" } else { path.domain() },
        path.len()
    );

    let browser = Arc::new(PlaywrightBrowser::new(config.browser.clone()));
    if let Err(e) = browser.init().await {
        if let RecoveryOutcome::DialogRequested(dialog) =
            handler.handle(&e, "browser startup", None).await
        {
            print_dialog(&dialog);
        }
        return Err(e.into());
    }

    let executor = Arc::new(PathExecutor::new(browser.clone(), config.executor.clone()));
    let hooks = replay_hooks(config, &executor, &prompt);
    let result = executor.execute(path, hooks).await;

    if let Err(e) = browser.shutdown().await {
        warn!("Browser shutdown failed: {}", e);
    }
    report(&result)
}

fn replay_hooks(
    config: &Config,
    executor: &Arc<PathExecutor>,
    prompt: &Arc<Prompt>,
) -> ExecutionHooks {
    let confirm_executor = Arc::clone(executor);
    let confirm_prompt = Arc::clone(prompt);

    ExecutionHooks::new()
        .with_user_context(config.profile.clone())
        .with_value_provider(Arc::new(PromptValueProvider {
            prompt: Arc::clone(prompt),
        }))
        .on_step_complete(|index, total, label| {
            println!("[{}/{}] {}", index + 1, total, label);
        })
        .on_wait_for_user(move |message| {
            let executor = Arc::clone(&confirm_executor);
            let prompt = Arc::clone(&confirm_prompt);
            let message = message.to_string();
            tokio::spawn(async move {
                prompt
                    .ask(&format!("{} (press Enter to continue)", message))
                    .await;
                if !executor.confirm() {
                    warn!("No step was waiting for confirmation");
                }
            });
        })
}

fn report(result: &ExecutionResult) -> Result<(), Box<dyn std::error::Error>> {
    if result.success {
        println!(
            "Replay finished: {}/{} steps",
            result.steps_completed, result.total_steps
        );
        return Ok(());
    }

    match &result.error_record {
        Some(record) => {
            println!(
                "Replay stopped at step {}: {}",
                result.failed_at.map(|i| i + 1).unwrap_or(0),
                record
            );
            Err(record.to_string().into())
        }
        None => Err(result
            .error
            .clone()
            .unwrap_or_else(|| "replay failed".to_string())
            .into()),
    }
}

fn load_path_file(file: &FsPath) -> Result<Path, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(file)
        .map_err(|e| format!("Failed to read {}: {}", file.display(), e))?;
    let wire: WirePath = serde_json::from_str(&content)?;
    Ok(wire.into_path())
}

/// Search, retrying through the exception handler, and take the top-ranked path.
async fn search_best(
    config: &Config,
    handler: &ExceptionHandler,
    prompt: &Prompt,
    query: &str,
    domain: Option<&str>,
) -> Result<Path, Box<dyn std::error::Error>> {
    let client = Arc::new(PathApiClient::new(
        &config.api.base_url,
        Duration::from_secs(config.api.timeout_secs),
    )?);
    let limit = config.api.search_limit;

    let paths = match client.search(query, limit, domain).await {
        Ok(paths) => paths,
        Err(e) => {
            let error: TransportError = e.into();
            let found: Arc<Mutex<Option<Vec<Path>>>> = Arc::new(Mutex::new(None));
            let action = {
                let client = Arc::clone(&client);
                let found = Arc::clone(&found);
                let query = query.to_string();
                let domain = domain.map(str::to_string);
                recovery_action(move || {
                    let client = Arc::clone(&client);
                    let found = Arc::clone(&found);
                    let query = query.clone();
                    let domain = domain.clone();
                    async move {
                        let paths = client.search(&query, limit, domain.as_deref()).await?;
                        *found.lock() = Some(paths);
                        Ok(())
                    }
                })
            };

            match handler.handle(&error, "path search", Some(action)).await {
                RecoveryOutcome::Recovered { .. } => {}
                RecoveryOutcome::DialogRequested(dialog) => {
                    if !resolve_dialog(prompt, &dialog).await? {
                        return Err(error.into());
                    }
                    handler.dismiss();
                }
                RecoveryOutcome::Failed { record, .. } => return Err(record.to_string().into()),
            }
            let recovered = found.lock().take();
            recovered.unwrap_or_default()
        }
    };

    paths
        .into_iter()
        .next()
        .ok_or_else(|| format!("No path found for '{}'", query).into())
}
