//! Node.js Playwright bridge.
//!
//! Manages a Node.js child process that runs Playwright commands. Requests and
//! responses are single-line JSON objects over stdin/stdout, matched by id.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, Command};
use tokio::sync::{Mutex, RwLock, oneshot};
use tracing::{debug, error, info, warn};

use crate::config::PlaywrightConfig;
use crate::error::PlaywrightError;

const BRIDGE_SCRIPT: &str = include_str!("bridge_script.js");

#[derive(Debug, Serialize)]
struct BridgeRequest<'a> {
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct BridgeResponse {
    id: u64,
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<BridgeErrorResponse>,
}

#[derive(Debug, Deserialize)]
struct BridgeErrorResponse {
    message: String,
    /// Playwright error class, e.g. `TimeoutError`.
    #[serde(default)]
    name: Option<String>,
}

impl BridgeErrorResponse {
    fn into_error(self) -> PlaywrightError {
        match self.name.as_deref() {
            Some("TimeoutError") => PlaywrightError::Timeout(self.message),
            _ => PlaywrightError::BridgeError(self.message),
        }
    }
}

type PendingRequests = HashMap<u64, oneshot::Sender<Result<serde_json::Value, PlaywrightError>>>;

pub struct PlaywrightBridge {
    config: PlaywrightConfig,
    process: Mutex<Option<Child>>,
    stdin: Mutex<Option<ChildStdin>>,
    request_id: AtomicU64,
    pending_requests: Arc<RwLock<PendingRequests>>,
}

impl PlaywrightBridge {
    pub fn new(config: PlaywrightConfig) -> Self {
        Self {
            config,
            process: Mutex::new(None),
            stdin: Mutex::new(None),
            request_id: AtomicU64::new(1),
            pending_requests: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &PlaywrightConfig {
        &self.config
    }

    /// Start the bridge process and wait until it answers a ping.
    pub async fn start(&self) -> Result<(), PlaywrightError> {
        let node_path = self.find_node()?;
        let script_path = self.script_path().await?;

        info!("Starting Playwright bridge at {:?}", script_path);

        let mut child = Command::new(&node_path)
            .arg(&script_path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| PlaywrightError::BridgeStartFailed(e.to_string()))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| PlaywrightError::BridgeStartFailed("Failed to get stdin".to_string()))?;

        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    warn!("[Playwright Bridge] {}", line);
                }
            });
        }

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| PlaywrightError::BridgeStartFailed("Failed to get stdout".to_string()))?;

        let pending = Arc::clone(&self.pending_requests);
        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if line.trim().is_empty() {
                    continue;
                }
                debug!("Bridge response: {}", truncate(&line, 200));

                match serde_json::from_str::<BridgeResponse>(&line) {
                    Ok(response) => {
                        if let Some(sender) = pending.write().await.remove(&response.id) {
                            let result = match response.error {
                                Some(err) => Err(err.into_error()),
                                None => Ok(response.result.unwrap_or(serde_json::Value::Null)),
                            };
                            let _ = sender.send(result);
                        }
                    }
                    Err(e) => error!("Failed to parse bridge response: {} - {}", e, line),
                }
            }

            // stdout closed: nothing will answer the requests still waiting
            let mut pending = pending.write().await;
            for (_, sender) in pending.drain() {
                let _ = sender.send(Err(PlaywrightError::BridgeDied(
                    "bridge stdout closed".to_string(),
                )));
            }
        });

        *self.process.lock().await = Some(child);
        *self.stdin.lock().await = Some(stdin);

        let ready = self.call("ping", serde_json::json!({})).await?;
        if ready.as_str() != Some("pong") {
            return Err(PlaywrightError::BridgeStartFailed(
                "Bridge did not respond correctly to ping".to_string(),
            ));
        }

        info!("Playwright bridge started successfully");
        Ok(())
    }

    /// Ask the bridge to shut down, then kill the process.
    pub async fn stop(&self) -> Result<(), PlaywrightError> {
        if self.is_running().await {
            let _ = self.call("shutdown", serde_json::json!({})).await;
        }
        self.stdin.lock().await.take();

        if let Some(mut child) = self.process.lock().await.take() {
            let _ = child.kill().await;
        }

        info!("Playwright bridge stopped");
        Ok(())
    }

    pub async fn is_running(&self) -> bool {
        self.stdin.lock().await.is_some()
    }

    /// Call a bridge method and wait for its result.
    pub async fn call(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, PlaywrightError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let request_json = serde_json::to_string(&BridgeRequest { id, method, params })?;

        debug!("Bridge request: {}", truncate(&request_json, 200));

        let (tx, rx) = oneshot::channel();
        self.pending_requests.write().await.insert(id, tx);

        let written = {
            let mut stdin_guard = self.stdin.lock().await;
            match stdin_guard.as_mut() {
                Some(stdin) => write_line(stdin, &request_json).await,
                None => Err(PlaywrightError::NotInitialized),
            }
        };
        if let Err(e) = written {
            self.pending_requests.write().await.remove(&id);
            return Err(e);
        }

        let timeout = Duration::from_millis(self.config.response_timeout_ms);
        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(PlaywrightError::CommunicationError(
                "Response channel closed".to_string(),
            )),
            Err(_) => {
                self.pending_requests.write().await.remove(&id);
                Err(PlaywrightError::Timeout(format!(
                    "Method {} timed out after {}ms",
                    method, self.config.response_timeout_ms
                )))
            }
        }
    }

    fn find_node(&self) -> Result<PathBuf, PlaywrightError> {
        if let Some(ref path) = self.config.node_path {
            return Ok(path.clone());
        }

        let candidates = [
            "node",
            "/usr/local/bin/node",
            "/usr/bin/node",
            "/opt/homebrew/bin/node",
        ];

        for candidate in candidates {
            if let Ok(path) = which::which(candidate) {
                return Ok(path);
            }
        }

        Err(PlaywrightError::NodeNotFound)
    }

    async fn script_path(&self) -> Result<PathBuf, PlaywrightError> {
        if let Some(ref path) = self.config.bridge_script_path {
            return Ok(path.clone());
        }
        let path = std::env::temp_dir().join("voicepath_playwright_bridge.js");
        tokio::fs::write(&path, BRIDGE_SCRIPT).await.map_err(|e| {
            PlaywrightError::BridgeStartFailed(format!("Failed to write bridge script: {}", e))
        })?;
        Ok(path)
    }
}

async fn write_line(stdin: &mut ChildStdin, line: &str) -> Result<(), PlaywrightError> {
    stdin.write_all(line.as_bytes()).await?;
    stdin.write_all(b"\n").await?;
    stdin.flush().await?;
    Ok(())
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
#[path = "bridge_tests.rs"]
mod tests;
