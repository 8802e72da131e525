use super::*;

#[test]
fn test_config_default() {
    let config = PlaywrightConfig::default();
    assert!(config.node_path.is_none());
    assert!(!config.headless);
    assert_eq!(config.action_timeout_ms, 5000);
}

#[test]
fn test_request_serialize() {
    let request = BridgeRequest {
        id: 7,
        method: "click",
        params: serde_json::json!({ "selector": "#go" }),
    };
    let json = serde_json::to_string(&request).unwrap();
    assert_eq!(json, r##"{"id":7,"method":"click","params":{"selector":"#go"}}"##);
}

#[test]
fn test_error_response_kinds() {
    let timeout: BridgeResponse = serde_json::from_str(
        r#"{"id":1,"error":{"name":"TimeoutError","message":"locator.click: Timeout 5000ms exceeded"}}"#,
    )
    .unwrap();
    assert!(matches!(
        timeout.error.unwrap().into_error(),
        PlaywrightError::Timeout(_)
    ));

    let generic: BridgeResponse =
        serde_json::from_str(r#"{"id":2,"error":{"message":"Unknown page: page-9"}}"#).unwrap();
    assert!(matches!(
        generic.error.unwrap().into_error(),
        PlaywrightError::BridgeError(msg) if msg.contains("page-9")
    ));
}

#[test]
fn test_truncate_respects_char_boundaries() {
    assert_eq!(truncate("가나다", 2), "가나");
    assert_eq!(truncate("ab", 5), "ab");
}

#[tokio::test]
async fn test_call_before_start_fails() {
    let bridge = PlaywrightBridge::new(PlaywrightConfig::default());
    let err = bridge.call("ping", serde_json::json!({})).await.unwrap_err();
    assert!(matches!(err, PlaywrightError::NotInitialized));
    assert!(bridge.pending_requests.read().await.is_empty());
}

/// Shell stand-in for the Node bridge: answers ping, fails click with a
/// Playwright-style timeout, and echoes null for everything else.
#[cfg(unix)]
const FAKE_BRIDGE: &str = r#"
while IFS= read -r line; do
  id=$(printf '%s' "$line" | sed -n 's/^{"id":\([0-9]*\).*/\1/p')
  case "$line" in
    *'"method":"ping"'*) printf '{"id":%s,"result":"pong"}\n' "$id" ;;
    *'"method":"click"'*) printf '{"id":%s,"error":{"name":"TimeoutError","message":"Timeout 5000ms exceeded"}}\n' "$id" ;;
    *'"method":"shutdown"'*) printf '{"id":%s,"result":null}\n' "$id"; exit 0 ;;
    *) printf '{"id":%s,"result":null}\n' "$id" ;;
  esac
done
"#;

#[cfg(unix)]
#[tokio::test]
async fn test_round_trip_through_child_process() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("fake_bridge.sh");
    std::fs::write(&script, FAKE_BRIDGE).unwrap();

    let bridge = PlaywrightBridge::new(PlaywrightConfig {
        node_path: Some(PathBuf::from("sh")),
        bridge_script_path: Some(script),
        response_timeout_ms: 5000,
        ..Default::default()
    });

    bridge.start().await.unwrap();
    assert!(bridge.is_running().await);

    let result = bridge
        .call("navigate", serde_json::json!({ "url": "https://a.com" }))
        .await
        .unwrap();
    assert!(result.is_null());

    let err = bridge
        .call("click", serde_json::json!({ "selector": "#missing" }))
        .await
        .unwrap_err();
    assert!(matches!(err, PlaywrightError::Timeout(_)));

    bridge.stop().await.unwrap();
    assert!(!bridge.is_running().await);
}

#[tokio::test]
async fn test_start_with_missing_executable() {
    let bridge = PlaywrightBridge::new(PlaywrightConfig {
        node_path: Some(PathBuf::from("/nonexistent/voicepath-node")),
        bridge_script_path: Some(PathBuf::from("/nonexistent/bridge.js")),
        ..Default::default()
    });
    let err = bridge.start().await.unwrap_err();
    assert!(matches!(err, PlaywrightError::BridgeStartFailed(_)));
}

mod browser {
    use voicepath_protocols::{BrowserControl, BrowserError};

    use crate::{PlaywrightBrowser, PlaywrightConfig};

    #[tokio::test]
    async fn test_actions_before_init_fail() {
        let browser = PlaywrightBrowser::new(PlaywrightConfig::default());
        assert!(matches!(
            browser.click("#a").await,
            Err(BrowserError::NotInitialized)
        ));
        assert!(matches!(
            browser.navigate("https://a.com").await,
            Err(BrowserError::NotInitialized)
        ));
    }
}
