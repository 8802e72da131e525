//! `voicepath classify` handler.

use serde_json::json;
use thiserror::Error;
use voicepath_recovery::{ErrorRecord, RecoveryPolicy, classify, policy_for};

/// An error known only by its message, as reported by another component.
#[derive(Debug, Error)]
#[error("{0}")]
struct ReportedError(String);

pub(crate) fn handle_classify_command(
    message: &str,
    context: &str,
    as_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let record = classify(&ReportedError(message.to_string()), context);
    let policy = policy_for(record.kind());

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report_json(&record, &policy))?);
        return Ok(());
    }

    println!("{:<16} {}", "Code", record.error_code());
    println!("{:<16} {}", "Kind", record.kind());
    println!("{:<16} {}", "Retryable", record.is_retryable());
    println!("{:<16} {}", "Message", record.user_message());
    println!("{:<16} {}", "Context", record.context());
    println!();
    println!("{:<16} {}", "Auto recover", policy.auto_recover);
    println!("{:<16} {}", "Max retries", policy.max_retries);
    let delays: Vec<String> = (0..policy.max_attempts())
        .map(|attempt| format!("{:?}", policy.delay_for_attempt(attempt)))
        .collect();
    println!("{:<16} {}", "Delays", delays.join(", "));
    println!("{:<16} {}", "User dialog", policy.show_user_dialog);
    Ok(())
}

fn report_json(record: &ErrorRecord, policy: &RecoveryPolicy) -> serde_json::Value {
    json!({
        "record": record,
        "policy": {
            "maxRetries": policy.max_retries,
            "retryDelayBaseMs": policy.retry_delay_base.as_millis() as u64,
            "backoffMultiplier": policy.backoff_multiplier,
            "showUserDialog": policy.show_user_dialog,
            "autoRecover": policy.auto_recover,
        }
    })
}
