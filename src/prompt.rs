//! Line prompts on the terminal.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;
use voicepath_recovery::{DialogAction, DialogState};

/// Serializes questions so concurrent askers do not interleave on stdin.
pub(crate) struct Prompt {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl Prompt {
    pub(crate) fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }

    /// Print `question` and read one line. `None` on EOF or a blank answer.
    pub(crate) async fn ask(&self, question: &str) -> Option<String> {
        let mut lines = self.lines.lock().await;
        print!("{} ", question);
        let _ = std::io::stdout().flush();
        match lines.next_line().await {
            Ok(Some(line)) => {
                let line = line.trim();
                (!line.is_empty()).then(|| line.to_string())
            }
            _ => None,
        }
    }

    pub(crate) async fn yes(&self, question: &str) -> bool {
        self.ask(&format!("{} [y/N]", question))
            .await
            .is_some_and(|answer| answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }
}

pub(crate) fn print_dialog(dialog: &DialogState) {
    println!();
    println!("{} ({})", dialog.title, dialog.error_code);
    println!("  {}", dialog.message);
    let actions: Vec<&str> = dialog
        .actions
        .iter()
        .map(|action| match action {
            DialogAction::Retry => "retry",
            DialogAction::Dismiss => "dismiss",
        })
        .collect();
    println!("  actions: {}", actions.join(", "));
}

/// Show the dialog and run its retry action if the user asks for it.
pub(crate) async fn resolve_dialog(
    prompt: &Prompt,
    dialog: &DialogState,
) -> Result<bool, Box<dyn std::error::Error>> {
    print_dialog(dialog);
    if dialog.can_retry() && prompt.yes("Retry?").await {
        dialog.retry().await.map_err(|e| e as Box<dyn std::error::Error>)?;
        return Ok(true);
    }
    Ok(false)
}
