//! Progress feedback on stderr.

use std::borrow::Cow;
use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICK_INTERVAL: Duration = Duration::from_millis(100);

// The last entry is shown once the spinner finishes
const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "·"];

/// Show a spinner labelled `message` while `task` runs, then clear it.
pub async fn with_spinner<F: Future>(message: impl Into<Cow<'static, str>>, task: F) -> F::Output {
    let spinner = spinner(message);
    let output = task.await;
    spinner.finish_and_clear();
    output
}

fn spinner(message: impl Into<Cow<'static, str>>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner().with_message(message);
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style.tick_strings(TICKS));
    }
    spinner.enable_steady_tick(TICK_INTERVAL);
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_spinner_returns_task_output() {
        let output = with_spinner("Counting", async { 21 * 2 }).await;
        assert_eq!(output, 42);
    }
}
