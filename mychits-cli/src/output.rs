//! Output formatting utilities

use std::fmt;
use std::time::Duration;

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use mychits_core::{Notice, NoticeKind, OperationResult};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Print a notice the way the app would show it
pub fn notice(notice: &Notice) {
    match notice.kind {
        NoticeKind::Blocking => error(&notice.message.bold().to_string()),
        NoticeKind::Toast => error(&notice.message),
    }
}

/// A failure that has already been shown to the user
#[derive(Debug)]
pub struct Reported;

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("operation failed")
    }
}

impl std::error::Error for Reported {}

/// Print data wrapped in an `OperationResult` as pretty JSON
pub fn json<T: Serialize>(data: T) -> anyhow::Result<()> {
    json_result(Ok(data))
}

/// Print an outcome as an `OperationResult`. A failure is returned as `Reported`.
pub fn json_result<T: Serialize>(result: mychits_core::Result<T>) -> anyhow::Result<()> {
    let failed = result.is_err();
    println!("{}", serde_json::to_string_pretty(&OperationResult::from(result))?);
    if failed {
        return Err(Reported.into());
    }
    Ok(())
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Run `f` behind a spinner on stderr. The spinner is cleared whatever `f` returns.
pub fn with_spinner<T>(msg: &str, f: impl FnOnce() -> T) -> T {
    let spinner = if atty::is(atty::Stream::Stderr) {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = f();
    spinner.finish_and_clear();
    result
}
