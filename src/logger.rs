//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for output that only shows up with `--verbose`
//! - `status_*` functions for the watch-mode result block, which each
//!   regeneration overwrites in place
//!
//! # Example
//!
//! ```ignore
//! log!("routes"; "generated at {}", path.display());
//! debug!("cache"; "evicted {}", address);
//! status_success("3 routes");
//! ```

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::{OwoColorize, Stream, Style};
use parking_lot::Mutex;
use std::{
    fmt::Display,
    io::{Write, stdout},
    sync::atomic::{AtomicBool, AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Bumped by every `log()` call so the status block knows when it has been
/// scrolled past and must not be overwritten.
static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

static WATCH_STATUS: Mutex<WatchStatus> = Mutex::new(WatchStatus::new());

pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);

    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
    LOG_SEQ.fetch_add(1, Ordering::SeqCst);
}

/// Apply `style` unless colors are disabled (`--color never`, no TTY).
pub(crate) fn paint(text: impl Display, style: Style) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.style(style))
        .to_string()
}

fn colorize_prefix(module: &str) -> String {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "routes" => paint(&prefix, Style::new().bright_blue().bold()),
        "navigate" | "prefetch" => paint(&prefix, Style::new().bright_magenta().bold()),
        "watch" => paint(&prefix, Style::new().bright_green().bold()),
        "error" => paint(&prefix, Style::new().bright_red().bold()),
        "hint" => paint(&prefix, Style::new().bright_cyan().bold()),
        _ => paint(&prefix, Style::new().bright_yellow().bold()),
    }
}

// ============================================================================
// Watch Status
// ============================================================================

/// `HH:MM:SS` (UTC)
fn clock(secs: u64) -> String {
    let (h, m, s) = ((secs / 3600) % 24, (secs / 60) % 60, secs % 60);
    format!("{h:02}:{m:02}:{s:02}")
}

/// Result block of the latest regeneration.
struct WatchStatus {
    /// Lines printed by the previous block
    last_lines: usize,
    /// `LOG_SEQ` right after the previous block was printed
    seq: u64,
}

impl WatchStatus {
    const fn new() -> Self {
        Self {
            last_lines: 0,
            seq: 0,
        }
    }

    /// Number of lines to move up before printing, zero when other output
    /// followed the previous block.
    fn lines_to_clear(&self, seq: u64) -> usize {
        if seq == self.seq { self.last_lines } else { 0 }
    }

    fn display(&mut self, symbol: String, message: &str) {
        let mut stdout = stdout().lock();

        let clear = self.lines_to_clear(LOG_SEQ.load(Ordering::SeqCst));
        if clear > 0 {
            let lines = u16::try_from(clear).unwrap_or(u16::MAX);
            execute!(stdout, cursor::MoveUp(lines), Clear(ClearType::FromCursorDown)).ok();
        }

        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let timestamp = paint(format!("[{}]", clock(secs)), Style::new().dimmed());
        if symbol.is_empty() {
            writeln!(stdout, "{timestamp} {message}").ok();
        } else {
            writeln!(stdout, "{timestamp} {symbol} {message}").ok();
        }
        stdout.flush().ok();

        self.last_lines = message.lines().count().max(1);
        self.seq = LOG_SEQ.load(Ordering::SeqCst);
    }
}

pub fn status_success(message: &str) {
    WATCH_STATUS.lock().display(paint("✓", Style::new().green()), message);
}

pub fn status_unchanged(message: &str) {
    WATCH_STATUS.lock().display(String::new(), &paint(message, Style::new().dimmed()));
}

/// Failure summary, with the hint on its own line.
pub fn status_error(summary: &str, hint: Option<&str>) {
    let message = match hint {
        Some(hint) => format!("{summary}\n  {} {hint}", paint("hint:", Style::new().cyan())),
        None => summary.to_string(),
    };
    WATCH_STATUS.lock().display(paint("✗", Style::new().red()), &message);
}
