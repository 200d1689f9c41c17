//! Terminal output primitives and color handling.
//!
//! Everything the toolkit prints goes through an [`Output`]: usage screens,
//! handler messages, and the frames written by spinner and progress-bar
//! workers. [`Terminal`] writes to the real stdout/stderr; [`Buffer`] records
//! writes in memory so output can be asserted on.

use std::io::{IsTerminal, Write};
use std::sync::{Arc, Mutex};

use console::Style;
use serde::Deserialize;

// ============================================================================
// Color State
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Determines if colors should be used based on ColorMode and terminal detection.
pub fn is_enabled(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal(),
    }
}

/// Colorizer that can be passed around to format functions.
#[derive(Clone, Copy, Debug)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            enabled: is_enabled(mode),
        }
    }

    pub fn with_enabled(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Failure messages - bold red
    pub fn failure(&self, s: &str) -> String {
        self.style(s, Style::new().red().bold())
    }

    /// Section headings - bold, underlined
    pub fn heading(&self, s: &str) -> String {
        self.style(s, Style::new().bold().underlined())
    }

    /// Paint with a dotted color spec such as `"white"` or `"green.bold"`.
    ///
    /// An empty spec leaves the text untouched.
    pub fn paint(&self, s: &str, spec: &str) -> String {
        if spec.is_empty() {
            return s.to_string();
        }
        self.style(s, Style::from_dotted_str(spec))
    }

    fn style(&self, s: &str, style: Style) -> String {
        if self.enabled {
            style.force_styling(true).apply_to(s).to_string()
        } else {
            s.to_string()
        }
    }
}

// ============================================================================
// Output sinks
// ============================================================================

/// Line-oriented printing primitives.
///
/// Implementations must be shareable with worker threads.
pub trait Output: Send + Sync {
    /// Print `text` followed by a newline.
    fn print(&self, text: &str);

    /// Print `text` without a newline and flush, for carriage-return redraws.
    fn print_inline(&self, text: &str);

    /// Print `text` followed by a newline on the error stream.
    fn print_error(&self, text: &str);
}

/// Process stdout/stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct Terminal;

impl Output for Terminal {
    fn print(&self, text: &str) {
        println!("{text}");
    }

    fn print_inline(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        // A closed stdout only loses the animation frame.
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }

    fn print_error(&self, text: &str) {
        eprintln!("{text}");
    }
}

/// One recorded write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Line(String),
    Inline(String),
    Error(String),
}

/// In-memory sink. Clones share the same storage.
#[derive(Debug, Default, Clone)]
pub struct Buffer {
    records: Arc<Mutex<Vec<Record>>>,
}

impl Buffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write so far, in order.
    pub fn records(&self) -> Vec<Record> {
        self.lock().clone()
    }

    /// Everything written to the standard stream, newlines included.
    pub fn stdout(&self) -> String {
        self.lock()
            .iter()
            .filter_map(|w| match w {
                Record::Line(text) => Some(format!("{text}\n")),
                Record::Inline(text) => Some(text.clone()),
                Record::Error(_) => None,
            })
            .collect()
    }

    /// Everything written to the error stream.
    pub fn stderr(&self) -> String {
        self.lock()
            .iter()
            .filter_map(|w| match w {
                Record::Error(text) => Some(format!("{text}\n")),
                _ => None,
            })
            .collect()
    }

    fn push(&self, write: Record) {
        self.lock().push(write);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Record>> {
        // A panicking writer leaves a consistent Vec behind.
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Output for Buffer {
    fn print(&self, text: &str) {
        self.push(Record::Line(text.to_string()));
    }

    fn print_inline(&self, text: &str) {
        self.push(Record::Inline(text.to_string()));
    }

    fn print_error(&self, text: &str) {
        self.push(Record::Error(text.to_string()));
    }
}
