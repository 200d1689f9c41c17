//! Per-invocation state handed to command handlers.

use std::sync::Arc;

use crate::app::App;
use crate::error::Failure;
use crate::flags::{Flags, strip_dashes};
use crate::output::{Output, Painter};
use crate::progress::{ProgressBar, ProgressHandle, Spinner, SpinnerHandle};
use crate::router::Captures;

pub struct Context<'a> {
    app: &'a App,
    flags: Flags,
    captures: Captures,
}

impl<'a> Context<'a> {
    pub(crate) fn new(app: &'a App, flags: Flags) -> Self {
        Self {
            app,
            flags,
            captures: Captures::default(),
        }
    }

    pub(crate) fn bind(&mut self, captures: Captures) {
        self.captures = captures;
    }

    pub fn app(&self) -> &App {
        self.app
    }

    // === Lookups ===

    /// Flag value by name (leading dashes ignored). Falls back to the flag's
    /// declared default when no value was given, and to `""` when there is
    /// neither.
    pub fn flag(&self, name: &str) -> &str {
        let name = strip_dashes(name);
        match self.flags.get(name) {
            Some(value) if !value.is_empty() => value,
            _ => self.app.flag_default(name).unwrap_or(""),
        }
    }

    /// Whether the flag appeared on the command line at all.
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains(strip_dashes(name))
    }

    /// Capture bound by the matched pattern, or `""`. Multi-word names may be
    /// given with spaces: `arg("first name")`.
    pub fn arg(&self, name: &str) -> &str {
        self.captures.get(name).unwrap_or("")
    }

    pub fn flags(&self) -> &Flags {
        &self.flags
    }

    pub fn captures(&self) -> &Captures {
        &self.captures
    }

    // === Printing ===

    pub fn output(&self) -> Arc<dyn Output> {
        Arc::clone(self.app.output())
    }

    pub fn painter(&self) -> Painter {
        self.app.painter()
    }

    pub fn print(&self, text: &str) {
        self.app.output().print(text);
    }

    pub fn print_inline(&self, text: &str) {
        self.app.output().print_inline(text);
    }

    pub fn print_error(&self, text: &str) {
        self.app.output().print_error(text);
    }

    pub fn print_intro(&self) {
        self.print(&self.app.intro_text());
    }

    pub fn print_usage(&self) {
        self.print(&self.app.usage_text());
    }

    pub fn show_usage(&self) {
        self.print_intro();
        self.print_usage();
    }

    /// Intro, highlighted `message`, then usage.
    pub fn show_usage_with_message(&self, message: &str) {
        self.print_intro();
        self.print(&self.painter().failure(message));
        self.print_usage();
    }

    pub fn show_version(&self) {
        self.print(self.app.version());
    }

    // === Animation ===

    /// The application's progress bar settings; clone to customize.
    pub fn progress_bar(&self) -> &ProgressBar {
        self.app.progress_bar()
    }

    /// Start a progress bar with the application's settings.
    pub fn start_progress(&self) -> ProgressHandle {
        self.progress_bar().init(self.output())
    }

    pub fn start_spinner(&self, label: &str) -> SpinnerHandle {
        let mut spinner = Spinner::new().painter(self.painter());
        if !label.is_empty() {
            spinner = spinner.label(label);
        }
        spinner.start(self.output())
    }

    // === Failure ===

    /// Abort the handler with exit code 1: `return Err(ctx.fail("..."))`.
    pub fn fail(&self, message: impl Into<String>) -> Failure {
        Failure::new(message)
    }

    pub fn fail_with_code(&self, message: impl Into<String>, code: i32) -> Failure {
        Failure::with_code(message, code)
    }

    pub(crate) fn report(&self, failure: &Failure) {
        self.print_error(&self.painter().failure(&failure.message));
    }
}
