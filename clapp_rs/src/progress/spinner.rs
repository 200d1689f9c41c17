//! Inline spinner.
//!
//! Each [`SpinnerHandle`] owns its worker thread and stop channel, so any
//! number of spinners can run side by side and starting one never strands
//! another.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, bounded, select};
use tracing::debug;

use crate::error::AnimationError;
use crate::output::{ColorMode, Output, Painter};

const ENGINE: &str = "spinner";

pub const SPINNER_GLYPHS: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];
pub const SPINNER_TICK: Duration = Duration::from_millis(150);

/// Extra columns blanked on stop, covering the glyph and its separator.
const CLEAR_PADDING: usize = 4;

#[derive(Debug, Clone)]
pub struct Spinner {
    label: Option<String>,
    painter: Painter,
}

impl Default for Spinner {
    fn default() -> Self {
        Self {
            label: None,
            painter: Painter::new(ColorMode::Auto),
        }
    }
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text shown after the glyph.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn painter(mut self, painter: Painter) -> Self {
        self.painter = painter;
        self
    }

    /// Start spinning on `output` until the returned handle is stopped.
    pub fn start(&self, output: Arc<dyn Output>) -> SpinnerHandle {
        // Zero capacity: stop() returns only once the loop has taken the signal.
        let (stop_tx, stop_rx) = bounded(0);
        let label = self.label.clone();
        let painter = self.painter;
        let worker = thread::spawn(move || spin(label, painter, output, stop_rx));
        debug!("spinner started");

        SpinnerHandle {
            stop: Some(stop_tx),
            worker: Some(worker),
        }
    }
}

fn spin(label: Option<String>, painter: Painter, output: Arc<dyn Output>, stop: Receiver<()>) {
    let suffix = label
        .as_deref()
        .map(|l| format!(" {l}"))
        .unwrap_or_default();
    animate(&suffix, painter, output.as_ref(), &stop);

    let width = label.map_or(0, |l| l.chars().count()) + CLEAR_PADDING;
    output.print_inline(&format!("\r{}\r", " ".repeat(width)));
}

/// Redraw glyphs until the stop signal arrives or its sender is dropped.
fn animate(suffix: &str, painter: Painter, output: &dyn Output, stop: &Receiver<()>) {
    for glyph in SPINNER_GLYPHS.iter().cycle() {
        output.print_inline(&format!("\r{}{suffix}", painter.paint(glyph, "cyan")));
        select! {
            recv(stop) -> _ => return,
            default(SPINNER_TICK) => {}
        }
    }
}

/// A running spinner. Dropping it stops the spinner.
pub struct SpinnerHandle {
    stop: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl SpinnerHandle {
    /// Hand the stop signal to the loop, wait for it to clear its line, and
    /// join it.
    pub fn stop(mut self) -> Result<(), AnimationError> {
        let handshake = match self.stop.take() {
            Some(tx) => tx.send(()).map_err(|_| AnimationError::Disconnected(ENGINE)),
            None => Ok(()),
        };
        self.join()?;
        handshake
    }

    fn join(&mut self) -> Result<(), AnimationError> {
        match self.worker.take() {
            Some(worker) => worker
                .join()
                .map_err(|_| AnimationError::Panicked(ENGINE)),
            None => Ok(()),
        }
    }
}

impl Drop for SpinnerHandle {
    fn drop(&mut self) {
        // Closing the channel ends the loop as well.
        self.stop.take();
        let _ = self.join();
    }
}
