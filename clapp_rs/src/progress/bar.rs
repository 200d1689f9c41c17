//! Percent-driven progress bar.
//!
//! [`ProgressBar`] is the configuration; [`ProgressBar::init`] spawns the
//! render worker and returns a [`ProgressHandle`]. The handle sends frame
//! batches and the worker plays them one at a time, sleeping between frames
//! according to the bar's [`Easing`]. A single-slot rendering gate, filled by
//! `render` and emptied by the worker when a batch ends, makes each render
//! wait for the previous batch to drain.
//!
//! ```text
//! ProgressBar ──init──▶ Idle ⇄ Rendering ──┬─ cancel ▶ Cancelled
//!                                          └─ stop ───▶ Done
//! ```
//!
//! `stop` and `cancel` consume the handle, so nothing can be sent to a bar
//! that has been torn down.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use console::measure_text_width;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};
use tracing::{debug, trace, warn};

use super::easing::Easing;
use crate::error::AnimationError;
use crate::output::{ColorMode, Output, Painter};

const ENGINE: &str = "progress bar";

pub const DEFAULT_WIDTH: usize = 50;
pub const DEFAULT_DURATION: Duration = Duration::from_millis(500);

/// Progress bar appearance and timing.
#[derive(Debug, Clone)]
pub struct ProgressBar {
    /// Number of blocks between the brackets.
    pub width: usize,
    /// Time taken to play one render's worth of frames.
    pub duration: Duration,
    pub easing: Easing,
    pub empty_shape: String,
    pub fill_shape: String,
    /// Dotted `console` color spec for filled blocks.
    pub fill_color: String,
    /// Dotted `console` color spec for brackets and empty blocks.
    pub background_color: String,
    pub painter: Painter,
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            duration: DEFAULT_DURATION,
            easing: Easing::Linear,
            empty_shape: "-".to_string(),
            fill_shape: "#".to_string(),
            fill_color: "white".to_string(),
            background_color: "white".to_string(),
            painter: Painter::new(ColorMode::Auto),
        }
    }
}

/// `42.5` → `"42.5"`, `50.0` → `"50"`.
pub fn format_percent(percent: f64) -> String {
    let text = format!("{percent:.1}");
    match text.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => text,
    }
}

impl ProgressBar {
    /// Filled blocks for `percent`: `floor(percent / (100 / width))`, clamped
    /// to `0..=width`.
    pub fn block_count(&self, percent: f64) -> usize {
        // Multiplying first keeps 100% exact for widths that don't divide 100.
        let blocks = (percent * self.width as f64 / 100.0).floor();
        blocks.clamp(0.0, self.width as f64) as usize
    }

    /// One rendered row: `blocks` filled, the rest empty, then the percent.
    pub fn line_for_percent(&self, blocks: usize, percent: f64) -> String {
        let blocks = blocks.min(self.width);
        let p = &self.painter;
        let bg = self.background_color.as_str();
        format!(
            "{}{}{}{} {}%",
            p.paint("[", bg),
            p.paint(&self.fill_shape.repeat(blocks), &self.fill_color),
            p.paint(&self.empty_shape.repeat(self.width - blocks), bg),
            p.paint("]", bg),
            format_percent(percent)
        )
    }

    /// Frames animating from `start` to `end`: one per block index from
    /// `block_count(start)` to `block_count(end)` inclusive, walking backward
    /// when `end < start`. All frames show `start` except the last, which
    /// shows `end`.
    pub fn frames_for_range(&self, start: f64, end: f64) -> Vec<String> {
        let from = self.block_count(start);
        let to = self.block_count(end);
        let indices: Vec<usize> = if from <= to {
            (from..=to).collect()
        } else {
            (to..=from).rev().collect()
        };

        let last = indices.len() - 1;
        indices
            .into_iter()
            .enumerate()
            .map(|(n, blocks)| {
                let shown = if n == last { end } else { start };
                self.line_for_percent(blocks, shown)
            })
            .collect()
    }

    /// Spawn the render worker. The bar starts at 0%.
    pub fn init(&self, output: Arc<dyn Output>) -> ProgressHandle {
        // At most one gated batch plus one teardown signal are ever in flight.
        let (tx, rx) = bounded(2);
        let (gate_tx, gate_rx) = bounded(1);

        let worker = Worker::new(self, output, rx, gate_rx);
        let handle = thread::spawn(move || worker.run());
        debug!(width = self.width, "progress bar initialized");

        ProgressHandle {
            bar: self.clone(),
            percent: RwLock::new(Percent::default()),
            signals: tx,
            gate: gate_tx,
            worker: Some(handle),
        }
    }
}

// ============================================================================
// Worker
// ============================================================================

enum Signal {
    Frames(Vec<String>),
    Cancel,
    Done(Sender<()>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Rendering,
    Cancelled,
    Done,
}

struct Worker {
    duration: Duration,
    easing: Easing,
    output: Arc<dyn Output>,
    signals: Receiver<Signal>,
    /// Single-slot rendering gate. The handle fills it before sending a
    /// batch; the worker empties it once the batch has played.
    gate: Receiver<()>,
    /// Stop request received mid-batch, honored when the batch ends.
    pending_done: Option<Sender<()>>,
    previous_line: String,
    state: State,
}

impl Worker {
    fn new(
        bar: &ProgressBar,
        output: Arc<dyn Output>,
        signals: Receiver<Signal>,
        gate: Receiver<()>,
    ) -> Self {
        Self {
            duration: bar.duration,
            easing: bar.easing,
            output,
            signals,
            gate,
            pending_done: None,
            previous_line: String::new(),
            state: State::Idle,
        }
    }

    fn run(mut self) {
        while self.state == State::Idle {
            match self.signals.recv() {
                Ok(Signal::Frames(frames)) => self.play(&frames),
                Ok(Signal::Cancel) => self.cancel(),
                Ok(Signal::Done(ack)) => self.finish(ack),
                Err(_) => break,
            }
        }
        debug!(state = ?self.state, "progress worker exiting");
    }

    fn play(&mut self, frames: &[String]) {
        self.state = State::Rendering;
        trace!(frames = frames.len(), "playing batch");

        let delays = self.easing.frame_delays(self.duration, frames.len());
        for (frame, delay) in frames.iter().zip(delays) {
            // A cancel already waiting suppresses the frame.
            if self.cancel_requested() {
                self.cancel();
                return;
            }
            self.draw(frame);
            if !self.pause(delay) {
                self.cancel();
                return;
            }
        }

        self.release_gate();
        self.state = State::Idle;
        if let Some(ack) = self.pending_done.take() {
            self.finish(ack);
        }
    }

    /// Handle one signal received mid-batch. Returns `true` for a cancel.
    fn accept(&mut self, signal: Signal) -> bool {
        match signal {
            Signal::Cancel => true,
            Signal::Done(ack) => {
                self.pending_done = Some(ack);
                false
            }
            Signal::Frames(_) => {
                warn!(state = ?self.state, "frame batch sent without the rendering gate; dropped");
                false
            }
        }
    }

    /// Drain signals that are already waiting.
    fn cancel_requested(&mut self) -> bool {
        while let Ok(signal) = self.signals.try_recv() {
            if self.accept(signal) {
                return true;
            }
        }
        false
    }

    /// Sleep for `delay` while still listening for signals. Returns `false`
    /// if a cancel arrived.
    fn pause(&mut self, delay: Duration) -> bool {
        let deadline = Instant::now() + delay;
        loop {
            match self.signals.recv_deadline(deadline) {
                Ok(signal) => {
                    if self.accept(signal) {
                        return false;
                    }
                }
                Err(RecvTimeoutError::Timeout) => return true,
                Err(RecvTimeoutError::Disconnected) => {
                    thread::sleep(deadline.saturating_duration_since(Instant::now()));
                    return true;
                }
            }
        }
    }

    fn draw(&mut self, frame: &str) {
        let blank = " ".repeat(measure_text_width(&self.previous_line));
        self.output.print_inline(&format!("\r{blank}"));
        self.output.print_inline(&format!("\r{frame}"));
        self.previous_line = frame.to_string();
    }

    fn release_gate(&self) {
        let _ = self.gate.try_recv();
    }

    fn cancel(&mut self) {
        self.output.print("");
        self.release_gate();
        self.state = State::Cancelled;
    }

    fn finish(&mut self, ack: Sender<()>) {
        self.output.print("");
        self.state = State::Done;
        let _ = ack.send(());
    }
}

// ============================================================================
// Handle
// ============================================================================

#[derive(Debug, Default, Clone, Copy)]
struct Percent {
    previous: f64,
    current: f64,
}

/// A running progress bar.
///
/// Dropping a handle without calling [`stop`](Self::stop) or
/// [`cancel`](Self::cancel) cancels it.
pub struct ProgressHandle {
    bar: ProgressBar,
    percent: RwLock<Percent>,
    signals: Sender<Signal>,
    gate: Sender<()>,
    worker: Option<JoinHandle<()>>,
}

impl ProgressHandle {
    pub fn bar(&self) -> &ProgressBar {
        &self.bar
    }

    /// Percent the next [`render`](Self::render) animates to.
    pub fn percent(&self) -> f64 {
        self.read().current
    }

    /// Percent the last render animated to.
    pub fn previous_percent(&self) -> f64 {
        self.read().previous
    }

    pub fn set_percent(&self, percent: f64) {
        self.write().current = percent;
    }

    /// Enqueue the frames from the previously rendered percent to the current
    /// one.
    ///
    /// Blocks until any earlier batch has finished playing, then returns
    /// without waiting for this one. The percent may move backward; the bar
    /// then animates in reverse.
    pub fn render(&self) -> Result<(), AnimationError> {
        self.gate
            .send(())
            .map_err(|_| AnimationError::Disconnected(ENGINE))?;

        let Percent { previous, current } = *self.read();
        let frames = self.bar.frames_for_range(previous, current);
        self.signals
            .send(Signal::Frames(frames))
            .map_err(|_| AnimationError::Disconnected(ENGINE))?;
        self.write().previous = current;
        Ok(())
    }

    /// [`set_percent`](Self::set_percent) followed by [`render`](Self::render).
    pub fn update(&self, percent: f64) -> Result<(), AnimationError> {
        self.set_percent(percent);
        self.render()
    }

    /// Whether a batch is queued or playing.
    pub fn is_rendering(&self) -> bool {
        self.gate.is_full()
    }

    /// Abort immediately, dropping any frames not yet played. No output from
    /// this bar follows once this returns.
    pub fn cancel(mut self) -> Result<(), AnimationError> {
        let sent = self.signals.send(Signal::Cancel);
        self.join()?;
        sent.map_err(|_| AnimationError::Disconnected(ENGINE))
    }

    /// Play the batch in flight, print the trailing newline, and return once
    /// the worker confirms it has done so.
    ///
    /// The handle is consumed, so nothing can be rendered afterward:
    ///
    /// ```compile_fail
    /// use std::sync::Arc;
    /// use clapp::{Buffer, ProgressBar};
    ///
    /// let handle = ProgressBar::default().init(Arc::new(Buffer::new()));
    /// handle.stop().unwrap();
    /// handle.render().unwrap();
    /// ```
    pub fn stop(mut self) -> Result<(), AnimationError> {
        let (ack_tx, ack_rx) = bounded(1);
        self.signals
            .send(Signal::Done(ack_tx))
            .map_err(|_| AnimationError::Disconnected(ENGINE))?;
        let confirmed = ack_rx.recv();
        self.join()?;
        confirmed.map_err(|_| AnimationError::Unconfirmed(ENGINE))
    }

    fn join(&mut self) -> Result<(), AnimationError> {
        match self.worker.take() {
            Some(worker) => worker
                .join()
                .map_err(|_| AnimationError::Panicked(ENGINE)),
            None => Ok(()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Percent> {
        self.percent.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Percent> {
        self.percent.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for ProgressHandle {
    fn drop(&mut self) {
        if self.worker.is_some() {
            let _ = self.signals.send(Signal::Cancel);
            let _ = self.join();
        }
    }
}
