//! Animated terminal feedback.
//!
//! - [`ProgressBar`] / [`ProgressHandle`] - percent-driven bar with eased
//!   frame timing, played by a background worker.
//! - [`Spinner`] / [`SpinnerHandle`] - cyclic glyph loop.
//!
//! Both run one thread per started instance and talk to it only through
//! channels; all output for an instance is written by its own thread.

pub mod bar;
pub mod easing;
pub mod spinner;

pub use bar::{DEFAULT_DURATION, DEFAULT_WIDTH, ProgressBar, ProgressHandle, format_percent};
pub use easing::Easing;
pub use spinner::{SPINNER_GLYPHS, SPINNER_TICK, Spinner, SpinnerHandle};
