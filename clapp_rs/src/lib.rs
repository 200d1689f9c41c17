//! # clapp
//!
//! **Command-line application toolkit** - flag parsing, pattern-based command
//! dispatch, and animated terminal feedback.
//!
//! ## Features
//!
//! - **Flag parsing** - `--key=value`, `--key value`, boolean `-v`, short aliases
//! - **Pattern routing** - `deploy [target] retries:^\d+$`, first match wins
//! - **Progress bars** - eased, cancellable, played by a background worker
//! - **Spinners** - independent handles, stopped by handshake
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clapp::{App, Context, HandlerResult};
//!
//! fn download(ctx: &mut Context<'_>) -> HandlerResult {
//!     let bar = ctx.start_progress();
//!     for pct in [25.0, 50.0, 75.0, 100.0] {
//!         bar.update(pct)?;
//!     }
//!     bar.stop()?;
//!     ctx.print(&format!("fetched {}", ctx.arg("file")));
//!     Ok(())
//! }
//!
//! let mut app = App::new("fetch").with_version(env!("CARGO_PKG_VERSION"));
//! app.handle("download [file]", download, Some("Download a file"));
//!
//! let args: Vec<String> = std::env::args().collect();
//! std::process::exit(app.run(&args));
//! ```

// ============================================================================
// Core Modules
// ============================================================================

/// Flag parsing and the flag definition table.
pub mod flags;

/// Pattern compilation and first-match routing.
pub mod router;

/// Spinner and progress bar engines.
pub mod progress;

// ============================================================================
// Application Layer
// ============================================================================

pub mod app;
pub mod context;

// ============================================================================
// Support
// ============================================================================

pub mod config;
pub mod error;
pub mod logging;
pub mod output;

pub use app::{App, Handler};
pub use config::ClappConfig;
pub use context::Context;
pub use error::{AnimationError, ConfigError, Failure, HandlerResult};
pub use flags::{Flags, parse_flags};
pub use output::{Buffer, ColorMode, Output, Terminal};
pub use progress::{Easing, ProgressBar, ProgressHandle, Spinner, SpinnerHandle};
pub use router::{Captures, Dispatch, Pattern, Router};
