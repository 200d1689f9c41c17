//! Application wiring: metadata, flag table, aliases, command registration,
//! and [`App::run`].
//!
//! ```no_run
//! use clapp::{App, Context, HandlerResult};
//!
//! fn greet(ctx: &mut Context<'_>) -> HandlerResult {
//!     ctx.print(&format!("Hello, {}!", ctx.arg("name")));
//!     Ok(())
//! }
//!
//! let mut app = App::new("hello").with_version("1.0.0");
//! app.handle("greet [name]", greet, Some("Say hello"));
//! app.define_flag("--verbose", "Show more output", None);
//! app.add_alias("-v", "--verbose");
//!
//! let args: Vec<String> = std::env::args().collect();
//! std::process::exit(app.run(&args));
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::config::ClappConfig;
use crate::context::Context;
use crate::error::{EXIT_FAILURE, HandlerResult};
use crate::flags::{Aliases, FlagSpec, parse_flags, strip_dashes};
use crate::output::{ColorMode, Output, Painter, Terminal};
use crate::progress::ProgressBar;
use crate::router::{Dispatch, Router};

/// A command handler.
pub type Handler = Box<dyn Fn(&mut Context<'_>) -> HandlerResult + Send + Sync>;

/// Columns between the longest command/flag and its description.
const USAGE_GUTTER: usize = 10;

pub struct App {
    name: String,
    version: String,
    description: String,
    intro: Option<String>,
    usage: Option<String>,
    router: Router<Handler>,
    flags: Vec<FlagSpec>,
    aliases: Aliases,
    progress: ProgressBar,
    painter: Painter,
    output: Arc<dyn Output>,
}

impl App {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: String::new(),
            description: String::new(),
            intro: None,
            usage: None,
            router: Router::new(),
            flags: Vec::new(),
            aliases: Aliases::new(),
            progress: ProgressBar::default(),
            painter: Painter::new(ColorMode::Auto),
            output: Arc::new(Terminal),
        }
    }

    // === Builder ===

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replaces the default `"<name> v<version>"` intro line.
    pub fn with_intro(mut self, intro: impl Into<String>) -> Self {
        self.intro = Some(intro.into());
        self
    }

    /// Replaces the generated COMMANDS/FLAGS usage text.
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = Some(usage.into());
        self
    }

    pub fn with_output(mut self, output: Arc<dyn Output>) -> Self {
        self.output = output;
        self
    }

    pub fn with_color(mut self, mode: ColorMode) -> Self {
        self.painter = Painter::new(mode);
        self.progress.painter = self.painter;
        self
    }

    pub fn with_progress_bar(mut self, bar: ProgressBar) -> Self {
        self.progress = bar;
        self
    }

    pub fn with_config(mut self, config: &ClappConfig) -> Self {
        self.painter = Painter::new(config.color);
        self.progress = config.progress_bar();
        self
    }

    // === Registration ===

    /// Register a handler for `pattern`. Only commands with a description are
    /// listed in usage output.
    pub fn handle<F>(&mut self, pattern: &str, handler: F, description: Option<&str>)
    where
        F: Fn(&mut Context<'_>) -> HandlerResult + Send + Sync + 'static,
    {
        self.router.register(pattern, Box::new(handler), description);
    }

    /// Declare a flag. An empty description keeps it out of usage output; the
    /// default still applies to [`Context::flag`].
    pub fn define_flag(&mut self, name: &str, description: &str, default: Option<&str>) {
        self.flags.push(FlagSpec {
            name: strip_dashes(name).to_string(),
            description: description.to_string(),
            default: default.map(str::to_string),
        });
    }

    /// Make `alias` (e.g. `-v`) a short form of `flag` (e.g. `--verbose`).
    pub fn add_alias(&mut self, alias: &str, flag: &str) {
        self.aliases
            .insert(alias.to_string(), strip_dashes(flag).to_string());
    }

    // === Accessors ===

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn router(&self) -> &Router<Handler> {
        &self.router
    }

    pub fn aliases(&self) -> &Aliases {
        &self.aliases
    }

    pub fn flag_specs(&self) -> &[FlagSpec] {
        &self.flags
    }

    /// Default of the last definition of `name`.
    pub fn flag_default(&self, name: &str) -> Option<&str> {
        self.flags
            .iter()
            .rev()
            .find(|spec| spec.name == name)
            .and_then(|spec| spec.default.as_deref())
            .filter(|value| !value.is_empty())
    }

    pub fn progress_bar(&self) -> &ProgressBar {
        &self.progress
    }

    pub fn painter(&self) -> Painter {
        self.painter
    }

    pub fn output(&self) -> &Arc<dyn Output> {
        &self.output
    }

    // === Usage ===

    pub fn intro_text(&self) -> String {
        match &self.intro {
            Some(intro) => intro.clone(),
            None => format!("{} v{}", self.name, self.version),
        }
    }

    pub fn usage_text(&self) -> String {
        if let Some(usage) = &self.usage {
            return usage.clone();
        }

        let commands: Vec<(&str, &str)> = self
            .router
            .routes()
            .filter_map(|route| {
                route
                    .description
                    .as_deref()
                    .map(|desc| (route.pattern.display(), desc))
            })
            .collect();
        let flags: Vec<(String, String)> = self
            .flags
            .iter()
            .filter(|spec| !spec.description.is_empty())
            .map(|spec| {
                let desc = match spec.default.as_deref() {
                    Some(default) if !default.is_empty() => {
                        format!("{} (default: {default})", spec.description)
                    }
                    _ => spec.description.clone(),
                };
                (format!("--{}", spec.name), desc)
            })
            .collect();

        let longest = commands
            .iter()
            .map(|(cmd, _)| cmd.chars().count())
            .chain(flags.iter().map(|(flag, _)| flag.chars().count()))
            .max()
            .unwrap_or(0);
        let column = longest + USAGE_GUTTER;

        let mut lines = vec![String::new(), self.painter.heading("COMMANDS")];
        for (cmd, desc) in &commands {
            lines.push(format!("{cmd:<column$}{desc}"));
        }
        if !flags.is_empty() {
            lines.push(String::new());
            lines.push(self.painter.heading("FLAGS"));
            for (flag, desc) in &flags {
                lines.push(format!("{flag:<column$}{desc}"));
            }
        }
        lines.join("\n")
    }

    // === Running ===

    /// Parse `args` (the full argv, program name first), route, and run the
    /// matching handler. Returns the process exit code.
    pub fn run<S: AsRef<str>>(&self, args: &[S]) -> i32 {
        let flags = parse_flags(args, &self.aliases);
        let mut ctx = Context::new(self, flags);

        if ctx.has_flag("h") || ctx.has_flag("help") {
            ctx.show_usage();
            return 0;
        }

        if ctx.has_flag("version") {
            ctx.show_version();
            return 0;
        }

        match self.router.dispatch(args) {
            Dispatch::Matched { handler, captures } => {
                ctx.bind(captures);
                match handler(&mut ctx) {
                    Ok(()) => 0,
                    Err(failure) => {
                        debug!(code = failure.code, "handler failed");
                        ctx.report(&failure);
                        failure.code
                    }
                }
            }
            Dispatch::NotFound if args.len() > 1 => {
                let typed: Vec<&str> = args.iter().skip(1).map(AsRef::as_ref).collect();
                ctx.show_usage_with_message(&format!(
                    "“{}” is not a valid command. Make sure you typed it correctly.",
                    typed.join(" ")
                ));
                EXIT_FAILURE
            }
            Dispatch::NotFound => {
                ctx.show_usage();
                0
            }
        }
    }
}
