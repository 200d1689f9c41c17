use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::Context as _;
use clapp::flags::{Aliases, strip_dashes};
use clapp::{App, ClappConfig, Context, Easing, HandlerResult, parse_flags};

const ALIASES: [(&str, &str); 2] = [("-s", "--shout"), ("-v", "--verbose")];

fn greet(ctx: &mut Context<'_>) -> HandlerResult {
    let mut greeting = format!("Hello, {}!", ctx.arg("name"));
    if ctx.has_flag("shout") {
        greeting = greeting.to_uppercase();
    }
    ctx.print(&greeting);
    Ok(())
}

fn add(ctx: &mut Context<'_>) -> HandlerResult {
    ctx.print(&format!(
        "Added {} to {}",
        ctx.arg("first name"),
        ctx.arg("group")
    ));
    Ok(())
}

fn count(ctx: &mut Context<'_>) -> HandlerResult {
    let steps: u32 = ctx
        .arg("n")
        .parse()
        .context("count is too large")?;
    if steps == 0 {
        return Err(ctx.fail("count must be at least 1"));
    }

    let millis: u64 = ctx
        .flag("duration")
        .parse()
        .context("--duration expects milliseconds")?;
    let easing: Easing = ctx
        .flag("ease")
        .parse()
        .map_err(|e: clapp::ConfigError| ctx.fail_with_code(e.to_string(), 2))?;

    let mut bar = ctx.progress_bar().clone();
    bar.duration = Duration::from_millis(millis);
    bar.easing = easing;

    let handle = bar.init(ctx.output());
    for step in 1..=steps {
        handle.update(f64::from(step) * 100.0 / f64::from(steps))?;
    }
    handle.stop()?;

    ctx.print(&format!("Counted to {steps}"));
    Ok(())
}

fn wait(ctx: &mut Context<'_>) -> HandlerResult {
    let millis: u64 = ctx
        .flag("ms")
        .parse()
        .context("--ms expects milliseconds")?;

    let spinner = ctx.start_spinner("Waiting");
    thread::sleep(Duration::from_millis(millis));
    spinner.stop()?;

    ctx.print("Done.");
    Ok(())
}

fn fail(ctx: &mut Context<'_>) -> HandlerResult {
    let code: i32 = ctx.arg("code").parse().context("exit code out of range")?;
    Err(ctx.fail_with_code(format!("Failing with exit code {code}"), code))
}

fn build_app(config: &ClappConfig) -> App {
    let mut app = App::new("clapp-demo")
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_description("Demonstrates clapp routing, flags, spinners and progress bars")
        .with_config(config);

    app.handle("greet [name]", greet, Some("Greet someone"));
    app.handle("add [first name] to [group]", add, Some("Add a person to a group"));
    app.handle(r"count n:^\d+$", count, Some("Animate a progress bar in n steps"));
    app.handle("wait", wait, Some("Show a spinner for a while"));
    app.handle(r"fail code:^\d+$", fail, Some("Exit with the given code"));

    app.define_flag("--shout", "Greet loudly", None);
    app.define_flag("--duration", "Milliseconds per progress step", Some("500"));
    app.define_flag("--ease", "linear, ease-in or ease-out", Some("linear"));
    app.define_flag("--ms", "Spinner duration in milliseconds", Some("600"));
    app.define_flag("--verbose", "Log routing decisions", None);
    for (alias, flag) in ALIASES {
        app.add_alias(alias, flag);
    }

    app
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Logging must be up before the config file is read, so verbosity is
    // parsed ahead of the app.
    let aliases: Aliases = ALIASES
        .iter()
        .map(|(alias, flag)| (alias.to_string(), strip_dashes(flag).to_string()))
        .collect();
    let verbose = parse_flags(&args, &aliases).contains("verbose");
    clapp::logging::init(if verbose { "debug" } else { "warn" });

    let config = std::env::var_os("CLAPP_CONFIG")
        .map(|path| ClappConfig::load_from_path(Path::new(&path)))
        .unwrap_or_default();

    let app = build_app(&config);
    std::process::exit(app.run(&args));
}
