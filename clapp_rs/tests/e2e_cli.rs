//! End-to-end CLI tests for the demo binary.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command pointing to the demo binary
fn demo() -> Command {
    let mut cmd = cargo_bin_cmd!("clapp-demo");
    cmd.env_remove("CLAPP_CONFIG").env_remove("RUST_LOG");
    cmd
}

// ============================================
// Help, version and unmatched commands
// ============================================

mod cli_basics {
    use super::*;

    #[test]
    fn no_arguments_shows_usage() {
        demo()
            .assert()
            .success()
            .stdout(predicate::str::contains("clapp-demo v"))
            .stdout(predicate::str::contains("COMMANDS"))
            .stdout(predicate::str::contains("count {n}"));
    }

    #[test]
    fn shows_help() {
        for flag in ["-h", "--help"] {
            demo()
                .arg(flag)
                .assert()
                .success()
                .stdout(predicate::str::contains("greet [name]"))
                .stdout(predicate::str::contains("FLAGS"))
                .stdout(predicate::str::contains("--duration"))
                .stdout(predicate::str::contains("(default: 500)"));
        }
    }

    #[test]
    fn shows_version() {
        demo()
            .arg("--version")
            .assert()
            .success()
            .stdout(format!("{}\n", env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn unknown_command_exits_one() {
        demo()
            .args(["dance", "now"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("“dance now” is not a valid command"))
            .stdout(predicate::str::contains("COMMANDS"));
    }

    #[test]
    fn wrong_word_count_is_not_found() {
        demo()
            .args(["greet", "Ada", "Lovelace"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("is not a valid command"));
    }
}

// ============================================
// Routing
// ============================================

mod routing {
    use super::*;

    #[test]
    fn open_capture() {
        demo()
            .args(["greet", "Ada"])
            .assert()
            .success()
            .stdout("Hello, Ada!\n");
    }

    #[test]
    fn flags_do_not_disturb_matching() {
        demo()
            .args(["greet", "--shout", "Ada"])
            .assert()
            .success()
            .stdout("HELLO, ADA!\n");
    }

    #[test]
    fn short_alias() {
        demo()
            .args(["-s=1", "greet", "Ada"])
            .assert()
            .success()
            .stdout("HELLO, ADA!\n");
    }

    #[test]
    fn multi_word_capture() {
        demo()
            .args(["add", "Grace", "to", "admirals"])
            .assert()
            .success()
            .stdout("Added Grace to admirals\n");
    }

    #[test]
    fn typed_capture_rejects_non_digits() {
        demo()
            .args(["fail", "abc"])
            .assert()
            .code(1)
            .stdout(predicate::str::contains("is not a valid command"));
    }

    #[test]
    fn verbose_flag_logs_routing() {
        for verbose in ["--verbose=1", "-v=1", "--verbose"] {
            demo()
                .args(["greet", "Ada", verbose])
                .assert()
                .success()
                .stdout("Hello, Ada!\n")
                .stderr(predicate::str::contains("route matched"));
        }
    }

    #[test]
    fn quiet_by_default() {
        demo()
            .args(["greet", "Ada"])
            .assert()
            .success()
            .stderr(predicate::str::is_empty());
    }

    #[test]
    fn handler_failure_uses_its_exit_code() {
        demo()
            .args(["fail", "3"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failing with exit code 3"));
    }
}

// ============================================
// Animation
// ============================================

mod animation {
    use super::*;

    #[test]
    fn progress_bar_reaches_one_hundred() {
        demo()
            .args(["count", "4", "--duration=0"])
            .assert()
            .success()
            .stdout(predicate::str::contains("] 100%"))
            .stdout(predicate::str::contains("Counted to 4"));
    }

    #[test]
    fn eased_progress_bar() {
        demo()
            .args(["count", "2", "--duration=10", "--ease=ease-out"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Counted to 2"));
    }

    #[test]
    fn unknown_easing_fails() {
        demo()
            .args(["count", "2", "--ease=bounce"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("unknown easing 'bounce'"));
    }

    #[test]
    fn zero_steps_fails() {
        demo()
            .args(["count", "0"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("at least 1"));
    }

    #[test]
    fn spinner_clears_and_finishes() {
        demo()
            .args(["wait", "--ms=200"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Waiting"))
            .stdout(predicate::str::ends_with("Done.\n"));
    }
}

// ============================================
// Configuration
// ============================================

mod config {
    use super::*;

    #[test]
    fn config_file_changes_bar_shape() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("clapp.toml");
        std::fs::write(
            &path,
            "color = \"never\"\n\n[progress]\nwidth = 4\nfill_shape = \"=\"\nempty_shape = \".\"\n",
        )
        .expect("write config");

        demo()
            .env("CLAPP_CONFIG", &path)
            .args(["count", "1", "--duration=0"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[====] 100%"));
    }

    #[test]
    fn invalid_config_falls_back_to_defaults() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("clapp.toml");
        std::fs::write(&path, "[progress]\nwidth = 0\n").expect("write config");

        demo()
            .env("CLAPP_CONFIG", &path)
            .args(["greet", "Ada"])
            .assert()
            .success()
            .stdout("Hello, Ada!\n");
    }
}
