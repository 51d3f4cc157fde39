//! CLI help and argument-error tests for mq-core.

use assert_cmd::Command;
use predicates::prelude::*;

/// Get a Command for the mq-core binary.
fn mq_core() -> Command {
    Command::cargo_bin("mq-core").expect("mq-core binary should exist")
}

// ============================================================================
// Top-level Help Tests
// ============================================================================

mod top_level {
    use super::*;

    #[test]
    fn help_flag_works() {
        mq_core()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Model Quality Core"));
    }

    #[test]
    fn version_flag_works() {
        mq_core()
            .arg("--version")
            .assert()
            .code(0)
            .stdout(predicate::str::contains("mq-core"));
    }

    #[test]
    fn help_shows_all_commands() {
        mq_core()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("evaluate"))
            .stdout(predicate::str::contains("render"))
            .stdout(predicate::str::contains("compare"))
            .stdout(predicate::str::contains("bundle"))
            .stdout(predicate::str::contains("schema"))
            .stdout(predicate::str::contains("config"));
    }

    #[test]
    fn help_shows_global_options() {
        mq_core()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--format"))
            .stdout(predicate::str::contains("--config"))
            .stdout(predicate::str::contains("--log-format"));
    }

    #[test]
    fn no_command_prints_help_and_fails() {
        mq_core()
            .assert()
            .code(10)
            .stdout(predicate::str::contains("Usage"));
    }
}

// ============================================================================
// Subcommand Help Tests
// ============================================================================

mod subcommands {
    use super::*;

    #[test]
    fn evaluate_help_lists_inputs() {
        mq_core()
            .args(["evaluate", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--input"))
            .stdout(predicate::str::contains("--threshold"))
            .stdout(predicate::str::contains("--class-names"))
            .stdout(predicate::str::contains("--bundle"));
    }

    #[test]
    fn compare_help_lists_metrics() {
        mq_core()
            .args(["compare", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("auc_roc"))
            .stdout(predicate::str::contains("auc_pr"));
    }

    #[test]
    fn bundle_help_lists_subcommands() {
        mq_core()
            .args(["bundle", "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("inspect"))
            .stdout(predicate::str::contains("verify"));
    }
}

// ============================================================================
// Invalid Argument Tests
// ============================================================================

mod invalid_args {
    use super::*;

    #[test]
    fn unknown_command_fails() {
        mq_core()
            .arg("nonexistent-command")
            .assert()
            .code(10)
            .stderr(predicate::str::contains("error"));
    }

    #[test]
    fn evaluate_requires_input() {
        mq_core()
            .arg("evaluate")
            .assert()
            .code(10)
            .stderr(predicate::str::contains("--input"));
    }

    #[test]
    fn class_names_need_two_distinct_values() {
        for bad in ["only", "a,b,c", "same,same"] {
            mq_core()
                .args(["evaluate", "--input", "x.json", "--class-names", bad])
                .assert()
                .failure()
                .stderr(predicate::str::contains("class"));
        }
    }

    #[test]
    fn malformed_threshold_is_args_error() {
        mq_core()
            .args(["evaluate", "--input", "p.json", "--threshold", "abc"])
            .assert()
            .code(10)
            .stderr(predicate::str::contains("abc"));
    }

    #[test]
    fn unknown_flag_is_args_error() {
        mq_core().arg("--bogus").assert().code(10);
    }

    #[test]
    fn unknown_format_fails() {
        mq_core()
            .args(["--format", "yaml", "version"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("yaml"));
    }

    #[test]
    fn unknown_metric_fails() {
        mq_core()
            .args(["compare", "a.json", "--metric", "logloss"])
            .assert()
            .code(10);
    }
}
