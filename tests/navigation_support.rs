use assert_cmd::Command;
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

pub const TODAY: &str = "2026-10-19";

pub struct CliOutput {
    pub stdout: String,
    #[allow(dead_code)]
    pub stderr: String,
}

/// Runs `agenda_cli` against a private home with an instant, fully open agenda.
pub struct NavigationTestHarness {
    home: TempDir,
}

impl NavigationTestHarness {
    pub fn new() -> Self {
        let home = tempfile::tempdir().expect("create temp dir");
        let config = json!({
            "service_latency_ms": 0,
            "slot_latency_ms": 0,
            "submit_latency_ms": 0,
            "availability_ratio": 1.0,
            "seed": 42,
            "business_days_shown": 3,
            "plain_mode": true
        });
        std::fs::write(
            home.path().join("config.json"),
            serde_json::to_string_pretty(&config).expect("serialize config"),
        )
        .expect("write config");
        Self { home }
    }

    pub fn home(&self) -> &Path {
        self.home.path()
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("agenda_cli").expect("binary exists");
        cmd.env("AGENDA_HOME", self.home())
            .env("AGENDA_TODAY", TODAY)
            .env("NO_COLOR", "1")
            .env_remove("AGENDA_SEED")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn run_interactive(&self, menu_sequences: &[&str], text_inputs: &[&str]) -> CliOutput {
        assert!(
            !menu_sequences.is_empty(),
            "provide at least one menu sequence"
        );
        let mut cmd = self.command();
        cmd.env("AGENDA_TEST_MENU_EVENTS", join_sequences(menu_sequences));
        cmd.env("AGENDA_TEST_TEXT_INPUTS", join_sequences(text_inputs));
        let output = cmd.output().expect("run interactive CLI");
        if !output.status.success() {
            panic!(
                "interactive CLI failed: status={}\nstdout:\n{}\nstderr:\n{}",
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        CliOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

fn join_sequences(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("|")
}
