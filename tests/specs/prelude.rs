//! Test helpers for behavioral specifications.
//!
//! Provides a small builder DSL for running `speedtest run`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::marker::PhantomData;
use std::process::Command;

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Returns a Command configured to run the speedtest binary
pub fn speedtest_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("speedtest"));
    cmd.env_remove("SPEEDTEST_CONFIG");
    cmd.env_remove("NO_COLOR");
    cmd.env_remove("COLOR");
    cmd
}

/// Create a `speedtest run` builder for the given demos (empty = all)
pub fn run(demos: &[&str]) -> RunBuilder<Text> {
    RunBuilder {
        demos: demos.iter().map(|s| s.to_string()).collect(),
        dir: None,
        args: Vec::new(),
        envs: Vec::new(),
        _mode: PhantomData,
    }
}

/// Typestate markers for output mode
pub struct Text;
pub struct Json;

/// High-level run builder for fluent test assertions
pub struct RunBuilder<Mode = Text> {
    demos: Vec<String>,
    dir: Option<std::path::PathBuf>,
    args: Vec<String>,
    envs: Vec<(String, String)>,
    _mode: PhantomData<Mode>,
}

#[allow(dead_code)]
impl<Mode: 'static> RunBuilder<Mode> {
    /// Set working directory
    pub fn pwd(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set an environment variable
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// Build the command
    fn command(self) -> Command {
        let is_json = std::any::TypeId::of::<Mode>() == std::any::TypeId::of::<Json>();

        let mut cmd = speedtest_cmd();
        cmd.arg("run");
        cmd.args(&self.demos);

        if is_json {
            cmd.args(["-o", "json"]);
        }

        cmd.args(&self.args);

        for (key, value) in self.envs {
            cmd.env(key, value);
        }

        // Keep tests out of any config in the developer's checkout
        let dir = self.dir.unwrap_or_else(std::env::temp_dir);
        cmd.current_dir(dir);

        cmd
    }
}

#[allow(dead_code)]
impl RunBuilder<Text> {
    /// Switch to JSON output
    pub fn json(self) -> RunBuilder<Json> {
        RunBuilder {
            demos: self.demos,
            dir: self.dir,
            args: self.args,
            envs: self.envs,
            _mode: PhantomData,
        }
    }

    pub fn passes(self) -> RunAssert {
        run_passes(self.command())
    }

    pub fn exits(self, code: i32) -> RunAssert {
        run_exits(self.command(), code)
    }
}

#[allow(dead_code)]
impl RunBuilder<Json> {
    pub fn passes(self) -> RunJson {
        RunJson::new(&run_passes(self.command()).output.stdout)
    }

    pub fn exits(self, code: i32) -> RunJson {
        RunJson::new(&run_exits(self.command(), code).output.stdout)
    }
}

fn run_passes(mut cmd: Command) -> RunAssert {
    let output = cmd.output().expect("command should run");
    assert!(
        output.status.success(),
        "expected run to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    RunAssert { output }
}

fn run_exits(mut cmd: Command, code: i32) -> RunAssert {
    let output = cmd.output().expect("command should run");
    assert_eq!(
        output.status.code(),
        Some(code),
        "expected exit code {}, got {:?}\nstdout: {}\nstderr: {}",
        code,
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    RunAssert { output }
}

/// Parsed JSON output of `speedtest run -o json`
pub struct RunJson {
    root: serde_json::Value,
}

#[allow(dead_code)]
impl RunJson {
    fn new(stdout: &[u8]) -> Self {
        let root: serde_json::Value = serde_json::from_slice(stdout).expect("valid JSON");
        Self { root }
    }

    /// Get the root JSON value
    pub fn value(&self) -> &serde_json::Value {
        &self.root
    }

    /// All groups in output order
    pub fn groups(&self) -> &Vec<serde_json::Value> {
        self.root["groups"].as_array().expect("groups should be an array")
    }

    /// Group names in output order
    pub fn group_names(&self) -> Vec<&str> {
        self.groups()
            .iter()
            .map(|g| g["name"].as_str().expect("group name"))
            .collect()
    }

    /// Require the named test inside the named group
    pub fn require_test(&self, group: &str, test: &str) -> &serde_json::Value {
        self.groups()
            .iter()
            .find(|g| g["name"] == group)
            .unwrap_or_else(|| panic!("group {} not found", group))["tests"]
            .as_array()
            .expect("tests should be an array")
            .iter()
            .find(|t| t["name"] == test)
            .unwrap_or_else(|| panic!("test {} not found in {}", test, group))
    }

    /// Every test entry across all groups
    pub fn tests(&self) -> Vec<&serde_json::Value> {
        self.groups()
            .iter()
            .flat_map(|g| g["tests"].as_array().expect("tests should be an array"))
            .collect()
    }
}

pub struct RunAssert {
    output: std::process::Output,
}

#[allow(dead_code)]
impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert stdout matches predicate.
    pub fn stdout_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        let pred = predicate.into_predicate();
        assert!(pred.eval(&stdout), "stdout does not match predicate:\n{}", stdout);
        self
    }

    /// Assert stdout does not match predicate.
    pub fn stdout_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        let pred = predicate.into_predicate();
        assert!(!pred.eval(&stdout), "stdout unexpectedly matches:\n{}", stdout);
        self
    }

    /// Assert stderr matches predicate.
    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        let pred = predicate.into_predicate();
        assert!(pred.eval(&stderr), "stderr does not match predicate:\n{}", stderr);
        self
    }
}

/// Creates a temp directory holding a speedtest.toml and an empty .git so
/// config discovery stops there.
pub fn temp_project(config: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join(".git")).unwrap();
    std::fs::write(dir.path().join("speedtest.toml"), config).unwrap();
    dir
}
