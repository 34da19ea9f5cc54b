//! Test reports and the registry of runnable tests.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

use crate::config::Config;
use crate::env::{CaravelEnv, EnvError};
use crate::verify::{CheckError, smoke_test, user_project_test};

/// Outcome of one test run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestReport {
    /// Test name.
    pub name: String,
    /// Whether every check passed.
    pub passed: bool,
    /// First failure, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Clock cycles elapsed on the environment, including bring-up.
    pub cycles: u64,
    /// Completed bus reads.
    pub reads: u64,
    /// Completed bus writes.
    pub writes: u64,
}

impl TestReport {
    /// One-line summary for terminal output.
    pub fn summary(&self) -> String {
        let verdict = if self.passed { "PASS" } else { "FAIL" };
        let mut line = format!(
            "{verdict} {} ({} cycles, {} reads, {} writes)",
            self.name, self.cycles, self.reads, self.writes
        );
        if let Some(msg) = &self.message {
            line.push_str(": ");
            line.push_str(msg);
        }
        line
    }
}

/// Runs `body` against a configured environment and records the outcome.
///
/// A failing check yields a report with `passed == false`; it is not an error.
pub fn report_test<F>(name: &str, env: &mut CaravelEnv, body: F) -> TestReport
where
    F: FnOnce(&mut CaravelEnv) -> Result<(), CheckError>,
{
    let result = body(env);
    let stats = *env.stats();
    let message = match &result {
        Ok(()) => {
            info!(test = name, cycles = env.cycle(), "test passed");
            None
        }
        Err(e) => {
            error!(test = name, "test failed: {e}");
            Some(e.to_string())
        }
    };
    TestReport {
        name: name.to_string(),
        passed: result.is_ok(),
        message,
        cycles: env.cycle(),
        reads: stats.reads,
        writes: stats.writes,
    }
}

/// Tests the runner knows how to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestCase {
    /// Wishbone register access test of the user project.
    UserProject,
    /// Driver-level smoke test.
    Smoke,
}

/// Unrecognised test name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown test '{0}' (expected one of: user_project, smoke)")]
pub struct UnknownTestCase(pub String);

impl TestCase {
    /// Every registered test, in run order.
    pub const ALL: [Self; 2] = [Self::UserProject, Self::Smoke];

    /// Registry name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::UserProject => "user_project",
            Self::Smoke => "smoke",
        }
    }

    /// Configures a fresh environment and runs the test on it.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError`] if the environment cannot be brought up. Check
    /// failures are reported in the returned [`TestReport`].
    pub fn execute(self, config: &Config) -> Result<TestReport, EnvError> {
        let mut env = CaravelEnv::configure(config)?;
        let report = match self {
            Self::UserProject => report_test(self.name(), &mut env, |e| user_project_test(e)),
            Self::Smoke => report_test(self.name(), &mut env, |e| smoke_test(e)),
        };
        Ok(report)
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TestCase {
    type Err = UnknownTestCase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.replace('-', "_").as_str() {
            "user_project" => Ok(Self::UserProject),
            "smoke" => Ok(Self::Smoke),
            _ => Err(UnknownTestCase(s.to_string())),
        }
    }
}
