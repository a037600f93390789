//! Test outcomes

use fund_me_config::{ExecutionMode, NetworkDescriptor};
use serde::Serialize;
use std::{collections::BTreeMap, fmt, time::Duration};

/// Results and duration of the cases of one suite
#[derive(Clone, Debug, Default, Serialize)]
pub struct SuiteResult {
    /// Total duration of the suite
    pub duration: Duration,
    /// Individual test results. `case name -> TestResult`
    pub test_results: BTreeMap<String, TestResult>,
}

impl SuiteResult {
    pub fn new(duration: Duration, test_results: BTreeMap<String, TestResult>) -> Self {
        Self { duration, test_results }
    }

    /// Iterator over all succeeding tests and their names
    pub fn successes(&self) -> impl Iterator<Item = (&String, &TestResult)> {
        self.tests().filter(|(_, t)| t.status.is_success())
    }

    /// Iterator over all failing tests and their names
    pub fn failures(&self) -> impl Iterator<Item = (&String, &TestResult)> {
        self.tests().filter(|(_, t)| t.status.is_failure())
    }

    /// Iterator over all skipped tests and their names
    pub fn skips(&self) -> impl Iterator<Item = (&String, &TestResult)> {
        self.tests().filter(|(_, t)| t.status.is_skipped())
    }

    /// Iterator over all tests and their names
    pub fn tests(&self) -> impl Iterator<Item = (&String, &TestResult)> {
        self.test_results.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.test_results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.test_results.len()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum TestStatus {
    Success,
    #[default]
    Failure,
    Skipped,
}

impl TestStatus {
    /// Returns `true` if the test was successful.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Returns `true` if the test failed.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Self::Failure)
    }

    /// Returns `true` if the test was skipped.
    #[inline]
    pub fn is_skipped(self) -> bool {
        matches!(self, Self::Skipped)
    }
}

/// The result of a single case
#[derive(Clone, Debug, Default, Serialize)]
pub struct TestResult {
    pub status: TestStatus,
    /// Why the case failed
    pub reason: Option<String>,
    /// Gas used by the transactions the case sent, not counting its group's setup
    pub gas_used: u64,
    pub duration: Duration,
    /// Lines the case printed
    pub logs: Vec<String>,
}

impl TestResult {
    pub fn success(gas_used: u64, duration: Duration, logs: Vec<String>) -> Self {
        Self { status: TestStatus::Success, reason: None, gas_used, duration, logs }
    }

    pub fn fail(reason: String) -> Self {
        Self { status: TestStatus::Failure, reason: Some(reason), ..Default::default() }
    }

    pub fn skipped() -> Self {
        Self { status: TestStatus::Skipped, ..Default::default() }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_logs(mut self, logs: Vec<String>) -> Self {
        self.logs = logs;
        self
    }
}

/// Gas report of a case, `(gas: N)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GasReport(pub u64);

impl fmt::Display for GasReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(gas: {})", self.0)
    }
}

/// The results of all suites of a run
#[derive(Clone, Debug, Serialize)]
pub struct TestOutcome {
    pub network: NetworkDescriptor,
    pub mode: ExecutionMode,
    /// Results for each suite `suite name -> SuiteResult`
    pub results: BTreeMap<String, SuiteResult>,
}

impl TestOutcome {
    pub fn new(
        network: NetworkDescriptor,
        mode: ExecutionMode,
        results: BTreeMap<String, SuiteResult>,
    ) -> Self {
        Self { network, mode, results }
    }

    /// Iterator over all succeeding tests and their names
    pub fn successes(&self) -> impl Iterator<Item = (&String, &TestResult)> {
        self.tests().filter(|(_, t)| t.status.is_success())
    }

    /// Iterator over all failing tests and their names
    pub fn failures(&self) -> impl Iterator<Item = (&String, &TestResult)> {
        self.tests().filter(|(_, t)| t.status.is_failure())
    }

    pub fn skips(&self) -> impl Iterator<Item = (&String, &TestResult)> {
        self.tests().filter(|(_, t)| t.status.is_skipped())
    }

    /// Iterator over all tests and their names
    pub fn tests(&self) -> impl Iterator<Item = (&String, &TestResult)> {
        self.results.values().flat_map(|suite| suite.tests())
    }

    pub fn duration(&self) -> Duration {
        self.results.values().map(|suite| suite.duration).sum()
    }

    /// Whether no case failed.
    pub fn is_ok(&self) -> bool {
        self.failures().next().is_none()
    }
}
