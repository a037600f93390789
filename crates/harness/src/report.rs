//! Printing test outcomes.

use crate::result::{GasReport, SuiteResult, TestOutcome, TestResult, TestStatus};
use comfy_table::{Cell, Color, Row, Table, modifiers::UTF8_ROUND_CORNERS};
use std::fmt::{self, Write};
use yansi::Paint;

/// One line per case: `[PASS] name (gas: N)`, followed by its logs.
pub fn short_test_result(name: &str, result: &TestResult) -> String {
    let status = match result.status {
        TestStatus::Success => "[PASS]".green().to_string(),
        TestStatus::Skipped => "[SKIP]".yellow().to_string(),
        TestStatus::Failure => {
            let reason = result.reason.as_deref().unwrap_or("Assertion failed.");
            format!("[FAIL. Reason: {reason}]").red().to_string()
        }
    };

    let mut line = if result.status.is_success() {
        format!("{status} {name} {}", GasReport(result.gas_used))
    } else {
        format!("{status} {name}")
    };
    if !result.logs.is_empty() {
        line.push_str("\nLogs:");
        for log in &result.logs {
            let _ = write!(line, "\n  {log}");
        }
    }
    line
}

/// The results of one suite and its summary line.
pub fn format_suite(name: &str, suite: &SuiteResult) -> String {
    let tests = if suite.len() == 1 { "test" } else { "tests" };
    let mut out = format!("Ran {} {tests} for {name}\n", suite.len());
    for (case, result) in suite.tests() {
        out.push_str(&short_test_result(case, result));
        out.push('\n');
    }
    let failed = suite.failures().count();
    let result = if failed == 0 { "ok".green().to_string() } else { "FAILED".red().to_string() };
    let _ = write!(
        out,
        "Suite result: {result}. {} passed; {failed} failed; {} skipped; finished in {:.2?}",
        suite.successes().count(),
        suite.skips().count(),
        suite.duration,
    );
    out
}

/// Summary of the whole run.
pub fn format_summary(outcome: &TestOutcome) -> String {
    let passed = outcome.successes().count();
    let failed = outcome.failures().count();
    let skipped = outcome.skips().count();
    let suites = outcome.results.len();
    format!(
        "Ran {suites} test {} in {:.2?}: {} tests passed, {} failed, {} skipped ({} total tests)",
        if suites == 1 { "suite" } else { "suites" },
        outcome.duration(),
        passed.green(),
        failed.red(),
        skipped.yellow(),
        passed + failed + skipped,
    )
}

/// The failing cases of each suite.
pub fn format_failures(outcome: &TestOutcome) -> String {
    let mut out = String::from("Failing tests:\n");
    for (suite_name, suite) in &outcome.results {
        let failures = suite.failures().count();
        if failures == 0 {
            continue;
        }
        let term = if failures > 1 { "tests" } else { "test" };
        let _ = writeln!(out, "Encountered {failures} failing {term} in {suite_name}");
        for (name, result) in suite.failures() {
            let _ = writeln!(out, "{}", short_test_result(name, result));
        }
        out.push('\n');
    }
    let _ = write!(
        out,
        "Encountered a total of {} failing tests, {} tests succeeded",
        outcome.failures().count().red(),
        outcome.successes().count().green()
    );
    out
}

/// Table of passed, failed and skipped cases per suite.
pub struct TestSummaryReport<'a> {
    outcome: &'a TestOutcome,
}

impl<'a> TestSummaryReport<'a> {
    pub fn new(outcome: &'a TestOutcome) -> Self {
        Self { outcome }
    }

    fn format_table_output(&self) -> Table {
        let mut table = Table::new();
        table.apply_modifier(UTF8_ROUND_CORNERS);
        table.set_header(Row::from(vec![
            Cell::new("Test Suite"),
            Cell::new("Passed").fg(Color::Green),
            Cell::new("Failed").fg(Color::Red),
            Cell::new("Skipped").fg(Color::Yellow),
            Cell::new("Duration").fg(Color::Cyan),
        ]));

        for (name, suite) in &self.outcome.results {
            let passed = suite.successes().count();
            let failed = suite.failures().count();
            let skipped = suite.skips().count();

            let mut row = Row::new();
            row.add_cell(Cell::new(name));
            row.add_cell(colored(passed, Color::Green));
            row.add_cell(colored(failed, Color::Red));
            row.add_cell(colored(skipped, Color::Yellow));
            row.add_cell(Cell::new(format!("{:.2?}", suite.duration)));
            table.add_row(row);
        }
        table
    }
}

fn colored(count: usize, color: Color) -> Cell {
    let cell = Cell::new(count);
    if count > 0 { cell.fg(color) } else { cell }
}

impl fmt::Display for TestSummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n{}", self.format_table_output())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::BTreeMap, time::Duration};

    #[test]
    fn formats_results() {
        yansi::disable();

        let pass = TestResult::success(
            86_043,
            Duration::ZERO,
            vec!["0 should equal 0, running assert equal...".to_string()],
        );
        assert_eq!(
            short_test_result("allows people to fund and withdraw", &pass),
            "[PASS] allows people to fund and withdraw (gas: 86043)\nLogs:\n  0 should equal 0, running assert equal..."
        );

        let fail = TestResult::fail("call did not revert as expected".to_string());
        assert_eq!(
            short_test_result("Only allows the owner to withdraw", &fail),
            "[FAIL. Reason: call did not revert as expected] Only allows the owner to withdraw"
        );
        assert_eq!(short_test_result("x", &TestResult::skipped()), "[SKIP] x");

        let suite =
            SuiteResult::new(Duration::ZERO, BTreeMap::from([("a".to_string(), pass), ("b".to_string(), fail)]));
        let formatted = format_suite("FundMe withdraw", &suite);
        assert!(formatted.starts_with("Ran 2 tests for FundMe withdraw\n"), "{formatted}");
        assert!(formatted.contains("Suite result: FAILED. 1 passed; 1 failed; 0 skipped;"), "{formatted}");
    }
}
