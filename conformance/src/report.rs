//! Conformance report types: results, severity levels, and report aggregation.

use std::fmt;

/// Severity level of a conformance check result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The check passed.
    Pass,
    /// The check could not be applied as written (non-blocking).
    Warning,
    /// The law was violated (blocks conformance).
    Failure,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Pass => "PASS",
            Severity::Warning => "WARN",
            Severity::Failure => "FAIL",
        })
    }
}

/// A single conformance check result.
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Validator that produced this result, e.g. `synthesis/family`.
    pub validator: String,
    /// Outcome, usually naming the declaration checked.
    pub message: String,
    /// Severity of the result.
    pub severity: Severity,
    /// One line per violation found.
    pub details: Vec<String>,
}

impl TestResult {
    fn with(
        validator: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
        details: Vec<String>,
    ) -> Self {
        Self {
            validator: validator.into(),
            message: message.into(),
            severity,
            details,
        }
    }

    /// Creates a passing result.
    pub fn pass(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with(validator, message, Severity::Pass, Vec::new())
    }

    /// Creates a failure result.
    pub fn fail(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with(validator, message, Severity::Failure, Vec::new())
    }

    /// Creates a failure result with additional detail lines.
    pub fn fail_with_details(
        validator: impl Into<String>,
        message: impl Into<String>,
        details: Vec<String>,
    ) -> Self {
        Self::with(validator, message, Severity::Failure, details)
    }

    /// Creates a warning result.
    pub fn warn(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with(validator, message, Severity::Warning, Vec::new())
    }

    /// Pass when `violations` is empty, failure listing them otherwise.
    pub fn from_violations(
        validator: impl Into<String>,
        subject: &str,
        violations: Vec<String>,
    ) -> Self {
        if violations.is_empty() {
            Self::pass(validator, subject)
        } else {
            let message = format!("{subject}: {} violation(s)", violations.len());
            Self::fail_with_details(validator, message, violations)
        }
    }

    /// Returns true if this result represents a failure.
    pub fn is_failure(&self) -> bool {
        self.severity == Severity::Failure
    }
}

/// Aggregated conformance report from all validators.
#[derive(Debug, Default)]
pub struct ConformanceReport {
    /// All individual test results across all validators.
    pub results: Vec<TestResult>,
}

impl ConformanceReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a result to this report.
    pub fn push(&mut self, result: TestResult) {
        self.results.push(result);
    }

    /// Extends this report with results from another report.
    pub fn extend(&mut self, other: ConformanceReport) {
        self.results.extend(other.results);
    }

    /// Number of results with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.results.iter().filter(|r| r.severity == severity).count()
    }

    /// Returns the count of failed checks.
    pub fn failure_count(&self) -> usize {
        self.count(Severity::Failure)
    }

    /// Returns true if all checks passed (no failures).
    pub fn all_passed(&self) -> bool {
        self.failure_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violations_decide_severity() {
        let ok = TestResult::from_violations("synthesis/naming", "com.example.Box", Vec::new());
        assert_eq!(ok.severity, Severity::Pass);
        assert_eq!(ok.message, "com.example.Box");

        let bad = TestResult::from_violations(
            "synthesis/naming",
            "com.example.Box",
            vec!["kind4 is not a known member name".to_owned()],
        );
        assert!(bad.is_failure());
        assert_eq!(bad.message, "com.example.Box: 1 violation(s)");
    }

    #[test]
    fn counts_by_severity() {
        let mut report = ConformanceReport::new();
        report.push(TestResult::pass("a", "x"));
        report.push(TestResult::warn("a", "y"));
        report.push(TestResult::fail("b", "z"));
        assert_eq!(report.count(Severity::Pass), 1);
        assert_eq!(report.count(Severity::Warning), 1);
        assert_eq!(report.failure_count(), 1);
        assert!(!report.all_passed());
    }
}
