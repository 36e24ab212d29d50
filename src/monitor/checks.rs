use serde::Serialize;

/// Outcome of one monitor check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: &'static str,
    pub passed: bool,
    pub message: String,
}

impl CheckResult {
    pub fn pass(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            name,
            passed: true,
            message: message.into(),
        }
    }

    pub fn fail(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            name,
            passed: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub checks: Vec<CheckResult>,
}

impl HealthReport {
    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    pub fn total(&self) -> usize {
        self.checks.len()
    }

    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn summary(&self) -> String {
        format!(
            "Health check completed: {}/{} checks passed",
            self.passed(),
            self.total()
        )
    }
}

/// Percentage of successes, 0.0 for an empty run.
pub fn success_rate(results: &[bool]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let ok = results.iter().filter(|r| **r).count();
    ok as f64 / results.len() as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_rate() {
        assert_eq!(success_rate(&[true, true, true, false]), 75.0);
        assert_eq!(success_rate(&[true; 4]), 100.0);
        assert_eq!(success_rate(&[]), 0.0);
    }

    #[test]
    fn test_report_summary() {
        let report = HealthReport {
            checks: vec![
                CheckResult::pass("backend_health", "ok"),
                CheckResult::fail("ui_health", "connection refused"),
            ],
        };
        assert!(!report.all_passed());
        assert_eq!(report.summary(), "Health check completed: 1/2 checks passed");
    }
}
