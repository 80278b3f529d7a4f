use std::fmt;

use crate::errors::DomainError;

/// Terminal result of one refresh task. Produced exactly once per endpoint
/// per cycle and consumed only by the coordinator's tally step.
#[derive(Debug)]
pub enum RefreshOutcome {
    /// The manager confirmed the endpoint reloaded its mount table.
    Success,
    /// The manager declined the refresh or the call failed outright.
    Failure(DomainError),
    /// The call did not settle within the per-task budget.
    Timeout,
}

impl RefreshOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RefreshOutcome::Success)
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            RefreshOutcome::Success => None,
            RefreshOutcome::Failure(_) => Some(FailureKind::Error),
            RefreshOutcome::Timeout => Some(FailureKind::Timeout),
        }
    }
}

/// Advisory category for a cycle's failures. Timeouts and errors share one
/// failure count; only the advisory log text distinguishes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Error,
    Timeout,
}

impl FailureKind {
    /// Advisory line emitted before the cycle summary. The wording is load
    /// bearing: existing log scrapers match on it.
    pub fn advisory(&self) -> &'static str {
        match self {
            FailureKind::Timeout => "Some cache updates timed out",
            FailureKind::Error => "Some cache updates completed with error",
        }
    }
}

/// Per-cycle tally, computed only after every task has settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleSummary {
    pub success_count: usize,
    pub failure_count: usize,
    /// Category of the first non-success outcome in submission order, if any.
    pub first_failure: Option<FailureKind>,
}

impl CycleSummary {
    pub fn tally<'a>(outcomes: impl IntoIterator<Item = &'a RefreshOutcome>) -> Self {
        let mut summary = Self {
            success_count: 0,
            failure_count: 0,
            first_failure: None,
        };
        for outcome in outcomes {
            match outcome.failure_kind() {
                None => summary.success_count += 1,
                Some(kind) => {
                    summary.failure_count += 1;
                    summary.first_failure.get_or_insert(kind);
                }
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.success_count + self.failure_count
    }
}

/// Scraper-compatible summary line. Keep the exact format in sync with the
/// fleet's log pipelines before touching it.
impl fmt::Display for CycleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mount table entries cache refresh successCount={},failureCount={}",
            self.success_count, self.failure_count
        )
    }
}
