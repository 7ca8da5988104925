use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::{Candidate, CandidateId, EvaluationStatus};

pub const ALL: &str = "all";

/// Status tab selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Pass,
    Fail,
}

impl StatusFilter {
    pub const fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All Candidates",
            StatusFilter::Pending => "Pending",
            StatusFilter::Pass => "Passed",
            StatusFilter::Fail => "Failed",
        }
    }

    pub fn matches(self, status: &EvaluationStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => *status == EvaluationStatus::Pending,
            StatusFilter::Pass => *status == EvaluationStatus::Pass,
            StatusFilter::Fail => *status == EvaluationStatus::Fail,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown status filter '{0}', expected one of all, pending, pass, fail")]
pub struct FilterParseError(pub String);

impl FromStr for StatusFilter {
    type Err = FilterParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | ALL => Ok(StatusFilter::All),
            "pending" => Ok(StatusFilter::Pending),
            "pass" => Ok(StatusFilter::Pass),
            "fail" => Ok(StatusFilter::Fail),
            _ => Err(FilterParseError(value.to_string())),
        }
    }
}

/// Position selection. `Position` holds an exact `jobAppliedFor` value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum JobFilter {
    #[default]
    All,
    Position(String),
}

impl JobFilter {
    pub fn matches(&self, job_applied_for: &str) -> bool {
        match self {
            JobFilter::All => true,
            JobFilter::Position(position) => position == job_applied_for,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobFilter::All => ALL,
            JobFilter::Position(position) => position,
        }
    }
}

impl From<&str> for JobFilter {
    fn from(value: &str) -> Self {
        if value.is_empty() || value == ALL {
            JobFilter::All
        } else {
            JobFilter::Position(value.to_string())
        }
    }
}

impl fmt::Display for JobFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for JobFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Counts over the unfiltered list. Unrecognized statuses only count toward `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub total: usize,
    pub pending: usize,
    pub passed: usize,
    pub failed: usize,
}

/// Row-level action offered by the dashboard table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateAction {
    Call,
    Schedule,
}

impl CandidateAction {
    pub const fn label(self) -> &'static str {
        match self {
            CandidateAction::Call => "Call",
            CandidateAction::Schedule => "Schedule",
        }
    }

    pub fn for_status(status: &EvaluationStatus) -> Option<Self> {
        match status {
            EvaluationStatus::Pending => Some(CandidateAction::Call),
            EvaluationStatus::Pass => Some(CandidateAction::Schedule),
            EvaluationStatus::Fail | EvaluationStatus::Other(_) => None,
        }
    }
}

/// Stable filter; input order is preserved.
pub fn filter_candidates<'a>(
    candidates: &'a [Candidate],
    status: StatusFilter,
    job: &JobFilter,
) -> Vec<&'a Candidate> {
    candidates
        .iter()
        .filter(|candidate| {
            status.matches(&candidate.status) && job.matches(&candidate.job_applied_for)
        })
        .collect()
}

pub fn aggregate(candidates: &[Candidate]) -> PipelineStats {
    candidates
        .iter()
        .fold(PipelineStats::default(), |mut stats, candidate| {
            stats.total += 1;
            match candidate.status {
                EvaluationStatus::Pending => stats.pending += 1,
                EvaluationStatus::Pass => stats.passed += 1,
                EvaluationStatus::Fail => stats.failed += 1,
                EvaluationStatus::Other(_) => {}
            }
            stats
        })
}

/// `"all"` followed by each distinct position in order of first appearance. Blank
/// positions are skipped since they cannot be selected apart from `all`.
pub fn job_options(candidates: &[Candidate]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut options = vec![ALL.to_string()];
    for candidate in candidates {
        if candidate.job_applied_for.is_empty() {
            continue;
        }
        if seen.insert(candidate.job_applied_for.as_str()) {
            options.push(candidate.job_applied_for.clone());
        }
    }
    options
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateRow {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub status_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<CandidateAction>,
}

impl CandidateRow {
    fn from_candidate(candidate: &Candidate) -> Self {
        Self {
            candidate: candidate.clone(),
            status_label: candidate.status.label().to_string(),
            action: CandidateAction::for_status(&candidate.status),
        }
    }
}

/// Everything the dashboard renders for one filter selection.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub stats: PipelineStats,
    pub status_filter: StatusFilter,
    pub job_filter: JobFilter,
    pub job_options: Vec<String>,
    pub rows: Vec<CandidateRow>,
}

/// Process-local state for one dashboard session: the last fetched list plus the active
/// filters. Nothing here outlives the process.
#[derive(Debug, Clone, Default)]
pub struct CandidateBoard {
    candidates: Vec<Candidate>,
    status_filter: StatusFilter,
    job_filter: JobFilter,
    loaded: bool,
}

impl CandidateBoard {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            loaded: true,
            ..Self::default()
        }
    }

    /// `false` until a list has been stored; a cold board needs a fetch before it can render.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn find(&self, id: &CandidateId) -> Option<&Candidate> {
        self.candidates.iter().find(|candidate| &candidate.id == id)
    }

    pub fn replace_list(&mut self, candidates: Vec<Candidate>) {
        self.candidates = candidates;
        self.loaded = true;
    }

    pub fn set_filters(&mut self, status: StatusFilter, job: JobFilter) {
        self.status_filter = status;
        self.job_filter = job;
    }

    /// Swap in a freshly updated record. Returns `false` when the id is not cached.
    pub fn apply_update(&mut self, updated: Candidate) -> bool {
        match self
            .candidates
            .iter_mut()
            .find(|candidate| candidate.id == updated.id)
        {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    pub fn stats(&self) -> PipelineStats {
        aggregate(&self.candidates)
    }

    pub fn visible(&self) -> Vec<&Candidate> {
        filter_candidates(&self.candidates, self.status_filter, &self.job_filter)
    }

    pub fn view(&self) -> DashboardView {
        DashboardView {
            stats: self.stats(),
            status_filter: self.status_filter,
            job_filter: self.job_filter.clone(),
            job_options: job_options(&self.candidates),
            rows: self
                .visible()
                .into_iter()
                .map(CandidateRow::from_candidate)
                .collect(),
        }
    }
}
