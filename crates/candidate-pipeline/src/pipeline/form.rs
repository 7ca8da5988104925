use serde::{Deserialize, Serialize};

use super::domain::{Candidate, EvaluationStatus};

/// Editable fields of the candidate detail page. Any field left out keeps its loaded value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateEdit {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub job_applied_for: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: Option<EvaluationStatus>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("required fields missing: {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

impl CandidateEdit {
    /// Overlay the edit onto `loaded`. The loaded id is always kept; any status value,
    /// including a jump from fail to pass, is accepted.
    pub fn apply_to(&self, loaded: &Candidate) -> Candidate {
        let mut candidate = loaded.clone();
        if let Some(name) = &self.name {
            candidate.name = name.clone();
        }
        if let Some(summary) = &self.summary {
            candidate.summary = summary.clone();
        }
        if let Some(job) = &self.job_applied_for {
            candidate.job_applied_for = job.clone();
        }
        if let Some(phone) = &self.phone {
            candidate.phone = phone.clone();
        }
        if let Some(status) = &self.status {
            candidate.status = status.clone();
        }
        candidate
    }
}

/// Required-field presence check; nothing beyond that is enforced.
pub fn validate(candidate: &Candidate) -> Result<(), ValidationError> {
    let missing: Vec<&'static str> = [
        ("name", candidate.name.as_str()),
        ("summary", candidate.summary.as_str()),
        ("jobAppliedFor", candidate.job_applied_for.as_str()),
        ("phone", candidate.phone.as_str()),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { missing })
    }
}
